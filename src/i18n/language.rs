//! Language type: a registry-validated language value.
//!
//! Only codes present and enabled in the registry can become a `Language`, so
//! every component that receives one can look up its strings without failing.

use crate::i18n::{LanguageConfig, LanguageRegistry, TextDirection, TranslationTable};
use anyhow::{bail, Result};
use std::fmt;

/// A validated language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    /// ISO 639-1 language code ("en" or "ar")
    code: &'static str,
}

impl Language {
    pub const ENGLISH: Language = Language { code: "en" };

    pub const ARABIC: Language = Language { code: "ar" };

    /// Create a Language from a language code string.
    ///
    /// # Returns
    /// * `Ok(Language)` if the code is registered and enabled
    /// * `Err` if the code is unknown or the language is disabled
    pub fn from_code(code: &str) -> Result<Language> {
        let registry = LanguageRegistry::get();

        match registry.get_by_code(code) {
            Some(config) if config.enabled => Ok(Language { code: config.code }),
            Some(_) => bail!("Language '{}' is not enabled", code),
            None => bail!("Unknown language code: '{}'", code),
        }
    }

    /// The fallback language (English).
    pub fn canonical() -> Language {
        let config = LanguageRegistry::get().canonical();
        Language { code: config.code }
    }

    /// The other language of the pair, used for `alternateName` and hreflang.
    pub fn counterpart(&self) -> Language {
        LanguageRegistry::get()
            .list_enabled()
            .into_iter()
            .find(|lang| lang.code != self.code)
            .map(|lang| Language { code: lang.code })
            .unwrap_or(*self)
    }

    /// Get the ISO 639-1 language code.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the full language configuration from the registry.
    ///
    /// # Panics
    /// Panics if the code is not in the registry, which cannot happen for a
    /// value built through `from_code` or the constants.
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get()
            .get_by_code(self.code)
            .expect("Language code should always be valid")
    }

    pub fn name(&self) -> &'static str {
        self.config().name
    }

    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    pub fn direction(&self) -> TextDirection {
        self.config().direction
    }

    pub fn is_canonical(&self) -> bool {
        self.config().is_canonical
    }

    pub fn strings(&self) -> &'static TranslationTable {
        self.config().strings
    }

    /// Look up a dotted key in this language's table.
    ///
    /// Falls back to the canonical table, then to the key itself so a missing
    /// string shows up visibly instead of rendering blank.
    pub fn t(&self, key: &'static str) -> &'static str {
        self.strings()
            .get(key)
            .or_else(|| Language::canonical().strings().get(key))
            .unwrap_or(key)
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::canonical()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}
