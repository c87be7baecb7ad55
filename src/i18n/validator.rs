//! Translation table validation.
//!
//! Checks that every language table carries the same keys as the canonical
//! table, that no string is empty, and that `{placeholder}` tokens survive
//! translation so interpolation works in both languages.

use crate::i18n::{LanguageRegistry, TranslationTable};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Validation report containing errors and warnings about a table pair.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationReport {
    /// Problems that break rendering (missing keys, empty strings, lost placeholders)
    pub errors: Vec<String>,

    /// Suspicious but harmless findings (keys only present in the translation)
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

pub struct TranslationValidator;

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

impl TranslationValidator {
    /// Validate every enabled language against the canonical one.
    pub fn validate_registry() -> ValidationReport {
        let registry = LanguageRegistry::get();
        let canonical = registry.canonical();
        let mut report = ValidationReport::new();

        for lang in registry.list_enabled() {
            if lang.code == canonical.code {
                continue;
            }
            let partial = Self::validate(canonical.strings, lang.strings);
            report
                .errors
                .extend(partial.errors.into_iter().map(|e| format!("[{}] {}", lang.code, e)));
            report
                .warnings
                .extend(partial.warnings.into_iter().map(|w| format!("[{}] {}", lang.code, w)));
        }

        report
    }

    /// Validate one translated table against the canonical table.
    pub fn validate(canonical: &TranslationTable, translated: &TranslationTable) -> ValidationReport {
        let mut report = ValidationReport::new();

        for (key, value) in canonical.iter() {
            if value.trim().is_empty() {
                report.errors.push(format!("Canonical string '{}' is empty", key));
            }

            match translated.get(key) {
                None => report.errors.push(format!("Missing key '{}'", key)),
                Some(t) if t.trim().is_empty() => {
                    report.errors.push(format!("Empty translation for '{}'", key))
                }
                Some(t) => {
                    let expected = Self::extract_placeholders(value);
                    let found = Self::extract_placeholders(t);
                    if expected != found {
                        report.errors.push(format!(
                            "Placeholder mismatch in '{}': canonical has {:?}, translation has {:?}",
                            key, expected, found
                        ));
                    }
                }
            }
        }

        for key in translated.keys() {
            if canonical.get(key).is_none() {
                report
                    .warnings
                    .push(format!("Key '{}' is not in the canonical table", key));
            }
        }

        report
    }

    fn extract_placeholders(text: &str) -> BTreeSet<String> {
        let regex = PLACEHOLDER_REGEX
            .get_or_init(|| Regex::new(r"\{([a-z_]+)\}").expect("placeholder regex is valid"));

        regex
            .captures_iter(text)
            .filter_map(|cap| cap.get(1))
            .map(|m| m.as_str().to_string())
            .collect()
    }
}
