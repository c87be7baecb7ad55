//! Localization store: the active language for one visitor session.
//!
//! The store is the only place the language changes. Components read the
//! current value or hold a `watch::Receiver` and re-derive their output on
//! every change; nothing caches language-dependent output across a switch.

use crate::i18n::Language;
use anyhow::Result;
use tokio::sync::watch;
use tracing::{debug, warn};

pub struct LocalizationStore {
    tx: watch::Sender<Language>,
}

impl LocalizationStore {
    pub fn new(initial: Language) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Current language.
    pub fn language(&self) -> Language {
        *self.tx.borrow()
    }

    /// Switch language. Returns `true` if the language actually changed;
    /// setting the current language again notifies nobody.
    pub fn set_language(&self, language: Language) -> bool {
        let changed = self.tx.send_if_modified(|current| {
            if *current == language {
                false
            } else {
                *current = language;
                true
            }
        });

        if changed {
            debug!("Language switched to {}", language);
        }
        changed
    }

    /// Switch language from a raw code (query string, cookie, toggle value).
    ///
    /// Unknown codes are rejected and leave the current language untouched.
    pub fn set_language_code(&self, code: &str) -> Result<bool> {
        match Language::from_code(code) {
            Ok(language) => Ok(self.set_language(language)),
            Err(e) => {
                warn!("Ignoring language switch: {}", e);
                Err(e)
            }
        }
    }

    /// Receiver that observes every subsequent language change.
    pub fn subscribe(&self) -> watch::Receiver<Language> {
        self.tx.subscribe()
    }
}

impl Default for LocalizationStore {
    fn default() -> Self {
        Self::new(Language::canonical())
    }
}
