//! Internationalization (i18n) for the English/Arabic site.
//!
//! # Architecture
//!
//! - `registry`: the two supported languages and their metadata
//! - `language`: registry-validated `Language` value
//! - `strings`: dotted-key translation tables, one per language
//! - `store`: the session's active language and its change notifications
//! - `validator`: checks that both tables stay in sync
//!
//! # Example
//!
//! ```rust,ignore
//! use al_andalus_site::i18n::{Language, LocalizationStore};
//!
//! let store = LocalizationStore::default();
//! store.set_language_code("ar")?;
//! assert_eq!(store.language().t("popup.close"), "إغلاق");
//! ```

mod language;
mod registry;
mod store;
mod strings;
mod validator;

pub use language::Language;
pub use registry::{LanguageConfig, LanguageRegistry, TextDirection};
pub use store::LocalizationStore;
pub use strings::{TranslationTable, ARABIC_STRINGS, ENGLISH_STRINGS};
pub use validator::{TranslationValidator, ValidationReport};
