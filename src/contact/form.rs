use crate::i18n::Language;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use thiserror::Error;

/// The four contact form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Name,
    Phone,
    Email,
    Message,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Name,
        FormField::Phone,
        FormField::Email,
        FormField::Message,
    ];

    /// Form control name, matching the JSON field.
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Phone => "phone",
            FormField::Email => "email",
            FormField::Message => "message",
        }
    }

    pub fn placeholder_key(&self) -> &'static str {
        match self {
            FormField::Name => "contact.form.name_placeholder",
            FormField::Phone => "contact.form.phone_placeholder",
            FormField::Email => "contact.form.email_placeholder",
            FormField::Message => "contact.form.message_placeholder",
        }
    }

    /// Translation key of the field's label.
    pub fn label_key(&self) -> &'static str {
        match self {
            FormField::Name => "contact.form.name",
            FormField::Phone => "contact.form.phone",
            FormField::Email => "contact.form.email",
            FormField::Message => "contact.form.message",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0:?} is required")]
    Missing(FormField),

    #[error("email address is not valid")]
    InvalidEmail,
}

impl ValidationError {
    pub fn field(&self) -> FormField {
        match self {
            ValidationError::Missing(field) => *field,
            ValidationError::InvalidEmail => FormField::Email,
        }
    }

    /// User-facing message in `language`.
    pub fn localized(&self, language: Language) -> String {
        match self {
            ValidationError::Missing(field) => language
                .t("contact.form.required")
                .replace("{field}", language.t(field.label_key())),
            ValidationError::InvalidEmail => language.t("contact.form.invalid_email").to_string(),
        }
    }
}

/// Contact form contents. Every field is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

impl ContactForm {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Phone => &self.phone,
            FormField::Email => &self.email,
            FormField::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Name => self.name = value,
            FormField::Phone => self.phone = value,
            FormField::Email => self.email = value,
            FormField::Message => self.message = value,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        FormField::ALL.iter().all(|f| self.get(*f).is_empty())
    }

    /// Required-field and email-syntax checks, first failure wins.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for field in FormField::ALL {
            if self.get(field).trim().is_empty() {
                return Err(ValidationError::Missing(field));
            }
        }
        if !is_valid_email(self.email.trim()) {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(())
    }

    /// Map onto the email template's variables.
    pub fn to_template_params(&self) -> TemplateParams {
        TemplateParams {
            from_name: self.name.clone(),
            from_email: self.email.trim().to_string(),
            from_phone: self.phone.clone(),
            message: self.message.clone(),
        }
    }
}

/// Variables the email template expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateParams {
    pub from_name: String,
    pub from_email: String,
    pub from_phone: String,
    pub message: String,
}

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

/// The HTML `input type="email"` syntax check.
pub fn is_valid_email(email: &str) -> bool {
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(
            r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
        )
        .expect("email regex is valid")
    });
    regex.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn filled() -> ContactForm {
        ContactForm {
            name: "Ali".to_string(),
            phone: "0501234567".to_string(),
            email: "a@b.com".to_string(),
            message: "hello".to_string(),
        }
    }

    #[test]
    fn test_validate_accepts_complete_form() {
        assert_eq!(filled().validate(), Ok(()));
    }

    #[test]
    fn test_validate_reports_first_missing_field() {
        let mut form = filled();
        form.phone = "   ".to_string();
        form.message.clear();
        assert_eq!(form.validate(), Err(ValidationError::Missing(FormField::Phone)));
    }

    #[test]
    fn test_validate_rejects_bad_email() {
        let mut form = filled();
        form.email = "not-an-email".to_string();
        assert_eq!(form.validate(), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn test_set_get_clear() {
        let mut form = ContactForm::default();
        assert!(form.is_empty());
        form.set(FormField::Message, "hi");
        assert_eq!(form.get(FormField::Message), "hi");
        form.clear();
        assert!(form.is_empty());
    }

    #[test]
    fn test_template_params_mapping() {
        let params = filled().to_template_params();
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["from_name"], "Ali");
        assert_eq!(json["from_email"], "a@b.com");
        assert_eq!(json["from_phone"], "0501234567");
        assert_eq!(json["message"], "hello");
    }

    #[test]
    fn test_template_params_trim_email() {
        let mut form = filled();
        form.email = "  a@b.com\n".to_string();
        assert_eq!(form.validate(), Ok(()));
        assert_eq!(form.to_template_params().from_email, "a@b.com");
    }

    #[test]
    fn test_localized_missing_message() {
        let err = ValidationError::Missing(FormField::Name);
        assert_eq!(err.localized(Language::ENGLISH), "Name is required.");
        assert_eq!(err.localized(Language::ARABIC), "حقل الاسم مطلوب.");
    }

    #[test]
    fn test_deserialize_missing_fields_default_to_empty() {
        let form: ContactForm = serde_json::from_str(r#"{"name":"Ali"}"#).unwrap();
        assert_eq!(form.name, "Ali");
        assert!(form.email.is_empty());
        assert_eq!(form.validate(), Err(ValidationError::Missing(FormField::Phone)));
    }

    #[test]
    fn test_email_examples() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last+tag@sub.example.ae"));
        assert!(is_valid_email("user@localhost"));
        assert!(!is_valid_email("a@"));
        assert!(!is_valid_email("@b.com"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("a@-b.com"));
    }

    proptest! {
        #[test]
        fn prop_email_without_at_is_invalid(s in "[^@]*") {
            prop_assert!(!is_valid_email(&s));
        }

        #[test]
        fn prop_simple_addresses_are_valid(
            local in "[a-z0-9]{1,20}",
            domain in "[a-z0-9]{1,20}",
            tld in "[a-z]{2,6}",
        ) {
            let email = format!("{}@{}.{}", local, domain, tld);
            prop_assert!(is_valid_email(&email));
        }
    }
}
