/// A read-only table of localized strings keyed by dotted path
/// (e.g. `contact.form.send`).
///
/// One table exists per language. Both tables must carry the same key set;
/// `TranslationValidator` checks that.
#[derive(Debug)]
pub struct TranslationTable {
    entries: &'static [(&'static str, &'static str)],
}

impl TranslationTable {
    pub const fn new(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { entries }
    }

    /// Look up a dotted key.
    pub fn get(&self, key: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, value)| *value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ==================== English Strings ====================

/// English language strings (canonical)
pub static ENGLISH_STRINGS: TranslationTable = TranslationTable::new(&[
    // Site
    ("site.name", "Al Andalus Pest Control"),
    ("site.title", "Al Andalus Pest Control | Pest Control Services in UAE"),
    (
        "site.description",
        "Professional pest control services in UAE. Effective solutions for cockroaches, rodents, termites, and more.",
    ),
    // Navigation
    ("nav.home", "Home"),
    ("nav.about", "About"),
    ("nav.services", "Services"),
    ("nav.gallery", "Gallery"),
    ("nav.contact", "Contact"),
    ("nav.language", "العربية"),
    // Welcome popup
    ("popup.title", "Welcome!"),
    (
        "popup.message",
        "Welcome to Al Andalus Pest Control! We're here to help you maintain a pest-free environment.",
    ),
    ("popup.close", "Close"),
    // Contact page
    ("contact.title", "Contact Us"),
    ("contact.subtitle", "Get in touch with us for all your pest control needs"),
    ("contact.info", "Contact Information"),
    ("contact.phone", "Phone"),
    ("contact.location", "Location"),
    ("contact.address", "AL RASHIDIYA 3 STREET AL AQSA, Ajman, UAE"),
    ("contact.social", "Follow Us"),
    // Contact form
    ("contact.form.title", "Send us a Message"),
    ("contact.form.name", "Name"),
    ("contact.form.name_placeholder", "Your Name"),
    ("contact.form.phone", "Phone"),
    ("contact.form.phone_placeholder", "Your Phone"),
    ("contact.form.email", "Email"),
    ("contact.form.email_placeholder", "Your Email"),
    ("contact.form.message", "Message"),
    ("contact.form.message_placeholder", "Your Message"),
    ("contact.form.send", "Send Message"),
    ("contact.form.sending", "Sending..."),
    ("contact.form.success", "Message sent successfully! We'll get back to you soon."),
    ("contact.form.error", "Failed to send message."),
    ("contact.form.error_fallback", "Please try again later."),
    ("contact.form.required", "{field} is required."),
    ("contact.form.invalid_email", "Please enter a valid email address."),
    // Fixed contact buttons
    ("buttons.call", "Call Us"),
    ("buttons.whatsapp", "WhatsApp"),
]);

// ==================== Arabic Strings ====================

/// Arabic language strings
pub static ARABIC_STRINGS: TranslationTable = TranslationTable::new(&[
    // Site
    ("site.name", "شركة الاندلس لمكافحة حشرات"),
    ("site.title", "شركة الاندلس لمكافحة حشرات | خدمات مكافحة الحشرات في الإمارات"),
    (
        "site.description",
        "خدمات مكافحة حشرات احترافية في الإمارات. حلول فعالة وآمنة للصراصير والقوارض والنمل الأبيض والمزيد.",
    ),
    // Navigation
    ("nav.home", "الرئيسية"),
    ("nav.about", "من نحن"),
    ("nav.services", "خدماتنا"),
    ("nav.gallery", "معرض الصور"),
    ("nav.contact", "اتصل بنا"),
    ("nav.language", "English"),
    // Welcome popup
    ("popup.title", "مرحباً!"),
    (
        "popup.message",
        "مرحباً بك في شركة الأندلس لمكافحة حشرات! نحن هنا لمساعدتك في الحفاظ على بيئة خالية من الآفات.",
    ),
    ("popup.close", "إغلاق"),
    // Contact page
    ("contact.title", "اتصل بنا"),
    ("contact.subtitle", "تواصل معنا لجميع احتياجاتك في مكافحة حشرات"),
    ("contact.info", "معلومات الاتصال"),
    ("contact.phone", "الهاتف"),
    ("contact.location", "الموقع"),
    ("contact.address", "الراشدية 3 شارع الأقصى، عجمان، الإمارات"),
    ("contact.social", "تابعنا"),
    // Contact form
    ("contact.form.title", "أرسل لنا رسالة"),
    ("contact.form.name", "الاسم"),
    ("contact.form.name_placeholder", "اسمك"),
    ("contact.form.phone", "الهاتف"),
    ("contact.form.phone_placeholder", "هاتفك"),
    ("contact.form.email", "البريد الإلكتروني"),
    ("contact.form.email_placeholder", "بريدك الإلكتروني"),
    ("contact.form.message", "الرسالة"),
    ("contact.form.message_placeholder", "رسالتك"),
    ("contact.form.send", "إرسال الرسالة"),
    ("contact.form.sending", "جاري الإرسال..."),
    ("contact.form.success", "تم إرسال الرسالة بنجاح! سنتواصل معك قريباً."),
    ("contact.form.error", "فشل إرسال الرسالة."),
    ("contact.form.error_fallback", "يرجى المحاولة مرة أخرى لاحقاً."),
    ("contact.form.required", "حقل {field} مطلوب."),
    ("contact.form.invalid_email", "يرجى إدخال بريد إلكتروني صالح."),
    // Fixed contact buttons
    ("buttons.call", "اتصل بنا"),
    ("buttons.whatsapp", "واتساب"),
]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_existing_key() {
        assert_eq!(ENGLISH_STRINGS.get("nav.home"), Some("Home"));
        assert_eq!(ARABIC_STRINGS.get("nav.home"), Some("الرئيسية"));
    }

    #[test]
    fn test_get_missing_key() {
        assert_eq!(ENGLISH_STRINGS.get("nav"), None);
        assert_eq!(ENGLISH_STRINGS.get(""), None);
    }

    #[test]
    fn test_tables_have_same_length() {
        assert_eq!(ENGLISH_STRINGS.len(), ARABIC_STRINGS.len());
        assert!(!ENGLISH_STRINGS.is_empty());
    }

    #[test]
    fn test_keys_are_unique() {
        let mut keys: Vec<_> = ENGLISH_STRINGS.keys().collect();
        let total = keys.len();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), total);
    }

    #[test]
    fn test_required_placeholder_present() {
        assert!(ENGLISH_STRINGS
            .get("contact.form.required")
            .unwrap()
            .contains("{field}"));
        assert!(ARABIC_STRINGS
            .get("contact.form.required")
            .unwrap()
            .contains("{field}"));
    }

    #[test]
    fn test_success_messages_match_site_copy() {
        assert!(ENGLISH_STRINGS
            .get("contact.form.success")
            .unwrap()
            .starts_with("Message sent successfully"));
        assert!(ARABIC_STRINGS
            .get("contact.form.success")
            .unwrap()
            .starts_with("تم إرسال الرسالة بنجاح"));
    }
}
