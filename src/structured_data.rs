//! JSON-LD structured data for search engines.
//!
//! Generation is a pure function of the language (`build_documents`);
//! publishing into a page head is a separate step behind the `DocumentHead`
//! trait so the same documents can go into a server-rendered page or an
//! in-memory head in tests.

use crate::i18n::{Language, LanguageRegistry};
use serde::Serialize;
use serde_json::{json, Value};
use tokio::sync::watch;
use tracing::debug;

pub const JSON_LD_MIME: &str = "application/ld+json";

pub const LOCAL_BUSINESS_ID: &str = "local-business-schema";
pub const ORGANIZATION_ID: &str = "organization-schema";
pub const SERVICE_ID: &str = "service-schema";

/// Cities listed in `areaServed`. Proper names, identical in both languages.
const AREA_SERVED: [&str; 8] = [
    "Dubai",
    "Abu Dhabi",
    "Sharjah",
    "Ajman",
    "Ras Al Khaimah",
    "Fujairah",
    "Umm Al Quwain",
    "Al Ain",
];

const SERVICE_TYPES_EN: [&str; 6] = [
    "Cockroach Control",
    "Rodent Control",
    "Termite Control",
    "General Pest Control",
    "Ant Control",
    "Mosquito Control",
];

const SERVICE_TYPES_AR: [&str; 6] = [
    "مكافحة الصراصير",
    "مكافحة القوارض",
    "مكافحة النمل الأبيض",
    "مكافحة الحشرات العامة",
    "مكافحة النمل",
    "مكافحة البعوض",
];

/// Language-invariant facts about the business.
#[derive(Debug, Clone)]
pub struct BusinessProfile {
    pub base_url: String,
    pub telephone: &'static str,
    pub display_telephone: &'static str,
    pub price_range: &'static str,
    pub street_address: &'static str,
    pub locality: &'static str,
    pub country: &'static str,
    pub latitude: &'static str,
    pub longitude: &'static str,
}

impl BusinessProfile {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Build the three JSON-LD documents for `language`.
    ///
    /// Always returns exactly three documents, in the order LocalBusiness,
    /// Organization, Service.
    pub fn build_documents(&self, language: Language) -> Vec<StructuredDataDocument> {
        vec![
            StructuredDataDocument {
                id: LOCAL_BUSINESS_ID,
                payload: self.local_business(language),
            },
            StructuredDataDocument {
                id: ORGANIZATION_ID,
                payload: self.organization(language),
            },
            StructuredDataDocument {
                id: SERVICE_ID,
                payload: self.service(language),
            },
        ]
    }

    fn local_business(&self, language: Language) -> Value {
        let copy = LocalizedCopy::for_language(language);
        let area_served: Vec<Value> = AREA_SERVED
            .iter()
            .map(|city| json!({ "@type": "City", "name": city }))
            .collect();

        json!({
            "@context": "https://schema.org",
            "@type": "LocalBusiness",
            "@id": self.base_url,
            "name": copy.name,
            "alternateName": copy.alternate_name,
            "description": copy.business_description,
            "url": self.base_url,
            "telephone": self.telephone,
            "priceRange": self.price_range,
            "address": {
                "@type": "PostalAddress",
                "streetAddress": self.street_address,
                "addressLocality": self.locality,
                "addressRegion": self.locality,
                "addressCountry": self.country,
            },
            "geo": {
                "@type": "GeoCoordinates",
                "latitude": self.latitude,
                "longitude": self.longitude,
            },
            "areaServed": area_served,
            "serviceType": copy.service_types,
            "inLanguage": [language.code(), language.counterpart().code()],
        })
    }

    fn organization(&self, language: Language) -> Value {
        let copy = LocalizedCopy::for_language(language);
        let available: Vec<&str> = LanguageRegistry::get()
            .list_enabled()
            .iter()
            .map(|lang| lang.code)
            .collect();

        json!({
            "@context": "https://schema.org",
            "@type": "Organization",
            "name": copy.name,
            "alternateName": copy.alternate_name,
            "url": self.base_url,
            "logo": format!("{}/logo.png", self.base_url),
            "contactPoint": {
                "@type": "ContactPoint",
                "telephone": self.display_telephone,
                "contactType": "customer service",
                "areaServed": self.country,
                "availableLanguage": available,
            },
            "sameAs": [],
        })
    }

    fn service(&self, language: Language) -> Value {
        let copy = LocalizedCopy::for_language(language);

        json!({
            "@context": "https://schema.org",
            "@type": "Service",
            "serviceType": copy.service_name,
            "provider": {
                "@type": "LocalBusiness",
                "name": copy.name,
            },
            "areaServed": {
                "@type": "Country",
                "name": "United Arab Emirates",
            },
            "description": copy.service_description,
        })
    }
}

impl Default for BusinessProfile {
    fn default() -> Self {
        Self {
            base_url: "https://al-andalus-pestcontrol.com".to_string(),
            telephone: "+971502765910",
            display_telephone: "+971-50-276-5910",
            price_range: "150-300 AED",
            street_address: "AL RASHIDIYA 3 STREET AL AQSA",
            locality: "Ajman",
            country: "AE",
            latitude: "25.4052",
            longitude: "55.5136",
        }
    }
}

/// Schema text that differs by language.
struct LocalizedCopy {
    name: &'static str,
    alternate_name: &'static str,
    business_description: &'static str,
    service_types: &'static [&'static str],
    service_name: &'static str,
    service_description: &'static str,
}

impl LocalizedCopy {
    fn for_language(language: Language) -> Self {
        let name = language.t("site.name");
        let alternate_name = language.counterpart().t("site.name");

        if language == Language::ARABIC {
            Self {
                name,
                alternate_name,
                business_description: "خدمات مكافحة حشرات احترافية في الإمارات. حلول فعالة وآمنة للصراصير والقوارض والنمل الأبيض والمزيد في دبي وأبوظبي والشارقة وعجمان وأم القيوين والعين.",
                service_types: &SERVICE_TYPES_AR,
                service_name: "خدمات مكافحة الحشرات",
                service_description: "خدمات مكافحة حشرات شاملة وآمنة في جميع أنحاء الإمارات العربية المتحدة",
            }
        } else {
            Self {
                name,
                alternate_name,
                business_description: "Professional pest control services in UAE. Effective solutions for cockroaches, rodents, termites, and more in Dubai, Abu Dhabi, Sharjah, Ajman, Umm Al Quwain, and Al Ain.",
                service_types: &SERVICE_TYPES_EN,
                service_name: "Pest Control Services",
                service_description: "Comprehensive and safe pest control services throughout the United Arab Emirates",
            }
        }
    }
}

/// One JSON-LD document, identified by a stable element id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructuredDataDocument {
    pub id: &'static str,
    pub payload: Value,
}

impl StructuredDataDocument {
    pub fn to_script(&self) -> ScriptElement {
        ScriptElement {
            id: Some(self.id.to_string()),
            mime_type: JSON_LD_MIME.to_string(),
            text: self.payload.to_string(),
        }
    }
}

/// Build the three documents with the default business profile.
pub fn build_documents(language: Language) -> Vec<StructuredDataDocument> {
    BusinessProfile::default().build_documents(language)
}

/// A `<script>` element in a document head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptElement {
    pub id: Option<String>,
    pub mime_type: String,
    pub text: String,
}

impl ScriptElement {
    /// Render as HTML. `</` is escaped so the payload cannot close the tag.
    pub fn to_html(&self) -> String {
        let id_attr = self
            .id
            .as_ref()
            .map(|id| format!(" id=\"{}\"", id))
            .unwrap_or_default();
        format!(
            "<script type=\"{}\"{}>{}</script>",
            self.mime_type,
            id_attr,
            self.text.replace("</", "<\\/")
        )
    }
}

/// The part of a page head the publisher writes into.
pub trait DocumentHead {
    /// Remove every script of the given MIME type, returning how many went.
    fn remove_scripts_of_type(&mut self, mime_type: &str) -> usize;

    fn append_script(&mut self, script: ScriptElement);

    fn scripts(&self) -> &[ScriptElement];
}

/// In-memory document head.
#[derive(Debug, Clone, Default)]
pub struct HeadElements {
    scripts: Vec<ScriptElement>,
}

impl HeadElements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to_html(&self) -> String {
        self.scripts
            .iter()
            .map(ScriptElement::to_html)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl DocumentHead for HeadElements {
    fn remove_scripts_of_type(&mut self, mime_type: &str) -> usize {
        let before = self.scripts.len();
        self.scripts.retain(|s| s.mime_type != mime_type);
        before - self.scripts.len()
    }

    fn append_script(&mut self, script: ScriptElement) {
        self.scripts.push(script);
    }

    fn scripts(&self) -> &[ScriptElement] {
        &self.scripts
    }
}

/// Keeps exactly one copy of each document in a head, matching the language.
#[derive(Debug, Clone, Default)]
pub struct StructuredDataPublisher {
    profile: BusinessProfile,
}

impl StructuredDataPublisher {
    pub fn new(profile: BusinessProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &BusinessProfile {
        &self.profile
    }

    /// Replace all JSON-LD in `head` with fresh documents for `language`.
    ///
    /// Every `application/ld+json` script goes, including ones this publisher
    /// did not insert.
    pub fn publish<H: DocumentHead + ?Sized>(&self, head: &mut H, language: Language) {
        let removed = head.remove_scripts_of_type(JSON_LD_MIME);
        for document in self.profile.build_documents(language) {
            head.append_script(document.to_script());
        }
        debug!(
            "Published structured data for '{}' (replaced {} scripts)",
            language, removed
        );
    }

    /// Publish for the current language, then again after every change.
    ///
    /// Returns once the store side of the channel is dropped.
    pub async fn follow<H: DocumentHead + ?Sized>(
        &self,
        mut languages: watch::Receiver<Language>,
        head: &mut H,
    ) {
        loop {
            let language = *languages.borrow_and_update();
            self.publish(head, language);
            if languages.changed().await.is_err() {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::LocalizationStore;

    fn json_ld_count(head: &HeadElements) -> usize {
        head.scripts()
            .iter()
            .filter(|s| s.mime_type == JSON_LD_MIME)
            .count()
    }

    // ==================== Generation Tests ====================

    #[test]
    fn test_build_documents_returns_three_in_order() {
        for language in [Language::ENGLISH, Language::ARABIC] {
            let docs = build_documents(language);
            let ids: Vec<_> = docs.iter().map(|d| d.id).collect();
            assert_eq!(ids, vec![LOCAL_BUSINESS_ID, ORGANIZATION_ID, SERVICE_ID]);
        }
    }

    #[test]
    fn test_local_business_english() {
        let doc = &build_documents(Language::ENGLISH)[0].payload;
        assert_eq!(doc["@type"], "LocalBusiness");
        assert_eq!(doc["name"], "Al Andalus Pest Control");
        assert_eq!(doc["alternateName"], "شركة الاندلس لمكافحة حشرات");
        assert_eq!(doc["serviceType"][0], "Cockroach Control");
        assert_eq!(doc["inLanguage"], json!(["en", "ar"]));
    }

    #[test]
    fn test_local_business_arabic() {
        let doc = &build_documents(Language::ARABIC)[0].payload;
        assert_eq!(doc["name"], "شركة الاندلس لمكافحة حشرات");
        assert_eq!(doc["alternateName"], "Al Andalus Pest Control");
        assert_eq!(doc["serviceType"][0], "مكافحة الصراصير");
        assert_eq!(doc["inLanguage"], json!(["ar", "en"]));
    }

    #[test]
    fn test_static_fields_do_not_vary_by_language() {
        let en = &build_documents(Language::ENGLISH)[0].payload;
        let ar = &build_documents(Language::ARABIC)[0].payload;

        for field in ["url", "telephone", "priceRange", "address", "geo", "areaServed"] {
            assert_eq!(en[field], ar[field], "field '{}' should be static", field);
        }
        assert_eq!(en["areaServed"].as_array().unwrap().len(), 8);
        assert_eq!(en["geo"]["latitude"], "25.4052");
    }

    #[test]
    fn test_organization_contact_point() {
        let doc = &build_documents(Language::ARABIC)[1].payload;
        assert_eq!(doc["logo"], "https://al-andalus-pestcontrol.com/logo.png");
        assert_eq!(doc["contactPoint"]["telephone"], "+971-50-276-5910");
        assert_eq!(doc["contactPoint"]["availableLanguage"], json!(["en", "ar"]));
    }

    #[test]
    fn test_service_is_localized() {
        let en = &build_documents(Language::ENGLISH)[2].payload;
        let ar = &build_documents(Language::ARABIC)[2].payload;
        assert_eq!(en["serviceType"], "Pest Control Services");
        assert_eq!(ar["serviceType"], "خدمات مكافحة الحشرات");
        assert_eq!(ar["provider"]["name"], "شركة الاندلس لمكافحة حشرات");
    }

    #[test]
    fn test_custom_base_url() {
        let profile = BusinessProfile::with_base_url("https://staging.example");
        let docs = profile.build_documents(Language::ENGLISH);
        assert_eq!(docs[0].payload["@id"], "https://staging.example");
        assert_eq!(docs[1].payload["logo"], "https://staging.example/logo.png");
    }

    // ==================== Publishing Tests ====================

    #[test]
    fn test_publish_inserts_exactly_three() {
        let publisher = StructuredDataPublisher::default();
        for language in [Language::ENGLISH, Language::ARABIC] {
            let mut head = HeadElements::new();
            publisher.publish(&mut head, language);
            assert_eq!(json_ld_count(&head), 3);
        }
    }

    #[test]
    fn test_republish_with_other_language_leaves_three() {
        let publisher = StructuredDataPublisher::default();
        let mut head = HeadElements::new();

        publisher.publish(&mut head, Language::ENGLISH);
        publisher.publish(&mut head, Language::ARABIC);
        publisher.publish(&mut head, Language::ARABIC);

        assert_eq!(json_ld_count(&head), 3);
        assert!(head.scripts()[0].text.contains("شركة الاندلس"));
    }

    #[test]
    fn test_publish_removes_foreign_json_ld_but_keeps_other_scripts() {
        let publisher = StructuredDataPublisher::default();
        let mut head = HeadElements::new();
        head.append_script(ScriptElement {
            id: Some("third-party".to_string()),
            mime_type: JSON_LD_MIME.to_string(),
            text: "{}".to_string(),
        });
        head.append_script(ScriptElement {
            id: None,
            mime_type: "text/javascript".to_string(),
            text: "console.log(1)".to_string(),
        });

        publisher.publish(&mut head, Language::ENGLISH);

        assert_eq!(head.scripts().len(), 4);
        assert_eq!(json_ld_count(&head), 3);
        assert!(head
            .scripts()
            .iter()
            .all(|s| s.id.as_deref() != Some("third-party")));
    }

    #[test]
    fn test_script_to_html_escapes_closing_tag() {
        let script = ScriptElement {
            id: Some("x".to_string()),
            mime_type: JSON_LD_MIME.to_string(),
            text: r#"{"a":"</script>"}"#.to_string(),
        };
        let html = script.to_html();
        assert!(html.starts_with(r#"<script type="application/ld+json" id="x">"#));
        assert_eq!(html.matches("</script>").count(), 1);
    }

    #[tokio::test]
    async fn test_follow_republishes_on_language_change() {
        let store = LocalizationStore::default();
        let rx = store.subscribe();

        let handle = tokio::spawn(async move {
            let mut head = HeadElements::new();
            StructuredDataPublisher::default().follow(rx, &mut head).await;
            head
        });

        tokio::task::yield_now().await;
        store.set_language(Language::ARABIC);
        tokio::task::yield_now().await;
        drop(store);

        let head = handle.await.unwrap();
        assert_eq!(json_ld_count(&head), 3);
        assert_eq!(
            serde_json::from_str::<Value>(&head.scripts()[0].text).unwrap()["name"],
            "شركة الاندلس لمكافحة حشرات"
        );
    }
}
