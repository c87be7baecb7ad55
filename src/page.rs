//! Minimal server-rendered page shell: language attributes, hreflang
//! alternates, JSON-LD, navigation, the contact section and the fixed call /
//! WhatsApp buttons.

use crate::contact::FormField;
use crate::i18n::{Language, LanguageRegistry};
use crate::structured_data::{BusinessProfile, HeadElements, StructuredDataPublisher};

const NAV_LINKS: [(&str, &str); 5] = [
    ("/", "nav.home"),
    ("/about", "nav.about"),
    ("/services", "nav.services"),
    ("/gallery", "nav.gallery"),
    ("/contact", "nav.contact"),
];

/// Escape text for HTML element content and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render_shell(publisher: &StructuredDataPublisher, language: Language) -> String {
    let profile = publisher.profile();
    let mut head = HeadElements::new();
    publisher.publish(&mut head, language);

    let alternates: String = LanguageRegistry::get()
        .list_enabled()
        .iter()
        .map(|lang| {
            format!(
                "<link rel=\"alternate\" hreflang=\"{}\" href=\"{}/?lang={}\" />\n",
                lang.code, profile.base_url, lang.code
            )
        })
        .collect();

    let whatsapp_number = profile.telephone.trim_start_matches('+');

    format!(
        "<!DOCTYPE html>\n\
<html lang=\"{lang}\" dir=\"{dir}\">\n\
<head>\n\
<meta charset=\"utf-8\" />\n\
<title>{title}</title>\n\
<meta name=\"description\" content=\"{description}\" />\n\
{alternates}\
<link rel=\"alternate\" hreflang=\"x-default\" href=\"{base}/\" />\n\
{json_ld}\n\
</head>\n\
<body>\n\
<nav>\n{nav}<a href=\"/?lang={other}\">{toggle}</a>\n</nav>\n\
{contact}\
<div class=\"fixed-contact\">\n\
<a href=\"tel:{tel}\">{call}</a>\n\
<a href=\"https://wa.me/{wa}\">{whatsapp}</a>\n\
</div>\n\
</body>\n\
</html>\n",
        lang = language.code(),
        dir = language.direction().as_str(),
        title = escape_html(language.t("site.title")),
        description = escape_html(language.t("site.description")),
        alternates = alternates,
        base = profile.base_url,
        json_ld = head.to_html(),
        nav = nav_html(language),
        contact = contact_section_html(profile, language),
        other = language.counterpart().code(),
        toggle = escape_html(language.t("nav.language")),
        tel = profile.telephone,
        call = escape_html(language.t("buttons.call")),
        wa = whatsapp_number,
        whatsapp = escape_html(language.t("buttons.whatsapp")),
    )
}

fn nav_html(language: Language) -> String {
    NAV_LINKS
        .iter()
        .map(|(path, key)| {
            format!(
                "<a href=\"{}?lang={}\">{}</a>\n",
                path,
                language.code(),
                escape_html(language.t(key))
            )
        })
        .collect()
}

/// Contact details plus the form markup. Submission goes to `/api/contact`.
fn contact_section_html(profile: &BusinessProfile, language: Language) -> String {
    let fields: String = FormField::ALL
        .iter()
        .map(|field| {
            let name = field.as_str();
            let label = escape_html(language.t(field.label_key()));
            let placeholder = escape_html(language.t(field.placeholder_key()));
            let input = match field {
                FormField::Message => format!(
                    "<textarea id=\"{name}\" name=\"{name}\" placeholder=\"{placeholder}\" required></textarea>"
                ),
                FormField::Email => format!(
                    "<input type=\"email\" id=\"{name}\" name=\"{name}\" placeholder=\"{placeholder}\" required />"
                ),
                FormField::Phone => format!(
                    "<input type=\"tel\" id=\"{name}\" name=\"{name}\" placeholder=\"{placeholder}\" required />"
                ),
                FormField::Name => format!(
                    "<input type=\"text\" id=\"{name}\" name=\"{name}\" placeholder=\"{placeholder}\" required />"
                ),
            };
            format!("<label for=\"{name}\">{label}</label>\n{input}\n")
        })
        .collect();

    format!(
        "<section id=\"contact\">\n\
<h1>{title}</h1>\n\
<p>{subtitle}</p>\n\
<h2>{info}</h2>\n\
<p>{phone_label}: <a href=\"tel:{tel}\">{display_tel}</a></p>\n\
<p>{location_label}: {address}</p>\n\
<p>{social}</p>\n\
<h2>{form_title}</h2>\n\
<form method=\"post\" action=\"/api/contact?lang={lang}\">\n\
{fields}\
<button type=\"submit\">{send}</button>\n\
</form>\n\
</section>\n",
        title = escape_html(language.t("contact.title")),
        subtitle = escape_html(language.t("contact.subtitle")),
        info = escape_html(language.t("contact.info")),
        phone_label = escape_html(language.t("contact.phone")),
        tel = profile.telephone,
        display_tel = profile.display_telephone,
        location_label = escape_html(language.t("contact.location")),
        address = escape_html(language.t("contact.address")),
        social = escape_html(language.t("contact.social")),
        form_title = escape_html(language.t("contact.form.title")),
        lang = language.code(),
        fields = fields,
        send = escape_html(language.t("contact.form.send")),
    )
}
