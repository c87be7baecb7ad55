//! Crawler-facing listings: robots policy and sitemap.

use crate::i18n::LanguageRegistry;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFrequency {
    Weekly,
    Monthly,
}

impl ChangeFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SitemapPage {
    pub path: &'static str,
    pub change_frequency: ChangeFrequency,
    pub priority: f32,
}

/// Public pages, in sitemap order.
pub const PAGES: [SitemapPage; 5] = [
    SitemapPage {
        path: "",
        change_frequency: ChangeFrequency::Weekly,
        priority: 1.0,
    },
    SitemapPage {
        path: "/about",
        change_frequency: ChangeFrequency::Monthly,
        priority: 0.8,
    },
    SitemapPage {
        path: "/services",
        change_frequency: ChangeFrequency::Weekly,
        priority: 0.9,
    },
    SitemapPage {
        path: "/gallery",
        change_frequency: ChangeFrequency::Monthly,
        priority: 0.7,
    },
    SitemapPage {
        path: "/contact",
        change_frequency: ChangeFrequency::Monthly,
        priority: 0.8,
    },
];

/// Paths crawlers are asked to skip.
const DISALLOWED: [&str; 2] = ["/api/", "/admin/"];

pub fn robots_txt(base_url: &str) -> String {
    let mut out = String::from("User-agent: *\nAllow: /\n");
    for path in DISALLOWED {
        out.push_str(&format!("Disallow: {}\n", path));
    }
    out.push_str(&format!("\nSitemap: {}/sitemap.xml\n", base_url));
    out
}

/// Both languages are served from the same URL, so every alternate points
/// back at the page itself.
pub fn sitemap_xml(base_url: &str, last_modified: DateTime<Utc>) -> String {
    let lastmod = last_modified.format("%Y-%m-%d").to_string();
    let languages = LanguageRegistry::get().list_enabled();

    let mut out = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\" xmlns:xhtml=\"http://www.w3.org/1999/xhtml\">\n",
    );

    for page in PAGES {
        let url = format!("{}{}", base_url, page.path);
        out.push_str("<url>\n");
        out.push_str(&format!("<loc>{}</loc>\n", url));
        for lang in &languages {
            out.push_str(&format!(
                "<xhtml:link rel=\"alternate\" hreflang=\"{}\" href=\"{}\" />\n",
                lang.code, url
            ));
        }
        out.push_str(&format!("<lastmod>{}</lastmod>\n", lastmod));
        out.push_str(&format!(
            "<changefreq>{}</changefreq>\n",
            page.change_frequency.as_str()
        ));
        out.push_str(&format!("<priority>{:.1}</priority>\n", page.priority));
        out.push_str("</url>\n");
    }

    out.push_str("</urlset>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const BASE: &str = "https://al-andalus-pestcontrol.com";

    #[test]
    fn test_robots_txt() {
        let robots = robots_txt(BASE);
        assert!(robots.starts_with("User-agent: *\nAllow: /\n"));
        assert!(robots.contains("Disallow: /api/\n"));
        assert!(robots.contains("Disallow: /admin/\n"));
        assert!(robots.ends_with("Sitemap: https://al-andalus-pestcontrol.com/sitemap.xml\n"));
    }

    #[test]
    fn test_sitemap_lists_five_pages() {
        let date = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();
        let xml = sitemap_xml(BASE, date);

        assert_eq!(xml.matches("<url>").count(), 5);
        assert!(xml.contains("<loc>https://al-andalus-pestcontrol.com</loc>"));
        assert!(xml.contains("<loc>https://al-andalus-pestcontrol.com/gallery</loc>"));
        assert_eq!(xml.matches("<lastmod>2026-10-19</lastmod>").count(), 5);
    }

    #[test]
    fn test_sitemap_priorities_and_alternates() {
        let xml = sitemap_xml(BASE, Utc::now());

        assert!(xml.contains("<priority>1.0</priority>"));
        assert!(xml.contains("<priority>0.9</priority>"));
        assert!(xml.contains("<priority>0.7</priority>"));
        assert_eq!(xml.matches("<changefreq>weekly</changefreq>").count(), 2);
        assert!(xml.contains(
            "hreflang=\"ar\" href=\"https://al-andalus-pestcontrol.com/services\""
        ));
        assert_eq!(xml.matches("<xhtml:link").count(), 10);
    }
}
