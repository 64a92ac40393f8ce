//! SEO field extraction from HTML documents.
//!
//! Parsing never fails: malformed markup is repaired by the HTML5 parser and
//! missing elements come back as `None`, `false` or empty collections.

pub mod extract;
pub mod types;

use scraper::Html;
use url::Url;

pub use types::{
    Headings, HreflangLink, ImageSummary, LinkSummary, MetaTags, MobileFriendliness,
    PageAnalysis, TechnicalSeo,
};

/// Analyze a page. `page_url` is used to resolve and classify relative links.
pub fn analyze_html(html: &str, page_url: &Url) -> PageAnalysis {
    let document = Html::parse_document(html);
    PageAnalysis {
        meta: extract::extract_meta_tags(&document),
        headings: extract::extract_headings(&document),
        images: extract::extract_images(&document),
        links: extract::extract_links(&document, page_url),
        mobile: extract::extract_mobile(&document),
        technical: extract::extract_technical(&document),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_url() -> Url {
        Url::parse("https://example.com/blog/post").unwrap()
    }

    const FULL_PAGE: &str = r##"
        <!DOCTYPE html>
        <html lang="en">
        <head>
            <title>  Rust SEO
                Guide </title>
            <meta name="Description" content=" Learn SEO with Rust. ">
            <meta name="viewport" content="width=device-width, initial-scale=1">
            <meta name="HandheldFriendly" content="true">
            <meta name="robots" content="NOINDEX, follow">
            <link rel="canonical" href="https://example.com/blog/post">
            <link rel="alternate" hreflang="de" href="https://example.com/de/blog/post">
            <link rel="alternate" hreflang="x-default" href="https://example.com/blog/post">
            <link rel="alternate" type="application/rss+xml" href="/feed.xml">
        </head>
        <body>
            <h1>Main <em>Title</em></h1>
            <h1>Second   Title</h1>
            <h2>Intro</h2>
            <h3>Details</h3>
            <img src="/a.png" alt="A diagram">
            <img src="/b.png" alt="">
            <img src="/c.png">
            <a href="/about">About</a>
            <a href="contact">Contact</a>
            <a href="https://other.org/page">Other</a>
            <a href="#top">Top</a>
            <a href="mailto:team@example.com">Mail</a>
        </body>
        </html>
    "##;

    #[test]
    fn test_meta_tags() {
        let analysis = analyze_html(FULL_PAGE, &page_url());
        assert_eq!(analysis.meta.title.as_deref(), Some("Rust SEO Guide"));
        assert_eq!(
            analysis.meta.description.as_deref(),
            Some("Learn SEO with Rust.")
        );
    }

    #[test]
    fn test_two_h1_headings() {
        let analysis = analyze_html(FULL_PAGE, &page_url());
        assert_eq!(analysis.headings.h1, vec!["Main Title", "Second Title"]);
        assert_eq!(analysis.headings.h2, vec!["Intro"]);
        assert_eq!(analysis.headings.h3, vec!["Details"]);
    }

    #[test]
    fn test_images() {
        let analysis = analyze_html(FULL_PAGE, &page_url());
        assert_eq!(analysis.images.count, 3);
        assert_eq!(analysis.images.missing_alt, 2);
        assert_eq!(analysis.images.sources, vec!["/a.png", "/b.png", "/c.png"]);
    }

    #[test]
    fn test_links_are_classified() {
        let analysis = analyze_html(FULL_PAGE, &page_url());
        assert_eq!(
            analysis.links.internal,
            vec![
                "https://example.com/about",
                "https://example.com/blog/contact"
            ]
        );
        assert_eq!(analysis.links.external, vec!["https://other.org/page"]);
    }

    #[test]
    fn test_technical_and_mobile() {
        let analysis = analyze_html(FULL_PAGE, &page_url());
        assert!(analysis.mobile.viewport);
        assert!(analysis.mobile.mobile_meta);
        assert!(analysis.technical.noindex);
        assert_eq!(
            analysis.technical.canonical.as_deref(),
            Some("https://example.com/blog/post")
        );
        let langs: Vec<&str> = analysis
            .technical
            .hreflang
            .iter()
            .map(|link| link.lang.as_str())
            .collect();
        assert_eq!(langs, vec!["de", "x-default"]);
        assert_eq!(
            analysis.technical.hreflang[0].href.as_deref(),
            Some("https://example.com/de/blog/post")
        );
    }

    #[test]
    fn test_missing_elements_are_empty() {
        let html = "<html><head></head><body><p>Hello</p></body></html>";
        let analysis = analyze_html(html, &page_url());
        assert_eq!(analysis.meta.title, None);
        assert_eq!(analysis.meta.description, None);
        assert!(analysis.headings.h1.is_empty());
        assert_eq!(analysis.images.count, 0);
        assert!(!analysis.mobile.viewport);
        assert!(!analysis.technical.noindex);
        assert_eq!(analysis.technical.canonical, None);
        assert!(analysis.technical.hreflang.is_empty());
    }

    #[test]
    fn test_malformed_html_degrades_gracefully() {
        let html = "<html><head><title>Broken<body><h1>Unclosed <h1>Nested</div></span><img src=x";
        let analysis = analyze_html(html, &page_url());
        assert!(analysis.meta.title.is_some());
        assert_eq!(analysis.technical, TechnicalSeo::default());
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(analyze_html("", &page_url()), PageAnalysis::default());
    }
}
