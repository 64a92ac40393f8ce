use scraper::{ElementRef, Html, Selector};
use url::Url;

use super::types::{
    Headings, HreflangLink, ImageSummary, LinkSummary, MetaTags, MobileFriendliness, TechnicalSeo,
};

const IGNORED_LINK_PREFIXES: [&str; 4] = ["#", "mailto:", "javascript:", "tel:"];
const MOBILE_META_NAMES: [&str; 2] = ["HandheldFriendly", "MobileOptimized"];
const ROBOTS_META_NAMES: [&str; 2] = ["robots", "googlebot"];

/// All elements matching `css`, in document order
fn select_all<'a>(document: &'a Html, css: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(css) {
        Ok(selector) => document.select(&selector).collect(),
        Err(_) => Vec::new(),
    }
}

/// Element text with whitespace runs collapsed to single spaces
pub fn normalized_text(element: ElementRef<'_>) -> String {
    let raw: String = element.text().collect();
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn attr<'a>(element: ElementRef<'a>, name: &str) -> Option<&'a str> {
    element.value().attr(name)
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// `<meta>` elements whose `name` matches one of `names`, ignoring ASCII case
fn meta_named<'a>(document: &'a Html, names: &[&str]) -> Vec<ElementRef<'a>> {
    select_all(document, "meta[name]")
        .into_iter()
        .filter(|meta| {
            attr(*meta, "name").is_some_and(|name| {
                names
                    .iter()
                    .any(|wanted| name.trim().eq_ignore_ascii_case(wanted))
            })
        })
        .collect()
}

/// `<link>` elements whose `rel` token list contains `rel`
fn links_with_rel<'a>(document: &'a Html, rel: &str) -> Vec<ElementRef<'a>> {
    select_all(document, "link[rel]")
        .into_iter()
        .filter(|link| {
            attr(*link, "rel").is_some_and(|value| {
                value
                    .split_ascii_whitespace()
                    .any(|token| token.eq_ignore_ascii_case(rel))
            })
        })
        .collect()
}

pub fn extract_meta_tags(document: &Html) -> MetaTags {
    let title = select_all(document, "title")
        .into_iter()
        .next()
        .map(normalized_text)
        .filter(|t| !t.is_empty());

    let description = meta_named(document, &["description"])
        .into_iter()
        .find_map(|meta| non_empty(attr(meta, "content")));

    MetaTags { title, description }
}

pub fn extract_headings(document: &Html) -> Headings {
    let texts = |tag: &str| -> Vec<String> {
        select_all(document, tag)
            .into_iter()
            .map(normalized_text)
            .collect()
    };
    Headings {
        h1: texts("h1"),
        h2: texts("h2"),
        h3: texts("h3"),
    }
}

pub fn extract_images(document: &Html) -> ImageSummary {
    let images = select_all(document, "img");
    let missing_alt = images
        .iter()
        .filter(|img| non_empty(attr(**img, "alt")).is_none())
        .count();
    let sources = images
        .iter()
        .filter_map(|img| non_empty(attr(*img, "src")))
        .collect();

    ImageSummary {
        count: images.len(),
        missing_alt,
        sources,
    }
}

pub fn extract_links(document: &Html, page_url: &Url) -> LinkSummary {
    let mut links = LinkSummary::default();
    for anchor in select_all(document, "a[href]") {
        let Some(href) = non_empty(attr(anchor, "href")) else {
            continue;
        };
        let lowered = href.to_ascii_lowercase();
        if IGNORED_LINK_PREFIXES
            .iter()
            .any(|prefix| lowered.starts_with(prefix))
        {
            continue;
        }
        let Ok(target) = page_url.join(&href) else {
            continue;
        };
        if !matches!(target.scheme(), "http" | "https") {
            continue;
        }
        if target.host_str() == page_url.host_str() {
            links.internal.push(target.to_string());
        } else {
            links.external.push(target.to_string());
        }
    }
    links
}

pub fn extract_mobile(document: &Html) -> MobileFriendliness {
    MobileFriendliness {
        viewport: !meta_named(document, &["viewport"]).is_empty(),
        mobile_meta: !meta_named(document, &MOBILE_META_NAMES).is_empty(),
    }
}

pub fn extract_technical(document: &Html) -> TechnicalSeo {
    let canonical = links_with_rel(document, "canonical")
        .into_iter()
        .find_map(|link| non_empty(attr(link, "href")));

    let noindex = meta_named(document, &ROBOTS_META_NAMES)
        .into_iter()
        .filter_map(|meta| attr(meta, "content"))
        .any(|content| content.to_ascii_lowercase().contains("noindex"));

    let hreflang = links_with_rel(document, "alternate")
        .into_iter()
        .filter_map(|link| {
            let lang = non_empty(attr(link, "hreflang"))?;
            Some(HreflangLink {
                lang,
                href: non_empty(attr(link, "href")),
            })
        })
        .collect();

    TechnicalSeo {
        canonical,
        noindex,
        hreflang,
    }
}
