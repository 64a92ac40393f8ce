use serde::Serialize;

/// Everything extracted from one HTML document
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageAnalysis {
    pub meta: MetaTags,
    pub headings: Headings,
    pub images: ImageSummary,
    pub links: LinkSummary,
    pub mobile: MobileFriendliness,
    pub technical: TechnicalSeo,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetaTags {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Heading texts in document order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Headings {
    pub h1: Vec<String>,
    pub h2: Vec<String>,
    pub h3: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImageSummary {
    pub count: usize,
    /// Images without a non-empty `alt` attribute
    pub missing_alt: usize,
    pub sources: Vec<String>,
}

/// Absolute link targets, split by whether they stay on the page's host
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LinkSummary {
    pub internal: Vec<String>,
    pub external: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MobileFriendliness {
    pub viewport: bool,
    /// `HandheldFriendly` or `MobileOptimized` meta tag present
    pub mobile_meta: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TechnicalSeo {
    pub canonical: Option<String>,
    pub noindex: bool,
    pub hreflang: Vec<HreflangLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HreflangLink {
    pub lang: String,
    pub href: Option<String>,
}
