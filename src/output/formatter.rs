use colored::*;

use crate::input::Target;
use crate::record::SeoRecord;

const PREVIEW_LIMIT: usize = 3;

/// The list of URLs about to be analyzed
pub fn format_url_list(targets: &[Target], colored: bool) -> String {
    let heading = "Analyzing the following URLs:";
    let mut output = if colored {
        format!("{}\n", heading.yellow())
    } else {
        format!("{}\n", heading)
    };
    for target in targets {
        output.push_str(&format!(" - {}\n", target));
    }
    output
}

/// One progress line per analyzed page
pub fn format_status_line(record: &SeoRecord, colored: bool) -> String {
    let status = record
        .status_code
        .map(|code| code.to_string())
        .unwrap_or_else(|| "---".to_string());
    let time = record
        .load_time_seconds
        .map(|secs| format!("{:.3}s", secs))
        .unwrap_or_else(|| "-".to_string());
    let size = record
        .size_bytes
        .map(|bytes| bytes.to_string())
        .unwrap_or_else(|| "-".to_string());

    let (tag, detail) = if record.is_success() {
        ("[OK]", String::new())
    } else {
        (
            "[FAIL]",
            format!(" | {}", record.error.clone().unwrap_or_default()),
        )
    };

    if colored {
        let tag = if record.is_success() {
            tag.green()
        } else {
            tag.red()
        };
        format!(
            "{} [{}] -> {} | Size: {} | Time: {}{}\n",
            tag,
            record.url.cyan(),
            status.blue(),
            size,
            time,
            detail
        )
    } else {
        format!(
            "{} [{}] -> {} | Size: {} | Time: {}{}\n",
            tag, record.url, status, size, time, detail
        )
    }
}

fn check(ok: bool, colored: bool) -> String {
    match (ok, colored) {
        (true, true) => "yes".green().to_string(),
        (false, true) => "no".red().to_string(),
        (true, false) => "yes".to_string(),
        (false, false) => "no".to_string(),
    }
}

fn preview(items: &[String]) -> String {
    let shown: Vec<&str> = items
        .iter()
        .take(PREVIEW_LIMIT)
        .map(String::as_str)
        .collect();
    if items.len() > PREVIEW_LIMIT {
        format!("{}, ...", shown.join(", "))
    } else {
        shown.join(", ")
    }
}

/// Detailed per-page table shown with --verbose
pub fn format_summary_table(record: &SeoRecord, colored: bool) -> String {
    let title = format!("SEO Analysis Results: {}", record.url);
    let mut rows: Vec<(&str, String, String)> = Vec::new();

    match &record.analysis {
        Some(analysis) => {
            let meta = &analysis.meta;
            rows.push((
                "Meta tags",
                check(meta.title.is_some() && meta.description.is_some(), colored),
                format!(
                    "Title: {}, Desc: {}",
                    meta.title.as_deref().unwrap_or("-"),
                    meta.description.as_deref().unwrap_or("-")
                ),
            ));
            for (label, headings) in [
                ("H1 header", &analysis.headings.h1),
                ("H2 header", &analysis.headings.h2),
                ("H3 header", &analysis.headings.h3),
            ] {
                rows.push((label, headings.len().to_string(), preview(headings)));
            }
            rows.push((
                "Images",
                analysis.images.count.to_string(),
                format!(
                    "Missing alt: {}, Examples: {}",
                    analysis.images.missing_alt,
                    preview(&analysis.images.sources)
                ),
            ));
            rows.push((
                "Links (internal)",
                analysis.links.internal.len().to_string(),
                preview(&analysis.links.internal),
            ));
            rows.push((
                "Links (external)",
                analysis.links.external.len().to_string(),
                preview(&analysis.links.external),
            ));
            rows.push((
                "Performance",
                check(record.status_code == Some(200), colored),
                format!(
                    "Load time: {}s, Size: {} bytes",
                    record.load_time_seconds.unwrap_or_default(),
                    record.size_bytes.unwrap_or_default()
                ),
            ));
            rows.push((
                "Mobile viewport",
                check(analysis.mobile.viewport, colored),
                String::new(),
            ));
            rows.push((
                "Mobile meta",
                check(analysis.mobile.mobile_meta, colored),
                String::new(),
            ));
            rows.push((
                "Canonical",
                check(analysis.technical.canonical.is_some(), colored),
                analysis.technical.canonical.clone().unwrap_or_default(),
            ));
            // A noindex directive is a finding, not a pass.
            rows.push((
                "Noindex",
                check(!analysis.technical.noindex, colored),
                format!("noindex: {}", analysis.technical.noindex),
            ));
            let hreflang: Vec<String> = analysis
                .technical
                .hreflang
                .iter()
                .map(|link| match &link.href {
                    Some(href) => format!("{} -> {}", link.lang, href),
                    None => link.lang.clone(),
                })
                .collect();
            rows.push((
                "Hreflang",
                check(!hreflang.is_empty(), colored),
                hreflang.join(", "),
            ));
        }
        None => {
            rows.push((
                "Error",
                check(false, colored),
                record.error.clone().unwrap_or_default(),
            ));
        }
    }

    if let Some(pagespeed) = &record.pagespeed {
        let details = match &pagespeed.error {
            Some(err) => err.clone(),
            None => format!(
                "LCP: {}, CLS: {}, FID: {}",
                pagespeed.lcp.as_deref().unwrap_or("-"),
                pagespeed.cls.as_deref().unwrap_or("-"),
                pagespeed.fid.as_deref().unwrap_or("-")
            ),
        };
        let score = pagespeed
            .score
            .map(|score| score.to_string())
            .unwrap_or_else(|| "-".to_string());
        rows.push(("PageSpeed", score, details));
    }

    let mut output = if colored {
        format!("{}\n", title.bold())
    } else {
        format!("{}\n", title)
    };
    for (category, status, details) in rows {
        let category = format!("{:<18}", category);
        let category = if colored {
            category.cyan().to_string()
        } else {
            category
        };
        output.push_str(&format!("  {} {:<6} {}\n", category, status, details));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::PageAnalysis;

    fn record() -> SeoRecord {
        let mut analysis = PageAnalysis::default();
        analysis.meta.title = Some("Home".to_string());
        analysis.headings.h1 = vec!["Welcome".to_string()];
        analysis.links.internal = (1..=5).map(|i| format!("https://example.com/{}", i)).collect();
        SeoRecord {
            url: "https://example.com/".to_string(),
            status_code: Some(200),
            load_time_seconds: Some(0.321),
            size_bytes: Some(2048),
            analysis: Some(analysis),
            ..Default::default()
        }
    }

    #[test]
    fn test_format_url_list() {
        let targets = vec![Target::parse("example.com/shop").unwrap()];
        assert_eq!(
            format_url_list(&targets, false),
            "Analyzing the following URLs:\n - https://example.com/shop\n"
        );
    }

    #[test]
    fn test_format_status_line_success() {
        let output = format_status_line(&record(), false);
        assert_eq!(
            output,
            "[OK] [https://example.com/] -> 200 | Size: 2048 | Time: 0.321s\n"
        );
    }

    #[test]
    fn test_format_status_line_failure() {
        let failed = SeoRecord {
            url: "https://example.com/down".to_string(),
            error: Some("request timed out".to_string()),
            ..Default::default()
        };
        let output = format_status_line(&failed, false);
        assert!(output.starts_with("[FAIL] [https://example.com/down] -> ---"));
        assert!(output.contains("| request timed out"));
    }

    #[test]
    fn test_format_summary_table() {
        let output = format_summary_table(&record(), false);
        assert!(output.starts_with("SEO Analysis Results: https://example.com/\n"));
        assert!(output.contains("Title: Home, Desc: -"));
        assert!(output.contains("Welcome"));
        assert!(output.contains("https://example.com/3, ..."));
        assert!(!output.contains("https://example.com/4"));
    }
}
