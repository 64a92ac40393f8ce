use std::borrow::Cow;

use crate::constants::{ERROR_COLUMN, PAGESPEED_COLUMNS, REPORT_COLUMNS};
use crate::record::SeoRecord;

const LINE_ENDING: &str = "\r\n";

/// Quote a field when it contains a delimiter, a quote or a line break
pub fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\r', '\n']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

fn join_row<S: AsRef<str>>(cells: &[S]) -> String {
    let mut row = cells
        .iter()
        .map(|cell| escape_field(cell.as_ref()))
        .collect::<Vec<_>>()
        .join(",");
    row.push_str(LINE_ENDING);
    row
}

pub fn header_row(include_pagespeed: bool) -> String {
    let mut columns: Vec<&str> = REPORT_COLUMNS.to_vec();
    if include_pagespeed {
        columns.extend_from_slice(&PAGESPEED_COLUMNS);
    }
    columns.push(ERROR_COLUMN);
    join_row(&columns)
}

pub fn record_row(record: &SeoRecord, include_pagespeed: bool) -> String {
    join_row(&record_cells(record, include_pagespeed))
}

/// Cell values in header order. SEO cells stay empty when the page could not
/// be analyzed.
pub fn record_cells(record: &SeoRecord, include_pagespeed: bool) -> Vec<String> {
    let load_time = record
        .load_time_seconds
        .map(|secs| format!("{:.3}", secs))
        .unwrap_or_default();
    let size = record
        .size_bytes
        .map(|bytes| bytes.to_string())
        .unwrap_or_default();

    let mut cells = match &record.analysis {
        Some(analysis) => {
            let hreflang = analysis
                .technical
                .hreflang
                .iter()
                .map(|link| link.lang.as_str())
                .collect::<Vec<_>>()
                .join(",");
            vec![
                record.url.clone(),
                analysis.meta.title.clone().unwrap_or_default(),
                analysis.meta.description.clone().unwrap_or_default(),
                analysis.headings.h1.len().to_string(),
                analysis.headings.h1.join(", "),
                analysis.headings.h2.len().to_string(),
                analysis.headings.h2.join(", "),
                analysis.images.count.to_string(),
                load_time,
                size,
                analysis.mobile.viewport.to_string(),
                analysis.technical.canonical.clone().unwrap_or_default(),
                hreflang,
                analysis.technical.noindex.to_string(),
            ]
        }
        None => {
            let mut cells = vec![String::new(); REPORT_COLUMNS.len()];
            cells[0] = record.url.clone();
            cells[8] = load_time;
            cells[9] = size;
            cells
        }
    };

    if include_pagespeed {
        let pagespeed = record.pagespeed.clone().unwrap_or_default();
        cells.push(
            pagespeed
                .score
                .map(|score| score.to_string())
                .unwrap_or_default(),
        );
        cells.push(pagespeed.lcp.unwrap_or_default());
        cells.push(pagespeed.cls.unwrap_or_default());
        cells.push(pagespeed.fid.unwrap_or_default());
    }

    cells.push(record.error.clone().unwrap_or_default());
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{HreflangLink, PageAnalysis};
    use crate::pagespeed::PageSpeedMetrics;

    fn analyzed_record() -> SeoRecord {
        let mut analysis = PageAnalysis::default();
        analysis.meta.title = Some("Shoes, Boots & More".to_string());
        analysis.meta.description = Some("The \"best\" shoes".to_string());
        analysis.headings.h1 = vec!["Shoes".to_string(), "Boots".to_string()];
        analysis.images.count = 4;
        analysis.mobile.viewport = true;
        analysis.technical.canonical = Some("https://shop.example.com/".to_string());
        analysis.technical.hreflang = vec![
            HreflangLink {
                lang: "en".to_string(),
                href: None,
            },
            HreflangLink {
                lang: "de".to_string(),
                href: None,
            },
        ];
        SeoRecord {
            url: "https://shop.example.com/".to_string(),
            status_code: Some(200),
            load_time_seconds: Some(0.25),
            size_bytes: Some(5120),
            analysis: Some(analysis),
            pagespeed: None,
            error: None,
        }
    }

    #[test]
    fn test_escape_field() {
        assert_eq!(escape_field("plain"), "plain");
        assert_eq!(escape_field("a,b"), "\"a,b\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_field("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn test_header_row() {
        assert_eq!(
            header_row(false),
            "URL,Title,Description,H1 Count,H1 Content,H2 Count,H2 Content,Image Count,Load Time,Size,Viewport,Canonical,hreflang,Noindex,Error\r\n"
        );
        assert!(header_row(true).ends_with("Noindex,PageSpeed Score,LCP,CLS,FID,Error\r\n"));
    }

    #[test]
    fn test_record_row() {
        assert_eq!(
            record_row(&analyzed_record(), false),
            "https://shop.example.com/,\"Shoes, Boots & More\",\"The \"\"best\"\" shoes\",2,\"Shoes, Boots\",0,,4,0.250,5120,true,https://shop.example.com/,\"en,de\",false,\r\n"
        );
    }

    #[test]
    fn test_failed_record_row() {
        let record = SeoRecord {
            url: "https://example.com/missing".to_string(),
            status_code: Some(404),
            load_time_seconds: Some(0.1),
            size_bytes: Some(9),
            error: Some("HTTP 404: Not Found".to_string()),
            ..Default::default()
        };
        assert_eq!(
            record_row(&record, false),
            "https://example.com/missing,,,,,,,,0.100,9,,,,,HTTP 404: Not Found\r\n"
        );
    }

    #[test]
    fn test_pagespeed_cells() {
        let mut record = analyzed_record();
        record.pagespeed = Some(PageSpeedMetrics {
            score: Some(0.92),
            lcp: Some("1.8 s".to_string()),
            cls: Some("0.01".to_string()),
            fid: Some("2.0 s".to_string()),
            error: None,
        });
        let cells = record_cells(&record, true);
        assert_eq!(cells.len(), REPORT_COLUMNS.len() + PAGESPEED_COLUMNS.len() + 1);
        assert_eq!(&cells[14..18], &["0.92", "1.8 s", "0.01", "2.0 s"]);
    }
}
