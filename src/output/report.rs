use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter};

use crate::output::csv::{header_row, record_row};
use crate::record::SeoRecord;
use crate::types::OutputFormat;

/// Layout of the written report
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    pub format: OutputFormat,
    pub include_pagespeed: bool,
}

/// Serialize records, in order, to any async writer
pub async fn write_records<W>(
    writer: &mut W,
    records: &[SeoRecord],
    options: ReportOptions,
) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    match options.format {
        OutputFormat::Csv => {
            writer
                .write_all(header_row(options.include_pagespeed).as_bytes())
                .await?;
            for record in records {
                writer
                    .write_all(record_row(record, options.include_pagespeed).as_bytes())
                    .await?;
            }
        }
        OutputFormat::Jsonl => {
            for record in records {
                let mut line = serde_json::to_string(record)?;
                line.push('\n');
                writer.write_all(line.as_bytes()).await?;
            }
        }
    }
    writer.flush().await
}

/// Write the report to `path`, or to stdout when no path is given
pub async fn write_report(
    path: Option<&Path>,
    records: &[SeoRecord],
    options: ReportOptions,
) -> Result<()> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .await
                .with_context(|| format!("failed to create report file {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            write_records(&mut writer, records, options)
                .await
                .with_context(|| format!("failed to write report file {}", path.display()))?;
        }
        None => {
            let mut stdout = tokio::io::stdout();
            write_records(&mut stdout, records, options)
                .await
                .context("failed to write report to stdout")?;
        }
    }
    Ok(())
}
