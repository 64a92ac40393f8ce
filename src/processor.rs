use anyhow::Result;
use colored::*;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tokio::task;
use tracing::{error, info, warn};

use crate::config::Settings;
use crate::error::FetchError;
use crate::http::{HttpFetcher, PageFetcher, build_http_client};
use crate::input::{Target, resolve_input};
use crate::output::{
    ReportOptions, format_status_line, format_summary_table, format_url_list, write_report,
};
use crate::pagespeed::PageSpeedClient;
use crate::record::SeoRecord;
use crate::types::Cli;
use crate::utils::{DelayRange, RateLimiter};

/// Shared state for the per-URL analysis tasks
struct ProcessingContext {
    fetcher: Arc<dyn PageFetcher>,
    pagespeed: Option<PageSpeedClient>,
    rate_limiter: Option<RateLimiter>,
    random_delay: Option<DelayRange>,
}

/// Fetches and analyzes URLs concurrently, yielding records in input order
pub struct Pipeline {
    context: ProcessingContext,
    concurrency: usize,
}

impl Pipeline {
    /// `concurrency` of 0 means no limit
    pub fn new(fetcher: Arc<dyn PageFetcher>, concurrency: usize) -> Self {
        Pipeline {
            context: ProcessingContext {
                fetcher,
                pagespeed: None,
                rate_limiter: None,
                random_delay: None,
            },
            concurrency,
        }
    }

    pub fn with_pagespeed(mut self, client: Option<PageSpeedClient>) -> Self {
        self.context.pagespeed = client;
        self
    }

    pub fn with_rate_limit(mut self, rate_limit: Option<u64>) -> Self {
        self.context.rate_limiter = rate_limit.and_then(RateLimiter::per_second);
        self
    }

    pub fn with_random_delay(mut self, random_delay: Option<DelayRange>) -> Self {
        self.context.random_delay = random_delay;
        self
    }

    pub async fn analyze(self, targets: Vec<Target>) -> Vec<SeoRecord> {
        self.analyze_with(targets, |_| {}).await
    }

    /// Analyze every URL, calling `on_record` as each record becomes available
    /// in input order. Exactly one record is produced per URL.
    pub async fn analyze_with<F>(self, targets: Vec<Target>, mut on_record: F) -> Vec<SeoRecord>
    where
        F: FnMut(&SeoRecord),
    {
        let limit = if self.concurrency == 0 {
            targets.len().max(1)
        } else {
            self.concurrency
        };
        let total = targets.len();
        let context = Arc::new(self.context);

        // `buffered` keeps at most `limit` tasks in flight and yields their
        // results in the order the URLs were given.
        let mut results = stream::iter(targets)
            .map(|target| {
                let context = context.clone();
                let task_target = target.clone();
                let handle = task::spawn(async move { analyze_url(&context, task_target).await });
                async move { (target, handle.await) }
            })
            .buffered(limit);

        let mut records = Vec::with_capacity(total);
        while let Some((target, joined)) = results.next().await {
            let record = joined.unwrap_or_else(|err| {
                error!(url = %target.url, error = %err, "analysis task failed");
                SeoRecord::failed(&target.input, &FetchError::Task(err.to_string()))
            });
            on_record(&record);
            records.push(record);
        }
        records
    }
}

async fn analyze_url(context: &ProcessingContext, target: Target) -> SeoRecord {
    let url = &target.url;
    if let Some(random_delay) = &context.random_delay {
        random_delay.sleep().await;
    }
    if let Some(rate_limiter) = &context.rate_limiter {
        rate_limiter.wait().await;
    }

    let fetch = context.fetcher.fetch(url).await;
    let mut record = SeoRecord::from_fetch(&target.input, &fetch);

    if let Some(pagespeed) = &context.pagespeed
        && record.is_success()
    {
        let metrics = pagespeed.analyze(url).await;
        if let Some(err) = &metrics.error {
            warn!(url = %url, error = %err, "PageSpeed Insights analysis failed");
        }
        record.pagespeed = Some(metrics);
    }
    record
}

/// Run a complete analysis: resolve input, fetch and analyze, write the report
pub async fn run(cli: Cli, settings: Settings) -> Result<()> {
    let use_color = !cli.no_color;
    if !use_color {
        colored::control::set_override(false);
    }

    let targets = resolve_input(&cli.input).await?;
    eprint!("{}", format_url_list(&targets, use_color));

    let client = build_http_client(&settings)?;
    let fetcher: Arc<dyn PageFetcher> = Arc::new(HttpFetcher::new(
        client,
        settings.retry,
        settings.retry_delay,
    ));

    if let Some(pagespeed) = &settings.pagespeed
        && pagespeed.api_key.is_none()
    {
        warn!("--pagespeed is set but no API key was provided (GOOGLE_PAGESPEED_API_KEY)");
    }
    let pagespeed = PageSpeedClient::from_settings(&settings)?;

    info!(
        urls = targets.len(),
        concurrency = settings.concurrency,
        "starting analysis"
    );
    let pipeline = Pipeline::new(fetcher, settings.concurrency)
        .with_pagespeed(pagespeed)
        .with_rate_limit(settings.rate_limit)
        .with_random_delay(settings.random_delay);

    let verbose = cli.verbose;
    let records = pipeline
        .analyze_with(targets, |record| {
            eprint!("{}", format_status_line(record, use_color));
            if verbose {
                eprintln!("{}", format_summary_table(record, use_color));
            }
        })
        .await;

    let options = ReportOptions {
        format: cli.format,
        include_pagespeed: settings.pagespeed.is_some(),
    };
    write_report(cli.output.as_deref(), &records, options).await?;

    let failed = records.iter().filter(|r| !r.is_success()).count();
    let summary = format!(
        "Analyzed {} URLs ({} succeeded, {} failed)",
        records.len(),
        records.len() - failed,
        failed
    );
    let destination = match &cli.output {
        Some(path) => format!("Report saved to {}", path.display()),
        None => "Report written to stdout".to_string(),
    };
    if use_color {
        eprintln!("\n{}\n{}", summary.bold(), destination.green());
    } else {
        eprintln!("\n{}\n{}", summary, destination);
    }
    Ok(())
}
