use crate::ambiguity::{Verdict, classify};
use crate::error::Result;
use crate::external::{anchor_id, extract_external_links};
use crate::pause::{PauseSpec, pause_duration};
use crate::report::{ReportFormat, render_links, render_neighbors, save_report};
use crate::site::WikiSite;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use url::Url;
use wikistats_scanner::{CrawlProgress, NeighborCrawler, NeighborRecord, PageFetcher, ProgressCallback};

/// Options for one run against a single target page
#[derive(Debug)]
pub struct RunOptions {
    pub page: String,
    pub site: WikiSite,
    pub pause: PauseSpec,
    pub links_file: PathBuf,
    pub nearest_file: PathBuf,
    pub format: ReportFormat,
    pub timeout_secs: u64,
    pub show_progress_bars: bool,
}

/// Callback for reporting stage messages to the operator
pub type RunProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

#[derive(Debug)]
pub enum RunOutcome {
    /// Every stage ran and both result files were written.
    Completed {
        url: Url,
        pause_secs: f64,
        external_links: Vec<String>,
        neighbors: Vec<NeighborRecord>,
    },
    /// The target is a disambiguation page; nothing was written.
    Ambiguous { url: Url, candidates: Vec<String> },
}

fn spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn crawl_progress(progress_bar: Option<ProgressBar>) -> ProgressCallback {
    match progress_bar {
        Some(pb) => Arc::new(move |progress: CrawlProgress| {
            match progress {
                CrawlProgress::CategoryStarted { index, total, name } => {
                    pb.set_message(format!("Category {}/{}: {}", index + 1, total, name));
                }
                CrawlProgress::ListingPage { category, page } => {
                    pb.set_message(format!("{}: listing page {}", category, page));
                }
                CrawlProgress::Candidate { name, processed } => {
                    pb.set_message(format!("{} candidates checked, last: {}", processed, name));
                }
            }
            pb.tick();
        }),
        None => Arc::new(|_progress: CrawlProgress| {}),
    }
}

/// Fetch -> ambiguity check -> external links -> category neighbors.
///
/// Each stage runs only if the previous one succeeded. Configuration is
/// validated before the first request goes out.
pub async fn execute_run(
    options: RunOptions,
    progress_callback: Option<RunProgressCallback>,
) -> Result<RunOutcome> {
    let RunOptions {
        page,
        site,
        pause,
        links_file,
        nearest_file,
        format,
        timeout_secs,
        show_progress_bars,
    } = options;

    let notify = |msg: String| {
        if let Some(ref callback) = progress_callback {
            callback(msg);
        }
    };

    anchor_id(site.lang())?;
    let url = site.article_url(&page)?;
    let pause_secs = pause.resolve();
    let pause_for = pause_duration(pause_secs)?;
    notify(format!("Pause ({}) is {}s", pause, pause_secs));

    let fetcher = PageFetcher::with_timeout(timeout_secs)?;
    let target = fetcher.fetch(&url).await?;
    notify(format!("Request to {} succeeded", url));

    if let Verdict::Disambiguation { candidates } = classify(&target, &site)? {
        info!("{} is a disambiguation page ({} candidates)", url, candidates.len());
        return Ok(RunOutcome::Ambiguous { url, candidates });
    }
    notify("Page is informational".to_string());

    let external_links = extract_external_links(&target, site.lang())?;
    save_report(&render_links(&external_links), &links_file)?;
    notify(format!(
        "Wrote {} external links to {}",
        external_links.len(),
        links_file.display()
    ));

    let progress_bar = show_progress_bars.then(spinner);
    if let Some(ref pb) = progress_bar {
        pb.set_message("Getting category neighbors...");
    }

    let crawler = NeighborCrawler::new(fetcher)
        .with_pause(pause_for)
        .with_progress_callback(crawl_progress(progress_bar.clone()));
    let crawled = crawler.crawl(&target).await;

    if let Some(ref pb) = progress_bar {
        match &crawled {
            Ok(neighbors) => pb.finish_with_message(format!("Found {} neighbors", neighbors.len())),
            Err(_) => pb.finish_and_clear(),
        }
    }
    let neighbors = crawled?;

    save_report(&render_neighbors(&neighbors, format)?, &nearest_file)?;
    notify(format!(
        "Wrote {} neighbors to {}",
        neighbors.len(),
        nearest_file.display()
    ));

    Ok(RunOutcome::Completed {
        url,
        pause_secs,
        external_links,
        neighbors,
    })
}
