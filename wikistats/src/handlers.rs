use anyhow::{Context, anyhow};
use clap::ArgMatches;
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;
use url::Url;
use wikistats_core::pause::PauseSpec;
use wikistats_core::report::ReportFormat;
use wikistats_core::{RunOptions, RunOutcome, RunProgressCallback, WikiSite, execute_run};
use wikistats_scanner::NeighborRecord;

pub const EXIT_OK: i32 = 0;
pub const EXIT_ERROR: i32 = 1;
pub const EXIT_AMBIGUOUS: i32 = 2;

/// How many of the best neighbors are echoed to the terminal.
const NEIGHBORS_SHOWN: usize = 10;

/// Expands a leading `~` in a user-supplied path.
pub fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

/// Translates parsed arguments into the options of a run.
pub fn build_run_options(matches: &ArgMatches) -> anyhow::Result<RunOptions> {
    let page = matches
        .get_one::<String>("PAGE")
        .ok_or_else(|| anyhow!("no page name given"))?;
    let lang = matches
        .get_one::<String>("lang")
        .map(String::as_str)
        .unwrap_or("en");

    let site = match matches.get_one::<Url>("origin") {
        Some(origin) => WikiSite::with_origin(lang, origin.as_str()),
        None => WikiSite::wikipedia(lang),
    }
    .context("invalid wiki configuration")?;

    let pause = matches
        .get_one::<PauseSpec>("pause")
        .copied()
        .ok_or_else(|| anyhow!("no pause given"))?;

    let format = matches
        .get_one::<String>("format")
        .and_then(|f| ReportFormat::from_str(f))
        .unwrap_or_default();

    let links_file = matches
        .get_one::<String>("links-file")
        .map(|p| expand_path(p))
        .ok_or_else(|| anyhow!("no links file given"))?;
    let nearest_file = matches
        .get_one::<String>("nearest-file")
        .map(|p| expand_path(p))
        .ok_or_else(|| anyhow!("no nearest file given"))?;

    Ok(RunOptions {
        page: page.clone(),
        site,
        pause,
        links_file,
        nearest_file,
        format,
        timeout_secs: matches.get_one::<u64>("timeout").copied().unwrap_or(10),
        show_progress_bars: !matches.get_flag("quiet"),
    })
}

fn print_neighbors(neighbors: &[NeighborRecord]) {
    for record in neighbors.iter().take(NEIGHBORS_SHOWN) {
        println!(
            "  {:>3}  {}  {}",
            record.overlap.to_string().bright_green().bold(),
            record.name,
            record.shared.join(", ").bright_black()
        );
    }
    if neighbors.len() > NEIGHBORS_SHOWN {
        println!(
            "  {}",
            format!("... and {} more", neighbors.len() - NEIGHBORS_SHOWN).bright_black()
        );
    }
}

/// Runs the whole pipeline for the parsed arguments and returns the
/// process exit code.
pub async fn handle_run(matches: &ArgMatches) -> i32 {
    let options = match build_run_options(matches) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{} {:#}", "✗".red().bold(), e);
            return EXIT_ERROR;
        }
    };
    let quiet = matches.get_flag("quiet");
    let page = options.page.clone();
    let links_file = options.links_file.clone();
    let nearest_file = options.nearest_file.clone();
    debug!("Running with pause {} against {:?}", options.pause, options.site);

    let progress_callback: Option<RunProgressCallback> = if quiet {
        None
    } else {
        Some(Arc::new(|msg: String| {
            println!("{} {}", "→".bright_black(), msg);
        }))
    };

    let outcome = execute_run(options, progress_callback)
        .await
        .with_context(|| format!("cannot process page '{}'", page));

    match outcome {
        Ok(RunOutcome::Completed {
            url,
            external_links,
            neighbors,
            ..
        }) => {
            if !quiet {
                println!();
                println!("{} {}", "✓".green().bold(), url.as_str().bold());
                println!(
                    "  {} external links saved to {}",
                    external_links.len(),
                    links_file.display()
                );
                println!(
                    "  {} neighbors saved to {}",
                    neighbors.len(),
                    nearest_file.display()
                );
                print_neighbors(&neighbors);
            }
            EXIT_OK
        }
        Ok(RunOutcome::Ambiguous { url, candidates }) => {
            eprintln!(
                "{} {} is a disambiguation page, pick one of:",
                "⚠".yellow().bold(),
                url
            );
            for candidate in &candidates {
                eprintln!("  {}", candidate);
            }
            EXIT_AMBIGUOUS
        }
        Err(e) => {
            eprintln!("{} {:#}", "✗".red().bold(), e);
            EXIT_ERROR
        }
    }
}
