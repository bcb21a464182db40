//! CLI commands for fantasy-roster.
//!
//! Drives one extraction against a live rendered page or a saved snapshot,
//! and owns the user-facing messaging for empty results.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::browser::Browser;
use crate::config::AppConfig;
use crate::extractor::{is_roster_url, InstallSlot, PageSource, RosterExtractor, StaticSource};
use crate::types::{ExtractionResult, TeamSubmission};

#[derive(Parser)]
#[command(name = "fantasy-roster")]
#[command(version, about = "Roster extraction for ESPN Fantasy Football team pages", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract the roster from a team page
    Extract {
        /// Team page URL to render in a headless browser
        #[arg(long, conflicts_with = "input")]
        url: Option<String>,

        /// Saved HTML snapshot to extract from instead of a live page
        #[arg(long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Page URL the snapshot was taken from (fixture mode)
        #[arg(long, requires = "input")]
        location: Option<String>,

        /// Print the upstream submission body with this email instead of the raw result
        #[arg(long)]
        email: Option<String>,
    },
}

/// Run one extraction and print the result as JSON.
pub async fn run_extract(
    url: Option<String>,
    input: Option<PathBuf>,
    location: Option<String>,
    email: Option<String>,
) -> Result<()> {
    let config = AppConfig::load()?;

    let result = match (&url, &input) {
        (_, Some(path)) => {
            let html = std::fs::read_to_string(path)?;
            eprintln!("Extracting from snapshot: {}", path.display());
            extract_from(StaticSource::new(html, location.clone()), &config).await?
        }
        (Some(url), None) => {
            eprintln!("Rendering page: {}", url);
            let browser = Browser::launch(config.browser.chrome_path.as_deref()).await?;
            let page = browser.open(url).await?;
            let result = extract_from(page, &config).await?;
            browser.close().await?;
            result
        }
        (None, None) => bail!("either --url or --input is required"),
    };

    report_outcome(&result, url.as_deref().or(location.as_deref()));

    let output = match email {
        Some(email) => serde_json::to_string_pretty(&TeamSubmission::from_result(&result, email))?,
        None => serde_json::to_string_pretty(&result)?,
    };
    println!("{}", output);

    Ok(())
}

async fn extract_from<S: PageSource>(source: S, config: &AppConfig) -> Result<ExtractionResult> {
    let slot = InstallSlot::new();
    let extractor = RosterExtractor::install(&slot, source, &config.wait)?;
    Ok(extractor.extract().await)
}

/// Tell the user what happened when extraction came up empty: a wrong kind of
/// page reads differently from a roster page whose rows yielded nothing.
fn report_outcome(result: &ExtractionResult, location: Option<&str>) {
    if result.roster_detected() {
        eprintln!(
            "Team: {} ({} players)",
            result.team_name.as_deref().unwrap_or(""),
            result.players.len()
        );
        return;
    }

    if location.is_some_and(is_roster_url) {
        eprintln!(
            "Roster not detected on this page (candidates={}, players={}). \
             Try refreshing; if it persists, the page DOM may have changed.",
            result.diagnostics.candidate_count,
            result.players.len()
        );
    } else {
        eprintln!(
            "Couldn't find a team roster here. Open your team's roster page \
             ({}) and retry.",
            crate::extractor::roster_url("<leagueId>", "<teamId>")
        );
    }
}
