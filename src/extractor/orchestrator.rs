//! Extraction orchestration: one inbound request, one assembled result.

use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{bail, Result};
use scraper::Html;
use tracing::{debug, warn};

use super::location::PageLocation;
use super::page::{find_league_name, find_roster_fragments, read_team_name, PageSource};
use super::poller::{wait_for, WaitSpec};
use super::records::build_records;
use crate::config::WaitSettings;
use crate::types::{Diagnostics, ExtractionResult};

/// Single-shot installation slot for one page context.
///
/// The flag only ever transitions false to true, so a host environment that
/// injects the module twice wires the extractor exactly once.
#[derive(Debug, Default)]
pub struct InstallSlot {
    installed: AtomicBool,
}

impl InstallSlot {
    pub fn new() -> Self {
        Self::default()
    }

    fn claim(&self) -> bool {
        self.installed
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }
}

/// Composes the poller, page queries, and record builder to answer one
/// "extract now" request.
pub struct RosterExtractor<S> {
    source: S,
    element_wait: WaitSpec,
    roster_wait: WaitSpec,
}

impl<S: PageSource> RosterExtractor<S> {
    /// Install the extractor into a page context. A second installation
    /// against the same slot is rejected.
    pub fn install(slot: &InstallSlot, source: S, settings: &WaitSettings) -> Result<Self> {
        if !slot.claim() {
            bail!("roster extractor already installed in this page context");
        }
        Ok(Self {
            source,
            element_wait: WaitSpec::from_millis(
                settings.element_timeout_ms,
                settings.element_interval_ms,
            ),
            roster_wait: WaitSpec::from_millis(
                settings.roster_timeout_ms,
                settings.roster_interval_ms,
            ),
        })
    }

    /// Run one extraction. Never fails: every step degrades to an empty or
    /// absent value, and the diagnostics counters tell the caller how much
    /// of the page was actually found.
    pub async fn extract(&self) -> ExtractionResult {
        let location = self.source.location();
        let page = PageLocation::parse(location.as_deref());

        // The team name element is rendered before the request arrives; read
        // it directly, no wait.
        let team_name = self.query_snapshot(read_team_name).await.flatten();

        let league_name = wait_for(&self.element_wait, "league name", || async move {
            self.query_snapshot(find_league_name).await.flatten()
        })
        .await;

        let fragments = wait_for(&self.roster_wait, "roster rows", || async move {
            self.query_snapshot(find_roster_fragments)
                .await
                .filter(|found| !found.is_empty())
        })
        .await
        .unwrap_or_default();

        let candidate_count = fragments.len();
        let players = build_records(&fragments);
        debug!(
            "extraction finished: {} candidates, {} players",
            candidate_count,
            players.len()
        );

        ExtractionResult {
            team_name,
            league_name,
            league_id: page.league_id,
            team_id: page.team_id,
            season_id: page.season_id,
            players,
            diagnostics: Diagnostics {
                candidate_count,
                source_path: page.path,
            },
        }
    }

    /// Fetch the current snapshot and apply a query to it. Snapshot failures
    /// degrade to an empty probe result.
    async fn query_snapshot<T>(&self, query: impl Fn(&Html) -> T) -> Option<T> {
        match self.source.snapshot().await {
            Ok(html) => {
                let document = Html::parse_document(&html);
                Some(query(&document))
            }
            Err(e) => {
                warn!("page snapshot failed: {e:#}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::page::StaticSource;
    use std::sync::Mutex;

    const ROSTER_URL: &str =
        "https://fantasy.espn.com/football/team?leagueId=12345&teamId=7&seasonId=2025";

    // Team name renders first; league name and roster arrive later.
    const BARE_HTML: &str = r#"<html><body>
        <span class="teamName truncate">The Crushers</span>
        <div id="fantasy-nav-container">
          <a href="/football/welcome">Fantasy Football</a>
        </div>
    </body></html>"#;

    const RENDERED_HTML: &str = r#"<html><body>
        <span class="teamName truncate">The Crushers</span>
        <div id="fantasy-nav-container">
          <a href="/football/welcome">Fantasy Football</a>
          <a href="/football/league?leagueId=12345">Dynasty Degens</a>
        </div>
        <table class="Table"><tbody>
          <tr class="Table__TR">
            <td><a class="AnchorLink" href="/nfl/player/_/id/111/john-doe">John Doe</a>
                <span class="playerinfo__playerteam">kc</span></td>
            <td><img src="https://a.espncdn.com/i/headshots/nfl/players/full/111.png"></td>
          </tr>
          <tr class="Table__TR">
            <td><a class="AnchorLink" href="/nfl/player/_/id/111/john-doe">John Doe</a>
                <span class="playerinfo__playerteam">KC</span></td>
          </tr>
          <tr class="Table__TR">
            <td><a class="AnchorLink" href="/nfl/player/_/id/222/jane-roe">Jane Roe</a>
                <span class="playerinfo__playerteam">sf</span></td>
          </tr>
        </tbody></table>
    </body></html>"#;

    /// Replays a fixed snapshot sequence, repeating the last one.
    struct SequenceSource {
        snapshots: Mutex<(usize, Vec<&'static str>)>,
    }

    impl SequenceSource {
        fn new(snapshots: Vec<&'static str>) -> Self {
            Self {
                snapshots: Mutex::new((0, snapshots)),
            }
        }
    }

    impl PageSource for SequenceSource {
        fn location(&self) -> Option<String> {
            Some(ROSTER_URL.to_string())
        }

        async fn snapshot(&self) -> Result<String> {
            let mut guard = self.snapshots.lock().unwrap();
            let (next, snapshots) = &mut *guard;
            let index = (*next).min(snapshots.len() - 1);
            *next += 1;
            Ok(snapshots[index].to_string())
        }
    }

    fn install<S: PageSource>(source: S) -> RosterExtractor<S> {
        let slot = InstallSlot::new();
        RosterExtractor::install(&slot, source, &crate::config::WaitSettings::default()).unwrap()
    }

    #[test]
    fn test_second_install_rejected() {
        let slot = InstallSlot::new();
        let settings = crate::config::WaitSettings::default();

        let first = RosterExtractor::install(
            &slot,
            StaticSource::new("<html></html>", None),
            &settings,
        );
        assert!(first.is_ok());

        let second = RosterExtractor::install(
            &slot,
            StaticSource::new("<html></html>", None),
            &settings,
        );
        assert!(second.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_extract_fully_rendered_page() {
        let extractor = install(StaticSource::new(RENDERED_HTML, Some(ROSTER_URL.to_string())));
        let result = extractor.extract().await;

        assert_eq!(result.team_name.as_deref(), Some("The Crushers"));
        assert_eq!(result.league_name.as_deref(), Some("Dynasty Degens"));
        assert_eq!(result.league_id.as_deref(), Some("12345"));
        assert_eq!(result.team_id.as_deref(), Some("7"));
        assert_eq!(result.season_id.as_deref(), Some("2025"));
        assert_eq!(result.diagnostics.candidate_count, 3);
        assert_eq!(result.diagnostics.source_path, "/football/team");

        // Sticky-column duplicate collapsed.
        assert_eq!(result.players.len(), 2);
        assert_eq!(result.players[0].espn_id.as_deref(), Some("111"));
        assert_eq!(result.players[0].name, "John Doe");
        assert_eq!(result.players[0].team, "KC");
        assert_eq!(result.players[1].espn_id.as_deref(), Some("222"));
        assert!(result.roster_detected());
    }

    #[tokio::test(start_paused = true)]
    async fn test_extract_waits_for_late_render() {
        let source = SequenceSource::new(vec![BARE_HTML, BARE_HTML, RENDERED_HTML]);
        let extractor = install(source);
        let result = extractor.extract().await;

        assert_eq!(result.team_name.as_deref(), Some("The Crushers"));
        assert_eq!(result.league_name.as_deref(), Some("Dynasty Degens"));
        assert_eq!(result.players.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_extract_empty_page_degrades() {
        let extractor = install(StaticSource::new(
            "<html><body></body></html>",
            Some("https://fantasy.espn.com/football/league?leagueId=12345".to_string()),
        ));
        let result = extractor.extract().await;

        assert_eq!(result.team_name, None);
        assert_eq!(result.league_name, None);
        assert_eq!(result.team_id, None);
        assert!(result.players.is_empty());
        assert_eq!(result.diagnostics.candidate_count, 0);
        assert!(!result.roster_detected());
    }

    #[tokio::test(start_paused = true)]
    async fn test_extract_malformed_rows_counted_but_not_emitted() {
        // Rows render, but none carries a usable name or team.
        let html = r#"<html><body>
            <table class="Table"><tbody>
              <tr class="Table__TR"><td>BYE WEEK</td></tr>
              <tr class="Table__TR"><td>EMPTY SLOT</td></tr>
            </tbody></table>
        </body></html>"#;
        let extractor = install(StaticSource::new(html, None));
        let result = extractor.extract().await;

        assert_eq!(result.diagnostics.candidate_count, 2);
        assert!(result.players.is_empty());
        assert_eq!(result.diagnostics.source_path, "");
    }
}
