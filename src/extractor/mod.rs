//! Roster extraction engine for ESPN Fantasy Football team pages.
//!
//! Waits for late-rendered DOM regions, projects roster rows into owned
//! fragments, resolves stable player ids, and de-duplicates the result.

pub mod ident;
pub mod location;
pub mod orchestrator;
pub mod page;
pub mod poller;
pub mod records;
pub mod visibility;

pub use location::{is_roster_url, PageLocation};
pub use orchestrator::{InstallSlot, RosterExtractor};
pub use page::{Fragment, PageSource, StaticSource};
pub use poller::{wait_for, WaitSpec};

/// Host serving fantasy team pages
pub const ROSTER_HOST: &str = "fantasy.espn.com";

/// Path of the team roster page
pub const ROSTER_PATH: &str = "/football/team";

/// Roster row selectors: current rendering path first, then the legacy one.
/// The page duplicates markup between the two, so both are unioned.
pub const ROSTER_ROW_SELECTORS: [&str; 2] = ["tr.Table__TR", "tr.pncPlayerRow"];

/// Team abbreviation cell inside a roster row
pub const TEAM_ABBREV_SELECTORS: [&str; 2] = [".playerinfo__playerteam", ".player-column__team"];

/// Team name display element (rendered before the extraction request arrives)
pub const TEAM_NAME_SELECTORS: [&str; 2] = [".teamName.truncate", ".teamName"];

/// Container holding the league name anchor
pub const LEAGUE_ANCHOR_SELECTOR: &str = "#fantasy-nav-container a";

/// Generic label the league anchor shows before the real name renders
pub const PLACEHOLDER_LEAGUE_LABEL: &str = "Fantasy Football";

/// Markers identifying a player headshot image resource
pub const HEADSHOT_PATH_MARKERS: [&str; 2] = ["/i/headshots", "%2Fi%2Fheadshots"];
pub const PLAYERS_PATH_MARKERS: [&str; 2] = ["/players/", "%2Fplayers%2F"];

/// Build a team roster page URL
pub fn roster_url(league_id: &str, team_id: &str) -> String {
    format!(
        "https://{}{}?leagueId={}&teamId={}",
        ROSTER_HOST, ROSTER_PATH, league_id, team_id
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_url() {
        assert_eq!(
            roster_url("12345", "7"),
            "https://fantasy.espn.com/football/team?leagueId=12345&teamId=7"
        );
    }
}
