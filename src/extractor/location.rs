//! Page address parsing.
//!
//! League, team, and season identifiers ride on the roster page URL as query
//! parameters. Absent values become `None`, never errors.

use url::Url;

use super::{ROSTER_HOST, ROSTER_PATH};

/// Request-scoped identifiers read from the page address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLocation {
    pub path: String,
    pub league_id: Option<String>,
    pub team_id: Option<String>,
    pub season_id: Option<String>,
}

impl PageLocation {
    /// Parse identifiers out of a page URL. Unparseable input yields an
    /// all-empty location.
    pub fn parse(location: Option<&str>) -> Self {
        let Some(url) = location.and_then(|l| Url::parse(l).ok()) else {
            return Self::default();
        };

        let mut parsed = Self {
            path: url.path().to_string(),
            ..Self::default()
        };

        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "leagueId" => parsed.league_id = non_empty(&value),
                "teamId" => parsed.team_id = non_empty(&value),
                "seasonId" => parsed.season_id = non_empty(&value),
                _ => {}
            }
        }

        parsed
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// True when the URL addresses a team roster page: fantasy host, the
/// `/football/team` path, and both a league and a team id.
pub fn is_roster_url(location: &str) -> bool {
    let Ok(url) = Url::parse(location) else {
        return false;
    };
    if !url.host_str().is_some_and(|h| h.contains(ROSTER_HOST)) {
        return false;
    }
    let path = url.path();
    if path != ROSTER_PATH && path != "/football/team/" {
        return false;
    }
    let parsed = PageLocation::parse(Some(location));
    parsed.league_id.is_some() && parsed.team_id.is_some()
}
