//! Result and submission types for roster extraction.

use serde::{Deserialize, Serialize};

/// One extracted roster player.
///
/// The external identifier is optional: not every rendering of a roster row
/// carries one, and downstream consumers key on name + team when it is absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PlayerRecord {
    /// Stable ESPN player id, when one could be resolved from the page.
    #[serde(rename = "espnId")]
    pub espn_id: Option<String>,
    /// Display name, trimmed, never empty.
    pub name: String,
    /// Pro-team abbreviation, uppercased, never empty.
    pub team: String,
}

/// Counters describing how much of the page the extraction saw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostics {
    /// Visible candidate row fragments enumerated (0 = roster region never appeared).
    pub candidate_count: usize,
    /// Path of the page the extraction ran against.
    pub source_path: String,
}

/// Outcome of one extraction request.
///
/// Every field degrades to empty/absent rather than erroring; callers decide
/// success by inspecting [`ExtractionResult::roster_detected`] and the
/// diagnostics counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub team_name: Option<String>,
    pub league_name: Option<String>,
    pub league_id: Option<String>,
    pub team_id: Option<String>,
    pub season_id: Option<String>,
    pub players: Vec<PlayerRecord>,
    pub diagnostics: Diagnostics,
}

impl ExtractionResult {
    /// True when the page yielded both a team name and at least one player.
    pub fn roster_detected(&self) -> bool {
        self.team_name.as_deref().is_some_and(|t| !t.is_empty()) && !self.players.is_empty()
    }
}

/// Body shape expected by the upstream team-submission endpoint.
///
/// The email comes from the auth collaborator, not from the page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSubmission {
    pub team_name: Option<String>,
    pub email: String,
    pub season_id: Option<String>,
    pub league_id: Option<String>,
    pub league_name: Option<String>,
    pub team_id: Option<String>,
    pub players: Vec<PlayerRecord>,
}

impl TeamSubmission {
    /// Build the submission body from an extraction result.
    pub fn from_result(result: &ExtractionResult, email: impl Into<String>) -> Self {
        Self {
            team_name: result.team_name.clone(),
            email: email.into(),
            season_id: result.season_id.clone(),
            league_id: result.league_id.clone(),
            league_name: result.league_name.clone(),
            team_id: result.team_id.clone(),
            players: result.players.clone(),
        }
    }
}
