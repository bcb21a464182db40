//! Building normalized, de-duplicated player records from row fragments.

use std::collections::HashSet;

use tracing::trace;

use super::ident::resolve_external_id;
use super::page::{Fragment, FragmentAnchor};
use crate::types::PlayerRecord;

/// Separator for the name+team fallback key; not expected in either field.
const KEY_SEPARATOR: char = '|';

/// Map candidate fragments to normalized player records, in encounter order.
///
/// Fragments missing a name or team after trimming are dropped silently, as
/// are later fragments resolving to an already-emitted key (sticky-column
/// rendering duplicates rows). Stable and idempotent: the same fragment
/// collection always yields the same sequence.
pub fn build_records(fragments: &[Fragment]) -> Vec<PlayerRecord> {
    let mut seen_keys = HashSet::new();
    let mut records = Vec::new();

    for fragment in fragments {
        let Some(name) = player_name(fragment) else {
            trace!("dropping fragment without a player name");
            continue;
        };
        let Some(team) = fragment
            .team_abbrev
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
        else {
            trace!("dropping fragment without a team abbreviation");
            continue;
        };

        let espn_id = resolve_external_id(fragment);
        let key = match &espn_id {
            Some(id) => id.clone(),
            None => format!("{}{}{}", name, KEY_SEPARATOR, team),
        };
        if !seen_keys.insert(key) {
            continue;
        }

        records.push(PlayerRecord {
            espn_id,
            name: name.to_string(),
            team: team.to_uppercase(),
        });
    }

    records
}

/// Display name: the first anchor that is not a news-link variant and has
/// non-empty trimmed text.
fn player_name(fragment: &Fragment) -> Option<&str> {
    fragment
        .anchors
        .iter()
        .filter(|anchor| !is_news_link(anchor))
        .map(|anchor| anchor.text.trim())
        .find(|text| !text.is_empty())
}

fn is_news_link(anchor: &FragmentAnchor) -> bool {
    anchor.class.to_ascii_lowercase().contains("news")
        || anchor.href.as_deref().is_some_and(|h| h.contains("/news/"))
}
