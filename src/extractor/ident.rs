//! External player-id resolution.
//!
//! The page is inconsistent about where it puts player ids: sometimes only a
//! headshot image URL carries one, sometimes only a profile link. Two pure
//! strategies run in fixed precedence order, first match wins.

use regex::Regex;

use super::page::Fragment;
use super::{HEADSHOT_PATH_MARKERS, PLAYERS_PATH_MARKERS};

/// Resolve a stable external player id from a row fragment, or `None`.
/// Callers must tolerate the absence; name + team stand in as the key.
pub fn resolve_external_id(fragment: &Fragment) -> Option<String> {
    id_from_headshot(fragment).or_else(|| id_from_link(fragment))
}

/// Image strategy: a resource path carrying both the headshot marker and the
/// players marker, in direct or percent-encoded (proxied) form, ending in
/// `<digits>.<ext>`.
fn id_from_headshot(fragment: &Fragment) -> Option<String> {
    let re = Regex::new(r"(\d+)\.(?:png|jpg|jpeg|gif|webp)").unwrap();

    fragment
        .image_sources
        .iter()
        .filter(|src| {
            HEADSHOT_PATH_MARKERS.iter().any(|m| src.contains(m))
                && PLAYERS_PATH_MARKERS.iter().any(|m| src.contains(m))
        })
        .find_map(|src| re.captures(src).map(|caps| caps[1].to_string()))
}

/// Link strategy: try the href patterns in order on each anchor.
fn id_from_link(fragment: &Fragment) -> Option<String> {
    let patterns = [
        Regex::new(r"/id/(\d+)(?:/|$|\?)").unwrap(),
        Regex::new(r"[?&]playerId=(\d+)").unwrap(),
        Regex::new(r"/players/[^/]+/(\d+)").unwrap(),
    ];

    for anchor in &fragment.anchors {
        let Some(href) = anchor.href.as_deref() else {
            continue;
        };
        for pattern in &patterns {
            if let Some(caps) = pattern.captures(href) {
                return Some(caps[1].to_string());
            }
        }
    }
    None
}
