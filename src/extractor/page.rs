//! Page reading: the source capability trait, the owned fragment model, and
//! the snapshot queries the orchestrator polls with.
//!
//! Rows are projected into owned [`Fragment`]s at enumeration time so every
//! downstream stage works on plain data, decoupled from any rendering engine.

use anyhow::Result;
use scraper::{ElementRef, Html, Selector};

use super::visibility::is_visible;
use super::{
    LEAGUE_ANCHOR_SELECTOR, PLACEHOLDER_LEAGUE_LABEL, ROSTER_ROW_SELECTORS, TEAM_ABBREV_SELECTORS,
    TEAM_NAME_SELECTORS,
};

/// Capability interface over the page under extraction: where it is, and what
/// its DOM currently renders to. Live pages re-snapshot on every call; fixture
/// sources return a stored document.
pub trait PageSource {
    /// Current page address, when known.
    fn location(&self) -> Option<String>;

    /// Current rendered HTML of the page.
    fn snapshot(&self) -> impl std::future::Future<Output = Result<String>>;
}

/// Fixture-backed page source: a fixed snapshot and location.
pub struct StaticSource {
    html: String,
    location: Option<String>,
}

impl StaticSource {
    pub fn new(html: impl Into<String>, location: Option<String>) -> Self {
        Self {
            html: html.into(),
            location,
        }
    }
}

impl PageSource for StaticSource {
    fn location(&self) -> Option<String> {
        self.location.clone()
    }

    async fn snapshot(&self) -> Result<String> {
        Ok(self.html.clone())
    }
}

/// One anchor inside a candidate row.
#[derive(Debug, Clone, Default)]
pub struct FragmentAnchor {
    pub text: String,
    pub href: Option<String>,
    pub class: String,
}

/// Owned projection of one candidate roster row.
#[derive(Debug, Clone, Default)]
pub struct Fragment {
    pub anchors: Vec<FragmentAnchor>,
    pub team_abbrev: Option<String>,
    /// Image resource paths in the row scope (the row itself, or its nearest
    /// enclosing `tr` ancestor).
    pub image_sources: Vec<String>,
}

/// Enumerate visible roster row fragments across the current and legacy
/// selectors, in encounter order, without duplicating rows matched by both.
pub fn find_roster_fragments(document: &Html) -> Vec<Fragment> {
    let mut seen_nodes = std::collections::HashSet::new();
    let mut fragments = Vec::new();

    for selector_str in ROSTER_ROW_SELECTORS {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };
        for row in document.select(&selector) {
            if !seen_nodes.insert(row.id()) {
                continue;
            }
            if !is_visible(row) {
                continue;
            }
            fragments.push(project_fragment(row));
        }
    }

    fragments
}

/// Read the league name: the first anchor in the nav container whose text is
/// real, not the generic placeholder label.
pub fn find_league_name(document: &Html) -> Option<String> {
    let selector = Selector::parse(LEAGUE_ANCHOR_SELECTOR).ok()?;
    for anchor in document.select(&selector) {
        let text = element_text(anchor);
        if !text.is_empty() && text != PLACEHOLDER_LEAGUE_LABEL {
            return Some(text);
        }
    }
    None
}

/// Read the team name display element. No waiting: the element is assumed
/// rendered by the time an extraction request arrives.
pub fn read_team_name(document: &Html) -> Option<String> {
    for selector_str in TEAM_NAME_SELECTORS {
        if let Ok(selector) = Selector::parse(selector_str) {
            if let Some(element) = document.select(&selector).next() {
                let text = element_text(element);
                if !text.is_empty() {
                    return Some(text);
                }
            }
        }
    }
    None
}

fn project_fragment(row: ElementRef) -> Fragment {
    let anchor_selector = Selector::parse("a").unwrap();
    let img_selector = Selector::parse("img").unwrap();

    let anchors = row
        .select(&anchor_selector)
        .map(|a| FragmentAnchor {
            text: element_text(a),
            href: a.value().attr("href").map(str::to_string),
            class: a.value().attr("class").unwrap_or("").to_string(),
        })
        .collect();

    let team_abbrev = TEAM_ABBREV_SELECTORS.iter().find_map(|selector_str| {
        let selector = Selector::parse(selector_str).ok()?;
        let cell = row.select(&selector).next()?;
        let text = element_text(cell);
        (!text.is_empty()).then_some(text)
    });

    let image_sources = row_scope(row)
        .select(&img_selector)
        .filter_map(|img| img.value().attr("src"))
        .map(str::to_string)
        .collect();

    Fragment {
        anchors,
        team_abbrev,
        image_sources,
    }
}

/// The row itself when it is a `tr`, otherwise its nearest `tr` ancestor.
/// Image resources sometimes live in a sibling cell of the same row.
fn row_scope(element: ElementRef) -> ElementRef {
    if element.value().name() == "tr" {
        return element;
    }
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|e| e.value().name() == "tr")
        .unwrap_or(element)
}

fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROSTER_HTML: &str = r#"<!DOCTYPE html>
<html>
<body>
<div id="fantasy-nav-container">
  <a href="/football/league?leagueId=12345">Fantasy Football</a>
  <a href="/football/league?leagueId=12345">Dynasty Degens</a>
</div>
<span class="teamName truncate">The Crushers</span>
<table class="Table">
  <tbody>
    <tr class="Table__TR">
      <td><a class="AnchorLink" href="/nfl/player/_/id/111/john-doe">John Doe</a>
          <span class="playerinfo__playerteam">kc</span></td>
      <td><img src="https://a.espncdn.com/i/headshots/nfl/players/full/111.png"></td>
    </tr>
    <tr class="Table__TR" style="display:none">
      <td><a class="AnchorLink" href="/nfl/player/_/id/222/jane-roe">Jane Roe</a>
          <span class="playerinfo__playerteam">sf</span></td>
    </tr>
    <tr class="pncPlayerRow">
      <td><a href="/nfl/player/_/id/333/jim-poe">Jim Poe</a>
          <span class="player-column__team">DAL</span></td>
    </tr>
  </tbody>
</table>
</body>
</html>"#;

    #[test]
    fn test_find_roster_fragments_unions_and_filters() {
        let document = Html::parse_document(ROSTER_HTML);
        let fragments = find_roster_fragments(&document);

        // Hidden row excluded, both rendering paths included.
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].anchors[0].text, "John Doe");
        assert_eq!(fragments[0].team_abbrev.as_deref(), Some("kc"));
        assert_eq!(fragments[0].image_sources.len(), 1);
        assert_eq!(fragments[1].anchors[0].text, "Jim Poe");
        assert_eq!(fragments[1].team_abbrev.as_deref(), Some("DAL"));
    }

    #[test]
    fn test_rows_matching_both_selectors_counted_once() {
        let html = r#"<table><tbody>
            <tr class="Table__TR pncPlayerRow">
              <td><a href="/nfl/player/john-doe">John Doe</a><span class="playerinfo__playerteam">KC</span></td>
            </tr>
        </tbody></table>"#;
        let document = Html::parse_document(html);
        assert_eq!(find_roster_fragments(&document).len(), 1);
    }

    #[test]
    fn test_find_league_name_skips_placeholder() {
        let document = Html::parse_document(ROSTER_HTML);
        assert_eq!(find_league_name(&document).as_deref(), Some("Dynasty Degens"));
    }

    #[test]
    fn test_find_league_name_absent() {
        let document = Html::parse_document("<html><body></body></html>");
        assert_eq!(find_league_name(&document), None);

        let placeholder_only = r#"<div id="fantasy-nav-container">
            <a href="/football/welcome">Fantasy Football</a></div>"#;
        let document = Html::parse_document(placeholder_only);
        assert_eq!(find_league_name(&document), None);
    }

    #[test]
    fn test_read_team_name() {
        let document = Html::parse_document(ROSTER_HTML);
        assert_eq!(read_team_name(&document).as_deref(), Some("The Crushers"));

        let document = Html::parse_document("<html><body></body></html>");
        assert_eq!(read_team_name(&document), None);
    }

    #[tokio::test]
    async fn test_static_source() {
        let source = StaticSource::new("<html></html>", Some("https://example.com/".to_string()));
        assert_eq!(source.location().as_deref(), Some("https://example.com/"));
        assert_eq!(source.snapshot().await.unwrap(), "<html></html>");
    }
}
