//! Visibility predicate for rendered DOM nodes.
//!
//! Works over static HTML snapshots, so it reads inline attributes rather
//! than computed layout. A node with no rendered content is treated the same
//! as an absent node: not yet ready.

use scraper::{ElementRef, Selector};

/// Decide whether a node is meaningfully visible to a user.
///
/// False when the node or any ancestor is hidden (the `hidden` attribute,
/// `aria-hidden="true"`, or an inline `display:none`/`visibility:hidden`),
/// when the node itself is fully transparent, or when it renders no content
/// (no non-whitespace text and no images).
pub fn is_visible(element: ElementRef) -> bool {
    if style_declares(inline_style(element), "opacity", "0") {
        return false;
    }

    for node in element.ancestors().filter_map(ElementRef::wrap).chain(Some(element)) {
        let value = node.value();
        if value.attr("hidden").is_some() {
            return false;
        }
        if value.attr("aria-hidden") == Some("true") {
            return false;
        }
        let style = inline_style(node);
        if style_declares(style, "display", "none") || style_declares(style, "visibility", "hidden")
        {
            return false;
        }
    }

    has_rendered_content(element)
}

fn inline_style(element: ElementRef) -> &str {
    element.value().attr("style").unwrap_or("")
}

/// Check an inline style attribute for an exact property:value declaration.
fn style_declares(style: &str, property: &str, expected: &str) -> bool {
    style.split(';').any(|declaration| {
        let mut parts = declaration.splitn(2, ':');
        let prop = parts.next().unwrap_or("").trim();
        let value = parts.next().unwrap_or("").trim();
        prop.eq_ignore_ascii_case(property) && value.eq_ignore_ascii_case(expected)
    })
}

fn has_rendered_content(element: ElementRef) -> bool {
    if element.text().any(|t| !t.trim().is_empty()) {
        return true;
    }
    let img_selector = Selector::parse("img").unwrap();
    element.select(&img_selector).next().is_some()
}
