//! CLI output formatting for catalog listings and detail views.
//!
//! # Entity Display Contract
//!
//! Every artwork follows the same two-level pattern:
//!
//! 1. **Header line**: positional index + title (+ year and medium)
//! 2. **Context lines**: indented `Slug:`, `Type:`, `Price:`, etc.
//!
//! # Output Format
//!
//! ## Browse
//!
//! ```text
//! Gallery /gallery?status=available
//! Filters: status=available
//! 2 works found
//! 001 Tidal Study (2022, Gouache)
//!     Slug: tidal-study-print
//!     Type: print  Status: available
//! 002 Harbour at Dusk (2021, Oil)
//!     Slug: harbour-at-dusk
//!     Type: original  Status: available
//!     Price: $2,400
//! ```
//!
//! ## Show
//!
//! ```text
//! Tidal Study (2022, Gouache)
//!     Slug: tidal-study-print
//!     Type: print  Status: available
//!     Images: 1
//!
//! Editions
//! 001 A4 Giclée (selected)
//!     42 of 100 remaining
//!     Price: $95
//!     SKU: SKU-e1
//! ```
//!
//! # Architecture
//!
//! Each view has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure.

use crate::catalog::{Artwork, format_price};
use crate::fetch::ResultState;
use crate::filter::FilterState;
use crate::inquiry::InquiryDraft;
use crate::render::result_count_label;
use crate::view::ArtworkDetail;
use pulldown_cmark::{Event, Parser, TagEnd};

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `Harbour at Dusk (2021, Oil)`; the parenthetical drops missing parts.
fn artwork_title(artwork: &Artwork) -> String {
    let year = artwork.year.map(|y| y.to_string());
    let parts: Vec<&str> = year
        .as_deref()
        .into_iter()
        .chain(artwork.medium.as_deref())
        .collect();
    if parts.is_empty() {
        artwork.title.clone()
    } else {
        format!("{} ({})", artwork.title, parts.join(", "))
    }
}

fn artwork_context(artwork: &Artwork, currency: &str, depth: usize) -> Vec<String> {
    let pad = indent(depth);
    let mut lines = vec![
        format!("{}Slug: {}", pad, artwork.slug),
        format!(
            "{}Type: {}  Status: {}",
            pad,
            artwork.kind.as_str(),
            artwork.status.as_str()
        ),
    ];
    if let Some(cents) = artwork.display_price() {
        lines.push(format!("{}Price: {}", pad, format_price(cents, currency)));
    }
    lines
}

/// Plain text of a markdown description.
fn markdown_text(markdown: &str) -> String {
    let mut out = String::new();
    for event in Parser::new(markdown) {
        match event {
            Event::Text(text) | Event::Code(text) => out.push_str(&text),
            Event::SoftBreak | Event::HardBreak => out.push(' '),
            Event::End(TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item)
                if !out.is_empty() && !out.ends_with(' ') =>
            {
                out.push(' ')
            }
            _ => {}
        }
    }
    out.trim_end().to_string()
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

// ============================================================================
// Browse
// ============================================================================

/// Active filters as `key=value` pairs in canonical order.
pub fn format_filters(state: &FilterState) -> String {
    if state.is_empty() {
        return "Filters: none".to_string();
    }
    let active: Vec<String> = state
        .active()
        .iter()
        .map(|v| format!("{}={}", v.facet().key(), v.as_query_value()))
        .collect();
    format!("Filters: {}", active.join(" "))
}

pub fn format_browse_output(
    title: &str,
    href: &str,
    filters: &FilterState,
    results: &ResultState,
    currency: &str,
) -> Vec<String> {
    let mut lines = vec![format!("{} {}", title, href), format_filters(filters)];
    match results {
        ResultState::Loading => lines.push("Loading...".to_string()),
        ResultState::Empty { .. } => lines.push("No artworks match your filters".to_string()),
        ResultState::Ready(rows) => {
            lines.push(result_count_label(rows.len()));
            for (i, artwork) in rows.iter().enumerate() {
                lines.push(format!("{} {}", format_index(i + 1), artwork_title(artwork)));
                lines.extend(artwork_context(artwork, currency, 1));
            }
        }
    }
    lines
}

pub fn print_browse_output(
    title: &str,
    href: &str,
    filters: &FilterState,
    results: &ResultState,
    currency: &str,
) {
    for line in format_browse_output(title, href, filters, results, currency) {
        println!("{}", line);
    }
}

// ============================================================================
// Show
// ============================================================================

pub fn format_detail_output(detail: &ArtworkDetail, currency: &str) -> Vec<String> {
    let artwork = detail.artwork();
    let mut lines = vec![artwork_title(artwork)];
    lines.extend(artwork_context(artwork, currency, 1));
    if let Some(size) = artwork.dimensions_label() {
        lines.push(format!("{}Size: {}", indent(1), size));
    }
    if artwork.framed {
        lines.push(format!("{}Framed", indent(1)));
    }
    if !artwork.description.is_empty() {
        lines.push(format!(
            "{}Description: {}",
            indent(1),
            truncate_desc(&markdown_text(&artwork.description), 60)
        ));
    }
    lines.push(format!(
        "{}Images: {}",
        indent(1),
        artwork.gallery_images().len()
    ));
    if !artwork.tags.is_empty() {
        lines.push(format!("{}Tags: {}", indent(1), artwork.tags.join(", ")));
    }

    if let Some(selector) = detail.edition_selector() {
        lines.push(String::new());
        lines.push("Editions".to_string());
        for (i, edition) in selector.editions().iter().enumerate() {
            let marker = if selector.is_selected(&edition.id) {
                " (selected)"
            } else {
                ""
            };
            lines.push(format!("{} {}{}", format_index(i + 1), edition.label, marker));
            lines.push(format!("{}{}", indent(1), edition.scarcity_label()));
            lines.push(format!(
                "{}Price: {}",
                indent(1),
                format_price(edition.price_cents, currency)
            ));
            lines.push(format!("{}SKU: {}", indent(1), edition.sku));
        }
    }
    lines
}

pub fn print_detail_output(detail: &ArtworkDetail, currency: &str) {
    for line in format_detail_output(detail, currency) {
        println!("{}", line);
    }
}

// ============================================================================
// Inquiry
// ============================================================================

pub fn format_inquiry_output(draft: &InquiryDraft) -> Vec<String> {
    let mut lines = vec![format!("Inquiry for {}", draft.artwork_id)];
    if let Some(edition) = &draft.edition_id {
        lines.push(format!("{}Edition: {}", indent(1), edition));
    }
    lines.push(format!("{}From: {} <{}>", indent(1), draft.name, draft.email));
    if let Some(country) = &draft.country {
        lines.push(format!("{}Country: {}", indent(1), country));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::EditionId;
    use crate::codec;
    use crate::test_helpers::*;

    // =========================================================================
    // Helper tests
    // =========================================================================

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(120), "120");
    }

    #[test]
    fn truncate_desc_long() {
        let text = "a".repeat(50);
        assert_eq!(truncate_desc(&text, 40), format!("{}...", "a".repeat(40)));
        assert_eq!(truncate_desc("short", 40), "short");
    }

    #[test]
    fn truncate_desc_respects_char_boundaries() {
        assert_eq!(truncate_desc("ééé", 2), "éé...");
    }

    #[test]
    fn markdown_text_drops_markup() {
        assert_eq!(
            markdown_text("Evening light over the *old* harbour."),
            "Evening light over the old harbour."
        );
        assert_eq!(markdown_text("One.\n\nTwo."), "One. Two.");
    }

    #[test]
    fn artwork_title_skips_missing_parts() {
        let mut art = artwork("a1", "x", "Untitled");
        assert_eq!(artwork_title(&art), "Untitled (2023, Oil)");
        art.medium = None;
        assert_eq!(artwork_title(&art), "Untitled (2023)");
        art.year = None;
        assert_eq!(artwork_title(&art), "Untitled");
    }

    // =========================================================================
    // Browse
    // =========================================================================

    #[test]
    fn browse_lists_results_with_context() {
        let catalog = sample_catalog();
        let state = codec::from_query_string("status=available");
        let rows = crate::query::compose(&state).apply(catalog.artworks());
        let lines = format_browse_output(
            "Gallery",
            "/gallery?status=available",
            &state,
            &ResultState::Ready(rows),
            "USD",
        );
        assert_eq!(
            lines,
            vec![
                "Gallery /gallery?status=available",
                "Filters: status=available",
                "2 works found",
                "001 Tidal Study (2022, Gouache)",
                "    Slug: tidal-study-print",
                "    Type: print  Status: available",
                "002 Harbour at Dusk (2021, Oil)",
                "    Slug: harbour-at-dusk",
                "    Type: original  Status: available",
                "    Price: $2,400",
            ]
        );
    }

    #[test]
    fn browse_empty_state() {
        let lines = format_browse_output(
            "Gallery",
            "/gallery?search=zzz",
            &codec::from_query_string("search=zzz"),
            &ResultState::Empty { failed: false },
            "USD",
        );
        assert_eq!(lines[1], "Filters: search=zzz");
        assert_eq!(lines[2], "No artworks match your filters");
    }

    #[test]
    fn filters_none() {
        assert_eq!(format_filters(&FilterState::new()), "Filters: none");
    }

    // =========================================================================
    // Show
    // =========================================================================

    #[test]
    fn detail_lists_editions_with_selection() {
        let catalog = sample_catalog();
        let mut detail = ArtworkDetail::load(&catalog, "tidal-study-print").unwrap();
        detail.select_edition(&EditionId::from("e2"));
        let lines = format_detail_output(&detail, "USD");
        let editions_at = lines.iter().position(|l| l == "Editions").unwrap();
        assert_eq!(
            &lines[editions_at + 1..],
            &[
                "001 A4 Giclée",
                "    42 of 100 remaining",
                "    Price: $95",
                "    SKU: SKU-e1",
                "002 A2 Giclée (selected)",
                "    3 of 25 remaining",
                "    Price: $320",
                "    SKU: SKU-e2",
            ]
        );
    }

    #[test]
    fn detail_of_original() {
        let catalog = sample_catalog();
        let detail = ArtworkDetail::load(&catalog, "harbour-at-dusk").unwrap();
        let lines = format_detail_output(&detail, "USD");
        assert_eq!(lines[0], "Harbour at Dusk (2021, Oil)");
        assert!(lines.contains(&"    Size: 24\" × 30\" (61 × 76.2 cm)".to_string()));
        assert!(lines.contains(&"    Description: Evening light over the old harbour.".to_string()));
        assert!(lines.contains(&"    Images: 3".to_string()));
        assert!(!lines.contains(&"Editions".to_string()));
    }

    #[test]
    fn inquiry_summary() {
        let draft = InquiryDraft {
            artwork_id: "a2".into(),
            edition_id: Some("e1".into()),
            name: "Lee".into(),
            email: "lee@example.com".into(),
            country: None,
            message: String::new(),
        };
        assert_eq!(
            format_inquiry_output(&draft),
            vec![
                "Inquiry for a2",
                "    Edition: e1",
                "    From: Lee <lee@example.com>",
            ]
        );
    }
}
