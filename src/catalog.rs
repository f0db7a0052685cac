//! Catalog data model.
//!
//! These are the read-only rows the catalog hands back: artworks and the print
//! editions they own. Field names match the catalog JSON file so the types can
//! be deserialized directly.
//!
//! Nothing in this crate mutates an artwork or an edition after loading. In
//! particular `Edition::remaining` is a display count only; there is no
//! reservation or decrement path.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable artwork identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtworkId(pub String);

/// Stable edition identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EditionId(pub String);

impl fmt::Display for ArtworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for EditionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ArtworkId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<&str> for EditionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Original painting or limited-edition print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtworkType {
    Original,
    Print,
}

impl ArtworkType {
    pub const ALL: [ArtworkType; 2] = [ArtworkType::Original, ArtworkType::Print];

    /// Wire value, as used in the query string and catalog file.
    pub fn as_str(self) -> &'static str {
        match self {
            ArtworkType::Original => "original",
            ArtworkType::Print => "print",
        }
    }

    /// Filter button label.
    pub fn label(self) -> &'static str {
        match self {
            ArtworkType::Original => "Originals",
            ArtworkType::Print => "Prints",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }
}

/// Sale status of an artwork.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtworkStatus {
    Available,
    Sold,
    Reserved,
}

impl ArtworkStatus {
    pub const ALL: [ArtworkStatus; 3] = [
        ArtworkStatus::Available,
        ArtworkStatus::Sold,
        ArtworkStatus::Reserved,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ArtworkStatus::Available => "available",
            ArtworkStatus::Sold => "sold",
            ArtworkStatus::Reserved => "reserved",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ArtworkStatus::Available => "Available",
            ArtworkStatus::Sold => "Sold",
            ArtworkStatus::Reserved => "Reserved",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
    Landscape,
    Square,
}

impl Orientation {
    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
            Orientation::Square => "square",
        }
    }
}

/// A catalog entry: one painting or one print design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artwork {
    pub id: ArtworkId,
    /// Unique, addressable slug (`/art/{slug}`)
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub year: Option<i32>,
    /// Free text, e.g. "Oil" or "Oil on linen"
    #[serde(default)]
    pub medium: Option<String>,
    #[serde(default)]
    pub subject: Vec<String>,
    #[serde(default)]
    pub width_in: Option<f64>,
    #[serde(default)]
    pub height_in: Option<f64>,
    #[serde(default)]
    pub width_cm: Option<f64>,
    #[serde(default)]
    pub height_cm: Option<f64>,
    #[serde(default)]
    pub orientation: Option<Orientation>,
    #[serde(default)]
    pub framed: bool,
    #[serde(default)]
    pub description: String,
    pub status: ArtworkStatus,
    #[serde(rename = "type")]
    pub kind: ArtworkType,
    /// Only meaningful while `status` is available.
    #[serde(default)]
    pub price_cents: Option<u64>,
    #[serde(default)]
    pub cover_image_url: Option<String>,
    /// Additional views, in display order.
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub published: bool,
}

impl Artwork {
    /// Full image sequence for the lightbox: cover first (when present),
    /// then the additional views.
    pub fn gallery_images(&self) -> Vec<String> {
        self.cover_image_url
            .iter()
            .chain(self.images.iter())
            .cloned()
            .collect()
    }

    /// Asking price, shown only while the work is available.
    pub fn display_price(&self) -> Option<u64> {
        match self.status {
            ArtworkStatus::Available => self.price_cents,
            _ => None,
        }
    }

    /// `24" × 36" (61 × 91.4 cm)` when both inch dimensions are known.
    pub fn dimensions_label(&self) -> Option<String> {
        let (w, h) = (self.width_in?, self.height_in?);
        let mut label = format!("{}\" × {}\"", format_measure(w), format_measure(h));
        if let (Some(wc), Some(hc)) = (self.width_cm, self.height_cm) {
            label.push_str(&format!(
                " ({} × {} cm)",
                format_measure(wc),
                format_measure(hc)
            ));
        }
        Some(label)
    }
}

/// One priced, limited-quantity print variant of a print artwork.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edition {
    pub id: EditionId,
    pub artwork_id: ArtworkId,
    pub label: String,
    /// Total produced.
    pub edition_size: u32,
    /// Display count, `0 <= remaining <= edition_size`.
    pub remaining: u32,
    pub price_cents: u64,
    pub sku: String,
}

impl Edition {
    /// `3 of 50 remaining`
    pub fn scarcity_label(&self) -> String {
        format!(
            "{} of {} remaining",
            self.remaining.min(self.edition_size),
            self.edition_size
        )
    }

    pub fn is_sold_out(&self) -> bool {
        self.remaining == 0
    }
}

/// Format a price in minor units as whole currency units with thousands
/// separators.
///
/// Cents are shown only when non-zero: `120000` → `$1,200`, `4550` → `$45.50`.
/// Yen has no minor unit, so a JPY amount is already whole: `1200` → `¥1,200`.
pub fn format_price(cents: u64, currency: &str) -> String {
    let symbol = match currency {
        "USD" | "CAD" | "AUD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "JPY" => "¥",
        _ => "",
    };
    let amount = match minor_units(currency) {
        1 => group_thousands(cents),
        per => {
            let whole = group_thousands(cents / per);
            match cents % per {
                0 => whole,
                frac => format!("{whole}.{frac:02}"),
            }
        }
    };
    if symbol.is_empty() {
        format!("{amount} {currency}")
    } else {
        format!("{symbol}{amount}")
    }
}

/// Minor units per major unit of `currency`.
pub fn minor_units(currency: &str) -> u64 {
    match currency {
        "JPY" => 1,
        _ => 100,
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn format_measure(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    #[test]
    fn type_and_status_parse_wire_values() {
        assert_eq!(ArtworkType::parse("print"), Some(ArtworkType::Print));
        assert_eq!(ArtworkType::parse("Print"), None);
        assert_eq!(ArtworkStatus::parse("reserved"), Some(ArtworkStatus::Reserved));
        assert_eq!(ArtworkStatus::parse(""), None);
    }

    #[test]
    fn gallery_images_put_cover_first() {
        let mut art = artwork("a1", "harbour", "Harbour at Dusk");
        art.cover_image_url = Some("cover.jpg".into());
        art.images = vec!["detail.jpg".into(), "frame.jpg".into()];
        assert_eq!(art.gallery_images(), vec!["cover.jpg", "detail.jpg", "frame.jpg"]);
    }

    #[test]
    fn gallery_images_without_cover() {
        let mut art = artwork("a1", "harbour", "Harbour at Dusk");
        art.cover_image_url = None;
        art.images = vec!["detail.jpg".into()];
        assert_eq!(art.gallery_images(), vec!["detail.jpg"]);
    }

    #[test]
    fn display_price_hidden_unless_available() {
        let mut art = artwork("a1", "harbour", "Harbour at Dusk");
        art.price_cents = Some(250_000);
        assert_eq!(art.display_price(), Some(250_000));
        art.status = ArtworkStatus::Sold;
        assert_eq!(art.display_price(), None);
    }

    #[test]
    fn dimensions_label_with_metric() {
        let mut art = artwork("a1", "harbour", "Harbour at Dusk");
        art.width_in = Some(24.0);
        art.height_in = Some(36.0);
        art.width_cm = Some(61.0);
        art.height_cm = Some(91.4);
        assert_eq!(
            art.dimensions_label().as_deref(),
            Some("24\" × 36\" (61 × 91.4 cm)")
        );
    }

    #[test]
    fn dimensions_label_needs_both_inch_values() {
        let mut art = artwork("a1", "harbour", "Harbour at Dusk");
        art.width_in = Some(24.0);
        art.height_in = None;
        assert_eq!(art.dimensions_label(), None);
    }

    #[test]
    fn price_formatting() {
        assert_eq!(format_price(120_000, "USD"), "$1,200");
        assert_eq!(format_price(4_550, "USD"), "$45.50");
        assert_eq!(format_price(123_456_700, "EUR"), "€1,234,567");
        assert_eq!(format_price(9_900, "CHF"), "99 CHF");
        assert_eq!(format_price(0, "USD"), "$0");
    }

    #[test]
    fn yen_has_no_minor_unit() {
        assert_eq!(format_price(1_200, "JPY"), "¥1,200");
        assert_eq!(format_price(45, "JPY"), "¥45");
        assert_eq!(minor_units("JPY"), 1);
        assert_eq!(minor_units("EUR"), 100);
    }

    #[test]
    fn scarcity_label_reads_naturally() {
        let ed = edition("e1", "a1", "Small", 50, 3, 12_000);
        assert_eq!(ed.scarcity_label(), "3 of 50 remaining");
        assert!(!ed.is_sold_out());
    }

    #[test]
    fn artwork_deserializes_from_catalog_json() {
        let json = r#"{
            "id": "a9",
            "slug": "still-life",
            "title": "Still Life",
            "status": "available",
            "type": "original",
            "created_at": "2024-03-01T12:00:00Z",
            "published": true
        }"#;
        let art: Artwork = serde_json::from_str(json).unwrap();
        assert_eq!(art.kind, ArtworkType::Original);
        assert_eq!(art.year, None);
        assert!(art.images.is_empty());
        assert!(art.published);
    }
}
