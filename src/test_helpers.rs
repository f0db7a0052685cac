//! Shared test utilities for the catalog test suite.
//!
//! Provides row builders with sensible defaults and a small sample catalog
//! covering every facet value, including one unpublished draft.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let catalog = sample_catalog();
//! let mut art = artwork("a9", "new-work", "New Work");
//! art.status = ArtworkStatus::Sold;
//! ```

use chrono::{TimeZone, Utc};

use crate::catalog::{
    Artwork, ArtworkId, ArtworkStatus, ArtworkType, Edition, EditionId, Orientation,
};
use crate::repository::InMemoryCatalog;

// =========================================================================
// Row builders
// =========================================================================

/// A published, available original with a cover image. Tests override
/// whatever they care about.
pub fn artwork(id: &str, slug: &str, title: &str) -> Artwork {
    Artwork {
        id: ArtworkId::from(id),
        slug: slug.to_string(),
        title: title.to_string(),
        year: Some(2023),
        medium: Some("Oil".to_string()),
        subject: Vec::new(),
        width_in: None,
        height_in: None,
        width_cm: None,
        height_cm: None,
        orientation: None,
        framed: false,
        description: String::new(),
        status: ArtworkStatus::Available,
        kind: ArtworkType::Original,
        price_cents: None,
        cover_image_url: Some(format!("/img/{slug}.jpg")),
        images: Vec::new(),
        tags: Vec::new(),
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        published: true,
    }
}

/// An edition with SKU `SKU-{id}`.
pub fn edition(
    id: &str,
    artwork_id: &str,
    label: &str,
    size: u32,
    remaining: u32,
    price_cents: u64,
) -> Edition {
    Edition {
        id: EditionId::from(id),
        artwork_id: ArtworkId::from(artwork_id),
        label: label.to_string(),
        edition_size: size,
        remaining,
        price_cents,
        sku: format!("SKU-{id}"),
    }
}

fn created(month: u32, day: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, month, day, 9, 0, 0).unwrap()
}

// =========================================================================
// Sample catalog
// =========================================================================

/// Six artworks (five published) and two editions on the print `a2`.
///
/// | id | slug | type | status | medium | year | created |
/// |----|------|------|--------|--------|------|---------|
/// | a1 | harbour-at-dusk | original | available | Oil | 2021 | Mar 10 |
/// | a2 | tidal-study-print | print | available | Gouache | 2022 | May 02 |
/// | a3 | winter-field | original | sold | Charcoal | 2019 | Jan 15 |
/// | a4 | blue-harbour | original | reserved | Oil | 2022 | Jun 20 |
/// | a5 | quiet-morning-print | print | sold | Watercolor | 2020 | Feb 05 |
/// | a6 | draft-study | original | available | Oil | 2024 | Jul 01 (unpublished) |
pub fn sample_catalog() -> InMemoryCatalog {
    let mut a1 = artwork("a1", "harbour-at-dusk", "Harbour at Dusk");
    a1.year = Some(2021);
    a1.price_cents = Some(240_000);
    a1.width_in = Some(24.0);
    a1.height_in = Some(30.0);
    a1.width_cm = Some(61.0);
    a1.height_cm = Some(76.2);
    a1.orientation = Some(Orientation::Portrait);
    a1.description = "Evening light over the *old* harbour.".to_string();
    a1.images = vec!["/img/harbour-detail.jpg".into(), "/img/harbour-wall.jpg".into()];
    a1.tags = vec!["harbour".into(), "evening".into()];
    a1.created_at = created(3, 10);

    let mut a2 = artwork("a2", "tidal-study-print", "Tidal Study");
    a2.kind = ArtworkType::Print;
    a2.medium = Some("Gouache".into());
    a2.year = Some(2022);
    a2.created_at = created(5, 2);

    let mut a3 = artwork("a3", "winter-field", "Winter Field");
    a3.status = ArtworkStatus::Sold;
    a3.medium = Some("Charcoal".into());
    a3.year = Some(2019);
    a3.created_at = created(1, 15);

    let mut a4 = artwork("a4", "blue-harbour", "Blue Harbour");
    a4.status = ArtworkStatus::Reserved;
    a4.year = Some(2022);
    a4.cover_image_url = None;
    a4.created_at = created(6, 20);

    let mut a5 = artwork("a5", "quiet-morning-print", "Quiet Morning");
    a5.kind = ArtworkType::Print;
    a5.status = ArtworkStatus::Sold;
    a5.medium = Some("Watercolor".into());
    a5.year = Some(2020);
    a5.created_at = created(2, 5);

    let mut a6 = artwork("a6", "draft-study", "Draft Study");
    a6.published = false;
    a6.year = Some(2024);
    a6.created_at = created(7, 1);

    InMemoryCatalog::new(
        vec![a1, a2, a3, a4, a5, a6],
        vec![
            edition("e1", "a2", "A4 Giclée", 100, 42, 9_500),
            edition("e2", "a2", "A2 Giclée", 25, 3, 32_000),
        ],
    )
}

// =========================================================================
// Extractors
// =========================================================================

/// Slugs in result order.
pub fn slugs(rows: &[Artwork]) -> Vec<&str> {
    rows.iter().map(|a| a.slug.as_str()).collect()
}
