//! Catalog query composition.
//!
//! [`compose`] turns a [`FilterState`] into a [`CatalogQuery`]: a conjunction
//! of constraints plus the one sort order the catalog supports.
//!
//! ```text
//! published = true                       (always)
//!   AND type = ?                          (if set)
//!   AND status = ?                        (if set)
//!   AND medium = ?                        (if set)
//!   AND year = ?                          (if set)
//!   AND title ILIKE '%search%'            (if set)
//! ORDER BY created_at DESC
//! ```
//!
//! Repositories may translate the query into whatever their backend speaks.
//! [`CatalogQuery::matches`] and [`CatalogQuery::apply`] are the reference
//! semantics every backend must agree with.

use crate::catalog::{Artwork, ArtworkStatus, ArtworkType};
use crate::filter::{Facet, FilterState};
use std::cmp::Reverse;
use std::fmt;
use tracing::debug;

/// One conjunct of a catalog predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    Published,
    TypeEq(ArtworkType),
    StatusEq(ArtworkStatus),
    MediumEq(String),
    YearEq(i32),
    /// Case-insensitive substring match on the title.
    TitleContains(String),
}

impl Constraint {
    pub fn matches(&self, artwork: &Artwork) -> bool {
        match self {
            Constraint::Published => artwork.published,
            Constraint::TypeEq(t) => artwork.kind == *t,
            Constraint::StatusEq(s) => artwork.status == *s,
            Constraint::MediumEq(m) => artwork.medium.as_deref() == Some(m.as_str()),
            Constraint::YearEq(y) => artwork.year == Some(*y),
            Constraint::TitleContains(needle) => {
                artwork.title.to_lowercase().contains(&needle.to_lowercase())
            }
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::Published => write!(f, "published = true"),
            Constraint::TypeEq(t) => write!(f, "type = {}", t.as_str()),
            Constraint::StatusEq(s) => write!(f, "status = {}", s.as_str()),
            Constraint::MediumEq(m) => write!(f, "medium = {m:?}"),
            Constraint::YearEq(y) => write!(f, "year = {y}"),
            Constraint::TitleContains(q) => write!(f, "title ilike {:?}", format!("%{q}%")),
        }
    }
}

/// Result ordering. Newest first is the only order the catalog exposes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    CreatedAtDesc,
}

/// Conjunction of constraints. Always contains [`Constraint::Published`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    constraints: Vec<Constraint>,
}

impl Predicate {
    /// The implicit base predicate: published artworks only.
    pub fn published() -> Self {
        Self {
            constraints: vec![Constraint::Published],
        }
    }

    pub fn and(mut self, constraint: Constraint) -> Self {
        if !self.constraints.contains(&constraint) {
            self.constraints.push(constraint);
        }
        self
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn matches(&self, artwork: &Artwork) -> bool {
        self.constraints.iter().all(|c| c.matches(artwork))
    }
}

impl Default for Predicate {
    fn default() -> Self {
        Self::published()
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, c) in self.constraints.iter().enumerate() {
            if i > 0 {
                f.write_str(" AND ")?;
            }
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

/// A composed catalog read: what to match and how to order it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub predicate: Predicate,
    pub order: SortOrder,
}

impl CatalogQuery {
    pub fn matches(&self, artwork: &Artwork) -> bool {
        self.predicate.matches(artwork)
    }

    /// Filter and order an in-memory collection.
    pub fn apply<'a, I>(&self, artworks: I) -> Vec<Artwork>
    where
        I: IntoIterator<Item = &'a Artwork>,
    {
        let mut rows: Vec<Artwork> = artworks
            .into_iter()
            .filter(|a| self.matches(a))
            .cloned()
            .collect();
        self.sort(&mut rows);
        rows
    }

    pub fn sort(&self, rows: &mut [Artwork]) {
        match self.order {
            // Stable, so equal timestamps keep catalog order.
            SortOrder::CreatedAtDesc => rows.sort_by_key(|a| Reverse(a.created_at)),
        }
    }
}

/// Compose the catalog query for a filter state.
pub fn compose(state: &FilterState) -> CatalogQuery {
    let mut predicate = Predicate::published();
    for facet in Facet::ALL {
        let constraint = match facet {
            Facet::Type => state.kind().map(Constraint::TypeEq),
            Facet::Status => state.status().map(Constraint::StatusEq),
            Facet::Medium => state.medium().map(|m| Constraint::MediumEq(m.to_string())),
            Facet::Year => state.year().map(Constraint::YearEq),
            Facet::Search => state
                .search()
                .map(|q| Constraint::TitleContains(q.to_string())),
        };
        if let Some(c) = constraint {
            predicate = predicate.and(c);
        }
    }
    debug!(%predicate, "composed catalog predicate");
    CatalogQuery {
        predicate,
        order: SortOrder::CreatedAtDesc,
    }
}
