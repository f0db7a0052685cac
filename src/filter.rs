//! Canonical filter state for one catalog view.
//!
//! A [`FilterState`] holds at most one value per [`Facet`]. An unset facet means
//! "no constraint", never "match empty", so empty strings are not representable:
//! every setter normalizes an empty medium or search text to "unset".
//!
//! ## Interaction Semantics
//!
//! | Operation | Effect |
//! |-----------|--------|
//! | [`FilterState::toggle`] | Sets the facet, or clears it when the value is already active |
//! | [`FilterState::set`] | Sets the facet, replacing any previous value |
//! | [`FilterState::unset`] | Clears one facet (the "x" on an active-filter chip) |
//! | [`FilterState::submit_search`] | Sets `search` for non-empty text, clears it otherwise |
//! | [`FilterState::clear`] | Resets every facet, including `search` |
//!
//! Selecting a second value for an active facet replaces the first. There is
//! no multi-select within a facet.

use crate::catalog::{ArtworkStatus, ArtworkType};
use std::fmt;

/// Independently filterable attribute of an artwork.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Facet {
    Type,
    Status,
    Medium,
    Year,
    Search,
}

impl Facet {
    /// Every facet, in canonical query-string order.
    pub const ALL: [Facet; 5] = [
        Facet::Type,
        Facet::Status,
        Facet::Medium,
        Facet::Year,
        Facet::Search,
    ];

    /// Reserved query-string key.
    pub fn key(self) -> &'static str {
        match self {
            Facet::Type => "type",
            Facet::Status => "status",
            Facet::Medium => "medium",
            Facet::Year => "year",
            Facet::Search => "search",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A concrete value for one facet.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FacetValue {
    Type(ArtworkType),
    Status(ArtworkStatus),
    Medium(String),
    Year(i32),
    Search(String),
}

impl FacetValue {
    pub fn facet(&self) -> Facet {
        match self {
            FacetValue::Type(_) => Facet::Type,
            FacetValue::Status(_) => Facet::Status,
            FacetValue::Medium(_) => Facet::Medium,
            FacetValue::Year(_) => Facet::Year,
            FacetValue::Search(_) => Facet::Search,
        }
    }

    /// The value as written into the query string.
    pub fn as_query_value(&self) -> String {
        match self {
            FacetValue::Type(t) => t.as_str().to_string(),
            FacetValue::Status(s) => s.as_str().to_string(),
            FacetValue::Medium(m) => m.clone(),
            FacetValue::Year(y) => y.to_string(),
            FacetValue::Search(q) => q.clone(),
        }
    }

    /// Parse a raw query value for `facet`.
    ///
    /// Returns `None` for anything that cannot be a value of that facet:
    /// an empty string, an unknown type/status, or a non-integer year.
    pub fn parse(facet: Facet, raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }
        match facet {
            Facet::Type => ArtworkType::parse(raw).map(FacetValue::Type),
            Facet::Status => ArtworkStatus::parse(raw).map(FacetValue::Status),
            Facet::Medium => Some(FacetValue::Medium(raw.to_string())),
            Facet::Year => raw.trim().parse::<i32>().ok().map(FacetValue::Year),
            Facet::Search => Some(FacetValue::Search(raw.to_string())),
        }
    }

    /// Human-readable label for filter buttons and chips.
    pub fn label(&self) -> String {
        match self {
            FacetValue::Type(t) => t.label().to_string(),
            FacetValue::Status(s) => s.label().to_string(),
            FacetValue::Medium(m) => m.clone(),
            FacetValue::Year(y) => y.to_string(),
            FacetValue::Search(q) => format!("\u{201c}{q}\u{201d}"),
        }
    }
}

/// What the visitor currently wants to see.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    kind: Option<ArtworkType>,
    status: Option<ArtworkStatus>,
    medium: Option<String>,
    year: Option<i32>,
    search: Option<String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, value: FacetValue) -> Self {
        self.set(value);
        self
    }

    pub fn kind(&self) -> Option<ArtworkType> {
        self.kind
    }

    pub fn status(&self) -> Option<ArtworkStatus> {
        self.status
    }

    pub fn medium(&self) -> Option<&str> {
        self.medium.as_deref()
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Current value of a facet, if set.
    pub fn get(&self, facet: Facet) -> Option<FacetValue> {
        match facet {
            Facet::Type => self.kind.map(FacetValue::Type),
            Facet::Status => self.status.map(FacetValue::Status),
            Facet::Medium => self.medium.clone().map(FacetValue::Medium),
            Facet::Year => self.year.map(FacetValue::Year),
            Facet::Search => self.search.clone().map(FacetValue::Search),
        }
    }

    /// True when `value` is the active value of its facet.
    pub fn is_active(&self, value: &FacetValue) -> bool {
        self.get(value.facet()).as_ref() == Some(value)
    }

    /// Set a facet, replacing any previous value.
    pub fn set(&mut self, value: FacetValue) {
        match value {
            FacetValue::Type(t) => self.kind = Some(t),
            FacetValue::Status(s) => self.status = Some(s),
            FacetValue::Medium(m) => self.medium = non_empty(m),
            FacetValue::Year(y) => self.year = Some(y),
            FacetValue::Search(q) => self.search = non_empty(q),
        }
    }

    pub fn unset(&mut self, facet: Facet) {
        match facet {
            Facet::Type => self.kind = None,
            Facet::Status => self.status = None,
            Facet::Medium => self.medium = None,
            Facet::Year => self.year = None,
            Facet::Search => self.search = None,
        }
    }

    /// Select `value`, or clear its facet when it is already the active value.
    pub fn toggle(&mut self, value: FacetValue) {
        if self.is_active(&value) {
            self.unset(value.facet());
        } else {
            self.set(value);
        }
    }

    /// Apply the search box contents: non-empty text sets `search`, empty
    /// text clears it.
    pub fn submit_search(&mut self, text: &str) {
        self.search = non_empty(text.to_string());
    }

    /// Reset to entirely unset.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Active facet values in canonical facet order, for the chip row.
    pub fn active(&self) -> Vec<FacetValue> {
        Facet::ALL.into_iter().filter_map(|f| self.get(f)).collect()
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}
