//! Catalog read contract and the in-memory implementation.
//!
//! Components never reach for a global client: each one is handed a
//! `&dyn CatalogRepository` (or a generic `R: CatalogRepository`) when it is
//! built. The hosting application supplies the real backend; this crate ships
//! [`InMemoryCatalog`], loadable from a JSON catalog file:
//!
//! ```json
//! {
//!   "artworks": [
//!     { "id": "a1", "slug": "harbour-at-dusk", "title": "Harbour at Dusk",
//!       "type": "original", "status": "available", "price_cents": 240000,
//!       "created_at": "2024-05-02T10:00:00Z", "published": true }
//!   ],
//!   "editions": [
//!     { "id": "e1", "artwork_id": "a2", "label": "A3 Giclée",
//!       "edition_size": 50, "remaining": 12, "price_cents": 18000, "sku": "GW-A3" }
//!   ]
//! }
//! ```
//!
//! ## Contract
//!
//! - Results of [`CatalogRepository::find_artworks`] satisfy the query's
//!   predicate exactly and are ordered by it.
//! - Unpublished artworks are never returned, by any read.
//! - [`CatalogRepository::find_by_slug`] returns `Ok(None)` for unknown or
//!   unpublished slugs.

use crate::catalog::{Artwork, ArtworkId, ArtworkType, Edition};
use crate::query::CatalogQuery;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid catalog: {0}")]
    Invalid(String),
    #[error("Catalog backend error: {0}")]
    Backend(String),
}

/// Read-only access to the stored catalog.
pub trait CatalogRepository {
    /// Published artworks matching `query`, in the query's order.
    fn find_artworks(&self, query: &CatalogQuery) -> Result<Vec<Artwork>, RepositoryError>;

    /// A single published artwork by slug.
    fn find_by_slug(&self, slug: &str) -> Result<Option<Artwork>, RepositoryError>;

    /// Editions owned by an artwork, in catalog order.
    fn editions_for(&self, artwork_id: &ArtworkId) -> Result<Vec<Edition>, RepositoryError>;
}

/// On-disk catalog file layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogFile {
    #[serde(default)]
    pub artworks: Vec<Artwork>,
    #[serde(default)]
    pub editions: Vec<Edition>,
}

impl CatalogFile {
    /// Check the data-model invariants the core relies on.
    pub fn validate(&self) -> Result<(), RepositoryError> {
        let mut ids = HashSet::new();
        let mut slugs = HashSet::new();
        for art in &self.artworks {
            if !ids.insert(&art.id) {
                return Err(RepositoryError::Invalid(format!(
                    "duplicate artwork id {}",
                    art.id
                )));
            }
            if !slugs.insert(art.slug.as_str()) {
                return Err(RepositoryError::Invalid(format!(
                    "duplicate slug {}",
                    art.slug
                )));
            }
        }

        let mut edition_ids = HashSet::new();
        for ed in &self.editions {
            if !edition_ids.insert(&ed.id) {
                return Err(RepositoryError::Invalid(format!(
                    "duplicate edition id {}",
                    ed.id
                )));
            }
            if ed.remaining > ed.edition_size {
                return Err(RepositoryError::Invalid(format!(
                    "edition {} has {} remaining of {}",
                    ed.id, ed.remaining, ed.edition_size
                )));
            }
            let owner = self.artworks.iter().find(|a| a.id == ed.artwork_id);
            match owner {
                Some(a) if a.kind == ArtworkType::Print => {}
                Some(a) => {
                    return Err(RepositoryError::Invalid(format!(
                        "edition {} belongs to non-print artwork {}",
                        ed.id, a.id
                    )));
                }
                None => {
                    return Err(RepositoryError::Invalid(format!(
                        "edition {} references unknown artwork {}",
                        ed.id, ed.artwork_id
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Catalog held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    artworks: Vec<Artwork>,
    editions: Vec<Edition>,
}

impl InMemoryCatalog {
    pub fn new(artworks: Vec<Artwork>, editions: Vec<Edition>) -> Self {
        Self { artworks, editions }
    }

    /// Load and validate a JSON catalog file.
    pub fn load(path: &Path) -> Result<Self, RepositoryError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self, RepositoryError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        file.validate()?;
        Ok(Self::from(file))
    }

    /// Every stored artwork, published or not.
    pub fn artworks(&self) -> &[Artwork] {
        &self.artworks
    }

    pub fn editions(&self) -> &[Edition] {
        &self.editions
    }
}

impl From<CatalogFile> for InMemoryCatalog {
    fn from(file: CatalogFile) -> Self {
        Self::new(file.artworks, file.editions)
    }
}

impl CatalogRepository for InMemoryCatalog {
    fn find_artworks(&self, query: &CatalogQuery) -> Result<Vec<Artwork>, RepositoryError> {
        Ok(query.apply(&self.artworks))
    }

    fn find_by_slug(&self, slug: &str) -> Result<Option<Artwork>, RepositoryError> {
        Ok(self
            .artworks
            .iter()
            .find(|a| a.published && a.slug == slug)
            .cloned())
    }

    fn editions_for(&self, artwork_id: &ArtworkId) -> Result<Vec<Edition>, RepositoryError> {
        Ok(self
            .editions
            .iter()
            .filter(|e| &e.artwork_id == artwork_id)
            .cloned()
            .collect())
    }
}

impl<R: CatalogRepository + ?Sized> CatalogRepository for &R {
    fn find_artworks(&self, query: &CatalogQuery) -> Result<Vec<Artwork>, RepositoryError> {
        (**self).find_artworks(query)
    }

    fn find_by_slug(&self, slug: &str) -> Result<Option<Artwork>, RepositoryError> {
        (**self).find_by_slug(slug)
    }

    fn editions_for(&self, artwork_id: &ArtworkId) -> Result<Vec<Edition>, RepositoryError> {
        (**self).editions_for(artwork_id)
    }
}
