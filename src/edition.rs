//! Print edition selection.
//!
//! The selector is a read-only view over the editions of one artwork. It
//! starts on the first edition and only ever moves to another edition of the
//! same list. Edition counts are never touched.

use crate::catalog::{ArtworkId, Edition, EditionId, format_price};
use tracing::warn;

#[derive(Debug, Clone, PartialEq)]
pub struct EditionSelector {
    artwork_id: ArtworkId,
    editions: Vec<Edition>,
    selected: usize,
}

impl EditionSelector {
    /// Build a selector over the editions owned by `artwork_id`.
    ///
    /// Editions of other artworks are dropped. Returns `None` when nothing is
    /// left, in which case the selector must not be shown.
    pub fn new(artwork_id: ArtworkId, editions: Vec<Edition>) -> Option<Self> {
        let total = editions.len();
        let editions: Vec<Edition> = editions
            .into_iter()
            .filter(|e| e.artwork_id == artwork_id)
            .collect();
        if editions.len() != total {
            warn!(
                artwork = %artwork_id,
                dropped = total - editions.len(),
                "ignoring editions of other artworks"
            );
        }
        if editions.is_empty() {
            return None;
        }
        Some(Self {
            artwork_id,
            editions,
            selected: 0,
        })
    }

    /// Select the edition with `id`. Unknown ids leave the selection as is.
    pub fn select(&mut self, id: &EditionId) -> bool {
        match self.editions.iter().position(|e| &e.id == id) {
            Some(index) => {
                self.selected = index;
                true
            }
            None => false,
        }
    }

    pub fn current(&self) -> &Edition {
        &self.editions[self.selected]
    }

    pub fn is_selected(&self, id: &EditionId) -> bool {
        &self.current().id == id
    }

    pub fn editions(&self) -> &[Edition] {
        &self.editions
    }

    pub fn artwork_id(&self) -> &ArtworkId {
        &self.artwork_id
    }

    pub fn price_cents(&self) -> u64 {
        self.current().price_cents
    }

    pub fn price_label(&self, currency: &str) -> String {
        format_price(self.current().price_cents, currency)
    }

    pub fn remaining(&self) -> u32 {
        self.current().remaining
    }

    pub fn edition_size(&self) -> u32 {
        self.current().edition_size
    }

    pub fn sku(&self) -> &str {
        &self.current().sku
    }
}
