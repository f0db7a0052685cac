//! # Easel Catalog
//!
//! The faceted filter and presentation engine behind an artist's catalog site:
//! originals and limited-edition prints, browsed through a filter bar whose
//! state lives in the address bar, with a detail view that offers an image
//! lightbox, an edition selector, and a purchase inquiry.
//!
//! # Data Flow
//!
//! ```text
//! ?type=print&status=available
//!        │ codec::from_query_string
//!        ▼
//!   FilterState ──toggle / submit_search / clear──▶ FilterState
//!        │ query::compose                              │ codec::to_query_string
//!        ▼                                             ▼
//!   CatalogQuery ──▶ CatalogRepository            address bar
//!                          │ FetchTracker (latest wins)
//!                          ▼
//!                     ResultState ──▶ render / output
//! ```
//!
//! The filter state is the single source of truth. Decoding is total: a
//! malformed query string degrades to fewer active filters, never an error.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`catalog`] | Artwork and edition rows, price and size formatting |
//! | [`filter`] | `Facet`, `FacetValue`, and the canonical `FilterState` |
//! | [`codec`] | Query-string encoding and decoding of `FilterState` |
//! | [`query`] | Composes a `FilterState` into a conjunctive predicate with newest-first order |
//! | [`repository`] | `CatalogRepository` seam and the JSON-backed in-memory catalog |
//! | [`fetch`] | Latest-wins fetch tickets and the loading/ready/empty result state |
//! | [`lightbox`] | Wrap-around image navigator with keyboard handling |
//! | [`edition`] | Print edition selector |
//! | [`inquiry`] | Inquiry draft assembly and the submission seam |
//! | [`view`] | Gallery listing and artwork detail views tying the above together |
//! | [`render`] | Maud HTML fragments and schema.org JSON-LD |
//! | [`config`] | `config.toml` loading, merging onto stock defaults, validation |
//! | [`output`] | CLI text output for listings and details |
//!
//! # Design Decisions
//!
//! ## Closed Facets
//!
//! Facets are an enum, not a string map. Unknown query keys are ignored when
//! decoding, and every consumer (codec, composer, filter bar) matches
//! exhaustively, so adding a facet is a compile error until it is handled
//! everywhere.
//!
//! ## Injected Repository
//!
//! Views receive their repository at construction. The bundled
//! [`repository::InMemoryCatalog`] reads a JSON file; hosts backed by a
//! database implement [`repository::CatalogRepository`] themselves.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/): templates are
//! checked at compile time and every interpolation is escaped.

pub mod catalog;
pub mod codec;
pub mod config;
pub mod edition;
pub mod fetch;
pub mod filter;
pub mod inquiry;
pub mod lightbox;
pub mod output;
pub mod query;
pub mod render;
pub mod repository;
pub mod view;

#[cfg(test)]
pub(crate) mod test_helpers;
