//! Catalog views: the filterable gallery and the artwork detail.
//!
//! Each view owns its own state and is handed the catalog repository when it
//! is built. Nothing here is shared between views, and everything is dropped
//! with the view.
//!
//! ## Gallery control flow
//!
//! ```text
//! interaction ─▶ FilterState ─▶ codec::to_query_string ─▶ address bar
//!                     │
//!                     └─▶ query::compose ─▶ FetchTracker::issue ─▶ repository
//!                                                  ▲                   │
//!                                                  └──── complete ◀────┘
//! ```
//!
//! Mutations run the fetch synchronously through the injected repository.
//! Hosts that fetch asynchronously use [`GalleryView::begin_refresh`] and
//! [`GalleryView::deliver`] instead; the tracker discards stale responses
//! either way.

use crate::catalog::{Artwork, ArtworkStatus, ArtworkType, Edition, EditionId};
use crate::codec;
use crate::edition::EditionSelector;
use crate::fetch::{FetchOutcome, FetchTicket, FetchTracker, ResultState};
use crate::filter::{Facet, FacetValue, FilterState};
use crate::inquiry::{ContactForm, InquiryDraft, InquiryError, InquirySink, submit_inquiry};
use crate::lightbox::{KeyOutcome, LightboxError, LightboxKey, LightboxNavigator};
use crate::query::compose;
use crate::repository::{CatalogRepository, RepositoryError};
use thiserror::Error;
use tracing::debug;

/// Which catalog listing is being viewed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CatalogPage {
    /// Everything; no preset.
    #[default]
    Gallery,
    /// Always constrained to a type; defaults to originals.
    Originals,
    /// Always constrained to a type; defaults to prints.
    Prints,
}

impl CatalogPage {
    pub fn path(self) -> &'static str {
        match self {
            CatalogPage::Gallery => "/gallery",
            CatalogPage::Originals => "/originals",
            CatalogPage::Prints => "/prints",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            CatalogPage::Gallery => "Gallery",
            CatalogPage::Originals => "Original Paintings",
            CatalogPage::Prints => "Limited Edition Prints",
        }
    }

    /// The state to redirect to when `state` lacks this page's required facet.
    pub fn required_redirect(self, state: &FilterState) -> Option<FilterState> {
        let preset = match self {
            CatalogPage::Gallery => return None,
            CatalogPage::Originals => ArtworkType::Original,
            CatalogPage::Prints => ArtworkType::Print,
        };
        if state.kind().is_some() {
            return None;
        }
        Some(state.clone().with(FacetValue::Type(preset)))
    }
}

/// The filterable catalog listing.
pub struct GalleryView<R> {
    repo: R,
    page: CatalogPage,
    filters: FilterState,
    search_text: String,
    tracker: FetchTracker,
}

impl<R: CatalogRepository> GalleryView<R> {
    /// Open a listing from the address bar's query string and load it.
    pub fn open(repo: R, page: CatalogPage, query: &str) -> Self {
        let filters = codec::from_query_string(query);
        let search_text = filters.search().unwrap_or_default().to_string();
        let mut view = Self {
            repo,
            page,
            filters,
            search_text,
            tracker: FetchTracker::new(),
        };
        view.changed();
        view
    }

    pub fn page(&self) -> CatalogPage {
        self.page
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Query string for the address bar, without `?`.
    pub fn query_string(&self) -> String {
        codec::to_query_string(&self.filters)
    }

    /// Page-relative href for the current state.
    pub fn href(&self) -> String {
        codec::href(self.page.path(), &self.filters)
    }

    /// Href the filter button for `value` links to.
    pub fn toggle_href(&self, value: &FacetValue) -> String {
        let mut next = self.filters.clone();
        next.toggle(value.clone());
        codec::href(self.page.path(), &self.preset(next))
    }

    /// Href the "x" on an active-filter chip links to.
    pub fn remove_href(&self, facet: Facet) -> String {
        let mut next = self.filters.clone();
        next.unset(facet);
        codec::href(self.page.path(), &self.preset(next))
    }

    pub fn results(&self) -> &ResultState {
        self.tracker.state()
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// True when any facet is set or the search box holds unsubmitted text.
    pub fn has_active_filters(&self) -> bool {
        !self.filters.is_empty() || !self.search_text.is_empty()
    }

    pub fn toggle(&mut self, value: FacetValue) {
        self.filters.toggle(value);
        self.changed();
    }

    pub fn remove(&mut self, facet: Facet) {
        self.filters.unset(facet);
        if facet == Facet::Search {
            self.search_text.clear();
        }
        self.changed();
    }

    /// Typing in the search box; nothing is fetched until submit.
    pub fn set_search_text(&mut self, text: &str) {
        self.search_text = text.to_string();
    }

    pub fn submit_search(&mut self) {
        self.filters.submit_search(&self.search_text);
        self.changed();
    }

    /// "Clear All": every facet and the search box.
    pub fn clear_all(&mut self) {
        self.filters.clear();
        self.search_text.clear();
        self.changed();
    }

    /// The address bar changed underneath the view (back/forward).
    pub fn navigate(&mut self, query: &str) {
        self.filters = codec::from_query_string(query);
        self.search_text = self.filters.search().unwrap_or_default().to_string();
        self.changed();
    }

    /// Issue a fetch for the current filters without running it.
    pub fn begin_refresh(&mut self) -> FetchTicket {
        self.tracker.issue(compose(&self.filters))
    }

    /// Deliver a response obtained for `ticket`.
    pub fn deliver(
        &mut self,
        ticket: FetchTicket,
        response: Result<Vec<Artwork>, RepositoryError>,
    ) -> FetchOutcome {
        self.tracker.complete(ticket, response)
    }

    fn preset(&self, state: FilterState) -> FilterState {
        match self.page.required_redirect(&state) {
            Some(redirected) => redirected,
            None => state,
        }
    }

    fn changed(&mut self) {
        if let Some(redirected) = self.page.required_redirect(&self.filters) {
            debug!(page = ?self.page, "applying page preset");
            self.filters = redirected;
        }
        let ticket = self.begin_refresh();
        let response = self.repo.find_artworks(ticket.query());
        self.deliver(ticket, response);
    }
}

#[derive(Error, Debug)]
pub enum DetailError {
    #[error("artwork not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// One artwork's detail view with its lightbox and edition selector.
#[derive(Debug)]
pub struct ArtworkDetail {
    artwork: Artwork,
    editions: Vec<Edition>,
    selector: Option<EditionSelector>,
    lightbox: Option<LightboxNavigator<String>>,
}

impl ArtworkDetail {
    /// Resolve `slug` to a published artwork and load its editions.
    pub fn load(repo: &dyn CatalogRepository, slug: &str) -> Result<Self, DetailError> {
        let artwork = repo
            .find_by_slug(slug)?
            .filter(|a| a.published)
            .ok_or_else(|| DetailError::NotFound(slug.to_string()))?;
        let editions = repo.editions_for(&artwork.id)?;
        Ok(Self::new(artwork, editions))
    }

    pub fn new(artwork: Artwork, editions: Vec<Edition>) -> Self {
        let selector = match artwork.kind {
            ArtworkType::Print => EditionSelector::new(artwork.id.clone(), editions.clone()),
            ArtworkType::Original => None,
        };
        Self {
            artwork,
            editions,
            selector,
            lightbox: None,
        }
    }

    pub fn artwork(&self) -> &Artwork {
        &self.artwork
    }

    pub fn editions(&self) -> &[Edition] {
        &self.editions
    }

    /// Additional views under the main image, at most `max`.
    pub fn thumbnails(&self, max: usize) -> &[String] {
        let n = self.artwork.images.len().min(max);
        &self.artwork.images[..n]
    }

    /// Open the lightbox on the first image.
    pub fn open_lightbox(&mut self) -> Result<(), LightboxError> {
        self.open_lightbox_at(0)
    }

    /// Open the lightbox on the image a thumbnail shows.
    pub fn open_thumbnail(&mut self, thumbnail: usize) -> Result<(), LightboxError> {
        let offset = usize::from(self.artwork.cover_image_url.is_some());
        self.open_lightbox_at(thumbnail + offset)
    }

    fn open_lightbox_at(&mut self, index: usize) -> Result<(), LightboxError> {
        self.lightbox = Some(LightboxNavigator::open(
            self.artwork.gallery_images(),
            index,
        )?);
        Ok(())
    }

    pub fn lightbox(&self) -> Option<&LightboxNavigator<String>> {
        self.lightbox.as_ref()
    }

    pub fn lightbox_mut(&mut self) -> Option<&mut LightboxNavigator<String>> {
        self.lightbox.as_mut()
    }

    pub fn close_lightbox(&mut self) {
        self.lightbox = None;
    }

    /// Route a key press to the open lightbox, closing it on Escape.
    pub fn handle_key(&mut self, key: LightboxKey) {
        let outcome = self.lightbox.as_mut().map(|lb| lb.handle_key(key));
        if outcome == Some(KeyOutcome::Close) {
            self.close_lightbox();
        }
    }

    /// Only prints with at least one edition get a selector.
    pub fn edition_selector(&self) -> Option<&EditionSelector> {
        self.selector.as_ref()
    }

    pub fn select_edition(&mut self, id: &EditionId) -> bool {
        match self.selector.as_mut() {
            Some(sel) => sel.select(id),
            None => false,
        }
    }

    pub fn selected_edition(&self) -> Option<&Edition> {
        self.selector.as_ref().map(EditionSelector::current)
    }

    /// The inquiry button is offered only for available works.
    pub fn can_inquire(&self) -> bool {
        self.artwork.status == ArtworkStatus::Available
    }

    /// Submit an inquiry for this artwork and the selected edition.
    pub fn inquire(
        &self,
        sink: &dyn InquirySink,
        form: &ContactForm,
    ) -> Result<InquiryDraft, InquiryError> {
        submit_inquiry(sink, &self.artwork, self.selected_edition(), form)
    }
}
