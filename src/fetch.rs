//! "Latest predicate wins" tracking for catalog fetches.
//!
//! Every filter change issues a new [`FetchTicket`]. Responses may arrive in
//! any order; only the response carrying the most recently issued ticket is
//! applied. Older responses are discarded on arrival. Nothing is cancelled
//! in flight.
//!
//! ```text
//! issue(q1) -> t1        state: Loading
//! issue(q2) -> t2        state: Loading
//! complete(t1, rows)     Stale    (discarded)
//! complete(t2, rows)     Applied  state: Ready(rows) | Empty
//! ```
//!
//! A failed fetch lands in the same empty state as a zero-match result. The
//! `failed` flag keeps the two apart for callers that want to tell them
//! apart, but the rendered view is the same.

use crate::catalog::Artwork;
use crate::query::CatalogQuery;
use crate::repository::RepositoryError;
use tracing::{debug, warn};

/// Handle for one outstanding catalog fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    query: CatalogQuery,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The query this fetch should run.
    pub fn query(&self) -> &CatalogQuery {
        &self.query
    }
}

/// What the result area of a catalog view shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultState {
    Loading,
    Ready(Vec<Artwork>),
    /// "No artworks match your filters". `failed` is set when the fetch
    /// itself failed rather than matching nothing.
    Empty { failed: bool },
}

impl ResultState {
    pub fn artworks(&self) -> &[Artwork] {
        match self {
            ResultState::Ready(rows) => rows,
            _ => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ResultState::Loading)
    }
}

/// Whether a completed response was used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied,
    Stale,
}

#[derive(Debug)]
pub struct FetchTracker {
    latest: u64,
    state: ResultState,
}

impl Default for FetchTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchTracker {
    pub fn new() -> Self {
        Self {
            latest: 0,
            state: ResultState::Loading,
        }
    }

    /// Start a fetch for `query`, superseding any outstanding one.
    pub fn issue(&mut self, query: CatalogQuery) -> FetchTicket {
        self.latest += 1;
        self.state = ResultState::Loading;
        debug!(generation = self.latest, predicate = %query.predicate, "issued catalog fetch");
        FetchTicket {
            generation: self.latest,
            query,
        }
    }

    /// Deliver the response for `ticket`.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        response: Result<Vec<Artwork>, RepositoryError>,
    ) -> FetchOutcome {
        if ticket.generation != self.latest {
            debug!(
                generation = ticket.generation,
                latest = self.latest,
                "discarding stale catalog response"
            );
            return FetchOutcome::Stale;
        }

        self.state = match response {
            Ok(rows) if rows.is_empty() => ResultState::Empty { failed: false },
            Ok(rows) => ResultState::Ready(rows),
            Err(e) => {
                warn!(error = %e, "catalog fetch failed, showing empty state");
                ResultState::Empty { failed: true }
            }
        };
        FetchOutcome::Applied
    }

    pub fn state(&self) -> &ResultState {
        &self.state
    }

    /// True while the latest issued fetch has not completed.
    pub fn is_pending(&self) -> bool {
        self.state.is_loading()
    }

    pub fn latest_generation(&self) -> u64 {
        self.latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ArtworkStatus;
    use crate::filter::{FacetValue, FilterState};
    use crate::query::compose;
    use crate::test_helpers::*;

    #[test]
    fn starts_loading() {
        let tracker = FetchTracker::new();
        assert!(tracker.state().is_loading());
        assert_eq!(tracker.latest_generation(), 0);
    }

    #[test]
    fn latest_response_applied() {
        let mut tracker = FetchTracker::new();
        let ticket = tracker.issue(compose(&FilterState::new()));
        let rows = vec![artwork("a1", "one", "One")];
        assert_eq!(tracker.complete(ticket, Ok(rows.clone())), FetchOutcome::Applied);
        assert_eq!(tracker.state(), &ResultState::Ready(rows));
        assert!(!tracker.is_pending());
    }

    #[test]
    fn stale_response_discarded_even_when_late() {
        let mut tracker = FetchTracker::new();
        let first = tracker.issue(compose(&FilterState::new()));
        let second = tracker.issue(compose(
            &FilterState::new().with(FacetValue::Status(ArtworkStatus::Sold)),
        ));

        let fresh = vec![artwork("a2", "two", "Two")];
        assert_eq!(tracker.complete(second, Ok(fresh.clone())), FetchOutcome::Applied);

        let stale = vec![artwork("a1", "one", "One")];
        assert_eq!(tracker.complete(first, Ok(stale)), FetchOutcome::Stale);
        assert_eq!(tracker.state(), &ResultState::Ready(fresh));
    }

    #[test]
    fn stale_response_before_latest_keeps_loading() {
        let mut tracker = FetchTracker::new();
        let first = tracker.issue(compose(&FilterState::new()));
        let _second = tracker.issue(compose(&FilterState::new()));
        assert_eq!(tracker.complete(first, Ok(vec![])), FetchOutcome::Stale);
        assert!(tracker.is_pending());
    }

    #[test]
    fn zero_matches_is_empty_not_failed() {
        let mut tracker = FetchTracker::new();
        let ticket = tracker.issue(compose(&FilterState::new()));
        tracker.complete(ticket, Ok(vec![]));
        assert_eq!(tracker.state(), &ResultState::Empty { failed: false });
    }

    #[test]
    fn failure_lands_in_empty_state() {
        let mut tracker = FetchTracker::new();
        let ticket = tracker.issue(compose(&FilterState::new()));
        let outcome = tracker.complete(ticket, Err(RepositoryError::Backend("timeout".into())));
        assert_eq!(outcome, FetchOutcome::Applied);
        assert_eq!(tracker.state(), &ResultState::Empty { failed: true });
        assert!(tracker.state().artworks().is_empty());
    }

    #[test]
    fn ticket_carries_its_query() {
        let mut tracker = FetchTracker::new();
        let query = compose(&FilterState::new().with(FacetValue::Year(2001)));
        let ticket = tracker.issue(query.clone());
        assert_eq!(ticket.query(), &query);
        assert_eq!(ticket.generation(), 1);
    }
}
