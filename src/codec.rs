//! Bidirectional mapping between [`FilterState`] and the address bar.
//!
//! Each facet owns exactly one reserved key (`type`, `status`, `medium`,
//! `year`, `search`). Presence of a key is the only encoding of a set facet;
//! unset facets are simply absent.
//!
//! Decoding is total: unknown keys are ignored, values outside a facet's
//! domain (an unparseable `year`, an unknown `type`) degrade to "facet absent",
//! and when a key repeats the first occurrence wins. The round-trip law
//! `decode(&encode(s)) == s` holds for every state.
//!
//! Encoding always emits keys in canonical facet order, so equal states
//! produce identical query strings.

use crate::filter::{Facet, FacetValue, FilterState};
use tracing::{debug, warn};

/// Encode `state` as ordered key/value pairs.
pub fn encode(state: &FilterState) -> Vec<(&'static str, String)> {
    state
        .active()
        .into_iter()
        .map(|value| (value.facet().key(), value.as_query_value()))
        .collect()
}

/// Decode key/value pairs into a filter state.
pub fn decode<I, K, V>(pairs: I) -> FilterState
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut state = FilterState::new();
    let mut seen: Vec<Facet> = Vec::new();

    for (key, value) in pairs {
        let (key, value) = (key.as_ref(), value.as_ref());
        let Some(facet) = Facet::from_key(key) else {
            debug!(key, "ignoring unknown query key");
            continue;
        };
        if seen.contains(&facet) {
            continue;
        }
        seen.push(facet);

        match FacetValue::parse(facet, value) {
            Some(parsed) => state.set(parsed),
            None if value.is_empty() => {}
            None => warn!(facet = %facet, value, "dropping unparseable facet value"),
        }
    }
    state
}

/// Encode `state` as a query string without the leading `?`.
///
/// An empty state encodes to the empty string.
pub fn to_query_string(state: &FilterState) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in encode(state) {
        serializer.append_pair(key, &value);
    }
    serializer.finish()
}

/// Parse a query string (with or without a leading `?`).
pub fn from_query_string(query: &str) -> FilterState {
    let query = query.strip_prefix('?').unwrap_or(query);
    decode(form_urlencoded::parse(query.as_bytes()))
}

/// Page-relative href for `state`: `path` alone when nothing is set.
pub fn href(path: &str, state: &FilterState) -> String {
    let query = to_query_string(state);
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{query}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ArtworkStatus, ArtworkType};

    fn every_facet() -> FilterState {
        FilterState::new()
            .with(FacetValue::Type(ArtworkType::Original))
            .with(FacetValue::Status(ArtworkStatus::Reserved))
            .with(FacetValue::Medium("Oil on linen".into()))
            .with(FacetValue::Year(-12))
            .with(FacetValue::Search("blue & gold?".into()))
    }

    #[test]
    fn print_type_encodes_to_single_pair() {
        let state = FilterState::new().with(FacetValue::Type(ArtworkType::Print));
        assert_eq!(encode(&state), vec![("type", "print".to_string())]);
        assert_eq!(to_query_string(&state), "type=print");

        let decoded = from_query_string("type=print");
        assert_eq!(decoded, state);
        assert_eq!(decoded.status(), None);
        assert_eq!(decoded.medium(), None);
        assert_eq!(decoded.year(), None);
        assert_eq!(decoded.search(), None);
    }

    #[test]
    fn round_trip_through_pairs() {
        let states = [
            FilterState::new(),
            FilterState::new().with(FacetValue::Year(2020)),
            FilterState::new().with(FacetValue::Search(" leading space".into())),
            every_facet(),
        ];
        for state in states {
            assert_eq!(decode(encode(&state)), state);
        }
    }

    #[test]
    fn round_trip_through_query_string() {
        let state = every_facet();
        let query = to_query_string(&state);
        assert_eq!(from_query_string(&query), state);
    }

    #[test]
    fn unset_facets_are_absent() {
        let state = FilterState::new().with(FacetValue::Medium("Charcoal".into()));
        let pairs = encode(&state);
        assert_eq!(pairs.len(), 1);
        assert!(pairs.iter().all(|(_, v)| !v.is_empty()));
    }

    #[test]
    fn canonical_key_order() {
        let keys: Vec<&str> = encode(&every_facet()).into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["type", "status", "medium", "year", "search"]);
    }

    #[test]
    fn unknown_keys_ignored() {
        let state = from_query_string("?utm_source=mail&type=original&page=2");
        assert_eq!(
            state,
            FilterState::new().with(FacetValue::Type(ArtworkType::Original))
        );
    }

    #[test]
    fn bad_year_degrades_to_absent() {
        let state = from_query_string("year=nineteen&status=sold");
        assert_eq!(state.year(), None);
        assert_eq!(state.status(), Some(ArtworkStatus::Sold));
    }

    #[test]
    fn empty_values_degrade_to_absent() {
        assert!(from_query_string("medium=&search=").is_empty());
    }

    #[test]
    fn unknown_type_value_degrades_to_absent() {
        assert!(from_query_string("type=sculpture").is_empty());
    }

    #[test]
    fn first_occurrence_wins() {
        let state = from_query_string("type=print&type=original");
        assert_eq!(state.kind(), Some(ArtworkType::Print));
    }

    #[test]
    fn decode_is_total_over_garbage() {
        let state = from_query_string("&&=&%zz=%&year&==type");
        assert!(state.is_empty());
    }

    #[test]
    fn href_omits_question_mark_when_empty() {
        assert_eq!(href("/gallery", &FilterState::new()), "/gallery");
        let state = FilterState::new().with(FacetValue::Search("red fox".into()));
        assert_eq!(href("/gallery", &state), "/gallery?search=red+fox");
    }
}
