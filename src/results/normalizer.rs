//! Raw engine response to [`SearchResponse`]

use super::types::{ResultItem, SearchResponse};
use crate::engine::{RawHit, RawSearchResponse};
use crate::query::SUGGESTION_NAME;

/// Flatten hits in engine order. The suggestion is only read back when
/// `with_suggestion` is set (spelling correction).
pub fn normalize(raw: RawSearchResponse, with_suggestion: bool) -> SearchResponse {
    let suggestion = if with_suggestion {
        suggestion(&raw)
    } else {
        None
    };

    SearchResponse {
        results: raw.hits.hits.into_iter().map(flatten_hit).collect(),
        suggestion,
    }
}

fn flatten_hit(hit: RawHit) -> ResultItem {
    ResultItem {
        score: hit.score.unwrap_or_default(),
        attributes: hit.source,
    }
}

/// First option of the first suggestion entry, if any
fn suggestion(raw: &RawSearchResponse) -> Option<String> {
    raw.suggest
        .as_ref()?
        .get(SUGGESTION_NAME)?
        .first()?
        .options
        .first()
        .map(|option| option.text.clone())
}
