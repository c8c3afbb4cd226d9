//! Query construction per search mode
//!
//! Every builder is a pure function of its validated inputs; the field list
//! each one targets comes from [`SearchMode::fields`], never from the caller.

use super::mode::{SearchInputs, SearchMode, ValidatedInputs};
use super::request::*;
use crate::error::ValidationError;

/// Name under which the spelling suggestion is requested and read back
pub const SUGGESTION_NAME: &str = "simple_phrase";

/// Field the phrase suggester draws corrections from
pub const SUGGESTION_FIELD: &str = "title";

/// Validate `inputs` for `mode` and build its query
pub fn build(mode: SearchMode, inputs: &SearchInputs) -> Result<QueryRequest, ValidationError> {
    let handler = mode.handler();
    let validated = (handler.validate)(inputs)?;
    Ok((handler.build)(&validated))
}

fn multi_match(mode: SearchMode, text: &str) -> MultiMatch {
    MultiMatch::new(text, mode.fields())
}

pub(crate) fn basic(inputs: &ValidatedInputs) -> QueryRequest {
    QueryRequest::new(QueryClause::MultiMatch(multi_match(
        SearchMode::Basic,
        &inputs.text,
    )))
}

pub(crate) fn fuzzy(inputs: &ValidatedInputs) -> QueryRequest {
    QueryRequest::new(QueryClause::MultiMatch(
        multi_match(SearchMode::Fuzzy, &inputs.text).fuzzy(),
    ))
}

/// Fuzzy match restricted by the validator's term filter (language or brand)
pub(crate) fn filtered(inputs: &ValidatedInputs) -> QueryRequest {
    let must = multi_match(SearchMode::Fuzzy, &inputs.text).fuzzy();
    QueryRequest::new(QueryClause::Bool(BoolQuery {
        must: vec![QueryClause::MultiMatch(must)],
        filter: inputs.filter.iter().cloned().collect(),
    }))
}

pub(crate) fn prefix(inputs: &ValidatedInputs) -> QueryRequest {
    QueryRequest::new(QueryClause::MultiMatch(
        multi_match(SearchMode::PrefixAutocomplete, &inputs.text).phrase_prefix(),
    ))
}

pub(crate) fn multilingual(inputs: &ValidatedInputs) -> QueryRequest {
    QueryRequest::new(QueryClause::MultiMatch(
        multi_match(SearchMode::Multilingual, &inputs.text).fuzzy(),
    ))
    .sorted_by_score()
}

pub(crate) fn spelling_correction(inputs: &ValidatedInputs) -> QueryRequest {
    let matcher = multi_match(SearchMode::SpellingCorrection, &inputs.text)
        .fuzzy()
        .prefix_length(1);

    QueryRequest::new(QueryClause::MultiMatch(matcher)).with_suggest(SuggestRequest {
        text: inputs.text.clone(),
        name: SUGGESTION_NAME,
        phrase: PhraseSuggester {
            field: SUGGESTION_FIELD,
            size: 1,
            gram_size: 3,
            direct_generator: vec![DirectGenerator {
                field: SUGGESTION_FIELD,
                suggest_mode: SuggestMode::Always,
            }],
            highlight: Highlight {
                pre_tag: "<em>",
                post_tag: "</em>",
            },
        },
    })
}
