//! Structured query documents sent to the search engine
//!
//! These types serialize directly into the engine's JSON query DSL.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::fmt;

/// A complete search request body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryRequest {
    pub query: QueryClause,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sort: Vec<SortClause>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_scores: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggest: Option<SuggestRequest>,
}

impl QueryRequest {
    pub fn new(query: QueryClause) -> Self {
        Self {
            query,
            sort: Vec::new(),
            track_scores: None,
            suggest: None,
        }
    }

    /// Order hits by relevance score, highest first
    pub fn sorted_by_score(mut self) -> Self {
        self.sort.push(SortClause::score_desc());
        self.track_scores = Some(true);
        self
    }

    pub fn with_suggest(mut self, suggest: SuggestRequest) -> Self {
        self.suggest = Some(suggest);
        self
    }

    /// Render the request as the engine's JSON body
    pub fn to_body(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

/// Top-level query clause
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryClause {
    MultiMatch(MultiMatch),
    Bool(BoolQuery),
}

/// Full-text match of one query string against several fields
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultiMatch {
    pub query: String,
    pub fields: Vec<FieldBoost>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub match_type: Option<MatchType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuzziness: Option<Fuzziness>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix_length: Option<u32>,
}

impl MultiMatch {
    pub fn new(query: impl Into<String>, fields: &[FieldBoost]) -> Self {
        Self {
            query: query.into(),
            fields: fields.to_vec(),
            match_type: None,
            fuzziness: None,
            prefix_length: None,
        }
    }

    pub fn fuzzy(mut self) -> Self {
        self.fuzziness = Some(Fuzziness::Auto);
        self
    }

    pub fn phrase_prefix(mut self) -> Self {
        self.match_type = Some(MatchType::PhrasePrefix);
        self
    }

    /// Number of leading characters excluded from fuzzy edits
    pub fn prefix_length(mut self, length: u32) -> Self {
        self.prefix_length = Some(length);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    PhrasePrefix,
}

/// Edit-distance tolerance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Fuzziness {
    /// Let the engine scale tolerance with term length
    #[serde(rename = "AUTO")]
    Auto,
}

/// A searchable field with an optional boost weight, rendered as `field^boost`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldBoost {
    pub field: &'static str,
    pub boost: Option<u32>,
}

impl FieldBoost {
    pub const fn plain(field: &'static str) -> Self {
        Self { field, boost: None }
    }

    pub const fn boosted(field: &'static str, boost: u32) -> Self {
        Self {
            field,
            boost: Some(boost),
        }
    }
}

impl fmt::Display for FieldBoost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.boost {
            Some(boost) => write!(f, "{}^{}", self.field, boost),
            None => f.write_str(self.field),
        }
    }
}

impl Serialize for FieldBoost {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Scored `must` clauses combined with non-scoring filters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoolQuery {
    pub must: Vec<QueryClause>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filter: Vec<TermFilter>,
}

/// Exact match on a keyword attribute, rendered as `{"term": {field: value}}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermFilter {
    pub field: &'static str,
    pub value: String,
}

impl TermFilter {
    pub fn new(field: &'static str, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }
}

impl Serialize for TermFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("term", &SingleEntry(self.field, &self.value))?;
        map.end()
    }
}

/// `{key: value}` with a key chosen at runtime
struct SingleEntry<'a, T: Serialize>(&'a str, &'a T);

impl<T: Serialize> Serialize for SingleEntry<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.0, self.1)?;
        map.end()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Desc,
}

/// Sort key, rendered as `{field: {"order": ...}}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortClause {
    pub field: &'static str,
    pub order: SortOrder,
}

impl SortClause {
    pub const fn score_desc() -> Self {
        Self {
            field: "_score",
            order: SortOrder::Desc,
        }
    }
}

impl Serialize for SortClause {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Order {
            order: SortOrder,
        }
        SingleEntry(self.field, &Order { order: self.order }).serialize(serializer)
    }
}

/// Suggestion block: the text to correct plus one named phrase suggester
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestRequest {
    pub text: String,
    pub name: &'static str,
    pub phrase: PhraseSuggester,
}

impl Serialize for SuggestRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Phrase<'a> {
            phrase: &'a PhraseSuggester,
        }
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("text", &self.text)?;
        map.serialize_entry(
            self.name,
            &Phrase {
                phrase: &self.phrase,
            },
        )?;
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhraseSuggester {
    pub field: &'static str,
    pub size: u32,
    pub gram_size: u32,
    pub direct_generator: Vec<DirectGenerator>,
    pub highlight: Highlight,
}

/// Candidate generator feeding the phrase suggester
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectGenerator {
    pub field: &'static str,
    pub suggest_mode: SuggestMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestMode {
    Always,
}

/// Markers wrapped around corrected tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Highlight {
    pub pre_tag: &'static str,
    pub post_tag: &'static str,
}
