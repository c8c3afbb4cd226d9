//! In-process stand-in for the search engine.
//!
//! Interprets `QueryRequest` with deliberately simple semantics: lowercase
//! whitespace tokens, `AUTO` fuzziness as 0/1/2 edits by term length, phrase
//! prefix as "token sequence whose last token is a prefix", exact term filters
//! and a title-based phrase suggester.

#![allow(dead_code)]

use async_trait::async_trait;
use searchfront::catalog::Document;
use searchfront::engine::{
    EngineInfo, EngineVersion, RawHit, RawHits, RawSearchResponse, RawSuggestion,
    RawSuggestionOption, SearchBackend,
};
use searchfront::error::EngineError;
use searchfront::query::{
    Fuzziness, MatchType, MultiMatch, QueryClause, QueryRequest, TermFilter,
};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub struct MemoryEngine {
    documents: Mutex<Vec<Map<String, Value>>>,
    queries: AtomicUsize,
    reachable: bool,
}

impl MemoryEngine {
    pub fn new() -> Self {
        Self {
            documents: Mutex::new(Vec::new()),
            queries: AtomicUsize::new(0),
            reachable: true,
        }
    }

    pub fn unreachable() -> Self {
        Self {
            reachable: false,
            ..Self::new()
        }
    }

    pub fn with_documents(documents: &[Document]) -> Self {
        let engine = Self::new();
        for document in documents {
            engine.index(document);
        }
        engine
    }

    pub fn index(&self, document: &Document) {
        let value = serde_json::to_value(document).expect("document serializes");
        let Value::Object(map) = value else {
            panic!("document is not an object")
        };
        self.documents.lock().unwrap().push(map);
    }

    /// Number of queries received so far
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SearchBackend for MemoryEngine {
    async fn probe(&self) -> Result<EngineInfo, EngineError> {
        if self.reachable {
            Ok(EngineInfo {
                name: Some("memory".to_string()),
                cluster_name: None,
                version: EngineVersion {
                    number: "0.0.0".to_string(),
                },
            })
        } else {
            Err(EngineError::Status {
                status: 503,
                reason: "engine unreachable".to_string(),
            })
        }
    }

    async fn query(
        &self,
        _index: &str,
        request: &QueryRequest,
    ) -> Result<RawSearchResponse, EngineError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if !self.reachable {
            return Err(EngineError::Status {
                status: 503,
                reason: "engine unreachable".to_string(),
            });
        }

        let documents = self.documents.lock().unwrap();
        let mut hits: Vec<RawHit> = documents
            .iter()
            .enumerate()
            .filter_map(|(id, doc)| {
                let score = score_clause(&request.query, doc)?;
                Some(RawHit {
                    id: Some(id.to_string()),
                    score: Some(score),
                    source: doc.clone(),
                })
            })
            .collect();
        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap());

        let suggest = request.suggest.as_ref().map(|suggest| {
            let titles: Vec<String> = documents
                .iter()
                .filter_map(|doc| doc.get(suggest.phrase.field)?.as_str().map(String::from))
                .collect();
            let options = suggest_phrase(&suggest.text, &titles)
                .map(|text| RawSuggestionOption {
                    highlighted: Some(format!(
                        "{}{}{}",
                        suggest.phrase.highlight.pre_tag, text, suggest.phrase.highlight.post_tag
                    )),
                    text,
                    score: Some(0.5),
                })
                .into_iter()
                .collect();
            let mut map = HashMap::new();
            map.insert(
                suggest.name.to_string(),
                vec![RawSuggestion {
                    text: suggest.text.clone(),
                    options,
                }],
            );
            map
        });

        Ok(RawSearchResponse {
            hits: RawHits { hits },
            suggest,
        })
    }
}

fn tokens(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn field_text(doc: &Map<String, Value>, field: &str) -> String {
    match doc.get(field) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(" "),
        _ => String::new(),
    }
}

fn score_clause(clause: &QueryClause, doc: &Map<String, Value>) -> Option<f64> {
    match clause {
        QueryClause::MultiMatch(m) => score_multi_match(m, doc),
        QueryClause::Bool(b) => {
            if !b.filter.iter().all(|f| term_matches(f, doc)) {
                return None;
            }
            b.must
                .iter()
                .map(|c| score_clause(c, doc))
                .sum::<Option<f64>>()
        }
    }
}

fn term_matches(filter: &TermFilter, doc: &Map<String, Value>) -> bool {
    match doc.get(filter.field) {
        Some(Value::String(s)) => *s == filter.value,
        Some(Value::Array(items)) => items.iter().any(|v| v.as_str() == Some(filter.value.as_str())),
        _ => false,
    }
}

fn score_multi_match(m: &MultiMatch, doc: &Map<String, Value>) -> Option<f64> {
    let query = tokens(&m.query);
    let mut best = 0.0_f64;

    for field in &m.fields {
        let field_tokens = tokens(&field_text(doc, field.field));
        let boost = f64::from(field.boost.unwrap_or(1));
        let score = if m.match_type == Some(MatchType::PhrasePrefix) {
            if phrase_prefix_matches(&query, &field_tokens) {
                1.0
            } else {
                0.0
            }
        } else {
            let prefix_length = m.prefix_length.unwrap_or(0) as usize;
            query
                .iter()
                .filter(|q| {
                    field_tokens.iter().any(|t| {
                        term_matches_fuzzy(q, t, m.fuzziness.is_some(), prefix_length)
                    })
                })
                .count() as f64
        };
        best = best.max(score * boost);
    }

    (best > 0.0).then_some(best)
}

fn phrase_prefix_matches(query: &[String], field: &[String]) -> bool {
    let Some((last, head)) = query.split_last() else {
        return false;
    };
    (0..field.len()).any(|start| {
        let rest = &field[start..];
        rest.len() > head.len()
            && rest[..head.len()] == *head
            && rest[head.len()].starts_with(last.as_str())
    })
}

fn auto_distance(term: &str) -> usize {
    match term.chars().count() {
        0..=2 => 0,
        3..=5 => 1,
        _ => 2,
    }
}

fn term_matches_fuzzy(query: &str, term: &str, fuzzy: bool, prefix_length: usize) -> bool {
    if query == term {
        return true;
    }
    if !fuzzy {
        return false;
    }
    let q: Vec<char> = query.chars().collect();
    let t: Vec<char> = term.chars().collect();
    if q.len() < prefix_length || t.len() < prefix_length || q[..prefix_length] != t[..prefix_length] {
        return false;
    }
    levenshtein(&q, &t) <= auto_distance(query)
}

fn levenshtein(a: &[char], b: &[char]) -> usize {
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.iter().enumerate() {
        let mut cur = vec![i + 1; b.len() + 1];
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            cur[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(cur[j] + 1);
        }
        prev = cur;
    }
    prev[b.len()]
}

/// Replace each misspelled token with its closest title token, if any
fn suggest_phrase(text: &str, titles: &[String]) -> Option<String> {
    let vocabulary: Vec<String> = titles.iter().flat_map(|t| tokens(t)).collect();
    let mut changed = false;
    let corrected: Vec<String> = tokens(text)
        .into_iter()
        .map(|token| {
            if vocabulary.contains(&token) {
                return token;
            }
            let chars: Vec<char> = token.chars().collect();
            let closest = vocabulary
                .iter()
                .map(|v| (levenshtein(&chars, &v.chars().collect::<Vec<_>>()), v))
                .filter(|(d, _)| *d <= 2)
                .min_by_key(|(d, _)| *d);
            match closest {
                Some((_, v)) => {
                    changed = true;
                    v.clone()
                }
                None => token,
            }
        })
        .collect();
    changed.then(|| corrected.join(" "))
}

/// Fixture from the acceptance scenarios
pub fn tomato_sauce() -> Document {
    Document {
        id: Some(1),
        title: Some("Organic Tomato Sauce".to_string()),
        content: Some("Slow-cooked sauce made from sun-ripened tomatoes".to_string()),
        description: Some("Glass jar, 500g".to_string()),
        keywords: Some("pasta sauce tomato".to_string()),
        language: Some("en".to_string()),
        brand: Some("Pro Nature".to_string()),
        ..Default::default()
    }
}

pub fn catalog() -> Vec<Document> {
    vec![
        tomato_sauce(),
        Document {
            id: Some(2),
            title: Some("Sauce tomate biologique".to_string()),
            content: Some("Sauce mijotée à partir de tomates mûries au soleil".to_string()),
            keywords: Some("sauce tomate pâtes".to_string()),
            language: Some("fr".to_string()),
            brand: Some("Bio Soleil".to_string()),
            tags: vec!["bio".to_string()],
            ..Default::default()
        },
        Document {
            id: Some(3),
            title: Some("Extra Virgin Olive Oil".to_string()),
            content: Some("Cold pressed olive oil".to_string()),
            keywords: Some("oil olive cooking".to_string()),
            language: Some("en".to_string()),
            brand: Some("Pro Nature".to_string()),
            price_note: Some("per litre".to_string()),
            ..Default::default()
        },
    ]
}
