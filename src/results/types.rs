//! Normalized result types

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One engine hit: its relevance score plus every stored document attribute,
/// flattened into the same record under its original name.
///
/// Attributes are merged over the score, so a document that stores its own
/// `score` attribute is rendered with that value. `score` on this struct is
/// always the engine's relevance score.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResultItem {
    pub score: f64,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Serialize for ResultItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let shadowed = self.attributes.contains_key("score");
        let len = self.attributes.len() + usize::from(!shadowed);

        let mut map = serializer.serialize_map(Some(len))?;
        if !shadowed {
            map.serialize_entry("score", &self.score)?;
        }
        for (name, value) in &self.attributes {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl ResultItem {
    pub fn new(score: f64) -> Self {
        Self {
            score,
            attributes: Map::new(),
        }
    }

    /// Attribute lookup by name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// String attribute lookup by name
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn title(&self) -> Option<&str> {
        self.get_str("title")
    }
}

/// Results of one search, ordered by descending score
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<ResultItem>,
    /// Suggested corrected query (spelling correction only)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub suggestion: Option<String>,
}

impl SearchResponse {
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn titles(&self) -> Vec<&str> {
        self.results.iter().filter_map(ResultItem::title).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_result_item_is_flat() {
        let mut item = ResultItem::new(1.5);
        item.attributes
            .insert("title".to_string(), json!("Organic Tomato Sauce"));
        item.attributes.insert("tags".to_string(), json!(["vegan"]));

        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            json!({"score": 1.5, "title": "Organic Tomato Sauce", "tags": ["vegan"]})
        );
    }

    #[test]
    fn test_stored_score_attribute_is_rendered_once() {
        let mut item = ResultItem::new(2.5);
        item.attributes.insert("title".to_string(), json!("Gift card"));
        item.attributes.insert("score".to_string(), json!("A+"));

        let rendered = serde_json::to_string(&item).unwrap();
        assert_eq!(rendered.matches("\"score\"").count(), 1);
        assert_eq!(
            serde_json::from_str::<Value>(&rendered).unwrap(),
            json!({"score": "A+", "title": "Gift card"})
        );
    }

    #[test]
    fn test_suggestion_omitted_when_absent() {
        let response = SearchResponse::default();
        assert_eq!(serde_json::to_value(&response).unwrap(), json!({"results": []}));

        let response = SearchResponse {
            results: vec![],
            suggestion: Some("tomato".to_string()),
        };
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"results": [], "suggestion": "tomato"})
        );
    }
}
