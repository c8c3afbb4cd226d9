//! Outgoing request and response types

use std::collections::HashMap;

/// HTTP request to be sent to the search engine
#[derive(Debug, Clone)]
pub struct EngineRequest {
    /// Absolute URL to request
    pub url: String,
    /// HTTP method
    pub method: HttpMethod,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Query parameters
    pub params: HashMap<String, String>,
    /// Request body
    pub data: Option<RequestBody>,
}

impl EngineRequest {
    fn with_method(url: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            url: url.into(),
            method,
            headers: HashMap::new(),
            params: HashMap::new(),
            data: None,
        }
    }

    /// Create a GET request
    pub fn get(url: impl Into<String>) -> Self {
        Self::with_method(url, HttpMethod::Get)
    }

    /// Create a HEAD request
    pub fn head(url: impl Into<String>) -> Self {
        Self::with_method(url, HttpMethod::Head)
    }

    /// Create a POST request
    pub fn post(url: impl Into<String>) -> Self {
        Self::with_method(url, HttpMethod::Post)
    }

    /// Create a PUT request
    pub fn put(url: impl Into<String>) -> Self {
        Self::with_method(url, HttpMethod::Put)
    }

    /// Add a header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Add a query parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Add JSON body
    pub fn json(mut self, data: serde_json::Value) -> Self {
        self.data = Some(RequestBody::Json(data));
        self
    }

    /// Add newline-delimited JSON body (bulk API)
    pub fn ndjson(mut self, body: String) -> Self {
        self.data = Some(RequestBody::NdJson(body));
        self
    }
}

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Head,
    Post,
    Put,
}

/// Request body types
#[derive(Debug, Clone)]
pub enum RequestBody {
    Json(serde_json::Value),
    NdJson(String),
}

/// HTTP response from the engine
#[derive(Debug)]
pub struct EngineResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub text: String,
}

impl EngineResponse {
    /// Buffer a live response
    pub async fn read(response: reqwest::Response) -> reqwest::Result<Self> {
        let status = response.status().as_u16();
        Ok(Self {
            status,
            text: response.text().await?,
        })
    }

    /// Parse response as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.text)
    }

    /// Check if response is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let request = EngineRequest::post("http://localhost:9200/documents/_search")
            .header("X-Test", "1")
            .param("refresh", "true")
            .json(serde_json::json!({"query": {"match_all": {}}}));

        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.headers.get("X-Test").map(String::as_str), Some("1"));
        assert_eq!(request.params.get("refresh").map(String::as_str), Some("true"));
        assert!(matches!(request.data, Some(RequestBody::Json(_))));
    }

    #[test]
    fn test_response_status_helpers() {
        let response = EngineResponse {
            status: 404,
            text: String::new(),
        };
        assert!(!response.is_success());
        assert!(response.is_not_found());
    }
}
