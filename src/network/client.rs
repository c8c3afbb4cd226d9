//! HTTP client for talking to the search engine

use super::request::{EngineRequest, EngineResponse, HttpMethod, RequestBody};
use crate::config::{seconds, OutgoingSettings, ProxySettings};
use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, Proxy};

const NDJSON: &str = "application/x-ndjson";

/// Pooled connection to the engine node, configured from [`OutgoingSettings`]
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new() -> Result<Self> {
        Self::with_settings(&OutgoingSettings::default())
    }

    pub fn with_settings(settings: &OutgoingSettings) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(format!("searchfront/{}", crate::VERSION))
            .default_headers(default_headers(settings)?)
            .timeout(seconds("outgoing.request_timeout", settings.request_timeout)?)
            .pool_max_idle_per_host(settings.pool_maxsize)
            .danger_accept_invalid_certs(!settings.verify_ssl)
            .gzip(true)
            .brotli(true);

        for proxy in proxies(&settings.proxies)? {
            builder = builder.proxy(proxy);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Send `request` and buffer the whole response body
    pub async fn execute(&self, request: EngineRequest) -> reqwest::Result<EngineResponse> {
        let mut call = self
            .client
            .request(request.method.into(), &request.url)
            .query(&request.params);

        for (key, value) in &request.headers {
            call = call.header(key, value);
        }

        call = match request.data {
            Some(RequestBody::Json(json)) => call.json(&json),
            Some(RequestBody::NdJson(text)) => call.header(CONTENT_TYPE, NDJSON).body(text),
            None => call,
        };

        EngineResponse::read(call.send().await?).await
    }
}

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Head => Method::HEAD,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
        }
    }
}

/// `Accept: application/json` plus the configured extra headers
fn default_headers(settings: &OutgoingSettings) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    for (name, value) in &settings.extra_headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .with_context(|| format!("invalid header name: {}", name))?;
        let value = HeaderValue::from_str(value)
            .with_context(|| format!("invalid value for header {}", name))?;
        headers.insert(name, value);
    }

    Ok(headers)
}

/// A catch-all proxy wins over per-scheme ones
fn proxies(settings: &ProxySettings) -> Result<Vec<Proxy>> {
    if let Some(ref all) = settings.all {
        return Ok(vec![Proxy::all(all)?]);
    }

    let mut proxies = Vec::new();
    if let Some(ref http) = settings.http {
        proxies.push(Proxy::http(http)?);
    }
    if let Some(ref https) = settings.https {
        proxies.push(Proxy::https(https)?);
    }
    Ok(proxies)
}
