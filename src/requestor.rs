//! HTTP transport for the Tassi API.
//!
//! This module provides the [`Requestor`] type, the single place where
//! HTTP requests are issued. Each call resolves the base URL from
//! configuration, merges the standard header set with caller-supplied
//! headers, places parameters in the query string or the JSON body
//! depending on the verb, and wraps every transport-level failure into
//! [`ApiConnectionError`]. There is no retry logic; one invocation is
//! one HTTP call.
//!
//! # Example
//!
//! ```rust,no_run
//! use tassi_api::{HttpMethod, Requestor, SharedConfig};
//!
//! # async fn run() -> Result<(), tassi_api::TassiError> {
//! SharedConfig::global().set_api_key("sk_test_123");
//!
//! let requestor = Requestor::new();
//! let envelope = requestor
//!     .request(HttpMethod::Get, "/packages", None, None)
//!     .await?;
//! println!("{}", envelope.data);
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::{Environment, SharedConfig};
use crate::error::{ApiConnectionError, RequestSummary, ResponseSummary, TassiError};

/// Client version reported in the `X-Version` request header.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Client identity reported in the `X-Source` request header.
const SOURCE_TAG: &str = "Tassi RustLib";

/// Sandbox endpoint used when no base-URL override is configured.
const SANDBOX_BASE: &str = "https://tassi-api.exanora.com";

/// Live endpoint. Currently the same host as sandbox — the upstream API
/// does not yet publish a separate production endpoint, so the two
/// constants are kept apart only so they can diverge later.
const LIVE_BASE: &str = "https://tassi-api.exanora.com";

/// HTTP verbs used by the resource layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET, for retrieval and sub-action calls.
    Get,
    /// HTTP POST, for resource creation.
    Post,
    /// HTTP PUT, for resource updates.
    Put,
    /// HTTP DELETE, for resource removal.
    Delete,
}

impl HttpMethod {
    /// Returns `true` for verbs whose parameters belong in the query
    /// string rather than the request body. `Delete` never carries a
    /// body.
    #[must_use]
    pub const fn places_params_in_query(self) -> bool {
        matches!(self, Self::Get | Self::Delete)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Post => write!(f, "post"),
            Self::Put => write!(f, "put"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// Request-scoped context returned alongside every response payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ResponseContext {
    /// The environment that was active when the request was issued.
    pub environment: Environment,
}

/// A successful transport result: the parsed response body plus the
/// context it was produced under.
#[derive(Clone, Debug)]
pub struct ResponseEnvelope {
    /// The parsed JSON body. An empty or absent body parses to `{}`; a
    /// body that is not valid JSON is kept as a raw string value.
    pub data: Value,
    /// The context the request ran under.
    pub context: ResponseContext,
}

/// Issues HTTP calls against the Tassi API.
///
/// A `Requestor` reads its settings from a [`SharedConfig`] handle on
/// every call, so configuration changes take effect on the next request
/// without rebuilding the requestor.
///
/// # Thread Safety
///
/// `Requestor` is `Send + Sync` and can be shared across async tasks.
#[derive(Debug)]
pub struct Requestor {
    config: SharedConfig,
    client: reqwest::Client,
    // Built on first use when TLS verification is disabled.
    insecure_client: OnceLock<reqwest::Client>,
}

// Verify Requestor is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Requestor>();
};

impl Requestor {
    /// Creates a requestor reading from the process-wide configuration.
    ///
    /// # Panics
    ///
    /// Panics if the underlying HTTP client cannot be created. This
    /// should only happen in extremely unusual circumstances (e.g. TLS
    /// backend initialization failure).
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SharedConfig::global().clone())
    }

    /// Creates a requestor reading from an explicit configuration
    /// handle. This is the seam tests and multi-tenant callers use.
    ///
    /// # Panics
    ///
    /// Panics if the underlying HTTP client cannot be created.
    #[must_use]
    pub fn with_config(config: SharedConfig) -> Self {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("failed to create HTTP client");

        Self {
            config,
            client,
            insecure_client: OnceLock::new(),
        }
    }

    /// Sends one HTTP request and returns the parsed response.
    ///
    /// Parameters are placed in the query string for `Get` and `Delete`
    /// and sent as a JSON body for `Post` and `Put`. Caller-supplied
    /// headers override same-named defaults.
    ///
    /// # Errors
    ///
    /// Returns [`TassiError::ApiConnection`] for any transport-level
    /// failure: network errors (carrying the original `reqwest::Error`
    /// as source) and non-2xx responses (carrying the status and the
    /// response body). No retries are attempted.
    pub async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        params: Option<&Map<String, Value>>,
        headers: Option<&HashMap<String, String>>,
    ) -> Result<ResponseEnvelope, TassiError> {
        let url = format!("{}{}", self.base_url(), path);

        let mut merged = self.default_headers();
        if let Some(extra) = headers {
            for (key, value) in extra {
                merged.insert(key.clone(), value.clone());
            }
        }

        let client = self.http_client();
        let mut builder = match method {
            HttpMethod::Get => client.get(&url),
            HttpMethod::Post => client.post(&url),
            HttpMethod::Put => client.put(&url),
            HttpMethod::Delete => client.delete(&url),
        };

        for (key, value) in &merged {
            builder = builder.header(key, value);
        }

        if let Some(params) = params {
            if method.places_params_in_query() {
                let pairs = query_pairs(params);
                if !pairs.is_empty() {
                    builder = builder.query(&pairs);
                }
            } else {
                builder = builder.json(params);
            }
        }

        tracing::debug!(method = %method, url = %url, "sending request");

        let summary = RequestSummary {
            method: method.to_string(),
            url,
        };

        let response = match builder.send().await {
            Ok(response) => response,
            Err(source) => return Err(wrap_transport_error(source, summary)),
        };

        let status = response.status();
        let body_text = match response.text().await {
            Ok(text) => text,
            Err(source) => return Err(wrap_transport_error(source, summary)),
        };

        if !status.is_success() {
            return Err(ApiConnectionError {
                message: format!(
                    "Request error: request failed with status code {}",
                    status.as_u16()
                ),
                http_status: Some(status.as_u16()),
                request: Some(summary),
                response: Some(ResponseSummary {
                    status: status.as_u16(),
                    body: body_text,
                }),
                source: None,
            }
            .into());
        }

        let data = if body_text.is_empty() {
            Value::Object(Map::new())
        } else {
            serde_json::from_str(&body_text).unwrap_or(Value::String(body_text))
        };

        Ok(ResponseEnvelope {
            data,
            context: ResponseContext {
                environment: self.config.environment(),
            },
        })
    }

    /// Resolves the base URL: an explicit override wins, otherwise the
    /// endpoint constant selected by the active environment.
    fn base_url(&self) -> String {
        if let Some(api_base) = self.config.api_base() {
            return api_base;
        }

        match self.config.environment() {
            Environment::Live => LIVE_BASE.to_string(),
            Environment::Sandbox => SANDBOX_BASE.to_string(),
        }
    }

    /// Builds the fixed default header set for the current configuration.
    fn default_headers(&self) -> HashMap<String, String> {
        let api_key = self.config.api_key().unwrap_or_default();

        let mut headers = HashMap::new();
        headers.insert("X-Version".to_string(), VERSION.to_string());
        headers.insert("X-Source".to_string(), SOURCE_TAG.to_string());
        headers.insert("Authorization".to_string(), format!("Bearer {api_key}"));
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Accept".to_string(), "application/json".to_string());
        headers
    }

    /// Selects the HTTP client for the current TLS-verification setting.
    fn http_client(&self) -> &reqwest::Client {
        if self.config.verify_tls() {
            return &self.client;
        }

        tracing::warn!("TLS certificate verification is disabled");
        self.insecure_client.get_or_init(|| {
            reqwest::Client::builder()
                .use_rustls_tls()
                .danger_accept_invalid_certs(true)
                .build()
                .expect("failed to create HTTP client")
        })
    }
}

impl Default for Requestor {
    fn default() -> Self {
        Self::new()
    }
}

/// Wraps a `reqwest` failure, keeping it as the error source.
fn wrap_transport_error(source: reqwest::Error, request: RequestSummary) -> TassiError {
    let http_status = source.status().map(|status| status.as_u16());
    ApiConnectionError {
        message: format!("Request error: {source}"),
        http_status,
        request: Some(request),
        response: None,
        source: Some(source),
    }
    .into()
}

/// Renders a JSON parameter mapping as query-string pairs: nulls are
/// skipped, scalars are stringified, arrays become comma-joined scalar
/// lists, nested objects are JSON-encoded.
fn query_pairs(params: &Map<String, Value>) -> Vec<(String, String)> {
    let mut pairs = Vec::with_capacity(params.len());

    for (key, value) in params {
        match value {
            Value::Null => {}
            Value::String(text) => pairs.push((key.clone(), text.clone())),
            Value::Number(number) => pairs.push((key.clone(), number.to_string())),
            Value::Bool(flag) => pairs.push((key.clone(), flag.to_string())),
            Value::Array(items) => {
                let rendered: Vec<String> = items
                    .iter()
                    .filter_map(|item| match item {
                        Value::String(text) => Some(text.clone()),
                        Value::Number(number) => Some(number.to_string()),
                        _ => None,
                    })
                    .collect();
                if !rendered.is_empty() {
                    pairs.push((key.clone(), rendered.join(",")));
                }
            }
            Value::Object(_) => pairs.push((key.clone(), value.to_string())),
        }
    }

    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TassiConfig;
    use serde_json::json;

    fn params(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!("test params must be an object"),
        }
    }

    #[test]
    fn test_query_placement_by_verb() {
        assert!(HttpMethod::Get.places_params_in_query());
        assert!(HttpMethod::Delete.places_params_in_query());
        assert!(!HttpMethod::Post.places_params_in_query());
        assert!(!HttpMethod::Put.places_params_in_query());
    }

    #[test]
    fn test_method_display_is_lowercase() {
        assert_eq!(HttpMethod::Get.to_string(), "get");
        assert_eq!(HttpMethod::Post.to_string(), "post");
        assert_eq!(HttpMethod::Put.to_string(), "put");
        assert_eq!(HttpMethod::Delete.to_string(), "delete");
    }

    #[test]
    fn test_query_pairs_stringifies_scalars() {
        let pairs = query_pairs(&params(json!({"x": 1, "active": true, "q": "colis"})));

        assert!(pairs.contains(&("x".to_string(), "1".to_string())));
        assert!(pairs.contains(&("active".to_string(), "true".to_string())));
        assert!(pairs.contains(&("q".to_string(), "colis".to_string())));
    }

    #[test]
    fn test_query_pairs_skips_nulls() {
        let pairs = query_pairs(&params(json!({"x": null, "y": 2})));

        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0], ("y".to_string(), "2".to_string()));
    }

    #[test]
    fn test_query_pairs_joins_arrays() {
        let pairs = query_pairs(&params(json!({"ids": [1, 2, 3]})));
        assert_eq!(pairs, vec![("ids".to_string(), "1,2,3".to_string())]);
    }

    #[test]
    fn test_query_pairs_encodes_nested_objects_as_json() {
        let pairs = query_pairs(&params(json!({"filter": {"status": "in_transit"}})));
        assert_eq!(
            pairs,
            vec![(
                "filter".to_string(),
                r#"{"status":"in_transit"}"#.to_string()
            )]
        );
    }

    #[test]
    fn test_default_headers_carry_credential_and_tags() {
        let config = SharedConfig::new(TassiConfig::new());
        config.set_api_key("sk_test_123");
        let requestor = Requestor::with_config(config);

        let headers = requestor.default_headers();
        assert_eq!(
            headers.get("Authorization"),
            Some(&"Bearer sk_test_123".to_string())
        );
        assert_eq!(headers.get("X-Version"), Some(&VERSION.to_string()));
        assert_eq!(headers.get("X-Source"), Some(&"Tassi RustLib".to_string()));
        assert_eq!(
            headers.get("Content-Type"),
            Some(&"application/json".to_string())
        );
        assert_eq!(headers.get("Accept"), Some(&"application/json".to_string()));
    }

    #[test]
    fn test_base_url_override_wins_over_environment() {
        let config = SharedConfig::new(TassiConfig::new());
        config.set_environment(Environment::Live);
        config.set_api_base("http://localhost:8080");
        let requestor = Requestor::with_config(config);

        assert_eq!(requestor.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_base_url_falls_back_to_environment_endpoint() {
        let config = SharedConfig::new(TassiConfig::new());
        let requestor = Requestor::with_config(config.clone());

        assert_eq!(requestor.base_url(), SANDBOX_BASE);

        config.set_environment(Environment::Live);
        assert_eq!(requestor.base_url(), LIVE_BASE);
    }
}
