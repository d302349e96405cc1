//! Outbound HTTP: the generic proxy, the dispatch webhook and the WhatsApp
//! gateway status check. All calls share one client with a fixed timeout.

use once_cell::sync::Lazy;
use reqwest::{header, Client, Method};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::config;

static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    let timeout = Duration::from_secs(config::config().api.upstream_timeout_secs);
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("dispatch-console/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_default()
});

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Invalid upstream URL: {0}")]
    InvalidUrl(String),

    #[error("Unsupported HTTP method: {0}")]
    InvalidMethod(String),

    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    #[error("Upstream request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Body of `POST /api/proxy-check`
#[derive(Debug, Clone, Deserialize)]
pub struct ProxyRequest {
    pub url: String,
    pub method: Option<String>,
    pub token: Option<String>,
    pub body: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamBody {
    Json(Value),
    Text(String),
}

#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: UpstreamBody,
}

impl UpstreamResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json(&self) -> Option<&Value> {
        match &self.body {
            UpstreamBody::Json(value) => Some(value),
            UpstreamBody::Text(_) => None,
        }
    }

    /// Short human-readable description for logs and error messages
    pub fn summary(&self) -> String {
        let body = match &self.body {
            UpstreamBody::Json(value) => value.to_string(),
            UpstreamBody::Text(text) => text.clone(),
        };
        let body: String = body.chars().take(200).collect();
        format!("HTTP {}: {}", self.status, body)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InstanceStatus {
    Connected,
    Disconnected,
}

impl InstanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstanceStatus::Connected => "connected",
            InstanceStatus::Disconnected => "disconnected",
        }
    }

    /// Gateways disagree on where the connection state lives; check the
    /// known shapes in order.
    pub fn from_gateway_body(body: &Value) -> Self {
        const STATE_POINTERS: [&str; 4] = ["/instance/status", "/instance/state", "/status", "/state"];
        const FLAG_POINTERS: [&str; 2] = ["/status/connected", "/connected"];

        for pointer in STATE_POINTERS {
            if let Some(state) = body.pointer(pointer).and_then(Value::as_str) {
                let connected = state.eq_ignore_ascii_case("connected") || state.eq_ignore_ascii_case("open");
                return if connected { InstanceStatus::Connected } else { InstanceStatus::Disconnected };
            }
        }
        for pointer in FLAG_POINTERS {
            if let Some(flag) = body.pointer(pointer).and_then(Value::as_bool) {
                return if flag { InstanceStatus::Connected } else { InstanceStatus::Disconnected };
            }
        }
        InstanceStatus::Disconnected
    }
}

pub fn parse_http_url(raw: &str) -> Result<url::Url, GatewayError> {
    let parsed = url::Url::parse(raw.trim()).map_err(|_| GatewayError::InvalidUrl(raw.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        _ => Err(GatewayError::InvalidUrl(raw.to_string())),
    }
}

fn parse_method(raw: Option<&str>) -> Result<Method, GatewayError> {
    let raw = raw.map(str::trim).filter(|m| !m.is_empty()).unwrap_or("GET");
    let upper = raw.to_ascii_uppercase();
    match upper.as_str() {
        "GET" | "POST" | "PUT" | "PATCH" | "DELETE" | "HEAD" => {
            Method::from_bytes(upper.as_bytes()).map_err(|_| GatewayError::InvalidMethod(raw.to_string()))
        }
        _ => Err(GatewayError::InvalidMethod(raw.to_string())),
    }
}

async fn read_response(response: reqwest::Response) -> Result<UpstreamResponse, GatewayError> {
    let status = response.status().as_u16();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let text = response.text().await?;

    let body = match serde_json::from_str::<Value>(&text) {
        Ok(value) => UpstreamBody::Json(value),
        Err(_) => UpstreamBody::Text(text),
    };

    Ok(UpstreamResponse { status, content_type, body })
}

/// Forwards a request on the caller's behalf and returns whatever came back
pub async fn forward(request: &ProxyRequest) -> Result<UpstreamResponse, GatewayError> {
    let url = parse_http_url(&request.url)?;
    let method = parse_method(request.method.as_deref())?;

    tracing::info!(%method, host = url.host_str().unwrap_or(""), "Proxying upstream check");

    let mut builder = HTTP_CLIENT
        .request(method.clone(), url)
        .header(header::ACCEPT, "application/json");

    if let Some(token) = request.token.as_deref().filter(|t| !t.is_empty()) {
        builder = builder.header("token", token);
    }
    if let Some(body) = &request.body {
        if method != Method::GET && method != Method::HEAD {
            builder = builder.json(body);
        }
    }

    read_response(builder.send().await?).await
}

/// POSTs a JSON payload to the dispatch webhook
pub async fn post_webhook<T: Serialize + ?Sized>(webhook_url: &str, payload: &T) -> Result<UpstreamResponse, GatewayError> {
    let url = parse_http_url(webhook_url)?;
    let response = HTTP_CLIENT.post(url).json(payload).send().await?;
    read_response(response).await
}

/// Queries `<server>/instance/status` on the WhatsApp gateway
pub async fn instance_status(server_url: &str, token: &str) -> Result<(InstanceStatus, UpstreamResponse), GatewayError> {
    let base = parse_http_url(server_url)?;
    let url = base
        .join(&format!("{}/instance/status", base.path().trim_end_matches('/')))
        .map_err(|_| GatewayError::InvalidUrl(server_url.to_string()))?;

    let response = HTTP_CLIENT
        .get(url)
        .header(header::ACCEPT, "application/json")
        .header("token", token)
        .send()
        .await?;
    let upstream = read_response(response).await?;

    let status = match (upstream.is_success(), upstream.json()) {
        (true, Some(body)) => InstanceStatus::from_gateway_body(body),
        _ => InstanceStatus::Disconnected,
    };
    Ok((status, upstream))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn only_http_urls_are_forwarded() {
        assert!(parse_http_url("https://api.uazapi.dev/instance/status").is_ok());
        assert!(parse_http_url(" http://localhost:8080 ").is_ok());
        assert!(matches!(parse_http_url("file:///etc/passwd"), Err(GatewayError::InvalidUrl(_))));
        assert!(matches!(parse_http_url("nonsense"), Err(GatewayError::InvalidUrl(_))));
    }

    #[test]
    fn method_defaults_to_get_and_is_case_insensitive() {
        assert_eq!(parse_method(None).unwrap(), Method::GET);
        assert_eq!(parse_method(Some("post")).unwrap(), Method::POST);
        assert!(parse_method(Some("CONNECT")).is_err());
    }

    #[test]
    fn instance_status_reads_known_shapes() {
        assert_eq!(
            InstanceStatus::from_gateway_body(&json!({ "instance": { "status": "connected" } })),
            InstanceStatus::Connected
        );
        assert_eq!(
            InstanceStatus::from_gateway_body(&json!({ "state": "open" })),
            InstanceStatus::Connected
        );
        assert_eq!(
            InstanceStatus::from_gateway_body(&json!({ "status": { "connected": true } })),
            InstanceStatus::Connected
        );
        assert_eq!(
            InstanceStatus::from_gateway_body(&json!({ "instance": { "status": "disconnected" } })),
            InstanceStatus::Disconnected
        );
        assert_eq!(InstanceStatus::from_gateway_body(&json!({})), InstanceStatus::Disconnected);
    }

    #[test]
    fn summary_truncates_long_bodies() {
        let response = UpstreamResponse {
            status: 500,
            content_type: None,
            body: UpstreamBody::Text("x".repeat(1000)),
        };
        assert_eq!(response.summary().len(), "HTTP 500: ".len() + 200);
        assert!(!response.is_success());
    }
}
