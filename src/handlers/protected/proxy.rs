use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::error::ApiResult;
use crate::extract::ApiJson;
use crate::services::gateway::{self, ProxyRequest, UpstreamBody, UpstreamResponse};

impl IntoResponse for UpstreamResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::BAD_GATEWAY);
        match self.body {
            UpstreamBody::Json(value) => (status, Json(value)).into_response(),
            UpstreamBody::Text(text) => {
                let content_type = self.content_type.unwrap_or_else(|| "text/plain; charset=utf-8".to_string());
                (status, [(header::CONTENT_TYPE, content_type)], text).into_response()
            }
        }
    }
}

/// POST /api/proxy-check - Call an upstream URL server-side and relay its answer
///
/// Used by the settings page to test webhook and gateway connectivity without
/// browser CORS restrictions.
pub async fn post(ApiJson(request): ApiJson<ProxyRequest>) -> ApiResult<UpstreamResponse> {
    let upstream = gateway::forward(&request).await?;
    tracing::debug!(status = upstream.status, "Proxy check answered");
    Ok(upstream)
}
