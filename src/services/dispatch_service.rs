use serde::Serialize;
use tracing::{error, info, warn};

use crate::composer::{self, ComposeRequest, ComposedMessage};
use crate::config;
use crate::database::models::log::{Log, NewLog, STATUS_FAILED, STATUS_SENT};
use crate::database::models::setting::Settings;
use crate::database::{logs, settings};
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::services::gateway;

#[derive(Debug, Serialize)]
pub struct DispatchOutcome {
    pub status: String,
    pub upstream_status: u16,
    pub message: ComposedMessage,
    /// `None` when the log row could not be written
    pub log: Option<Log>,
}

/// Settings are optional for previews; an unreachable store means defaults
async fn settings_or_default() -> Settings {
    match settings::load_settings().await {
        Ok(settings) => settings,
        Err(e) => {
            warn!("Using default settings: {}", e);
            Settings::default()
        }
    }
}

pub async fn preview(request: ComposeRequest) -> ComposedMessage {
    let settings = settings_or_default().await;
    let request = request.with_buttons_disabled(settings.action_button_disabled());
    composer::compose(&request, &config::config().dispatch, &mut rand::thread_rng())
}

/// Composes, posts to the webhook and records the attempt
pub async fn dispatch(request: ComposeRequest, agent: &AuthUser) -> Result<DispatchOutcome, ApiError> {
    request
        .validate()
        .map_err(|(field, reason)| ApiError::invalid_field(field, reason))?;

    let settings = settings::load_settings().await?;
    dispatch_with_settings(request, agent, &settings).await
}

/// Dispatch against already loaded settings. Nothing is sent or logged
/// unless the webhook URL is a usable http(s) URL.
pub async fn dispatch_with_settings(
    request: ComposeRequest,
    agent: &AuthUser,
    settings: &Settings,
) -> Result<DispatchOutcome, ApiError> {
    request
        .validate()
        .map_err(|(field, reason)| ApiError::invalid_field(field, reason))?;

    let webhook = settings
        .webhook()
        .ok_or_else(|| ApiError::bad_request("Webhook URL not configured"))?;
    gateway::parse_http_url(webhook).map_err(|_| ApiError::bad_request("Webhook URL is invalid"))?;

    let request = request.with_buttons_disabled(settings.action_button_disabled());
    let message = composer::compose(&request, &config::config().dispatch, &mut rand::thread_rng());

    let agent_name = request
        .agent_name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(&agent.name)
        .to_string();

    let (status, upstream_status, failure) = match gateway::post_webhook(webhook, &message.payload).await {
        Ok(upstream) if upstream.is_success() => (STATUS_SENT, upstream.status, None),
        Ok(upstream) => (STATUS_FAILED, upstream.status, Some(upstream.summary())),
        Err(e) => (STATUS_FAILED, 0, Some(e.to_string())),
    };

    let log = record(&request, &message, &agent_name, status).await;

    if let Some(reason) = failure {
        error!(protocol = %message.protocol, "Webhook dispatch failed: {}", reason);
        return Err(ApiError::bad_gateway(format!("Webhook rejected the message ({})", reason)));
    }

    info!(
        protocol = %message.protocol,
        template = message.template_id.unwrap_or("custom"),
        kind = request.message_type.log_label(),
        "Message dispatched"
    );

    Ok(DispatchOutcome {
        status: status.to_string(),
        upstream_status,
        message,
        log,
    })
}

async fn record(request: &ComposeRequest, message: &ComposedMessage, agent: &str, status: &str) -> Option<Log> {
    let entry = NewLog {
        date: None,
        agent: agent.to_string(),
        client: request.client_name.trim().to_string(),
        kind: request.message_type.log_label().to_string(),
        status: status.to_string(),
        protocol: message.protocol.clone(),
    };

    match logs::create_log(&entry).await {
        Ok(log) => Some(log),
        Err(e) => {
            error!(protocol = %message.protocol, "Failed to record dispatch log: {}", e);
            None
        }
    }
}
