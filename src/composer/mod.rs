//! Message composer: picks a template, fills in placeholders and builds the
//! payload posted to the dispatch webhook.

pub mod interpolate;
pub mod templates;

use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::DispatchConfig;
use crate::database::models::log::{TYPE_CERTIFICATE, TYPE_REMINDER};

pub use interpolate::{interpolate, MessageContext};
pub use templates::{find_template, pick_random, templates_for, Template};

pub const BUTTON_FOOTER: &str = "Escolha uma das opções abaixo";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    #[default]
    Meeting,
    Certificate,
}

impl MessageKind {
    /// Label stored in the `logs.type` column
    pub fn log_label(&self) -> &'static str {
        match self {
            MessageKind::Meeting => TYPE_REMINDER,
            MessageKind::Certificate => TYPE_CERTIFICATE,
        }
    }

    fn button_label(&self) -> &'static str {
        match self {
            MessageKind::Meeting => "Acessar Reunião",
            MessageKind::Certificate => "Emitir Certificado",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkFormat {
    #[default]
    Text,
    Button,
}

/// Composer input as sent by the dashboard form
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComposeRequest {
    pub message_type: MessageKind,
    pub client_name: String,
    pub client_phone: String,
    pub agent_name: Option<String>,
    pub meeting_date: Option<NaiveDate>,
    pub meeting_time: Option<String>,
    pub protocol_code: Option<String>,
    pub is_auto_link: bool,
    pub manual_link: Option<String>,
    pub link_format: LinkFormat,
    pub is_random_template: bool,
    pub selected_template_id: Option<String>,
    pub custom_message: Option<String>,
}

impl ComposeRequest {
    /// Field-level checks required before a real dispatch
    pub fn validate(&self) -> Result<(), (&'static str, String)> {
        if self.client_name.trim().is_empty() {
            return Err(("clientName", "Client name is required".into()));
        }
        if phone_digits(&self.client_phone).is_empty() {
            return Err(("clientPhone", "Client phone must contain digits".into()));
        }
        if self.message_type == MessageKind::Meeting
            && !self.is_auto_link
            && blank(self.manual_link.as_deref())
        {
            return Err(("manualLink", "Meeting link is required when auto link is off".into()));
        }
        Ok(())
    }

    /// Buttons can be switched off globally; links then go inline
    pub fn with_buttons_disabled(mut self, disabled: bool) -> Self {
        if disabled {
            self.link_format = LinkFormat::Text;
        }
        self
    }
}

/// JSON body posted to the webhook
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPayload {
    pub number: String,
    #[serde(rename = "type")]
    pub kind: LinkFormat,
    pub text: String,
    pub client_name: String,
    pub client_phone: String,
    pub link_format: LinkFormat,
    pub custom_message: String,
    pub protocol_code: String,
    pub message_type: MessageKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer_text: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposedMessage {
    /// Template used, `None` when the agent's own text was sent
    pub template_id: Option<&'static str>,
    pub protocol: String,
    pub link: String,
    pub payload: WebhookPayload,
}

/// `ASC-NNNN` with NNNN in 1000..=9999
pub fn generate_protocol<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("ASC-{}", rng.gen_range(1000..=9999))
}

pub fn phone_digits(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

fn blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// Certificates always point at the emission page. Meetings use the auto
/// link built from the protocol, or the agent's manual link.
pub fn resolve_link(req: &ComposeRequest, protocol: &str, links: &DispatchConfig) -> String {
    match req.message_type {
        MessageKind::Certificate => links.certificate_link.clone(),
        MessageKind::Meeting if req.is_auto_link => {
            format!("{}?protocolo={}", links.meeting_link_base, protocol)
        }
        MessageKind::Meeting => req.manual_link.as_deref().unwrap_or("").trim().to_string(),
    }
}

/// Chooses the message text: a random template when anti-spam rotation is on,
/// otherwise the edited text, then the selected template, then the first one.
fn select_text<R: Rng + ?Sized>(req: &ComposeRequest, rng: &mut R) -> (Option<&'static str>, String) {
    if req.is_random_template {
        let template = pick_random(req.message_type, rng);
        tracing::debug!(template = template.id, "Selected random template");
        return (Some(template.id), template.text.to_string());
    }

    if let Some(custom) = req.custom_message.as_deref().filter(|m| !m.trim().is_empty()) {
        return (None, custom.to_string());
    }

    let template = req
        .selected_template_id
        .as_deref()
        .and_then(|id| find_template(req.message_type, id))
        .unwrap_or(&templates_for(req.message_type)[0]);
    (Some(template.id), template.text.to_string())
}

pub fn compose<R: Rng + ?Sized>(req: &ComposeRequest, links: &DispatchConfig, rng: &mut R) -> ComposedMessage {
    let protocol = match req.protocol_code.as_deref().map(str::trim) {
        Some(code) if !code.is_empty() => code.to_string(),
        _ => generate_protocol(rng),
    };
    let link = resolve_link(req, &protocol, links);
    let (template_id, text) = select_text(req, rng);

    let ctx = MessageContext {
        client_name: Some(req.client_name.as_str()),
        agent_name: req.agent_name.as_deref(),
        time: req.meeting_time.as_deref(),
        date: req.meeting_date,
        protocol: &protocol,
        link: &link,
        link_format: req.link_format,
    };
    let text = interpolate(&text, &ctx);

    let number = phone_digits(&req.client_phone);
    let (choices, footer_text) = match req.link_format {
        LinkFormat::Button => (
            Some(vec![format!("{}|{}", req.message_type.button_label(), link)]),
            Some(BUTTON_FOOTER.to_string()),
        ),
        LinkFormat::Text => (None, None),
    };

    let payload = WebhookPayload {
        number: number.clone(),
        kind: req.link_format,
        text: text.clone(),
        client_name: req.client_name.clone(),
        client_phone: number,
        link_format: req.link_format,
        custom_message: text,
        protocol_code: protocol.clone(),
        message_type: req.message_type,
        choices,
        footer_text,
    };

    ComposedMessage { template_id, protocol, link, payload }
}
