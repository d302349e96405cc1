use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One row of the `settings` table
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct SettingRow {
    pub key: String,
    pub value: String,
}

pub const WEBHOOK_URL: &str = "webhookUrl";
pub const QR_WEBHOOK_URL: &str = "qrWebhookUrl";
pub const INSTANCE_PHONE: &str = "instancePhone";
pub const INSTANCE_STATUS: &str = "instanceStatus";
pub const SERVER_URL: &str = "serverUrl";
pub const INSTANCE_TOKEN: &str = "instanceToken";
pub const ACTION_BUTTON_DISABLED: &str = "actionButtonDisabled";

/// Typed view over the flat key/value store. Absent keys stay `None` and are
/// neither written nor returned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Settings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_webhook_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_button_disabled: Option<bool>,
}

impl Settings {
    pub fn from_rows(rows: impl IntoIterator<Item = SettingRow>) -> Self {
        let mut settings = Settings::default();
        for row in rows {
            match row.key.as_str() {
                WEBHOOK_URL => settings.webhook_url = Some(row.value),
                QR_WEBHOOK_URL => settings.qr_webhook_url = Some(row.value),
                INSTANCE_PHONE => settings.instance_phone = Some(row.value),
                INSTANCE_STATUS => settings.instance_status = Some(row.value),
                SERVER_URL => settings.server_url = Some(row.value),
                INSTANCE_TOKEN => settings.instance_token = Some(row.value),
                ACTION_BUTTON_DISABLED => settings.action_button_disabled = Some(row.value == "true"),
                other => tracing::debug!("Ignoring unknown setting key: {}", other),
            }
        }
        settings
    }

    /// Present values as (key, text value) pairs in a stable order
    pub fn to_rows(&self) -> Vec<SettingRow> {
        let pairs: [(&str, Option<String>); 7] = [
            (WEBHOOK_URL, self.webhook_url.clone()),
            (QR_WEBHOOK_URL, self.qr_webhook_url.clone()),
            (INSTANCE_PHONE, self.instance_phone.clone()),
            (INSTANCE_STATUS, self.instance_status.clone()),
            (SERVER_URL, self.server_url.clone()),
            (INSTANCE_TOKEN, self.instance_token.clone()),
            (ACTION_BUTTON_DISABLED, self.action_button_disabled.map(|b| b.to_string())),
        ];

        pairs
            .into_iter()
            .filter_map(|(key, value)| value.map(|value| SettingRow { key: key.to_string(), value }))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.to_rows().is_empty()
    }

    pub fn action_button_disabled(&self) -> bool {
        self.action_button_disabled.unwrap_or(false)
    }

    /// Configured webhook, ignoring blank values
    pub fn webhook(&self) -> Option<&str> {
        self.webhook_url.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}
