use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::LinkFormat;

pub const DEFAULT_CLIENT_NAME: &str = "Cliente";
pub const DEFAULT_AGENT_NAME: &str = "Atendente";
pub const DEFAULT_TIME: &str = "--:--";
pub const DEFAULT_DATE: &str = "--/--/----";
pub const BUTTON_CALL_TO_ACTION: &str = "\n👉 *Clique no botão abaixo para acessar*";

// `{{ name }}` with optional inner whitespace; name compared case-insensitively
static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z0-9_]+)\s*\}\}").unwrap_or_else(|e| panic!("placeholder regex: {e}"))
});

/// Values available to a template. Empty strings count as absent.
#[derive(Debug, Clone, Default)]
pub struct MessageContext<'a> {
    pub client_name: Option<&'a str>,
    pub agent_name: Option<&'a str>,
    pub time: Option<&'a str>,
    pub date: Option<NaiveDate>,
    pub protocol: &'a str,
    pub link: &'a str,
    pub link_format: LinkFormat,
}

impl<'a> MessageContext<'a> {
    fn resolve(&self, token: &str) -> Option<String> {
        let value = match token.to_ascii_lowercase().as_str() {
            "clientname" => or_default(self.client_name, DEFAULT_CLIENT_NAME).to_string(),
            "agentname" => or_default(self.agent_name, DEFAULT_AGENT_NAME).to_string(),
            "time" => or_default(self.time, DEFAULT_TIME).to_string(),
            "protocol" => self.protocol.to_string(),
            "dynamicdate" => self
                .date
                .map(|d| d.format("%d/%m/%Y").to_string())
                .unwrap_or_else(|| DEFAULT_DATE.to_string()),
            "link" => match self.link_format {
                LinkFormat::Button => BUTTON_CALL_TO_ACTION.to_string(),
                LinkFormat::Text => self.link.to_string(),
            },
            _ => return None,
        };
        Some(value)
    }
}

fn or_default<'a>(value: Option<&'a str>, default: &'a str) -> &'a str {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => default,
    }
}

/// Replaces recognized placeholders in one pass. Substituted values are not
/// rescanned, and unknown placeholders are kept verbatim.
pub fn interpolate(text: &str, ctx: &MessageContext<'_>) -> String {
    PLACEHOLDER
        .replace_all(text, |caps: &Captures<'_>| {
            ctx.resolve(&caps[1]).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> MessageContext<'static> {
        MessageContext {
            client_name: Some("João Silva"),
            agent_name: Some("Maria"),
            time: Some("14:30"),
            date: NaiveDate::from_ymd_opt(2026, 1, 13),
            protocol: "ASC-1234",
            link: "https://meet.example/abc",
            link_format: LinkFormat::Text,
        }
    }

    #[test]
    fn replaces_known_tokens() {
        let out = interpolate(
            "Olá {{clientName}}, sou {{agentName}}. {{dynamicDate}} às {{time}} ({{protocol}}) {{link}}",
            &ctx(),
        );
        assert_eq!(
            out,
            "Olá João Silva, sou Maria. 13/01/2026 às 14:30 (ASC-1234) https://meet.example/abc"
        );
    }

    #[test]
    fn tokens_are_case_and_whitespace_tolerant() {
        let out = interpolate("{{ CLIENTNAME }}|{{Time}}|{{  protocol}}", &ctx());
        assert_eq!(out, "João Silva|14:30|ASC-1234");
    }

    #[test]
    fn unknown_tokens_are_left_alone() {
        let out = interpolate("Código: {{emissionCode}} {{ a1Warning }} {{time}}", &ctx());
        assert_eq!(out, "Código: {{emissionCode}} {{ a1Warning }} 14:30");
    }

    #[test]
    fn missing_values_fall_back_to_defaults() {
        let empty = MessageContext { client_name: Some("  "), ..Default::default() };
        let out = interpolate("{{clientName}} {{agentName}} {{time}} {{dynamicDate}}", &empty);
        assert_eq!(out, "Cliente Atendente --:-- --/--/----");
    }

    #[test]
    fn button_mode_swaps_link_for_call_to_action() {
        let mut c = ctx();
        c.link_format = LinkFormat::Button;
        let out = interpolate("Acesse: {{link}}", &c);
        assert_eq!(out, format!("Acesse: {}", BUTTON_CALL_TO_ACTION));
        assert!(!out.contains("meet.example"));
    }

    #[test]
    fn substituted_values_are_not_rescanned() {
        let sneaky = MessageContext {
            client_name: Some("{{time}}"),
            agent_name: Some("{{link}}"),
            ..ctx()
        };
        let out = interpolate("{{clientName}} / {{agentName}} / {{time}}", &sneaky);
        assert_eq!(out, "{{time}} / {{link}} / 14:30");
    }

    #[test]
    fn repeated_tokens_are_each_replaced_once() {
        let out = interpolate("{{time}}{{time}}", &ctx());
        assert_eq!(out, "14:3014:30");
    }
}
