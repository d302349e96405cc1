use chrono::NaiveDate;
use clap::Args;

use crate::cli::OutputFormat;
use crate::composer::{self, ComposeRequest, LinkFormat, MessageKind};
use crate::config;

#[derive(Debug, Args)]
pub struct RenderArgs {
    #[arg(long = "type", default_value = "meeting", help = "meeting or certificate")]
    pub kind: String,

    #[arg(long, help = "Client name")]
    pub client: String,

    #[arg(long, help = "Client phone number")]
    pub phone: String,

    #[arg(long, help = "Agent name")]
    pub agent: Option<String>,

    #[arg(long, help = "Meeting date (YYYY-MM-DD)")]
    pub date: Option<NaiveDate>,

    #[arg(long, help = "Meeting time (HH:MM)")]
    pub time: Option<String>,

    #[arg(long, help = "Protocol code; generated when omitted")]
    pub protocol: Option<String>,

    #[arg(long, help = "Manual meeting link; the auto link is used when omitted")]
    pub link: Option<String>,

    #[arg(long, help = "Send the link as a button")]
    pub button: bool,

    #[arg(long, help = "Pick a random template")]
    pub random: bool,

    #[arg(long, help = "Template id, e.g. v3 or c2")]
    pub template: Option<String>,
}

impl RenderArgs {
    fn into_request(self) -> anyhow::Result<ComposeRequest> {
        let message_type = match self.kind.to_ascii_lowercase().as_str() {
            "meeting" => MessageKind::Meeting,
            "certificate" => MessageKind::Certificate,
            other => anyhow::bail!("Unknown message type '{}'", other),
        };

        Ok(ComposeRequest {
            message_type,
            client_name: self.client,
            client_phone: self.phone,
            agent_name: self.agent,
            meeting_date: self.date,
            meeting_time: self.time,
            protocol_code: self.protocol,
            is_auto_link: self.link.is_none(),
            manual_link: self.link,
            link_format: if self.button { LinkFormat::Button } else { LinkFormat::Text },
            is_random_template: self.random,
            selected_template_id: self.template,
            custom_message: None,
        })
    }
}

pub fn handle(args: RenderArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let request = args.into_request()?;
    let message = composer::compose(&request, &config::config().dispatch, &mut rand::thread_rng());

    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&message)?),
        OutputFormat::Text => {
            println!("Template: {}", message.template_id.unwrap_or("custom"));
            println!("Protocol: {}", message.protocol);
            println!("To:       {}", message.payload.number);
            println!();
            println!("{}", message.payload.text);
            if let Some(choices) = &message.payload.choices {
                println!();
                for choice in choices {
                    println!("[{}]", choice);
                }
            }
        }
    }
    Ok(())
}
