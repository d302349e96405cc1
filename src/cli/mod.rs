pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "dispatch-console")]
#[command(about = "Dispatch console - WhatsApp dispatch operations backend")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP API (default)")]
    Serve(commands::serve::ServeArgs),

    #[command(about = "Create tables and seed the bootstrap administrator")]
    Setup,

    #[command(about = "Compose a message locally without sending it")]
    Render(commands::render::RenderArgs),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        None => commands::serve::handle(commands::serve::ServeArgs::default()).await,
        Some(Commands::Serve(args)) => commands::serve::handle(args).await,
        Some(Commands::Setup) => commands::setup::handle(output_format).await,
        Some(Commands::Render(args)) => commands::render::handle(args, output_format),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default() {
        let cli = Cli::parse_from(["dispatch-console"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn render_flags_parse() {
        let cli = Cli::parse_from([
            "dispatch-console",
            "--json",
            "render",
            "--type",
            "certificate",
            "--client",
            "Ana",
            "--phone",
            "11 98888-7777",
            "--random",
        ]);
        assert!(cli.json);
        match cli.command {
            Some(Commands::Render(args)) => {
                assert_eq!(args.kind, "certificate");
                assert!(args.random);
            }
            _ => panic!("expected render"),
        }
    }
}
