mod ask_cmd;
mod config;
mod serve_cmd;
#[cfg(test)]
mod test_util;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use ponder_core::completion::WorkersAiClient;

use config::PonderConfig;
use serve_cmd::AppState;

#[derive(Parser)]
#[command(name = "ponder", about = "Plan-then-answer chat orchestrator")]
struct Cli {
    /// Model selector (overrides PONDER_MODEL env var and config file)
    #[arg(long, global = true)]
    model: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a ponder config file
    Init {
        /// Cloudflare account ID
        #[arg(long)]
        account_id: String,
        /// API token with Workers AI access
        #[arg(long)]
        api_token: String,
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Run the chat HTTP server
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,
        /// Port to listen on
        #[arg(long, default_value_t = 8787)]
        port: u16,
    },
    /// Ask a single question from the terminal
    Ask {
        /// The message to send
        message: String,
    },
}

/// Execute the `ponder init` command: write config file.
fn cmd_init(account_id: &str, api_token: &str, model: Option<&str>, force: bool) -> anyhow::Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let model = model.unwrap_or(config::DEFAULT_MODEL);
    let cfg = config::ConfigFile {
        model: config::ModelSection {
            account_id: account_id.to_string(),
            model: model.to_string(),
            base_url: None,
        },
        auth: config::AuthSection {
            api_token: api_token.to_string(),
        },
    };

    config::save_config(&cfg)?;

    println!("Config written to {}", path.display());
    println!("  model.account_id = {account_id}");
    println!("  model.model = {model}");
    println!();
    println!("Next: run `ponder serve` to start the chat server.");

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init {
            account_id,
            api_token,
            force,
        } => {
            cmd_init(&account_id, &api_token, cli.model.as_deref(), force)?;
        }
        Commands::Serve { bind, port } => {
            let resolved = PonderConfig::resolve(cli.model.as_deref())?;
            let client = WorkersAiClient::new(&resolved.workers_ai)?;
            let state = AppState {
                client: Arc::new(client),
                model: resolved.model,
            };
            serve_cmd::run_serve(state, &bind, port).await?;
        }
        Commands::Ask { message } => {
            let resolved = PonderConfig::resolve(cli.model.as_deref())?;
            let client = WorkersAiClient::new(&resolved.workers_ai)?;
            ask_cmd::run_ask(&client, &resolved.model, &message).await?;
        }
    }

    Ok(())
}
