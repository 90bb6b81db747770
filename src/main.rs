//! Modechat: HTTP entry point.
//!
//! Startup sequence:
//!   1. Load .env (if present)
//!   2. Parse CLI args and load config
//!   3. Init logger once (CLI `-v` flags > env > config)
//!   4. Warn if the API key is still the placeholder
//!   5. Build the provider, store and chat service
//!   6. Spawn Ctrl-C → shutdown signal watcher
//!   7. Serve HTTP until shutdown

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use modechat::catalog::{Mode, Personality};
use modechat::chat::ChatService;
use modechat::error::AppError;
use modechat::llm::providers;
use modechat::memory::ConversationStore;
use modechat::memory::stores::TmpStore;
use modechat::server::{self, AppState, PeerAddrResolver};
use modechat::{config, logger};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    // Load .env if present; the file is optional.
    let _ = dotenvy::dotenv();

    let args = parse_cli_args();
    let config = config::load(args.config_path.as_deref())?;

    let effective_log_level = args.log_level.unwrap_or(config.log_level.as_str());
    logger::init(effective_log_level, args.log_level.is_some())?;

    info!(
        bind = %config.server.bind_addr(),
        provider = %config.llm.provider,
        endpoint = %config.llm.endpoint,
        deployment = %config.llm.deployment,
        api_version = %config.llm.api_version,
        effective_log_level = %effective_log_level,
        "config loaded"
    );

    if !config.credentials_configured() {
        warn!("Azure OpenAI credentials are not configured; create a .env file with:");
        warn!("  AZURE_OPENAI_API_KEY=your_actual_api_key");
        warn!("  AZURE_OPENAI_ENDPOINT=https://your-resource-name.openai.azure.com/");
        warn!("  DEPLOYMENT_NAME=your_deployment_name");
    }

    let provider = providers::build(&config.llm, &config.api_key)
        .map_err(|e| AppError::Config(e.to_string()))?;
    let store = Arc::new(TmpStore::new());
    info!(provider = provider.name(), store = store.store_type(), "chat service ready");
    let chat = Arc::new(ChatService::new(store, provider));
    let state = AppState::new(chat, Arc::new(PeerAddrResolver), config.credentials_configured());

    info!(modes = %Mode::keys().join(", "), "available modes");
    info!(personalities = %Personality::keys().join(", "), "available personalities");

    // Ctrl-C cancels the token so the server drains and exits.
    let shutdown = CancellationToken::new();
    let ctrlc_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("ctrl-c received, initiating shutdown");
            ctrlc_token.cancel();
        }
    });

    server::serve(&config.server.bind_addr(), state, shutdown).await
}

struct CliArgs {
    log_level: Option<&'static str>,
    config_path: Option<String>,
}

fn parse_cli_args() -> CliArgs {
    let mut verbosity = 0u8;
    let mut config_path = None;

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        if arg == "--" {
            break;
        }

        match arg.as_str() {
            "-h" | "--help" => {
                println!("Usage: modechat [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -h, --help                 Print help");
                println!("  -f, --config <PATH>        Path to configuration file (default: config/default.toml)");
                println!("  -v, -vv, -vvv, -vvvv       Set logging verbosity (warn, info, debug, trace)");
                std::process::exit(0);
            }
            "-f" | "--config" => {
                if let Some(path) = iter.next() {
                    config_path = Some(path);
                } else {
                    eprintln!("error: -f/--config requires a path argument");
                    std::process::exit(1);
                }
            }
            "--verbose" => verbosity = verbosity.saturating_add(1),
            a if a.starts_with('-') && a.len() > 1 && a.chars().skip(1).all(|c| c == 'v') => {
                verbosity = verbosity.saturating_add((a.len() - 1) as u8);
            }
            _ => {}
        }
    }

    let log_level = match verbosity {
        0 => None,
        1 => Some("warn"),
        2 => Some("info"),
        3 => Some("debug"),
        _ => Some("trace"),
    };

    CliArgs { log_level, config_path }
}
