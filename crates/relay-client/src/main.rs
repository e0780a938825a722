//! Remote relay client entry point.
//!
//! # Usage
//!
//! ```text
//! relay-client [--config <PATH>] <COMMAND>
//!
//! Commands:
//!   address <URL>      Print the host:port address of a pairing URL
//!   invite <URL>       Print the URL to hand to the peer (role flipped)
//!   relay [--url URL]  Replay inbound events from stdin until EOF or Ctrl+C
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable       | Description                              |
//! |----------------|------------------------------------------|
//! | `RELAY_CONFIG` | Config file path (default: platform dir) |
//! | `RELAY_URL`    | Pairing URL for `relay`                  |
//! | `RUST_LOG`     | Log filter; overrides `[relay] log_level` |
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load_config()                 -- config.toml or defaults
//!  └─ ConnectionDescriptor::parse() -- validate the pairing URL
//!  └─ CommandHost::from_bindings()  -- configured commands
//!  └─ event loop (stdin lines)
//!       ├─ key           -> DispatchGestureUseCase::handle_key
//!       └─ braille_input -> DispatchGestureUseCase::handle_gesture
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use relay_client::application::dispatch_gesture::DispatchGestureUseCase;
use relay_client::application::synthesize_key::{InputSynthesizer, KeyInjector};
use relay_client::infrastructure::{
    host::CommandHost,
    inbound::{EventReader, InboundEvent},
    storage::config::{self, AppConfig},
};
use relay_core::{ConnectionDescriptor, ConnectionState, GestureDescriptor, ScopeSource};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Remote relay client.
#[derive(Debug, Parser)]
#[command(
    name = "relay-client",
    about = "Replays remote gestures and key events on the controlled machine",
    version
)]
struct Cli {
    /// Path to config.toml.
    #[arg(long, global = true, env = "RELAY_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the host:port address of a pairing URL.
    Address { url: String },
    /// Print the invitation URL for the peer.
    Invite { url: String },
    /// Replay inbound events read from stdin.
    Relay {
        /// Pairing URL; falls back to `[connection] url` in the config.
        #[arg(long, env = "RELAY_URL")]
        url: Option<String>,
    },
}

fn parse_descriptor(url: &str) -> anyhow::Result<ConnectionDescriptor> {
    ConnectionDescriptor::parse(url).with_context(|| format!("invalid pairing URL '{url}'"))
}

fn platform_injector() -> Arc<dyn KeyInjector> {
    #[cfg(target_os = "windows")]
    {
        Arc::new(relay_client::infrastructure::input_injection::WindowsKeyInjector::new())
    }

    #[cfg(not(target_os = "windows"))]
    {
        warn!("no key injector for this platform; key events are only logged");
        Arc::new(relay_client::infrastructure::input_injection::MockKeyInjector::new())
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let app_config = match &cli.config {
        Some(path) => config::load_config_from(path),
        None => config::load_config(),
    }
    .context("failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&app_config.relay.log_level)),
        )
        .init();

    match cli.command {
        Command::Address { url } => {
            println!("{}", parse_descriptor(&url)?.address());
        }
        Command::Invite { url } => {
            println!("{}", parse_descriptor(&url)?.to_invitation_url());
        }
        Command::Relay { url } => {
            let url = url
                .or_else(|| app_config.connection.url.clone())
                .context("no pairing URL given (use --url, RELAY_URL or [connection] url)")?;
            run_relay(parse_descriptor(&url)?, &app_config).await?;
        }
    }
    Ok(())
}

async fn run_relay(descriptor: ConnectionDescriptor, app_config: &AppConfig) -> anyhow::Result<()> {
    let synthesizer = InputSynthesizer::new(platform_injector());
    let host = CommandHost::from_bindings(&app_config.commands, &synthesizer)
        .context("invalid [[commands]] entry")?;
    let use_case = DispatchGestureUseCase::new(synthesizer);

    info!(
        address = %descriptor.address(),
        role = %descriptor.role(),
        insecure = descriptor.insecure(),
        state = %ConnectionState::Connecting,
        "session starting"
    );
    info!(state = %ConnectionState::Connected, commands = host.commands().len(), "reading events from stdin");

    let mut reader = EventReader::new(tokio::io::BufReader::new(tokio::io::stdin()));
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        let next = tokio::select! {
            next = reader.next_event() => next,
            _ = &mut ctrl_c => {
                info!("received Ctrl+C");
                break;
            }
        };

        match next {
            Ok(Some(InboundEvent::Key(event))) => {
                if let Err(e) = use_case.handle_key(&event) {
                    error!("key replay failed: {e}");
                }
            }
            Ok(Some(InboundEvent::BrailleInput(raw))) => {
                let gesture = GestureDescriptor::from_raw(raw);
                match use_case.handle_gesture(gesture, &host.snapshot()) {
                    Ok(outcome) => tracing::debug!(?outcome, "gesture dispatched"),
                    Err(e) => error!("gesture dispatch failed: {e}"),
                }
            }
            Ok(None) => {
                info!("end of input");
                break;
            }
            Err(e) if e.is_fatal() => return Err(e).context("inbound stream failed"),
            Err(e) => warn!("{e}"),
        }
    }

    info!(state = %ConnectionState::Disconnecting, "session closing");
    info!(state = %ConnectionState::Disconnected, "session closed");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
