//! Main entry point for the ytdl CLI

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ytdl::cli::{commands, map_user_error, Cli, Command};

#[tokio::main]
async fn main() {
    init_logging();

    let cli = Cli::parse();

    let cancel = CancellationToken::new();
    let signal_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!("ctrl-c received, cancelling");
            signal_token.cancel();
        }
    });

    let result = match &cli.command {
        Command::Download(args) => commands::run_download(&cancel, args).await,
        Command::Info(args) => commands::run_info(&cancel, args).await,
        Command::Version => {
            commands::run_version();
            Ok(())
        }
    };

    if let Err(err) = result {
        eprintln!("{}", map_user_error(&err).format());
        std::process::exit(1);
    }
}

/// Initialize the tracing subscriber; `RUST_LOG` controls the filter.
fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}
