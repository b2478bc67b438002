//! relayd - line-based private message relay.

use clap::Parser;
use relayd::cli::Args;
use relayd::config::validate;
use relayd::{Gateway, Hub, telemetry};
use std::sync::Arc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init();

    let args = Args::parse();
    let config_path = args.config.clone();
    let config = args.into_config().map_err(|e| {
        error!(path = ?config_path, error = %e, "Failed to load config");
        e
    })?;

    if let Err(errors) = validate(&config) {
        for e in &errors {
            error!(error = %e, "Invalid configuration");
        }
        return Err(anyhow::anyhow!(
            "Refusing to start with {} configuration error(s)",
            errors.len()
        ));
    }

    info!(
        addr = %config.listen.display_addr(),
        max_users = config.server.max_users,
        "Starting relayd"
    );

    let hub = Arc::new(Hub::new(&config));
    let gateway = Gateway::bind(&config.listen, Arc::clone(&hub)).await?;

    tokio::spawn(async move {
        shutdown_signal().await;
        hub.lifecycle.shutdown();
    });

    gateway.run().await
}

/// Resolves on Ctrl+C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C"),
        _ = terminate => info!("Received SIGTERM"),
    }
}
