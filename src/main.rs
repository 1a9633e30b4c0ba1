//! Relay New Relic alerts and deployments into chat.
//!
//! Each configured token gets its own endpoint, `/webhook/:token`, which is
//! handed to New Relic as a webhook URL. Events arriving there are rendered as
//! Markdown and posted to the chat incoming webhook bound to that token.
//!
//! Configuration is a JSON file; see [config::Config].

use binding::Bindings;
use chat::WebhookClient;
use config::Config;
use dotenvy::dotenv;
use router::Deps;
use std::{env, net::SocketAddr, process, sync::Arc};
use tokio::{net::TcpListener, sync::oneshot};
use tracing::{error, info, warn};

mod binding;
mod chat;
mod config;
mod de;
mod error;
mod newrelic;
mod router;

const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Application entrypoint. Initialises tracing, loads configuration, binds to
/// the configured address, and starts the server.
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_target(false)
        .compact()
        .init();

    let has_dotenv = dotenv().is_ok();
    if !has_dotenv {
        warn!("No .env found");
    }

    let path = env::args()
        .nth(1)
        .or_else(|| env::var("HERALD_CONFIG").ok())
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.into());

    let config = Config::load(&path).unwrap_or_else(|e| {
        error!("{}: {}", path, e);
        process::exit(1);
    });

    let deps = deps(&config).unwrap_or_else(|e| {
        error!("Could not build HTTP client: {}", e);
        process::exit(1);
    });

    let listener = TcpListener::bind(config.listen).await.unwrap_or_else(|e| {
        error!("Could not bind {}: {}", config.listen, e);
        process::exit(1);
    });

    server_(listener, deps).await;
}

/// Build the shared request dependencies from configuration.
fn deps(config: &Config) -> Result<Deps, reqwest::Error> {
    let bindings = Bindings::from(config);
    info!("Loaded {} token(s)", bindings.len());

    Ok(Deps {
        bindings: Arc::new(bindings),
        webhook_client: WebhookClient::new(config.forward_timeout())?,
        max_body_bytes: config.max_body_bytes,
    })
}

/// Initialise a server without graceful shutdown.
async fn server_(listener: TcpListener, deps: Deps) {
    // Giving a receiver that will never resolve.
    server(listener, deps, oneshot::channel::<()>().1).await;
}

/// Initialise a server with graceful shutdown via `rx`.
async fn server(listener: TcpListener, deps: Deps, rx: oneshot::Receiver<()>) {
    match listener.local_addr() {
        Ok(addr) => info!("Listening on {}", addr),
        Err(e) => warn!("Listening on unknown address: {}", e),
    }

    let app = router::new(deps).into_make_service_with_connect_info::<SocketAddr>();

    let res = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            rx.await.ok();
        })
        .await;

    if let Err(e) = res {
        error!("Server failed: {}", e);
    }
}
