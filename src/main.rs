mod api;
mod bootstrap;
mod core;
mod holdings;
mod portfolio;
mod screen;

use crate::core::AppError;
use crate::holdings::{HoldingsClient, HoldingsSource};
use crate::screen::{HoldingsScreen, Status};
use crate::{core::AppConfig, core::AppState};
use std::sync::Arc;
use tracing::{error, info};

fn usage() -> &'static str {
    r#"Usage:
    cargo run -- server
    cargo run -- show [--expanded]
    cargo run -- json

Env:
    HOLDINGS_BASE_URL (default: the public mock endpoint)
    HOLDINGS_PATH (default /)
    HOLDINGS_TIMEOUT_SECS (default: no timeout)

Env (server):
    SERVER_ADDR (default 127.0.0.1:8080)
    STARTUP_FETCH (default 1; fetch once before listening)

Logging:
    RUST_LOG (default info)
    LOG_FORMAT (text | json)
"#
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    let mut args = std::env::args().skip(1);
    let cmd = args.next().unwrap_or_else(|| "server".to_string());

    match cmd.as_str() {
        "server" => run_server().await?,
        "show" => {
            let mut expanded = false;
            for a in args {
                match a.as_str() {
                    "--expanded" => expanded = true,
                    _ => {
                        eprintln!("Unknown flag for show: {a}\n\n{}", usage());
                        std::process::exit(2);
                    }
                }
            }
            if !run_show(expanded).await? {
                std::process::exit(1);
            }
        }
        "json" => {
            let config = AppConfig::from_env()?;
            bootstrap::init_logging(config.log_json);
            let client = holdings_client(&config)?;
            let snapshot = portfolio::PortfolioSnapshot::new(client.fetch().await?);
            println!("{}", serde_json::to_string_pretty(&*snapshot)?);
        }
        "-h" | "--help" | "help" => println!("{}", usage()),
        _ => {
            eprintln!("Unknown command: {}\n\n{}", cmd, usage());
            std::process::exit(2);
        }
    }

    Ok(())
}

fn holdings_client(config: &AppConfig) -> Result<HoldingsClient, AppError> {
    Ok(HoldingsClient::new(
        config.holdings_url.clone(),
        config.request_timeout,
    )?)
}

/// Fetch once and print the rendered screen. Returns false if the fetch failed.
async fn run_show(expanded: bool) -> Result<bool, AppError> {
    let config = AppConfig::from_env()?;
    bootstrap::init_logging(config.log_json);

    let screen = HoldingsScreen::new(Arc::new(holdings_client(&config)?));
    if expanded {
        screen.toggle_portfolio();
    }
    screen.refresh().await;

    let model = screen.model();
    print!("{}", crate::screen::render(&model));
    Ok(model.state.status() == Status::Success)
}

async fn run_server() -> Result<(), AppError> {
    let config = AppConfig::from_env()?;
    bootstrap::init_logging(config.log_json);

    let addr: std::net::SocketAddr =
        config
            .server_addr
            .parse()
            .map_err(|e: std::net::AddrParseError| AppError::InvalidConfig {
                key: "SERVER_ADDR",
                message: e.to_string(),
            })?;

    let client = holdings_client(&config)?;
    let state = AppState {
        config: Arc::new(config),
        screen: Arc::new(HoldingsScreen::new(Arc::new(client))),
    };

    // Not awaited: the listener comes up even if the endpoint never answers.
    let _startup_fetch = bootstrap::initialize_on_startup(&state);

    let app = api::router(state);
    info!(%addr, "listening");
    axum::Server::try_bind(&addr)
        .map_err(|e| AppError::Server(format!("bind {addr}: {e}")))?
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Server(e.to_string()))?;
    Ok(())
}

async fn shutdown_signal() {
    wait_for_shutdown(tokio::signal::ctrl_c()).await
}

async fn wait_for_shutdown(signal: impl std::future::Future<Output = std::io::Result<()>>) {
    if let Err(e) = signal.await {
        // Without a handler, keep serving until the process is killed.
        error!(error = %e, "failed to install ctrl-c handler");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
