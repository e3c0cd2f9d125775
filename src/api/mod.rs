//! HTTP API module for the childcare cost engine.
//!
//! `POST /evaluate` evaluates one scenario, `POST /compare` compares two
//! and `GET /brackets` lists the loaded income bracket table.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CompareRequest, EvaluateRequest};
pub use response::{
    ApiError, ApiErrorResponse, BracketTableResponse, ComparisonReport, ScenarioReport,
};
pub use state::AppState;

use tokio::net::TcpListener;
use tracing::info;

use crate::config::ConfigLoader;

/// Serves the API on `addr` until the process is stopped.
pub async fn run_http_server(config: ConfigLoader, addr: &str) -> std::io::Result<()> {
    let table = config.settings().name.clone();
    let app = create_router(AppState::new(config));

    let listener = TcpListener::bind(addr).await?;
    info!(address = %listener.local_addr()?, table = %table, "Childcare cost engine listening");

    axum::serve(listener, app).await
}
