//! Read-only REST API over a computed estimate.
//!
//! Provides three GET endpoints:
//! - `/sizing`: plant capacity and equipment counts
//! - `/monthly`: the twelve monthly records, optionally one month
//! - `/summary`: annual roll-up

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tracing::info;

use crate::model::{AnnualSummary, MonthlyMetrics};
use crate::plant::PlantSizingResult;
use crate::runner::Estimate;

/// Immutable application state shared across all request handlers.
///
/// Built once after the estimate is computed and wrapped in `Arc`; all data
/// is read-only so no locks are needed.
pub struct AppState {
    /// Plant sizing for the configured load.
    pub sizing: PlantSizingResult,
    /// Monthly series, January first.
    pub monthly: Vec<MonthlyMetrics>,
    /// Annual roll-up of `monthly`.
    pub summary: AnnualSummary,
}

impl From<Estimate> for AppState {
    fn from(e: Estimate) -> Self {
        Self {
            sizing: e.sizing,
            monthly: e.monthly,
            summary: e.summary,
        }
    }
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/sizing", get(handlers::get_sizing))
        .route("/monthly", get(handlers::get_monthly))
        .route("/summary", get(handlers::get_summary))
        .with_state(state)
}

/// Binds to the given address and serves the API until the server stops.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
