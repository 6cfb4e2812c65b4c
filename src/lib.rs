//! Piton is a web app for tracking income and recurring payments.
//!
//! This library provides a REST API that directly serves HTML pages. The
//! income page charts the total income for each calendar month, see
//! [aggregate] for how records are bucketed.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod aggregation;
mod alert;
mod app_state;
mod date;
mod db;
mod endpoints;
mod error;
mod error_page;
mod html;
mod income;
mod logging;
mod navigation;
mod record;
mod recurring;
mod routing;
mod timezone;

#[cfg(test)]
mod test_utils;

pub use aggregation::{Bucket, MONTHS_IN_YEAR, MonthlyBuckets, MonthlyRecord, aggregate};
pub use app_state::AppState;
pub use date::{CalendarDate, DateFormat};
pub use db::initialize as initialize_db;
pub use error::Error;
pub use logging::logging_middleware;
pub use routing::build_router;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install the terminate signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let signal_name = tokio::select! {
        _ = ctrl_c => "ctrl+c",
        _ = terminate => "terminate",
    };

    tracing::info!("Received {signal_name} signal, shutting down.");
    handle.graceful_shutdown(Some(Duration::from_secs(1)));
}
