//! Bill Tracker is a web app for keeping track of purchases paid off in
//! monthly installments.
//!
//! Each bill is spread over consecutive calendar months starting from its
//! start date. From the bill list the app derives how much is due in every
//! month, flags months whose total reaches the user's threshold and groups
//! bills by the years they touch.
//!
//! This library provides a server that directly serves HTML pages, plus a
//! JSON summary endpoint.

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod auth;
mod bill;
mod db;
mod endpoints;
mod error;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod routing;
mod settings;
mod summary;
#[cfg(test)]
mod test_utils;

pub use app_state::{AppState, create_cookie_key};
pub use auth::{
    Email, PasswordHash, User, UserID, ValidatedPassword, create_user, get_user_by_email,
    get_user_by_id,
};
pub use bill::{
    Bill, BillId, BillName, BillUpdate, InstallmentCount, Installment, MonthKey, NewBill,
    Schedule, create_bill, delete_bill, derive_monthly_amount, expand_schedule, get_bill,
    list_bills, update_bill,
};
pub use db::initialize as initialize_db;
pub use error::Error;
pub use logging::logging_middleware;
pub use routing::build_router;
pub use settings::{
    DEFAULT_MONTHLY_THRESHOLD, UserSettings, get_user_settings, update_user_settings,
};
pub use summary::{
    BillSnapshot, BillSummary, MonthStatus, YearGroup, aggregate_monthly_payments,
    evaluate_threshold, group_bills_by_year, is_over_threshold, monthly_payments_by_key,
    sort_monthly_payments,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
