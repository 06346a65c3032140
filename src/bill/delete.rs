//! Bill deletion endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use rusqlite::Connection;

use crate::{
    AppState, Error,
    auth::UserID,
    bill::{BillId, delete_bill},
    endpoints,
};

/// The state needed for deleting a bill.
#[derive(Debug, Clone)]
pub struct DeleteBillEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteBillEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Handle bill deletion.
///
/// A bill can appear under several years on the bills page, so the client is
/// sent back to the bills page to render the groups again rather than
/// removing a single row.
pub async fn delete_bill_endpoint(
    Path(bill_id): Path<BillId>,
    State(state): State<DeleteBillEndpointState>,
    Extension(user_id): Extension<UserID>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match delete_bill(bill_id, user_id, &connection) {
        Ok(_) => (
            HxRedirect(endpoints::BILLS_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(Error::DeleteMissingBill) => Error::DeleteMissingBill.into_alert_response(),
        Err(error) => {
            tracing::error!("An unexpected error occurred while deleting bill {bill_id}: {error}");
            error.into_alert_response()
        }
    }
}
