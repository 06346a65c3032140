//! Bill editing page and endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Extension, Form,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    auth::UserID,
    bill::{
        BillFormData, BillId,
        form::{BillFormValues, FormAction, bill_form_view},
        get_bill, update_bill,
    },
    endpoints,
    html::{FORM_CONTAINER_STYLE, base},
    navigation::NavBar,
};

/// The state needed for the edit bill page and endpoint.
#[derive(Debug, Clone)]
pub struct EditBillState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditBillState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the bill editing page.
pub async fn get_edit_bill_page(
    Path(bill_id): Path<BillId>,
    State(state): State<EditBillState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let edit_endpoint = endpoints::format_endpoint(endpoints::EDIT_BILL_VIEW, bill_id);
    let update_endpoint = endpoints::format_endpoint(endpoints::PUT_BILL, bill_id);

    match get_bill(bill_id, user_id, &connection) {
        Ok(bill) => Ok(edit_bill_view(
            &edit_endpoint,
            &update_endpoint,
            &BillFormValues::from(&bill),
            "",
        )
        .into_response()),
        Err(error) => {
            let error_message = match error {
                Error::NotFound => "Bill not found",
                _ => {
                    tracing::error!("Failed to retrieve bill {bill_id}: {error}");
                    "Failed to load bill"
                }
            };

            Ok(edit_bill_view(
                &edit_endpoint,
                &update_endpoint,
                &BillFormValues::default(),
                error_message,
            )
            .into_response())
        }
    }
}

/// Handle bill update form submission.
///
/// The form always carries every field, so the monthly amount is derived
/// again from the submitted total and installment count.
pub async fn update_bill_endpoint(
    Path(bill_id): Path<BillId>,
    State(state): State<EditBillState>,
    Extension(user_id): Extension<UserID>,
    Form(form): Form<BillFormData>,
) -> Response {
    let update = match form.into_update() {
        Ok(update) => update,
        Err(error) => return error.into_alert_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match update_bill(bill_id, update, user_id, &connection) {
        Ok(_) => (
            HxRedirect(endpoints::BILLS_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(Error::UpdateMissingBill) => Error::UpdateMissingBill.into_alert_response(),
        Err(error) => {
            tracing::error!("An unexpected error occurred while updating bill {bill_id}: {error}");
            error.into_alert_response()
        }
    }
}

fn edit_bill_view(
    edit_endpoint: &str,
    update_endpoint: &str,
    values: &BillFormValues,
    error_message: &str,
) -> Markup {
    let nav_bar = NavBar::new(edit_endpoint).into_html();
    let form = bill_form_view(
        FormAction::Put(update_endpoint),
        values,
        "Update Bill",
        error_message,
    );

    let content = html! {
        (nav_bar)
        div class=(FORM_CONTAINER_STYLE) { (form) }
    };

    base("Edit Bill", &content)
}
