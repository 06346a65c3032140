//! Bill creation page and endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Extension, Form,
    extract::{FromRef, State},
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
        BillFormData, create_bill,
        form::{BillFormValues, FormAction, bill_form_view},
    },
    endpoints,
    html::{FORM_CONTAINER_STYLE, base},
    navigation::NavBar,
};

/// The state needed for creating a bill.
#[derive(Debug, Clone)]
pub struct CreateBillEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateBillEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the bill creation page.
pub async fn get_new_bill_page() -> Response {
    new_bill_view().into_response()
}

/// Handle bill creation form submission.
///
/// On success the client is redirected to the bills page, which is rendered
/// from a fresh read of the user's bills.
pub async fn create_bill_endpoint(
    State(state): State<CreateBillEndpointState>,
    Extension(user_id): Extension<UserID>,
    Form(form): Form<BillFormData>,
) -> Response {
    let new_bill = match form.into_new_bill() {
        Ok(new_bill) => new_bill,
        Err(error) => return error.into_alert_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match create_bill(new_bill, user_id, &connection) {
        Ok(_) => (
            HxRedirect(endpoints::BILLS_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating a bill: {error}");

            error.into_alert_response()
        }
    }
}

fn new_bill_view() -> Markup {
    let nav_bar = NavBar::new(endpoints::NEW_BILL_VIEW).into_html();
    let form = bill_form_view(
        FormAction::Post(endpoints::POST_BILL),
        &BillFormValues::default(),
        "Add Bill",
        "",
    );

    let content = html! {
        (nav_bar)
        div class=(FORM_CONTAINER_STYLE) { (form) }
    };

    base("Add Bill", &content)
}


#[cfg(test)]
mod create_bill_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Extension, Form,
        extract::State,
        http::StatusCode,
        response::IntoResponse,
    };
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        auth::UserID,
        bill::{BillFormData, create::CreateBillEndpointState, create_bill_endpoint, list_bills},
        db::initialize,
        endpoints,
        test_utils::{assert_hx_redirect, create_test_user},
    };

    fn get_state() -> (CreateBillEndpointState, UserID) {
        let connection = Connection::open_in_memory().expect("Could not open in-memory database");
        initialize(&connection).expect("Could not initialize database");
        let user = create_test_user("alice@example.com", &connection);

        (
            CreateBillEndpointState {
                db_connection: Arc::new(Mutex::new(connection)),
            },
            user.id,
        )
    }

    fn form(name: &str, total_amount: i64, installment_count: u32) -> BillFormData {
        BillFormData {
            name: name.to_owned(),
            description: "New laptop".to_owned(),
            total_amount,
            installment_count,
            started_at: date!(2025 - 01 - 10),
        }
    }

    #[tokio::test]
    async fn can_create_bill() {
        let (state, user_id) = get_state();

        let response = create_bill_endpoint(
            State(state.clone()),
            Extension(user_id),
            Form(form("Laptop", 100, 3)),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::BILLS_VIEW);

        let bills = list_bills(Some(user_id), &state.db_connection.lock().unwrap()).unwrap();
        assert_eq!(bills.len(), 1);
        assert_eq!(bills[0].name.as_ref(), "Laptop");
        assert_eq!(bills[0].monthly_amount, 33);
    }

    #[tokio::test]
    async fn rejects_empty_name() {
        let (state, user_id) = get_state();

        let response = create_bill_endpoint(
            State(state.clone()),
            Extension(user_id),
            Form(form("  ", 100, 3)),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bills = list_bills(Some(user_id), &state.db_connection.lock().unwrap()).unwrap();
        assert!(bills.is_empty());
    }

    #[tokio::test]
    async fn rejects_zero_installments() {
        let (state, user_id) = get_state();

        let response = create_bill_endpoint(
            State(state.clone()),
            Extension(user_id),
            Form(form("Laptop", 100, 0)),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bills = list_bills(Some(user_id), &state.db_connection.lock().unwrap()).unwrap();
        assert!(bills.is_empty());
    }

    #[tokio::test]
    async fn rejects_negative_total() {
        let (state, user_id) = get_state();

        let response = create_bill_endpoint(
            State(state),
            Extension(user_id),
            Form(form("Laptop", -100, 3)),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
