//! The dashboard page and the JSON summary endpoint.

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex},
};

use axum::{
    Extension, Json,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::PrivateCookieJar;
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Serialize;

use crate::{
    AppState, Error,
    auth::{UserID, get_user_id_from_auth_cookie},
    endpoints,
    html::{LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, base, link},
    navigation::NavBar,
    summary::{
        BillSnapshot, BillSummary, MonthStatus, aggregate_monthly_payments, monthly_payments_by_key,
    },
};

const OVER_THRESHOLD_ROW_STYLE: &str = "bg-red-50 border-b dark:bg-red-900/30 dark:border-gray-700 \
    text-red-800 dark:text-red-300 font-semibold";
const UNDER_THRESHOLD_ROW_STYLE: &str = "bg-white border-b dark:bg-gray-800 dark:border-gray-700";

/// The state needed for the dashboard and summary endpoint.
#[derive(Debug, Clone)]
pub struct SummaryState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for SummaryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Display the amount due in each month, highlighting months that reach the
/// user's threshold.
pub async fn get_dashboard_page(
    State(state): State<SummaryState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let snapshot = BillSnapshot::load(Some(user_id), &connection)
        .inspect_err(|error| tracing::error!("could not load bills for user {user_id}: {error}"))?;

    Ok(dashboard_view(&snapshot.summarize()).into_response())
}

/// The JSON body of the summary endpoint.
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    /// Total due per month keyed by `YYYY-MM`.
    pub monthly_payments: BTreeMap<String, i64>,
    #[serde(flatten)]
    pub summary: BillSummary,
}

/// Return the derived views as JSON.
///
/// Requests without a valid auth cookie get an empty summary with the
/// default threshold instead of an error.
pub async fn get_summary(
    State(state): State<SummaryState>,
    jar: PrivateCookieJar,
) -> Result<Response, Error> {
    let user_id = get_user_id_from_auth_cookie(&jar).ok();

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let snapshot = BillSnapshot::load(user_id, &connection)
        .inspect_err(|error| tracing::error!("could not load bill summary: {error}"))?;

    let response = SummaryResponse {
        monthly_payments: monthly_payments_by_key(&aggregate_monthly_payments(&snapshot.bills)),
        summary: snapshot.summarize(),
    };

    Ok(Json(response).into_response())
}

fn month_row(status: &MonthStatus) -> Markup {
    let style = if status.is_over_threshold {
        OVER_THRESHOLD_ROW_STYLE
    } else {
        UNDER_THRESHOLD_ROW_STYLE
    };

    html!(
        tr class=(style) data-month=(status.month) data-over-threshold=(status.is_over_threshold)
        {
            td class=(TABLE_CELL_STYLE) { (status.month) }
            td class={(TABLE_CELL_STYLE) " text-right tabular-nums"} { (status.total) }
        }
    )
}

fn dashboard_view(summary: &BillSummary) -> Markup {
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW).into_html();

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full lg:max-w-3xl"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "Monthly Payments" }

                    p class="text-sm text-gray-500 dark:text-gray-400"
                    {
                        "Threshold: " (summary.monthly_threshold) " "
                        a href=(endpoints::SETTINGS_VIEW) class=(LINK_STYLE) { "Change" }
                    }
                }

                @if summary.months.is_empty() {
                    p class="text-center text-gray-500 dark:text-gray-400" data-empty="true"
                    {
                        "Nothing due yet. "
                        (link(endpoints::NEW_BILL_VIEW, "Add a bill"))
                        " to see the monthly totals."
                    }
                } @else {
                    div class="overflow-x-auto rounded-lg shadow"
                    {
                        table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                        {
                            thead class=(TABLE_HEADER_STYLE)
                            {
                                tr
                                {
                                    th scope="col" class=(TABLE_CELL_STYLE) { "Month" }
                                    th scope="col" class={(TABLE_CELL_STYLE) " text-right"} { "Total Due" }
                                }
                            }

                            tbody
                            {
                                @for status in &summary.months {
                                    (month_row(status))
                                }
                            }
                        }
                    }
                }
            }
        }
    );

    base("Dashboard", &content)
}


#[cfg(test)]
mod summary_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, http::StatusCode};
    use axum_extra::extract::PrivateCookieJar;
    use rusqlite::Connection;
    use serde_json::Value;
    use time::{Duration, macros::date};

    use crate::{
        app_state::create_cookie_key,
        auth::{UserID, set_auth_cookie},
        bill::{BillName, InstallmentCount, NewBill, create_bill},
        db::initialize,
        settings::DEFAULT_MONTHLY_THRESHOLD,
        test_utils::create_test_user,
    };

    use super::{SummaryState, get_summary};

    fn get_state() -> (SummaryState, UserID) {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        let user = create_test_user("alice@example.com", &connection);
        let bill = NewBill::new(
            BillName::new_unchecked("Sofa"),
            "",
            400,
            InstallmentCount::new(4).unwrap(),
            date!(2024 - 11 - 15),
        )
        .unwrap();
        create_bill(bill, user.id, &connection).unwrap();

        (
            SummaryState {
                db_connection: Arc::new(Mutex::new(connection)),
            },
            user.id,
        )
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Could not read response body");

        serde_json::from_slice(&body).expect("Response body is not JSON")
    }

    #[tokio::test]
    async fn logged_out_summary_is_empty() {
        let (state, _) = get_state();
        let jar = PrivateCookieJar::new(create_cookie_key("nafstenoas"));

        let response = get_summary(State(state), jar).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["months"], Value::Array(vec![]));
        assert_eq!(body["years"], Value::Array(vec![]));
        assert_eq!(body["monthly_payments"], serde_json::json!({}));
        assert_eq!(body["monthly_threshold"], DEFAULT_MONTHLY_THRESHOLD);
    }

    #[tokio::test]
    async fn logged_in_summary_has_months_and_years() {
        let (state, user_id) = get_state();
        let jar = set_auth_cookie(
            PrivateCookieJar::new(create_cookie_key("nafstenoas")),
            user_id,
            Duration::minutes(5),
        )
        .unwrap();

        let response = get_summary(State(state), jar).await.unwrap();

        let body = json_body(response).await;
        assert_eq!(
            body["monthly_payments"],
            serde_json::json!({
                "2024-11": 100,
                "2024-12": 100,
                "2025-01": 100,
                "2025-02": 100,
            })
        );
        assert_eq!(body["months"][0]["month"], "2024-11");
        assert_eq!(body["months"][0]["is_over_threshold"], false);
        assert_eq!(body["years"][0]["year"], 2025);
        assert_eq!(body["years"][1]["year"], 2024);
        assert_eq!(body["years"][1]["bills"][0]["name"], "Sofa");
    }
}
