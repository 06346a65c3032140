//! The bills page, listing a user's bills grouped by the years they are paid in.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    auth::UserID,
    bill::{Bill, list_bills},
    endpoints,
    html::{
        BUTTON_DELETE_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base,
    },
    navigation::NavBar,
    summary::{YearGroup, group_bills_by_year},
};

/// The state needed for the bills page.
#[derive(Debug, Clone)]
pub struct BillsPageState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for BillsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the bills page, one table per year.
pub async fn get_bills_page(
    State(state): State<BillsPageState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let bills = list_bills(Some(user_id), &connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve bills: {error}"))?;

    let year_groups = group_bills_by_year(&bills);

    Ok(bills_view(&year_groups).into_response())
}

fn bill_row(bill: &Bill) -> Markup {
    let edit_url = endpoints::format_endpoint(endpoints::EDIT_BILL_VIEW, bill.id);
    let delete_url = endpoints::format_endpoint(endpoints::DELETE_BILL, bill.id);
    let confirm_message = format!("Are you sure you want to delete '{}'?", bill.name);

    html!(
        tr class=(TABLE_ROW_STYLE) data-bill-id=(bill.id)
        {
            td class=(TABLE_CELL_STYLE)
            {
                p class="font-medium text-gray-900 dark:text-white" { (bill.name) }

                @if !bill.description.is_empty() {
                    p class="text-xs" { (bill.description) }
                }
            }
            td class=(TABLE_CELL_STYLE) { (bill.total_amount) }
            td class=(TABLE_CELL_STYLE) { (bill.installment_count) }
            td class=(TABLE_CELL_STYLE) { (bill.monthly_amount) }
            td class=(TABLE_CELL_STYLE) { (bill.first_month()) " to " (bill.last_month()) }
            td class=(TABLE_CELL_STYLE)
            {
                div class="flex gap-4"
                {
                    a href=(edit_url) class=(LINK_STYLE) { "Edit" }

                    button
                        hx-delete=(delete_url)
                        hx-confirm=(confirm_message)
                        hx-target-error="#alert-container"
                        class=(BUTTON_DELETE_STYLE)
                    {
                        "Delete"
                    }
                }
            }
        }
    )
}

fn year_table(group: &YearGroup) -> Markup {
    html!(
        section class="dark:bg-gray-800 lg:max-w-5xl lg:w-full lg:mx-auto" data-year=(group.year)
        {
            h2 class="text-lg font-semibold py-2" { (group.year) }

            div class="overflow-x-auto"
            {
                table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Bill" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Total" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Installments" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Monthly" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Paid" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                        }
                    }

                    tbody
                    {
                        @for bill in &group.bills {
                            (bill_row(bill))
                        }
                    }
                }
            }
        }
    )
}

fn bills_view(year_groups: &[YearGroup]) -> Markup {
    let new_bill_route = endpoints::NEW_BILL_VIEW;
    let nav_bar = NavBar::new(endpoints::BILLS_VIEW).into_html();

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full lg:max-w-5xl"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "Bills" }

                    a href=(new_bill_route) class=(LINK_STYLE) { "Add Bill" }
                }

                @for group in year_groups {
                    (year_table(group))
                }

                @if year_groups.is_empty() {
                    p class="text-center text-gray-500 dark:text-gray-400" data-empty="true"
                    {
                        "No bills yet. "
                        a href=(new_bill_route) class=(LINK_STYLE) { "Add your first bill" }
                    }
                }
            }
        }
    );

    base("Bills", &content)
}
