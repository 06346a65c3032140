//! Settings page and endpoint for changing the monthly threshold.

use std::sync::{Arc, Mutex};

use axum::{
    Extension, Form,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    alert::Alert,
    auth::UserID,
    endpoints,
    html::{FORM_CONTAINER_STYLE, InputField, base, submit_button},
    navigation::NavBar,
    settings::{get_user_settings, update_user_settings},
};

/// The state needed for the settings page and endpoint.
#[derive(Debug, Clone)]
pub struct SettingsState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for SettingsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SettingsForm {
    pub monthly_threshold: i64,
}

/// Render the settings page.
pub async fn get_settings_page(
    State(state): State<SettingsState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let settings = get_user_settings(user_id, &connection)
        .inspect_err(|error| tracing::error!("Failed to get settings for user {user_id}: {error}"))?;

    Ok(settings_view(settings.monthly_threshold).into_response())
}

/// Save the monthly threshold and respond with an alert.
pub async fn update_settings_endpoint(
    State(state): State<SettingsState>,
    Extension(user_id): Extension<UserID>,
    Form(form): Form<SettingsForm>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match update_user_settings(user_id, form.monthly_threshold, &connection) {
        Ok(settings) => Alert::Success {
            message: "Settings saved".to_owned(),
            details: format!(
                "Months with {} or more due will be highlighted.",
                settings.monthly_threshold
            ),
        }
        .into_response(),
        Err(error @ Error::InvalidThreshold(_)) => error.into_alert_response(),
        Err(error) => {
            tracing::error!("Could not update settings for user {user_id}: {error}");
            error.into_alert_response()
        }
    }
}

fn settings_view(monthly_threshold: i64) -> Markup {
    let nav_bar = NavBar::new(endpoints::SETTINGS_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold mb-4 self-start" { "Settings" }

            form
                hx-put=(endpoints::PUT_SETTINGS)
                hx-target-error="#alert-container"
                hx-swap="none"
                class="w-full space-y-4 md:space-y-6"
            {
                (InputField::new("monthly_threshold", "Monthly Threshold", "number")
                    .min("0")
                    .value(monthly_threshold)
                    .into_html())

                p class="text-sm text-gray-500 dark:text-gray-400"
                {
                    "Months where the bills due add up to this amount or more are highlighted on the dashboard."
                }

                (submit_button("Save"))
            }
        }
    };

    base("Settings", &content)
}
