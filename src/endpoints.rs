//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/bills/{bill_id}', use [format_endpoint].

/// The root route which redirects to the dashboard or log in page.
pub const ROOT: &str = "/";
/// The landing page for logged in users, showing the monthly payments.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page listing a user's bills grouped by year.
pub const BILLS_VIEW: &str = "/bills";
/// The page for creating a new bill.
pub const NEW_BILL_VIEW: &str = "/bills/new";
/// The page for editing an existing bill.
pub const EDIT_BILL_VIEW: &str = "/bills/{bill_id}/edit";
/// The page for changing the user's settings.
pub const SETTINGS_VIEW: &str = "/settings";
/// The route for getting the registration page.
pub const REGISTER_VIEW: &str = "/register";
/// The route for getting the log in page.
pub const LOG_IN_VIEW: &str = "/log_in";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route for logging in a user.
pub const LOG_IN_API: &str = "/api/log_in";
/// The route for the client to log out the current user.
pub const LOG_OUT: &str = "/api/log_out";
/// The route to create users.
pub const USERS: &str = "/api/users";
/// The route to create a bill.
pub const POST_BILL: &str = "/api/bills";
/// The route to update a bill.
pub const PUT_BILL: &str = "/api/bills/{bill_id}";
/// The route to delete a bill.
pub const DELETE_BILL: &str = "/api/bills/{bill_id}";
/// The route to update the user's settings.
pub const PUT_SETTINGS: &str = "/api/settings";
/// The route for the monthly and yearly summaries as JSON.
pub const SUMMARY_API: &str = "/api/summary";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/bills/{bill_id}', '{bill_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_string();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|offset| param_start + offset + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
