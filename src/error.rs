//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{alert::Alert, internal_server_error::InternalServerError, not_found::NotFoundError};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The user provided an invalid combination of email and password.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Either the user ID or expiry cookie is missing from the cookie jar in
    /// the request.
    #[error("no cookies in the cookie jar :(")]
    CookieMissing,

    /// There was an error parsing the date in the cookie or creating the new
    /// expiry date time.
    ///
    /// Callers should pass in the original error as a string and the date
    /// string that caused the error.
    #[error("could not format expiry cookie date-time string \"{1}\": {0}")]
    InvalidDateFormat(String, String),

    /// There is no logged in user to scope a query to.
    ///
    /// Views derived from a user's bills treat this as an empty bill list
    /// rather than a failure.
    #[error("no user is logged in")]
    NotAuthenticated,

    /// The user provided a password that is too easy to guess.
    #[error("password is too weak: {0}")]
    TooWeak(String),

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server.
    /// When communicating with the application client this error should be
    /// replaced with a general error type indicating an internal server error.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// The string is not a valid email address.
    #[error("{0} is not a valid email address")]
    InvalidEmail(String),

    /// The email address is already registered to another user.
    #[error("the email address is already in use")]
    DuplicateEmail,

    /// An empty string was used to create a bill name.
    #[error("Bill name cannot be empty")]
    EmptyBillName,

    /// The bill fields cannot describe a valid installment plan, e.g. zero
    /// installments or a negative total.
    ///
    /// Bills are validated before they are stored so that the schedule
    /// expansion never sees one of these.
    #[error("invalid bill: {0}")]
    InvalidBill(String),

    /// A negative monthly threshold was given.
    #[error("the monthly threshold must not be negative, got {0}")]
    InvalidThreshold(i64),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// Tried to update a bill that does not exist
    #[error("tried to update a bill that is not in the database")]
    UpdateMissingBill,

    /// Tried to delete a bill that does not exist
    #[error("tried to delete a bill that is not in the database")]
    DeleteMissingBill,
}

impl Error {
    /// Whether the error came from the store being unreachable or failing,
    /// as opposed to bad input.
    pub fn is_store_unavailable(&self) -> bool {
        matches!(self, Error::SqlError(_) | Error::DatabaseLockError)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.ends_with("user.email") =>
            {
                Error::DuplicateEmail
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => NotFoundError.into_response(),
            Error::DatabaseLockError => InternalServerError.into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError.into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::EmptyBillName => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid bill name".to_owned(),
                    details: "Bill name cannot be empty.".to_owned(),
                },
            ),
            Error::InvalidBill(reason) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid bill".to_owned(),
                    details: reason,
                },
            ),
            Error::InvalidThreshold(threshold) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid monthly threshold".to_owned(),
                    details: format!(
                        "{threshold} is negative. Enter a threshold of zero or more."
                    ),
                },
            ),
            Error::UpdateMissingBill => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Could not update bill".to_owned(),
                    details: "The bill could not be found.".to_owned(),
                },
            ),
            Error::DeleteMissingBill => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Could not delete bill".to_owned(),
                    details: "The bill could not be found. \
                    Try refreshing the page to see if the bill has already been deleted."
                        .to_owned(),
                },
            ),
            Error::NotAuthenticated => (
                StatusCode::UNAUTHORIZED,
                Alert::Error {
                    message: "Not logged in".to_owned(),
                    details: "Log in again to continue.".to_owned(),
                },
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Something went wrong".to_owned(),
                    details:
                        "An unexpected error occurred, check the server logs for more details."
                            .to_owned(),
                },
            ),
        };

        (status_code, alert.into_html()).into_response()
    }
}

#[cfg(test)]
mod error_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::Error;

    #[test]
    fn no_rows_maps_to_not_found() {
        let error: Error = rusqlite::Error::QueryReturnedNoRows.into();

        assert_eq!(error, Error::NotFound);
    }

    #[test]
    fn store_errors_are_flagged_as_unavailable() {
        assert!(Error::DatabaseLockError.is_store_unavailable());
        assert!(Error::SqlError(rusqlite::Error::InvalidQuery).is_store_unavailable());
        assert!(!Error::InvalidBill("zero installments".to_owned()).is_store_unavailable());
        assert!(!Error::NotAuthenticated.is_store_unavailable());
    }

    #[test]
    fn not_found_renders_404_page() {
        let response = Error::NotFound.into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn missing_bill_alert_is_404() {
        let response = Error::DeleteMissingBill.into_alert_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn invalid_bill_alert_is_400() {
        let response = Error::InvalidBill("zero installments".to_owned()).into_alert_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
