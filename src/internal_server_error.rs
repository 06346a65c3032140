//! The 500 page and the htmx redirect that sends clients to it.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{endpoints, html::error_view};

/// Renders the 500 internal server error page.
pub struct InternalServerError;

impl IntoResponse for InternalServerError {
    fn into_response(self) -> Response {
        let page = error_view(
            "Internal Server Error",
            "500",
            "Sorry, something went wrong.",
            "Try again in a little while. If it keeps happening, check the server logs.",
        );

        (StatusCode::INTERNAL_SERVER_ERROR, page).into_response()
    }
}

pub async fn get_internal_server_error_page() -> Response {
    InternalServerError.into_response()
}

/// Send an htmx request to the 500 page.
///
/// Only htmx understands the `HX-Redirect` header, handlers for plain GET
/// requests should return [axum::response::Redirect] instead.
pub fn get_internal_server_error_redirect() -> Response {
    (
        HxRedirect(endpoints::INTERNAL_ERROR_VIEW.to_owned()),
        StatusCode::INTERNAL_SERVER_ERROR,
    )
        .into_response()
}
