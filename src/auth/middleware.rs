//! Route guards that check the auth cookie and keep active sessions alive.

use axum::{
    extract::{FromRef, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use axum_htmx::HxRedirect;
use time::Duration;

use crate::{
    AppState,
    auth::cookie::{extend_auth_cookie_duration_if_needed, get_user_id_from_auth_cookie},
    endpoints,
};

/// The state needed for the auth middleware
#[derive(Clone)]
pub struct AuthState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// The duration for which cookies used for authentication are valid.
    pub cookie_duration: Duration,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            cookie_duration: state.cookie_duration,
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<AuthState> for Key {
    fn from_ref(state: &AuthState) -> Self {
        state.cookie_key.clone()
    }
}

/// How a request without a valid auth cookie is sent to the log-in page.
#[derive(Debug, Clone, Copy)]
enum LogInRedirect {
    /// A regular redirect for page loads.
    Browser,
    /// The HX-Redirect header so htmx navigates instead of swapping in the
    /// log-in page.
    Htmx,
}

impl IntoResponse for LogInRedirect {
    fn into_response(self) -> Response {
        match self {
            LogInRedirect::Browser => Redirect::to(endpoints::LOG_IN_VIEW).into_response(),
            LogInRedirect::Htmx => (
                HxRedirect(endpoints::LOG_IN_VIEW.to_owned()),
                StatusCode::OK,
            )
                .into_response(),
        }
    }
}

async fn guard(
    state: AuthState,
    mut request: Request,
    next: Next,
    on_missing_auth: LogInRedirect,
) -> Response {
    let jar = PrivateCookieJar::from_headers(request.headers(), state.cookie_key.clone());

    let user_id = match get_user_id_from_auth_cookie(&jar) {
        Ok(user_id) => user_id,
        Err(error) => {
            tracing::debug!("Rejecting request to {}: {error}", request.uri());
            return on_missing_auth.into_response();
        }
    };

    request.extensions_mut().insert(user_id);
    let response = next.run(request).await;

    let jar = extend_auth_cookie_duration_if_needed(jar.clone(), state.cookie_duration)
        .unwrap_or_else(|error| {
            tracing::error!("Could not extend the auth cookie for user {user_id}: {error}");
            jar
        });

    (jar, response).into_response()
}

/// Middleware that only lets requests with a valid auth cookie through.
///
/// The user ID from the cookie is added to the request extensions, so
/// handlers can take `Extension(user_id): Extension<UserID>`. The cookie's
/// expiry is pushed back on the way out. Requests without a valid cookie are
/// redirected to the log-in page.
pub async fn auth_guard(State(state): State<AuthState>, request: Request, next: Next) -> Response {
    guard(state, request, next, LogInRedirect::Browser).await
}

/// Same as [auth_guard], but for routes called by htmx.
pub async fn auth_guard_hx(
    State(state): State<AuthState>,
    request: Request,
    next: Next,
) -> Response {
    guard(state, request, next, LogInRedirect::Htmx).await
}
