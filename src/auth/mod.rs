//! Accounts, password hashing and cookie sessions.
//!
//! Every bill and setting belongs to the user whose ID the auth middleware
//! puts into the request extensions.

mod cookie;
mod log_in;
mod log_out;
mod middleware;
mod password;
mod register_user;
mod user;

pub use cookie::{
    DEFAULT_COOKIE_DURATION, get_user_id_from_auth_cookie, invalidate_auth_cookie, set_auth_cookie,
};
pub use log_in::{get_log_in_page, post_log_in};
pub use log_out::get_log_out;
pub use middleware::{AuthState, auth_guard, auth_guard_hx};
pub use password::{PasswordHash, ValidatedPassword};
pub use register_user::{get_register_page, register_user};
pub use user::{
    Email, User, UserID, create_user, create_user_table, get_user_by_email, get_user_by_id,
};
