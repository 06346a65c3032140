//! Per-user settings, currently the monthly threshold used to flag expensive months.

mod db;
mod page;

use serde::Serialize;

pub use db::{create_user_settings_table, get_user_settings, update_user_settings};
pub use page::{get_settings_page, update_settings_endpoint};

use crate::Error;

/// The threshold used for users who have not chosen one.
pub const DEFAULT_MONTHLY_THRESHOLD: i64 = 1_000_000;

/// A user's settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UserSettings {
    /// Months whose total due is at least this amount are flagged.
    pub monthly_threshold: i64,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            monthly_threshold: DEFAULT_MONTHLY_THRESHOLD,
        }
    }
}

fn validate_threshold(monthly_threshold: i64) -> Result<i64, Error> {
    if monthly_threshold < 0 {
        Err(Error::InvalidThreshold(monthly_threshold))
    } else {
        Ok(monthly_threshold)
    }
}
