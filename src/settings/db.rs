//! Per-user settings storage.
//!
//! A user has no settings row until their settings are first read, at which
//! point a row with the default threshold is created.

use rusqlite::{Connection, OptionalExtension};

use crate::{
    Error,
    auth::UserID,
    settings::{UserSettings, validate_threshold},
};

/// Create the user_settings table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_user_settings_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS user_settings (
            user_id INTEGER PRIMARY KEY,
            monthly_threshold INTEGER NOT NULL,
            FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
        )",
        (),
    )?;

    Ok(())
}

/// Get the settings for `user_id`, creating them with the defaults if the
/// user has none yet.
///
/// # Errors
/// Returns [Error::SqlError] if a query fails.
pub fn get_user_settings(user_id: UserID, connection: &Connection) -> Result<UserSettings, Error> {
    let stored: Option<i64> = connection
        .query_row(
            "SELECT monthly_threshold FROM user_settings WHERE user_id = ?1",
            [user_id.as_i64()],
            |row| row.get(0),
        )
        .optional()?;

    if let Some(monthly_threshold) = stored {
        return Ok(UserSettings { monthly_threshold });
    }

    let settings = UserSettings::default();
    connection.execute(
        "INSERT INTO user_settings (user_id, monthly_threshold) VALUES (?1, ?2)",
        (user_id.as_i64(), settings.monthly_threshold),
    )?;
    tracing::info!("Created default settings for user {user_id}");

    Ok(settings)
}

/// Set the monthly threshold for `user_id`.
///
/// # Errors
/// Returns:
/// - [Error::InvalidThreshold] if `monthly_threshold` is negative,
/// - [Error::SqlError] if a query fails.
pub fn update_user_settings(
    user_id: UserID,
    monthly_threshold: i64,
    connection: &Connection,
) -> Result<UserSettings, Error> {
    let monthly_threshold = validate_threshold(monthly_threshold)?;

    connection.execute(
        "INSERT INTO user_settings (user_id, monthly_threshold) VALUES (?1, ?2)
        ON CONFLICT(user_id) DO UPDATE SET monthly_threshold = excluded.monthly_threshold",
        (user_id.as_i64(), monthly_threshold),
    )?;

    Ok(UserSettings { monthly_threshold })
}
