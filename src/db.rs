//! Creates the application's tables.

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::{
    Error, auth::create_user_table, bill::create_bill_table,
    settings::create_user_settings_table,
};

/// Create the tables for users, bills and user settings if they do not exist.
///
/// Foreign keys are switched on for `connection` so that deleting a user
/// removes their bills and settings.
///
/// # Errors
///
/// Returns [Error::SqlError] if a table could not be created. No tables are
/// created in that case.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    connection.pragma_update(None, "foreign_keys", true)?;

    let transaction = Transaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_user_table(&transaction)?;
    create_bill_table(&transaction)?;
    create_user_settings_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
