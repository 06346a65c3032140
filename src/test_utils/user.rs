use rusqlite::Connection;

use crate::auth::{Email, PasswordHash, User, ValidatedPassword, create_user};

/// The password of every user made by [create_test_user].
pub(crate) const TEST_PASSWORD: &str = "averystrongandsecurepassword";

/// Insert a user with [TEST_PASSWORD] into a database that has been initialised.
#[track_caller]
pub(crate) fn create_test_user(email: &str, connection: &Connection) -> User {
    // The lowest cost bcrypt accepts keeps the tests fast.
    let password_hash = PasswordHash::new(ValidatedPassword::new_unchecked(TEST_PASSWORD), 4)
        .expect("Could not hash test password");

    create_user(Email::new_unchecked(email), password_hash, connection)
        .expect("Could not create test user")
}
