//! Database operations for bills. Every query is scoped to the owning user.

use rusqlite::{Connection, Row, types::Type};

use crate::{
    Error,
    auth::UserID,
    bill::{Bill, BillId, BillName, BillUpdate, InstallmentCount, NewBill},
};

/// Insert a bill owned by `owner_id` and return it with its generated ID.
pub fn create_bill(bill: NewBill, owner_id: UserID, connection: &Connection) -> Result<Bill, Error> {
    connection.execute(
        "INSERT INTO bill (name, description, total_amount, installment_count, monthly_amount, started_at, owner_id)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
        (
            bill.name.as_ref(),
            &bill.description,
            bill.total_amount,
            bill.installment_count.get(),
            bill.monthly_amount,
            bill.started_at,
            owner_id.as_i64(),
        ),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Bill {
        id,
        name: bill.name,
        description: bill.description,
        total_amount: bill.total_amount,
        installment_count: bill.installment_count,
        monthly_amount: bill.monthly_amount,
        started_at: bill.started_at,
        owner_id,
    })
}

/// Retrieve a single bill owned by `owner_id`.
///
/// # Errors
///
/// Returns [Error::NotFound] if the bill does not exist or belongs to another user.
pub fn get_bill(bill_id: BillId, owner_id: UserID, connection: &Connection) -> Result<Bill, Error> {
    connection
        .prepare(
            "SELECT id, name, description, total_amount, installment_count, monthly_amount, started_at, owner_id
            FROM bill WHERE id = :id AND owner_id = :owner_id;",
        )?
        .query_row(
            &[(":id", &bill_id), (":owner_id", &owner_id.as_i64())],
            map_row,
        )
        .map_err(|error| error.into())
}

/// Retrieve all bills of the logged in user, newest start date first.
///
/// # Errors
///
/// Returns [Error::NotAuthenticated] if `owner_id` is `None`.
pub fn list_bills(owner_id: Option<UserID>, connection: &Connection) -> Result<Vec<Bill>, Error> {
    let owner_id = owner_id.ok_or(Error::NotAuthenticated)?;

    connection
        .prepare(
            "SELECT id, name, description, total_amount, installment_count, monthly_amount, started_at, owner_id
            FROM bill WHERE owner_id = :owner_id
            ORDER BY started_at DESC, id DESC;",
        )?
        .query_map(&[(":owner_id", &owner_id.as_i64())], map_row)?
        .map(|maybe_bill| maybe_bill.map_err(|error| error.into()))
        .collect()
}

/// Merge `update` into the stored bill and save the result.
///
/// See [BillUpdate::apply_to] for when the monthly amount is derived again.
///
/// # Errors
///
/// Returns [Error::UpdateMissingBill] if the bill does not exist or belongs to
/// another user.
pub fn update_bill(
    bill_id: BillId,
    update: BillUpdate,
    owner_id: UserID,
    connection: &Connection,
) -> Result<Bill, Error> {
    let stored = match get_bill(bill_id, owner_id, connection) {
        Ok(bill) => bill,
        Err(Error::NotFound) => return Err(Error::UpdateMissingBill),
        Err(error) => return Err(error),
    };

    let bill = update.apply_to(&stored)?;

    let rows_affected = connection.execute(
        "UPDATE bill
        SET name = ?1, description = ?2, total_amount = ?3, installment_count = ?4,
            monthly_amount = ?5, started_at = ?6
        WHERE id = ?7 AND owner_id = ?8",
        (
            bill.name.as_ref(),
            &bill.description,
            bill.total_amount,
            bill.installment_count.get(),
            bill.monthly_amount,
            bill.started_at,
            bill_id,
            owner_id.as_i64(),
        ),
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingBill);
    }

    Ok(bill)
}

/// Delete a bill owned by `owner_id`.
///
/// # Errors
///
/// Returns [Error::DeleteMissingBill] if the bill does not exist or belongs to
/// another user.
pub fn delete_bill(bill_id: BillId, owner_id: UserID, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "DELETE FROM bill WHERE id = ?1 AND owner_id = ?2",
        (bill_id, owner_id.as_i64()),
    )?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingBill);
    }

    Ok(())
}

/// Initialize the bill table and indexes.
pub fn create_bill_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS bill (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            total_amount INTEGER NOT NULL CHECK (total_amount >= 0),
            installment_count INTEGER NOT NULL CHECK (installment_count > 0),
            monthly_amount INTEGER NOT NULL,
            started_at TEXT NOT NULL,
            owner_id INTEGER NOT NULL,
            FOREIGN KEY(owner_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_bill_owner_started_at ON bill(owner_id, started_at);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Bill, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_name: String = row.get(1)?;
    let description = row.get(2)?;
    let total_amount = row.get(3)?;
    let raw_installment_count: u32 = row.get(4)?;
    let monthly_amount = row.get(5)?;
    let started_at = row.get(6)?;
    let raw_owner_id = row.get(7)?;

    let installment_count = InstallmentCount::new(raw_installment_count)
        .map_err(|error| rusqlite::Error::FromSqlConversionFailure(4, Type::Integer, Box::new(error)))?;

    Ok(Bill {
        id,
        name: BillName::new_unchecked(&raw_name),
        description,
        total_amount,
        installment_count,
        monthly_amount,
        started_at,
        owner_id: UserID::new(raw_owner_id),
    })
}

#[cfg(test)]
mod bill_query_tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        auth::UserID,
        bill::{
            BillName, BillUpdate, InstallmentCount, NewBill, create_bill, delete_bill, get_bill,
            list_bills, update_bill,
        },
        db::initialize,
        test_utils::create_test_user,
    };

    fn get_test_connection() -> (Connection, UserID) {
        let connection = Connection::open_in_memory().expect("Could not open in-memory database");
        initialize(&connection).expect("Could not initialize database");
        let user = create_test_user("alice@example.com", &connection);

        (connection, user.id)
    }

    fn new_bill(name: &str, total_amount: i64, count: u32, started_at: time::Date) -> NewBill {
        NewBill::new(
            BillName::new_unchecked(name),
            "",
            total_amount,
            InstallmentCount::new(count).unwrap(),
            started_at,
        )
        .unwrap()
    }

    #[test]
    fn create_bill_succeeds() {
        let (connection, user_id) = get_test_connection();

        let bill = create_bill(
            new_bill("Laptop", 100, 3, date!(2025 - 01 - 10)),
            user_id,
            &connection,
        )
        .expect("Could not create bill");

        assert!(bill.id > 0);
        assert_eq!(bill.monthly_amount, 33);
        assert_eq!(bill.owner_id, user_id);
    }

    #[test]
    fn get_bill_succeeds() {
        let (connection, user_id) = get_test_connection();
        let inserted = create_bill(
            new_bill("Laptop", 100, 3, date!(2025 - 01 - 10)),
            user_id,
            &connection,
        )
        .unwrap();

        let selected = get_bill(inserted.id, user_id, &connection);

        assert_eq!(selected, Ok(inserted));
    }

    #[test]
    fn get_bill_of_other_user_returns_not_found() {
        let (connection, user_id) = get_test_connection();
        let other_user = create_test_user("bob@example.com", &connection);
        let inserted = create_bill(
            new_bill("Laptop", 100, 3, date!(2025 - 01 - 10)),
            user_id,
            &connection,
        )
        .unwrap();

        let selected = get_bill(inserted.id, other_user.id, &connection);

        assert_eq!(selected, Err(Error::NotFound));
    }

    #[test]
    fn list_bills_without_user_is_not_authenticated() {
        let (connection, _) = get_test_connection();

        assert_eq!(list_bills(None, &connection), Err(Error::NotAuthenticated));
    }

    #[test]
    fn list_bills_orders_newest_first_and_scopes_to_user() {
        let (connection, user_id) = get_test_connection();
        let other_user = create_test_user("bob@example.com", &connection);
        let older = create_bill(
            new_bill("Older", 100, 1, date!(2024 - 05 - 01)),
            user_id,
            &connection,
        )
        .unwrap();
        let newer = create_bill(
            new_bill("Newer", 100, 1, date!(2025 - 02 - 01)),
            user_id,
            &connection,
        )
        .unwrap();
        create_bill(
            new_bill("Not mine", 100, 1, date!(2025 - 03 - 01)),
            other_user.id,
            &connection,
        )
        .unwrap();

        let bills = list_bills(Some(user_id), &connection).expect("Could not list bills");

        assert_eq!(bills, vec![newer, older]);
    }

    #[test]
    fn update_bill_derives_monthly_amount_when_both_fields_supplied() {
        let (connection, user_id) = get_test_connection();
        let bill = create_bill(
            new_bill("Sofa", 1200, 12, date!(2024 - 11 - 15)),
            user_id,
            &connection,
        )
        .unwrap();

        let update = BillUpdate {
            total_amount: Some(100),
            installment_count: Some(InstallmentCount::new(3).unwrap()),
            ..Default::default()
        };
        let updated = update_bill(bill.id, update, user_id, &connection).unwrap();

        assert_eq!(updated.monthly_amount, 33);
        assert_eq!(get_bill(bill.id, user_id, &connection), Ok(updated));
    }

    #[test]
    fn update_bill_keeps_monthly_amount_for_partial_update() {
        let (connection, user_id) = get_test_connection();
        let bill = create_bill(
            new_bill("Sofa", 1200, 12, date!(2024 - 11 - 15)),
            user_id,
            &connection,
        )
        .unwrap();

        let update = BillUpdate {
            total_amount: Some(2400),
            started_at: Some(date!(2025 - 01 - 01)),
            ..Default::default()
        };
        let updated = update_bill(bill.id, update, user_id, &connection).unwrap();

        assert_eq!(updated.total_amount, 2400);
        assert_eq!(updated.monthly_amount, 100);
        assert_eq!(updated.started_at, date!(2025 - 01 - 01));
    }

    #[test]
    fn update_missing_bill_fails() {
        let (connection, user_id) = get_test_connection();

        let result = update_bill(999, BillUpdate::default(), user_id, &connection);

        assert_eq!(result, Err(Error::UpdateMissingBill));
    }

    #[test]
    fn update_bill_of_other_user_fails() {
        let (connection, user_id) = get_test_connection();
        let other_user = create_test_user("bob@example.com", &connection);
        let bill = create_bill(
            new_bill("Sofa", 1200, 12, date!(2024 - 11 - 15)),
            user_id,
            &connection,
        )
        .unwrap();

        let update = BillUpdate {
            name: Some(BillName::new_unchecked("Mine now")),
            ..Default::default()
        };
        let result = update_bill(bill.id, update, other_user.id, &connection);

        assert_eq!(result, Err(Error::UpdateMissingBill));
        assert_eq!(get_bill(bill.id, user_id, &connection), Ok(bill));
    }

    #[test]
    fn delete_bill_succeeds() {
        let (connection, user_id) = get_test_connection();
        let bill = create_bill(
            new_bill("Sofa", 1200, 12, date!(2024 - 11 - 15)),
            user_id,
            &connection,
        )
        .unwrap();

        delete_bill(bill.id, user_id, &connection).expect("Could not delete bill");

        assert_eq!(get_bill(bill.id, user_id, &connection), Err(Error::NotFound));
    }

    #[test]
    fn delete_missing_bill_fails() {
        let (connection, user_id) = get_test_connection();

        let result = delete_bill(999, user_id, &connection);

        assert_eq!(result, Err(Error::DeleteMissingBill));
    }

    #[test]
    fn delete_bill_of_other_user_fails() {
        let (connection, user_id) = get_test_connection();
        let other_user = create_test_user("bob@example.com", &connection);
        let bill = create_bill(
            new_bill("Sofa", 1200, 12, date!(2024 - 11 - 15)),
            user_id,
            &connection,
        )
        .unwrap();

        let result = delete_bill(bill.id, other_user.id, &connection);

        assert_eq!(result, Err(Error::DeleteMissingBill));
        assert!(get_bill(bill.id, user_id, &connection).is_ok());
    }
}
