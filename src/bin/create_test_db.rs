use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::macros::date;

use bill_tracker::{
    BillName, Email, InstallmentCount, NewBill, PasswordHash, create_bill, create_user,
    initialize_db, update_user_settings,
};

const DEMO_EMAIL: &str = "demo@example.com";
const DEMO_PASSWORD: &str = "correct-horse-battery-staple";

/// A utility for creating a test database for the bill_tracker server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        Some(extension) if !extension.is_empty() => {}
        _ => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating test user {DEMO_EMAIL} with password {DEMO_PASSWORD}...");
    let user = create_user(
        Email::new(DEMO_EMAIL)?,
        PasswordHash::from_raw_password(DEMO_PASSWORD, PasswordHash::DEFAULT_COST)?,
        &conn,
    )?;

    println!("Creating bills...");
    let bills = [
        ("Laptop", "Work laptop on interest free terms", 240_000, 12, date!(2024 - 11 - 15)),
        ("Sofa", "", 180_000, 6, date!(2025 - 01 - 03)),
        ("Phone", "Paid off with the phone plan", 144_000, 24, date!(2024 - 06 - 20)),
        ("Dentist", "", 90_000, 3, date!(2025 - 02 - 10)),
    ];

    for (name, description, total_amount, installment_count, started_at) in bills {
        let bill = NewBill::new(
            BillName::new(name)?,
            description,
            total_amount,
            InstallmentCount::new(installment_count)?,
            started_at,
        )?;
        create_bill(bill, user.id, &conn)?;
    }

    update_user_settings(user.id, 80_000, &conn)?;

    println!("Success!");

    Ok(())
}
