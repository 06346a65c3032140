//! Core bill domain types and the monthly amount derivation.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Error, auth::UserID};

/// Database identifier for a bill.
pub type BillId = i64;

/// A validated, non-empty bill name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct BillName(String);

impl BillName {
    /// Create a bill name.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyBillName] if `name` is empty or only whitespace.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyBillName)
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a bill name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for BillName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for BillName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The largest total amount a bill may have, in minor currency units.
pub const MAX_TOTAL_AMOUNT: i64 = 1_000_000_000_000_000;

/// The most installments a bill may be split into (100 years of months).
pub const MAX_INSTALLMENT_COUNT: u32 = 1200;

/// The number of monthly installments a bill is paid in, from one up to
/// [MAX_INSTALLMENT_COUNT].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Hash)]
#[serde(try_from = "u32", into = "u32")]
pub struct InstallmentCount(u32);

impl InstallmentCount {
    /// Create an installment count.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidBill] if `count` is zero or above
    /// [MAX_INSTALLMENT_COUNT].
    pub fn new(count: u32) -> Result<Self, Error> {
        match count {
            0 => Err(Error::InvalidBill(
                "a bill must have at least one installment".to_owned(),
            )),
            count if count > MAX_INSTALLMENT_COUNT => Err(Error::InvalidBill(format!(
                "a bill can have at most {MAX_INSTALLMENT_COUNT} installments, got {count}"
            ))),
            count => Ok(Self(count)),
        }
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for InstallmentCount {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<InstallmentCount> for u32 {
    fn from(value: InstallmentCount) -> Self {
        value.0
    }
}

impl Display for InstallmentCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Split `total_amount` into `installment_count` equal payments, rounding
/// half up to the nearest whole amount.
///
/// The rounded payments may not add back up to `total_amount`; the
/// difference is not reconciled.
pub fn derive_monthly_amount(total_amount: i64, installment_count: InstallmentCount) -> i64 {
    let count = i64::from(installment_count.get());
    let quotient = total_amount.div_euclid(count);
    let remainder = total_amount.rem_euclid(count);

    // The remainder is below `count`, so doubling it cannot overflow.
    if 2 * remainder >= count {
        quotient + 1
    } else {
        quotient
    }
}

fn validate_total_amount(total_amount: i64) -> Result<i64, Error> {
    if total_amount < 0 {
        Err(Error::InvalidBill(format!(
            "the total amount must not be negative, got {total_amount}"
        )))
    } else if total_amount > MAX_TOTAL_AMOUNT {
        Err(Error::InvalidBill(format!(
            "the total amount must be at most {MAX_TOTAL_AMOUNT}, got {total_amount}"
        )))
    } else {
        Ok(total_amount)
    }
}

/// An obligation paid in equal monthly installments, as stored in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bill {
    pub id: BillId,
    pub name: BillName,
    pub description: String,
    /// The full amount owed, in minor currency units.
    pub total_amount: i64,
    pub installment_count: InstallmentCount,
    /// The amount of each installment, stored when the bill is created or updated.
    pub monthly_amount: i64,
    /// The date of the first installment. Only the year and month are used.
    pub started_at: Date,
    pub owner_id: UserID,
}

/// A validated bill that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBill {
    pub name: BillName,
    pub description: String,
    pub total_amount: i64,
    pub installment_count: InstallmentCount,
    pub monthly_amount: i64,
    pub started_at: Date,
}

impl NewBill {
    /// Validate the bill fields and derive the monthly amount.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidBill] if `total_amount` is negative or above
    /// [MAX_TOTAL_AMOUNT].
    pub fn new(
        name: BillName,
        description: &str,
        total_amount: i64,
        installment_count: InstallmentCount,
        started_at: Date,
    ) -> Result<Self, Error> {
        let total_amount = validate_total_amount(total_amount)?;

        Ok(Self {
            name,
            description: description.trim().to_owned(),
            total_amount,
            installment_count,
            monthly_amount: derive_monthly_amount(total_amount, installment_count),
            started_at,
        })
    }
}

/// A partial update to a bill. Fields left as `None` keep their stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BillUpdate {
    pub name: Option<BillName>,
    pub description: Option<String>,
    pub total_amount: Option<i64>,
    pub installment_count: Option<InstallmentCount>,
    pub started_at: Option<Date>,
}

impl BillUpdate {
    /// Merge the update into `bill` and return the resulting bill.
    ///
    /// The monthly amount is derived again only when the update supplies both
    /// `total_amount` and `installment_count`. Otherwise the stored monthly
    /// amount is kept as is, even if one of the two fields changed.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidBill] if the update sets a negative total amount.
    pub fn apply_to(self, bill: &Bill) -> Result<Bill, Error> {
        if let Some(total_amount) = self.total_amount {
            validate_total_amount(total_amount)?;
        }

        let monthly_amount = match (self.total_amount, self.installment_count) {
            (Some(total_amount), Some(installment_count)) => {
                derive_monthly_amount(total_amount, installment_count)
            }
            _ => bill.monthly_amount,
        };

        Ok(Bill {
            id: bill.id,
            name: self.name.unwrap_or_else(|| bill.name.clone()),
            description: self
                .description
                .map(|description| description.trim().to_owned())
                .unwrap_or_else(|| bill.description.clone()),
            total_amount: self.total_amount.unwrap_or(bill.total_amount),
            installment_count: self.installment_count.unwrap_or(bill.installment_count),
            monthly_amount,
            started_at: self.started_at.unwrap_or(bill.started_at),
            owner_id: bill.owner_id,
        })
    }
}

/// Form data for bill creation and editing.
#[derive(Debug, Serialize, Deserialize)]
pub struct BillFormData {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub total_amount: i64,
    pub installment_count: u32,
    pub started_at: Date,
}

impl BillFormData {
    /// Validate the form into a bill ready to be inserted.
    pub fn into_new_bill(self) -> Result<NewBill, Error> {
        NewBill::new(
            BillName::new(&self.name)?,
            &self.description,
            self.total_amount,
            InstallmentCount::new(self.installment_count)?,
            self.started_at,
        )
    }

    /// Validate the form into an update that sets every field.
    ///
    /// Since the form always carries both the total and the installment
    /// count, applying the update always derives the monthly amount again.
    pub fn into_update(self) -> Result<BillUpdate, Error> {
        Ok(BillUpdate {
            name: Some(BillName::new(&self.name)?),
            description: Some(self.description),
            total_amount: Some(validate_total_amount(self.total_amount)?),
            installment_count: Some(InstallmentCount::new(self.installment_count)?),
            started_at: Some(self.started_at),
        })
    }
}
