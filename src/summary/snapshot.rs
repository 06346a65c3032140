//! A user's bills and settings read together so the derived views are
//! computed from one consistent state.

use rusqlite::Connection;
use serde::Serialize;

use crate::{
    Error,
    auth::UserID,
    bill::{Bill, list_bills},
    settings::{UserSettings, get_user_settings},
    summary::{
        MonthStatus, YearGroup, aggregate_monthly_payments, evaluate_threshold,
        group_bills_by_year,
    },
};

/// Everything the derived views need for one user.
#[derive(Debug, Clone, PartialEq)]
pub struct BillSnapshot {
    /// Newest start date first.
    pub bills: Vec<Bill>,
    pub settings: UserSettings,
}

/// The monthly totals and yearly groups derived from a [BillSnapshot].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BillSummary {
    /// Chronological.
    pub months: Vec<MonthStatus>,
    /// Latest year first.
    pub years: Vec<YearGroup>,
    pub monthly_threshold: i64,
}

impl BillSnapshot {
    /// Read the bills and settings of `user_id`.
    ///
    /// Without a logged in user the snapshot is empty and uses the default
    /// settings. No settings row is created in that case.
    ///
    /// # Errors
    ///
    /// Returns [Error::SqlError] if a query fails.
    pub fn load(user_id: Option<UserID>, connection: &Connection) -> Result<Self, Error> {
        let bills = match list_bills(user_id, connection) {
            Ok(bills) => bills,
            Err(Error::NotAuthenticated) => return Ok(Self::empty()),
            Err(error) => return Err(error),
        };

        let settings = user_id
            .map(|user_id| get_user_settings(user_id, connection))
            .transpose()?
            .unwrap_or_default();

        Ok(Self { bills, settings })
    }

    fn empty() -> Self {
        Self {
            bills: Vec::new(),
            settings: UserSettings::default(),
        }
    }

    /// Compute the monthly totals, threshold flags and yearly groups from scratch.
    pub fn summarize(&self) -> BillSummary {
        let totals = aggregate_monthly_payments(&self.bills);

        BillSummary {
            months: evaluate_threshold(&totals, self.settings.monthly_threshold),
            years: group_bills_by_year(&self.bills),
            monthly_threshold: self.settings.monthly_threshold,
        }
    }
}
