//! Groups bills by the calendar years their installments fall in.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::bill::{Bill, BillId};

/// The bills with at least one installment in `year`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearGroup {
    pub year: i32,
    /// Most recently started first.
    pub bills: Vec<Bill>,
}

/// Group `bills` by every calendar year their installments touch.
///
/// A bill that runs from November 2024 to February 2025 appears in both the
/// 2024 and 2025 groups. Within a group each bill appears once, keeping the
/// first occurrence of an ID, and bills are ordered by start date with the
/// newest first. Groups are ordered with the latest year first.
pub fn group_bills_by_year(bills: &[Bill]) -> Vec<YearGroup> {
    let mut years: BTreeMap<i32, Vec<Bill>> = BTreeMap::new();
    let mut seen: HashSet<(i32, BillId)> = HashSet::new();

    for bill in bills {
        let first_year = bill.first_month().year();
        let last_year = bill.last_month().year();

        for year in first_year..=last_year {
            if seen.insert((year, bill.id)) {
                years.entry(year).or_default().push(bill.clone());
            }
        }
    }

    years
        .into_iter()
        .rev()
        .map(|(year, mut bills)| {
            // Stable so bills starting on the same day keep their input order.
            bills.sort_by(|a, b| b.started_at.cmp(&a.started_at));
            YearGroup { year, bills }
        })
        .collect()
}
