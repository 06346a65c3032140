//! Totals of installments due per calendar month across all bills.

use std::collections::{BTreeMap, HashMap};

use crate::bill::{Bill, MonthKey, expand_schedule};

/// Sum the installments of every bill per calendar month.
///
/// Months with no installments are absent from the map. The map has no
/// ordering, use [sort_monthly_payments] for a chronological list.
pub fn aggregate_monthly_payments(bills: &[Bill]) -> HashMap<MonthKey, i64> {
    let mut totals = HashMap::new();

    for installment in bills.iter().flat_map(expand_schedule) {
        *totals.entry(installment.month).or_insert(0) += installment.amount;
    }

    totals
}

/// The monthly totals in chronological order.
pub fn sort_monthly_payments(totals: &HashMap<MonthKey, i64>) -> Vec<(MonthKey, i64)> {
    let mut sorted: Vec<(MonthKey, i64)> = totals
        .iter()
        .map(|(month, total)| (*month, *total))
        .collect();
    sorted.sort_unstable_by_key(|(month, _)| *month);

    sorted
}

/// The monthly totals keyed by `YYYY-MM`.
pub fn monthly_payments_by_key(totals: &HashMap<MonthKey, i64>) -> BTreeMap<String, i64> {
    totals
        .iter()
        .map(|(month, total)| (month.to_string(), *total))
        .collect()
}
