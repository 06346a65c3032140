//! Flags months whose total reaches the user's monthly threshold.

use std::collections::HashMap;

use serde::Serialize;

use crate::{bill::MonthKey, summary::sort_monthly_payments};

/// The total due in a month and whether it reaches the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthStatus {
    pub month: MonthKey,
    pub total: i64,
    pub is_over_threshold: bool,
}

/// A month is over the threshold when its total is at least the threshold.
pub fn is_over_threshold(total: i64, threshold: i64) -> bool {
    total >= threshold
}

/// Compare every monthly total against `threshold`, in chronological order.
pub fn evaluate_threshold(totals: &HashMap<MonthKey, i64>, threshold: i64) -> Vec<MonthStatus> {
    sort_monthly_payments(totals)
        .into_iter()
        .map(|(month, total)| MonthStatus {
            month,
            total,
            is_over_threshold: is_over_threshold(total, threshold),
        })
        .collect()
}
