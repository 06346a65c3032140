//! Expands a bill into the months in which its installments fall due.

use std::{fmt::Display, iter::FusedIterator};

use serde::{Serialize, Serializer};
use time::{Date, Month};

use crate::bill::Bill;

/// A calendar month, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: Month,
}

impl MonthKey {
    pub fn new(year: i32, month: Month) -> Self {
        Self { year, month }
    }

    /// The month that `date` falls in.
    pub fn from_date(date: Date) -> Self {
        Self::new(date.year(), date.month())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> Month {
        self.month
    }

    /// The month `months` months after this one, rolling over into later years.
    pub fn add_months(self, months: u32) -> Self {
        let zero_based = i64::from(self.year) * 12 + i64::from(u8::from(self.month) - 1);
        let shifted = zero_based + i64::from(months);

        Self {
            year: shifted.div_euclid(12) as i32,
            month: Month::January.nth_next(shifted.rem_euclid(12) as u8),
        }
    }
}

/// Formats as `YYYY-MM`, e.g. `2025-03`.
impl Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, u8::from(self.month))
    }
}

impl Serialize for MonthKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// One payment of a bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Installment {
    pub month: MonthKey,
    pub amount: i64,
}

impl Bill {
    /// The month of the first installment.
    pub fn first_month(&self) -> MonthKey {
        MonthKey::from_date(self.started_at)
    }

    /// The month of the last installment.
    pub fn last_month(&self) -> MonthKey {
        self.first_month().add_months(self.installment_count.get() - 1)
    }
}

/// Iterator over the installments of a single bill, in chronological order.
///
/// Created by [expand_schedule].
#[derive(Debug, Clone)]
pub struct Schedule {
    first_month: MonthKey,
    amount: i64,
    next: u32,
    count: u32,
}

/// Expand `bill` into one installment per month, starting in the month of
/// `started_at` and running for `installment_count` consecutive months.
///
/// Each installment carries the bill's stored monthly amount. The day of the
/// month in `started_at` is ignored.
pub fn expand_schedule(bill: &Bill) -> Schedule {
    Schedule {
        first_month: bill.first_month(),
        amount: bill.monthly_amount,
        next: 0,
        count: bill.installment_count.get(),
    }
}

impl Iterator for Schedule {
    type Item = Installment;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.count {
            return None;
        }

        let installment = Installment {
            month: self.first_month.add_months(self.next),
            amount: self.amount,
        };
        self.next += 1;

        Some(installment)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.count - self.next) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Schedule {}

impl FusedIterator for Schedule {}
