//! Views derived from a user's bills: totals per month, threshold flags and
//! groups per year.
//!
//! Every view is computed from scratch from the full bill list. Nothing is
//! cached between requests.

mod handlers;
mod monthly;
mod snapshot;
mod threshold;
mod yearly;

pub use handlers::{get_dashboard_page, get_summary};
pub use monthly::{aggregate_monthly_payments, monthly_payments_by_key, sort_monthly_payments};
pub use snapshot::{BillSnapshot, BillSummary};
pub use threshold::{MonthStatus, evaluate_threshold, is_over_threshold};
pub use yearly::{YearGroup, group_bills_by_year};
