//! Bills paid in equal monthly installments, their schedules, storage and pages.

mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod form;
mod list;
mod schedule;

pub use create::{create_bill_endpoint, get_new_bill_page};
pub use db::{create_bill, create_bill_table, delete_bill, get_bill, list_bills, update_bill};
pub use delete::delete_bill_endpoint;
pub use domain::{
    Bill, BillFormData, BillId, BillName, BillUpdate, InstallmentCount, NewBill,
    derive_monthly_amount,
};
pub use edit::{get_edit_bill_page, update_bill_endpoint};
pub use list::get_bills_page;
pub use schedule::{Installment, MonthKey, Schedule, expand_schedule};
