//! The bill form shared by the create and edit pages.

use maud::{Markup, html};
use time::Date;

use crate::{
    bill::Bill,
    html::{InputField, submit_button},
};

/// Where the form is submitted to.
pub(super) enum FormAction<'a> {
    Post(&'a str),
    Put(&'a str),
}

/// Prefilled values for the bill form.
#[derive(Debug, Default)]
pub(super) struct BillFormValues<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub total_amount: Option<i64>,
    pub installment_count: Option<u32>,
    pub started_at: Option<Date>,
}

impl<'a> From<&'a Bill> for BillFormValues<'a> {
    fn from(bill: &'a Bill) -> Self {
        Self {
            name: bill.name.as_ref(),
            description: &bill.description,
            total_amount: Some(bill.total_amount),
            installment_count: Some(bill.installment_count.get()),
            started_at: Some(bill.started_at),
        }
    }
}

pub(super) fn bill_form_view(
    action: FormAction,
    values: &BillFormValues,
    submit_text: &str,
    error_message: &str,
) -> Markup {
    let (hx_post, hx_put) = match action {
        FormAction::Post(endpoint) => (Some(endpoint), None),
        FormAction::Put(endpoint) => (None, Some(endpoint)),
    };

    html! {
        form
            hx-post=[hx_post]
            hx-put=[hx_put]
            hx-target-error="#alert-container"
            hx-indicator="#indicator"
            class="w-full space-y-4 md:space-y-6"
        {
            (InputField::new("name", "Name", "text")
                .value(values.name)
                .placeholder("Bill name")
                .autofocus(true)
                .into_html())

            (InputField::new("description", "Description", "text")
                .value(values.description)
                .placeholder("Optional")
                .optional()
                .into_html())

            (InputField::new("total_amount", "Total Amount", "number")
                .min("0")
                .maybe_value(values.total_amount)
                .into_html())

            (InputField::new("installment_count", "Installments", "number")
                .min("1")
                .maybe_value(values.installment_count)
                .into_html())

            (InputField::new("started_at", "First Payment", "date")
                .maybe_value(values.started_at)
                .into_html())

            @if !error_message.is_empty() {
                p class="text-red-600 dark:text-red-400" { (error_message) }
            }

            (submit_button(submit_text))
        }
    }
}
