//! Alert system for displaying success and error messages to users.
//!
//! Alerts are returned as HTML fragments and swapped into the alert container
//! at the bottom of every page.

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

/// An alert message to display to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// A success message with extra details.
    Success { message: String, details: String },
    /// An error message with extra details.
    Error { message: String, details: String },
}

const SUCCESS_STYLE: &str = "p-4 mb-4 text-sm text-green-800 rounded-lg bg-green-50 \
    dark:bg-gray-800 dark:text-green-400";
const ERROR_STYLE: &str = "p-4 mb-4 text-sm text-red-800 rounded-lg bg-red-50 \
    dark:bg-gray-800 dark:text-red-400";

impl Alert {
    /// Render the alert as an out-of-band swap into `#alert-container`.
    pub fn into_html(self) -> Markup {
        let (style, message, details) = match self {
            Alert::Success { message, details } => (SUCCESS_STYLE, message, details),
            Alert::Error { message, details } => (ERROR_STYLE, message, details),
        };

        html! {
            div
                id="alert-container"
                hx-swap-oob="true"
                class="w-full max-w-md px-4"
                style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
            {
                div class=(style) role="alert"
                {
                    p class="font-medium" { (message) }

                    @if !details.is_empty() {
                        span { (details) }
                    }

                    button
                        type="button"
                        class="ms-2 underline"
                        onclick="this.closest('#alert-container').classList.add('hidden')"
                    {
                        "Dismiss"
                    }
                }
            }
        }
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.into_html().into_response()
    }
}

#[cfg(test)]
mod alert_tests {
    use scraper::{Html, Selector};

    use super::Alert;

    #[test]
    fn error_alert_shows_message_and_details() {
        let markup = Alert::Error {
            message: "Could not delete bill".to_owned(),
            details: "The bill could not be found.".to_owned(),
        }
        .into_html()
        .into_string();

        let html = Html::parse_fragment(&markup);
        let message = html
            .select(&Selector::parse("p").unwrap())
            .next()
            .expect("No message paragraph")
            .text()
            .collect::<String>();
        let details = html
            .select(&Selector::parse("span").unwrap())
            .next()
            .expect("No details span")
            .text()
            .collect::<String>();

        assert_eq!(message, "Could not delete bill");
        assert_eq!(details, "The bill could not be found.");
    }

    #[test]
    fn empty_details_are_not_rendered() {
        let markup = Alert::Success {
            message: "Settings saved".to_owned(),
            details: String::new(),
        }
        .into_html()
        .into_string();

        let html = Html::parse_fragment(&markup);

        assert!(html.select(&Selector::parse("span").unwrap()).next().is_none());
    }
}
