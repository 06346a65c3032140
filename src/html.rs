//! Page layout, form fields and the Tailwind classes shared across pages.

use maud::{DOCTYPE, Markup, html};

pub const LINK_STYLE: &str = "underline text-indigo-600 hover:text-indigo-500 \
    dark:text-indigo-400 dark:hover:text-indigo-300";

const BUTTON_PRIMARY_STYLE: &str = "w-full px-4 py-2 rounded text-white \
    bg-indigo-600 hover:enabled:bg-indigo-700 disabled:bg-indigo-800 \
    dark:bg-indigo-500 hover:enabled:dark:bg-indigo-600";

pub const BUTTON_DELETE_STYLE: &str = "underline cursor-pointer bg-transparent border-none \
    text-red-600 hover:text-red-500 dark:text-red-400 dark:hover:text-red-300";

pub const FORM_CONTAINER_STYLE: &str = "flex flex-col items-center max-w-md mx-auto \
    px-6 py-8 lg:py-0 text-gray-900 dark:text-gray-100";
pub const FORM_LABEL_STYLE: &str = "block mb-2 text-sm font-medium text-gray-900 dark:text-gray-100";
pub const FORM_TEXT_INPUT_STYLE: &str = "block w-full p-2.5 text-sm rounded \
    border border-gray-300 dark:border-gray-600 bg-gray-50 dark:bg-gray-700 \
    text-gray-900 dark:text-gray-100 disabled:text-gray-500 dark:placeholder-gray-400 \
    focus:border-indigo-600 focus:ring-indigo-600";

pub const TABLE_HEADER_STYLE: &str = "text-xs uppercase text-gray-700 bg-gray-100 \
    dark:text-gray-300 dark:bg-gray-700";
pub const TABLE_ROW_STYLE: &str = "border-b bg-white dark:bg-gray-800 dark:border-gray-700";
pub const TABLE_CELL_STYLE: &str = "px-6 py-4";

pub const PAGE_CONTAINER_STYLE: &str =
    "flex flex-col items-center mx-auto px-6 py-8 lg:py-5 text-gray-900 dark:text-gray-100";

const ERROR_TEXT_STYLE: &str = "mt-1 text-base text-red-600 dark:text-red-400";

/// Wrap `content` in a full HTML document with the stylesheet and htmx scripts.
pub fn base(title: &str, content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " | Bill Tracker" }
                link href="/static/main.css" rel="stylesheet";
                script src="/static/htmx-2.0.8-min.js" {}
                script src="/static/htmx-ext-response-targets-2.0.4.js" {}
                style {
                    ".htmx-indicator { display: none; } "
                    ".htmx-request .htmx-indicator, .htmx-request.htmx-indicator { display: inline; }"
                }
            }

            body
                hx-ext="response-targets"
                class="min-h-screen max-w-full bg-gray-50 dark:bg-gray-900"
            {
                (content)

                // Target for alerts swapped in by htmx.
                div
                    id="alert-container"
                    class="hidden fixed bottom-4 left-1/2 -translate-x-1/2 z-50 w-full max-w-md px-4"
                {}
            }
        }
    }
}

/// A full page explaining an error, e.g. a 404 or 500 page.
pub fn error_view(title: &str, status: &str, description: &str, fix: &str) -> Markup {
    let content = html! {
        main class="max-w-screen-sm mx-auto px-4 py-8 lg:py-16 text-center" {
            h1 class="mb-4 text-7xl lg:text-9xl font-extrabold text-indigo-600 dark:text-indigo-400" {
                (status)
            }
            p class="mb-4 text-3xl md:text-4xl font-bold text-gray-900 dark:text-gray-100" {
                (description)
            }
            p class="mb-8 text-xl md:text-2xl text-gray-900 dark:text-gray-100" { (fix) }
            a href="/" class="inline-flex px-5 py-2.5 rounded text-sm font-medium text-white bg-indigo-600 hover:bg-indigo-700" {
                "Back to Dashboard"
            }
        }
    };

    base(title, &content)
}

/// The centered card that holds the log-in and registration forms.
pub fn auth_card(heading: &str, form: &Markup) -> Markup {
    html! {
        div class="flex flex-col items-center justify-center mx-auto px-6 py-8" {
            span class="mb-6 text-2xl font-semibold text-gray-900 dark:text-gray-100" {
                "Bill Tracker"
            }

            div class="w-full sm:max-w-md p-6 sm:p-8 space-y-4 md:space-y-6 rounded-lg shadow bg-white dark:bg-gray-800" {
                h1 class="text-xl md:text-2xl font-bold text-gray-900 dark:text-gray-100" {
                    (heading)
                }

                (form)
            }
        }
    }
}

/// A labelled `<input>` with an error message shown underneath when set.
///
/// Fields are required unless [InputField::optional] is called.
pub struct InputField<'a> {
    id: &'a str,
    name: &'a str,
    label: &'a str,
    input_type: &'a str,
    value: Option<String>,
    placeholder: Option<&'a str>,
    min: Option<&'a str>,
    min_length: Option<u8>,
    required: bool,
    autofocus: bool,
    error_message: Option<&'a str>,
}

impl<'a> InputField<'a> {
    pub fn new(name: &'a str, label: &'a str, input_type: &'a str) -> Self {
        Self {
            id: name,
            name,
            label,
            input_type,
            value: None,
            placeholder: None,
            min: None,
            min_length: None,
            required: true,
            autofocus: false,
            error_message: None,
        }
    }

    pub fn id(mut self, id: &'a str) -> Self {
        self.id = id;
        self
    }

    pub fn value(mut self, value: impl ToString) -> Self {
        self.value = Some(value.to_string());
        self
    }

    pub fn maybe_value(mut self, value: Option<impl ToString>) -> Self {
        self.value = value.map(|value| value.to_string());
        self
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    /// Set the `min` attribute of a number input.
    pub fn min(mut self, min: &'a str) -> Self {
        self.min = Some(min);
        self
    }

    pub fn min_length(mut self, min_length: u8) -> Self {
        self.min_length = Some(min_length);
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn autofocus(mut self, autofocus: bool) -> Self {
        self.autofocus = autofocus;
        self
    }

    pub fn error(mut self, error_message: Option<&'a str>) -> Self {
        self.error_message = error_message;
        self
    }

    pub fn into_html(self) -> Markup {
        let step = (self.input_type == "number").then_some("1");

        html! {
            div {
                label for=(self.id) class=(FORM_LABEL_STYLE) { (self.label) }

                input
                    id=(self.id)
                    type=(self.input_type)
                    name=(self.name)
                    value=[self.value]
                    placeholder=[self.placeholder]
                    min=[self.min]
                    step=[step]
                    minlength=[self.min_length]
                    required[self.required]
                    autofocus[self.autofocus]
                    class=(FORM_TEXT_INPUT_STYLE);

                @if let Some(error_message) = self.error_message {
                    p class=(ERROR_TEXT_STYLE) data-field-error=(self.name) { (error_message) }
                }
            }
        }
    }
}

pub fn email_input(email: &str, error_message: Option<&str>) -> Markup {
    InputField::new("email", "Email", "email")
        .value(email)
        .placeholder("name@example.com")
        .autofocus(true)
        .error(error_message)
        .into_html()
}

pub fn password_input(min_length: Option<u8>, error_message: Option<&str>) -> Markup {
    let mut field = InputField::new("password", "Password", "password")
        .placeholder("••••••••")
        .error(error_message);
    field.min_length = min_length;

    field.into_html()
}

/// The submit button for a form with `hx-indicator="#indicator"`.
///
/// The spinner is hidden until htmx marks the request as in flight.
pub fn submit_button(text: &str) -> Markup {
    html! {
        button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE) {
            span class="htmx-indicator" id="indicator" { (loading_spinner()) }
            (text)
        }
    }
}

/// A small spinning circle shown inside buttons while a request is in flight.
fn loading_spinner() -> Markup {
    html! {
        span
            role="status"
            aria-hidden="true"
            class="inline-block w-4 h-4 me-2 align-middle rounded-full border-2 border-white border-t-transparent animate-spin"
        {}
    }
}

/// An inline link for use inside paragraph text.
pub fn link(url: &str, text: &str) -> Markup {
    html! {
        a href=(url) class=(LINK_STYLE) { (text) }
    }
}
