//! The navigation bar shown at the top of every page for logged in users.

use maud::{Markup, html};

use crate::endpoints;

/// The pages linked from the navigation bar, in display order.
const LINKS: [(&str, &str); 4] = [
    (endpoints::DASHBOARD_VIEW, "Dashboard"),
    (endpoints::BILLS_VIEW, "Bills"),
    (endpoints::SETTINGS_VIEW, "Settings"),
    (endpoints::LOG_OUT, "Log out"),
];

const ACTIVE_LINK_STYLE: &str = "block px-3 py-2 rounded-sm font-semibold \
    text-indigo-700 bg-indigo-50 sm:bg-transparent dark:text-indigo-300";
const LINK_STYLE: &str = "block px-3 py-2 rounded-sm text-gray-900 \
    hover:bg-gray-100 sm:hover:bg-transparent sm:hover:text-indigo-700 \
    dark:text-gray-100 dark:hover:bg-gray-700 sm:dark:hover:text-indigo-300";

pub struct NavBar<'a> {
    active_endpoint: &'a str,
}

impl NavBar<'_> {
    /// Get the navigation bar.
    ///
    /// The link to `active_endpoint`, if there is one, is highlighted.
    pub fn new(active_endpoint: &str) -> NavBar<'_> {
        NavBar { active_endpoint }
    }

    fn is_active(&self, url: &str) -> bool {
        url != endpoints::LOG_OUT && url == self.active_endpoint
    }

    pub fn into_html(self) -> Markup {
        html!(
            nav class="border-b border-gray-200 bg-white dark:border-gray-700 dark:bg-gray-900"
            {
                div class="max-w-screen-xl mx-auto p-4 flex flex-wrap items-center justify-between gap-4"
                {
                    a href=(endpoints::DASHBOARD_VIEW)
                        class="text-2xl font-semibold whitespace-nowrap text-gray-900 dark:text-gray-100"
                    {
                        "Bill Tracker"
                    }

                    ul class="flex flex-wrap gap-2 sm:gap-6 font-medium"
                    {
                        @for (url, title) in LINKS {
                            @let is_active = self.is_active(url);
                            li {
                                a
                                    href=(url)
                                    class=(if is_active { ACTIVE_LINK_STYLE } else { LINK_STYLE })
                                    aria-current=[is_active.then_some("page")]
                                {
                                    (title)
                                }
                            }
                        }
                    }
                }
            }
        )
    }
}
