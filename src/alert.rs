//! Alerts for showing error messages to users.
//!
//! Alerts are swapped out-of-band into the `#alert-container` element that
//! every page renders, so any htmx response can carry one.

use axum::response::{Html, IntoResponse, Response};
use maud::{Markup, html};

/// An error message shown at the bottom of the page until dismissed.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub message: String,
    pub details: String,
}

impl Alert {
    fn view(&self) -> Markup {
        html! {
            div
                id="alert-container"
                hx-swap-oob="true"
                class="w-full max-w-md px-4"
                style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
            {
                div
                    role="alert"
                    class="flex items-start p-4 border rounded-lg shadow text-red-800 bg-red-50 border-red-300 \
                        dark:bg-gray-800 dark:text-red-400 dark:border-red-800"
                {
                    div class="flex-1"
                    {
                        p class="text-sm font-medium" { (self.message) }
                        p class="mt-1 text-sm opacity-80" { (self.details) }
                    }

                    button
                        type="button"
                        aria-label="Dismiss"
                        class="ms-3 text-sm font-bold opacity-60 hover:opacity-100"
                        onclick="this.closest('#alert-container').classList.add('hidden')"
                    {
                        "×"
                    }
                }
            }
        }
    }

    pub fn into_html(self) -> Html<String> {
        Html(self.view().into_string())
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.into_html().into_response()
    }
}
