//! Error display for render failures and library errors.

use dioxus::prelude::*;

use crate::routes::Route;

#[component]
pub fn GlobalErrorBoundary(boundary_name: ReadSignal<String>, children: Element) -> Element {
    rsx! {
        ErrorBoundary {
            handle_error: move |err: ErrorContext| {
                rsx! {
                    div {
                        class: "x-error-page",
                        h1 { "Something went wrong" }
                        p { "In: {boundary_name}" }
                        a { href: "/", "Back to the library home" }
                        pre { "{err:#?}" }
                    }
                }
            },
            children
        }
    }
}

/// Inline error box, with a way back to the unfiltered library.
#[component]
pub fn ComponentErrorDisplay(error_txt: ReadSignal<String>, children: Element) -> Element {
    rsx! {
        div {
            class: "x-error-box",
            h2 { "Could not show the library" }
            pre { "{error_txt}" }
            Link {
                to: Route::library_page_from_query(Default::default()),
                "Reset search"
            }
            {children}
        }
    }
}
