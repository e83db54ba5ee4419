//! Result count and page navigation above the result list.

use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::md_navigation_icons::{MdArrowBack, MdArrowForward}};

use crate::data_definitions::library_state::LibraryContext;

#[component]
pub fn SearchResultListControls() -> Element {
    rsx! {
        div {
            id: "x-result-list-title-row",
            h1 {
                class: "x-result-count",
                ResultCountString {}
            }
            // empty space
            div { style: "flex-grow: 1;" }
            PaginationControls {}
        }
    }
}

#[component]
fn ResultCountString() -> Element {
    let library = use_context::<LibraryContext>();
    let pagination = use_memo(move || library.results.read().pagination);
    let p = pagination();
    match p.total {
        0 => rsx! { "No documents found" },
        1 => rsx! { "1 document found" },
        total => {
            let last = (p.first_index() + p.per_page - 1).min(total);
            rsx! { "{p.first_index()}-{last} of {total} documents" }
        }
    }
}

#[component]
fn PaginationControls() -> Element {
    let library = use_context::<LibraryContext>();
    let pagination = use_memo(move || library.results.read().pagination);
    let page_count = use_memo(move || pagination().page_count());
    let can_go_to_previous_page = use_memo(move || pagination().has_previous());
    let can_go_to_next_page = use_memo(move || pagination().has_next());

    if page_count() <= 1 {
        return rsx! {};
    }

    rsx! {
        div {
            class: "x-pagination",
            NavigationButton {
                icon: MdArrowBack,
                label: "Previous Page",
                disabled: !can_go_to_previous_page(),
                onclick: move |_| library.set_page.call(pagination().page - 1),
            }
            div {
                class: "x-page-counter",
                "{pagination().page}"
                span { style: "color: rgba(0,0,0,0.5);", "/{page_count()}" }
            }
            NavigationButton {
                icon: MdArrowForward,
                label: "Next Page",
                disabled: !can_go_to_next_page(),
                onclick: move |_| library.set_page.call(pagination().page + 1),
            }
        }
    }
}

#[component]
pub fn NavigationButton<I: dioxus_free_icons::IconShape + Clone + PartialEq + 'static>(icon: I, label: String, disabled: ReadSignal<bool>, onclick: Callback<()>) -> Element {
    let btn_color = use_memo(move || if *disabled.read() { "rgba(0,0,0,0.3)" } else { "rgba(0,0,0,1)" });
    let btn_cursor = use_memo(move || if *disabled.read() { "not-allowed" } else { "pointer" });
    rsx! {
        button {
            class: "x-nav-button",
            title: "{label}",
            disabled: *disabled.read(),
            style: "cursor: {btn_cursor};",
            onclick: move |_| {
                if !*disabled.read() {
                    onclick(());
                }
            },
            Icon { icon: icon, style: "width: 24px; height: 24px; color: {btn_color};" }
        }
    }
}
