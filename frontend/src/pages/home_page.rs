use dioxus::prelude::*;
use dioxus_free_icons::icons::md_action_icons::MdSearch;
use dioxus_free_icons::Icon;

use common::search_query::SearchQuery;
use crate::routes::Route;


/// Home page
#[component]
pub fn HomePage() -> Element {
    rsx! {
        Title { "Wetlands Library - Home" }
        div {
            id: "x-home-container",

            div {
                class: "x-home-title",
                span { "Welcome to the" }
                span { style: "color:#0F766E;", "Wetlands Library" }
            }
            div {
                class: "x-home-subtext",
                "Reports, theses and articles on tropical wetland, estuary and coastal habitats, searchable and filterable by habitat, year and publication type."
            }
            LibrarySearchCard {}
        }
    }
}

#[component]
fn LibrarySearchCard() -> Element {
    let nav = navigator();
    let mut search_q = use_signal(|| "".to_string());
    rsx! {
        div {
            id: "x-card-library-search",
            div { class: "x-card-title", "Search the library" }
            div {
                class: "x-card-hint",
                "*Type search terms in the text box below and hit Enter, or browse everything with the filters."
            }
            div {
                class: "x-card-input",
                Icon { icon: MdSearch, style: "width: 20px; height: 20px; color:#6B7280;" }
                input {
                    r#type: "text",
                    placeholder: "Search titles, authors, abstracts",
                    oninput: move |e| {
                        *search_q.write() = e.value();
                    },
                    onkeypress: move |e| {
                        if e.key() == Key::Enter {
                            e.prevent_default();
                            let q = SearchQuery { query_string: search_q.read().trim().to_string(), ..Default::default() };
                            nav.push(Route::library_page_from_query(q));
                        }
                    },
                }
            }
            Link {
                to: Route::library_page_from_query(SearchQuery::default()),
                class: "x-text-button",
                "Browse all documents"
            }
        }
    }
}
