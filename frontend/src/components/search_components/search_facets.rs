//! Facet panel: one option list per facet, plus chips for the active
//! selection.

use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::{md_navigation_icons::MdClose, md_toggle_icons::{MdCheckBox, MdCheckBoxOutlineBlank}}};

use common::search_result::{SearchResultFacetItem, SearchResultFacets};

use crate::data_definitions::library_state::LibraryContext;

#[component]
pub fn FacetPanel() -> Element {
    let library = use_context::<LibraryContext>();
    let results = library.results;
    let facets = use_memo(move || results.read().aggregations.clone());

    rsx! {
        div {
            id: "x-facet-panel",
            SelectedFacetChips {}
            for facet in facets() {
                FacetSelectorList { key: "{facet.facet_field}", facet }
            }
        }
    }
}

#[component]
fn SelectedFacetChips() -> Element {
    let library = use_context::<LibraryContext>();
    let query = library.query;
    let results = library.results;
    let chips = use_memo(move || {
        let results = results.read();
        query
            .read()
            .facet_filters
            .iter()
            .flat_map(|(facet, options)| {
                let title = results.facet(facet).map(|f| library.facet_title(f)).unwrap_or_else(|| facet.clone());
                options.iter().map(move |option| (facet.clone(), title.clone(), option.clone()))
            })
            .collect::<Vec<_>>()
    });

    if chips.read().is_empty() {
        return rsx! {};
    }

    rsx! {
        div {
            class: "x-facet-chips",
            for (facet, title, option) in chips() {
                span {
                    key: "{facet}-{option}",
                    class: "x-facet-chip",
                    "{title}: {option}"
                    button {
                        class: "x-icon-button",
                        title: "Remove filter",
                        onclick: move |_| library.clear_option(&facet, &option),
                        Icon { icon: MdClose, style: "width: 16px; height: 16px;" }
                    }
                }
            }
            button {
                class: "x-text-button",
                onclick: move |_| library.clear_filters(),
                "Clear all"
            }
        }
    }
}

#[component]
fn FacetSelectorList(facet: ReadSignal<SearchResultFacets>) -> Element {
    let library = use_context::<LibraryContext>();
    let title = library.facet_title(&facet.read());
    let SearchResultFacets { facet_field, facet_values, .. } = facet.read().clone();
    rsx! {
        div {
            class: "x-facet-list",
            h3 { "{title}" }
            if facet_values.is_empty() {
                div { class: "x-facet-empty", "No options" }
            }
            ul {
                for item in facet_values {
                    li {
                        key: "{item.key}",
                        FacetCheckbox { facet_field: facet_field.clone(), item }
                    }
                }
            }
        }
    }
}

#[component]
fn FacetCheckbox(facet_field: ReadSignal<String>, item: ReadSignal<SearchResultFacetItem>) -> Element {
    let library = use_context::<LibraryContext>();
    let is_checked = use_memo(move || item.read().selected);
    let label = library.option_label(&item.read());

    rsx! {
        div {
            class: "x-facet-list-item",
            onclick: move |_| {
                let facet = facet_field.read().clone();
                let option = item.read().key.clone();
                library.toggle_option(&facet, &option);
            },

            if is_checked() {
                Icon { icon: MdCheckBox, style: "width: 22px; height: 22px; color: rgb(28, 33, 45); flex-shrink: 0;" }
            } else {
                Icon { icon: MdCheckBoxOutlineBlank, style: "width: 22px; height: 22px; color: black; flex-shrink: 0;" }
            }
            div {
                class: "x-facet-option-label",
                "{label}"
            }
        }
    }
}
