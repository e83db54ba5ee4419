//! One catalog entry in the result list.

use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::{md_action_icons::{MdHelp, MdOpenInNew}, md_file_icons::MdFileDownload, md_maps_icons::MdLocalLibrary}};

use common::document::Document;

#[component]
pub fn SearchResultItemCard(document: ReadSignal<Document>, item_index: usize) -> Element {
    let doc = document.read().clone();
    let title = doc.title().unwrap_or("Untitled").to_string();
    let subtitle = [
        doc.authors().map(str::to_string),
        doc.year().map(|y| y.to_string()),
        doc.journal_or_publisher().map(str::to_string),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(" · ");
    let habitats = doc.habitat_types().join(", ");

    rsx! {
        div {
            class: "x-result-card",
            // Row 1: INDEX - TITLE - SPACER - LINK
            div {
                class: "x-result-card-title-row",
                span { class: "x-result-index", "{item_index}." }
                div { class: "x-result-title", "{title}" }
                div { style: "flex: 1 1 auto;" }
                if let Some(url) = doc.url() {
                    DocumentLink { url: url.to_string(), icon: doc.icon().unwrap_or_default().to_string() }
                }
            }
            if !subtitle.is_empty() {
                div { class: "x-result-subtitle", "{subtitle}" }
            }
            if let Some(text) = doc.abstract_description() {
                p { class: "x-result-abstract", "{text}" }
            }
            // Row 4: TAGS
            div {
                class: "x-result-tags",
                if let Some(category) = doc.category() {
                    span { class: "x-tag", "{category}" }
                }
                if let Some(access) = doc.access_rights() {
                    span { class: "x-tag x-tag-access", "{access}" }
                }
                if !habitats.is_empty() {
                    span { class: "x-tag x-tag-habitat", "{habitats}" }
                }
            }
        }
    }
}

#[component]
fn DocumentLink(url: String, icon: String) -> Element {
    rsx! {
        a {
            class: "x-result-link",
            href: "{url}",
            target: "_blank",
            rel: "noopener",
            {link_icon(&icon)}
        }
    }
}

/// Icon names are the ones the catalog preparation writes.
fn link_icon(icon: &str) -> Element {
    match icon {
        "file_download" => rsx! { Icon { icon: MdFileDownload, style: "width: 22px; height: 22px; color: #1D4ED8;" } },
        "local_library" => rsx! { Icon { icon: MdLocalLibrary, style: "width: 22px; height: 22px; color: #1D4ED8;" } },
        "open_in_new" => rsx! { Icon { icon: MdOpenInNew, style: "width: 22px; height: 22px; color: #1D4ED8;" } },
        _ => rsx! { Icon { icon: MdHelp, style: "width: 22px; height: 22px; color: #1D4ED8;" } },
    }
}
