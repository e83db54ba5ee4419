use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::md_action_icons::MdSearch};

use crate::data_definitions::library_state::LibraryContext;

#[component]
pub fn SearchInputTopBar() -> Element {
    let library = use_context::<LibraryContext>();
    let original_query = library.query;
    let mut search_text = use_signal(|| original_query.read().query_string.clone());
    // navigation does not reset our signal, so follow the url
    use_effect(move || {
        let text = original_query.read().query_string.clone();
        search_text.set(text);
    });
    let text_has_changed = use_memo(move || *search_text.read() != original_query.read().query_string);
    let search_button_color = use_memo(move || if text_has_changed() { "#1D4ED8" } else { "#6B7280" });

    let trigger_search = move |_: ()| {
        let mut query = original_query.read().clone();
        query.query_string = search_text.read().trim().to_string();
        library.set_query.call(query);
    };

    rsx! {
        div {
            id: "x-search-input-search-box",
            button {
                class: "x-icon-button",
                title: "Search",
                onclick: move |_| trigger_search(()),
                Icon { icon: MdSearch, style: "width: 20px; height: 20px; color:{search_button_color()};" }
            }
            input {
                r#type: "text",
                placeholder: "Search titles, authors, abstracts",
                value: "{search_text}",
                oninput: move |event: Event<FormData>| search_text.set(event.value()),
                onkeydown: move |event: Event<KeyboardData>| {
                    if event.key() == Key::Enter {
                        trigger_search(());
                    }
                },
            }
        }
    }
}
