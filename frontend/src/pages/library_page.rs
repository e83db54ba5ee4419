use dioxus::logger::tracing;
use dioxus::prelude::*;

use common::search_query::SearchQuery;
use common::search_result::ResultPage;
use library_index::LibraryFilter;

use crate::{
    components::{
        error_boundary::ComponentErrorDisplay,
        search_components::{
            search_facets::FacetPanel, search_input_top_bar::SearchInputTopBar,
            search_result_item_card::SearchResultItemCard, search_result_list_controls::SearchResultListControls,
        },
    },
    data_definitions::{library_state::{LibraryContext, load_library}, url_param::UrlParam},
    routes::Route,
};

fn title_ellipsis(title: &str) -> String {
    if title.chars().count() > 20 {
        title.chars().take(18).collect::<String>() + "..."
    } else {
        title.to_string()
    }
}

/// Library page
#[component]
pub fn LibraryPage(query: UrlParam<SearchQuery>, page: usize) -> Element {
    let heading = if query.0.query_string.is_empty() {
        "Library".to_string()
    } else {
        format!("Library: {}", title_ellipsis(&query.0.query_string))
    };
    rsx! {
        Title { "{heading}" }
        LibraryPageRootComponent { query: query.0.clone(), page }
    }
}

#[component]
fn LibraryPageRootComponent(query: ReadSignal<SearchQuery>, page: ReadSignal<usize>) -> Element {
    // the index is built once per page mount; the url only changes what is queried
    let mut library = use_signal(|| load_library().map_err(|e| format!("{e:#}")));
    let mut results = use_signal(ResultPage::default);
    let mut query_error = use_signal(|| None::<String>);

    use_effect(move || {
        let q = query.read().clone();
        let p = *page.read();
        library.with_mut(|library| {
            let Ok(filter) = library.as_mut() else { return };
            match apply_route(filter, q, p) {
                Ok(page) => {
                    results.set(page);
                    query_error.set(None);
                }
                Err(e) => {
                    tracing::warn!("library query failed: {e}");
                    query_error.set(Some(e.to_string()));
                }
            }
        });
    });

    let set_query = Callback::new(move |q: SearchQuery| {
        navigator().push(Route::library_page_from_query(q));
    });
    let set_page = Callback::new(move |p: usize| {
        navigator().push(Route::LibraryPage { query: query.read().clone().into(), page: p });
    });
    use_context_provider(move || LibraryContext {
        library: library.into(),
        query,
        page,
        results: results.into(),
        set_query,
        set_page,
    });

    if let Err(e) = &*library.read() {
        return rsx! { ComponentErrorDisplay { error_txt: e.clone() } };
    }

    rsx! {
        div {
            id: "x-library-page-root-component",
            div {
                id: "x-search-input-top-bar",
                SearchInputTopBar {}
            }
            div {
                id: "x-library-bottom-space",
                div {
                    id: "x-library-left-panel",
                    FacetPanel {}
                }
                div {
                    id: "x-library-right-panel",
                    SearchResultListControls {}
                    if let Some(error) = query_error() {
                        ComponentErrorDisplay { error_txt: error }
                    } else {
                        ResultList {}
                    }
                }
            }
        }
    }
}

fn apply_route(filter: &mut LibraryFilter, query: SearchQuery, page: usize) -> library_index::Result<ResultPage> {
    filter.apply_query(query, page).cloned()
}

#[component]
fn ResultList() -> Element {
    let library = use_context::<LibraryContext>();
    let results = library.results;
    let first_index = use_memo(move || results.read().pagination.first_index());
    let items = use_memo(move || results.read().items.clone());

    rsx! {
        div {
            id: "x-result-list",
            for (i, document) in items().into_iter().enumerate() {
                SearchResultItemCard {
                    key: "{first_index() + i}",
                    document,
                    item_index: first_index() + i,
                }
            }
        }
    }
}
