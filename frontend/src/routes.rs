use dioxus::prelude::*;

use common::search_query::SearchQuery;

use crate::components::navbar::Navbar;
use crate::data_definitions::url_param::UrlParam;
use crate::pages::home_page::HomePage;
use crate::pages::library_page::LibraryPage;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Navbar)]


    #[route("/")]
    HomePage {},


    #[route("/library/:query/:page")]
    LibraryPage {
        query: UrlParam<SearchQuery>,
        page: usize,
    },

}

impl Route {
    /// First page of the library for `q`.
    pub fn library_page_from_query(q: SearchQuery) -> Self {
        Self::LibraryPage { query: UrlParam::from(q.normalized()), page: 1 }
    }
}
