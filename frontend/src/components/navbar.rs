//! Top bar shared by every page.

use dioxus::prelude::*;
use dioxus_free_icons::icons::md_action_icons::{MdHome, MdSearch};
use dioxus_free_icons::icons::md_maps_icons::MdLocalLibrary;
use dioxus_free_icons::{Icon, IconShape};

use crate::components::error_boundary::GlobalErrorBoundary;
use crate::routes::Route;

#[component]
pub fn Navbar() -> Element {
    rsx! {
        div {
            id: "x-nav-container",
            div {
                id: "x-nav-topbar",
                Link {
                    to: Route::HomePage {},
                    class: "x-nav-brand",
                    Icon { icon: MdLocalLibrary, style: "width: 30px; height: 30px;" }
                    span { "Wetlands Library" }
                }
                div { style: "flex-grow: 1;" }
                IconLink { to: Route::HomePage {}, icon: MdHome, label: "Home" }
                IconLink { to: Route::library_page_from_query(Default::default()), icon: MdSearch, label: "Browse the library" }
            }
            div {
                id: "x-page-container",
                GlobalErrorBoundary {
                    boundary_name: "Navbar".to_string(),
                    Outlet::<Route> {}
                }
            }
        }
    }
}

#[component]
fn IconLink<T: IconShape + Clone + PartialEq + 'static>(to: Route, icon: T, label: String) -> Element {
    rsx! {
        span {
            title: "{label}",
            Link {
                to: to,
                class: "x-nav-link",
                Icon { icon: icon, style: "width: 24px; height: 24px;" }
            }
        }
    }
}
