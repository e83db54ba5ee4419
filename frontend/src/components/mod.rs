pub mod error_boundary;
pub mod navbar;
pub mod search_components;
