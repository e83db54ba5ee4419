//! Common library exports shared between the index adapter and the frontend.

extern crate serde;


pub mod document;
pub mod query_config;
pub mod search_query;
pub mod search_result;
pub mod search_const;
