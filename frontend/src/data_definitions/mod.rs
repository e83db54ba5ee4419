pub mod library_state;
pub mod url_param;
