pub mod home_page;
pub mod library_page;
