pub mod config;
pub mod contact;
pub mod i18n;
pub mod page;
pub mod popup;
pub mod seo;
pub mod server;
pub mod structured_data;
