pub mod identity;
pub mod import;
pub mod output;
pub mod question;
pub mod settings;
pub mod store;
