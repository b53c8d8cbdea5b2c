pub mod assets;
pub mod auth;
pub mod blog;
pub mod contact;
pub mod images;
pub mod search;
