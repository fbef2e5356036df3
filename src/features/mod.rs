pub mod auth;
pub mod categories;
pub mod documents;
pub mod navigation;
pub mod search;
pub mod settings;
pub mod subcategories;
pub mod users;
