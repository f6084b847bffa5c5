pub mod cache;
pub mod recipe;
pub mod saved;
pub mod user;
