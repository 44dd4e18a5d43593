pub mod analyze;
pub mod chat;
pub mod config;
pub mod extract;
pub mod health;
pub mod summary;
