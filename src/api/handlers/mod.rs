//! HTTP request handlers for API endpoints.

pub mod health;
pub mod pastes;

pub use health::health_handler;
pub use pastes::{create_paste_handler, get_paste_handler, raw_paste_handler};
