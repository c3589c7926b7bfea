//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and business rules. Services consume repository traits and provide
//! a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::shortlink_service::ShortlinkGenerator`] - Collision-checked shortlink generation
//! - [`services::paste_service::PasteService`] - Paste creation and expiration-aware retrieval

pub mod services;
