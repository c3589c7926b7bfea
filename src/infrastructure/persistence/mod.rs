//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx.
//!
//! # Repositories
//!
//! - [`PgPasteRepository`] - Paste storage, lookup, and the shortlink uniqueness oracle

pub mod pg_paste_repository;

pub use pg_paste_repository::PgPasteRepository;
