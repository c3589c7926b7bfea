//! Repository trait definitions for the domain layer.
//!
//! This module defines the repository interfaces (traits) that abstract data access
//! operations following the Repository pattern. These traits are implemented by
//! concrete repositories in the infrastructure layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`PasteRepository`] - Paste storage and the shortlink uniqueness oracle
//!
//! # Testing
//!
//! See integration tests in `tests/repository_paste.rs` for usage examples.

pub mod paste_repository;

pub use paste_repository::PasteRepository;

#[cfg(test)]
pub use paste_repository::MockPasteRepository;
