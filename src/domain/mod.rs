//! Domain layer containing business entities and logic.
//!
//! This module implements the core domain logic following Clean Architecture principles.
//! It defines entities, repository interfaces, and domain services independent of
//! infrastructure concerns.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`expiration`] - Pure expiration arithmetic over paste records
//! - [`repositories`] - Data access trait definitions
//! - [`purge_worker`] - Background removal of expired pastes
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Repository traits define contracts implemented by infrastructure layer
//! - Business logic is encapsulated in services (see [`crate::application::services`])
//! - The current time is always an explicit argument, never read implicitly
//!
//! # Paste Lifecycle
//!
//! 1. A paste is created once with a generated shortlink and never mutated
//! 2. Reads judge expiration with [`expiration::is_expired`] against the caller's `now`
//! 3. Expired pastes answer as gone; [`purge_worker::run_purge_worker`] deletes them later

pub mod entities;
pub mod expiration;
pub mod purge_worker;
pub mod repositories;
