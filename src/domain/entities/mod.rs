//! Core domain entities representing the business data model.
//!
//! # Entity Types
//!
//! - [`Paste`] - A stored paste addressed by its shortlink
//! - [`PasteWithContent`] - A paste record joined with its body
//!
//! # Design Pattern
//!
//! Entities follow the "New Type" pattern with a separate struct for creation:
//! [`NewPaste`] carries the fields of a record that has not been persisted yet.
//! Pastes are never updated after creation, so there is no patch type.

pub mod paste;

pub use paste::{NewPaste, Paste, PasteWithContent};
