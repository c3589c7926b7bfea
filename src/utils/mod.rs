//! Utility functions for shortlink generation and storage error handling.
//!
//! This module provides helper functions used across the application:
//!
//! - [`shortlink`] - Base62 encoding and shortlink candidate generation
//! - [`db_error`] - Classification of database errors

pub mod db_error;
pub mod shortlink;
