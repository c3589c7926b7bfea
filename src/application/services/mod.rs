//! Business logic services for the application layer.

pub mod paste_service;
pub mod shortlink_service;

pub use paste_service::PasteService;
pub use shortlink_service::ShortlinkGenerator;
