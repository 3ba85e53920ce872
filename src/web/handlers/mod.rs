//! Page handlers.

pub mod index;

pub use index::index_handler;
