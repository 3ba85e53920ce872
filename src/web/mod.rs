//! Server-rendered pages.
//!
//! - [`handlers`] - Template rendering handlers
//! - [`routes`] - Page routes

pub mod handlers;
pub mod routes;
