//! Application layer services implementing business logic.
//!
//! Services orchestrate domain operations by coordinating validation, code
//! generation and repository calls, and give HTTP handlers and the admin CLI a
//! single entry point.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Short link creation and resolution

pub mod services;
