//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without business logic.
//!
//! # Design Pattern
//!
//! Entities follow the "New Type" pattern with a separate struct for creation:
//! [`NewLink`] carries what the caller supplies, [`Link`] adds what the store assigns.

pub mod link;

pub use link::{Link, NewLink};
