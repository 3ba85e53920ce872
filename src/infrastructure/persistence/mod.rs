//! Link store implementations.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - PostgreSQL storage via SQLx
//! - [`MemoryLinkRepository`] - In-process storage
//!
//! [`schema`] owns connection setup, migrations and the destructive reset.

pub mod memory_link_repository;
pub mod pg_link_repository;
pub mod schema;

pub use memory_link_repository::MemoryLinkRepository;
pub use pg_link_repository::PgLinkRepository;
