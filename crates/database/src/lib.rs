//! # Database Crate
//!
//! This crate acts as a high-level, application-specific interface to the
//! PostgreSQL database that backs the items API.
//!
//! ## Architectural Principles
//!
//! - **Adapter:** This crate encapsulates all database-specific logic. It
//!   provides a clean, abstract API to the rest of the application, hiding
//!   the underlying SQL and connection management details.
//! - **Bounded & Pooled:** All operations go through a single `PgPool` with a
//!   hard connection bound, an acquisition timeout, and idle eviction. The
//!   pool is the only synchronization point in the system.
//! - **Explicit Lifetime:** The pool is constructed once at startup, injected
//!   into consumers, and drained exactly once during graceful shutdown. There
//!   is no module-level singleton.
//!
//! ## Public API
//!
//! - `connect`: builds the lazily-connecting pool from the typed settings.
//! - `ItemRepository`: holds the pool and provides the data access methods
//!   (`list_items`, `insert_item`, `get_item`, `delete_item`, `ping`).
//! - `DbError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod repository;

// Re-export the key components to create a clean, public-facing API.
pub use connection::connect;
pub use error::DbError;
pub use repository::{Item, ItemRepository};
