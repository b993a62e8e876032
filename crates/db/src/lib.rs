//! `db` crate: pure persistence layer.
//!
//! Provides a connection pool, typed row structs, the composable list
//! filter, and repository functions for every table in the taxonomy
//! schema. No HTTP concerns live here.

pub mod error;
pub mod filter;
pub mod models;
pub mod pool;
pub mod repository;

pub use error::DbError;
pub use pool::DbPool;
