//! TaskDeck task service library.
//!
//! Exposes the REST server for use in tests and embedding. The service
//! is a thin, stateless HTTP layer translating verbs into operations on
//! the [`store::TaskStore`] document store.

pub mod config;
pub mod error;
pub mod server;
pub mod store;
