//! Shared data model and wire types for TaskDeck.

pub mod api;
pub mod task;
