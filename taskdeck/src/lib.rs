//! TaskDeck — terminal-native personal task manager library.

pub mod api;
pub mod app;
pub mod cache;
pub mod config;
pub mod filter;
pub mod net;
pub mod reorder;
pub mod session;
pub mod state;
pub mod ui;
