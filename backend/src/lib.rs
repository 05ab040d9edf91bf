//! Chess pieces HTTP API
//!
//! Stores piece records in SQLite and answers move queries through
//! [`chess_rules::legal_moves`].

pub mod api;
pub mod config;
pub mod error;
pub mod store;
