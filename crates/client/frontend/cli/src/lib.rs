//! Line-oriented terminal frontend for the leaderboard.
//!
//! This crate provides a terminal interface that implements the
//! [`client_frontend_core::Frontend`] trait.
//!
//! # Architecture
//!
//! CliFrontend is a pure UI layer that:
//! - Receives a LeaderboardHandle for communication
//! - Does NOT own the Runtime
//! - Watches both boards and submits entries via the handle

mod app;
mod command;
mod config;
pub mod logging;
pub mod presentation;

pub use app::CliFrontend;
pub use command::{Command, CommandError};
pub use config::CliConfig;

// Re-export for convenience (used in main.rs)
pub use client_frontend_core::FrontendConfig;
