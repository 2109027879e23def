// ABOUTME: Library root for firelift - exposes public types for testing.
// ABOUTME: The main binary is in main.rs.

pub mod api;
pub mod build;
pub mod config;
pub mod context;
pub mod deploy;
pub mod error;
pub mod fshost;
pub mod manifest;
pub mod observe;
pub mod process;
pub mod runtime_check;
pub mod templates;
pub mod types;
