//! Rick and Morty character catalog TUI built on tui-dispatch.
//!
//! The library exposes the app's modules for testing.

pub mod action;
pub mod api;
pub mod components;
pub mod config;
pub mod effect;
pub mod error;
pub mod favorites;
pub mod logging;
pub mod query;
pub mod reducer;
pub mod state;
pub mod stats;
pub mod ui;
