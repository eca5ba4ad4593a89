//! Pokedex TUI - a PokeAPI catalogue on tui-dispatch
//!
//! The library holds the store, the data layer and the rendering code so the
//! binary stays a thin runner and the tests can drive everything directly.

pub mod action;
pub mod api;
pub mod audio;
pub mod config;
pub mod effect;
pub mod error;
pub mod evolution;
pub mod filter;
pub mod model;
pub mod navigator;
pub mod presenter;
pub mod reducer;
pub mod repository;
pub mod state;
pub mod theme;
pub mod ui;
