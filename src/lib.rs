//! PokeAPI catalog browser: listing and detail fetches rendered to HTML.
//!
//! The library exposes the client, renderer and hydrator so the binary and
//! the integration tests can drive them.

pub mod api;
pub mod browser;
pub mod config;
pub mod document;
pub mod hydrate;
pub mod palette;
pub mod state;
pub mod ui;
