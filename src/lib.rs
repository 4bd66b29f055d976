//! Repeatable "additional enrollment" rows for the course request form.
//!
//! The row operations live in [`enrollment`] and run against any [`dom::Dom`]
//! backend: the in-memory [`dom::Document`] used by the CLI, the preview
//! server and the tests, or the browser document (feature `wasm`).

pub mod config;
pub mod dom;
pub mod enrollment;
pub mod form_data;
pub mod models;

#[cfg(feature = "wasm")]
pub mod web;
