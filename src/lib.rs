//! citytetris (workspace facade crate).
//!
//! Keeps a single `citytetris::{core,types}` public API while the
//! implementation lives in dedicated crates under `crates/`.

pub use citytetris_core as core;
pub use citytetris_types as types;
