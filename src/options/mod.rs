//! Option loading with env-var overrides.
//!
//! Reads `config/default.toml` (or an explicit path), then applies
//! `SUBPROCESS_*` env overrides. Nothing here enforces requiredness; that
//! happens when a snapshot is built.
//!
//! # Module layout
//!
//! - **types**: [`PipelineOptions`] accessor trait and [`SubprocessOptions`].
//! - **raw**: Raw TOML deserialization types; kept private.
//! - **load**: `load`, `load_from`, [`EnvOverrides`], `expand_home`.

mod load;
mod raw;
mod types;

pub use load::{EnvOverrides, expand_home, load, load_from};
pub use types::*;
