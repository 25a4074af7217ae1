// src/config/mod.rs

//! Configuration loading, defaulting and validation.
//!
//! Raw TOML is deserialized into [`RawConfigFile`] (defaults applied by
//! `serde`), then converted into the validated [`Config`] that the rest of
//! the application consumes. All malformed input is rejected during that
//! conversion, before any command runs.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path};
pub use model::{
    CommandEntry, CommandField, Config, InitSection, LoopSection, RawConfigFile, ServerConfig,
    ServerSection,
};
