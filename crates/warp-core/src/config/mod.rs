//! Configuration - optional `warp.toml`

pub mod model;

pub use model::{DefaultsConfig, TemplatesConfig, WarpConfig, CONFIG_ENV, CONFIG_FILE};
