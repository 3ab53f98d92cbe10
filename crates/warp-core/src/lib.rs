// Core modules
pub mod condition;
pub mod config;
pub mod error;
pub mod path;
pub mod project;
pub mod template;
pub mod vars;

// Re-export commonly used types
pub use error::{Result, WarpError};
