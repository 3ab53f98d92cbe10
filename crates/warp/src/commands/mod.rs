//! CLI command implementations

pub mod functions;
pub mod new;
pub mod render;
pub mod vars;
