//! Tests for template engine
//!
//! Organized into focused submodules, one per pass plus the tokenizer.

use super::*;

// Test helper functions
mod helpers;

// TokenStream tests
mod tokenstream;
