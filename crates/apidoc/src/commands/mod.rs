//! CLI command implementations

pub mod markdown;
