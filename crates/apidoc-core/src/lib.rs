//! Core types for apidoc
//!
//! Holds the read-only API entity graph consumed by the renderers, the
//! rendering-profile configuration and the shared error type.

// Core modules
pub mod config;
pub mod error;
pub mod model;

// Re-export commonly used types
pub use config::Config;
pub use error::{ApidocError, Result};
pub use model::{ApiModel, DeclarationReference, Entity, EntityId, EntityKind, ReleaseTag};
