//! Test utilities for apidoc
//!
//! This crate provides shared testing utilities used across the apidoc workspace.

pub mod fixtures;

pub use fixtures::{find_entity, widgets_model, widgets_model_json};

use tempfile::TempDir;

/// Creates a temporary directory within `.tmp/` at the project root
///
/// This keeps generated documentation trees from tests in a single
/// gitignored location.
///
/// # Panics
///
/// Panics if:
/// - Unable to determine current directory
/// - Unable to create `.tmp/` directory
/// - Unable to create temporary subdirectory
///
/// # Examples
///
/// ```rust
/// use apidoc_testkit::temp_dir_in_workspace;
///
/// let temp = temp_dir_in_workspace();
/// let output = temp.path().join("docs");
/// std::fs::create_dir_all(&output).unwrap();
/// ```
pub fn temp_dir_in_workspace() -> TempDir {
    let workspace_root = std::env::current_dir().expect("Failed to get current directory");

    let tmp_base = workspace_root.join(".tmp");

    std::fs::create_dir_all(&tmp_base).expect("Failed to create .tmp directory");

    TempDir::new_in(&tmp_base).expect("Failed to create temporary directory in .tmp/")
}
