//! Markdown rendering of API documentation
//!
//! A page is built as a [`nodes::Node`] tree by the
//! [`documenter::MarkdownDocumenter`], turned into text by the
//! [`emitter::MarkdownEmitter`] and written to disk by
//! [`MarkdownDocumenter::generate_files`](documenter::MarkdownDocumenter::generate_files).
//! Cross-references are resolved at emission time so that every link is
//! relative to the page it appears on.

pub mod documenter;
pub mod emitter;
pub mod error;
pub mod generate;
pub mod naming;
pub mod nodes;
pub mod renderer;
pub mod resolve;
pub mod writer;

pub use documenter::{MarkdownDocumenter, RenderedPage};
pub use error::{EmitError, GenerateError, NodeError};
pub use generate::GenerateSummary;
pub use naming::{OutputAddress, PathNamer};
