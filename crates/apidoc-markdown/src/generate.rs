//! Writing the documentation tree to disk

use crate::documenter::{MarkdownDocumenter, RenderedPage};
use crate::error::{GenerateError, Result};
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Outcome of a generation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateSummary {
    pub pages: usize,
    pub files: Vec<PathBuf>,
    /// Unresolved links, missing link texts and path collisions
    pub warnings: Vec<String>,
}

impl MarkdownDocumenter<'_> {
    /// Renders every page, then replaces `output_dir` with the result
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A page tree is malformed or contains a node the profile cannot render
    /// - The output directory cannot be cleared or a page cannot be written
    ///
    /// Rendering finishes before the output directory is touched, so a
    /// malformed page leaves any previous output in place. Unresolved
    /// references never fail the run; they are reported in the summary's
    /// warnings.
    pub fn generate_files(&self, output_dir: impl AsRef<Path>) -> Result<GenerateSummary> {
        let pages = self.render_pages()?;
        self.write_pages(output_dir.as_ref(), pages)
    }

    /// Renders every page in memory without touching the filesystem
    pub fn render_pages(&self) -> Result<Vec<RenderedPage>> {
        let pages = self
            .pages()
            .into_iter()
            .map(|id| self.render_page(id))
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!(pages = pages.len(), "rendered all pages");
        Ok(pages)
    }

    /// Clears `output_dir` and writes already rendered pages below it
    pub fn write_pages(&self, output_dir: &Path, pages: Vec<RenderedPage>) -> Result<GenerateSummary> {
        reset_output_dir(output_dir)?;

        let line_ending = self.config().render.line_ending;
        let mut summary = GenerateSummary::default();
        let mut written: HashMap<PathBuf, String> = HashMap::new();

        for page in pages {
            let path = page.address.file_path(output_dir);
            let name = self.model().entity(page.entity).name.clone();

            tracing::debug!(page = %page.address.page_path(), "writing page");

            if let Some(previous) = written.insert(path.clone(), name.clone()) {
                let message = format!(
                    "'{}' and '{}' both render to {}",
                    previous,
                    name,
                    page.address.page_path()
                );
                tracing::warn!("{}", message);
                summary.warnings.push(message);
            } else {
                summary.files.push(path.clone());
            }

            summary.warnings.extend(page.warnings);
            write_atomic(&path, &line_ending.apply(&page.text))?;
            summary.pages += 1;
        }

        tracing::info!(
            pages = summary.pages,
            warnings = summary.warnings.len(),
            output = %output_dir.display(),
            "documentation generated"
        );
        Ok(summary)
    }
}

/// Removes and recreates the output directory
fn reset_output_dir(output_dir: &Path) -> Result<()> {
    if output_dir.exists() {
        std::fs::remove_dir_all(output_dir).map_err(|e| GenerateError::io(output_dir, e))?;
    }
    std::fs::create_dir_all(output_dir).map_err(|e| GenerateError::io(output_dir, e))
}

/// Writes through a temporary file in the destination directory
fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| GenerateError::io(path, std::io::Error::other("page path has no parent")))?;
    std::fs::create_dir_all(parent).map_err(|e| GenerateError::io(parent, e))?;

    let mut temp_file = NamedTempFile::new_in(parent).map_err(|e| GenerateError::io(parent, e))?;
    temp_file
        .write_all(content.as_bytes())
        .map_err(|e| GenerateError::io(path, e))?;
    temp_file
        .as_file()
        .sync_all()
        .map_err(|e| GenerateError::io(path, e))?;
    temp_file
        .persist(path)
        .map_err(|e| GenerateError::io(path, e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use apidoc_core::model::{Entity, EntityKind};
    use apidoc_core::{ApiModel, Config};
    use tempfile::TempDir;

    #[test]
    fn test_write_atomic_creates_parents() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a").join("b").join("_index.md");

        write_atomic(&path, "hello\r\n").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello\r\n");
    }

    #[test]
    fn test_reset_removes_stale_files() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("docs");
        std::fs::create_dir_all(output.join("old")).unwrap();
        std::fs::write(output.join("old").join("stale.md"), "stale").unwrap();

        reset_output_dir(&output).unwrap();

        assert!(output.exists());
        assert!(!output.join("old").exists());
    }

    #[test]
    fn test_rendering_leaves_output_untouched() {
        let model = apidoc_testkit::widgets_model();
        let config = Config::default();
        let documenter = MarkdownDocumenter::new(&model, &config);
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("docs");
        std::fs::create_dir_all(&output).unwrap();
        std::fs::write(output.join("previous.md"), "previous").unwrap();

        let pages = documenter.render_pages().unwrap();
        assert_eq!(pages.len(), 11);
        assert!(output.join("previous.md").is_file());

        let summary = documenter.write_pages(&output, pages).unwrap();
        assert_eq!(summary.pages, 11);
        assert!(!output.join("previous.md").exists());
        assert!(output.join("_index.md").is_file());
    }

    #[test]
    fn test_colliding_paths_are_reported() {
        // `My Widget` and `My_Widget` both become `my_widget`
        let root = Entity::new(EntityKind::Model, "").with_member(
            Entity::new(EntityKind::Package, "pkg").with_member(
                Entity::new(EntityKind::EntryPoint, "")
                    .with_member(Entity::new(EntityKind::Class, "My Widget"))
                    .with_member(Entity::new(EntityKind::Class, "My_Widget")),
            ),
        );
        let model = ApiModel::from_root(root).unwrap();
        let config = Config::default();
        let temp = TempDir::new().unwrap();

        let summary = MarkdownDocumenter::new(&model, &config)
            .generate_files(temp.path().join("docs"))
            .unwrap();

        assert_eq!(summary.pages, 4);
        assert_eq!(summary.files.len(), 3);
        assert!(
            summary
                .warnings
                .iter()
                .any(|w| w.contains("both render to pkg/my_widget/_index.md"))
        );
    }
}
