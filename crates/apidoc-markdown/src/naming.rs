//! Output paths and in-page anchors
//!
//! Addresses are a pure function of an entity's ancestor chain, kind and
//! overload index. Pages are owned by packages and containers; members such
//! as methods and properties live at an anchor inside their parent's page.

use apidoc_core::config::Layout;
use apidoc_core::model::unscoped_name;
use apidoc_core::{ApiModel, EntityId, EntityKind};
use std::path::{Path, PathBuf};

/// Where an entity's documentation is rendered
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OutputAddress {
    /// Directories below the output root
    pub dirs: Vec<String>,
    pub file: String,
    pub anchor: Option<String>,
}

impl OutputAddress {
    /// Page path relative to the output root, `/`-separated
    pub fn page_path(&self) -> String {
        let mut parts: Vec<&str> = self.dirs.iter().map(String::as_str).collect();
        parts.push(&self.file);
        parts.join("/")
    }

    /// Page file below `root`
    pub fn file_path(&self, root: &Path) -> PathBuf {
        let mut path = root.to_path_buf();
        path.extend(&self.dirs);
        path.push(&self.file);
        path
    }

    pub fn same_page(&self, other: &OutputAddress) -> bool {
        self.dirs == other.dirs && self.file == other.file
    }

    /// Link target as seen from the page at `from`
    ///
    /// Climbs with `../` out of the directories `from` does not share with
    /// this address, then descends into the rest. Targets on the same page
    /// reduce to their anchor.
    pub fn relative_to(&self, from: &OutputAddress) -> String {
        if self.same_page(from) {
            if let Some(anchor) = &self.anchor {
                return format!("#{}", anchor);
            }
        }

        let common = self
            .dirs
            .iter()
            .zip(&from.dirs)
            .take_while(|(a, b)| a == b)
            .count();
        let climbs = from.dirs.len() - common;

        let mut link = if climbs == 0 {
            "./".to_string()
        } else {
            "../".repeat(climbs)
        };
        for dir in &self.dirs[common..] {
            link.push_str(dir);
            link.push('/');
        }
        link.push_str(&self.file);

        if let Some(anchor) = &self.anchor {
            link.push('#');
            link.push_str(anchor);
        }
        link
    }
}

/// Computes [`OutputAddress`]es for a model
#[derive(Debug, Clone, Copy)]
pub struct PathNamer<'a> {
    model: &'a ApiModel,
    layout: Layout,
}

impl<'a> PathNamer<'a> {
    pub fn new(model: &'a ApiModel, layout: Layout) -> Self {
        Self { model, layout }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn address_for(&self, id: EntityId) -> OutputAddress {
        let mut segments: Vec<String> = Vec::new();
        let mut anchor = None;

        for ancestor in self.model.hierarchy(id) {
            let entity = self.model.entity(ancestor);
            match entity.kind {
                EntityKind::Model | EntityKind::EntryPoint => {}
                EntityKind::Package => {
                    segments = vec![safe_filename(unscoped_name(&entity.name))];
                }
                EntityKind::EnumMember => {}
                kind if kind.owns_page() => {
                    segments.push(safe_filename(&format!(
                        "{}{}",
                        entity.name,
                        overload_suffix(kind, entity.overload_index)
                    )));
                }
                kind => {
                    anchor = Some(member_anchor(kind, &entity.name, entity.overload_index));
                }
            }
        }

        let (dirs, file) = match self.layout {
            Layout::Nested => (segments, Layout::Nested.index_file_name().to_string()),
            Layout::Flat => match segments.split_first() {
                None => (Vec::new(), Layout::Flat.index_file_name().to_string()),
                Some((package, [])) => (
                    vec![package.clone()],
                    Layout::Flat.index_file_name().to_string(),
                ),
                Some((package, rest)) => (vec![package.clone()], format!("{}.md", rest.join("."))),
            },
        };

        OutputAddress { dirs, file, anchor }
    }

    /// Nearest ancestor (or self) that owns a page
    pub fn page_of(&self, id: EntityId) -> EntityId {
        self.model
            .hierarchy(id)
            .into_iter()
            .rev()
            .find(|ancestor| self.model.entity(*ancestor).kind.owns_page())
            .unwrap_or_else(|| self.model.root())
    }
}

/// `_{N-1}` for the second and later overloads of parameterized kinds
fn overload_suffix(kind: EntityKind, overload_index: u32) -> String {
    if kind.has_parameters() && overload_index > 1 {
        format!("_{}", overload_index - 1)
    } else {
        String::new()
    }
}

/// In-page anchor of a member: `render-method`, `render_1-method`, `size-property`
pub fn member_anchor(kind: EntityKind, name: &str, overload_index: u32) -> String {
    let suffix = overload_suffix(kind, overload_index);
    match kind {
        EntityKind::Constructor | EntityKind::ConstructSignature => {
            format!("constructor{}", suffix)
        }
        EntityKind::Property | EntityKind::PropertySignature => {
            format!("{}{}-property", hyphenate(name), suffix)
        }
        EntityKind::Method | EntityKind::MethodSignature => {
            format!("{}{}-method", hyphenate(name), suffix)
        }
        other => format!("{}{}-{}", hyphenate(name), suffix, other.as_str().replace('_', "-")),
    }
}

fn hyphenate(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect()
}

/// Replaces characters outside `[a-z0-9_.-]` with `_` and lowercases
pub fn safe_filename(segment: &str) -> String {
    segment
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address(dirs: &[&str], file: &str, anchor: Option<&str>) -> OutputAddress {
        OutputAddress {
            dirs: dirs.iter().map(|d| d.to_string()).collect(),
            file: file.to_string(),
            anchor: anchor.map(str::to_string),
        }
    }

    #[test]
    fn test_safe_filename() {
        assert_eq!(safe_filename("Widget"), "widget");
        assert_eq!(safe_filename("my widget<T>"), "my_widget_t_");
        assert_eq!(safe_filename("a.b-c_d"), "a.b-c_d");
    }

    #[test]
    fn test_member_anchor_overloads() {
        assert_eq!(member_anchor(EntityKind::Method, "render", 1), "render-method");
        assert_eq!(member_anchor(EntityKind::Method, "render", 2), "render_1-method");
        assert_eq!(member_anchor(EntityKind::Method, "render", 3), "render_2-method");
        assert_eq!(member_anchor(EntityKind::Property, "Size", 1), "size-property");
        assert_eq!(member_anchor(EntityKind::Constructor, "constructor", 2), "constructor_1");
    }

    #[test]
    fn test_relative_to_ancestor_climbs_depth_difference() {
        let package = address(&["widgets"], "_index.md", None);
        let method = address(&["widgets", "widget", "button"], "_index.md", Some("click-method"));

        assert_eq!(package.relative_to(&method), "../../_index.md");
        assert_eq!(
            method.relative_to(&package),
            "./widget/button/_index.md#click-method"
        );
    }

    #[test]
    fn test_relative_to_same_page_is_anchor() {
        let page = address(&["widgets"], "widget.md", None);
        let member = address(&["widgets"], "widget.md", Some("render-method"));

        assert_eq!(member.relative_to(&page), "#render-method");
        assert_eq!(page.relative_to(&member), "./widget.md");
    }

    #[test]
    fn test_relative_to_sibling_package() {
        let from = address(&["widgets", "widget"], "_index.md", None);
        let to = address(&["gadgets"], "_index.md", None);
        assert_eq!(to.relative_to(&from), "../../gadgets/_index.md");
    }

    #[test]
    fn test_file_path_keeps_separators() {
        let page = address(&["widgets", "widget"], "_index.md", None);
        assert_eq!(
            page.file_path(Path::new("out")),
            Path::new("out").join("widgets").join("widget").join("_index.md")
        );
        assert_eq!(page.page_path(), "widgets/widget/_index.md");
    }
}
