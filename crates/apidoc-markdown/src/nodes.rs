//! Document node tree
//!
//! Pages are assembled as a tree of [`Node`] values and handed to the
//! [`MarkdownEmitter`](crate::emitter::MarkdownEmitter). Nodes are plain data:
//! they are built once, emitted once and dropped.

use crate::error::NodeError;
use apidoc_core::{DeclarationReference, EntityId};

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Section(Section),
    /// Inline children separated from sibling blocks by a blank line
    Paragraph(Vec<Node>),
    Heading(Heading),
    PlainText(String),
    SoftBreak,
    CodeSpan(String),
    FencedCode { language: String, code: String },
    LinkTag(LinkTag),
    Emphasis(Emphasis),
    Table(Table),
    /// Blockquote callout
    NoteBox(Section),
    /// Page furniture, rendered by profile overrides only
    Custom(CustomNode),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::PlainText(text.into())
    }

    pub fn code(code: impl Into<String>) -> Self {
        Node::CodeSpan(code.into())
    }

    pub fn fenced(language: impl Into<String>, code: impl Into<String>) -> Self {
        Node::FencedCode {
            language: language.into(),
            code: code.into(),
        }
    }

    pub fn bold(children: Vec<Node>) -> Self {
        Node::Emphasis(Emphasis {
            bold: true,
            italic: false,
            children,
        })
    }

    pub fn bold_italic(children: Vec<Node>) -> Self {
        Node::Emphasis(Emphasis {
            bold: true,
            italic: true,
            children,
        })
    }

    /// Name of the node kind, used in error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Section(_) => "section",
            Node::Paragraph(_) => "paragraph",
            Node::Heading(_) => "heading",
            Node::PlainText(_) => "plain_text",
            Node::SoftBreak => "soft_break",
            Node::CodeSpan(_) => "code_span",
            Node::FencedCode { .. } => "fenced_code",
            Node::LinkTag(_) => "link_tag",
            Node::Emphasis(_) => "emphasis",
            Node::Table(_) => "table",
            Node::NoteBox(_) => "note_box",
            Node::Custom(custom) => custom.kind_name(),
        }
    }
}

/// Ordered container of nodes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Section {
    pub children: Vec<Node>,
}

impl Section {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn append(&mut self, node: Node) {
        self.children.push(node);
    }

    pub fn append_all(&mut self, nodes: impl IntoIterator<Item = Node>) {
        self.children.extend(nodes);
    }

    /// Appends inline content, wrapping it in a paragraph
    pub fn append_in_paragraph(&mut self, inlines: Vec<Node>) {
        self.children.push(Node::Paragraph(inlines));
    }

    pub fn append_section(&mut self, section: Section) {
        self.children.push(Node::Section(section));
    }

    /// Moves the children of `other` to the end of this section
    pub fn append_and_merge(&mut self, other: Section) {
        self.children.extend(other.children);
    }
}

impl From<Vec<Node>> for Section {
    fn from(children: Vec<Node>) -> Self {
        Self { children }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Heading {
    /// 1..=6
    pub level: u8,
    pub title: String,
    /// Explicit heading id (`{#id}`)
    pub anchor: Option<String>,
}

impl Heading {
    pub fn new(level: u8, title: impl Into<String>) -> Self {
        Self {
            level: level.clamp(1, 6),
            title: title.into(),
            anchor: None,
        }
    }

    pub fn with_anchor(mut self, anchor: Option<String>) -> Self {
        self.anchor = anchor;
        self
    }
}

/// Hyperlink resolved at emission time
#[derive(Debug, Clone, PartialEq)]
pub struct LinkTag {
    /// Display text; synthesized from the target when absent
    pub text: Option<String>,
    pub destination: LinkDestination,
}

impl LinkTag {
    pub fn to_reference(reference: DeclarationReference, text: Option<String>) -> Self {
        Self {
            text,
            destination: LinkDestination::Code(CodeDestination::Reference(reference)),
        }
    }

    pub fn to_entity(entity: EntityId, text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            destination: LinkDestination::Code(CodeDestination::Entity(entity)),
        }
    }

    pub fn to_url(url: impl Into<String>, text: Option<String>) -> Self {
        Self {
            text,
            destination: LinkDestination::Url(url.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LinkDestination {
    Code(CodeDestination),
    Url(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum CodeDestination {
    /// Symbolic reference written in a doc comment
    Reference(DeclarationReference),
    /// Entity already known to the page composer
    Entity(EntityId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Emphasis {
    pub bold: bool,
    pub italic: bool,
    pub children: Vec<Node>,
}

/// Table with fixed headers; every row must match the header count
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<TableRow>,
}

impl Table {
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Adds a row
    ///
    /// # Errors
    ///
    /// Returns [`NodeError::ArityMismatch`] if the row's cell count differs
    /// from the header count.
    pub fn add_row(&mut self, row: TableRow) -> Result<(), NodeError> {
        if row.cells.len() != self.headers.len() {
            return Err(NodeError::ArityMismatch {
                expected: self.headers.len(),
                actual: row.cells.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableRow {
    pub cells: Vec<Section>,
}

impl TableRow {
    pub fn new(cells: Vec<Section>) -> Self {
        Self { cells }
    }
}

/// Page furniture nodes
#[derive(Debug, Clone, PartialEq)]
pub enum CustomNode {
    FrontMatter(FrontMatter),
    PageTitle(String),
    Warning(WarningKind),
}

impl CustomNode {
    pub fn kind_name(&self) -> &'static str {
        match self {
            CustomNode::FrontMatter(_) => "front_matter",
            CustomNode::PageTitle(_) => "page_title",
            CustomNode::Warning(_) => "warning",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrontMatter {
    pub title: String,
    pub keywords: Vec<String>,
    pub page_type: String,
    pub draft: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WarningKind {
    /// Carries the converted `@deprecated` message
    Deprecated(Section),
    Unstable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_row_checks_arity() {
        let mut table = Table::new(["Name", "Description"]);

        table
            .add_row(TableRow::new(vec![Section::new(), Section::new()]))
            .unwrap();
        let err = table
            .add_row(TableRow::new(vec![Section::new()]))
            .unwrap_err();

        assert_eq!(
            err,
            NodeError::ArityMismatch {
                expected: 2,
                actual: 1
            }
        );
        assert_eq!(table.rows().len(), 1);
    }

    #[test]
    fn test_append_and_merge_keeps_order() {
        let mut first = Section::from(vec![Node::text("a")]);
        let second = Section::from(vec![Node::text("b"), Node::text("c")]);

        first.append_and_merge(second);

        assert_eq!(
            first.children,
            vec![Node::text("a"), Node::text("b"), Node::text("c")]
        );
    }

    #[test]
    fn test_heading_level_is_clamped() {
        assert_eq!(Heading::new(0, "x").level, 1);
        assert_eq!(Heading::new(9, "x").level, 6);
    }
}
