//! Markdown emission engine
//!
//! [`MarkdownEmitter`] walks a [`Node`] tree and writes Markdown text. A
//! [`NodeRenderer`] sees every node first and may take it over; whatever it
//! declines is written by the standard rules below. Escaping depends on
//! where text lands: prose is escaped, code is not, and table cells
//! additionally neutralize pipes and line breaks.

use crate::error::EmitError;
use crate::nodes::{Emphasis, Heading, LinkDestination, LinkTag, Node, Section, Table};
use crate::resolve::LinkResolver;
use crate::writer::IndentedWriter;
use apidoc_core::EntityId;

/// Access to the standard rules from inside a [`NodeRenderer`] override
pub trait StandardRender {
    /// Emits `node`, giving overrides a chance first
    fn render(&mut self, node: &Node, writer: &mut IndentedWriter) -> Result<(), EmitError>;

    /// Emits `node` with the standard rules only
    fn render_standard(&mut self, node: &Node, writer: &mut IndentedWriter)
    -> Result<(), EmitError>;
}

/// Profile-specific handling of node kinds
pub trait NodeRenderer {
    /// Renders `node` and returns `true`, or returns `false` to decline
    fn render_node(
        &self,
        node: &Node,
        writer: &mut IndentedWriter,
        standard: &mut dyn StandardRender,
    ) -> Result<bool, EmitError>;
}

/// Renderer without overrides
pub struct StandardOnly;

impl NodeRenderer for StandardOnly {
    fn render_node(
        &self,
        _node: &Node,
        _writer: &mut IndentedWriter,
        _standard: &mut dyn StandardRender,
    ) -> Result<bool, EmitError> {
        Ok(false)
    }
}

/// Page being emitted and the resolver for its links
pub struct EmitContext<'a> {
    pub page: EntityId,
    pub resolver: &'a LinkResolver<'a>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOutput {
    pub text: String,
    /// Unresolved references and missing link texts
    pub warnings: Vec<String>,
}

pub struct MarkdownEmitter<'a> {
    renderer: &'a dyn NodeRenderer,
    context: EmitContext<'a>,
    in_table_cell: bool,
    bold_depth: usize,
    italic_depth: usize,
    warnings: Vec<String>,
}

impl<'a> MarkdownEmitter<'a> {
    pub fn new(renderer: &'a dyn NodeRenderer, context: EmitContext<'a>) -> Self {
        Self {
            renderer,
            context,
            in_table_cell: false,
            bold_depth: 0,
            italic_depth: 0,
            warnings: Vec::new(),
        }
    }

    /// Emits a whole tree
    pub fn emit(mut self, root: &Node) -> Result<EmitOutput, EmitError> {
        let mut writer = IndentedWriter::new();
        self.emit_node(root, &mut writer)?;
        writer.ensure_new_line();
        Ok(EmitOutput {
            text: writer.into_string(),
            warnings: self.warnings,
        })
    }

    pub fn emit_section(self, section: &Section) -> Result<EmitOutput, EmitError> {
        self.emit(&Node::Section(section.clone()))
    }

    fn emit_node(&mut self, node: &Node, writer: &mut IndentedWriter) -> Result<(), EmitError> {
        let renderer = self.renderer;
        if renderer.render_node(node, writer, self)? {
            return Ok(());
        }
        self.emit_standard(node, writer)
    }

    fn emit_standard(&mut self, node: &Node, writer: &mut IndentedWriter) -> Result<(), EmitError> {
        match node {
            Node::Section(section) => self.emit_children(&section.children, writer)?,
            Node::Paragraph(children) => {
                if !self.in_table_cell {
                    writer.ensure_skipped_line();
                }
                self.emit_children(children, writer)?;
                writer.ensure_new_line();
            }
            Node::Heading(heading) => self.emit_heading(heading, writer),
            Node::PlainText(text) => {
                let escaped = escape_text(text, writer.at_line_start() && !self.in_table_cell);
                writer.write(&escaped);
            }
            Node::SoftBreak => writer.write(" "),
            Node::CodeSpan(code) => writer.write(&code_span(code)),
            Node::FencedCode { language, code } => {
                writer.ensure_skipped_line();
                let fence = code_fence(code);
                writer.write_line(&format!("{}{}", fence, language));
                writer.write_line(code.trim_end_matches(['\r', '\n']));
                writer.write_line(&fence);
                writer.ensure_skipped_line();
            }
            Node::LinkTag(link) => self.emit_link(link, writer),
            Node::Emphasis(emphasis) => self.emit_emphasis(emphasis, writer)?,
            Node::Table(table) => self.emit_table(table, writer)?,
            Node::NoteBox(section) => {
                writer.ensure_skipped_line();
                writer.with_indent("> ", |w| self.emit_children(&section.children, w))?;
                writer.ensure_skipped_line();
            }
            Node::Custom(custom) => return Err(EmitError::UnsupportedNode(custom.kind_name())),
        }
        Ok(())
    }

    fn emit_children(&mut self, children: &[Node], writer: &mut IndentedWriter) -> Result<(), EmitError> {
        for child in children {
            self.emit_node(child, writer)?;
        }
        Ok(())
    }

    fn emit_heading(&mut self, heading: &Heading, writer: &mut IndentedWriter) {
        writer.ensure_skipped_line();
        let mut line = format!("{} {}", "#".repeat(heading.level as usize), escape_text(&heading.title, false));
        if let Some(anchor) = &heading.anchor {
            line.push_str(&format!(" {{#{}}}", anchor));
        }
        writer.write_line(&line);
        writer.ensure_skipped_line();
    }

    fn emit_link(&mut self, link: &LinkTag, writer: &mut IndentedWriter) {
        match &link.destination {
            LinkDestination::Url(url) => {
                let text = collapse_whitespace(link.text.as_deref().unwrap_or(url));
                writer.write(&format!("[{}]({})", escape_text(&text, false), url));
            }
            LinkDestination::Code(destination) => {
                match self.context.resolver.resolve(destination, self.context.page) {
                    Ok(resolved) => {
                        let text = match &link.text {
                            Some(text) if !text.trim().is_empty() => text.clone(),
                            _ if !resolved.text.is_empty() => resolved.text,
                            _ => {
                                let fallback = self.fallback_text(link);
                                self.warn(format!("link to '{}' has no display text", fallback));
                                fallback
                            }
                        };
                        let text = collapse_whitespace(&text);
                        writer.write(&format!("[{}]({})", escape_text(&text, false), resolved.href));
                    }
                    Err(reason) => {
                        let text = self.fallback_text(link);
                        self.warn(format!("unresolved link to '{}': {}", text, reason));
                        let escaped = escape_text(&text, writer.at_line_start() && !self.in_table_cell);
                        writer.write(&escaped);
                    }
                }
            }
        }
    }

    fn fallback_text(&self, link: &LinkTag) -> String {
        if let Some(text) = &link.text {
            return text.clone();
        }
        match &link.destination {
            LinkDestination::Code(crate::nodes::CodeDestination::Reference(reference)) => {
                reference.as_str().to_string()
            }
            LinkDestination::Code(crate::nodes::CodeDestination::Entity(id)) => {
                self.context.resolver.model().entity(*id).name.clone()
            }
            LinkDestination::Url(url) => url.clone(),
        }
    }

    fn warn(&mut self, message: String) {
        tracing::warn!(page = self.context.page.index(), "{}", message);
        self.warnings.push(message);
    }

    fn emit_emphasis(&mut self, emphasis: &Emphasis, writer: &mut IndentedWriter) -> Result<(), EmitError> {
        let open_bold = emphasis.bold && self.bold_depth == 0;
        let open_italic = emphasis.italic && self.italic_depth == 0;

        if emphasis.bold {
            self.bold_depth += 1;
        }
        if emphasis.italic {
            self.italic_depth += 1;
        }

        let mut inner = if writer.at_line_start() {
            IndentedWriter::new()
        } else {
            IndentedWriter::continuing()
        };
        let result = self.emit_children(&emphasis.children, &mut inner);

        if emphasis.bold {
            self.bold_depth -= 1;
        }
        if emphasis.italic {
            self.italic_depth -= 1;
        }
        result?;

        let content = inner.into_string();
        let trimmed = content.trim();
        if trimmed.is_empty() {
            writer.write(&content);
            return Ok(());
        }

        let leading = &content[..content.len() - content.trim_start().len()];
        let trailing = &content[content.trim_end().len()..];
        let delimiter = match (open_bold, open_italic) {
            (true, true) => "***",
            (true, false) => "**",
            (false, true) => "*",
            (false, false) => "",
        };

        writer.write(leading);
        writer.write(delimiter);
        writer.write(trimmed);
        writer.write(delimiter);
        writer.write(trailing);
        Ok(())
    }

    fn emit_table(&mut self, table: &Table, writer: &mut IndentedWriter) -> Result<(), EmitError> {
        if table.is_empty() {
            return Ok(());
        }

        writer.ensure_skipped_line();

        let header: Vec<String> = table
            .headers()
            .iter()
            .map(|title| escape_cell(&escape_text(title, false)))
            .collect();
        writer.write_line(&format!("| {} |", header.join(" | ")));
        writer.write_line(&format!("|{}", " --- |".repeat(header.len())));

        let was_in_cell = self.in_table_cell;
        self.in_table_cell = true;
        let rows = table
            .rows()
            .iter()
            .map(|row| {
                row.cells
                    .iter()
                    .map(|cell| {
                        let mut cell_writer = IndentedWriter::new();
                        self.emit_children(&cell.children, &mut cell_writer)?;
                        Ok(escape_cell(cell_writer.as_str().trim()))
                    })
                    .collect::<Result<Vec<_>, EmitError>>()
            })
            .collect::<Result<Vec<_>, EmitError>>();
        self.in_table_cell = was_in_cell;

        for cells in rows? {
            writer.write_line(&format!("| {} |", cells.join(" | ")));
        }
        writer.ensure_skipped_line();
        Ok(())
    }
}

impl StandardRender for MarkdownEmitter<'_> {
    fn render(&mut self, node: &Node, writer: &mut IndentedWriter) -> Result<(), EmitError> {
        self.emit_node(node, writer)
    }

    fn render_standard(
        &mut self,
        node: &Node,
        writer: &mut IndentedWriter,
    ) -> Result<(), EmitError> {
        self.emit_standard(node, writer)
    }
}

/// Escapes Markdown-significant characters in prose
///
/// `#`, `-` and `+` are only significant at the start of a line; they are
/// escaped there when `at_line_start` holds and after every embedded newline.
pub fn escape_text(text: &str, at_line_start: bool) -> String {
    let mut escaped = String::with_capacity(text.len());
    let mut line_start = at_line_start;

    for c in text.chars() {
        match c {
            '\\' | '*' | '_' | '[' | ']' | '`' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '#' | '-' | '+' if line_start => {
                escaped.push('\\');
                escaped.push(c);
            }
            _ => escaped.push(c),
        }
        line_start = c == '\n';
    }
    escaped
}

/// Link texts stay on one line: every whitespace run becomes a single space
fn collapse_whitespace(text: &str) -> String {
    let mut collapsed = String::with_capacity(text.len());
    let mut in_whitespace = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                collapsed.push(' ');
            }
            in_whitespace = true;
        } else {
            collapsed.push(c);
            in_whitespace = false;
        }
    }
    collapsed
}

/// Keeps a rendered cell on one line and inside its column
fn escape_cell(content: &str) -> String {
    content
        .replace("\r\n", "\n")
        .replace('\n', "<br/>")
        .replace('|', "\\|")
}

fn longest_backtick_run(code: &str) -> usize {
    code.split(|c| c != '`').map(str::len).max().unwrap_or(0)
}

/// Inline code with a fence longer than any backtick run inside it
pub fn code_span(code: &str) -> String {
    if code.is_empty() {
        return String::new();
    }
    let fence = "`".repeat(longest_backtick_run(code) + 1);
    let padding = if code.starts_with('`') || code.ends_with('`') {
        " "
    } else {
        ""
    };
    format!("{fence}{padding}{code}{padding}{fence}")
}

fn code_fence(code: &str) -> String {
    "`".repeat((longest_backtick_run(code) + 1).max(3))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::PathNamer;
    use crate::nodes::{CodeDestination, CustomNode, TableRow};
    use apidoc_core::config::{Layout, LinkStyle};
    use apidoc_core::DeclarationReference;
    use apidoc_testkit::{find_entity, widgets_model};

    fn emit_with(node: Node) -> Result<EmitOutput, EmitError> {
        let model = widgets_model();
        let resolver = LinkResolver::new(
            &model,
            PathNamer::new(&model, Layout::Flat),
            LinkStyle::Relative,
        );
        let page = find_entity(&model, "Widget", 1);
        MarkdownEmitter::new(&StandardOnly, EmitContext { page, resolver: &resolver }).emit(&node)
    }

    fn emit(node: Node) -> EmitOutput {
        emit_with(node).unwrap()
    }

    #[test]
    fn test_plain_text_is_escaped() {
        let output = emit(Node::Paragraph(vec![Node::text("a*b_c")]));
        assert_eq!(output.text, "a\\*b\\_c\n");
    }

    #[test]
    fn test_code_is_not_escaped() {
        let output = emit(Node::Paragraph(vec![Node::code("a*b_c")]));
        assert_eq!(output.text, "`a*b_c`\n");

        let output = emit(Node::fenced("ts", "a*b_c"));
        assert_eq!(output.text, "```ts\na*b_c\n```\n\n");
    }

    #[test]
    fn test_line_start_characters_escaped_only_at_line_start() {
        let output = emit(Node::Paragraph(vec![Node::text("# not-a heading + <b>")]));
        assert_eq!(output.text, "\\# not-a heading + &lt;b&gt;\n");

        let output = emit(Node::Paragraph(vec![Node::text("- item")]));
        assert_eq!(output.text, "\\- item\n");

        let output = emit(Node::Paragraph(vec![Node::text("+ item")]));
        assert_eq!(output.text, "\\+ item\n");

        let output = emit(Node::Paragraph(vec![Node::text("a-b\n-c +d")]));
        assert_eq!(output.text, "a-b\n\\-c +d\n");

        let output = emit(Node::Paragraph(vec![Node::code("x"), Node::text("-y")]));
        assert_eq!(output.text, "`x`-y\n");
    }

    #[test]
    fn test_code_span_uses_longer_fence() {
        assert_eq!(code_span("a`b"), "``a`b``");
        assert_eq!(code_span("`tick`"), "`` `tick` ``");
        assert_eq!(code_span("a``b"), "```a``b```");
    }

    #[test]
    fn test_fenced_code_fence_outgrows_content() {
        let output = emit(Node::fenced("md", "```\ninner\n```"));
        assert!(output.text.starts_with("````md\n"));
        assert!(output.text.trim_end().ends_with("````"));
    }

    #[test]
    fn test_heading_with_anchor() {
        let heading = Heading::new(2, "render method").with_anchor(Some("render-method".to_string()));
        let output = emit(Node::Heading(heading));
        assert_eq!(output.text, "## render method {#render-method}\n\n");
    }

    #[test]
    fn test_empty_table_emits_nothing() {
        let output = emit(Node::Table(Table::new(["A", "B"])));
        assert_eq!(output.text, "");
    }

    #[test]
    fn test_table_cell_pipe_and_newline_are_neutralized() {
        let mut table = Table::new(["Value", "Description"]);
        table
            .add_row(TableRow::new(vec![
                Section::from(vec![Node::code("a | b")]),
                Section::from(vec![
                    Node::Paragraph(vec![Node::text("first")]),
                    Node::Paragraph(vec![Node::text("-second")]),
                ]),
            ]))
            .unwrap();

        let output = emit(Node::Table(table));
        let lines: Vec<&str> = output.text.lines().collect();

        assert_eq!(lines[0], "| Value | Description |");
        assert_eq!(lines[1], "| --- | --- |");
        assert_eq!(lines[2], "| `a \\| b` | first<br/>-second |");
        // The pipe inside the cell does not add a column
        let unescaped_pipes = lines[2].replace("\\|", "").matches('|').count();
        assert_eq!(unescaped_pipes, 3);
    }

    #[test]
    fn test_nested_emphasis_is_not_doubled() {
        let node = Node::Paragraph(vec![Node::bold(vec![
            Node::text("outer "),
            Node::bold(vec![Node::text("inner")]),
        ])]);
        assert_eq!(emit(node).text, "**outer inner**\n");
    }

    #[test]
    fn test_emphasis_moves_whitespace_outside() {
        let node = Node::Paragraph(vec![
            Node::text("a"),
            Node::bold_italic(vec![Node::text(" b ")]),
            Node::text("c"),
        ]);
        assert_eq!(emit(node).text, "a ***b*** c\n");
    }

    #[test]
    fn test_italic_inside_word_uses_asterisks() {
        let node = Node::Paragraph(vec![
            Node::text("foo"),
            Node::Emphasis(Emphasis {
                bold: false,
                italic: true,
                children: vec![Node::text("bar")],
            }),
            Node::text("baz"),
        ]);
        assert_eq!(emit(node).text, "foo*bar*baz\n");
    }

    #[test]
    fn test_note_box_is_blockquote() {
        let node = Node::NoteBox(Section::from(vec![
            Node::Paragraph(vec![Node::text("one")]),
            Node::Paragraph(vec![Node::text("two")]),
        ]));
        assert_eq!(emit(node).text, "> one\n>\n> two\n\n");
    }

    #[test]
    fn test_resolved_link() {
        let node = Node::Paragraph(vec![Node::LinkTag(LinkTag::to_reference(
            DeclarationReference::new("Widget.render:2"),
            None,
        ))]);
        let output = emit(node);
        assert_eq!(output.text, "[Widget.render](#render_1-method)\n");
        assert!(output.warnings.is_empty());
    }

    #[test]
    fn test_link_text_whitespace_is_collapsed() {
        let node = Node::Paragraph(vec![Node::LinkTag(LinkTag::to_reference(
            DeclarationReference::new("Widget.render:2"),
            Some("second\n   render\toverload".to_string()),
        ))]);
        assert_eq!(emit(node).text, "[second render overload](#render_1-method)\n");

        let node = Node::LinkTag(LinkTag::to_url(
            "https://example.com",
            Some("example\r\n site".to_string()),
        ));
        assert_eq!(emit(node).text, "[example site](https://example.com)\n");
    }

    #[test]
    fn test_unresolved_link_emits_raw_text_and_warning() {
        let node = Node::Paragraph(vec![
            Node::text("See "),
            Node::LinkTag(LinkTag::to_reference(DeclarationReference::new("Gizmo"), None)),
        ]);
        let output = emit(node);
        assert_eq!(output.text, "See Gizmo\n");
        assert_eq!(output.warnings.len(), 1);
        assert!(output.warnings[0].contains("Gizmo"));
    }

    #[test]
    fn test_url_link() {
        let node = Node::LinkTag(LinkTag::to_url("https://example.com", Some("site".to_string())));
        assert_eq!(emit(node).text, "[site](https://example.com)\n");
    }

    #[test]
    fn test_custom_node_without_override_fails() {
        let err = emit_with(Node::Custom(CustomNode::PageTitle("Widget class".to_string())))
            .unwrap_err();
        assert_eq!(err, EmitError::UnsupportedNode("page_title"));
    }

    #[test]
    fn test_children_keep_order() {
        let node = Node::Section(Section::from(vec![
            Node::Paragraph(vec![Node::text("1")]),
            Node::Paragraph(vec![Node::text("2")]),
            Node::Paragraph(vec![Node::text("1")]),
        ]));
        assert_eq!(emit(node).text, "1\n\n2\n\n1\n");
    }

    #[test]
    fn test_entity_link_from_table_cell() {
        let model = widgets_model();
        let resolver = LinkResolver::new(
            &model,
            PathNamer::new(&model, Layout::Flat),
            LinkStyle::Relative,
        );
        let package = model.find_package("widgets").unwrap();
        let widget = find_entity(&model, "Widget", 1);

        let mut table = Table::new(["Class"]);
        table
            .add_row(TableRow::new(vec![Section::from(vec![Node::LinkTag(
                LinkTag {
                    text: Some("Widget".to_string()),
                    destination: LinkDestination::Code(CodeDestination::Entity(widget)),
                },
            )])]))
            .unwrap();

        let output = MarkdownEmitter::new(
            &StandardOnly,
            EmitContext {
                page: package,
                resolver: &resolver,
            },
        )
        .emit(&Node::Table(table))
        .unwrap();

        assert!(output.text.contains("| [Widget](./widget.md) |"));
    }
}
