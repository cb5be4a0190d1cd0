//! Profile renderers for page furniture
//!
//! Both profiles render page titles and warning boxes through the standard
//! rules; only the Hugo profile knows how to write front matter. Where the
//! profile has no heading ids, anchored headings get an `<a id>` line.

use crate::emitter::{NodeRenderer, StandardRender};
use crate::error::EmitError;
use crate::nodes::{CustomNode, FrontMatter, Heading, Node, Section, WarningKind};
use crate::writer::IndentedWriter;
use apidoc_core::config::{FRONT_MATTER_DELIMITER, Profile, TextConfig};
use serde::Serialize;

pub struct ProfileRenderer<'a> {
    profile: Profile,
    text: &'a TextConfig,
}

impl<'a> ProfileRenderer<'a> {
    pub fn new(profile: Profile, text: &'a TextConfig) -> Self {
        Self { profile, text }
    }

    fn warning_box(&self, kind: &WarningKind) -> Node {
        let (message, details) = match kind {
            WarningKind::Deprecated(details) => (&self.text.deprecated, Some(details)),
            WarningKind::Unstable => (&self.text.unstable, None),
        };

        let mut content = Section::new();
        content.append_in_paragraph(vec![
            Node::bold(vec![Node::text("Warning:")]),
            Node::text(" "),
            Node::text(message.clone()),
        ]);
        if let Some(details) = details {
            content.append_section(details.clone());
        }
        Node::NoteBox(content)
    }

    /// Writes an HTML anchor above headings when the profile has no heading ids
    fn render_heading(
        &self,
        heading: &Heading,
        writer: &mut IndentedWriter,
        standard: &mut dyn StandardRender,
    ) -> Result<bool, EmitError> {
        let Some(anchor) = &heading.anchor else {
            return Ok(false);
        };
        if self.profile.heading_ids() {
            return Ok(false);
        }

        writer.ensure_skipped_line();
        writer.write_line(&format!("<a id=\"{}\"></a>", anchor));
        let plain = Heading::new(heading.level, heading.title.clone());
        standard.render_standard(&Node::Heading(plain), writer)?;
        Ok(true)
    }
}

#[derive(Serialize)]
struct FrontMatterFields<'a> {
    title: &'a str,
    keywords: &'a [String],
    #[serde(rename = "type")]
    page_type: &'a str,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    draft: bool,
}

/// `+++`-delimited TOML block
pub fn front_matter_block(front_matter: &FrontMatter) -> Result<String, EmitError> {
    let fields = FrontMatterFields {
        title: &front_matter.title,
        keywords: &front_matter.keywords,
        page_type: &front_matter.page_type,
        draft: front_matter.draft,
    };
    let body = toml::to_string(&fields)?;
    Ok(format!(
        "{delim}\n{body}{delim}\n",
        delim = FRONT_MATTER_DELIMITER,
        body = body
    ))
}

impl NodeRenderer for ProfileRenderer<'_> {
    fn render_node(
        &self,
        node: &Node,
        writer: &mut IndentedWriter,
        standard: &mut dyn StandardRender,
    ) -> Result<bool, EmitError> {
        let custom = match node {
            Node::Custom(custom) => custom,
            Node::Heading(heading) => return self.render_heading(heading, writer, standard),
            _ => return Ok(false),
        };

        match custom {
            CustomNode::FrontMatter(front_matter) => {
                if !self.profile.front_matter() {
                    return Ok(false);
                }
                writer.ensure_new_line();
                writer.write(&front_matter_block(front_matter)?);
                writer.ensure_skipped_line();
            }
            CustomNode::PageTitle(title) => {
                standard.render(&Node::Heading(Heading::new(1, title.clone())), writer)?;
            }
            CustomNode::Warning(kind) => {
                standard.render(&self.warning_box(kind), writer)?;
            }
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::{EmitContext, MarkdownEmitter};
    use crate::naming::PathNamer;
    use crate::resolve::LinkResolver;
    use apidoc_core::Config;
    use apidoc_core::config::{Layout, LinkStyle};
    use apidoc_testkit::widgets_model;

    fn render(profile: Profile, node: Node) -> Result<String, EmitError> {
        let model = widgets_model();
        let config = Config::default();
        let resolver = LinkResolver::new(
            &model,
            PathNamer::new(&model, Layout::Nested),
            LinkStyle::HugoRelref,
        );
        let renderer = ProfileRenderer::new(profile, &config.text);
        let output = MarkdownEmitter::new(
            &renderer,
            EmitContext {
                page: model.root(),
                resolver: &resolver,
            },
        )
        .emit(&node)?;
        Ok(output.text)
    }

    fn front_matter(draft: bool) -> Node {
        Node::Custom(CustomNode::FrontMatter(FrontMatter {
            title: "Widget class".to_string(),
            keywords: vec!["documentation".to_string(), "sdk".to_string()],
            page_type: "docs".to_string(),
            draft,
        }))
    }

    #[test]
    fn test_hugo_front_matter() {
        let text = render(Profile::Hugo, front_matter(false)).unwrap();
        assert_eq!(
            text,
            "+++\ntitle = \"Widget class\"\nkeywords = [\"documentation\", \"sdk\"]\ntype = \"docs\"\n+++\n\n"
        );
    }

    #[test]
    fn test_draft_only_when_true() {
        let text = render(Profile::Hugo, front_matter(true)).unwrap();
        assert!(text.contains("draft = true\n"));
    }

    #[test]
    fn test_markdown_profile_rejects_front_matter() {
        let err = render(Profile::Markdown, front_matter(false)).unwrap_err();
        assert_eq!(err, EmitError::UnsupportedNode("front_matter"));
    }

    #[test]
    fn test_page_title_is_level_one_heading() {
        let text = render(
            Profile::Markdown,
            Node::Custom(CustomNode::PageTitle("Widget class".to_string())),
        )
        .unwrap();
        assert_eq!(text, "# Widget class\n\n");
    }

    fn anchored_heading() -> Node {
        Node::Heading(
            Heading::new(2, "render method").with_anchor(Some("render_1-method".to_string())),
        )
    }

    #[test]
    fn test_markdown_profile_anchors_headings_with_html() {
        let text = render(Profile::Markdown, anchored_heading()).unwrap();
        assert_eq!(text, "<a id=\"render_1-method\"></a>\n\n## render method\n\n");
    }

    #[test]
    fn test_hugo_profile_keeps_heading_ids() {
        let text = render(Profile::Hugo, anchored_heading()).unwrap();
        assert_eq!(text, "## render method {#render_1-method}\n\n");
    }

    #[test]
    fn test_deprecated_warning_carries_message() {
        let details = Section::from(vec![Node::Paragraph(vec![Node::text("Use Widget.")])]);
        let text = render(
            Profile::Hugo,
            Node::Custom(CustomNode::Warning(WarningKind::Deprecated(details))),
        )
        .unwrap();

        assert!(text.starts_with("> **Warning:** This API is deprecated"));
        assert!(text.contains(">\n> Use Widget.\n"));
    }

    #[test]
    fn test_unstable_warning() {
        let text = render(
            Profile::Hugo,
            Node::Custom(CustomNode::Warning(WarningKind::Unstable)),
        )
        .unwrap();
        assert!(text.starts_with("> **Warning:** This API is provided as a preview"));
    }
}
