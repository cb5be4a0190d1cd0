//! Doc comment content to document nodes

use crate::nodes::{Emphasis, LinkTag, Node, Section};
use apidoc_core::DeclarationReference;
use apidoc_core::model::{DocBlock, DocInline};

pub fn blocks_to_section(blocks: &[DocBlock]) -> Section {
    Section::from(blocks.iter().map(block_to_node).collect::<Vec<_>>())
}

pub fn block_to_node(block: &DocBlock) -> Node {
    match block {
        DocBlock::Paragraph { content } => Node::Paragraph(inlines_to_nodes(content)),
        DocBlock::FencedCode { language, code } => Node::fenced(language.clone(), code.clone()),
    }
}

pub fn inlines_to_nodes(inlines: &[DocInline]) -> Vec<Node> {
    inlines.iter().map(inline_to_node).collect()
}

fn inline_to_node(inline: &DocInline) -> Node {
    match inline {
        DocInline::Text { text } => Node::text(text.clone()),
        DocInline::Code { code } => Node::code(code.clone()),
        DocInline::Link { reference, text } => Node::LinkTag(LinkTag::to_reference(
            DeclarationReference::new(reference.clone()),
            text.clone(),
        )),
        DocInline::Url { url, text } => Node::LinkTag(LinkTag::to_url(url.clone(), text.clone())),
        DocInline::Emphasis {
            bold,
            italic,
            content,
        } => Node::Emphasis(Emphasis {
            bold: *bold,
            italic: *italic,
            children: inlines_to_nodes(content),
        }),
        DocInline::SoftBreak => Node::SoftBreak,
    }
}

/// Splits off the inline content of a leading paragraph
///
/// Table cells show the first summary paragraph inline after any prefix, with
/// the remaining blocks following it.
pub fn merge_first_paragraph(blocks: &[DocBlock]) -> (Vec<Node>, Section) {
    match blocks.split_first() {
        Some((DocBlock::Paragraph { content }, rest)) => {
            (inlines_to_nodes(content), blocks_to_section(rest))
        }
        _ => (Vec::new(), blocks_to_section(blocks)),
    }
}
