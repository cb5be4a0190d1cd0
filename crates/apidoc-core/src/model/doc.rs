//! Structured documentation comments
//!
//! Comments arrive already parsed: a comment is a set of sections, each a
//! sequence of blocks made of inline content.

use serde::{Deserialize, Serialize};

/// Tag of `@example` custom blocks
pub const EXAMPLE_TAG: &str = "@example";

/// Tag of `@throws` custom blocks
pub const THROWS_TAG: &str = "@throws";

/// Parsed documentation comment of a declaration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DocComment {
    #[serde(default)]
    pub summary: Vec<DocBlock>,

    #[serde(default)]
    pub remarks: Option<Vec<DocBlock>>,

    /// Present when the declaration carries a `@deprecated` block
    #[serde(default)]
    pub deprecated: Option<Vec<DocBlock>>,

    #[serde(default)]
    pub returns: Option<Vec<DocBlock>>,

    #[serde(default)]
    pub custom_blocks: Vec<CustomBlock>,
}

impl DocComment {
    pub fn is_deprecated(&self) -> bool {
        self.deprecated.is_some()
    }

    /// Custom blocks whose tag matches `tag` (case-insensitive)
    pub fn blocks_tagged<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a CustomBlock> + 'a {
        self.custom_blocks
            .iter()
            .filter(move |block| block.tag.eq_ignore_ascii_case(tag))
    }
}

/// Tagged block such as `@example` or `@throws`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomBlock {
    pub tag: String,

    #[serde(default)]
    pub content: Vec<DocBlock>,
}

/// Block-level documentation content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DocBlock {
    Paragraph {
        #[serde(default)]
        content: Vec<DocInline>,
    },
    FencedCode {
        #[serde(default)]
        language: String,
        code: String,
    },
}

impl DocBlock {
    /// Paragraph holding a single run of text
    pub fn text(text: impl Into<String>) -> Self {
        DocBlock::Paragraph {
            content: vec![DocInline::Text { text: text.into() }],
        }
    }
}

/// Inline documentation content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DocInline {
    Text {
        text: String,
    },
    Code {
        code: String,
    },
    /// `{@link Reference | text}` pointing at another declaration
    Link {
        reference: String,
        #[serde(default)]
        text: Option<String>,
    },
    /// `{@link https://... | text}`
    Url {
        url: String,
        #[serde(default)]
        text: Option<String>,
    },
    Emphasis {
        #[serde(default)]
        bold: bool,
        #[serde(default)]
        italic: bool,
        #[serde(default)]
        content: Vec<DocInline>,
    },
    SoftBreak,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doc_comment_from_json() {
        let json = r#"{
            "summary": [
                {"kind": "paragraph", "content": [
                    {"kind": "text", "text": "Draws the "},
                    {"kind": "link", "reference": "Widget"},
                    {"kind": "soft_break"}
                ]}
            ],
            "deprecated": [],
            "custom_blocks": [
                {"tag": "@example", "content": [{"kind": "fenced_code", "language": "ts", "code": "w.render(1)"}]}
            ]
        }"#;

        let comment: DocComment = serde_json::from_str(json).expect("Should parse");

        assert!(comment.is_deprecated());
        assert_eq!(comment.summary.len(), 1);
        assert_eq!(comment.blocks_tagged(EXAMPLE_TAG).count(), 1);
        assert_eq!(comment.blocks_tagged(THROWS_TAG).count(), 0);
    }

    #[test]
    fn test_blocks_tagged_ignores_case() {
        let comment = DocComment {
            custom_blocks: vec![CustomBlock {
                tag: "@Throws".to_string(),
                content: vec![DocBlock::text("boom")],
            }],
            ..DocComment::default()
        };

        assert_eq!(comment.blocks_tagged(THROWS_TAG).count(), 1);
    }
}
