//! Doc comment sections shared by pages and member sections

use super::MarkdownDocumenter;
use super::convert::blocks_to_section;
use crate::nodes::{CustomNode, Heading, Node, Section, WarningKind};
use apidoc_core::EntityId;
use apidoc_core::model::{EXAMPLE_TAG, THROWS_TAG};

impl MarkdownDocumenter<'_> {
    /// Deprecation wins over release maturity
    pub(super) fn append_warning(&self, output: &mut Section, id: EntityId) {
        let entity = self.model.entity(id);

        if let Some(deprecated) = entity.docs.as_ref().and_then(|docs| docs.deprecated.as_ref()) {
            output.append(Node::Custom(CustomNode::Warning(WarningKind::Deprecated(
                blocks_to_section(deprecated),
            ))));
        } else if entity.kind.has_release_tag() && entity.release.is_unstable() {
            output.append(Node::Custom(CustomNode::Warning(WarningKind::Unstable)));
        }
    }

    pub(super) fn append_summary(&self, output: &mut Section, id: EntityId) {
        if let Some(docs) = &self.model.entity(id).docs {
            output.append_and_merge(blocks_to_section(&docs.summary));
        }
    }

    pub(super) fn append_signature(&self, output: &mut Section, id: EntityId) {
        let Some(signature) = &self.model.entity(id).signature else {
            return;
        };
        if signature.trim().is_empty() {
            return;
        }
        output.append_in_paragraph(vec![Node::bold(vec![Node::text("Signature")])]);
        output.append(Node::fenced(
            self.config.render.code_language.clone(),
            signature.clone(),
        ));
    }

    pub(super) fn append_import(&self, output: &mut Section, id: EntityId) {
        let Some(import) = self.import_snippet(id) else {
            return;
        };
        output.append_in_paragraph(vec![Node::bold(vec![Node::text("Import")])]);
        output.append(Node::fenced(self.config.render.code_language.clone(), import));
    }

    /// `import { A } from 'pkg';` followed by `const { B } = A;` per nested scope
    pub fn import_snippet(&self, id: EntityId) -> Option<String> {
        let package = self.model.associated_package(id)?;
        let scoped = self.model.scoped_name_within_package(id);
        if scoped.is_empty() {
            return None;
        }

        let names: Vec<String> = scoped.split('.').map(import_name).collect();
        let mut lines = vec![format!(
            "import {{ {} }} from '{}';",
            names[0],
            self.model.entity(package).name
        )];
        for pair in names.windows(2) {
            lines.push(format!("const {{ {} }} = {};", pair[1], pair[0]));
        }
        Some(lines.join("\n"))
    }

    /// `@remarks` and every `@example`
    pub(super) fn append_remarks(&self, output: &mut Section, id: EntityId, level: u8) {
        let Some(docs) = &self.model.entity(id).docs else {
            return;
        };

        if let Some(remarks) = &docs.remarks {
            output.append(Node::Heading(Heading::new(level, "Remarks")));
            output.append_and_merge(blocks_to_section(remarks));
        }

        let examples: Vec<_> = docs.blocks_tagged(EXAMPLE_TAG).collect();
        for (index, example) in examples.iter().enumerate() {
            let title = if examples.len() > 1 {
                format!("Example {}", index + 1)
            } else {
                "Example".to_string()
            };
            output.append(Node::Heading(Heading::new(level, title)));
            output.append_and_merge(blocks_to_section(&example.content));
        }
    }

    pub(super) fn append_throws(&self, output: &mut Section, id: EntityId, level: u8) {
        let Some(docs) = &self.model.entity(id).docs else {
            return;
        };

        let mut throws = docs.blocks_tagged(THROWS_TAG).peekable();
        if throws.peek().is_none() {
            return;
        }
        output.append(Node::Heading(Heading::new(level, "Exceptions")));
        for block in throws {
            output.append_and_merge(blocks_to_section(&block.content));
        }
    }
}

/// Identifier usable in an import statement
fn import_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use apidoc_core::Config;
    use apidoc_testkit::{find_entity, widgets_model};

    #[test]
    fn test_import_snippet_top_level() {
        let model = widgets_model();
        let config = Config::default();
        let documenter = MarkdownDocumenter::new(&model, &config);

        let widget = find_entity(&model, "Widget", 1);
        assert_eq!(
            documenter.import_snippet(widget).unwrap(),
            "import { Widget } from '@scope/widgets';"
        );
    }

    #[test]
    fn test_import_snippet_nested() {
        let model = widgets_model();
        let config = Config::default();
        let documenter = MarkdownDocumenter::new(&model, &config);

        let clamp = find_entity(&model, "clamp", 1);
        assert_eq!(
            documenter.import_snippet(clamp).unwrap(),
            "import { Utils } from '@scope/widgets';\nconst { clamp } = Utils;"
        );
    }

    #[test]
    fn test_no_import_for_package() {
        let model = widgets_model();
        let config = Config::default();
        let documenter = MarkdownDocumenter::new(&model, &config);

        let package = model.find_package("widgets").unwrap();
        assert!(documenter.import_snippet(package).is_none());
        assert!(documenter.import_snippet(model.root()).is_none());
    }
}
