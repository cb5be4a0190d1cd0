//! Page composition
//!
//! [`MarkdownDocumenter`] decides which entities own a page, assembles each
//! page as a node tree and emits it through the profile renderer.

mod appenders;
pub mod convert;
mod tables;

use crate::emitter::{EmitContext, MarkdownEmitter};
use crate::error::{GenerateError, NodeError, Result};
use crate::naming::{OutputAddress, PathNamer, member_anchor};
use crate::nodes::{CustomNode, FrontMatter, Heading, Node, Section};
use crate::renderer::ProfileRenderer;
use crate::resolve::LinkResolver;
use apidoc_core::{ApiModel, Config, EntityId, EntityKind};

/// Page text before line-ending normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub entity: EntityId,
    pub address: OutputAddress,
    pub text: String,
    pub warnings: Vec<String>,
}

pub struct MarkdownDocumenter<'a> {
    model: &'a ApiModel,
    config: &'a Config,
    resolver: LinkResolver<'a>,
}

impl<'a> MarkdownDocumenter<'a> {
    pub fn new(model: &'a ApiModel, config: &'a Config) -> Self {
        let namer = PathNamer::new(model, config.render.layout());
        let resolver = LinkResolver::new(model, namer, config.render.profile.link_style());
        Self {
            model,
            config,
            resolver,
        }
    }

    pub fn model(&self) -> &'a ApiModel {
        self.model
    }

    pub fn config(&self) -> &'a Config {
        self.config
    }

    pub fn address_for(&self, id: EntityId) -> OutputAddress {
        self.resolver.address_for(id)
    }

    /// Every page-owning entity, depth-first from the model root
    pub fn pages(&self) -> Vec<EntityId> {
        let mut pages = Vec::new();
        self.collect_pages(self.model.root(), &mut pages);
        pages
    }

    fn collect_pages(&self, id: EntityId, pages: &mut Vec<EntityId>) {
        pages.push(id);
        for member in self.model.members(id) {
            if self.model.entity(*member).kind.owns_page() {
                self.collect_pages(*member, pages);
            }
        }
    }

    /// `Widget class`, `Color enum`, ...
    pub fn page_title(&self, id: EntityId) -> String {
        let entity = self.model.entity(id);
        let noun = match entity.kind {
            EntityKind::Model => return self.config.front_matter.model_title.clone(),
            EntityKind::Class => "class",
            EntityKind::Enum => "enum",
            EntityKind::Interface => "interface",
            EntityKind::Function => "function",
            EntityKind::Namespace => "namespace",
            EntityKind::Package => "package",
            EntityKind::TypeAlias => "type",
            EntityKind::Variable => "variable",
            EntityKind::Constructor | EntityKind::ConstructSignature => {
                return self.concise_signature(id);
            }
            EntityKind::Method | EntityKind::MethodSignature => "method",
            EntityKind::Property | EntityKind::PropertySignature => "property",
            EntityKind::EnumMember => "member",
            EntityKind::EntryPoint => "entry point",
        };
        format!("{} {}", entity.name, noun)
    }

    /// Assembles the node tree of the page owned by `id`
    pub fn build_page(&self, id: EntityId) -> std::result::Result<Section, NodeError> {
        let mut page = Section::new();
        self.append_item_content(&mut page, id)?;
        Ok(page)
    }

    /// Page content for page owners, a member section for everything else
    fn append_item_content(&self, output: &mut Section, id: EntityId) -> std::result::Result<(), NodeError> {
        let entity = self.model.entity(id);
        let is_page = entity.kind.owns_page();
        let title = self.page_title(id);

        if is_page {
            if self.config.render.profile.front_matter() {
                output.append(Node::Custom(CustomNode::FrontMatter(FrontMatter {
                    title: title.clone(),
                    keywords: self.config.front_matter.keywords.clone(),
                    page_type: self.config.front_matter.page_type.clone(),
                    draft: self.config.render.draft,
                })));
            }
            output.append(Node::Custom(CustomNode::PageTitle(title)));
        } else {
            let anchor = member_anchor(entity.kind, &entity.name, entity.overload_index);
            output.append(Node::Heading(Heading::new(2, title).with_anchor(Some(anchor))));
        }

        self.append_warning(output, id);
        self.append_summary(output, id);
        self.append_signature(output, id);
        if is_page {
            self.append_import(output, id);
        }

        let sub_level = if is_page { 2 } else { 3 };
        let remarks_first = matches!(
            entity.kind,
            EntityKind::Class | EntityKind::Interface | EntityKind::Namespace | EntityKind::Package
        );
        if remarks_first {
            self.append_remarks(output, id, sub_level);
        }

        match entity.kind {
            EntityKind::Model => self.append_model_table(output, id)?,
            EntityKind::Package | EntityKind::Namespace => {
                self.append_package_or_namespace_tables(output, id)?
            }
            EntityKind::Class => self.append_member_tables(output, id, true)?,
            EntityKind::Interface => self.append_member_tables(output, id, false)?,
            EntityKind::Enum => self.append_enum_table(output, id)?,
            kind if kind.has_parameters() => {
                self.append_parameter_tables(output, id)?;
                self.append_throws(output, id, sub_level);
            }
            _ => {}
        }

        if !remarks_first {
            self.append_remarks(output, id, sub_level);
        }
        Ok(())
    }

    /// Builds and emits the page owned by `id`
    pub fn render_page(&self, id: EntityId) -> Result<RenderedPage> {
        let address = self.address_for(id);
        let page = Node::Section(self.build_page(id)?);

        let renderer = ProfileRenderer::new(self.config.render.profile, &self.config.text);
        let output = MarkdownEmitter::new(
            &renderer,
            EmitContext {
                page: id,
                resolver: &self.resolver,
            },
        )
        .emit(&page)
        .map_err(|source| GenerateError::Emit {
            page: address.page_path(),
            source,
        })?;

        Ok(RenderedPage {
            entity: id,
            address,
            text: output.text,
            warnings: output.warnings,
        })
    }
}
