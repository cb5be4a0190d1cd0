//! Link resolution from symbolic references to page-relative hyperlinks

use crate::naming::{OutputAddress, PathNamer};
use crate::nodes::CodeDestination;
use apidoc_core::config::LinkStyle;
use apidoc_core::model::ReferenceError;
use apidoc_core::{ApiModel, EntityId};

/// A link destination ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLink {
    pub target: EntityId,
    /// Formatted per link style (plain path or Hugo `relref`)
    pub href: String,
    /// Synthesized display text; empty when the target has no usable name
    pub text: String,
}

pub struct LinkResolver<'a> {
    model: &'a ApiModel,
    namer: PathNamer<'a>,
    style: LinkStyle,
}

impl<'a> LinkResolver<'a> {
    pub fn new(model: &'a ApiModel, namer: PathNamer<'a>, style: LinkStyle) -> Self {
        Self {
            model,
            namer,
            style,
        }
    }

    pub fn model(&self) -> &'a ApiModel {
        self.model
    }

    pub fn namer(&self) -> &PathNamer<'a> {
        &self.namer
    }

    pub fn address_for(&self, id: EntityId) -> OutputAddress {
        self.namer.address_for(id)
    }

    /// Resolves `destination` as linked from the page of `context`
    pub fn resolve(
        &self,
        destination: &CodeDestination,
        context: EntityId,
    ) -> Result<ResolvedLink, ReferenceError> {
        let target = match destination {
            CodeDestination::Entity(id) => *id,
            CodeDestination::Reference(reference) => {
                self.model.resolve_declaration_reference(reference, context)?
            }
        };

        Ok(ResolvedLink {
            target,
            href: self.href(target, context),
            text: self.link_text(target),
        })
    }

    /// Hyperlink destination of `target` from the page of `context`
    pub fn href(&self, target: EntityId, context: EntityId) -> String {
        let from = self.namer.address_for(self.namer.page_of(context));
        let relative = self.namer.address_for(target).relative_to(&from);
        match self.style {
            LinkStyle::Relative => relative,
            LinkStyle::HugoRelref => format!("{{{{< relref \"{}\" >}}}}", relative),
        }
    }

    /// Dotted name within the package, or the display name for packages
    pub fn link_text(&self, target: EntityId) -> String {
        let scoped = self.model.scoped_name_within_package(target);
        if scoped.is_empty() {
            self.model.entity(target).name.clone()
        } else {
            scoped
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apidoc_core::DeclarationReference;
    use apidoc_core::config::Layout;
    use apidoc_testkit::{find_entity, widgets_model};

    fn reference(raw: &str) -> CodeDestination {
        CodeDestination::Reference(DeclarationReference::new(raw))
    }

    #[test]
    fn test_resolve_same_page_member() {
        let model = widgets_model();
        let resolver = LinkResolver::new(
            &model,
            PathNamer::new(&model, Layout::Flat),
            LinkStyle::Relative,
        );
        let widget = find_entity(&model, "Widget", 1);

        let link = resolver.resolve(&reference("Widget.render:2"), widget).unwrap();

        assert_eq!(link.href, "#render_1-method");
        assert_eq!(link.text, "Widget.render");
    }

    #[test]
    fn test_resolve_from_member_uses_its_page() {
        let model = widgets_model();
        let resolver = LinkResolver::new(
            &model,
            PathNamer::new(&model, Layout::Nested),
            LinkStyle::HugoRelref,
        );
        let render = find_entity(&model, "render", 2);

        let link = resolver.resolve(&reference("RenderOptions"), render).unwrap();

        assert_eq!(
            link.href,
            "{{< relref \"../renderoptions/_index.md\" >}}"
        );
        assert_eq!(link.text, "RenderOptions");
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let model = widgets_model();
        let resolver = LinkResolver::new(
            &model,
            PathNamer::new(&model, Layout::Nested),
            LinkStyle::Relative,
        );
        let clamp = find_entity(&model, "clamp", 1);

        let first = resolver.resolve(&reference("Widget"), clamp).unwrap();
        let second = resolver.resolve(&reference("Widget"), clamp).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.href, "../../widget/_index.md");
    }

    #[test]
    fn test_unknown_reference_is_an_error() {
        let model = widgets_model();
        let resolver = LinkResolver::new(
            &model,
            PathNamer::new(&model, Layout::Flat),
            LinkStyle::Relative,
        );
        let widget = find_entity(&model, "Widget", 1);

        let err = resolver.resolve(&reference("Gizmo"), widget).unwrap_err();
        assert!(matches!(err, ReferenceError::MemberNotFound { .. }));
    }

    #[test]
    fn test_package_link_text_is_display_name() {
        let model = widgets_model();
        let resolver = LinkResolver::new(
            &model,
            PathNamer::new(&model, Layout::Flat),
            LinkStyle::Relative,
        );
        let package = model.find_package("widgets").unwrap();
        assert_eq!(resolver.link_text(package), "@scope/widgets");
    }
}
