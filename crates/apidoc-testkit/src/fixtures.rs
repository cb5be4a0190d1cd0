//! Fixture API models
//!
//! The `@scope/widgets` package covers every page kind: a beta class with
//! overloaded methods, a deprecated beta class, an interface, an enum, a
//! namespace and free functions whose docs link to known and unknown
//! declarations.

use apidoc_core::model::{
    CustomBlock, DocBlock, DocComment, DocInline, Entity, EntityKind, Parameter, ReleaseTag,
};
use apidoc_core::ApiModel;

/// Paragraph of plain text
pub fn text(text: &str) -> DocBlock {
    DocBlock::text(text)
}

/// Paragraph made of inline nodes
pub fn paragraph(content: Vec<DocInline>) -> DocBlock {
    DocBlock::Paragraph { content }
}

pub fn plain(text: &str) -> DocInline {
    DocInline::Text {
        text: text.to_string(),
    }
}

/// `{@link reference}` without display text
pub fn link(reference: &str) -> DocInline {
    DocInline::Link {
        reference: reference.to_string(),
        text: None,
    }
}

/// Doc comment holding only a summary paragraph
pub fn summary(content: &str) -> DocComment {
    DocComment {
        summary: vec![text(content)],
        ..DocComment::default()
    }
}

fn param(name: &str, type_text: &str, docs: &str) -> Parameter {
    let mut parameter = Parameter::new(name, type_text);
    parameter.docs = vec![text(docs)];
    parameter
}

/// The `Widget` class with its two `render` overloads
pub fn widget_class() -> Entity {
    let render_docs = DocComment {
        summary: vec![text("Renders the widget at the given size.")],
        returns: Some(vec![text("The rendered markup.")]),
        custom_blocks: vec![CustomBlock {
            tag: "@throws".to_string(),
            content: vec![paragraph(vec![
                plain("Throws "),
                link("WidgetError"),
                plain(" when size is negative."),
            ])],
        }],
        ..DocComment::default()
    };

    let class_docs = DocComment {
        summary: vec![text("A drawable widget.")],
        remarks: Some(vec![text("Widgets are immutable once rendered.")]),
        custom_blocks: vec![CustomBlock {
            tag: "@example".to_string(),
            content: vec![DocBlock::FencedCode {
                language: "ts".to_string(),
                code: "const w = new Widget();\nw.render(10);".to_string(),
            }],
        }],
        ..DocComment::default()
    };

    Entity::new(EntityKind::Class, "Widget")
        .with_signature("export declare class Widget")
        .with_release(ReleaseTag::Beta)
        .with_docs(class_docs)
        .with_member(
            Entity::new(EntityKind::Constructor, "constructor")
                .with_signature("constructor(name?: string);")
                .with_parameter(param("name", "string", "Optional display name."))
                .with_docs(summary("Creates a widget.")),
        )
        .with_member(
            Entity::new(EntityKind::Property, "changed")
                .with_signature("readonly changed: Event;")
                .with_property_type("Event")
                .event()
                .with_docs(summary("Raised after every render.")),
        )
        .with_member(
            Entity::new(EntityKind::Property, "count")
                .with_signature("static count: number;")
                .with_property_type("number")
                .static_member()
                .with_docs(summary("Number of widgets created.")),
        )
        .with_member(
            Entity::new(EntityKind::Method, "render")
                .with_signature("render(size: number): string;")
                .with_parameter(param("size", "number", "Edge length in pixels."))
                .with_return_type("string")
                .with_docs(render_docs),
        )
        .with_member(
            Entity::new(EntityKind::Method, "render")
                .with_overload_index(2)
                .with_signature("render(size: number, opts: RenderOptions): string;")
                .with_parameter(param("size", "number", "Edge length in pixels."))
                .with_parameter(param("opts", "RenderOptions", "Rendering options."))
                .with_return_type("string")
                .with_docs(DocComment {
                    summary: vec![paragraph(vec![
                        plain("Renders with "),
                        link("RenderOptions"),
                        plain("."),
                    ])],
                    ..DocComment::default()
                }),
        )
}

/// The `@scope/widgets` package with its entry point
pub fn widgets_package() -> Entity {
    let legacy = Entity::new(EntityKind::Class, "LegacyWidget")
        .with_signature("export declare class LegacyWidget")
        .with_release(ReleaseTag::Beta)
        .with_docs(DocComment {
            summary: vec![text("The old widget.")],
            deprecated: Some(vec![paragraph(vec![plain("Use "), link("Widget"), plain(" instead.")])]),
            ..DocComment::default()
        });

    let options = Entity::new(EntityKind::Interface, "RenderOptions")
        .with_signature("export interface RenderOptions")
        .with_docs(summary("Options accepted by render."))
        .with_member(
            Entity::new(EntityKind::PropertySignature, "scale")
                .with_signature("scale?: number;")
                .with_property_type("number")
                .with_docs(summary("Scale factor.")),
        );

    let color = Entity::new(EntityKind::Enum, "Color")
        .with_signature("export declare enum Color")
        .with_docs(summary("Widget colors."))
        .with_member(
            Entity::new(EntityKind::EnumMember, "Red")
                .with_initializer("\"red\"")
                .with_docs(summary("Warm.")),
        )
        .with_member(Entity::new(EntityKind::EnumMember, "Blue").with_initializer("\"blue\""));

    let create = Entity::new(EntityKind::Function, "createWidget")
        .with_signature("export declare function createWidget(size: number): Widget;")
        .with_parameter(param("size", "number", "Edge length."))
        .with_return_type("Widget")
        .with_docs(DocComment {
            summary: vec![paragraph(vec![
                plain("Creates a "),
                link("Widget"),
                plain(" or a "),
                link("Gizmo"),
                plain("."),
            ])],
            ..DocComment::default()
        });

    let utils = Entity::new(EntityKind::Namespace, "Utils")
        .with_signature("export declare namespace Utils")
        .with_docs(summary("Helper functions."))
        .with_member(
            Entity::new(EntityKind::Function, "clamp")
                .with_signature("function clamp(value: number): number;")
                .with_parameter(param("value", "number", "Input."))
                .with_return_type("number")
                .with_docs(summary("Clamps a size.")),
        );

    let entry_point = Entity::new(EntityKind::EntryPoint, "")
        .with_member(widget_class())
        .with_member(legacy)
        .with_member(options)
        .with_member(color)
        .with_member(create)
        .with_member(utils)
        .with_member(
            Entity::new(EntityKind::TypeAlias, "Size")
                .with_signature("export type Size = number;")
                .with_docs(summary("A size in pixels.")),
        )
        .with_member(
            Entity::new(EntityKind::Variable, "VERSION")
                .with_signature("VERSION: string")
                .with_property_type("string"),
        );

    Entity::new(EntityKind::Package, "@scope/widgets")
        .with_docs(summary("Widgets for every occasion."))
        .with_member(entry_point)
}

/// Model holding the `@scope/widgets` package
pub fn widgets_model() -> ApiModel {
    ApiModel::from_root(widgets_root()).expect("Fixture model should be valid")
}

/// Root entity of [`widgets_model`]
pub fn widgets_root() -> Entity {
    Entity::new(EntityKind::Model, "").with_member(widgets_package())
}

/// JSON form of [`widgets_model`], as read by the command line
pub fn widgets_model_json() -> String {
    serde_json::to_string_pretty(&widgets_root()).expect("Fixture model should serialize")
}

/// Finds the entity with `name` and `overload_index` in `model`
///
/// # Panics
///
/// Panics if no such entity exists.
pub fn find_entity(model: &ApiModel, name: &str, overload_index: u32) -> apidoc_core::EntityId {
    model
        .iter()
        .find(|id| {
            let entity = model.entity(*id);
            entity.name == name && entity.overload_index == overload_index
        })
        .unwrap_or_else(|| panic!("Fixture has no entity '{}' ({})", name, overload_index))
}
