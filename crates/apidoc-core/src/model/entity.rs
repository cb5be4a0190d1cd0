//! Declared entities of the API model (input schema)

use super::doc::{DocBlock, DocComment};
use serde::{Deserialize, Serialize};

/// Kind of a documented declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Model,
    Package,
    EntryPoint,
    Namespace,
    Class,
    Interface,
    Enum,
    EnumMember,
    Constructor,
    ConstructSignature,
    Method,
    MethodSignature,
    Function,
    Property,
    PropertySignature,
    TypeAlias,
    Variable,
}

impl EntityKind {
    /// Kinds that carry a parameter list (and therefore an overload index)
    pub fn has_parameters(self) -> bool {
        matches!(
            self,
            EntityKind::Constructor
                | EntityKind::ConstructSignature
                | EntityKind::Method
                | EntityKind::MethodSignature
                | EntityKind::Function
        )
    }

    /// Kinds that carry a release-maturity tag
    pub fn has_release_tag(self) -> bool {
        !matches!(
            self,
            EntityKind::Model | EntityKind::Package | EntityKind::EntryPoint
        )
    }

    /// Kinds rendered as a page of their own
    ///
    /// Everything else is rendered inside its parent's page (members) or
    /// contributes nothing (entry points).
    pub fn owns_page(self) -> bool {
        matches!(
            self,
            EntityKind::Model
                | EntityKind::Package
                | EntityKind::Namespace
                | EntityKind::Class
                | EntityKind::Interface
                | EntityKind::Enum
                | EntityKind::Function
                | EntityKind::TypeAlias
                | EntityKind::Variable
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Model => "model",
            EntityKind::Package => "package",
            EntityKind::EntryPoint => "entry_point",
            EntityKind::Namespace => "namespace",
            EntityKind::Class => "class",
            EntityKind::Interface => "interface",
            EntityKind::Enum => "enum",
            EntityKind::EnumMember => "enum_member",
            EntityKind::Constructor => "constructor",
            EntityKind::ConstructSignature => "construct_signature",
            EntityKind::Method => "method",
            EntityKind::MethodSignature => "method_signature",
            EntityKind::Function => "function",
            EntityKind::Property => "property",
            EntityKind::PropertySignature => "property_signature",
            EntityKind::TypeAlias => "type_alias",
            EntityKind::Variable => "variable",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Release maturity of a declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseTag {
    /// Declared without any release tag
    None,
    Internal,
    Alpha,
    Beta,
    #[default]
    Public,
}

impl ReleaseTag {
    /// Alpha, beta and untagged declarations are previews
    pub fn is_unstable(self) -> bool {
        matches!(self, ReleaseTag::None | ReleaseTag::Alpha | ReleaseTag::Beta)
    }
}

/// Parameter of a function-like declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,

    /// Type excerpt as written in the declaration
    #[serde(default, rename = "type")]
    pub type_text: String,

    /// `@param` documentation
    #[serde(default)]
    pub docs: Vec<DocBlock>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, type_text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_text: type_text.into(),
            docs: Vec::new(),
        }
    }
}

/// A declared entity as it appears in the input document
///
/// The tree is flattened into an [`ApiModel`](super::ApiModel) arena on load;
/// entities returned by the model have their `members` moved into the arena.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub kind: EntityKind,

    /// Display name (e.g. `@scope/widgets`, `Widget`, `render`)
    pub name: String,

    /// 1-based position among same-named siblings
    #[serde(default = "default_overload_index")]
    pub overload_index: u32,

    /// Declaration excerpt including modifiers
    #[serde(default)]
    pub signature: Option<String>,

    #[serde(default)]
    pub docs: Option<DocComment>,

    #[serde(default)]
    pub release: ReleaseTag,

    #[serde(default)]
    pub is_static: bool,

    #[serde(default)]
    pub is_event: bool,

    #[serde(default)]
    pub parameters: Vec<Parameter>,

    #[serde(default)]
    pub return_type: Option<String>,

    #[serde(default)]
    pub property_type: Option<String>,

    /// Enum member initializer
    #[serde(default)]
    pub initializer: Option<String>,

    #[serde(default)]
    pub members: Vec<Entity>,
}

fn default_overload_index() -> u32 {
    1
}

impl Entity {
    pub fn new(kind: EntityKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            overload_index: 1,
            signature: None,
            docs: None,
            release: ReleaseTag::default(),
            is_static: false,
            is_event: false,
            parameters: Vec::new(),
            return_type: None,
            property_type: None,
            initializer: None,
            members: Vec::new(),
        }
    }

    pub fn with_member(mut self, member: Entity) -> Self {
        self.members.push(member);
        self
    }

    pub fn with_overload_index(mut self, index: u32) -> Self {
        self.overload_index = index;
        self
    }

    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = Some(signature.into());
        self
    }

    pub fn with_docs(mut self, docs: DocComment) -> Self {
        self.docs = Some(docs);
        self
    }

    pub fn with_release(mut self, release: ReleaseTag) -> Self {
        self.release = release;
        self
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_return_type(mut self, return_type: impl Into<String>) -> Self {
        self.return_type = Some(return_type.into());
        self
    }

    pub fn with_property_type(mut self, property_type: impl Into<String>) -> Self {
        self.property_type = Some(property_type.into());
        self
    }

    pub fn with_initializer(mut self, initializer: impl Into<String>) -> Self {
        self.initializer = Some(initializer.into());
        self
    }

    pub fn static_member(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn event(mut self) -> Self {
        self.is_event = true;
        self
    }

    pub fn is_deprecated(&self) -> bool {
        self.docs.as_ref().is_some_and(DocComment::is_deprecated)
    }
}
