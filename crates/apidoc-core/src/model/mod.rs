//! Read-only API entity graph
//!
//! The input document is a recursive [`Entity`] tree. [`ApiModel`] flattens it
//! into an arena so that renderers can hold copyable [`EntityId`] handles and
//! walk ancestor chains without borrowing the tree.

pub mod doc;
pub mod entity;
pub mod reference;

pub use doc::{CustomBlock, DocBlock, DocComment, DocInline, EXAMPLE_TAG, THROWS_TAG};
pub use entity::{Entity, EntityKind, Parameter, ReleaseTag};
pub use reference::{DeclarationReference, MemberSelector, ParsedReference, ReferenceError};

use crate::error::{ApidocError, Result};
use std::path::Path;

/// Handle of an entity inside an [`ApiModel`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(usize);

impl EntityId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug)]
struct Entry {
    entity: Entity,
    parent: Option<EntityId>,
    children: Vec<EntityId>,
}

/// Arena of all declared entities, rooted at a single `model` entity
#[derive(Debug)]
pub struct ApiModel {
    entries: Vec<Entry>,
}

impl ApiModel {
    /// Parses and validates a model from its JSON form
    pub fn from_json_str(json: &str) -> Result<Self> {
        let root: Entity = serde_json::from_str(json)?;
        Self::from_root(root)
    }

    /// Reads a model from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Builds a model from an entity tree
    ///
    /// # Errors
    ///
    /// - The root is not a `model` entity
    /// - A model member is not a package, or an entry point is not directly
    ///   below a package
    /// - A parameterized entity has overload index 0
    pub fn from_root(root: Entity) -> Result<Self> {
        if root.kind != EntityKind::Model {
            return Err(ApidocError::ModelInvalidRoot(root.kind.to_string()));
        }

        let mut model = Self {
            entries: Vec::new(),
        };
        model.insert(root, None)?;
        Ok(model)
    }

    fn insert(&mut self, mut entity: Entity, parent: Option<EntityId>) -> Result<EntityId> {
        if entity.overload_index == 0 {
            return Err(ApidocError::ModelInvalidOverload(entity.name));
        }

        let members = std::mem::take(&mut entity.members);
        for member in &members {
            check_membership(&entity, member)?;
        }

        let id = EntityId(self.entries.len());
        self.entries.push(Entry {
            entity,
            parent,
            children: Vec::with_capacity(members.len()),
        });

        for member in members {
            let child = self.insert(member, Some(id))?;
            self.entries[id.0].children.push(child);
        }

        Ok(id)
    }

    pub fn root(&self) -> EntityId {
        EntityId(0)
    }

    /// Entity behind a handle
    ///
    /// The returned entity has an empty `members` list; use [`children`](Self::children).
    pub fn entity(&self, id: EntityId) -> &Entity {
        &self.entries[id.0].entity
    }

    pub fn parent(&self, id: EntityId) -> Option<EntityId> {
        self.entries[id.0].parent
    }

    /// Direct children in declaration order
    pub fn children(&self, id: EntityId) -> &[EntityId] {
        &self.entries[id.0].children
    }

    /// Documented members of an entity
    ///
    /// Packages expose the members of their first entry point; every other
    /// kind exposes its direct children.
    pub fn members(&self, id: EntityId) -> &[EntityId] {
        if self.entity(id).kind == EntityKind::Package {
            return self
                .children(id)
                .iter()
                .find(|child| self.entity(**child).kind == EntityKind::EntryPoint)
                .map(|entry| self.children(*entry))
                .unwrap_or(&[]);
        }
        self.children(id)
    }

    /// Ancestor chain from the model root down to (and including) `id`
    pub fn hierarchy(&self, id: EntityId) -> Vec<EntityId> {
        let mut chain = vec![id];
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            chain.push(parent);
            current = parent;
        }
        chain.reverse();
        chain
    }

    /// Package that owns `id` (a package is its own package)
    pub fn associated_package(&self, id: EntityId) -> Option<EntityId> {
        self.hierarchy(id)
            .into_iter()
            .find(|ancestor| self.entity(*ancestor).kind == EntityKind::Package)
    }

    /// Dotted name below the package's entry point (e.g. `Widget.render`)
    ///
    /// Empty for the model, packages and entry points.
    pub fn scoped_name_within_package(&self, id: EntityId) -> String {
        self.hierarchy(id)
            .into_iter()
            .map(|ancestor| self.entity(ancestor))
            .filter(|entity| {
                !matches!(
                    entity.kind,
                    EntityKind::Model | EntityKind::Package | EntityKind::EntryPoint
                )
            })
            .map(|entity| entity.name.as_str())
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Finds a package by its full or unscoped name
    pub fn find_package(&self, name: &str) -> Option<EntityId> {
        self.children(self.root()).iter().copied().find(|id| {
            let package = &self.entity(*id).name;
            package == name || unscoped_name(package) == name
        })
    }

    /// Resolves a symbolic reference relative to `context`
    ///
    /// Unqualified references are looked up in the context entity's package.
    /// Without an overload selector the lowest overload index wins.
    pub fn resolve_declaration_reference(
        &self,
        reference: &DeclarationReference,
        context: EntityId,
    ) -> std::result::Result<EntityId, ReferenceError> {
        let parsed = reference.parse()?;

        let package = match &parsed.package {
            Some(name) => self
                .find_package(name)
                .ok_or_else(|| ReferenceError::PackageNotFound(name.clone()))?,
            None => self
                .associated_package(context)
                .ok_or(ReferenceError::NoContextPackage)?,
        };

        let mut current = package;
        for selector in &parsed.members {
            current = self.select_member(current, selector)?;
        }
        Ok(current)
    }

    fn select_member(
        &self,
        container: EntityId,
        selector: &MemberSelector,
    ) -> std::result::Result<EntityId, ReferenceError> {
        let candidates = self
            .members(container)
            .iter()
            .copied()
            .filter(|id| self.entity(*id).name == selector.name);

        let found = match selector.overload {
            Some(index) => {
                let mut candidates = candidates.peekable();
                if candidates.peek().is_none() {
                    None
                } else {
                    let matched = candidates.find(|id| self.entity(*id).overload_index == index);
                    if matched.is_none() {
                        return Err(ReferenceError::OverloadNotFound {
                            member: selector.name.clone(),
                            index,
                        });
                    }
                    matched
                }
            }
            None => candidates.min_by_key(|id| self.entity(*id).overload_index),
        };

        found.ok_or_else(|| ReferenceError::MemberNotFound {
            member: selector.name.clone(),
            container: self.entity(container).name.clone(),
        })
    }

    /// Every entity in depth-first declaration order
    pub fn iter(&self) -> impl Iterator<Item = EntityId> + '_ {
        (0..self.entries.len()).map(EntityId)
    }
}

/// Package name without its registry scope (`@scope/name` -> `name`)
pub fn unscoped_name(name: &str) -> &str {
    match name.strip_prefix('@') {
        Some(rest) => rest.split_once('/').map_or(name, |(_, unscoped)| unscoped),
        None => name,
    }
}

fn check_membership(parent: &Entity, child: &Entity) -> Result<()> {
    let allowed = match (parent.kind, child.kind) {
        (EntityKind::Model, kind) => kind == EntityKind::Package,
        (_, EntityKind::Package) | (_, EntityKind::Model) => false,
        (EntityKind::Package, _) => true,
        (_, EntityKind::EntryPoint) => false,
        _ => true,
    };

    if allowed {
        Ok(())
    } else {
        Err(ApidocError::ModelUnexpectedMember {
            parent: parent.name.clone(),
            parent_kind: parent.kind.to_string(),
            child: child.name.clone(),
            child_kind: child.kind.to_string(),
        })
    }
}
