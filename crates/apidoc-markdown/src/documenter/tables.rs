//! Summary tables and their cells

use super::MarkdownDocumenter;
use super::convert::merge_first_paragraph;
use crate::error::NodeError;
use crate::nodes::{LinkTag, Node, Section, Table, TableRow};
use apidoc_core::{EntityId, EntityKind, ReleaseTag};

/// Appends `label` and `table`, or nothing when the table has no rows
pub(super) fn append_table(output: &mut Section, label: &str, table: Table) {
    if table.is_empty() {
        return;
    }
    output.append_in_paragraph(vec![Node::bold(vec![Node::text(label)])]);
    output.append(Node::Table(table));
}

impl MarkdownDocumenter<'_> {
    /// `name` for most kinds, `name(a, b)` for function-like ones
    pub fn concise_signature(&self, id: EntityId) -> String {
        let entity = self.model.entity(id);
        if entity.kind.has_parameters() {
            let params: Vec<&str> = entity.parameters.iter().map(|p| p.name.as_str()).collect();
            format!("{}({})", entity.name, params.join(", "))
        } else {
            entity.name.clone()
        }
    }

    pub(super) fn title_cell(&self, id: EntityId) -> Section {
        Section::from(vec![Node::Paragraph(vec![Node::LinkTag(LinkTag::to_entity(
            id,
            self.concise_signature(id),
        ))])])
    }

    /// Summary with a `(BETA)` marker for beta declarations
    pub(super) fn description_cell(&self, id: EntityId) -> Section {
        let entity = self.model.entity(id);
        let mut lead = Vec::new();

        if entity.kind.has_release_tag() && entity.release == ReleaseTag::Beta {
            lead.push(Node::bold_italic(vec![Node::text("(BETA)")]));
            lead.push(Node::text(" "));
        }

        let (inline, rest) = match &entity.docs {
            Some(docs) => merge_first_paragraph(&docs.summary),
            None => (Vec::new(), Section::new()),
        };
        lead.extend(inline);

        let mut section = Section::new();
        if !lead.is_empty() {
            section.append_in_paragraph(lead);
        }
        section.append_and_merge(rest);
        section
    }

    pub(super) fn modifiers_cell(&self, id: EntityId) -> Section {
        let mut section = Section::new();
        if self.model.entity(id).is_static {
            section.append_in_paragraph(vec![Node::code("static")]);
        }
        section
    }

    pub(super) fn property_type_cell(&self, id: EntityId) -> Section {
        let mut section = Section::new();
        if let Some(type_text) = &self.model.entity(id).property_type {
            section.append_in_paragraph(vec![Node::code(type_text.clone())]);
        }
        section
    }

    pub(super) fn append_model_table(&self, output: &mut Section, id: EntityId) -> Result<(), NodeError> {
        let mut packages = Table::new(["Package", "Description"]);
        for package in self.model.children(id) {
            packages.add_row(TableRow::new(vec![
                self.title_cell(*package),
                self.description_cell(*package),
            ]))?;
        }
        append_table(output, "Packages", packages);
        Ok(())
    }

    pub(super) fn append_package_or_namespace_tables(
        &self,
        output: &mut Section,
        id: EntityId,
    ) -> Result<(), NodeError> {
        let mut classes = Table::new(["Class", "Description"]);
        let mut enums = Table::new(["Enumeration", "Description"]);
        let mut functions = Table::new(["Function", "Description"]);
        let mut interfaces = Table::new(["Interface", "Description"]);
        let mut namespaces = Table::new(["Namespace", "Description"]);
        let mut variables = Table::new(["Variable", "Description"]);
        let mut type_aliases = Table::new(["Type Alias", "Description"]);

        for member in self.model.members(id) {
            let table = match self.model.entity(*member).kind {
                EntityKind::Class => &mut classes,
                EntityKind::Enum => &mut enums,
                EntityKind::Function => &mut functions,
                EntityKind::Interface => &mut interfaces,
                EntityKind::Namespace => &mut namespaces,
                EntityKind::Variable => &mut variables,
                EntityKind::TypeAlias => &mut type_aliases,
                _ => continue,
            };
            table.add_row(TableRow::new(vec![
                self.title_cell(*member),
                self.description_cell(*member),
            ]))?;
        }

        append_table(output, "Classes", classes);
        append_table(output, "Enumerations", enums);
        append_table(output, "Functions", functions);
        append_table(output, "Interfaces", interfaces);
        append_table(output, "Namespaces", namespaces);
        append_table(output, "Variables", variables);
        append_table(output, "Type Aliases", type_aliases);
        Ok(())
    }

    /// Member tables of classes and interfaces, followed by the member sections
    ///
    /// Interfaces have no modifiers column.
    pub(super) fn append_member_tables(
        &self,
        output: &mut Section,
        id: EntityId,
        with_modifiers: bool,
    ) -> Result<(), NodeError> {
        let headers = |first: &str, typed: bool| {
            let mut headers = vec![first.to_string()];
            if with_modifiers {
                headers.push("Modifiers".to_string());
            }
            if typed {
                headers.push("Type".to_string());
            }
            headers.push("Description".to_string());
            headers
        };

        let mut events = Table::new(headers("Property", true));
        let mut constructors = Table::new(headers("Constructor", false));
        let mut properties = Table::new(headers("Property", true));
        let mut methods = Table::new(headers("Method", false));

        let mut constructor_sections = Section::new();
        let mut property_sections = Section::new();
        let mut method_sections = Section::new();

        for member in self.model.members(id) {
            let member = *member;
            let entity = self.model.entity(member);

            let mut cells = vec![self.title_cell(member)];
            if with_modifiers {
                cells.push(self.modifiers_cell(member));
            }

            match entity.kind {
                EntityKind::Constructor | EntityKind::ConstructSignature => {
                    cells.push(self.description_cell(member));
                    constructors.add_row(TableRow::new(cells))?;
                    self.append_item_content(&mut constructor_sections, member)?;
                }
                EntityKind::Property | EntityKind::PropertySignature => {
                    cells.push(self.property_type_cell(member));
                    cells.push(self.description_cell(member));
                    if entity.is_event {
                        events.add_row(TableRow::new(cells))?;
                    } else {
                        properties.add_row(TableRow::new(cells))?;
                    }
                    self.append_item_content(&mut property_sections, member)?;
                }
                EntityKind::Method | EntityKind::MethodSignature => {
                    cells.push(self.description_cell(member));
                    methods.add_row(TableRow::new(cells))?;
                    self.append_item_content(&mut method_sections, member)?;
                }
                _ => {}
            }
        }

        append_table(output, "Events", events);
        append_table(output, "Constructors", constructors);
        append_table(output, "Properties", properties);
        append_table(output, "Methods", methods);

        output.append_and_merge(constructor_sections);
        output.append_and_merge(property_sections);
        output.append_and_merge(method_sections);
        Ok(())
    }

    pub(super) fn append_enum_table(&self, output: &mut Section, id: EntityId) -> Result<(), NodeError> {
        let mut members = Table::new(["Member", "Value", "Description"]);
        for member in self.model.members(id) {
            let entity = self.model.entity(*member);
            if entity.kind != EntityKind::EnumMember {
                continue;
            }

            let mut value = Section::new();
            if let Some(initializer) = &entity.initializer {
                value.append_in_paragraph(vec![Node::code(initializer.clone())]);
            }

            members.add_row(TableRow::new(vec![
                Section::from(vec![Node::Paragraph(vec![Node::text(entity.name.clone())])]),
                value,
                self.description_cell(*member),
            ]))?;
        }
        append_table(output, "Enumeration Members", members);
        Ok(())
    }

    /// Parameters, return type and `@returns` of a function-like declaration
    pub(super) fn append_parameter_tables(&self, output: &mut Section, id: EntityId) -> Result<(), NodeError> {
        let entity = self.model.entity(id);

        let mut parameters = Table::new(["Parameter", "Type", "Description"]);
        for parameter in &entity.parameters {
            parameters.add_row(TableRow::new(vec![
                Section::from(vec![Node::Paragraph(vec![Node::text(parameter.name.clone())])]),
                Section::from(vec![Node::Paragraph(vec![Node::code(parameter.type_text.clone())])]),
                super::convert::blocks_to_section(&parameter.docs),
            ]))?;
        }
        append_table(output, "Parameters", parameters);

        if matches!(
            entity.kind,
            EntityKind::Constructor | EntityKind::ConstructSignature
        ) {
            return Ok(());
        }

        output.append_in_paragraph(vec![Node::bold(vec![Node::text("Returns:")])]);
        let return_type = entity
            .return_type
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .unwrap_or("(not declared)");
        output.append_in_paragraph(vec![Node::code(return_type)]);

        if let Some(returns) = entity.docs.as_ref().and_then(|docs| docs.returns.as_ref()) {
            output.append_and_merge(super::convert::blocks_to_section(returns));
        }
        Ok(())
    }
}
