//! Class-like containers and their member ordering.

use std::{fmt, rc::Rc};

use csforge_writer::{CodeWriter, Sections, Spacing};
use serde::{Deserialize, Serialize};

use crate::{
    Accessibility, Attributes, ConstructorBuilder, DelegateBuilder, Documentation, EventBuilder,
    FileContext, GenericParameter, Generics, MethodBuilder, Parameterized, PropertyBuilder,
    PropertyKind, Renderable, Result, accessibility::keyword,
    node::{declaration, render_node},
};

/// Declaration keyword of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TypeKind {
    #[default]
    Class,
    Struct,
    Interface,
    Record,
    RecordStruct,
}

impl TypeKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Struct => "struct",
            Self::Interface => "interface",
            Self::Record => "record",
            Self::RecordStruct => "record struct",
        }
    }
}

/// Order of fields and properties within their groups.
#[derive(Clone, Default)]
pub enum PropertyOrder {
    /// Alphabetical by name.
    #[default]
    ByName,
    /// The order they were added in.
    Insertion,
    /// Sorted by a caller-supplied key. Ties keep insertion order.
    Custom(Rc<dyn Fn(&PropertyBuilder) -> String>),
}

impl fmt::Debug for PropertyOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ByName => f.write_str("ByName"),
            Self::Insertion => f.write_str("Insertion"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Builder for a class, struct, interface or record with a body.
///
/// Members are written in a fixed group order: nested delegates, events,
/// constants, static constants, read-only fields, fields, constructors,
/// properties, methods, then nested classes. Non-empty groups are
/// separated by one blank line.
#[derive(Debug, Clone)]
pub struct ClassBuilder {
    name: String,
    parent: Option<String>,
    kind: TypeKind,
    access: Option<Accessibility>,
    is_static: bool,
    is_sealed: bool,
    is_abstract: bool,
    is_partial: bool,
    base_type: Option<String>,
    interfaces: Vec<String>,
    generics: Generics,
    attributes: Attributes,
    docs: Documentation,
    property_order: PropertyOrder,
    properties: Vec<PropertyBuilder>,
    methods: Vec<MethodBuilder>,
    constructors: Vec<ConstructorBuilder>,
    events: Vec<EventBuilder>,
    nested_delegates: Vec<DelegateBuilder>,
    nested_classes: Vec<ClassBuilder>,
    context: FileContext,
}

impl ClassBuilder {
    pub(crate) fn new(
        name: impl Into<String>,
        parent: Option<String>,
        partial: bool,
        property_order: PropertyOrder,
        context: FileContext,
    ) -> Self {
        Self {
            name: name.into().trim().to_string(),
            parent,
            kind: TypeKind::default(),
            access: None,
            is_static: false,
            is_sealed: false,
            is_abstract: false,
            is_partial: partial,
            base_type: None,
            interfaces: Vec::new(),
            generics: Generics::default(),
            attributes: Attributes::default(),
            docs: Documentation::default(),
            property_order,
            properties: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
            events: Vec::new(),
            nested_delegates: Vec::new(),
            nested_classes: Vec::new(),
            context,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Namespace- and outer-class-qualified name.
    pub fn full_name(&self) -> String {
        match &self.parent {
            Some(parent) => format!("{}.{}", parent, self.name),
            None => self.name.clone(),
        }
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn access(&self) -> Option<Accessibility> {
        self.access
    }

    pub fn base_type(&self) -> Option<&str> {
        self.base_type.as_deref()
    }

    pub fn properties(&self) -> &[PropertyBuilder] {
        &self.properties
    }

    pub fn methods(&self) -> &[MethodBuilder] {
        &self.methods
    }

    pub fn constructors(&self) -> &[ConstructorBuilder] {
        &self.constructors
    }

    pub fn events(&self) -> &[EventBuilder] {
        &self.events
    }

    pub fn nested_classes(&self) -> &[ClassBuilder] {
        &self.nested_classes
    }

    pub fn nested_delegates(&self) -> &[DelegateBuilder] {
        &self.nested_delegates
    }

    // =========================================================================
    // Declaration
    // =========================================================================

    pub fn of_kind(&mut self, kind: TypeKind) -> &mut Self {
        self.kind = kind;
        self
    }

    pub fn make_struct(&mut self) -> &mut Self {
        self.of_kind(TypeKind::Struct)
    }

    pub fn make_interface(&mut self) -> &mut Self {
        self.of_kind(TypeKind::Interface)
    }

    pub fn with_access(&mut self, access: Accessibility) -> &mut Self {
        self.access = Some(access);
        self
    }

    pub fn public(&mut self) -> &mut Self {
        self.with_access(Accessibility::Public)
    }

    pub fn internal(&mut self) -> &mut Self {
        self.with_access(Accessibility::Internal)
    }

    pub fn private(&mut self) -> &mut Self {
        self.with_access(Accessibility::Private)
    }

    pub fn make_static(&mut self) -> &mut Self {
        self.is_static = true;
        self
    }

    pub fn sealed(&mut self) -> &mut Self {
        self.is_sealed = true;
        self
    }

    pub fn make_abstract(&mut self) -> &mut Self {
        self.is_abstract = true;
        self
    }

    pub fn set_partial(&mut self, partial: bool) -> &mut Self {
        self.is_partial = partial;
        self
    }

    /// Set the base class. A dotted name also imports its namespace.
    pub fn set_base_class(&mut self, base: impl Into<String>) -> &mut Self {
        let base = base.into();
        self.context.add_import_for_type(&base);
        self.base_type = Some(base);
        self
    }

    /// Add an implemented interface. A dotted name also imports its namespace.
    pub fn add_interface(&mut self, interface: impl Into<String>) -> &mut Self {
        let interface = interface.into();
        self.context.add_import_for_type(&interface);
        self.interfaces.push(interface);
        self
    }

    pub fn add_interfaces<I, S>(&mut self, interfaces: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for interface in interfaces {
            self.add_interface(interface);
        }
        self
    }

    pub fn add_generic(&mut self, name: &str) -> Result<&mut Self> {
        self.add_generic_with(name, |_| {})
    }

    pub fn add_generic_with(
        &mut self,
        name: &str,
        configure: impl FnOnce(&mut GenericParameter),
    ) -> Result<&mut Self> {
        self.generics.add(&self.name, name, configure)?;
        Ok(self)
    }

    pub fn add_attribute(&mut self, attribute: &str) -> &mut Self {
        self.attributes.add(attribute);
        self
    }

    pub fn with_summary(&mut self, summary: impl Into<String>) -> &mut Self {
        self.docs.set_summary(summary);
        self
    }

    pub fn with_inherit_doc(&mut self) -> &mut Self {
        self.docs.set_inherit(None);
        self
    }

    pub fn with_inherit_doc_from(&mut self, cref: impl Into<String>) -> &mut Self {
        self.docs.set_inherit(Some(cref.into()));
        self
    }

    pub fn add_namespace_import(&mut self, namespace: &str) -> &mut Self {
        self.context.add_namespace_import(namespace);
        self
    }

    pub fn add_assembly_attribute(&mut self, attribute: &str) -> &mut Self {
        self.context.add_assembly_attribute(attribute);
        self
    }

    // =========================================================================
    // Ordering
    // =========================================================================

    pub fn sort_properties_by_name(&mut self) -> &mut Self {
        self.property_order = PropertyOrder::ByName;
        self
    }

    /// Keep fields and properties in the order they were added.
    pub fn dont_sort_properties(&mut self) -> &mut Self {
        self.property_order = PropertyOrder::Insertion;
        self
    }

    pub fn sort_properties_by(
        &mut self,
        key: impl Fn(&PropertyBuilder) -> String + 'static,
    ) -> &mut Self {
        self.property_order = PropertyOrder::Custom(Rc::new(key));
        self
    }

    // =========================================================================
    // Members
    // =========================================================================

    pub fn add_property(&mut self, name: &str) -> &mut PropertyBuilder {
        let index = self.properties.len();
        self.properties
            .push(PropertyBuilder::new(name, self.context.clone()));
        &mut self.properties[index]
    }

    /// Add a private `_camelCase` field backing the property `property`,
    /// with the property's type.
    ///
    /// Returns `None` when no property has that name.
    pub fn add_backing_field(&mut self, property: &str) -> Option<&mut PropertyBuilder> {
        let ty = self
            .properties
            .iter()
            .find(|p| p.name() == property)?
            .ty()
            .map(str::to_string);

        let mut chars = property.chars();
        let first = chars.next()?;
        let name = format!("_{}{}", first.to_lowercase(), chars.as_str());

        let field = self.add_property(&name);
        field.private().make_field();
        if let Some(ty) = ty {
            field.with_type(ty);
        }
        Some(field)
    }

    pub fn add_method(&mut self, name: &str) -> &mut MethodBuilder {
        let index = self.methods.len();
        self.methods
            .push(MethodBuilder::new(name, self.context.clone()));
        &mut self.methods[index]
    }

    pub fn add_constructor(&mut self) -> &mut ConstructorBuilder {
        let index = self.constructors.len();
        self.constructors
            .push(ConstructorBuilder::new(self.name.clone(), self.context.clone()));
        &mut self.constructors[index]
    }

    pub fn add_event(&mut self, name: &str) -> &mut EventBuilder {
        let index = self.events.len();
        self.events
            .push(EventBuilder::new(name, self.context.clone()));
        &mut self.events[index]
    }

    /// Add an event implemented explicitly for `interface`, backed by a
    /// private `_camelCase` event of the same handler type.
    pub fn add_explicit_event(
        &mut self,
        name: &str,
        interface: &str,
        handler: &str,
    ) -> &mut EventBuilder {
        let mut chars = name.trim().chars();
        let backing = match chars.next() {
            Some(first) => format!("_{}{}", first.to_lowercase(), chars.as_str()),
            None => "_event".to_string(),
        };

        self.add_event(&backing).private().with_handler(handler);
        self.add_event(name)
            .with_handler(handler)
            .with_explicit_implementation(interface)
            .with_backing_field(&backing)
    }

    /// Add a nested class. Nested classes are not partial unless set.
    pub fn add_nested_class(&mut self, name: &str) -> &mut ClassBuilder {
        let nested = ClassBuilder::new(
            name,
            Some(self.full_name()),
            false,
            self.property_order.clone(),
            self.context.clone(),
        );
        let index = self.nested_classes.len();
        self.nested_classes.push(nested);
        &mut self.nested_classes[index]
    }

    pub fn add_nested_delegate(&mut self, name: &str) -> &mut DelegateBuilder {
        let index = self.nested_delegates.len();
        self.nested_delegates
            .push(DelegateBuilder::new(name, self.context.clone()));
        &mut self.nested_delegates[index]
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Whether the declaration carries `abstract`, either set directly or
    /// implied by an abstract method.
    pub fn renders_abstract(&self) -> bool {
        self.is_abstract
            || (self.kind != TypeKind::Interface && self.methods.iter().any(|m| m.is_abstract()))
    }

    fn header(&self) -> String {
        let mut inherits: Vec<&str> = self
            .base_type
            .as_deref()
            .map(str::trim)
            .filter(|base| !base.is_empty())
            .into_iter()
            .collect();

        let mut interfaces: Vec<&str> = self
            .interfaces
            .iter()
            .map(|i| i.trim())
            .filter(|i| !i.is_empty())
            .collect();
        interfaces.sort();
        interfaces.dedup();
        inherits.extend(interfaces);

        let name = format!("{}{}", self.name, self.generics.suffix());
        let inheritance = if inherits.is_empty() {
            String::new()
        } else {
            format!(": {}", inherits.join(", "))
        };

        declaration([
            keyword(self.access),
            if self.is_static { "static" } else { "" },
            if self.is_sealed { "sealed" } else { "" },
            if self.renders_abstract() { "abstract" } else { "" },
            if self.is_partial { "partial" } else { "" },
            self.kind.keyword(),
            name.as_str(),
            inheritance.as_str(),
        ])
    }

    fn sorted_properties(&self) -> Vec<&PropertyBuilder> {
        let mut properties: Vec<&PropertyBuilder> = self.properties.iter().collect();
        match &self.property_order {
            PropertyOrder::ByName => properties.sort_by(|a, b| a.name().cmp(b.name())),
            PropertyOrder::Insertion => {}
            PropertyOrder::Custom(key) => properties.sort_by_key(|p| key(*p)),
        }
        properties
    }
}

/// Members of one kind, optionally restricted to static or instance ones.
fn group<'a>(
    properties: &'a [&'a PropertyBuilder],
    kind: PropertyKind,
    is_static: Option<bool>,
) -> impl Iterator<Item = &'a PropertyBuilder> {
    properties
        .iter()
        .copied()
        .filter(move |p| p.kind() == kind && is_static.is_none_or(|s| p.is_static() == s))
}

impl Renderable for ClassBuilder {
    fn render(&self, writer: &mut CodeWriter) -> Result<()> {
        self.docs.render(writer);
        self.attributes.render_sorted(writer);

        let properties = self.sorted_properties();

        let mut constructors: Vec<&ConstructorBuilder> = self.constructors.iter().collect();
        constructors.sort_by_key(|c| c.parameters().len());

        let mut methods: Vec<&MethodBuilder> = self.methods.iter().collect();
        methods.sort_by(|a, b| {
            a.name()
                .cmp(b.name())
                .then(a.parameters().len().cmp(&b.parameters().len()))
        });

        let mut block = writer.block_with(&self.header(), self.generics.where_clauses());
        Sections::new(&mut block)
            .section(&self.nested_delegates, Spacing::Spaced, render_node)?
            .section(&self.events, Spacing::Spaced, render_node)?
            .section(
                group(&properties, PropertyKind::Const, Some(false)),
                Spacing::Grouped,
                render_node,
            )?
            .section(
                group(&properties, PropertyKind::Const, Some(true)),
                Spacing::Grouped,
                render_node,
            )?
            .section(
                group(&properties, PropertyKind::ReadOnly, None),
                Spacing::Grouped,
                render_node,
            )?
            .section(
                group(&properties, PropertyKind::Field, None),
                Spacing::Grouped,
                render_node,
            )?
            .section(constructors, Spacing::Spaced, render_node)?
            .section(
                group(&properties, PropertyKind::Property, None),
                Spacing::Spaced,
                render_node,
            )?
            .section(methods, Spacing::Spaced, render_node)?
            .section(&self.nested_classes, Spacing::Spaced, render_node)?;
        Ok(())
    }
}
