//! TOML description of a C# file.
//!
//! ```toml
//! namespace = "Acme.Models"
//! imports = ["System"]
//!
//! [options]
//! namespace-style = "file-scoped"
//!
//! [[classes]]
//! name = "Widget"
//! access = "public"
//!
//! [[classes.properties]]
//! name = "Name"
//! type = "string"
//! access = "public"
//! ```

use std::path::Path;

use csforge_csharp::{
    Accessibility, BodyWriter, ClassBuilder, CodeBuilder, CodeBuilderOptions, GenericParameter,
    Parameter, Parameterized, RecordStyle, TypeKind,
};
use csforge_writer::IndentStyle;
use log::debug;
use serde::Deserialize;

use crate::error::{Error, Result};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Manifest {
    /// Omit for the global namespace.
    pub namespace: Option<String>,
    #[serde(default)]
    pub imports: Vec<String>,
    #[serde(default)]
    pub assembly_attributes: Vec<String>,
    #[serde(default)]
    pub disabled_warnings: Vec<String>,
    #[serde(default)]
    pub options: CodeBuilderOptions,
    #[serde(default)]
    pub classes: Vec<ClassManifest>,
    #[serde(default)]
    pub enums: Vec<EnumManifest>,
    #[serde(default)]
    pub records: Vec<RecordManifest>,
    #[serde(default)]
    pub delegates: Vec<DelegateManifest>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct GenericManifest {
    pub name: String,
    #[serde(default)]
    pub constraints: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ParameterManifest {
    #[serde(rename = "type")]
    pub ty: String,
    pub name: Option<String>,
    pub default: Option<String>,
    pub doc: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ClassManifest {
    pub name: String,
    #[serde(default)]
    pub kind: TypeKind,
    pub access: Option<Accessibility>,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default)]
    pub sealed: bool,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    pub partial: Option<bool>,
    pub base: Option<String>,
    #[serde(default)]
    pub interfaces: Vec<String>,
    #[serde(default)]
    pub attributes: Vec<String>,
    pub summary: Option<String>,
    #[serde(default)]
    pub generics: Vec<GenericManifest>,
    pub sort_properties: Option<bool>,
    #[serde(default)]
    pub properties: Vec<PropertyManifest>,
    #[serde(default)]
    pub fields: Vec<FieldManifest>,
    #[serde(default)]
    pub methods: Vec<MethodManifest>,
    #[serde(default)]
    pub constructors: Vec<ConstructorManifest>,
    #[serde(default)]
    pub events: Vec<EventManifest>,
    #[serde(default)]
    pub classes: Vec<ClassManifest>,
}

/// Accessor shape of an auto property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Accessors {
    #[default]
    GetSet,
    PrivateSet,
    Get,
    Init,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PropertyManifest {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub access: Option<Accessibility>,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default)]
    pub accessors: Accessors,
    /// Getter expression, replacing the auto accessors.
    pub getter: Option<String>,
    /// Setter expression, replacing the auto accessors.
    pub setter: Option<String>,
    pub summary: Option<String>,
    #[serde(default)]
    pub attributes: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FieldManifest {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub access: Option<Accessibility>,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default, rename = "const")]
    pub is_const: bool,
    #[serde(default)]
    pub readonly: bool,
    pub value: Option<String>,
    pub summary: Option<String>,
    #[serde(default)]
    pub attributes: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct MethodManifest {
    pub name: String,
    pub returns: Option<String>,
    pub access: Option<Accessibility>,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default, rename = "async")]
    pub is_async: bool,
    #[serde(default, rename = "virtual")]
    pub is_virtual: bool,
    #[serde(default, rename = "override")]
    pub is_override: bool,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    #[serde(default)]
    pub generics: Vec<GenericManifest>,
    #[serde(default)]
    pub parameters: Vec<ParameterManifest>,
    #[serde(default)]
    pub body: Vec<String>,
    pub summary: Option<String>,
    #[serde(default)]
    pub inherit_doc: bool,
    #[serde(default)]
    pub attributes: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ConstructorManifest {
    pub access: Option<Accessibility>,
    #[serde(default)]
    pub parameters: Vec<ParameterManifest>,
    /// Parameters forwarded to `base(...)`.
    pub base: Option<Vec<ParameterManifest>>,
    /// Parameters forwarded to `this(...)`.
    pub this: Option<Vec<ParameterManifest>>,
    #[serde(default)]
    pub body: Vec<String>,
    pub summary: Option<String>,
    #[serde(default)]
    pub attributes: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct EventManifest {
    pub name: String,
    pub handler: Option<String>,
    pub access: Option<Accessibility>,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    pub summary: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct EnumManifest {
    pub name: String,
    pub access: Option<Accessibility>,
    #[serde(default)]
    pub flags: bool,
    pub underlying: Option<String>,
    pub summary: Option<String>,
    #[serde(default)]
    pub attributes: Vec<String>,
    #[serde(default)]
    pub values: Vec<EnumValueManifest>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct EnumValueManifest {
    pub name: String,
    pub value: Option<i64>,
    pub summary: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RecordManifest {
    pub name: String,
    pub access: Option<Accessibility>,
    #[serde(default)]
    pub style: RecordStyle,
    #[serde(default)]
    pub properties: Vec<ParameterManifest>,
    pub summary: Option<String>,
    #[serde(default)]
    pub attributes: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct DelegateManifest {
    pub name: String,
    pub access: Option<Accessibility>,
    pub returns: Option<String>,
    #[serde(default)]
    pub generics: Vec<GenericManifest>,
    #[serde(default)]
    pub parameters: Vec<ParameterManifest>,
    pub summary: Option<String>,
}

impl Manifest {
    /// Read and parse a manifest file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let manifest = Self::from_str_with_filename(&content, &path.display().to_string())?;
        debug!("loaded manifest {}", path.display());
        Ok(manifest)
    }

    /// Parse a manifest. `filename` is only used to label diagnostics.
    pub fn from_str_with_filename(src: &str, filename: &str) -> Result<Self> {
        toml::from_str(src).map_err(|e| Error::parse(e, src, filename))
    }

    /// Number of top-level types.
    pub fn type_count(&self) -> usize {
        self.classes.len() + self.enums.len() + self.records.len() + self.delegates.len()
    }

    /// Build the file described by the manifest.
    ///
    /// `indent` overrides the indentation from `[options]`.
    pub fn to_builder(&self, indent: Option<IndentStyle>) -> Result<CodeBuilder> {
        let mut options = self.options.clone();
        if let Some(indent) = indent {
            options.indent = indent;
        }

        let mut builder =
            CodeBuilder::new(self.namespace.as_deref().unwrap_or_default()).with_options(options);
        builder.add_namespace_imports(self.imports.iter().map(String::as_str));
        for attribute in &self.assembly_attributes {
            builder.add_assembly_attribute(attribute);
        }
        for code in &self.disabled_warnings {
            builder.disable_warning(code);
        }

        for class in &self.classes {
            apply_class(builder.add_class(&class.name), class)?;
        }
        for manifest in &self.enums {
            let target = builder.add_enum(&manifest.name);
            if let Some(access) = manifest.access {
                target.with_access(access);
            }
            if manifest.flags {
                target.flags();
            }
            if let Some(underlying) = &manifest.underlying {
                target.with_underlying_type(underlying);
            }
            if let Some(summary) = &manifest.summary {
                target.with_summary(summary);
            }
            for attribute in &manifest.attributes {
                target.add_attribute(attribute);
            }
            for value in &manifest.values {
                let entry = target.add_value(&value.name);
                if let Some(number) = value.value {
                    entry.with_value(number);
                }
                if let Some(summary) = &value.summary {
                    entry.with_summary(summary);
                }
            }
        }
        for manifest in &self.records {
            let record = builder.add_record(&manifest.name);
            record.with_style(manifest.style);
            if let Some(access) = manifest.access {
                record.with_access(access);
            }
            if let Some(summary) = &manifest.summary {
                record.with_summary(summary);
            }
            for attribute in &manifest.attributes {
                record.add_attribute(attribute);
            }
            for property in &manifest.properties {
                let name = property.name.as_deref().ok_or_else(|| {
                    Error::invalid_member(&manifest.name, "record property needs a name")
                })?;
                let entry = record.add_property(&property.ty, name);
                if let Some(default) = &property.default {
                    entry.with_default_value(default);
                }
            }
        }
        for manifest in &self.delegates {
            let delegate = builder.add_delegate(&manifest.name);
            if let Some(access) = manifest.access {
                delegate.with_access(access);
            }
            if let Some(returns) = &manifest.returns {
                delegate.with_return_type(returns);
            }
            if let Some(summary) = &manifest.summary {
                delegate.with_summary(summary);
            }
            for generic in &manifest.generics {
                delegate
                    .add_generic_with(&generic.name, |p| constrain(p, generic))
                    .map_err(Error::builder)?;
            }
            add_parameters(delegate, &manifest.parameters);
            for parameter in &manifest.parameters {
                if let (Some(name), Some(doc)) = (&parameter.name, &parameter.doc) {
                    delegate
                        .with_parameter_doc(name, doc)
                        .map_err(Error::builder)?;
                }
            }
        }

        Ok(builder)
    }

    /// Render the file described by the manifest.
    pub fn render(&self, indent: Option<IndentStyle>) -> Result<String> {
        self.to_builder(indent)?.build().map_err(Error::builder)
    }
}

fn constrain(parameter: &mut GenericParameter, manifest: &GenericManifest) {
    for constraint in &manifest.constraints {
        parameter.constraint(constraint);
    }
}

fn add_parameters<P: Parameterized>(target: &mut P, parameters: &[ParameterManifest]) {
    for parameter in parameters {
        let mut built = Parameter::new(&parameter.ty, parameter.name.as_deref());
        if let Some(default) = &parameter.default {
            built = built.with_default(default);
        }
        target.insert_parameter(built, None);
    }
}

/// `(type, name)` pairs for constructor initializers.
fn forwarded(parameters: &[ParameterManifest]) -> Vec<(&str, &str)> {
    parameters
        .iter()
        .map(|p| (p.ty.as_str(), p.name.as_deref().unwrap_or_default()))
        .collect()
}

fn apply_class(class: &mut ClassBuilder, manifest: &ClassManifest) -> Result<()> {
    class.of_kind(manifest.kind);
    if let Some(access) = manifest.access {
        class.with_access(access);
    }
    if manifest.is_static {
        class.make_static();
    }
    if manifest.sealed {
        class.sealed();
    }
    if manifest.is_abstract {
        class.make_abstract();
    }
    if let Some(partial) = manifest.partial {
        class.set_partial(partial);
    }
    if let Some(base) = &manifest.base {
        class.set_base_class(base);
    }
    class.add_interfaces(&manifest.interfaces);
    for attribute in &manifest.attributes {
        class.add_attribute(attribute);
    }
    if let Some(summary) = &manifest.summary {
        class.with_summary(summary);
    }
    match manifest.sort_properties {
        Some(true) => {
            class.sort_properties_by_name();
        }
        Some(false) => {
            class.dont_sort_properties();
        }
        None => {}
    }
    for generic in &manifest.generics {
        class
            .add_generic_with(&generic.name, |p| constrain(p, generic))
            .map_err(Error::builder)?;
    }

    for field in &manifest.fields {
        if field.is_const && field.value.is_none() {
            return Err(Error::invalid_member(&field.name, "a const field needs a value"));
        }

        let builder = class.add_property(&field.name);
        builder.with_type(&field.ty);
        if let Some(access) = field.access {
            builder.with_access(access);
        }
        if field.is_static {
            builder.make_static();
        }
        match (&field.value, field.is_const, field.readonly) {
            (Some(value), true, _) => builder.with_const_value(value.as_str()),
            (Some(value), false, true) => builder.with_readonly_value(value.as_str()),
            (Some(value), false, false) => builder.with_value(value.as_str()),
            (None, _, true) => builder.make_readonly(),
            (None, _, false) => builder.make_field(),
        };
        if let Some(summary) = &field.summary {
            builder.with_summary(summary);
        }
        for attribute in &field.attributes {
            builder.add_attribute(attribute);
        }
    }

    for property in &manifest.properties {
        let builder = class.add_property(&property.name);
        builder.with_type(&property.ty);
        if let Some(access) = property.access {
            builder.with_access(access);
        }
        if property.is_static {
            builder.make_static();
        }
        if property.getter.is_none() && property.setter.is_none() {
            match property.accessors {
                Accessors::GetSet => builder.use_auto_props(),
                Accessors::PrivateSet => builder.use_auto_props_with_setter(Accessibility::Private),
                Accessors::Get => builder.use_get_only_auto_prop(),
                Accessors::Init => builder.use_init_auto_prop(),
            };
        }
        if let Some(getter) = &property.getter {
            builder.with_getter_expression(getter);
        }
        if let Some(setter) = &property.setter {
            builder.with_setter_expression(setter);
        }
        if let Some(summary) = &property.summary {
            builder.with_summary(summary);
        }
        for attribute in &property.attributes {
            builder.add_attribute(attribute);
        }
    }

    for method in &manifest.methods {
        let builder = class.add_method(&method.name);
        if let Some(returns) = &method.returns {
            builder.with_return_type(returns);
        }
        if let Some(access) = method.access {
            builder.with_access(access);
        }
        if method.is_static {
            builder.make_static();
        }
        if method.is_async {
            builder.make_async();
        }
        if method.is_virtual {
            builder.make_virtual();
        }
        if method.is_override {
            builder.make_override();
        }
        if method.is_abstract {
            builder.make_abstract();
        }
        for generic in &method.generics {
            builder
                .add_generic_with(&generic.name, |p| constrain(p, generic))
                .map_err(Error::builder)?;
        }
        add_parameters(builder, &method.parameters);
        if !method.body.is_empty() {
            builder.with_body_writer(BodyWriter::lines(method.body.iter().cloned()));
        }
        for attribute in &method.attributes {
            builder.add_attribute(attribute);
        }
        if method.inherit_doc {
            builder.with_inherit_doc();
        } else if let Some(summary) = &method.summary {
            builder.with_summary(summary);
        }
        for parameter in &method.parameters {
            if let (Some(name), Some(doc)) = (&parameter.name, &parameter.doc) {
                builder
                    .with_parameter_doc(name, doc)
                    .map_err(Error::builder)?;
            }
        }
    }

    for constructor in &manifest.constructors {
        let builder = class.add_constructor();
        if let Some(access) = constructor.access {
            builder.with_access(access);
        }
        add_parameters(builder, &constructor.parameters);
        match (&constructor.base, &constructor.this) {
            (Some(_), Some(_)) => {
                return Err(Error::invalid_member(
                    &manifest.name,
                    "a constructor calls either base or this, not both",
                ));
            }
            (Some(base), None) => {
                builder.with_base_call_parameters(forwarded(base));
            }
            (None, Some(this)) => {
                builder.with_this_call_parameters(forwarded(this));
            }
            (None, None) => {}
        }
        if !constructor.body.is_empty() {
            builder.with_body_writer(BodyWriter::lines(constructor.body.iter().cloned()));
        }
        if let Some(summary) = &constructor.summary {
            builder.with_summary(summary);
        }
        for attribute in &constructor.attributes {
            builder.add_attribute(attribute);
        }
    }

    for event in &manifest.events {
        let builder = class.add_event(&event.name);
        if let Some(handler) = &event.handler {
            builder.with_handler(handler);
        }
        if let Some(access) = event.access {
            builder.with_access(access);
        }
        if event.is_static {
            builder.make_static();
        }
        if let Some(summary) = &event.summary {
            builder.with_summary(summary);
        }
    }

    for nested in &manifest.classes {
        apply_class(class.add_nested_class(&nested.name), nested)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> Manifest {
        Manifest::from_str_with_filename(src, "csforge.toml").unwrap()
    }

    #[test]
    fn test_parse_minimal() {
        let manifest = parse("");
        assert!(manifest.namespace.is_none());
        assert_eq!(manifest.type_count(), 0);
        assert_eq!(manifest.render(None).unwrap(), "");
    }

    #[test]
    fn test_render_widget() {
        let manifest = parse(
            r#"
            namespace = "Sample"

            [[classes]]
            name = "Widget"
            access = "public"

            [[classes.properties]]
            name = "Name"
            type = "string"
            access = "public"
            "#,
        );

        assert_eq!(
            manifest.render(None).unwrap(),
            "namespace Sample\n{\n    public partial class Widget\n    {\n        public string Name { get; set; }\n    }\n}\n"
        );
    }

    #[test]
    fn test_indent_override() {
        let manifest = parse(
            r#"
            namespace = "Sample"

            [options]
            indent = "spaces"

            [[classes]]
            name = "Widget"
            "#,
        );

        assert_eq!(
            manifest.render(Some(IndentStyle::Tabs)).unwrap(),
            "namespace Sample\n{\n\tpartial class Widget\n\t{\n\t}\n}\n"
        );
    }

    #[test]
    fn test_render_members() {
        let manifest = parse(
            r#"
            imports = ["System"]
            disabled-warnings = ["CS1591"]

            [[classes]]
            name = "Counter"
            access = "public"
            partial = false
            base = "Acme.CounterBase"

            [[classes.fields]]
            name = "Step"
            type = "int"
            access = "public"
            const = true
            value = "1"

            [[classes.fields]]
            name = "_count"
            type = "int"
            access = "private"

            [[classes.constructors]]
            access = "public"
            base = [{ type = "string", name = "name" }]
            body = ["_count = 0;"]

            [[classes.properties]]
            name = "Count"
            type = "int"
            access = "public"
            getter = "_count"

            [[classes.methods]]
            name = "Increment"
            access = "public"
            body = ["_count += Step;"]

            [[classes.events]]
            name = "Changed"
            access = "public"
            "#,
        );

        let expected = "\
#pragma warning disable CS1591

using System;
using Acme;

public class Counter : Acme.CounterBase
{
    public event EventHandler Changed;

    public const int Step = 1;

    private int _count;

    public Counter(string name)
        : base(name)
    {
        _count = 0;
    }

    public int Count => _count;

    public void Increment()
    {
        _count += Step;
    }
}
";
        assert_eq!(manifest.render(None).unwrap(), expected);
    }

    #[test]
    fn test_render_other_types() {
        let manifest = parse(
            r#"
            [[enums]]
            name = "Color"
            access = "public"
            values = [{ name = "Green", value = 2 }, { name = "Red", value = 1 }]

            [[records]]
            name = "Point"
            access = "public"
            properties = [{ type = "int", name = "X" }, { type = "int", name = "Y", default = "0" }]

            [[delegates]]
            name = "Callback"
            access = "public"
            parameters = [{ type = "EventArgs" }]
            "#,
        );

        let expected = "\
public enum Color
{
    Red = 1,

    Green = 2
}

public record Point(int X, int Y = 0);

public delegate void Callback(EventArgs eventArgs);
";
        assert_eq!(manifest.render(None).unwrap(), expected);
    }

    #[test]
    fn test_nested_classes_and_generics() {
        let manifest = parse(
            r#"
            [[classes]]
            name = "Cache"
            generics = [{ name = "T", constraints = ["notnull"] }]

            [[classes.classes]]
            name = "Entry"
            kind = "struct"
            "#,
        );

        assert_eq!(
            manifest.render(None).unwrap(),
            "partial class Cache<T>\n    where T : notnull\n{\n    struct Entry\n    {\n    }\n}\n"
        );
    }

    #[test]
    fn test_parse_error_has_span() {
        let err = Manifest::from_str_with_filename("namespace = ", "csforge.toml").unwrap_err();
        match *err {
            Error::Parse { span, .. } => assert!(span.is_some()),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = Manifest::from_str_with_filename("colour = \"red\"", "csforge.toml").unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_const_without_value() {
        let manifest = parse(
            r#"
            [[classes]]
            name = "Limits"

            [[classes.fields]]
            name = "Max"
            type = "int"
            const = true
            "#,
        );

        let err = manifest.render(None).unwrap_err();
        assert!(matches!(*err, Error::InvalidMember { .. }));
    }

    #[test]
    fn test_duplicate_generic_reported() {
        let manifest = parse(
            r#"
            [[classes]]
            name = "Pair"
            generics = [{ name = "T" }, { name = "T" }]
            "#,
        );

        let err = manifest.render(None).unwrap_err();
        assert!(matches!(
            *err,
            Error::Builder(csforge_csharp::Error::DuplicateGenericParameter { .. })
        ));
    }

    #[test]
    fn test_missing_type_reported() {
        let manifest = parse(
            r#"
            [[classes]]
            name = "Widget"

            [[classes.properties]]
            name = "Name"
            type = " "
            "#,
        );

        let err = manifest.render(None).unwrap_err();
        assert!(matches!(
            *err,
            Error::Builder(csforge_csharp::Error::MissingRequiredField { .. })
        ));
    }
}
