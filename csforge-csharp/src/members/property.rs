//! Fields and properties.

use csforge_writer::CodeWriter;

use crate::{
    Accessibility, Accessor, Attributes, BodyWriter, Documentation, Error, FileContext,
    Renderable, Result,
    accessibility::keyword,
    node::{declaration, write_warning},
};

/// What a [`PropertyBuilder`] declares. Also decides its render group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PropertyKind {
    #[default]
    Property,
    Const,
    ReadOnly,
    Field,
}

/// Initial value of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    Literal(String),
    Null,
    Default,
}

impl PropertyValue {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Literal(value) => value,
            Self::Null => "null",
            Self::Default => "default",
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Literal(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::Literal(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AutoProperty {
    GetSet(Option<Accessibility>),
    GetOnly,
    Init,
}

/// Builder for a field or property of a class.
#[derive(Debug, Clone)]
pub struct PropertyBuilder {
    name: String,
    ty: Option<String>,
    kind: PropertyKind,
    access: Option<Accessibility>,
    is_static: bool,
    is_virtual: bool,
    is_override: bool,
    value: Option<PropertyValue>,
    auto: Option<AutoProperty>,
    getter: Option<Accessor>,
    setter: Option<Accessor>,
    warning: Option<String>,
    attributes: Attributes,
    docs: Documentation,
    context: FileContext,
}

impl PropertyBuilder {
    pub(crate) fn new(name: impl Into<String>, context: FileContext) -> Self {
        Self {
            name: name.into().trim().to_string(),
            ty: None,
            kind: PropertyKind::default(),
            access: None,
            is_static: false,
            is_virtual: false,
            is_override: false,
            value: None,
            auto: None,
            getter: None,
            setter: None,
            warning: None,
            attributes: Attributes::default(),
            docs: Documentation::default(),
            context,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> Option<&str> {
        self.ty.as_deref()
    }

    pub fn kind(&self) -> PropertyKind {
        self.kind
    }

    pub fn access(&self) -> Option<Accessibility> {
        self.access
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn with_type(&mut self, ty: impl Into<String>) -> &mut Self {
        self.ty = Some(ty.into());
        self
    }

    pub fn with_access(&mut self, access: Accessibility) -> &mut Self {
        self.access = Some(access);
        self
    }

    pub fn public(&mut self) -> &mut Self {
        self.with_access(Accessibility::Public)
    }

    pub fn private(&mut self) -> &mut Self {
        self.with_access(Accessibility::Private)
    }

    pub fn protected(&mut self) -> &mut Self {
        self.with_access(Accessibility::Protected)
    }

    pub fn internal(&mut self) -> &mut Self {
        self.with_access(Accessibility::Internal)
    }

    pub fn make_static(&mut self) -> &mut Self {
        self.is_static = true;
        self
    }

    /// `virtual` takes precedence over `override` when both are set.
    pub fn make_virtual(&mut self) -> &mut Self {
        self.is_virtual = true;
        self
    }

    pub fn make_override(&mut self) -> &mut Self {
        self.is_override = true;
        self
    }

    /// Declare a `const` with the given value.
    pub fn with_const_value(&mut self, value: impl Into<PropertyValue>) -> &mut Self {
        self.kind = PropertyKind::Const;
        self.value = Some(value.into());
        self
    }

    /// Declare a `readonly` field without an initializer.
    pub fn make_readonly(&mut self) -> &mut Self {
        self.kind = PropertyKind::ReadOnly;
        self.value = None;
        self
    }

    pub fn with_readonly_value(&mut self, value: impl Into<PropertyValue>) -> &mut Self {
        self.kind = PropertyKind::ReadOnly;
        self.value = Some(value.into());
        self
    }

    /// Declare a mutable field without an initializer.
    pub fn make_field(&mut self) -> &mut Self {
        self.kind = PropertyKind::Field;
        self.value = None;
        self
    }

    /// Declare a mutable field with an initializer.
    pub fn with_value(&mut self, value: impl Into<PropertyValue>) -> &mut Self {
        self.kind = PropertyKind::Field;
        self.value = Some(value.into());
        self
    }

    /// `{ get; set; }`
    pub fn use_auto_props(&mut self) -> &mut Self {
        self.auto = Some(AutoProperty::GetSet(None));
        self
    }

    /// `{ get; private set; }` and friends.
    pub fn use_auto_props_with_setter(&mut self, setter: Accessibility) -> &mut Self {
        self.auto = Some(AutoProperty::GetSet(Some(setter)));
        self
    }

    /// `{ get; }`
    pub fn use_get_only_auto_prop(&mut self) -> &mut Self {
        self.auto = Some(AutoProperty::GetOnly);
        self
    }

    /// `{ get; init; }`
    pub fn use_init_auto_prop(&mut self) -> &mut Self {
        self.auto = Some(AutoProperty::Init);
        self
    }

    pub fn with_getter_expression(&mut self, expression: impl Into<String>) -> &mut Self {
        self.kind = PropertyKind::Property;
        self.getter = Some(Accessor::Expression(expression.into()));
        self
    }

    pub fn with_getter(&mut self, body: impl Fn(&mut CodeWriter) + 'static) -> &mut Self {
        self.kind = PropertyKind::Property;
        self.getter = Some(Accessor::Body(BodyWriter::new(body)));
        self
    }

    pub fn with_setter_expression(&mut self, expression: impl Into<String>) -> &mut Self {
        self.kind = PropertyKind::Property;
        self.setter = Some(Accessor::Expression(expression.into()));
        self
    }

    pub fn with_setter(&mut self, body: impl Fn(&mut CodeWriter) + 'static) -> &mut Self {
        self.kind = PropertyKind::Property;
        self.setter = Some(Accessor::Body(BodyWriter::new(body)));
        self
    }

    /// Emit `#warning <text>` above the declaration.
    pub fn with_warning(&mut self, warning: impl Into<String>) -> &mut Self {
        self.warning = Some(warning.into());
        self
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

    fn modifiers(&self) -> [&'static str; 3] {
        let is_new = if self.name == "Equals" { "new" } else { "" };
        let is_static = if self.is_static { "static" } else { "" };
        let inheritance = if self.is_virtual {
            "virtual"
        } else if self.is_override {
            "override"
        } else {
            ""
        };

        match self.kind {
            PropertyKind::Const => [is_new, "const", ""],
            PropertyKind::ReadOnly => [is_new, is_static, "readonly"],
            PropertyKind::Field => [is_new, is_static, ""],
            PropertyKind::Property => [is_new, is_static, inheritance],
        }
    }

    fn render_field(&self, writer: &mut CodeWriter, output: &str) -> Result<()> {
        let value = match (&self.value, self.kind) {
            (Some(value), _) => value.as_str(),
            (None, PropertyKind::Const) => return Err(Error::missing_field(&self.name, "value")),
            (None, _) => {
                writer.append_line(&format!("{};", output));
                return Ok(());
            }
        };

        let lines: Vec<&str> = value.lines().collect();
        match lines.split_last() {
            Some((last, init)) if !init.is_empty() => {
                writer.append_line(&format!("{} =", output));
                writer.increase_indent();
                for line in init {
                    writer.append_line(line);
                }
                writer.append_line(&format!("{};", last));
                writer.decrease_indent();
            }
            _ => {
                writer.append_line(&format!("{} = {};", output, value.trim()));
            }
        }
        Ok(())
    }

    fn render_property(&self, writer: &mut CodeWriter, output: &str) {
        if let Some(auto) = self.auto {
            let accessors = match auto {
                AutoProperty::GetOnly => "{ get; }".to_string(),
                AutoProperty::Init => "{ get; init; }".to_string(),
                AutoProperty::GetSet(setter) => {
                    format!("{{ get; {}; }}", declaration([keyword(setter), "set"]))
                }
            };
            writer.append_line(&format!("{} {}", output, accessors));
            return;
        }

        match (&self.getter, &self.setter) {
            (Some(Accessor::Expression(expression)), None) => {
                writer.append_line(&format!("{} => {};", output, expression));
            }
            (None, None) => {
                writer.append_line(&format!("{};", output));
            }
            (getter, setter) => {
                let mut block = writer.block(output);
                if let Some(getter) = getter {
                    getter.render("get", &mut block);
                }
                if let Some(setter) = setter {
                    setter.render("set", &mut block);
                }
            }
        }
    }
}

impl Renderable for PropertyBuilder {
    fn render(&self, writer: &mut CodeWriter) -> Result<()> {
        let ty = self
            .ty
            .as_deref()
            .map(str::trim)
            .filter(|ty| !ty.is_empty())
            .ok_or_else(|| Error::missing_field(&self.name, "type"))?;

        self.docs.render(writer);
        write_warning(writer, self.warning.as_deref());
        self.attributes.render(writer);

        let [first, second, third] = self.modifiers();
        let output = declaration([
            keyword(self.access),
            first,
            second,
            third,
            ty,
            self.name.as_str(),
        ]);

        match self.kind {
            PropertyKind::Property => {
                self.render_property(writer, &output);
                Ok(())
            }
            _ => self.render_field(writer, &output),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn property(name: &str) -> PropertyBuilder {
        PropertyBuilder::new(name, FileContext::new())
    }

    fn render(property: &PropertyBuilder) -> String {
        let mut writer = CodeWriter::spaces();
        property.render(&mut writer).unwrap();
        writer.render()
    }

    #[test]
    fn test_auto_property() {
        let mut p = property("Name");
        p.public().with_type("string").use_auto_props();
        assert_eq!(render(&p), "public string Name { get; set; }\n");

        p.use_auto_props_with_setter(Accessibility::Private);
        assert_eq!(render(&p), "public string Name { get; private set; }\n");

        p.use_get_only_auto_prop();
        assert_eq!(render(&p), "public string Name { get; }\n");

        p.use_init_auto_prop();
        assert_eq!(render(&p), "public string Name { get; init; }\n");
    }

    #[test]
    fn test_missing_type_fails() {
        let mut p = property("Name");
        p.public().use_auto_props();

        let mut writer = CodeWriter::spaces();
        let err = p.render(&mut writer).unwrap_err();
        assert!(matches!(
            *err,
            Error::MissingRequiredField { field: "type", .. }
        ));

        p.with_type("   ");
        assert!(p.render(&mut CodeWriter::spaces()).is_err());
    }

    #[test]
    fn test_const() {
        let mut p = property("MaxSize");
        p.public().with_type("int").make_static().with_const_value("10");
        assert_eq!(p.kind(), PropertyKind::Const);
        assert_eq!(render(&p), "public const int MaxSize = 10;\n");
    }

    #[test]
    fn test_const_without_value_fails() {
        let mut p = property("MaxSize");
        p.with_type("int").with_const_value("1");
        p.value = None;
        assert!(p.render(&mut CodeWriter::spaces()).is_err());
    }

    #[test]
    fn test_readonly_and_fields() {
        let mut p = property("_items");
        p.private()
            .with_type("List<string>")
            .make_static()
            .with_readonly_value("new()");
        assert_eq!(
            render(&p),
            "private static readonly List<string> _items = new();\n"
        );

        let mut p = property("_count");
        p.private().with_type("int").make_field();
        assert_eq!(render(&p), "private int _count;\n");

        p.with_value(PropertyValue::Default);
        assert_eq!(render(&p), "private int _count = default;\n");

        p.with_value(PropertyValue::Null);
        assert_eq!(render(&p), "private int _count = null;\n");
    }

    #[test]
    fn test_multiline_value() {
        let mut p = property("Lookup");
        p.public()
            .with_type("Dictionary<string, int>")
            .with_readonly_value("new()\n{\n    [\"a\"] = 1,\n}");
        assert_eq!(
            render(&p),
            "public readonly Dictionary<string, int> Lookup =\n    new()\n    {\n        [\"a\"] = 1,\n    };\n"
        );
    }

    #[test]
    fn test_expression_bodied_getter() {
        let mut p = property("Count");
        p.public()
            .with_type("int")
            .make_virtual()
            .make_override()
            .with_getter_expression("_items.Count");
        assert_eq!(render(&p), "public virtual int Count => _items.Count;\n");
    }

    #[test]
    fn test_accessor_block() {
        let mut p = property("Name");
        p.public()
            .with_type("string")
            .make_override()
            .with_getter_expression("_name")
            .with_setter(|w| {
                w.append_line("_name = value;");
            });

        assert_eq!(
            render(&p),
            "public override string Name\n{\n    get => _name;\n    set\n    {\n        _name = value;\n    }\n}\n"
        );
    }

    #[test]
    fn test_nothing_configured() {
        let mut p = property("Value");
        p.with_type("object");
        assert_eq!(render(&p), "object Value;\n");
    }

    #[test]
    fn test_equals_gets_new_modifier() {
        let mut p = property("Equals");
        p.public().with_type("bool").use_get_only_auto_prop();
        assert_eq!(render(&p), "public new bool Equals { get; }\n");
    }

    #[test]
    fn test_docs_warning_attributes() {
        let mut p = property("Legacy");
        p.public()
            .with_type("string")
            .use_auto_props()
            .with_summary("Old value.")
            .with_warning("Legacy is deprecated")
            .add_attribute("[Obsolete]")
            .add_attribute("JsonIgnore");

        assert_eq!(
            render(&p),
            "/// <summary>\n/// Old value.\n/// </summary>\n#warning Legacy is deprecated\n[Obsolete]\n[JsonIgnore]\npublic string Legacy { get; set; }\n"
        );
    }

    #[test]
    fn test_namespace_import_reaches_context() {
        let context = FileContext::new();
        let mut p = PropertyBuilder::new("Items", context.clone());
        p.add_namespace_import("System.Collections.Generic");
        assert_eq!(context.imports(), vec!["System.Collections.Generic"]);
    }
}
