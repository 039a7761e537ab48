//! Enum declarations.

use csforge_writer::CodeWriter;

use crate::{
    Accessibility, Attributes, Documentation, FileContext, Renderable, Result,
    accessibility::keyword, node::declaration,
};

/// One enum member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValueBuilder {
    name: String,
    value: Option<i64>,
    attributes: Attributes,
    docs: Documentation,
}

impl EnumValueBuilder {
    fn new(name: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            value: None,
            attributes: Attributes::default(),
            docs: Documentation::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Option<i64> {
        self.value
    }

    pub fn with_value(&mut self, value: i64) -> &mut Self {
        self.value = Some(value);
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
}

/// Writes the value without its separator or line ending, which depend
/// on the position within the enum.
impl Renderable for EnumValueBuilder {
    fn render(&self, writer: &mut CodeWriter) -> Result<()> {
        self.docs.render(writer);
        self.attributes.render_sorted(writer);
        writer.append(&self.name);
        if let Some(value) = self.value {
            writer.append_unindented(&format!(" = {}", value));
        }
        Ok(())
    }
}

/// Builder for an `enum` declaration.
///
/// Values are written in ascending numeric order. Values without an
/// explicit number come first, in insertion order.
#[derive(Debug, Clone)]
pub struct EnumBuilder {
    name: String,
    parent: Option<String>,
    access: Option<Accessibility>,
    underlying: Option<String>,
    attributes: Attributes,
    docs: Documentation,
    values: Vec<EnumValueBuilder>,
    context: FileContext,
}

impl EnumBuilder {
    pub(crate) fn new(name: &str, parent: Option<String>, context: FileContext) -> Self {
        Self {
            name: name.trim().to_string(),
            parent,
            access: None,
            underlying: None,
            attributes: Attributes::default(),
            docs: Documentation::default(),
            values: Vec::new(),
            context,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn full_name(&self) -> String {
        match &self.parent {
            Some(parent) => format!("{}.{}", parent, self.name),
            None => self.name.clone(),
        }
    }

    pub fn values(&self) -> &[EnumValueBuilder] {
        &self.values
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

    /// Set the underlying integral type, e.g. `byte`.
    pub fn with_underlying_type(&mut self, ty: impl Into<String>) -> &mut Self {
        self.underlying = Some(ty.into());
        self
    }

    /// Mark the enum with `[Flags]`, importing `System`.
    pub fn flags(&mut self) -> &mut Self {
        self.context.add_namespace_import("System");
        self.add_attribute("Flags")
    }

    pub fn add_attribute(&mut self, attribute: &str) -> &mut Self {
        self.attributes.add(attribute);
        self
    }

    pub fn with_summary(&mut self, summary: impl Into<String>) -> &mut Self {
        self.docs.set_summary(summary);
        self
    }

    pub fn add_namespace_import(&mut self, namespace: &str) -> &mut Self {
        self.context.add_namespace_import(namespace);
        self
    }

    pub fn add_value(&mut self, name: &str) -> &mut EnumValueBuilder {
        let index = self.values.len();
        self.values.push(EnumValueBuilder::new(name));
        &mut self.values[index]
    }

    pub fn add_value_with(&mut self, name: &str, value: i64) -> &mut EnumValueBuilder {
        self.add_value(name).with_value(value)
    }
}

impl Renderable for EnumBuilder {
    fn render(&self, writer: &mut CodeWriter) -> Result<()> {
        self.docs.render(writer);
        self.attributes.render_sorted(writer);

        let underlying = self
            .underlying
            .as_deref()
            .map(str::trim)
            .filter(|ty| !ty.is_empty())
            .map(|ty| format!(": {}", ty))
            .unwrap_or_default();
        let header = declaration([
            keyword(self.access),
            "enum",
            self.name.as_str(),
            underlying.as_str(),
        ]);

        let mut values: Vec<&EnumValueBuilder> = self.values.iter().collect();
        values.sort_by_key(|v| v.value);

        let mut block = writer.block(&header);
        let mut values = values.into_iter().peekable();
        while let Some(value) = values.next() {
            value.render(&mut block)?;
            if values.peek().is_some() {
                block.append_unindented_line(",");
                block.new_line();
            } else {
                block.new_line();
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(builder: &EnumBuilder) -> String {
        let mut writer = CodeWriter::spaces();
        builder.render(&mut writer).unwrap();
        writer.render()
    }

    #[test]
    fn test_empty_enum() {
        let mut e = EnumBuilder::new("Color", None, FileContext::new());
        e.public();
        assert_eq!(render(&e), "public enum Color\n{\n}\n");
    }

    #[test]
    fn test_values_sorted_by_number() {
        let mut e = EnumBuilder::new("Status", None, FileContext::new());
        e.public();
        e.add_value_with("Done", 2);
        e.add_value_with("Active", 1);
        e.add_value("Unknown");

        let expected = "\
public enum Status
{
    Unknown,

    Active = 1,

    Done = 2
}
";
        assert_eq!(render(&e), expected);
    }

    #[test]
    fn test_unnumbered_keep_insertion_order() {
        let mut e = EnumBuilder::new("Color", None, FileContext::new());
        e.add_value("Red");
        e.add_value("Green");
        e.add_value("Blue");

        assert_eq!(
            render(&e),
            "enum Color\n{\n    Red,\n\n    Green,\n\n    Blue\n}\n"
        );
    }

    #[test]
    fn test_value_docs_and_attributes() {
        let mut e = EnumBuilder::new("Kind", None, FileContext::new());
        e.add_value("B")
            .with_summary("The B kind.")
            .add_attribute("EnumMember(Value = \"b\")")
            .add_attribute("Description(\"b\")");

        let expected = "\
enum Kind
{
    /// <summary>
    /// The B kind.
    /// </summary>
    [Description(\"b\")]
    [EnumMember(Value = \"b\")]
    B
}
";
        assert_eq!(render(&e), expected);
    }

    #[test]
    fn test_flags_and_underlying_type() {
        let context = FileContext::new();
        let mut e = EnumBuilder::new("Access", Some("Sample".into()), context.clone());
        e.public().flags().with_underlying_type("byte");
        e.add_value_with("None", 0);
        e.add_value_with("Read", 1);

        assert_eq!(e.full_name(), "Sample.Access");
        assert_eq!(context.imports(), vec!["System"]);
        assert_eq!(
            render(&e),
            "[Flags]\npublic enum Access : byte\n{\n    None = 0,\n\n    Read = 1\n}\n"
        );
    }
}
