//! Record declarations backed by a property list.

use csforge_writer::CodeWriter;
use serde::{Deserialize, Serialize};

use crate::{
    Accessibility, Attributes, Documentation, FileContext, Renderable, Result,
    accessibility::keyword,
    node::{declaration, write_warning},
};

/// How record properties are declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecordStyle {
    /// `record Name(string A, int B);`
    #[default]
    Positional,
    /// A body of `{ get; init; }` properties.
    Init,
}

/// One property of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordProperty {
    ty: String,
    name: String,
    access: Option<Accessibility>,
    default: Option<String>,
}

impl RecordProperty {
    pub fn ty(&self) -> &str {
        &self.ty
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn with_default_value(&mut self, value: impl Into<String>) -> &mut Self {
        self.default = Some(value.into());
        self
    }

    /// Access keyword used in the init style. Positional parameters ignore it.
    pub fn with_access(&mut self, access: Accessibility) -> &mut Self {
        self.access = Some(access);
        self
    }

    fn positional(&self) -> String {
        match &self.default {
            Some(default) => format!("{} {} = {}", self.ty, self.name, default),
            None => format!("{} {}", self.ty, self.name),
        }
    }

    fn init(&self) -> String {
        let output = declaration([
            keyword(self.access),
            self.ty.as_str(),
            self.name.as_str(),
            "{ get; init; }",
        ]);
        match &self.default {
            Some(default) => format!("{} = {};", output, default),
            None => output,
        }
    }
}

/// Builder for a `record` declaration.
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    name: String,
    parent: Option<String>,
    access: Option<Accessibility>,
    style: RecordStyle,
    is_sealed: bool,
    properties: Vec<RecordProperty>,
    attributes: Attributes,
    docs: Documentation,
    warning: Option<String>,
    context: FileContext,
}

impl RecordBuilder {
    pub(crate) fn new(name: &str, parent: Option<String>, context: FileContext) -> Self {
        Self {
            name: name.trim().to_string(),
            parent,
            access: None,
            style: RecordStyle::default(),
            is_sealed: false,
            properties: Vec::new(),
            attributes: Attributes::default(),
            docs: Documentation::default(),
            warning: None,
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

    pub fn style(&self) -> RecordStyle {
        self.style
    }

    pub fn properties(&self) -> &[RecordProperty] {
        &self.properties
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

    pub fn sealed(&mut self) -> &mut Self {
        self.is_sealed = true;
        self
    }

    pub fn with_style(&mut self, style: RecordStyle) -> &mut Self {
        self.style = style;
        self
    }

    pub fn use_init_properties(&mut self) -> &mut Self {
        self.with_style(RecordStyle::Init)
    }

    pub fn add_property(&mut self, ty: &str, name: &str) -> &mut RecordProperty {
        let index = self.properties.len();
        self.properties.push(RecordProperty {
            ty: ty.trim().to_string(),
            name: name.trim().to_string(),
            access: None,
            default: None,
        });
        &mut self.properties[index]
    }

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

    pub fn add_namespace_import(&mut self, namespace: &str) -> &mut Self {
        self.context.add_namespace_import(namespace);
        self
    }
}

impl Renderable for RecordBuilder {
    fn render(&self, writer: &mut CodeWriter) -> Result<()> {
        self.docs.render(writer);
        write_warning(writer, self.warning.as_deref());
        self.attributes.render_sorted(writer);

        let header = declaration([
            keyword(self.access),
            if self.is_sealed { "sealed" } else { "" },
            "record",
            self.name.as_str(),
        ]);

        match self.style {
            RecordStyle::Positional => {
                let parameters: Vec<String> =
                    self.properties.iter().map(RecordProperty::positional).collect();
                writer.append_line(&format!("{}({});", header, parameters.join(", ")));
            }
            RecordStyle::Init => {
                let mut block = writer.block(&header);
                for property in &self.properties {
                    block.append_line(&property.init());
                }
            }
        }
        Ok(())
    }
}
