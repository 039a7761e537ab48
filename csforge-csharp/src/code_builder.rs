//! The file-level coordinator.

use std::collections::BTreeSet;

use csforge_writer::{CodeWriter, Sections, Spacing};
use log::debug;

use crate::{
    ClassBuilder, CodeBuilderOptions, DelegateBuilder, EnumBuilder, FileContext, NamespaceStyle,
    PropertyOrder, RecordBuilder, Renderable, Result, node::render_node,
};

/// A top-level declaration of a file, borrowed from its [`CodeBuilder`].
#[derive(Debug, Clone, Copy)]
pub enum TypeDeclaration<'a> {
    Class(&'a ClassBuilder),
    Enum(&'a EnumBuilder),
    Record(&'a RecordBuilder),
    Delegate(&'a DelegateBuilder),
}

impl<'a> TypeDeclaration<'a> {
    pub fn name(&self) -> &'a str {
        match *self {
            Self::Class(class) => class.name(),
            Self::Enum(builder) => builder.name(),
            Self::Record(record) => record.name(),
            Self::Delegate(delegate) => delegate.name(),
        }
    }
}

impl Renderable for TypeDeclaration<'_> {
    fn render(&self, writer: &mut CodeWriter) -> Result<()> {
        match self {
            Self::Class(class) => class.render(writer),
            Self::Enum(builder) => builder.render(writer),
            Self::Record(record) => record.render(writer),
            Self::Delegate(delegate) => delegate.render(writer),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum TypeSlot {
    Class(usize),
    Enum(usize),
    Record(usize),
    Delegate(usize),
}

/// Builds one C# source file.
///
/// ```
/// use csforge_csharp::CodeBuilder;
///
/// let mut builder = CodeBuilder::new("Sample");
/// builder
///     .add_class("Widget")
///     .public()
///     .add_property("Name")
///     .public()
///     .with_type("string")
///     .use_auto_props();
///
/// assert_eq!(
///     builder.build()?,
///     "namespace Sample\n{\n    public partial class Widget\n    {\n        public string Name { get; set; }\n    }\n}\n"
/// );
/// # Ok::<(), Box<csforge_csharp::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    namespace: Option<String>,
    options: CodeBuilderOptions,
    context: FileContext,
    disabled_warnings: BTreeSet<String>,
    classes: Vec<ClassBuilder>,
    enums: Vec<EnumBuilder>,
    records: Vec<RecordBuilder>,
    delegates: Vec<DelegateBuilder>,
    order: Vec<TypeSlot>,
}

impl Default for CodeBuilder {
    fn default() -> Self {
        Self::global()
    }
}

impl CodeBuilder {
    /// A file whose types live in `namespace`. A blank name means the
    /// global namespace.
    pub fn new(namespace: &str) -> Self {
        let namespace = namespace.trim();
        Self {
            namespace: (!namespace.is_empty()).then(|| namespace.to_string()),
            options: CodeBuilderOptions::default(),
            context: FileContext::new(),
            disabled_warnings: BTreeSet::new(),
            classes: Vec::new(),
            enums: Vec::new(),
            records: Vec::new(),
            delegates: Vec::new(),
            order: Vec::new(),
        }
    }

    /// A file whose types live in the global namespace.
    pub fn global() -> Self {
        Self::new("")
    }

    /// Replace the options. Classes added afterwards take their default
    /// property order from `options`.
    pub fn with_options(mut self, options: CodeBuilderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn options(&self) -> &CodeBuilderOptions {
        &self.options
    }

    /// The import and assembly-attribute sink shared with every child builder.
    pub fn context(&self) -> &FileContext {
        &self.context
    }

    /// Top-level types in insertion order.
    pub fn types(&self) -> impl Iterator<Item = TypeDeclaration<'_>> {
        self.order.iter().map(|slot| match *slot {
            TypeSlot::Class(i) => TypeDeclaration::Class(&self.classes[i]),
            TypeSlot::Enum(i) => TypeDeclaration::Enum(&self.enums[i]),
            TypeSlot::Record(i) => TypeDeclaration::Record(&self.records[i]),
            TypeSlot::Delegate(i) => TypeDeclaration::Delegate(&self.delegates[i]),
        })
    }

    pub fn add_namespace_import(&mut self, namespace: &str) -> &mut Self {
        self.context.add_namespace_import(namespace);
        self
    }

    pub fn add_namespace_imports<'a>(
        &mut self,
        namespaces: impl IntoIterator<Item = &'a str>,
    ) -> &mut Self {
        for namespace in namespaces {
            self.add_namespace_import(namespace);
        }
        self
    }

    pub fn add_assembly_attribute(&mut self, attribute: &str) -> &mut Self {
        self.context.add_assembly_attribute(attribute);
        self
    }

    /// Disable a compiler warning for the whole file, e.g. `CS1591`.
    pub fn disable_warning(&mut self, code: &str) -> &mut Self {
        let code = code.trim();
        if !code.is_empty() {
            self.disabled_warnings.insert(code.to_string());
        }
        self
    }

    /// Add a top-level class. Top-level classes start out `partial`.
    pub fn add_class(&mut self, name: &str) -> &mut ClassBuilder {
        let order = if self.options.sort_properties {
            PropertyOrder::ByName
        } else {
            PropertyOrder::Insertion
        };
        let index = self.classes.len();
        self.classes.push(ClassBuilder::new(
            name,
            self.namespace.clone(),
            true,
            order,
            self.context.clone(),
        ));
        self.order.push(TypeSlot::Class(index));
        &mut self.classes[index]
    }

    pub fn add_enum(&mut self, name: &str) -> &mut EnumBuilder {
        let index = self.enums.len();
        self.enums.push(EnumBuilder::new(
            name,
            self.namespace.clone(),
            self.context.clone(),
        ));
        self.order.push(TypeSlot::Enum(index));
        &mut self.enums[index]
    }

    pub fn add_record(&mut self, name: &str) -> &mut RecordBuilder {
        let index = self.records.len();
        self.records.push(RecordBuilder::new(
            name,
            self.namespace.clone(),
            self.context.clone(),
        ));
        self.order.push(TypeSlot::Record(index));
        &mut self.records[index]
    }

    pub fn add_delegate(&mut self, name: &str) -> &mut DelegateBuilder {
        let index = self.delegates.len();
        self.delegates
            .push(DelegateBuilder::new(name, self.context.clone()));
        self.order.push(TypeSlot::Delegate(index));
        &mut self.delegates[index]
    }

    /// Render the file.
    ///
    /// The builder is not consumed and rendering has no side effects, so
    /// repeated calls return the same text.
    pub fn build(&self) -> Result<String> {
        let imports = self.context.import_groups();
        let attributes = self.context.assembly_attributes();

        let mut writer = CodeWriter::new(self.options.indent);
        let mut sections = Sections::new(&mut writer);
        sections
            .section(
                self.options
                    .nullable
                    .map(|state| format!("#nullable {}", state.as_str())),
                Spacing::Grouped,
                write_line,
            )?
            .section(
                self.disabled_warnings
                    .iter()
                    .map(|code| format!("#pragma warning disable {}", code)),
                Spacing::Grouped,
                write_line,
            )?
            .section(
                imports.iter().map(|import| format!("using {};", import)),
                Spacing::Grouped,
                write_line,
            )?
            .section(&attributes, Spacing::Grouped, write_line)?;

        match (&self.namespace, self.options.namespace_style) {
            (None, _) => sections.section(self.types(), Spacing::Spaced, render_node)?,
            (Some(namespace), NamespaceStyle::Block) => sections.section(
                [namespace],
                Spacing::Grouped,
                |writer: &mut CodeWriter, namespace: &String| -> Result<()> {
                    let mut block = writer.block(&format!("namespace {}", namespace));
                    Sections::new(&mut block).section(
                        self.types(),
                        Spacing::Spaced,
                        render_node,
                    )?;
                    Ok(())
                },
            )?,
            (Some(namespace), NamespaceStyle::FileScoped) => sections
                .section(
                    [format!("namespace {};", namespace)],
                    Spacing::Grouped,
                    write_line,
                )?
                .section(self.types(), Spacing::Spaced, render_node)?,
        };

        let output = writer.render();
        debug!(
            "built {} type(s) in namespace {}: {} bytes",
            self.order.len(),
            self.namespace.as_deref().unwrap_or("<global>"),
            output.len()
        );
        Ok(output)
    }
}

fn write_line<S: AsRef<str>>(writer: &mut CodeWriter, line: S) -> Result<()> {
    writer.append_line(line.as_ref());
    Ok(())
}
