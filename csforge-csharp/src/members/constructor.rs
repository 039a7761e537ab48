//! Constructors.

use csforge_writer::CodeWriter;

use crate::{
    Accessibility, Attributes, BodyWriter, Documentation, FileContext, Parameter, Parameterized,
    Renderable, Result,
    accessibility::keyword,
    node::{declaration, write_warning},
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Initializer {
    Base(Vec<String>),
    This(Vec<String>),
}

impl Initializer {
    fn line(&self) -> String {
        match self {
            Self::Base(args) => format!(": base({})", args.join(", ")),
            Self::This(args) => format!(": this({})", args.join(", ")),
        }
    }
}

/// Builder for a constructor of a class.
#[derive(Debug, Clone)]
pub struct ConstructorBuilder {
    class_name: String,
    access: Option<Accessibility>,
    parameters: Vec<Parameter>,
    initializer: Option<Initializer>,
    body: Option<BodyWriter>,
    warning: Option<String>,
    attributes: Attributes,
    docs: Documentation,
    context: FileContext,
}

impl ConstructorBuilder {
    pub(crate) fn new(class_name: impl Into<String>, context: FileContext) -> Self {
        Self {
            class_name: class_name.into(),
            access: None,
            parameters: Vec::new(),
            initializer: None,
            body: None,
            warning: None,
            attributes: Attributes::default(),
            docs: Documentation::default(),
            context,
        }
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

    /// `: base()`
    pub fn with_base_call(&mut self) -> &mut Self {
        self.initializer = Some(Initializer::Base(Vec::new()));
        self
    }

    /// `: base(a, b)`, adding `(type, name)` pairs as parameters.
    pub fn with_base_call_parameters<I, T, N>(&mut self, parameters: I) -> &mut Self
    where
        I: IntoIterator<Item = (T, N)>,
        T: AsRef<str>,
        N: AsRef<str>,
    {
        let args = self.forward_parameters(parameters);
        self.initializer = Some(Initializer::Base(args));
        self
    }

    /// `: this()`
    pub fn with_this_call(&mut self) -> &mut Self {
        self.initializer = Some(Initializer::This(Vec::new()));
        self
    }

    /// `: this(a, b)`, adding `(type, name)` pairs as parameters.
    pub fn with_this_call_parameters<I, T, N>(&mut self, parameters: I) -> &mut Self
    where
        I: IntoIterator<Item = (T, N)>,
        T: AsRef<str>,
        N: AsRef<str>,
    {
        let args = self.forward_parameters(parameters);
        self.initializer = Some(Initializer::This(args));
        self
    }

    fn forward_parameters<I, T, N>(&mut self, parameters: I) -> Vec<String>
    where
        I: IntoIterator<Item = (T, N)>,
        T: AsRef<str>,
        N: AsRef<str>,
    {
        parameters
            .into_iter()
            .map(|(ty, name)| {
                let parameter = Parameter::new(ty.as_ref(), Some(name.as_ref()));
                let name = parameter.name().to_string();
                self.insert_parameter(parameter, None);
                name
            })
            .collect()
    }

    pub fn with_body(&mut self, body: impl Fn(&mut CodeWriter) + 'static) -> &mut Self {
        self.body = Some(BodyWriter::new(body));
        self
    }

    pub fn with_body_writer(&mut self, body: BodyWriter) -> &mut Self {
        self.body = Some(body);
        self
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

    pub fn with_inherit_doc(&mut self) -> &mut Self {
        self.docs.set_inherit(None);
        self
    }

    pub fn with_parameter_doc(&mut self, name: &str, doc: impl Into<String>) -> Result<&mut Self> {
        self.docs.add_param(&self.class_name, name, doc)?;
        Ok(self)
    }

    pub fn add_namespace_import(&mut self, namespace: &str) -> &mut Self {
        self.context.add_namespace_import(namespace);
        self
    }
}

impl Parameterized for ConstructorBuilder {
    fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    fn parameters_mut(&mut self) -> &mut Vec<Parameter> {
        &mut self.parameters
    }
}

impl Renderable for ConstructorBuilder {
    fn render(&self, writer: &mut CodeWriter) -> Result<()> {
        self.docs
            .render_for(writer, self.parameters.iter().map(Parameter::name));
        write_warning(writer, self.warning.as_deref());
        self.attributes.render(writer);

        let signature = format!("{}({})", self.class_name, self.parameter_list());
        let output = declaration([keyword(self.access), signature.as_str()]);
        let initializer = self.initializer.as_ref().map(Initializer::line);

        let mut block = writer.block_with(&output, initializer);
        if let Some(body) = &self.body {
            body.write(&mut block);
        }
        Ok(())
    }
}
