//! Delegate declarations.

use csforge_writer::CodeWriter;

use crate::{
    Accessibility, Attributes, Documentation, FileContext, GenericParameter, Generics, Parameter,
    Parameterized, Renderable, Result,
    accessibility::keyword,
    node::{declaration, write_terminated},
};

/// Builder for a delegate, either top-level or nested in a class.
#[derive(Debug, Clone)]
pub struct DelegateBuilder {
    name: String,
    return_type: Option<String>,
    access: Option<Accessibility>,
    generics: Generics,
    parameters: Vec<Parameter>,
    attributes: Attributes,
    docs: Documentation,
    context: FileContext,
}

impl DelegateBuilder {
    pub(crate) fn new(name: impl Into<String>, context: FileContext) -> Self {
        Self {
            name: name.into().trim().to_string(),
            return_type: None,
            access: None,
            generics: Generics::default(),
            parameters: Vec::new(),
            attributes: Attributes::default(),
            docs: Documentation::default(),
            context,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return type; `void` when unset.
    pub fn with_return_type(&mut self, ty: impl Into<String>) -> &mut Self {
        self.return_type = Some(ty.into());
        self
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

    pub fn with_parameter_doc(&mut self, name: &str, doc: impl Into<String>) -> Result<&mut Self> {
        self.docs.add_param(&self.name, name, doc)?;
        Ok(self)
    }

    pub fn add_namespace_import(&mut self, namespace: &str) -> &mut Self {
        self.context.add_namespace_import(namespace);
        self
    }

    pub fn add_assembly_attribute(&mut self, attribute: &str) -> &mut Self {
        self.context.add_assembly_attribute(attribute);
        self
    }
}

impl Parameterized for DelegateBuilder {
    fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    fn parameters_mut(&mut self) -> &mut Vec<Parameter> {
        &mut self.parameters
    }
}

impl Renderable for DelegateBuilder {
    fn render(&self, writer: &mut CodeWriter) -> Result<()> {
        self.docs
            .render_for(writer, self.parameters.iter().map(Parameter::name));
        self.attributes.render(writer);

        let return_type = self
            .return_type
            .as_deref()
            .map(str::trim)
            .filter(|ty| !ty.is_empty())
            .unwrap_or("void");
        let signature = format!(
            "{}{}({})",
            self.name,
            self.generics.suffix(),
            self.parameter_list()
        );
        let output = declaration([
            keyword(self.access),
            "delegate",
            return_type,
            signature.as_str(),
        ]);

        write_terminated(writer, &output, &self.generics.where_clauses());
        Ok(())
    }
}
