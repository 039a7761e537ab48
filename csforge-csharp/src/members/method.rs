//! Methods.

use csforge_writer::CodeWriter;

use crate::{
    Accessibility, Attributes, BodyWriter, Documentation, FileContext, GenericParameter,
    Generics, Parameter, Parameterized, Renderable, Result,
    accessibility::keyword,
    node::{declaration, write_terminated, write_warning},
};

/// Builder for a method of a class.
#[derive(Debug, Clone)]
pub struct MethodBuilder {
    name: String,
    return_type: Option<String>,
    access: Option<Accessibility>,
    is_async: bool,
    is_static: bool,
    is_virtual: bool,
    is_override: bool,
    is_abstract: bool,
    generics: Generics,
    parameters: Vec<Parameter>,
    body: Option<BodyWriter>,
    warning: Option<String>,
    attributes: Attributes,
    docs: Documentation,
    context: FileContext,
}

impl MethodBuilder {
    pub(crate) fn new(name: impl Into<String>, context: FileContext) -> Self {
        Self {
            name: name.into().trim().to_string(),
            return_type: None,
            access: None,
            is_async: false,
            is_static: false,
            is_virtual: false,
            is_override: false,
            is_abstract: false,
            generics: Generics::default(),
            parameters: Vec::new(),
            body: None,
            warning: None,
            attributes: Attributes::default(),
            docs: Documentation::default(),
            context,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    pub fn has_body(&self) -> bool {
        self.body.is_some()
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

    pub fn private(&mut self) -> &mut Self {
        self.with_access(Accessibility::Private)
    }

    pub fn protected(&mut self) -> &mut Self {
        self.with_access(Accessibility::Protected)
    }

    pub fn internal(&mut self) -> &mut Self {
        self.with_access(Accessibility::Internal)
    }

    pub fn make_async(&mut self) -> &mut Self {
        self.is_async = true;
        self
    }

    pub fn make_static(&mut self) -> &mut Self {
        self.is_static = true;
        self
    }

    pub fn make_virtual(&mut self) -> &mut Self {
        self.is_virtual = true;
        self
    }

    pub fn make_override(&mut self) -> &mut Self {
        self.is_override = true;
        self
    }

    /// An abstract method has no body. Its class renders as `abstract`.
    pub fn make_abstract(&mut self) -> &mut Self {
        self.is_abstract = true;
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

    pub fn with_inherit_doc_from(&mut self, cref: impl Into<String>) -> &mut Self {
        self.docs.set_inherit(Some(cref.into()));
        self
    }

    /// Document a parameter. Entries for names that are not parameters at
    /// render time are left out.
    pub fn with_parameter_doc(&mut self, name: &str, doc: impl Into<String>) -> Result<&mut Self> {
        self.docs.add_param(&self.name, name, doc)?;
        Ok(self)
    }

    pub fn add_namespace_import(&mut self, namespace: &str) -> &mut Self {
        self.context.add_namespace_import(namespace);
        self
    }

    fn modifier(&self) -> &'static str {
        if self.is_override {
            "override"
        } else if self.is_virtual {
            "virtual"
        } else if self.is_abstract {
            "abstract"
        } else if self.is_static {
            "static"
        } else {
            ""
        }
    }
}

impl Parameterized for MethodBuilder {
    fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    fn parameters_mut(&mut self) -> &mut Vec<Parameter> {
        &mut self.parameters
    }
}

impl Renderable for MethodBuilder {
    fn render(&self, writer: &mut CodeWriter) -> Result<()> {
        self.docs
            .render_for(writer, self.parameters.iter().map(Parameter::name));
        write_warning(writer, self.warning.as_deref());
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
            self.modifier(),
            if self.is_async { "async" } else { "" },
            return_type,
            signature.as_str(),
        ]);
        let clauses = self.generics.where_clauses();

        if self.is_abstract {
            write_terminated(writer, &output, &clauses);
            return Ok(());
        }

        let mut block = writer.block_with(&output, &clauses);
        if let Some(body) = &self.body {
            body.write(&mut block);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn method(name: &str) -> MethodBuilder {
        MethodBuilder::new(name, FileContext::new())
    }

    fn render(method: &MethodBuilder) -> String {
        let mut writer = CodeWriter::spaces();
        method.render(&mut writer).unwrap();
        writer.render()
    }

    #[test]
    fn test_void_method() {
        let mut m = method("Run");
        m.public().with_body(|w| {
            w.append_line("Go();");
        });
        assert_eq!(render(&m), "public void Run()\n{\n    Go();\n}\n");
    }

    #[test]
    fn test_empty_body() {
        let mut m = method("Reset");
        m.private();
        assert_eq!(render(&m), "private void Reset()\n{\n}\n");
    }

    #[test]
    fn test_unnamed_keyword_parameters() {
        let mut m = method("Add");
        m.public().add_parameter("int").add_parameter("string");
        assert_eq!(
            render(&m),
            "public void Add(int @int, string @string)\n{\n}\n"
        );
    }

    #[test]
    fn test_body_ending_mid_line() {
        let mut m = method("Run");
        m.public().with_body(|w| {
            w.append("Go();");
        });
        assert_eq!(render(&m), "public void Run()\n{\n    Go();\n}\n");
    }

    #[test]
    fn test_modifier_precedence() {
        let mut m = method("Run");
        m.public().make_static().make_abstract();
        assert!(render(&m).starts_with("public abstract void Run();"));

        m.make_virtual();
        assert!(render(&m).starts_with("public virtual void Run();"));

        m.make_override();
        assert!(render(&m).starts_with("public override void Run();"));
    }

    #[test]
    fn test_async_with_parameters() {
        let mut m = method("LoadAsync");
        m.public()
            .make_override()
            .make_async()
            .with_return_type("Task<string>")
            .add_named_parameter("string", "path")
            .add_parameter_with_default("CancellationToken", None, "default");
        m.with_body(|w| {
            w.append_line("return await File.ReadAllTextAsync(path, cancellationToken);");
        });

        assert_eq!(
            render(&m),
            "public override async Task<string> LoadAsync(string path, CancellationToken cancellationToken = default)\n{\n    return await File.ReadAllTextAsync(path, cancellationToken);\n}\n"
        );
    }

    #[test]
    fn test_generic_constraints() {
        let mut m = method("Create");
        m.public()
            .with_return_type("T")
            .add_generic_with("T", |t| {
                t.class().new_constraint();
            })
            .unwrap()
            .with_body(|w| {
                w.append_line("return new T();");
            });

        assert_eq!(
            render(&m),
            "public T Create<T>()\n    where T : class, new()\n{\n    return new T();\n}\n"
        );
    }

    #[test]
    fn test_abstract_generic() {
        let mut m = method("Map");
        m.protected()
            .make_abstract()
            .with_return_type("TOut")
            .add_generic("TIn")
            .unwrap()
            .add_generic_with("TOut", |t| {
                t.constraint("notnull");
            })
            .unwrap()
            .add_parameter("TIn");

        assert_eq!(
            render(&m),
            "protected abstract TOut Map<TIn, TOut>(TIn tIn)\n    where TOut : notnull;\n"
        );
    }

    #[test]
    fn test_duplicate_generic_fails() {
        let mut m = method("Map");
        m.add_generic("T").unwrap();
        let err = m.add_generic("T").map(|_| ()).unwrap_err();
        assert!(matches!(*err, Error::DuplicateGenericParameter { .. }));
    }

    #[test]
    fn test_parameter_docs() {
        let mut m = method("Greet");
        m.public()
            .add_named_parameter("string", "name")
            .with_summary("Says hello.")
            .with_parameter_doc("name", "Who to greet.")
            .unwrap()
            .with_parameter_doc("removed", "Stale.")
            .unwrap();

        assert_eq!(
            render(&m),
            "/// <summary>\n/// Says hello.\n/// </summary>\n/// <param name=\"name\">Who to greet.</param>\npublic void Greet(string name)\n{\n}\n"
        );
    }

    #[test]
    fn test_parameter_doc_after_inheritdoc_fails() {
        let mut m = method("Greet");
        m.with_inherit_doc();
        let err = m.with_parameter_doc("name", "Who.").map(|_| ()).unwrap_err();
        assert!(matches!(*err, Error::InvalidDocumentationState { .. }));
    }

    #[test]
    fn test_render_is_repeatable() {
        let mut m = method("Run");
        m.with_body(|w| {
            w.append_line("Go();");
        });
        assert_eq!(render(&m), render(&m));
    }
}
