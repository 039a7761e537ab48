//! Events.

use csforge_writer::CodeWriter;

use crate::{
    Accessibility, Accessor, Attributes, BodyWriter, Documentation, FileContext, Renderable,
    Result,
    accessibility::keyword,
    node::{declaration, write_warning},
};

const DEFAULT_HANDLER: &str = "EventHandler";

/// Builder for an event of a class.
///
/// The `add`/`remove` accessor block is only written when both accessors
/// are set.
#[derive(Debug, Clone)]
pub struct EventBuilder {
    name: String,
    handler: String,
    access: Option<Accessibility>,
    is_static: bool,
    explicit_interface: Option<String>,
    add: Option<Accessor>,
    remove: Option<Accessor>,
    warning: Option<String>,
    attributes: Attributes,
    docs: Documentation,
    context: FileContext,
}

impl EventBuilder {
    pub(crate) fn new(name: impl Into<String>, context: FileContext) -> Self {
        Self {
            name: name.into().trim().to_string(),
            handler: DEFAULT_HANDLER.to_string(),
            access: None,
            is_static: false,
            explicit_interface: None,
            add: None,
            remove: None,
            warning: None,
            attributes: Attributes::default(),
            docs: Documentation::default(),
            context,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn handler(&self) -> &str {
        &self.handler
    }

    /// Delegate type of the event; `EventHandler` when unset.
    pub fn with_handler(&mut self, handler: impl Into<String>) -> &mut Self {
        self.handler = handler.into();
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

    /// Implement the event explicitly for `interface`, e.g.
    /// `event EventHandler INotify.Changed`.
    pub fn with_explicit_implementation(&mut self, interface: impl Into<String>) -> &mut Self {
        self.explicit_interface = Some(interface.into());
        self
    }

    pub fn with_add_expression(&mut self, expression: impl Into<String>) -> &mut Self {
        self.add = Some(Accessor::Expression(expression.into()));
        self
    }

    pub fn with_add_handler(&mut self, body: impl Fn(&mut CodeWriter) + 'static) -> &mut Self {
        self.add = Some(Accessor::Body(BodyWriter::new(body)));
        self
    }

    pub fn with_remove_expression(&mut self, expression: impl Into<String>) -> &mut Self {
        self.remove = Some(Accessor::Expression(expression.into()));
        self
    }

    pub fn with_remove_handler(&mut self, body: impl Fn(&mut CodeWriter) + 'static) -> &mut Self {
        self.remove = Some(Accessor::Body(BodyWriter::new(body)));
        self
    }

    /// Forward `add`/`remove` to another event or delegate field.
    pub fn with_backing_field(&mut self, field: &str) -> &mut Self {
        self.with_add_expression(format!("{} += value", field))
            .with_remove_expression(format!("{} -= value", field))
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

    pub fn add_namespace_import(&mut self, namespace: &str) -> &mut Self {
        self.context.add_namespace_import(namespace);
        self
    }
}

impl Renderable for EventBuilder {
    fn render(&self, writer: &mut CodeWriter) -> Result<()> {
        self.docs.render(writer);
        write_warning(writer, self.warning.as_deref());
        self.attributes.render(writer);

        let is_static = if self.is_static { "static" } else { "" };
        let output = match &self.explicit_interface {
            Some(interface) => {
                let name = format!("{}.{}", interface, self.name);
                declaration([is_static, "event", self.handler.as_str(), name.as_str()])
            }
            None => declaration([
                keyword(self.access),
                is_static,
                "event",
                self.handler.as_str(),
                self.name.as_str(),
            ]),
        };

        match (&self.add, &self.remove) {
            (Some(add), Some(remove)) => {
                let mut block = writer.block(&output);
                add.render("add", &mut block);
                remove.render("remove", &mut block);
            }
            _ => {
                writer.append_line(&format!("{};", output));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(name: &str) -> EventBuilder {
        EventBuilder::new(name, FileContext::new())
    }

    fn render(event: &EventBuilder) -> String {
        let mut writer = CodeWriter::spaces();
        event.render(&mut writer).unwrap();
        writer.render()
    }

    #[test]
    fn test_default_handler() {
        let mut e = event("Changed");
        e.public();
        assert_eq!(e.handler(), "EventHandler");
        assert_eq!(render(&e), "public event EventHandler Changed;\n");
    }

    #[test]
    fn test_static_custom_handler() {
        let mut e = event("Closed");
        e.internal()
            .make_static()
            .with_handler("EventHandler<CloseEventArgs>");
        assert_eq!(
            render(&e),
            "internal static event EventHandler<CloseEventArgs> Closed;\n"
        );
    }

    #[test]
    fn test_explicit_implementation_with_backing_field() {
        let mut e = event("PropertyChanged");
        e.public()
            .with_handler("PropertyChangedEventHandler")
            .with_explicit_implementation("INotifyPropertyChanged")
            .with_backing_field("_propertyChanged");

        assert_eq!(
            render(&e),
            "event PropertyChangedEventHandler INotifyPropertyChanged.PropertyChanged\n{\n    add => _propertyChanged += value;\n    remove => _propertyChanged -= value;\n}\n"
        );
    }

    #[test]
    fn test_single_accessor_is_not_written() {
        let mut e = event("Changed");
        e.public().with_add_expression("_changed += value");
        assert_eq!(render(&e), "public event EventHandler Changed;\n");
    }

    #[test]
    fn test_accessor_bodies() {
        let mut e = event("Changed");
        e.public()
            .with_add_handler(|w| {
                w.append_line("lock (_gate) _changed += value;");
            })
            .with_remove_handler(|w| {
                w.append_line("lock (_gate) _changed -= value;");
            });

        assert_eq!(
            render(&e),
            "public event EventHandler Changed\n{\n    add\n    {\n        lock (_gate) _changed += value;\n    }\n    remove\n    {\n        lock (_gate) _changed -= value;\n    }\n}\n"
        );
    }
}
