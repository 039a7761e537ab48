//! Namespace imports and assembly attributes shared by every builder of a file.

use std::{cell::RefCell, rc::Rc};

use indexmap::IndexSet;

/// Shared sink for file-level declarations.
///
/// Cloning a `FileContext` clones the handle, not the contents: every
/// builder created from a [`CodeBuilder`](crate::CodeBuilder) writes into
/// the same imports and assembly attributes.
#[derive(Debug, Clone, Default)]
pub struct FileContext {
    state: Rc<RefCell<ContextState>>,
}

#[derive(Debug, Default)]
struct ContextState {
    imports: IndexSet<String>,
    assembly_attributes: IndexSet<String>,
}

impl FileContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a namespace import.
    ///
    /// Accepts `System.Linq`, `using System.Linq;`, aliases
    /// (`Json = System.Text.Json`) and `static System.Math`. Returns
    /// `false` when the import was empty or already registered.
    pub fn add_namespace_import(&self, namespace: &str) -> bool {
        match normalize_import(namespace) {
            Some(import) => self.state.borrow_mut().imports.insert(import),
            None => false,
        }
    }

    /// Register the namespace of a dotted type name, e.g. `Foo.Bar` for
    /// `Foo.Bar.IBaz<int>`. Names without a namespace are ignored.
    pub fn add_import_for_type(&self, type_name: &str) -> bool {
        match containing_namespace(type_name) {
            Some(namespace) => self.add_namespace_import(namespace),
            None => false,
        }
    }

    /// Register an assembly-level attribute body or full `[assembly: X]` line.
    pub fn add_assembly_attribute(&self, attribute: &str) -> bool {
        let attribute = attribute.trim();
        if attribute.is_empty() {
            return false;
        }
        self.state
            .borrow_mut()
            .assembly_attributes
            .insert(attribute.to_string())
    }

    /// Registered imports in insertion order.
    pub fn imports(&self) -> Vec<String> {
        self.state.borrow().imports.iter().cloned().collect()
    }

    /// Registered imports partitioned for rendering.
    pub fn import_groups(&self) -> ImportGroups {
        ImportGroups::new(self.state.borrow().imports.iter().map(String::as_str))
    }

    /// Assembly attribute lines, formatted, deduplicated and sorted.
    pub fn assembly_attributes(&self) -> Vec<String> {
        let formatted: IndexSet<String> = self
            .state
            .borrow()
            .assembly_attributes
            .iter()
            .filter_map(|attribute| format_assembly_attribute(attribute))
            .collect();
        let mut attributes: Vec<String> = formatted.into_iter().collect();
        attributes.sort();
        attributes
    }
}

/// Imports split into the groups they are written in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportGroups {
    /// `System` and `System.*`
    pub system: Vec<String>,
    /// Every other plain namespace
    pub plain: Vec<String>,
    /// `Alias = Namespace.Type`
    pub aliases: Vec<String>,
    /// Anything else, e.g. `static System.Math`
    pub other: Vec<String>,
}

impl ImportGroups {
    pub fn new<'a>(imports: impl IntoIterator<Item = &'a str>) -> Self {
        let mut groups = Self::default();
        for import in imports {
            let target = if import.contains('=') {
                &mut groups.aliases
            } else if import.starts_with("static ") {
                &mut groups.other
            } else if root_segment(import) == "System" {
                &mut groups.system
            } else {
                &mut groups.plain
            };
            target.push(import.to_string());
        }

        for group in [
            &mut groups.system,
            &mut groups.plain,
            &mut groups.aliases,
            &mut groups.other,
        ] {
            group.sort();
            group.dedup();
        }
        groups
    }

    /// All imports in output order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.system
            .iter()
            .chain(&self.plain)
            .chain(&self.aliases)
            .chain(&self.other)
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn len(&self) -> usize {
        self.system.len() + self.plain.len() + self.aliases.len() + self.other.len()
    }
}

fn normalize_import(raw: &str) -> Option<String> {
    let import = raw.trim();
    let import = import.strip_prefix("using ").unwrap_or(import);
    let import = import.trim().trim_end_matches(';').trim();
    (!import.is_empty()).then(|| import.to_string())
}

fn root_segment(import: &str) -> &str {
    import.split('.').next().unwrap_or(import).trim()
}

fn containing_namespace(type_name: &str) -> Option<&str> {
    let name = type_name.trim();
    let name = name.strip_prefix("global::").unwrap_or(name);
    let name = name.split('<').next().unwrap_or(name);
    name.rsplit_once('.')
        .map(|(namespace, _)| namespace)
        .filter(|namespace| !namespace.is_empty())
}

fn format_assembly_attribute(attribute: &str) -> Option<String> {
    let attribute = attribute.trim();
    if attribute.starts_with("[assembly:") {
        return Some(attribute.to_string());
    }

    let body = attribute.strip_prefix('[').unwrap_or(attribute);
    let body = body.strip_suffix(']').unwrap_or(body);
    let body = body.trim();
    let body = body.strip_prefix("assembly:").unwrap_or(body).trim();
    (!body.is_empty()).then(|| format!("[assembly: {}]", body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_import() {
        assert_eq!(normalize_import("System.Linq"), Some("System.Linq".into()));
        assert_eq!(
            normalize_import("using System.Linq;"),
            Some("System.Linq".into())
        );
        assert_eq!(normalize_import("  Foo.Bar ; "), Some("Foo.Bar".into()));
        assert_eq!(normalize_import("using ;"), None);
        assert_eq!(normalize_import("   "), None);
    }

    #[test]
    fn test_imports_deduplicated() {
        let context = FileContext::new();
        assert!(context.add_namespace_import("System"));
        assert!(!context.add_namespace_import("using System;"));
        assert!(!context.add_namespace_import(""));
        assert_eq!(context.imports(), vec!["System".to_string()]);
    }

    #[test]
    fn test_clones_share_state() {
        let context = FileContext::new();
        let child = context.clone();
        child.add_namespace_import("Foo.Bar");
        child.add_assembly_attribute("InternalsVisibleTo(\"Tests\")");

        assert_eq!(context.imports(), vec!["Foo.Bar".to_string()]);
        assert_eq!(context.assembly_attributes().len(), 1);
    }

    #[test]
    fn test_import_groups() {
        let groups = ImportGroups::new([
            "Foo.Bar",
            "System.Collections.Generic",
            "System",
            "Baz = Qux.Quux",
            "static System.Math",
            "Systems.Custom",
        ]);

        assert_eq!(groups.system, vec!["System", "System.Collections.Generic"]);
        assert_eq!(groups.plain, vec!["Foo.Bar", "Systems.Custom"]);
        assert_eq!(groups.aliases, vec!["Baz = Qux.Quux"]);
        assert_eq!(groups.other, vec!["static System.Math"]);
        assert_eq!(groups.len(), 6);

        let ordered: Vec<&str> = groups.iter().collect();
        assert_eq!(
            ordered,
            vec![
                "System",
                "System.Collections.Generic",
                "Foo.Bar",
                "Systems.Custom",
                "Baz = Qux.Quux",
                "static System.Math",
            ]
        );
    }

    #[test]
    fn test_import_for_type() {
        let context = FileContext::new();
        assert!(context.add_import_for_type("Foo.Bar.IBaz<System.Int32>"));
        assert!(context.add_import_for_type("global::Acme.Widgets.Widget"));
        assert!(!context.add_import_for_type("IDisposable"));
        assert_eq!(context.imports(), vec!["Foo.Bar", "Acme.Widgets"]);
    }

    #[test]
    fn test_assembly_attributes() {
        let context = FileContext::new();
        context.add_assembly_attribute("InternalsVisibleTo(\"Tests\")");
        context.add_assembly_attribute("[assembly: AssemblyVersion(\"1.0\")]");
        context.add_assembly_attribute("[InternalsVisibleTo(\"Tests\")]");
        context.add_assembly_attribute("  ");

        assert_eq!(
            context.assembly_attributes(),
            vec![
                "[assembly: AssemblyVersion(\"1.0\")]".to_string(),
                "[assembly: InternalsVisibleTo(\"Tests\")]".to_string(),
            ]
        );
    }
}
