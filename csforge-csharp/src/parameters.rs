//! Method, constructor and delegate parameters.

use std::fmt;

/// A single parameter, e.g. `string name = null`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    ty: String,
    name: String,
    default: Option<String>,
}

impl Parameter {
    /// Create a parameter. A missing or blank name is derived from the
    /// type: `CancellationToken` becomes `cancellationToken`.
    pub fn new(ty: impl Into<String>, name: Option<&str>) -> Self {
        let ty = ty.into().trim().to_string();
        let name = match name.map(str::trim).filter(|n| !n.is_empty()) {
            Some(name) => name.to_string(),
            None => derive_name(&ty),
        };
        Self {
            ty,
            name,
            default: None,
        }
    }

    /// Set the default value written after `=`.
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn ty(&self) -> &str {
        &self.ty
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn default_value(&self) -> Option<&str> {
        self.default.as_deref()
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.ty, self.name)?;
        if let Some(default) = &self.default {
            write!(f, " = {}", default)?;
        }
        Ok(())
    }
}

/// Reserved C# keywords, which need an `@` prefix to be used as identifiers.
const KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while",
];

/// lowerCamel name from the last identifier of a type name, escaped with
/// `@` when it is a keyword.
fn derive_name(ty: &str) -> String {
    let ty = ty.strip_prefix("global::").unwrap_or(ty);
    let ty = ty.split('<').next().unwrap_or(ty);
    let ident = ty.rsplit('.').next().unwrap_or(ty);
    let ident: String = ident
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_')
        .collect();

    let mut chars = ident.chars();
    let name: String = match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    };

    if KEYWORDS.contains(&name.as_str()) {
        format!("@{}", name)
    } else {
        name
    }
}

/// Builders that carry a parameter list.
///
/// Adding a parameter whose type and name match an existing one is a
/// no-op.
pub trait Parameterized {
    fn parameters(&self) -> &[Parameter];

    fn parameters_mut(&mut self) -> &mut Vec<Parameter>;

    /// Add a parameter named after its type.
    fn add_parameter(&mut self, ty: &str) -> &mut Self {
        self.insert_parameter(Parameter::new(ty, None), None)
    }

    fn add_named_parameter(&mut self, ty: &str, name: &str) -> &mut Self {
        self.insert_parameter(Parameter::new(ty, Some(name)), None)
    }

    /// Add a parameter with a default value.
    fn add_parameter_with_default(
        &mut self,
        ty: &str,
        name: Option<&str>,
        default: &str,
    ) -> &mut Self {
        self.insert_parameter(Parameter::new(ty, name).with_default(default), None)
    }

    /// Add a parameter defaulting to `null`.
    fn add_parameter_with_null(&mut self, ty: &str, name: Option<&str>) -> &mut Self {
        self.add_parameter_with_default(ty, name, "null")
    }

    /// Add a parameter at `index`, or at the end when `index` is `None`
    /// or past the end.
    fn insert_parameter(&mut self, parameter: Parameter, index: Option<usize>) -> &mut Self {
        let parameters = self.parameters_mut();
        let exists = parameters
            .iter()
            .any(|p| p.ty == parameter.ty && p.name == parameter.name);
        if !exists && !parameter.ty.is_empty() {
            match index {
                Some(index) if index <= parameters.len() => parameters.insert(index, parameter),
                _ => parameters.push(parameter),
            }
        }
        self
    }

    /// `Type a, Type b = 1`
    fn parameter_list(&self) -> String {
        self.parameters()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
