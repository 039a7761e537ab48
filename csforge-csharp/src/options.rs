//! File-level rendering options.

use csforge_writer::IndentStyle;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// How the file's namespace is declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NamespaceStyle {
    /// `namespace N { ... }` with types one level deep.
    #[default]
    Block,
    /// `namespace N;` with types at the top level.
    FileScoped,
}

/// State written by the `#nullable` directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NullableContext {
    Enable,
    Disable,
    Restore,
}

impl NullableContext {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Enable => "enable",
            Self::Disable => "disable",
            Self::Restore => "restore",
        }
    }
}

/// Options for a [`CodeBuilder`](crate::CodeBuilder).
///
/// Every field has a default, so an empty TOML document is valid:
///
/// ```toml
/// indent = "tabs"
/// namespace-style = "file-scoped"
/// nullable = "enable"
/// sort-properties = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct CodeBuilderOptions {
    pub indent: IndentStyle,
    pub namespace_style: NamespaceStyle,
    pub nullable: Option<NullableContext>,
    /// Sort fields and properties by name unless a class overrides it.
    pub sort_properties: bool,
}

impl Default for CodeBuilderOptions {
    fn default() -> Self {
        Self {
            indent: IndentStyle::default(),
            namespace_style: NamespaceStyle::default(),
            nullable: None,
            sort_properties: true,
        }
    }
}

impl CodeBuilderOptions {
    /// Parse options from TOML source.
    ///
    /// `filename` is only used to label diagnostics.
    pub fn from_toml(src: &str, filename: &str) -> Result<Self> {
        toml::from_str(src).map_err(|e| Error::options(e, src, filename))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = CodeBuilderOptions::default();
        assert_eq!(options.indent, IndentStyle::Spaces);
        assert_eq!(options.namespace_style, NamespaceStyle::Block);
        assert_eq!(options.nullable, None);
        assert!(options.sort_properties);
    }

    #[test]
    fn test_empty_document() {
        let options = CodeBuilderOptions::from_toml("", "csforge.toml").unwrap();
        assert_eq!(options, CodeBuilderOptions::default());
    }

    #[test]
    fn test_parse_all_fields() {
        let src = r#"
indent = "tabs"
namespace-style = "file-scoped"
nullable = "enable"
sort-properties = false
"#;
        let options = CodeBuilderOptions::from_toml(src, "csforge.toml").unwrap();
        assert_eq!(options.indent, IndentStyle::Tabs);
        assert_eq!(options.namespace_style, NamespaceStyle::FileScoped);
        assert_eq!(options.nullable, Some(NullableContext::Enable));
        assert!(!options.sort_properties);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let err = CodeBuilderOptions::from_toml("indent-size = 2", "csforge.toml").unwrap_err();
        assert!(matches!(*err, Error::Options { .. }));
    }

    #[test]
    fn test_invalid_value_is_rejected() {
        let err = CodeBuilderOptions::from_toml("nullable = \"maybe\"", "opts.toml").unwrap_err();
        assert!(matches!(*err, Error::Options { .. }));
    }

    #[test]
    fn test_nullable_as_str() {
        assert_eq!(NullableContext::Enable.as_str(), "enable");
        assert_eq!(NullableContext::Restore.as_str(), "restore");
    }
}
