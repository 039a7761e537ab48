use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for builder operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("no {field} specified for '{member}'")]
    #[diagnostic(
        code(csforge::missing_field),
        help("set the {field} of '{member}' before building")
    )]
    MissingRequiredField { member: String, field: &'static str },

    #[error("generic parameter '{name}' already exists on '{owner}'")]
    #[diagnostic(
        code(csforge::duplicate_generic),
        help("generic parameters of one declaration need distinct names")
    )]
    DuplicateGenericParameter { owner: String, name: String },

    #[error("empty identifier for {context}")]
    #[diagnostic(code(csforge::empty_identifier))]
    EmptyIdentifier { context: String },

    #[error("'{member}' inherits its documentation, parameter docs cannot be added")]
    #[diagnostic(
        code(csforge::invalid_documentation),
        help("use a summary instead of inheritdoc to document parameters")
    )]
    InvalidDocumentationState { member: String },

    #[error("failed to parse options")]
    #[diagnostic(code(csforge::options))]
    Options {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },
}

impl Error {
    /// Create an options parse error from a toml error with source context
    pub fn options(source: toml::de::Error, src: &str, filename: &str) -> Box<Self> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Options {
            src: NamedSource::new(filename, src.to_string()),
            span,
            source,
        })
    }

    pub(crate) fn missing_field(member: impl Into<String>, field: &'static str) -> Box<Self> {
        Box::new(Error::MissingRequiredField {
            member: member.into(),
            field,
        })
    }

    pub(crate) fn duplicate_generic(owner: impl Into<String>, name: impl Into<String>) -> Box<Self> {
        Box::new(Error::DuplicateGenericParameter {
            owner: owner.into(),
            name: name.into(),
        })
    }

    pub(crate) fn empty_identifier(context: impl Into<String>) -> Box<Self> {
        Box::new(Error::EmptyIdentifier {
            context: context.into(),
        })
    }

    pub(crate) fn invalid_documentation(member: impl Into<String>) -> Box<Self> {
        Box::new(Error::InvalidDocumentationState {
            member: member.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            Error::missing_field("Name", "type").to_string(),
            "no type specified for 'Name'"
        );
        assert_eq!(
            Error::duplicate_generic("Box", "T").to_string(),
            "generic parameter 'T' already exists on 'Box'"
        );
        assert_eq!(
            Error::empty_identifier("generic parameter of 'Box'").to_string(),
            "empty identifier for generic parameter of 'Box'"
        );
    }

    #[test]
    fn test_options_error_has_span() {
        let src = "indent = ";
        let err = toml::from_str::<toml::Table>(src).unwrap_err();
        match *Error::options(err, src, "csforge.toml") {
            Error::Options { span, .. } => assert!(span.is_some()),
            other => panic!("expected options error, got {other:?}"),
        }
    }
}
