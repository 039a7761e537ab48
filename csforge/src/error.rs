use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for manifest operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(code(csforge::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse manifest")]
    #[diagnostic(code(csforge::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid member '{member}': {reason}")]
    #[diagnostic(code(csforge::invalid_member))]
    InvalidMember { member: String, reason: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Builder(csforge_csharp::Error),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Box<Self> {
        Box::new(Error::Io {
            path: path.into(),
            source,
        })
    }

    /// Create a parse error from a toml error with source context
    pub fn parse(source: toml::de::Error, src: &str, filename: &str) -> Box<Self> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: NamedSource::new(filename, src.to_string()),
            span,
            source,
        })
    }

    pub fn invalid_member(member: impl Into<String>, reason: impl Into<String>) -> Box<Self> {
        Box::new(Error::InvalidMember {
            member: member.into(),
            reason: reason.into(),
        })
    }

    pub fn builder(source: Box<csforge_csharp::Error>) -> Box<Self> {
        Box::new(Error::Builder(*source))
    }
}
