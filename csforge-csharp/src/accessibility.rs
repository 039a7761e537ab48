use std::fmt;

use serde::{Deserialize, Serialize};

/// C# accessibility levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Accessibility {
    Public,
    Internal,
    Protected,
    Private,
    ProtectedInternal,
    PrivateProtected,
}

impl Accessibility {
    /// The keyword(s) written in a declaration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Internal => "internal",
            Self::Protected => "protected",
            Self::Private => "private",
            Self::ProtectedInternal => "protected internal",
            Self::PrivateProtected => "private protected",
        }
    }
}

impl fmt::Display for Accessibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keyword for an optional accessibility; unset writes nothing.
pub(crate) fn keyword(access: Option<Accessibility>) -> &'static str {
    access.map(|a| a.as_str()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords() {
        assert_eq!(Accessibility::Public.as_str(), "public");
        assert_eq!(
            Accessibility::ProtectedInternal.to_string(),
            "protected internal"
        );
        assert_eq!(Accessibility::PrivateProtected.as_str(), "private protected");
    }

    #[test]
    fn test_unset_is_empty() {
        assert_eq!(keyword(None), "");
        assert_eq!(keyword(Some(Accessibility::Internal)), "internal");
    }

    #[test]
    fn test_deserialize() {
        #[derive(Deserialize)]
        struct Member {
            access: Accessibility,
        }

        let member: Member = toml::from_str("access = \"protected-internal\"").unwrap();
        assert_eq!(member.access, Accessibility::ProtectedInternal);
    }
}
