//! Indentation configuration for generated code.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Indentation unit used for every level of generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndentStyle {
    /// Four spaces per level.
    #[default]
    Spaces,
    /// One tab character per level.
    Tabs,
}

impl IndentStyle {
    /// The string written for one indent level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spaces => "    ",
            Self::Tabs => "\t",
        }
    }

    /// The prefix for `levels` levels of indentation.
    pub fn prefix(&self, levels: usize) -> String {
        self.as_str().repeat(levels)
    }

    /// The name used in configuration files and on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Spaces => "spaces",
            Self::Tabs => "tabs",
        }
    }
}

impl fmt::Display for IndentStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IndentStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "spaces" | "space" => Ok(Self::Spaces),
            "tabs" | "tab" => Ok(Self::Tabs),
            _ => Err(format!(
                "unknown indent style '{}', expected 'spaces' or 'tabs'",
                s
            )),
        }
    }
}
