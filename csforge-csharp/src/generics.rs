//! Generic type parameters and their `where` clauses.

use crate::{Error, Result};

const PRIMARY_CONSTRAINTS: &[&str] = &["class", "class?", "struct", "notnull", "unmanaged"];

/// One generic parameter, e.g. `T` in `Box<T> where T : class, new()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericParameter {
    name: String,
    primary: Option<String>,
    constraints: Vec<String>,
    requires_new: bool,
}

impl GenericParameter {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            primary: None,
            constraints: Vec::new(),
            requires_new: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a constraint.
    ///
    /// `class`, `struct`, `notnull` and `unmanaged` replace the primary
    /// constraint, `new()` is always written last, and duplicates or blank
    /// constraints are ignored.
    pub fn constraint(&mut self, constraint: &str) -> &mut Self {
        let constraint = constraint.trim();
        if constraint == "new()" {
            self.requires_new = true;
        } else if PRIMARY_CONSTRAINTS.contains(&constraint) {
            self.primary = Some(constraint.to_string());
        } else if !constraint.is_empty() && !self.constraints.iter().any(|c| c == constraint) {
            self.constraints.push(constraint.to_string());
        }
        self
    }

    /// `where T : class`
    pub fn class(&mut self) -> &mut Self {
        self.constraint("class")
    }

    /// `where T : struct`
    pub fn value_type(&mut self) -> &mut Self {
        self.constraint("struct")
    }

    /// `where T : new()`
    pub fn new_constraint(&mut self) -> &mut Self {
        self.requires_new = true;
        self
    }

    /// The `where` clause, or `None` when unconstrained.
    pub fn where_clause(&self) -> Option<String> {
        let parts: Vec<&str> = self
            .primary
            .as_deref()
            .into_iter()
            .chain(self.constraints.iter().map(String::as_str))
            .chain(self.requires_new.then_some("new()"))
            .collect();

        (!parts.is_empty()).then(|| format!("where {} : {}", self.name, parts.join(", ")))
    }
}

/// Ordered generic parameters of a declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Generics {
    params: Vec<GenericParameter>,
}

impl Generics {
    /// Add a parameter to `owner`, configured by `configure`.
    ///
    /// Nothing is added when the name is blank or already taken.
    pub fn add(
        &mut self,
        owner: &str,
        name: &str,
        configure: impl FnOnce(&mut GenericParameter),
    ) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::empty_identifier(format!(
                "generic parameter of '{}'",
                owner
            )));
        }
        if self.params.iter().any(|p| p.name == name) {
            return Err(Error::duplicate_generic(owner, name));
        }

        let mut param = GenericParameter::new(name);
        configure(&mut param);
        self.params.push(param);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &GenericParameter> {
        self.params.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// `<T, U>`, or an empty string without parameters.
    pub fn suffix(&self) -> String {
        if self.params.is_empty() {
            return String::new();
        }
        let names: Vec<&str> = self.params.iter().map(|p| p.name.as_str()).collect();
        format!("<{}>", names.join(", "))
    }

    /// `where` clauses of constrained parameters, in declaration order.
    pub fn where_clauses(&self) -> Vec<String> {
        self.params.iter().filter_map(|p| p.where_clause()).collect()
    }
}
