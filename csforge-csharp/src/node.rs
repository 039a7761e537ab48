//! The protocol every emittable declaration implements.

use std::{fmt, rc::Rc};

use csforge_writer::CodeWriter;

use crate::Result;

/// A declaration that writes itself into a [`CodeWriter`].
///
/// Containers call this for each member in render order. Rendering never
/// mutates the node, so a tree can be rendered any number of times.
pub trait Renderable {
    fn render(&self, writer: &mut CodeWriter) -> Result<()>;
}

/// Blanket implementation for references.
impl<T: Renderable + ?Sized> Renderable for &T {
    fn render(&self, writer: &mut CodeWriter) -> Result<()> {
        (*self).render(writer)
    }
}

/// Blanket implementation for Box.
impl<T: Renderable + ?Sized> Renderable for Box<T> {
    fn render(&self, writer: &mut CodeWriter) -> Result<()> {
        self.as_ref().render(writer)
    }
}

/// Caller-supplied writer for a method, accessor or constructor body.
#[derive(Clone)]
pub struct BodyWriter(Rc<dyn Fn(&mut CodeWriter)>);

impl BodyWriter {
    pub fn new(body: impl Fn(&mut CodeWriter) + 'static) -> Self {
        Self(Rc::new(body))
    }

    /// A body made of fixed lines.
    pub fn lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines: Vec<String> = lines.into_iter().map(Into::into).collect();
        Self::new(move |writer| {
            for line in &lines {
                writer.append_line(line);
            }
        })
    }

    pub fn write(&self, writer: &mut CodeWriter) {
        (self.0)(writer)
    }
}

impl fmt::Debug for BodyWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BodyWriter(..)")
    }
}

/// Accessor of a property or event: `get => x;` or `get { ... }`.
#[derive(Debug, Clone)]
pub enum Accessor {
    Expression(String),
    Body(BodyWriter),
}

impl Accessor {
    pub(crate) fn render(&self, keyword: &str, writer: &mut CodeWriter) {
        match self {
            Self::Expression(expression) => {
                writer.append_line(&format!("{} => {};", keyword, expression));
            }
            Self::Body(body) => {
                let mut block = writer.block(keyword);
                body.write(&mut *block);
            }
        }
    }
}

/// Adapter for passing nodes to [`Sections::section`](csforge_writer::Sections::section).
pub(crate) fn render_node<T: Renderable>(writer: &mut CodeWriter, node: T) -> Result<()> {
    node.render(writer)
}

/// Join the non-empty words of a declaration with single spaces.
pub(crate) fn declaration<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    parts
        .into_iter()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Write a bodiless declaration ending in `;`.
///
/// `where` clauses go on continuation lines with the last one terminated.
pub(crate) fn write_terminated(writer: &mut CodeWriter, declaration: &str, clauses: &[String]) {
    let Some((last, init)) = clauses.split_last() else {
        writer.append_line(&format!("{};", declaration));
        return;
    };

    writer.append_line(declaration);
    writer.increase_indent();
    for clause in init {
        writer.append_line(clause);
    }
    writer.append_line(&format!("{};", last));
    writer.decrease_indent();
}

pub(crate) fn write_warning(writer: &mut CodeWriter, warning: Option<&str>) {
    if let Some(warning) = warning {
        writer.append_line(&format!("#warning {}", warning));
    }
}
