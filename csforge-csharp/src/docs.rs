//! XML documentation comments.

use csforge_writer::CodeWriter;
use indexmap::IndexMap;

use crate::{Error, Result};

/// Documentation attached to a declaration.
///
/// Either a `<summary>` with optional `<param>` entries, or an
/// `<inheritdoc />` reference. Switching to inheritdoc drops any summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Documentation {
    state: Option<DocState>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum DocState {
    Summary {
        summary: Option<String>,
        params: IndexMap<String, String>,
    },
    Inherit {
        cref: Option<String>,
    },
}

impl Documentation {
    /// Set the summary, keeping parameter docs already added.
    pub fn set_summary(&mut self, summary: impl Into<String>) {
        let summary = Some(summary.into());
        match &mut self.state {
            Some(DocState::Summary { summary: current, .. }) => *current = summary,
            _ => {
                self.state = Some(DocState::Summary {
                    summary,
                    params: IndexMap::new(),
                })
            }
        }
    }

    /// Replace the documentation with `<inheritdoc />`.
    pub fn set_inherit(&mut self, cref: Option<String>) {
        self.state = Some(DocState::Inherit { cref });
    }

    /// Document a parameter of `member`.
    ///
    /// Fails when the documentation was already set to inheritdoc.
    pub fn add_param(
        &mut self,
        member: &str,
        name: impl Into<String>,
        doc: impl Into<String>,
    ) -> Result<()> {
        let state = self.state.get_or_insert_with(|| DocState::Summary {
            summary: None,
            params: IndexMap::new(),
        });
        match state {
            DocState::Summary { params, .. } => {
                params.insert(name.into(), doc.into());
                Ok(())
            }
            DocState::Inherit { .. } => Err(Error::invalid_documentation(member)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_none()
    }

    pub fn is_inherited(&self) -> bool {
        matches!(self.state, Some(DocState::Inherit { .. }))
    }

    /// Write the comment lines.
    pub fn render(&self, writer: &mut CodeWriter) {
        self.render_params(writer, None);
    }

    /// Write the comment lines, keeping only `<param>` entries whose name
    /// is in `parameters`.
    pub fn render_for<'a>(
        &self,
        writer: &mut CodeWriter,
        parameters: impl IntoIterator<Item = &'a str>,
    ) {
        let known: Vec<&str> = parameters.into_iter().collect();
        self.render_params(writer, Some(&known));
    }

    fn render_params(&self, writer: &mut CodeWriter, known: Option<&[&str]>) {
        match &self.state {
            None => {}
            Some(DocState::Inherit { cref: None }) => {
                writer.append_line("/// <inheritdoc />");
            }
            Some(DocState::Inherit { cref: Some(cref) }) => {
                writer.append_line(&format!("/// <inheritdoc cref=\"{}\" />", cref));
            }
            Some(DocState::Summary { summary, params }) => {
                if let Some(summary) = summary {
                    writer.append_line("/// <summary>");
                    for line in summary.lines() {
                        writer.append_line(&format!("/// {}", line.trim()));
                    }
                    writer.append_line("/// </summary>");
                }
                for (name, doc) in params {
                    if known.is_some_and(|known| !known.contains(&name.as_str())) {
                        continue;
                    }
                    writer.append_line(&format!("/// <param name=\"{}\">{}</param>", name, doc));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(docs: &Documentation) -> String {
        let mut writer = CodeWriter::spaces();
        docs.render(&mut writer);
        writer.render()
    }

    #[test]
    fn test_empty() {
        let docs = Documentation::default();
        assert!(docs.is_empty());
        assert_eq!(render(&docs), "");
    }

    #[test]
    fn test_summary_lines() {
        let mut docs = Documentation::default();
        docs.set_summary("First line.\n\nThird line.");
        assert_eq!(
            render(&docs),
            "/// <summary>\n/// First line.\n///\n/// Third line.\n/// </summary>\n"
        );
    }

    #[test]
    fn test_inheritdoc() {
        let mut docs = Documentation::default();
        docs.set_summary("Dropped.");
        docs.set_inherit(None);
        assert!(docs.is_inherited());
        assert_eq!(render(&docs), "/// <inheritdoc />\n");

        docs.set_inherit(Some("IWidget.Run".into()));
        assert_eq!(render(&docs), "/// <inheritdoc cref=\"IWidget.Run\" />\n");
    }

    #[test]
    fn test_params_keep_summary() {
        let mut docs = Documentation::default();
        docs.add_param("Run", "count", "How many times.").unwrap();
        docs.set_summary("Runs the widget.");

        assert_eq!(
            render(&docs),
            "/// <summary>\n/// Runs the widget.\n/// </summary>\n/// <param name=\"count\">How many times.</param>\n"
        );
    }

    #[test]
    fn test_param_on_inheritdoc_fails() {
        let mut docs = Documentation::default();
        docs.set_inherit(None);
        let err = docs.add_param("Run", "count", "ignored").unwrap_err();
        assert!(matches!(*err, Error::InvalidDocumentationState { .. }));
        assert_eq!(render(&docs), "/// <inheritdoc />\n");
    }

    #[test]
    fn test_unknown_params_filtered() {
        let mut docs = Documentation::default();
        docs.add_param("Run", "count", "Count.").unwrap();
        docs.add_param("Run", "stale", "Removed parameter.").unwrap();

        let mut writer = CodeWriter::spaces();
        docs.render_for(&mut writer, ["count"]);
        assert_eq!(
            writer.render(),
            "/// <param name=\"count\">Count.</param>\n"
        );
    }
}
