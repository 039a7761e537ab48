//! Blank-line discipline for groups of members.

use crate::CodeWriter;

/// Separation between the items of one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spacing {
    /// Items follow each other directly.
    Grouped,
    /// One blank line between items.
    Spaced,
}

/// Writes groups of items in call order.
///
/// Empty groups write nothing. Two non-empty groups are separated by
/// exactly one blank line, with no blank line before the first group or
/// after the last one.
///
/// ```
/// use std::convert::Infallible;
/// use csforge_writer::{CodeWriter, Sections, Spacing};
///
/// let mut writer = CodeWriter::spaces();
/// let line = |w: &mut CodeWriter, s: &str| -> Result<(), Infallible> {
///     w.append_line(s);
///     Ok(())
/// };
///
/// Sections::new(&mut writer)
///     .section(["const int A = 1;", "const int B = 2;"], Spacing::Grouped, line)?
///     .section(Vec::<&str>::new(), Spacing::Spaced, line)?
///     .section(["void M() { }"], Spacing::Spaced, line)?;
///
/// assert_eq!(
///     writer.render(),
///     "const int A = 1;\nconst int B = 2;\n\nvoid M() { }\n"
/// );
/// # Ok::<(), Infallible>(())
/// ```
#[derive(Debug)]
pub struct Sections<'w> {
    writer: &'w mut CodeWriter,
    had_output: bool,
}

impl<'w> Sections<'w> {
    pub fn new(writer: &'w mut CodeWriter) -> Self {
        Self {
            writer,
            had_output: false,
        }
    }

    /// Write one group. The first error from `write` stops the group.
    pub fn section<T, E, I, F>(
        &mut self,
        items: I,
        spacing: Spacing,
        mut write: F,
    ) -> Result<&mut Self, E>
    where
        I: IntoIterator<Item = T>,
        F: FnMut(&mut CodeWriter, T) -> Result<(), E>,
    {
        let mut wrote_any = false;
        for item in items {
            if wrote_any {
                if spacing == Spacing::Spaced {
                    self.writer.new_line();
                }
            } else if self.had_output {
                self.writer.new_line();
            }
            write(&mut *self.writer, item)?;
            wrote_any = true;
        }

        self.had_output |= wrote_any;
        Ok(self)
    }

    /// Whether any group has written output so far.
    pub fn had_output(&self) -> bool {
        self.had_output
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use super::*;

    fn line(writer: &mut CodeWriter, text: &str) -> Result<(), Infallible> {
        writer.append_line(text);
        Ok(())
    }

    #[test]
    fn test_grouped_items() {
        let mut writer = CodeWriter::spaces();
        Sections::new(&mut writer)
            .section(["a;", "b;"], Spacing::Grouped, line)
            .unwrap();
        assert_eq!(writer.render(), "a;\nb;\n");
    }

    #[test]
    fn test_spaced_items() {
        let mut writer = CodeWriter::spaces();
        Sections::new(&mut writer)
            .section(["a;", "b;", "c;"], Spacing::Spaced, line)
            .unwrap();
        assert_eq!(writer.render(), "a;\n\nb;\n\nc;\n");
    }

    #[test]
    fn test_empty_groups_write_nothing() {
        let mut writer = CodeWriter::spaces();
        let mut sections = Sections::new(&mut writer);
        sections
            .section(Vec::<&str>::new(), Spacing::Spaced, line)
            .unwrap()
            .section(["a;"], Spacing::Grouped, line)
            .unwrap()
            .section(Vec::<&str>::new(), Spacing::Grouped, line)
            .unwrap()
            .section(["b;"], Spacing::Grouped, line)
            .unwrap()
            .section(Vec::<&str>::new(), Spacing::Spaced, line)
            .unwrap();
        assert!(sections.had_output());

        assert_eq!(writer.render(), "a;\n\nb;\n");
    }

    #[test]
    fn test_no_groups() {
        let mut writer = CodeWriter::spaces();
        let sections = Sections::new(&mut writer);
        assert!(!sections.had_output());
        assert_eq!(writer.render(), "");
    }

    #[test]
    fn test_error_stops_pass() {
        let mut writer = CodeWriter::spaces();
        let result = Sections::new(&mut writer)
            .section(["ok", "bad", "never"], Spacing::Grouped, |w, item| {
                if item == "bad" {
                    return Err("bad item");
                }
                w.append_line(item);
                Ok(())
            })
            .map(|_| ());

        assert_eq!(result, Err("bad item"));
        assert_eq!(writer.render(), "ok\n");
    }

    #[test]
    fn test_sections_inside_block() {
        let mut writer = CodeWriter::spaces();
        {
            let mut block = writer.block("class A");
            Sections::new(&mut block)
                .section(["int a;"], Spacing::Grouped, line)
                .unwrap()
                .section(["void B() { }"], Spacing::Spaced, line)
                .unwrap();
        }
        assert_eq!(
            writer.render(),
            "class A\n{\n    int a;\n\n    void B() { }\n}\n"
        );
    }
}
