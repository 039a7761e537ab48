//! Indentation-tracking writer for brace-delimited code.

use std::fmt;

use log::trace;

use crate::{Block, IndentStyle};

#[derive(Debug, Clone)]
enum Segment {
    Text(String),
    Nested(CodeWriter),
}

/// Handle to a sub-writer created by [`CodeWriter::sub_writer`].
///
/// Only meaningful for the writer that returned it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubWriterId(usize);

/// Accumulates lines of code with block-aware indentation.
///
/// Two counters drive the indent prefix: the block depth, which moves with
/// [`block`](Self::block) scopes, and the extra indent, which callers move
/// by hand for continuation lines. Every line is prefixed with one
/// [`IndentStyle`] unit per level of both.
///
/// # Example
///
/// ```
/// use csforge_writer::CodeWriter;
///
/// let mut writer = CodeWriter::spaces();
/// {
///     let mut class = writer.block("public class Widget");
///     class.append_line("public string Name { get; set; }");
/// }
///
/// assert_eq!(
///     writer.render(),
///     "public class Widget\n{\n    public string Name { get; set; }\n}\n"
/// );
/// ```
///
/// # Sub-writers
///
/// A sub-writer reserves a position in the output and is filled later,
/// which lets independent pieces be written out of order:
///
/// ```
/// use csforge_writer::{CodeWriter, IndentStyle};
///
/// let mut writer = CodeWriter::new(IndentStyle::Tabs);
/// let then = writer.sub_writer(Some("if (ready)"));
/// let otherwise = writer.sub_writer(Some("else"));
///
/// writer.sub_writer_mut(otherwise).unwrap().append_line("Wait();");
/// writer.sub_writer_mut(then).unwrap().append_line("Go();");
///
/// assert_eq!(
///     writer.render(),
///     "if (ready)\n{\n\tGo();\n}\nelse\n{\n\tWait();\n}\n"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct CodeWriter {
    style: IndentStyle,
    segments: Vec<Segment>,
    buffer: String,
    base_depth: usize,
    extra_indent: usize,
    open_blocks: Vec<usize>,
    next_block: usize,
}

impl CodeWriter {
    /// Create an empty writer with the given indentation unit.
    pub fn new(style: IndentStyle) -> Self {
        Self::with_base_depth(style, 0)
    }

    /// Create an empty writer with 4-space indentation.
    pub fn spaces() -> Self {
        Self::new(IndentStyle::Spaces)
    }

    /// Create an empty writer with tab indentation.
    pub fn tabs() -> Self {
        Self::new(IndentStyle::Tabs)
    }

    fn with_base_depth(style: IndentStyle, base_depth: usize) -> Self {
        Self {
            style,
            segments: Vec::new(),
            buffer: String::new(),
            base_depth,
            extra_indent: 0,
            open_blocks: Vec::new(),
            next_block: 0,
        }
    }

    /// The indentation unit of this writer.
    pub fn style(&self) -> IndentStyle {
        self.style
    }

    /// Current block depth, including any depth inherited from a parent.
    pub fn depth(&self) -> usize {
        self.base_depth + self.open_blocks.len()
    }

    /// Current manual indent on top of the block depth.
    pub fn extra_indent(&self) -> usize {
        self.extra_indent
    }

    /// Whether nothing has been written to this writer or its sub-writers.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
            && self.segments.iter().all(|segment| match segment {
                Segment::Text(text) => text.is_empty(),
                Segment::Nested(writer) => writer.is_empty(),
            })
    }

    // =========================================================================
    // Text
    // =========================================================================

    /// Append indented text without a newline. Trailing whitespace is trimmed.
    pub fn append(&mut self, text: &str) -> &mut Self {
        let text = text.trim_end();
        if !text.is_empty() {
            self.write_indent();
            self.buffer.push_str(text);
        }
        self
    }

    /// Append text with no indentation and no newline.
    pub fn append_unindented(&mut self, text: &str) -> &mut Self {
        self.buffer.push_str(text.trim_end());
        self
    }

    /// Append an indented line.
    pub fn append_line(&mut self, text: &str) -> &mut Self {
        self.append(text);
        self.buffer.push('\n');
        self
    }

    /// Append a line with no indentation, e.g. to finish a partial line.
    pub fn append_unindented_line(&mut self, text: &str) -> &mut Self {
        self.append_unindented(text);
        self.buffer.push('\n');
        self
    }

    /// Append a bare newline.
    pub fn new_line(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    /// Indent following lines by one more unit without opening a block.
    pub fn increase_indent(&mut self) -> &mut Self {
        self.extra_indent += 1;
        self
    }

    /// Undo one [`increase_indent`](Self::increase_indent).
    pub fn decrease_indent(&mut self) -> &mut Self {
        debug_assert!(
            self.extra_indent > 0,
            "decrease_indent called without a matching increase_indent"
        );
        self.extra_indent = self.extra_indent.saturating_sub(1);
        self
    }

    // =========================================================================
    // Blocks
    // =========================================================================

    /// Open a `{ ... }` block under `header`.
    ///
    /// The returned guard writes the closing brace when it is closed or
    /// dropped.
    pub fn block(&mut self, header: &str) -> Block<'_> {
        self.block_with(header, std::iter::empty::<&str>())
    }

    /// Open a block with continuation lines between the header and the brace.
    ///
    /// Each non-empty constraint (a `where` clause, a `: base(...)` call)
    /// is written one level deeper than the header.
    ///
    /// ```
    /// use csforge_writer::CodeWriter;
    ///
    /// let mut writer = CodeWriter::spaces();
    /// writer
    ///     .block_with("public class Box<T>", ["where T : class", ""])
    ///     .close();
    ///
    /// assert_eq!(
    ///     writer.render(),
    ///     "public class Box<T>\n    where T : class\n{\n}\n"
    /// );
    /// ```
    pub fn block_with<I, S>(&mut self, header: &str, constraints: I) -> Block<'_>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let id = self.open_block(header, constraints);
        Block::new(self, id)
    }

    /// Open a block without a guard. Pair with [`end_block`](Self::end_block).
    pub fn begin_block(&mut self, header: &str) -> &mut Self {
        self.open_block(header, std::iter::empty::<&str>());
        self
    }

    /// Close the innermost open block.
    ///
    /// Does nothing when no block is open, so surplus calls are harmless.
    pub fn end_block(&mut self) -> &mut Self {
        if self.open_blocks.pop().is_some() {
            self.close_brace();
        } else {
            trace!("end_block with no open block ignored");
        }
        self
    }

    fn open_block<I, S>(&mut self, header: &str, constraints: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if !header.trim().is_empty() {
            self.append_line(header);
        }

        self.extra_indent += 1;
        for constraint in constraints {
            let constraint = constraint.as_ref();
            if !constraint.trim().is_empty() {
                self.append_line(constraint);
            }
        }
        self.extra_indent -= 1;

        self.append_line("{");
        let id = self.next_block;
        self.next_block += 1;
        self.open_blocks.push(id);
        id
    }

    /// Close block `id` and anything opened inside it, if still open.
    pub(crate) fn close_block(&mut self, id: usize) {
        let Some(position) = self.open_blocks.iter().rposition(|open| *open == id) else {
            return;
        };

        while self.open_blocks.len() > position {
            self.open_blocks.pop();
            self.close_brace();
        }
    }

    fn close_brace(&mut self) {
        if self.ends_mid_line() {
            self.buffer.push('\n');
        }
        self.append_line("}");
    }

    /// Whether the last text written does not end with a newline.
    fn ends_mid_line(&self) -> bool {
        if !self.buffer.is_empty() {
            return !self.buffer.ends_with('\n');
        }
        for segment in self.segments.iter().rev() {
            match segment {
                Segment::Text(text) if !text.is_empty() => return !text.ends_with('\n'),
                Segment::Text(_) => {}
                Segment::Nested(writer) if !writer.open_blocks.is_empty() => return false,
                Segment::Nested(writer) if !writer.is_empty() => return writer.ends_mid_line(),
                Segment::Nested(_) => {}
            }
        }
        false
    }

    // =========================================================================
    // Sub-writers
    // =========================================================================

    /// Reserve a nested writer at the current position.
    ///
    /// The sub-writer starts at this writer's depth. With a header it
    /// immediately opens a block, which is closed when the sub-writer is
    /// rendered.
    pub fn sub_writer(&mut self, header: Option<&str>) -> SubWriterId {
        let mut writer = Self::with_base_depth(self.style, self.depth());
        writer.extra_indent = self.extra_indent;
        if let Some(header) = header {
            writer.begin_block(header);
        }

        self.flush();
        self.segments.push(Segment::Nested(writer));
        SubWriterId(self.segments.len() - 1)
    }

    /// Access a sub-writer created by this writer.
    pub fn sub_writer_mut(&mut self, id: SubWriterId) -> Option<&mut CodeWriter> {
        match self.segments.get_mut(id.0) {
            Some(Segment::Nested(writer)) => Some(writer),
            _ => None,
        }
    }

    fn flush(&mut self) {
        if !self.buffer.is_empty() {
            let text = std::mem::take(&mut self.buffer);
            self.segments.push(Segment::Text(text));
        }
    }

    // =========================================================================
    // Output
    // =========================================================================

    /// Render the accumulated text.
    ///
    /// Sub-writers are spliced in place and blocks that are still open get
    /// their closing braces, innermost first. Rendering does not change the
    /// writer, so repeated calls return the same text.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out);
        out
    }

    fn render_into(&self, out: &mut String) {
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Nested(writer) => writer.render_into(out),
            }
        }
        out.push_str(&self.buffer);

        if !self.open_blocks.is_empty() {
            trace!("closing {} open block(s) at render", self.open_blocks.len());
            if !out.is_empty() && !out.ends_with('\n') {
                out.push('\n');
            }
        }
        for depth in (self.base_depth..self.depth()).rev() {
            out.push_str(&self.style.prefix(depth + self.extra_indent));
            out.push_str("}\n");
        }
    }

    fn write_indent(&mut self) {
        let levels = self.depth() + self.extra_indent;
        self.buffer.push_str(&self.style.prefix(levels));
    }
}

impl Default for CodeWriter {
    fn default() -> Self {
        Self::spaces()
    }
}

impl fmt::Display for CodeWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
