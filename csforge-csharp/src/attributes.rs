use csforge_writer::CodeWriter;
use indexmap::IndexSet;

/// Attribute list of a declaration.
///
/// Bodies are stored without their surrounding brackets and written one
/// `[X]` per line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    items: IndexSet<String>,
}

impl Attributes {
    /// Add an attribute body or a `[X]` line. A line holding several
    /// bracketed attributes, like `[A][B]`, adds each one.
    ///
    /// Returns `false` when nothing new was added.
    pub fn add(&mut self, attribute: &str) -> bool {
        let mut added = false;
        for body in split_bracketed(attribute.trim()) {
            let body = body.trim();
            if !body.is_empty() {
                added |= self.items.insert(body.to_string());
            }
        }
        added
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Write attributes in insertion order.
    pub fn render(&self, writer: &mut CodeWriter) {
        for attribute in &self.items {
            writer.append_line(&format!("[{}]", attribute));
        }
    }

    /// Write attributes in alphabetical order.
    pub fn render_sorted(&self, writer: &mut CodeWriter) {
        let mut sorted: Vec<&String> = self.items.iter().collect();
        sorted.sort();
        for attribute in sorted {
            writer.append_line(&format!("[{}]", attribute));
        }
    }
}

/// Bodies of the top-level `[...]` groups in `text`.
///
/// Brackets inside string or char literals are ignored. Text that is not
/// a sequence of bracketed groups is returned whole, minus one outer pair.
fn split_bracketed(text: &str) -> Vec<&str> {
    let mut bodies = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut quote = None;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }

        match c {
            '"' | '\'' if depth > 0 => quote = Some(c),
            '[' => {
                if depth == 0 {
                    start = i + 1;
                }
                depth += 1;
            }
            ']' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    bodies.push(&text[start..i]);
                }
            }
            c if depth == 0 && !c.is_whitespace() => return vec![strip_brackets(text)],
            _ => {}
        }
    }

    if depth != 0 || bodies.is_empty() {
        return vec![strip_brackets(text)];
    }
    bodies
}

fn strip_brackets(text: &str) -> &str {
    let text = text.strip_prefix('[').unwrap_or(text);
    text.strip_suffix(']').unwrap_or(text)
}
