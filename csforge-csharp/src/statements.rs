//! Control-flow helpers for method bodies.
//!
//! ```
//! use csforge_csharp::StatementWriter;
//! use csforge_writer::CodeWriter;
//!
//! let mut writer = CodeWriter::spaces();
//! writer
//!     .if_block("x > 0", |w| {
//!         w.append_line("return 1;");
//!     })
//!     .else_block(|w| {
//!         w.append_line("return 0;");
//!     });
//!
//! assert_eq!(
//!     writer.render(),
//!     "if (x > 0)\n{\n    return 1;\n}\nelse\n{\n    return 0;\n}\n"
//! );
//! ```

use csforge_writer::CodeWriter;

/// Statement blocks on top of a [`CodeWriter`].
pub trait StatementWriter {
    /// `if (condition) { ... }`, continued by the returned chain.
    fn if_block(
        &mut self,
        condition: &str,
        body: impl FnOnce(&mut CodeWriter),
    ) -> ConditionChain<'_>;

    /// `for (init; condition; step) { ... }`
    fn for_loop(
        &mut self,
        init: &str,
        condition: &str,
        step: &str,
        body: impl FnOnce(&mut CodeWriter),
    ) -> &mut Self;

    /// `while (condition) { ... }`
    fn while_loop(&mut self, condition: &str, body: impl FnOnce(&mut CodeWriter)) -> &mut Self;

    /// `foreach (item in collection) { ... }`
    fn foreach(
        &mut self,
        item: &str,
        collection: &str,
        body: impl FnOnce(&mut CodeWriter),
    ) -> &mut Self;

    /// `switch (value) { ... }` with cases written by `cases`.
    fn switch_block(&mut self, value: &str, cases: impl FnOnce(&mut SwitchCases<'_>)) -> &mut Self;
}

fn scoped(writer: &mut CodeWriter, header: &str, body: impl FnOnce(&mut CodeWriter)) {
    let mut block = writer.block(header);
    body(&mut *block);
}

impl StatementWriter for CodeWriter {
    fn if_block(
        &mut self,
        condition: &str,
        body: impl FnOnce(&mut CodeWriter),
    ) -> ConditionChain<'_> {
        scoped(self, &format!("if ({})", condition), body);
        ConditionChain { writer: self }
    }

    fn for_loop(
        &mut self,
        init: &str,
        condition: &str,
        step: &str,
        body: impl FnOnce(&mut CodeWriter),
    ) -> &mut Self {
        scoped(self, &format!("for ({}; {}; {})", init, condition, step), body);
        self
    }

    fn while_loop(&mut self, condition: &str, body: impl FnOnce(&mut CodeWriter)) -> &mut Self {
        scoped(self, &format!("while ({})", condition), body);
        self
    }

    fn foreach(
        &mut self,
        item: &str,
        collection: &str,
        body: impl FnOnce(&mut CodeWriter),
    ) -> &mut Self {
        scoped(self, &format!("foreach ({} in {})", item, collection), body);
        self
    }

    fn switch_block(&mut self, value: &str, cases: impl FnOnce(&mut SwitchCases<'_>)) -> &mut Self {
        let mut block = self.block(&format!("switch ({})", value));
        cases(&mut SwitchCases {
            writer: &mut *block,
        });
        drop(block);
        self
    }
}

/// The tail of an `if` statement.
#[derive(Debug)]
#[must_use = "an if block may be continued with else_if or else_block"]
pub struct ConditionChain<'w> {
    writer: &'w mut CodeWriter,
}

impl<'w> ConditionChain<'w> {
    pub fn else_if(self, condition: &str, body: impl FnOnce(&mut CodeWriter)) -> Self {
        scoped(self.writer, &format!("else if ({})", condition), body);
        self
    }

    pub fn else_block(self, body: impl FnOnce(&mut CodeWriter)) -> &'w mut CodeWriter {
        scoped(self.writer, "else", body);
        self.writer
    }

    /// End the chain without an `else`.
    pub fn end(self) -> &'w mut CodeWriter {
        self.writer
    }
}

/// Case labels of a `switch` block.
#[derive(Debug)]
pub struct SwitchCases<'w> {
    writer: &'w mut CodeWriter,
}

impl SwitchCases<'_> {
    /// `case label:` followed by the indented body and `break;`.
    pub fn case(&mut self, label: &str, body: impl FnOnce(&mut CodeWriter)) -> &mut Self {
        self.labelled(&format!("case {}:", label), body)
    }

    /// `default:` followed by the indented body and `break;`.
    pub fn default_case(&mut self, body: impl FnOnce(&mut CodeWriter)) -> &mut Self {
        self.labelled("default:", body)
    }

    fn labelled(&mut self, label: &str, body: impl FnOnce(&mut CodeWriter)) -> &mut Self {
        self.writer.append_line(label);
        self.writer.increase_indent();
        body(&mut *self.writer);
        self.writer.append_line("break;");
        self.writer.decrease_indent();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_if_else_chain() {
        let mut writer = CodeWriter::spaces();
        writer
            .if_block("a", |w| {
                w.append_line("A();");
            })
            .else_if("b", |w| {
                w.append_line("B();");
            })
            .else_block(|w| {
                w.append_line("C();");
            });

        let expected = "\
if (a)
{
    A();
}
else if (b)
{
    B();
}
else
{
    C();
}
";
        assert_eq!(writer.render(), expected);
    }

    #[test]
    fn test_if_without_else() {
        let mut writer = CodeWriter::spaces();
        writer
            .if_block("ready", |w| {
                w.append_line("Go();");
            })
            .end()
            .append_line("Done();");
        assert_eq!(writer.render(), "if (ready)\n{\n    Go();\n}\nDone();\n");
    }

    #[test]
    fn test_loops() {
        let mut writer = CodeWriter::spaces();
        writer
            .for_loop("var i = 0", "i < n", "i++", |w| {
                w.append_line("Step(i);");
            })
            .while_loop("Pending()", |w| {
                w.append_line("Wait();");
            })
            .foreach("var item", "items", |w| {
                w.append_line("Use(item);");
            });

        let expected = "\
for (var i = 0; i < n; i++)
{
    Step(i);
}
while (Pending())
{
    Wait();
}
foreach (var item in items)
{
    Use(item);
}
";
        assert_eq!(writer.render(), expected);
    }

    #[test]
    fn test_switch() {
        let mut writer = CodeWriter::spaces();
        writer.switch_block("kind", |cases| {
            cases
                .case("Kind.A", |w| {
                    w.append_line("HandleA();");
                })
                .case("Kind.B", |_| {})
                .default_case(|w| {
                    w.append_line("HandleOther();");
                });
        });

        let expected = "\
switch (kind)
{
    case Kind.A:
        HandleA();
        break;
    case Kind.B:
        break;
    default:
        HandleOther();
        break;
}
";
        assert_eq!(writer.render(), expected);
    }

    #[test]
    fn test_nested_statements_inside_block() {
        let mut writer = CodeWriter::spaces();
        {
            let mut method = writer.block("void Run()");
            method.foreach("var x", "xs", |w| {
                w.if_block("x == null", |w| {
                    w.append_line("continue;");
                })
                .end();
            });
        }

        let expected = "\
void Run()
{
    foreach (var x in xs)
    {
        if (x == null)
        {
            continue;
        }
    }
}
";
        assert_eq!(writer.render(), expected);
    }
}
