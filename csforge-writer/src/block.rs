//! Scope guard for `{ ... }` blocks.

use std::ops::{Deref, DerefMut};

use crate::CodeWriter;

/// An open block on a [`CodeWriter`].
///
/// Dereferences to the writer, so content and nested blocks are written
/// through the guard. The closing brace is written by [`close`](Self::close)
/// or on drop, whichever happens first. Blocks opened inside this one with
/// [`CodeWriter::begin_block`] and left open are closed along with it.
#[derive(Debug)]
#[must_use = "dropping a block immediately writes its closing brace"]
pub struct Block<'w> {
    writer: &'w mut CodeWriter,
    id: usize,
    released: bool,
}

impl<'w> Block<'w> {
    pub(crate) fn new(writer: &'w mut CodeWriter, id: usize) -> Self {
        Self {
            writer,
            id,
            released: false,
        }
    }

    /// Close the block now.
    pub fn close(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if !self.released {
            self.released = true;
            self.writer.close_block(self.id);
        }
    }
}

impl Deref for Block<'_> {
    type Target = CodeWriter;

    fn deref(&self) -> &CodeWriter {
        &*self.writer
    }
}

impl DerefMut for Block<'_> {
    fn deref_mut(&mut self) -> &mut CodeWriter {
        &mut *self.writer
    }
}

impl Drop for Block<'_> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use crate::CodeWriter;

    #[test]
    fn test_depth_restored_after_release() {
        let mut writer = CodeWriter::spaces();
        {
            let mut outer = writer.block("a");
            assert_eq!(outer.depth(), 1);
            {
                let inner = outer.block("b");
                assert_eq!(inner.depth(), 2);
            }
            assert_eq!(outer.depth(), 1);
        }
        assert_eq!(writer.depth(), 0);
    }

    #[test]
    fn test_early_return_still_closes() {
        fn write_body(writer: &mut CodeWriter, bail: bool) -> Result<(), ()> {
            let mut block = writer.block("void Run()");
            block.append_line("Step1();");
            if bail {
                return Err(());
            }
            block.append_line("Step2();");
            Ok(())
        }

        let mut writer = CodeWriter::spaces();
        assert!(write_body(&mut writer, true).is_err());
        assert_eq!(writer.render(), "void Run()\n{\n    Step1();\n}\n");
        assert_eq!(writer.depth(), 0);
    }

    #[test]
    fn test_release_then_render_does_not_duplicate() {
        let mut writer = CodeWriter::tabs();
        writer.block("x").close();
        assert_eq!(writer.render(), "x\n{\n}\n");
        assert_eq!(writer.render(), "x\n{\n}\n");
    }
}
