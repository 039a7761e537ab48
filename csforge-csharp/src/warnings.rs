//! Compiler warning codes commonly disabled in generated files.
//!
//! Pass these to [`CodeBuilder::disable_warning`](crate::CodeBuilder::disable_warning).

/// Field is never used.
pub const UNUSED_FIELD: &str = "CS0169";
/// Member is obsolete.
pub const OBSOLETE: &str = "CS0612";
/// Member is obsolete, with a message.
pub const OBSOLETE_WITH_MESSAGE: &str = "CS0618";
/// Missing XML comment for a publicly visible member.
pub const MISSING_XML_DOC: &str = "CS1591";
