//! Text emission engine for brace-delimited source code.
//!
//! - [`CodeWriter`] - indentation-tracking writer with spliced sub-writers
//! - [`Block`] - guard that writes a block's closing brace exactly once
//! - [`Sections`] - blank-line discipline for groups of members
//! - [`IndentStyle`] - indentation unit

mod block;
mod indent;
mod sections;
mod writer;

pub use block::Block;
pub use indent::IndentStyle;
pub use sections::{Sections, Spacing};
pub use writer::{CodeWriter, SubWriterId};
