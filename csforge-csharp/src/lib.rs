//! Fluent builders that emit formatted C# source.
//!
//! A [`CodeBuilder`] owns one file: its namespace, imports, assembly
//! attributes and top-level types. Each `add_*` call returns the child
//! builder to configure, and [`CodeBuilder::build`] renders the whole tree.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod accessibility;
mod attributes;
mod class;
mod code_builder;
mod context;
mod docs;
mod enums;
mod error;
mod generics;
mod members;
mod node;
mod options;
mod parameters;
mod record;
mod statements;
pub mod warnings;

pub use accessibility::Accessibility;
pub use attributes::Attributes;
pub use class::{ClassBuilder, PropertyOrder, TypeKind};
pub use code_builder::{CodeBuilder, TypeDeclaration};
pub use context::{FileContext, ImportGroups};
pub use csforge_writer::{CodeWriter, IndentStyle};
pub use docs::Documentation;
pub use enums::{EnumBuilder, EnumValueBuilder};
pub use error::{Error, Result};
pub use generics::{GenericParameter, Generics};
pub use members::{
    ConstructorBuilder, DelegateBuilder, EventBuilder, MethodBuilder, PropertyBuilder,
    PropertyKind, PropertyValue,
};
pub use node::{Accessor, BodyWriter, Renderable};
pub use options::{CodeBuilderOptions, NamespaceStyle, NullableContext};
pub use parameters::{Parameter, Parameterized};
pub use record::{RecordBuilder, RecordProperty, RecordStyle};
pub use statements::{ConditionChain, StatementWriter, SwitchCases};
