//! Member builders held by a class.

mod constructor;
mod delegate;
mod event;
mod method;
mod property;

pub use constructor::ConstructorBuilder;
pub use delegate::DelegateBuilder;
pub use event::EventBuilder;
pub use method::MethodBuilder;
pub use property::{PropertyBuilder, PropertyKind, PropertyValue};
