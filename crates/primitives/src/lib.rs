//! Entity descriptors for directive resolution and grokker dispatch.
//!
//! Classes, interfaces, methods, instances and namespaces are described by
//! frozen descriptors produced from builders. A builder is a
//! [`DeclarationSite`]: directives are declared against it during the
//! declaration phase, then `build()` freezes the result. Class builders
//! compute the C3 ancestor chain once, so resolution never reflects over a
//! hierarchy at runtime.
//!
//! # Key Types
//!
//! | Type | Role |
//! |------|------|
//! | [`Value`] | Directive argument and stored value. |
//! | [`ClassRef`] | Frozen class with precomputed ancestor chain. |
//! | [`NamespaceRef`] | Loaded namespace with members and sub-namespaces. |
//! | [`Entity`] | What directives are read from and grokkers dispatch on. |
//! | [`NamespaceResolver`] | Dotted-name lookup of loaded namespaces. |

mod class;
mod entity;
mod error;
mod instance;
mod interface;
mod linearize;
mod method;
mod namespace;
mod resolver;
mod slots;
mod value;

pub use class::{ClassBuilder, ClassDef, ClassId, ClassRef, Payload, ResolvedMethod};
pub use entity::Entity;
pub use error::HierarchyError;
pub use instance::{Instance, InstanceBuilder, InstanceRef};
pub use interface::{InterfaceDef, InterfaceRef};
pub use method::{MethodBuilder, MethodDef, MethodRef};
pub use namespace::{Member, Namespace, NamespaceBuilder, NamespaceRef};
pub use resolver::{NamespaceResolver, NamespaceTable, NoResolver};
pub use slots::{DeclarationSite, DirectiveSlots, SiteKind};
pub use value::{Value, ValueKind};

#[cfg(test)]
mod tests;
