//! Directive model: declarative metadata attached to classes, namespaces,
//! methods and instances, and resolved at grok time.
//!
//! A [`Directive`] couples a [`Scope`] (where it may be declared) with a
//! [`StorePolicy`] (how values are stored and inherited). Grokkers read
//! directives through a [`BoundDirective`], which falls back to defaults
//! along the class's ancestor chain when nothing was declared.

mod ancestry;
mod bound;
pub mod builtin;
mod directive;
mod error;
mod policy;
mod scope;
mod sibling;
mod signature;
pub mod validate;

pub use ancestry::resolve_from_ancestors;
pub use bound::{BoundDirective, ResolveCx};
pub use directive::{Data, DefaultFn, Directive, DirectiveDefault, DirectiveRef, Factory, Validator};
pub use error::{DeclarationError, ResolveError, UnknownError};
pub use policy::StorePolicy;
pub use scope::Scope;
pub use sibling::{ClassPredicate, UniqueSibling, scan_for_classes};
pub use signature::{Param, Signature};
