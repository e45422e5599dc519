//! Grokker registry and namespace dispatch.
//!
//! A grokker handles one shape of entity: classes or their methods deriving
//! from a target type, instances of such classes, or whole namespaces.
//! [`Registry`] indexes grokkers by what they dispatch on and
//! [`ModuleGrokker`] walks a namespace's members through it in priority
//! order. A bootstrapped registry carries meta-grokkers that register
//! grokker classes as they are discovered, so grokkers declared in a
//! package take effect for the rest of the discovery pass.
//!
//! # Key Types
//!
//! | Type | Role |
//! |------|------|
//! | [`GrokkerDecl`] | Declares a grokker class. |
//! | [`Grokker`] | A grokker instance: shape plus declaring class. |
//! | [`Registry`] | Class, instance and global indexes with dedup. |
//! | [`ModuleGrokker`] | One pass over a namespace. |
//! | [`Discovery`] | Recursive passes over a namespace tree. |

pub mod components;
mod config;
mod context;
mod decl;
mod discover;
mod error;
mod grokker;
mod module;
mod registry;

pub use config::DiscoveryConfig;
pub use context::GrokContext;
pub use decl::{GrokkerDecl, GrokkerFactory};
pub use discover::{Discovery, discover, grok_dotted_name};
pub use error::{ConfigError, GrokError, RegistryError};
pub use grokker::{
	ClassGrokker, GlobalGrokker, Grokker, GrokkerRef, GrokkerShape, InstanceGrokker, MethodGrokker,
};
pub use module::{Dispatch, Hook, ModuleGrokker};
pub use registry::Registry;
