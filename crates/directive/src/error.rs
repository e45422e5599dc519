use grok_primitives::{Entity, HierarchyError};

/// Errors raised while declaring a directive on a site.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeclarationError {
	/// The directive was declared on a site its scope does not allow.
	#[error("The '{directive}' directive can only be used on {scope} level.")]
	Scope { directive: String, scope: &'static str },

	/// A once-storing directive was declared twice on the same site.
	#[error("The '{directive}' directive can only be called once per {scope}.")]
	Repeated { directive: String, scope: &'static str },

	/// Wrong number of arguments for the directive's signature.
	#[error("{0}")]
	Arity(String),

	/// An argument did not match the kind its parameter accepts.
	#[error("{directive}() argument '{param}' must be {expected}, not {got}")]
	Type {
		directive: String,
		param: String,
		expected: &'static str,
		got: &'static str,
	},

	/// The directive's validation predicate rejected the arguments.
	#[error("The '{directive}' directive can only be called with {expected}.")]
	Invalid { directive: String, expected: String },

	/// A dict-storing directive's factory did not produce a key/value pair.
	#[error("The factory method for the '{directive}' directive should return a key-value pair.")]
	NotAPair { directive: String },

	#[error(transparent)]
	Hierarchy(#[from] HierarchyError),
}

/// Signal raised by a default-resolution callback that could not supply a
/// value for a specific reason.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct UnknownError {
	pub message: String,
}

impl UnknownError {
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
		}
	}
}

/// Errors raised while resolving a directive value at grok time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
	/// Default resolution found no answer and at least one callback
	/// reported why. Carries the first such message.
	#[error("{message}")]
	Unknown { message: String, entity: String },

	/// A directive the caller requires resolved to no answer at all.
	#[error("no value could be resolved for directive '{directive}' on {entity}")]
	Unresolved { directive: String, entity: String },
}

impl ResolveError {
	pub(crate) fn unknown(err: UnknownError, entity: &Entity) -> Self {
		ResolveError::Unknown {
			message: err.message,
			entity: entity.to_string(),
		}
	}
}
