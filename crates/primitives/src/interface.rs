use std::sync::Arc;

use crate::class::next_id;

/// A named capability that classes can declare they provide.
pub struct InterfaceDef {
	id: u64,
	name: String,
	module: String,
	extends: Vec<InterfaceRef>,
}

impl InterfaceDef {
	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn module(&self) -> &str {
		&self.module
	}

	pub fn extends(&self) -> &[InterfaceRef] {
		&self.extends
	}
}

/// Shared handle to an [`InterfaceDef`]. Equality uses identity.
#[derive(Clone)]
pub struct InterfaceRef(Arc<InterfaceDef>);

impl InterfaceRef {
	pub fn new(module: impl Into<String>, name: impl Into<String>, extends: &[InterfaceRef]) -> Self {
		Self(Arc::new(InterfaceDef {
			id: next_id(),
			name: name.into(),
			module: module.into(),
			extends: extends.to_vec(),
		}))
	}

	/// Returns true if this interface is `other` or extends it, directly or
	/// transitively.
	pub fn is_or_extends(&self, other: &InterfaceRef) -> bool {
		self == other || self.0.extends.iter().any(|e| e.is_or_extends(other))
	}
}

impl std::ops::Deref for InterfaceRef {
	type Target = InterfaceDef;

	fn deref(&self) -> &InterfaceDef {
		&self.0
	}
}

impl PartialEq for InterfaceRef {
	fn eq(&self, other: &Self) -> bool {
		self.0.id == other.0.id
	}
}

impl Eq for InterfaceRef {}

impl std::hash::Hash for InterfaceRef {
	fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
		self.0.id.hash(state);
	}
}

impl core::fmt::Debug for InterfaceRef {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		write!(f, "<interface {}.{}>", self.0.module, self.0.name)
	}
}

impl core::fmt::Display for InterfaceRef {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		write!(f, "{}.{}", self.0.module, self.0.name)
	}
}
