use std::sync::Arc;

use crate::{DeclarationSite, DirectiveSlots, SiteKind};

/// Frozen description of a method defined in a class body.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDef {
	name: String,
	slots: DirectiveSlots,
}

pub type MethodRef = Arc<MethodDef>;

impl MethodDef {
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Methods whose names start with an underscore are private.
	pub fn is_public(&self) -> bool {
		!self.name.starts_with('_')
	}

	pub fn slots(&self) -> &DirectiveSlots {
		&self.slots
	}
}

/// Collects a method body. Directives declared here override class-level
/// values for method-targeted grokkers.
pub struct MethodBuilder {
	name: String,
	slots: DirectiveSlots,
}

impl MethodBuilder {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			slots: DirectiveSlots::new(),
		}
	}

	pub fn build(self) -> MethodRef {
		Arc::new(MethodDef {
			name: self.name,
			slots: self.slots,
		})
	}
}

impl DeclarationSite for MethodBuilder {
	fn site_kind(&self) -> SiteKind {
		SiteKind::Method
	}

	fn site_name(&self) -> &str {
		&self.name
	}

	fn slots_mut(&mut self) -> &mut DirectiveSlots {
		&mut self.slots
	}
}
