use std::any::Any;
use std::sync::Arc;

use crate::{ClassRef, DeclarationSite, DirectiveSlots, Payload, SiteKind};

/// A constructed value of a class.
pub struct Instance {
	class: ClassRef,
	module: Option<String>,
	slots: DirectiveSlots,
	payload: Option<Payload>,
}

pub type InstanceRef = Arc<Instance>;

impl Instance {
	pub fn class(&self) -> &ClassRef {
		&self.class
	}

	/// Namespace the instance belongs to: an explicit override, else the
	/// namespace of its class.
	pub fn module(&self) -> &str {
		self.module.as_deref().unwrap_or_else(|| self.class.module())
	}

	pub fn slots(&self) -> &DirectiveSlots {
		&self.slots
	}

	pub fn payload<T: Any + Send + Sync>(&self) -> Option<&T> {
		self.payload.as_deref()?.downcast_ref::<T>()
	}
}

impl core::fmt::Debug for Instance {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("Instance")
			.field("class", &self.class)
			.field("module", &self.module())
			.finish_non_exhaustive()
	}
}

pub struct InstanceBuilder {
	class: ClassRef,
	module: Option<String>,
	slots: DirectiveSlots,
	payload: Option<Payload>,
}

impl InstanceBuilder {
	pub fn new(class: &ClassRef) -> Self {
		Self {
			class: class.clone(),
			module: None,
			slots: DirectiveSlots::new(),
			payload: None,
		}
	}

	/// Re-homes the instance to namespace `module`, making it local there.
	pub fn module(mut self, module: impl Into<String>) -> Self {
		self.module = Some(module.into());
		self
	}

	pub fn payload(mut self, payload: Payload) -> Self {
		self.payload = Some(payload);
		self
	}

	pub fn build(self) -> InstanceRef {
		Arc::new(Instance {
			class: self.class,
			module: self.module,
			slots: self.slots,
			payload: self.payload,
		})
	}
}

impl DeclarationSite for InstanceBuilder {
	fn site_kind(&self) -> SiteKind {
		SiteKind::Instance
	}

	fn site_name(&self) -> &str {
		self.class.name()
	}

	fn slots_mut(&mut self) -> &mut DirectiveSlots {
		&mut self.slots
	}
}
