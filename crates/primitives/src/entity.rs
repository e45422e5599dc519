use crate::{ClassRef, DirectiveSlots, InstanceRef, Member, MethodRef, NamespaceRef};

/// Anything directives can be read from and grokkers can be dispatched on.
#[derive(Debug, Clone)]
pub enum Entity {
	Class(ClassRef),
	Instance(InstanceRef),
	Namespace(NamespaceRef),
	Method(MethodRef),
}

impl Entity {
	/// Converts a namespace member into a grokkable entity. Interfaces,
	/// imported namespaces and plain values have no entity form.
	pub fn from_member(member: &Member) -> Option<Self> {
		match member {
			Member::Class(c) => Some(Entity::Class(c.clone())),
			Member::Instance(i) => Some(Entity::Instance(i.clone())),
			Member::Interface(_) | Member::Namespace(_) | Member::Value(_) => None,
		}
	}

	/// The entity's own directive slots.
	pub fn slots(&self) -> &DirectiveSlots {
		match self {
			Entity::Class(c) => c.slots(),
			Entity::Instance(i) => i.slots(),
			Entity::Namespace(n) => n.slots(),
			Entity::Method(m) => m.slots(),
		}
	}

	pub fn as_class(&self) -> Option<&ClassRef> {
		match self {
			Entity::Class(c) => Some(c),
			_ => None,
		}
	}

	pub fn as_namespace(&self) -> Option<&NamespaceRef> {
		match self {
			Entity::Namespace(n) => Some(n),
			_ => None,
		}
	}

	pub fn as_instance(&self) -> Option<&InstanceRef> {
		match self {
			Entity::Instance(i) => Some(i),
			_ => None,
		}
	}

	pub fn kind_name(&self) -> &'static str {
		match self {
			Entity::Class(_) => "class",
			Entity::Instance(_) => "instance",
			Entity::Namespace(_) => "namespace",
			Entity::Method(_) => "method",
		}
	}
}

impl core::fmt::Display for Entity {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		match self {
			Entity::Class(c) => write!(f, "<class {c}>"),
			Entity::Instance(i) => write!(f, "<{} instance>", i.class()),
			Entity::Namespace(n) => write!(f, "<namespace {}>", n.qualified_name()),
			Entity::Method(m) => write!(f, "<method {}>", m.name()),
		}
	}
}

impl From<&ClassRef> for Entity {
	fn from(c: &ClassRef) -> Self {
		Entity::Class(c.clone())
	}
}

impl From<&NamespaceRef> for Entity {
	fn from(n: &NamespaceRef) -> Self {
		Entity::Namespace(n.clone())
	}
}

impl From<&InstanceRef> for Entity {
	fn from(i: &InstanceRef) -> Self {
		Entity::Instance(i.clone())
	}
}
