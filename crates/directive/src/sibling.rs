use std::sync::Arc;

use grok_primitives::{ClassRef, Entity, InterfaceRef, Namespace, NamespaceRef, Value};

use crate::{Data, DefaultFn, UnknownError};

/// Condition a sibling class must satisfy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassPredicate {
	Implements(InterfaceRef),
	SubclassOf(ClassRef),
}

impl ClassPredicate {
	pub fn matches(&self, class: &ClassRef) -> bool {
		match self {
			ClassPredicate::Implements(iface) => class.implements(iface),
			ClassPredicate::SubclassOf(base) => class.is_subclass_of(base),
		}
	}
}

/// Locally defined classes of `namespace` matching `predicate`, in member
/// name order.
pub fn scan_for_classes<'a>(
	namespace: &'a Namespace,
	predicate: &'a ClassPredicate,
) -> impl Iterator<Item = &'a ClassRef> {
	namespace.local_classes().filter(move |c| predicate.matches(c))
}

/// Default that picks the single matching class declared next to the
/// entity.
#[derive(Debug, Clone)]
pub struct UniqueSibling {
	predicate: ClassPredicate,
	component_name: String,
	directive_name: String,
}

impl UniqueSibling {
	/// `component_name` and `directive_name` only feed the error messages.
	pub fn new(
		predicate: ClassPredicate,
		component_name: impl Into<String>,
		directive_name: impl Into<String>,
	) -> Self {
		Self {
			predicate,
			component_name: component_name.into(),
			directive_name: directive_name.into(),
		}
	}

	pub fn lookup(&self, entity: &Entity, namespace: Option<&NamespaceRef>) -> Result<Option<Value>, UnknownError> {
		let found: Vec<&ClassRef> = namespace
			.map(|ns| scan_for_classes(ns, &self.predicate).collect())
			.unwrap_or_default();
		match found.as_slice() {
			[only] => Ok(Some(Value::Class((*only).clone()))),
			[] => Err(UnknownError::new(format!(
				"No module-level {} for {}, please use the '{}' directive.",
				self.component_name, entity, self.directive_name
			))),
			_ => Err(UnknownError::new(format!(
				"Multiple possible {}s for {}, please use the '{}' directive.",
				self.component_name, entity, self.directive_name
			))),
		}
	}

	pub fn into_default_fn(self) -> DefaultFn {
		Arc::new(move |entity: &Entity, namespace: Option<&NamespaceRef>, _: &Data| {
			self.lookup(entity, namespace)
		})
	}
}
