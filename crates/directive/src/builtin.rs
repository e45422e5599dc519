//! Directives the dispatch engine itself reads.

use std::sync::LazyLock;

use grok_primitives::{ClassRef, Entity, Namespace, Value, ValueKind};

use crate::validate::{validate_class, validate_text};
use crate::{Directive, DirectiveRef, Scope, Signature, StorePolicy};

/// Namespace the engine's own directives are declared under.
pub const NAMESPACE: &str = "grok";

/// Target type a grokker handles.
pub static COMPONENT: LazyLock<DirectiveRef> = LazyLock::new(|| {
	Directive::once(NAMESPACE, "component", Scope::Class)
		.with_validator(validate_class)
		.into_ref()
});

/// Ordering key among grokkers matching the same entity; higher runs first.
pub static PRIORITY: LazyLock<DirectiveRef> = LazyLock::new(|| {
	Directive::once(NAMESPACE, "priority", Scope::Class)
		.with_default(Value::Int(0))
		.with_signature(Signature::empty().required("priority", Some(ValueKind::Int)))
		.into_ref()
});

/// Marks a class as existing only to be inherited from.
pub static BASECLASS: LazyLock<DirectiveRef> = LazyLock::new(|| {
	Directive::marker(NAMESPACE, "baseclass", Scope::Class, StorePolicy::OnceLocal).into_ref()
});

/// Member names a namespace asks the orchestrator to skip.
pub static IGNORE: LazyLock<DirectiveRef> = LazyLock::new(|| {
	Directive::multiple(NAMESPACE, "ignore", Scope::Module)
		.with_validator(validate_text)
		.into_ref()
});

/// Returns true if `class` itself (not an ancestor) is marked base-only.
pub fn is_baseclass(class: &ClassRef) -> bool {
	BASECLASS
		.read(&Entity::Class(class.clone()))
		.and_then(|v| v.as_bool())
		.unwrap_or(false)
}

/// Member names `namespace` excludes from grokking.
pub fn ignored_names(namespace: &Namespace) -> Vec<String> {
	let Some(Value::List(items)) = namespace.slots().get(IGNORE.dotted_name()) else {
		return Vec::new();
	};
	items
		.iter()
		.filter_map(|v| match v {
			Value::Str(s) => Some(s.clone()),
			Value::Bytes(b) => Some(String::from_utf8_lossy(b).into_owned()),
			_ => None,
		})
		.collect()
}
