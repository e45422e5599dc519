use grok_primitives::{ClassRef, Entity, NamespaceRef, NamespaceResolver, Value};

use crate::builtin::is_baseclass;
use crate::{ResolveError, UnknownError};

/// Walks `class`'s ancestor chain, most-derived first, asking `get_default`
/// for an answer at each ancestor not marked base-only.
///
/// The first answer wins. Failures are remembered but do not stop the walk;
/// if nothing answers, the first failure is surfaced. If nothing answered
/// and nothing failed, the result is `Ok(None)`.
///
/// An ancestor declared in `local` is handed that namespace directly;
/// others are looked up through `resolver`.
pub fn resolve_from_ancestors<F>(
	class: &ClassRef,
	local: Option<&NamespaceRef>,
	resolver: &dyn NamespaceResolver,
	mut get_default: F,
) -> Result<Option<Value>, ResolveError>
where
	F: FnMut(&Entity, Option<&NamespaceRef>) -> Result<Option<Value>, UnknownError>,
{
	let mut first_failure: Option<UnknownError> = None;

	for base in class.mro() {
		if is_baseclass(base) {
			tracing::trace!(class = %class, base = %base, "skipping base-only ancestor");
			continue;
		}
		let namespace = match local {
			Some(ns) if ns.qualified_name() == base.module() => Some(ns.clone()),
			_ => resolver.resolve(base.module()),
		};
		match get_default(&Entity::Class(base.clone()), namespace.as_ref()) {
			Ok(Some(value)) => return Ok(Some(value)),
			Ok(None) => {}
			Err(err) => {
				tracing::trace!(class = %class, base = %base, error = %err, "default failed");
				first_failure.get_or_insert(err);
			}
		}
	}

	match first_failure {
		Some(err) => Err(ResolveError::Unknown {
			message: err.message,
			entity: Entity::Class(class.clone()).to_string(),
		}),
		None => Ok(None),
	}
}
