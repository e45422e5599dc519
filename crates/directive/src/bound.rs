use std::sync::{Arc, LazyLock};

use grok_primitives::{Entity, NamespaceRef, NamespaceResolver, NoResolver, Value};

use crate::ancestry::resolve_from_ancestors;
use crate::{Data, DefaultFn, DirectiveRef, ResolveError, Scope, UnknownError};

static NO_RESOLVER: NoResolver = NoResolver;
static NO_DATA: LazyLock<Data> = LazyLock::new(Data::new);

/// Lookup context for resolving directives at grok time.
#[derive(Clone, Copy)]
pub struct ResolveCx<'a> {
	namespace: Option<&'a NamespaceRef>,
	resolver: &'a dyn NamespaceResolver,
	data: &'a Data,
}

impl<'a> ResolveCx<'a> {
	pub fn new(resolver: &'a dyn NamespaceResolver, data: &'a Data) -> Self {
		Self {
			namespace: None,
			resolver,
			data,
		}
	}

	/// A context with no namespace, no resolver and no data.
	pub fn detached() -> ResolveCx<'static> {
		ResolveCx {
			namespace: None,
			resolver: &NO_RESOLVER,
			data: &NO_DATA,
		}
	}

	/// Sets the enclosing namespace module-scoped lookups fall back to.
	pub fn in_namespace(mut self, namespace: &'a NamespaceRef) -> Self {
		self.namespace = Some(namespace);
		self
	}

	pub fn with_data(mut self, data: &'a Data) -> Self {
		self.data = data;
		self
	}

	pub fn namespace(&self) -> Option<&'a NamespaceRef> {
		self.namespace
	}

	pub fn resolver(&self) -> &'a dyn NamespaceResolver {
		self.resolver
	}

	pub fn data(&self) -> &'a Data {
		self.data
	}
}

/// A directive bound for resolution by a grokker, with optional
/// per-grokker default overrides.
#[derive(Clone)]
pub struct BoundDirective {
	directive: DirectiveRef,
	name: String,
	default: Option<Value>,
	get_default: Option<DefaultFn>,
}

impl BoundDirective {
	pub fn new(directive: &DirectiveRef) -> Self {
		Self {
			name: directive.name().to_string(),
			directive: directive.clone(),
			default: None,
			get_default: None,
		}
	}

	/// Overrides the static default.
	pub fn with_default(mut self, value: Value) -> Self {
		self.default = Some(value);
		self
	}

	/// Overrides the default-resolution callback. Takes precedence over any
	/// static default.
	pub fn with_get_default(
		mut self,
		f: impl Fn(&Entity, Option<&NamespaceRef>, &Data) -> Result<Option<Value>, UnknownError> + Send + Sync + 'static,
	) -> Self {
		self.get_default = Some(Arc::new(f));
		self
	}

	/// Changes the key the resolved value is stored under in grokker data.
	pub fn named(mut self, name: impl Into<String>) -> Self {
		self.name = name.into();
		self
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn directive(&self) -> &DirectiveRef {
		&self.directive
	}

	/// Resolves the directive for `entity`.
	///
	/// Stored values are read first according to scope and policy. If none
	/// is found, class entities under class-like scopes walk their ancestor
	/// chain for a default; everything else asks the default once.
	pub fn get(&self, entity: &Entity, cx: &ResolveCx<'_>) -> Result<Option<Value>, ResolveError> {
		let directive = &self.directive;
		let module = cx.namespace.or_else(|| entity.as_namespace());
		let stored = match directive.scope() {
			Scope::Class => directive.read(entity),
			Scope::Module => module.and_then(|ns| directive.read(&Entity::Namespace(ns.clone()))),
			Scope::ClassOrModule => directive
				.read(entity)
				.or_else(|| module.and_then(|ns| directive.read(&Entity::Namespace(ns.clone())))),
		};
		if stored.is_some() {
			return Ok(stored);
		}

		match (directive.scope(), entity) {
			(Scope::Class | Scope::ClassOrModule, Entity::Class(class)) => {
				resolve_from_ancestors(class, cx.namespace, cx.resolver, |base, namespace| {
					self.get_default(base, namespace, cx.data)
				})
			}
			_ => self
				.get_default(entity, cx.namespace, cx.data)
				.map_err(|err| ResolveError::unknown(err, entity)),
		}
	}

	/// Resolves the effective default for `entity`: the bound callback, then
	/// the bound static default, then the directive's own default.
	pub fn get_default(
		&self,
		entity: &Entity,
		namespace: Option<&NamespaceRef>,
		data: &Data,
	) -> Result<Option<Value>, UnknownError> {
		if let Some(f) = &self.get_default {
			return f(entity, namespace, data);
		}
		if let Some(v) = &self.default {
			return Ok(Some(v.clone()));
		}
		self.directive.default_value().call(entity, namespace, data)
	}
}

impl core::fmt::Debug for BoundDirective {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("BoundDirective")
			.field("directive", &self.directive.dotted_name())
			.field("name", &self.name)
			.field("default", &self.default)
			.field("get_default", &self.get_default.is_some())
			.finish()
	}
}
