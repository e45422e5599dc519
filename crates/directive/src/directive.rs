use std::sync::Arc;

use grok_primitives::{DeclarationSite, Entity, NamespaceRef, Value, ValueKind};
use indexmap::IndexMap;

use crate::{BoundDirective, DeclarationError, Scope, Signature, StorePolicy, UnknownError};

/// Data collected for a grokker during a pass, keyed by directive name.
pub type Data = IndexMap<String, Value>;

/// Default-resolution callback: `(entity, its namespace, data so far)`.
///
/// `Ok(None)` means no answer here; `Err` additionally says why.
pub type DefaultFn =
	Arc<dyn Fn(&Entity, Option<&NamespaceRef>, &Data) -> Result<Option<Value>, UnknownError> + Send + Sync>;

/// Turns checked arguments into the value handed to the storage policy.
pub type Factory = Arc<dyn Fn(&Directive, Vec<Value>) -> Result<Value, DeclarationError> + Send + Sync>;

/// Predicate run on the checked arguments before the factory.
pub type Validator = fn(&Directive, &[Value]) -> Result<(), DeclarationError>;

/// What a directive resolves to when nothing was declared.
#[derive(Clone)]
pub enum DirectiveDefault {
	Value(Value),
	Computed(DefaultFn),
}

impl DirectiveDefault {
	pub(crate) fn call(
		&self,
		entity: &Entity,
		namespace: Option<&NamespaceRef>,
		data: &Data,
	) -> Result<Option<Value>, UnknownError> {
		match self {
			DirectiveDefault::Value(v) => Ok(Some(v.clone())),
			DirectiveDefault::Computed(f) => f(entity, namespace, data),
		}
	}
}

impl core::fmt::Debug for DirectiveDefault {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		match self {
			Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
			Self::Computed(_) => f.write_str("Computed(..)"),
		}
	}
}

/// A named, scoped, policy-governed piece of declarative metadata.
///
/// Directives are defined once (usually as statics) and declared against
/// builders during the declaration phase. Values are stored in each site's
/// slots under [`Directive::dotted_name`].
pub struct Directive {
	name: String,
	dotted: String,
	scope: Scope,
	policy: StorePolicy,
	default: DirectiveDefault,
	signature: Signature,
	factory: Option<Factory>,
	validator: Option<Validator>,
}

pub type DirectiveRef = Arc<Directive>;

impl Directive {
	/// Creates a directive taking a single value and resolving to none when
	/// undeclared.
	pub fn new(namespace: &str, name: impl Into<String>, scope: Scope, policy: StorePolicy) -> Self {
		let name = name.into();
		Self {
			dotted: format!("{namespace}.{name}"),
			name,
			scope,
			policy,
			default: DirectiveDefault::Value(Value::None),
			signature: Signature::value(),
			factory: None,
			validator: None,
		}
	}

	pub fn once(namespace: &str, name: impl Into<String>, scope: Scope) -> Self {
		Self::new(namespace, name, scope, StorePolicy::Once)
	}

	pub fn once_local(namespace: &str, name: impl Into<String>, scope: Scope) -> Self {
		Self::new(namespace, name, scope, StorePolicy::OnceLocal)
	}

	/// Accumulating directive; resolves to an empty list when undeclared.
	pub fn multiple(namespace: &str, name: impl Into<String>, scope: Scope) -> Self {
		Self::new(namespace, name, scope, StorePolicy::Multiple).with_default(Value::List(Vec::new()))
	}

	/// Map-merging directive called as `(key, value)`; resolves to an empty
	/// map when undeclared.
	pub fn dict(namespace: &str, name: impl Into<String>, scope: Scope) -> Self {
		Self::new(namespace, name, scope, StorePolicy::Dict)
			.with_default(Value::Map(IndexMap::new()))
			.with_signature(
				Signature::empty()
					.required("key", Some(ValueKind::Str))
					.required("value", None),
			)
			.with_factory(|_, mut args| {
				let value = args.pop().unwrap_or_default();
				let key = args.pop().unwrap_or_default();
				Ok(Value::List(vec![key, value]))
			})
	}

	/// Argument-less flag stored once per site; resolves to `false` when
	/// undeclared.
	pub fn marker(namespace: &str, name: impl Into<String>, scope: Scope, policy: StorePolicy) -> Self {
		Self::new(namespace, name, scope, policy)
			.with_default(Value::Bool(false))
			.with_signature(Signature::empty())
			.with_factory(|_, _| Ok(Value::Bool(true)))
	}

	pub fn with_default(mut self, value: Value) -> Self {
		self.default = DirectiveDefault::Value(value);
		self
	}

	pub fn with_default_fn(
		mut self,
		f: impl Fn(&Entity, Option<&NamespaceRef>, &Data) -> Result<Option<Value>, UnknownError> + Send + Sync + 'static,
	) -> Self {
		self.default = DirectiveDefault::Computed(Arc::new(f));
		self
	}

	pub fn with_signature(mut self, signature: Signature) -> Self {
		self.signature = signature;
		self
	}

	pub fn with_factory(
		mut self,
		f: impl Fn(&Directive, Vec<Value>) -> Result<Value, DeclarationError> + Send + Sync + 'static,
	) -> Self {
		self.factory = Some(Arc::new(f));
		self
	}

	pub fn with_validator(mut self, validator: Validator) -> Self {
		self.validator = Some(validator);
		self
	}

	pub fn into_ref(self) -> DirectiveRef {
		Arc::new(self)
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Identity key; also the slot key values are stored under.
	pub fn dotted_name(&self) -> &str {
		&self.dotted
	}

	pub fn scope(&self) -> Scope {
		self.scope
	}

	pub fn policy(&self) -> StorePolicy {
		self.policy
	}

	pub fn default_value(&self) -> &DirectiveDefault {
		&self.default
	}

	pub fn signature(&self) -> &Signature {
		&self.signature
	}

	/// Declares this directive on `site` with positional `args`.
	///
	/// Checks scope, then arguments, then the validator, runs the factory and
	/// hands the result to the storage policy.
	pub fn declare(
		&self,
		site: &mut dyn DeclarationSite,
		args: impl IntoIterator<Item = Value>,
	) -> Result<(), DeclarationError> {
		if !self.scope.allows(site.site_kind()) {
			return Err(DeclarationError::Scope {
				directive: self.name.clone(),
				scope: self.scope.description(),
			});
		}

		let args = self.signature.bind(&self.name, args.into_iter().collect())?;
		if let Some(validate) = self.validator {
			validate(self, &args)?;
		}
		let value = match &self.factory {
			Some(factory) => factory(self, args)?,
			None => args.into_iter().next().unwrap_or_default(),
		};

		tracing::trace!(
			directive = %self.dotted,
			site = site.site_name(),
			kind = %site.site_kind(),
			"directive declared"
		);
		self.policy
			.write(&self.name, self.scope, site.slots_mut(), &self.dotted, value)
	}

	/// Stores `value` on `site` directly, without scope or argument checks.
	pub fn set(&self, site: &mut dyn DeclarationSite, value: Value) {
		site.slots_mut().insert(self.dotted.as_str(), value);
	}

	/// Reads the stored value for `entity` under this directive's policy,
	/// without consulting any default.
	pub fn read(&self, entity: &Entity) -> Option<Value> {
		self.policy.read(&self.dotted, entity)
	}

	pub fn bind(self: &Arc<Self>) -> BoundDirective {
		BoundDirective::new(self)
	}
}

impl core::fmt::Debug for Directive {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("Directive")
			.field("name", &self.dotted)
			.field("scope", &self.scope)
			.field("policy", &self.policy)
			.field("default", &self.default)
			.finish_non_exhaustive()
	}
}
