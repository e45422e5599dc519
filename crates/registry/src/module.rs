use std::cmp::Reverse;
use std::sync::Arc;

use grok_directive::Data;
use grok_directive::builtin::{ignored_names, is_baseclass};
use grok_primitives::{Entity, NamespaceRef, NamespaceResolver, NoResolver};

use crate::{GrokContext, GrokError, GrokkerRef, Registry};

/// Callback run before or after a namespace pass. The prepare hook may
/// change the data handed to every grokker in the pass.
pub type Hook = Box<dyn Fn(&str, &NamespaceRef, &mut Data) -> Result<(), GrokError> + Send + Sync>;

/// One scheduled grokker invocation.
#[derive(Debug, Clone)]
pub struct Dispatch {
	pub grokker: GrokkerRef,
	pub name: String,
	pub entity: Entity,
}

/// Drives a registry over the members of a namespace.
pub struct ModuleGrokker {
	registry: Registry,
	resolver: Arc<dyn NamespaceResolver>,
	prepare: Option<Hook>,
	finalize: Option<Hook>,
}

impl ModuleGrokker {
	pub fn new(registry: Registry) -> Self {
		Self {
			registry,
			resolver: Arc::new(NoResolver),
			prepare: None,
			finalize: None,
		}
	}

	/// An orchestrator over a bootstrapped registry.
	pub fn bootstrapped() -> Self {
		Self::new(Registry::bootstrapped())
	}

	/// Sets the resolver used to find an ancestor's declaring namespace
	/// during default resolution.
	pub fn with_resolver(mut self, resolver: Arc<dyn NamespaceResolver>) -> Self {
		self.resolver = resolver;
		self
	}

	pub fn with_prepare(
		mut self,
		hook: impl Fn(&str, &NamespaceRef, &mut Data) -> Result<(), GrokError> + Send + Sync + 'static,
	) -> Self {
		self.prepare = Some(Box::new(hook));
		self
	}

	pub fn with_finalize(
		mut self,
		hook: impl Fn(&str, &NamespaceRef, &mut Data) -> Result<(), GrokError> + Send + Sync + 'static,
	) -> Self {
		self.finalize = Some(Box::new(hook));
		self
	}

	pub fn registry(&self) -> &Registry {
		&self.registry
	}

	pub fn resolver(&self) -> &dyn NamespaceResolver {
		self.resolver.as_ref()
	}

	pub fn register(&mut self, grokker: GrokkerRef) -> bool {
		self.registry.register(grokker)
	}

	pub fn clear(&mut self) {
		self.registry.clear();
	}

	/// Everything a pass over `namespace` would invoke, before priority
	/// ordering: global grokkers first, then members in name order.
	///
	/// Members are skipped when their name contains a dot, when the
	/// namespace lists them with `ignore`, when they were imported rather
	/// than defined here, or when they are base-only classes.
	pub fn grokkers(&self, name: &str, namespace: &NamespaceRef) -> Vec<Dispatch> {
		let module = Entity::Namespace(namespace.clone());
		let mut batch: Vec<Dispatch> = self
			.registry
			.lookup(&module)
			.into_iter()
			.map(|grokker| Dispatch {
				grokker,
				name: name.to_string(),
				entity: module.clone(),
			})
			.collect();

		let ignored = ignored_names(namespace);
		for member_name in namespace.member_names() {
			if member_name.contains('.') {
				continue;
			}
			if ignored.iter().any(|i| i == member_name) {
				tracing::debug!(member = member_name, "member ignored by namespace");
				continue;
			}
			let Some(member) = namespace.member(member_name) else {
				continue;
			};
			if !namespace.defines_locally(member) {
				continue;
			}
			let Some(entity) = Entity::from_member(member) else {
				continue;
			};
			if let Entity::Class(class) = &entity
				&& is_baseclass(class)
			{
				continue;
			}
			for grokker in self.registry.lookup(&entity) {
				batch.push(Dispatch {
					grokker,
					name: member_name.to_string(),
					entity: entity.clone(),
				});
			}
		}
		batch
	}

	/// Groks `namespace`, found under `name`, returning true if any grokker
	/// did.
	///
	/// Invocations run in descending priority; equal priorities keep
	/// collection order. Grokkers announced by an invocation are registered
	/// before the next one runs but do not join the current batch.
	pub fn grok(&mut self, name: &str, namespace: &NamespaceRef, data: &Data) -> Result<bool, GrokError> {
		let _span = tracing::debug_span!("grok", namespace = namespace.qualified_name()).entered();

		let mut data = data.clone();
		if let Some(prepare) = &self.prepare {
			prepare(name, namespace, &mut data)?;
		}

		let mut batch = self.grokkers(name, namespace);
		batch.sort_by_cached_key(|d| Reverse(d.grokker.priority()));

		let resolver = Arc::clone(&self.resolver);
		let mut grokked = false;
		for Dispatch { grokker, name, entity } in batch {
			let mut ctx = GrokContext::new(namespace, resolver.as_ref(), &data);
			let result = grokker.grok(&name, &entity, &mut ctx)?;
			tracing::trace!(grokker = %grokker, member = %name, result, "invoked");
			grokked |= result;
			for announced in ctx.take_announced() {
				self.registry.register(announced);
			}
		}

		if let Some(finalize) = &self.finalize {
			finalize(name, namespace, &mut data)?;
		}
		Ok(grokked)
	}
}

impl core::fmt::Debug for ModuleGrokker {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("ModuleGrokker")
			.field("registry", &self.registry)
			.field("prepare", &self.prepare.is_some())
			.field("finalize", &self.finalize.is_some())
			.finish_non_exhaustive()
	}
}
