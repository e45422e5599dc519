use grok_directive::Data;
use grok_primitives::{NamespaceRef, NamespaceResolver};

use crate::{DiscoveryConfig, GrokError, ModuleGrokker};

type ExcludeFn = Box<dyn Fn(&str) -> bool + Send + Sync>;

/// Recursive grokking of a namespace tree.
#[derive(Default)]
pub struct Discovery {
	exclude: Option<ExcludeFn>,
	data: Data,
}

impl Discovery {
	pub fn new() -> Self {
		Self::default()
	}

	/// Applies exclude patterns and seed data from `config`.
	pub fn from_config(config: &DiscoveryConfig) -> Result<Self, GrokError> {
		let mut discovery = Self::new().with_data(config.seed_data()?);
		if let Some(set) = config.exclude_set()? {
			discovery = discovery.with_exclude(move |name| set.is_match(name));
		}
		Ok(discovery)
	}

	/// Skips sub-namespaces, and everything below them, whose short name
	/// matches `filter`.
	pub fn with_exclude(mut self, filter: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
		self.exclude = Some(Box::new(filter));
		self
	}

	/// Seed data; values passed to [`Discovery::run`] take precedence.
	pub fn with_data(mut self, data: Data) -> Self {
		self.data = data;
		self
	}

	fn is_excluded(&self, short_name: &str) -> bool {
		self.exclude.as_ref().is_some_and(|f| f(short_name))
	}

	/// Groks `root`, then its sub-namespaces in name order, recursively.
	pub fn run(&self, root: &NamespaceRef, grokker: &mut ModuleGrokker, data: &Data) -> Result<bool, GrokError> {
		let mut seeded = self.data.clone();
		seeded.extend(data.iter().map(|(k, v)| (k.clone(), v.clone())));
		self.walk(root, grokker, &seeded)
	}

	/// Resolves `dotted` with `resolver` and runs discovery from there.
	pub fn grok_dotted_name(
		&self,
		dotted: &str,
		resolver: &dyn NamespaceResolver,
		grokker: &mut ModuleGrokker,
		data: &Data,
	) -> Result<bool, GrokError> {
		let root = resolver
			.resolve(dotted)
			.ok_or_else(|| GrokError::UnknownNamespace(dotted.to_string()))?;
		self.run(&root, grokker, data)
	}

	fn walk(&self, namespace: &NamespaceRef, grokker: &mut ModuleGrokker, data: &Data) -> Result<bool, GrokError> {
		let mut grokked = grokker.grok(namespace.qualified_name(), namespace, data)?;

		let mut subs: Vec<&NamespaceRef> = namespace.sub_namespaces().iter().collect();
		subs.sort_by(|a, b| a.qualified_name().cmp(b.qualified_name()));
		for sub in subs {
			if self.is_excluded(sub.short_name()) {
				tracing::debug!(namespace = sub.qualified_name(), "excluded from discovery");
				continue;
			}
			tracing::debug!(namespace = sub.qualified_name(), "descending");
			grokked |= self.walk(sub, grokker, data)?;
		}
		Ok(grokked)
	}
}

impl core::fmt::Debug for Discovery {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("Discovery")
			.field("exclude", &self.exclude.is_some())
			.field("data", &self.data)
			.finish()
	}
}

/// Groks `root` and every namespace below it.
pub fn discover(root: &NamespaceRef, grokker: &mut ModuleGrokker, data: &Data) -> Result<bool, GrokError> {
	Discovery::new().run(root, grokker, data)
}

/// Resolves `dotted` and groks it and every namespace below it.
pub fn grok_dotted_name(
	dotted: &str,
	resolver: &dyn NamespaceResolver,
	grokker: &mut ModuleGrokker,
	data: &Data,
) -> Result<bool, GrokError> {
	Discovery::new().grok_dotted_name(dotted, resolver, grokker, data)
}
