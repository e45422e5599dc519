use rustc_hash::FxHashMap as HashMap;

use crate::{Member, NamespaceRef};

/// Resolves dotted names to namespaces that the loader already produced.
///
/// The engine never loads anything itself; implementations only look up
/// what is already there.
pub trait NamespaceResolver: Send + Sync {
	/// Returns the loaded namespace called `dotted`.
	fn resolve(&self, dotted: &str) -> Option<NamespaceRef>;

	/// Resolves `pkg.mod` to a namespace or `pkg.mod.Member` to a member of
	/// one.
	fn resolve_entity(&self, dotted: &str) -> Option<Member> {
		if let Some(ns) = self.resolve(dotted) {
			return Some(Member::Namespace(ns));
		}
		let (parent, name) = dotted.rsplit_once('.')?;
		self.resolve(parent)?.member(name).cloned()
	}
}

/// Resolver that knows no namespaces.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoResolver;

impl NamespaceResolver for NoResolver {
	fn resolve(&self, _dotted: &str) -> Option<NamespaceRef> {
		None
	}
}

/// In-memory table of loaded namespaces keyed by qualified name.
#[derive(Debug, Clone, Default)]
pub struct NamespaceTable {
	by_name: HashMap<String, NamespaceRef>,
}

impl NamespaceTable {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a single namespace, replacing any previous one with its name.
	pub fn insert(&mut self, ns: &NamespaceRef) {
		self.by_name.insert(ns.qualified_name().to_string(), ns.clone());
	}

	/// Adds `root` and every namespace below it.
	pub fn insert_tree(&mut self, root: &NamespaceRef) {
		self.insert(root);
		for sub in root.sub_namespaces() {
			self.insert_tree(sub);
		}
	}

	pub fn with_tree(mut self, root: &NamespaceRef) -> Self {
		self.insert_tree(root);
		self
	}

	pub fn len(&self) -> usize {
		self.by_name.len()
	}

	pub fn is_empty(&self) -> bool {
		self.by_name.is_empty()
	}
}

impl NamespaceResolver for NamespaceTable {
	fn resolve(&self, dotted: &str) -> Option<NamespaceRef> {
		self.by_name.get(dotted).cloned()
	}
}
