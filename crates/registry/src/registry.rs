use grok_primitives::{ClassId, ClassRef, Entity};
use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};

use crate::components::meta_grokkers;
use crate::{Grokker, GrokkerRef, GrokkerShape, RegistryError};

/// Grokkers indexed by what they dispatch on.
///
/// Class- and method-shaped grokkers are keyed by their target type,
/// instance-shaped ones likewise in a separate index, and global grokkers
/// sit in a flat list. Within one key no two grokkers share a declaring
/// class, so registering the same grokker class twice is a no-op.
#[derive(Default)]
pub struct Registry {
	classes: HashMap<ClassId, Vec<GrokkerRef>>,
	instances: HashMap<ClassId, Vec<GrokkerRef>>,
	globals: Vec<GrokkerRef>,
	bootstrapped: bool,
}

impl Registry {
	/// An empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// A registry with the meta-grokkers pre-registered, so grokker classes
	/// found while grokking are registered automatically.
	pub fn bootstrapped() -> Self {
		let mut registry = Self {
			bootstrapped: true,
			..Self::default()
		};
		registry.install_meta();
		registry
	}

	fn install_meta(&mut self) {
		for grokker in meta_grokkers() {
			self.register(grokker);
		}
	}

	pub fn is_bootstrapped(&self) -> bool {
		self.bootstrapped
	}

	/// Adds `grokker`. Returns false if a grokker of the same class is
	/// already registered under the same key.
	pub fn register(&mut self, grokker: GrokkerRef) -> bool {
		let bucket = match (grokker.shape(), grokker.target()) {
			(GrokkerShape::Global(_), _) => &mut self.globals,
			(GrokkerShape::Instance(_), Some(target)) => self.instances.entry(target.id()).or_default(),
			(GrokkerShape::Class(_) | GrokkerShape::Method(_), Some(target)) => {
				self.classes.entry(target.id()).or_default()
			}
			(_, None) => {
				tracing::debug!(grokker = %grokker, "targeted grokker without target ignored");
				return false;
			}
		};

		if bucket.iter().any(|g| g.class() == grokker.class()) {
			tracing::debug!(grokker = %grokker, "grokker already registered");
			return false;
		}
		tracing::debug!(
			grokker = %grokker,
			shape = grokker.shape().name(),
			target = ?grokker.target().map(ClassRef::to_string),
			"registered grokker"
		);
		bucket.push(grokker);
		true
	}

	/// Instantiates the grokker class `class` and registers it.
	pub fn register_class(&mut self, class: &ClassRef) -> Result<bool, RegistryError> {
		Ok(self.register(Grokker::from_class(class)?))
	}

	/// Grokkers applicable to `entity`, each at most once.
	///
	/// Classes consult the class index over their ancestor chain, instances
	/// the instance index over their class's chain, namespaces get the
	/// global grokkers. Methods match nothing.
	pub fn lookup(&self, entity: &Entity) -> Vec<GrokkerRef> {
		match entity {
			Entity::Class(class) => Self::walk(&self.classes, class),
			Entity::Instance(instance) => Self::walk(&self.instances, instance.class()),
			Entity::Namespace(_) => self.globals.clone(),
			Entity::Method(_) => Vec::new(),
		}
	}

	fn walk(index: &HashMap<ClassId, Vec<GrokkerRef>>, class: &ClassRef) -> Vec<GrokkerRef> {
		let mut used: HashSet<ClassId> = HashSet::default();
		let mut found = Vec::new();
		for base in class.mro() {
			let Some(grokkers) = index.get(&base.id()) else {
				continue;
			};
			for grokker in grokkers {
				if used.insert(grokker.class().id()) {
					found.push(grokker.clone());
				}
			}
		}
		found
	}

	/// Removes every grokker. A bootstrapped registry keeps its
	/// meta-grokkers.
	pub fn clear(&mut self) {
		self.classes.clear();
		self.instances.clear();
		self.globals.clear();
		if self.bootstrapped {
			self.install_meta();
		}
	}

	/// Number of registered grokkers across all indexes.
	pub fn len(&self) -> usize {
		self.classes.values().map(Vec::len).sum::<usize>()
			+ self.instances.values().map(Vec::len).sum::<usize>()
			+ self.globals.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl core::fmt::Debug for Registry {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("Registry")
			.field("classes", &self.classes.len())
			.field("instances", &self.instances.len())
			.field("globals", &self.globals.len())
			.field("bootstrapped", &self.bootstrapped)
			.finish()
	}
}
