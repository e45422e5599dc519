use std::any::Any;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::IndexMap;

use crate::linearize::linearize;
use crate::{DeclarationSite, DirectiveSlots, HierarchyError, InterfaceRef, MethodRef, SiteKind};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

pub(crate) fn next_id() -> u64 {
	NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// Process-unique identity of a class descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClassId(u64);

impl ClassId {
	pub const fn as_u64(self) -> u64 {
		self.0
	}
}

/// Opaque data attached to a class by the layer that declared it.
pub type Payload = Arc<dyn Any + Send + Sync>;

/// Frozen description of a class.
pub struct ClassDef {
	id: ClassId,
	name: String,
	module: String,
	bases: Vec<ClassRef>,
	/// Linearized ancestors, most-derived first, excluding the class itself.
	ancestors: Vec<ClassRef>,
	methods: IndexMap<String, MethodRef>,
	implements: Vec<InterfaceRef>,
	slots: DirectiveSlots,
	payload: Option<Payload>,
}

impl ClassDef {
	pub fn id(&self) -> ClassId {
		self.id
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Dotted name of the namespace the class was declared in.
	pub fn module(&self) -> &str {
		&self.module
	}

	pub fn qualified_name(&self) -> String {
		format!("{}.{}", self.module, self.name)
	}

	pub fn bases(&self) -> &[ClassRef] {
		&self.bases
	}

	pub fn ancestors(&self) -> &[ClassRef] {
		&self.ancestors
	}

	/// Methods defined on this class body, not inherited ones.
	pub fn own_methods(&self) -> impl Iterator<Item = &MethodRef> {
		self.methods.values()
	}

	pub fn own_method(&self, name: &str) -> Option<&MethodRef> {
		self.methods.get(name)
	}

	pub fn own_interfaces(&self) -> &[InterfaceRef] {
		&self.implements
	}

	pub fn slots(&self) -> &DirectiveSlots {
		&self.slots
	}

	pub fn payload<T: Any + Send + Sync>(&self) -> Option<&T> {
		self.payload.as_deref()?.downcast_ref::<T>()
	}
}

/// Shared handle to a frozen [`ClassDef`]. Equality and hashing use the
/// class identity.
#[derive(Clone)]
pub struct ClassRef(Arc<ClassDef>);

impl ClassRef {
	/// Iterates the ancestor chain, the class itself first.
	pub fn mro(&self) -> impl Iterator<Item = &ClassRef> {
		std::iter::once(self).chain(self.0.ancestors.iter())
	}

	/// Returns true if `other` is this class or one of its ancestors.
	pub fn is_subclass_of(&self, other: &ClassRef) -> bool {
		self.mro().any(|c| c == other)
	}

	/// Returns true if this class or an ancestor declares `iface`, or an
	/// interface extending it.
	pub fn implements(&self, iface: &InterfaceRef) -> bool {
		self.mro()
			.flat_map(|c| c.implements.iter())
			.any(|i| i.is_or_extends(iface))
	}

	/// Finds the most-derived definition of `name` along the ancestor chain.
	pub fn resolve_method(&self, name: &str) -> Option<ResolvedMethod> {
		self.mro().find_map(|owner| {
			owner.methods.get(name).map(|method| ResolvedMethod {
				owner: owner.clone(),
				method: method.clone(),
			})
		})
	}

	/// Public methods visible on this class, sorted by name.
	pub fn public_methods(&self) -> Vec<ResolvedMethod> {
		let mut names: Vec<&str> = self
			.mro()
			.flat_map(|c| c.methods.values())
			.filter(|m| m.is_public())
			.map(|m| m.name())
			.collect();
		names.sort_unstable();
		names.dedup();
		names
			.into_iter()
			.filter_map(|name| self.resolve_method(name))
			.collect()
	}
}

impl std::ops::Deref for ClassRef {
	type Target = ClassDef;

	fn deref(&self) -> &ClassDef {
		&self.0
	}
}

impl PartialEq for ClassRef {
	fn eq(&self, other: &Self) -> bool {
		self.0.id == other.0.id
	}
}

impl Eq for ClassRef {}

impl std::hash::Hash for ClassRef {
	fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
		self.0.id.hash(state);
	}
}

impl core::fmt::Debug for ClassRef {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		write!(f, "<class {}.{}>", self.0.module, self.0.name)
	}
}

impl core::fmt::Display for ClassRef {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		write!(f, "{}.{}", self.0.module, self.0.name)
	}
}

/// A method as seen from a class: the definition and the class that
/// provides it.
#[derive(Debug, Clone)]
pub struct ResolvedMethod {
	pub owner: ClassRef,
	pub method: MethodRef,
}

impl ResolvedMethod {
	pub fn name(&self) -> &str {
		self.method.name()
	}
}

impl PartialEq for ResolvedMethod {
	fn eq(&self, other: &Self) -> bool {
		self.owner == other.owner && self.method.name() == other.method.name()
	}
}

impl Eq for ResolvedMethod {}

/// Collects a class body during the declaration phase.
pub struct ClassBuilder {
	name: String,
	module: String,
	bases: Vec<ClassRef>,
	methods: IndexMap<String, MethodRef>,
	implements: Vec<InterfaceRef>,
	slots: DirectiveSlots,
	payload: Option<Payload>,
}

impl ClassBuilder {
	/// Starts a class named `name` declared in namespace `module`.
	pub fn new(module: impl Into<String>, name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			module: module.into(),
			bases: Vec::new(),
			methods: IndexMap::new(),
			implements: Vec::new(),
			slots: DirectiveSlots::new(),
			payload: None,
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn module(&self) -> &str {
		&self.module
	}

	pub fn has_base(&self, class: &ClassRef) -> bool {
		self.bases.iter().any(|b| b.is_subclass_of(class))
	}

	/// Appends a direct base class.
	pub fn base(mut self, base: &ClassRef) -> Self {
		self.bases.push(base.clone());
		self
	}

	/// Declares that instances of the class provide `iface`.
	pub fn implements(mut self, iface: &InterfaceRef) -> Self {
		self.implements.push(iface.clone());
		self
	}

	/// Adds a method to the class body, replacing one with the same name.
	pub fn method(mut self, method: MethodRef) -> Self {
		self.methods.insert(method.name().to_string(), method);
		self
	}

	pub fn payload(mut self, payload: Payload) -> Self {
		self.payload = Some(payload);
		self
	}

	/// Freezes the class and computes its ancestor chain.
	pub fn build(self) -> Result<ClassRef, HierarchyError> {
		let qualified = format!("{}.{}", self.module, self.name);
		for (i, base) in self.bases.iter().enumerate() {
			if self.bases[..i].contains(base) {
				return Err(HierarchyError::DuplicateBase {
					class: qualified,
					base: base.to_string(),
				});
			}
		}
		let ancestors = linearize(&qualified, &self.bases)?;
		Ok(self.freeze(ancestors))
	}

	/// Freezes a class whose only base is `parent`, discarding bases added
	/// with [`ClassBuilder::base`]. Single inheritance always linearizes.
	pub fn build_single(mut self, parent: Option<&ClassRef>) -> ClassRef {
		let ancestors = parent.map(|p| p.mro().cloned().collect()).unwrap_or_default();
		self.bases = parent.into_iter().cloned().collect();
		self.freeze(ancestors)
	}

	fn freeze(self, ancestors: Vec<ClassRef>) -> ClassRef {
		ClassRef(Arc::new(ClassDef {
			id: ClassId(next_id()),
			name: self.name,
			module: self.module,
			bases: self.bases,
			ancestors,
			methods: self.methods,
			implements: self.implements,
			slots: self.slots,
			payload: self.payload,
		}))
	}
}

impl DeclarationSite for ClassBuilder {
	fn site_kind(&self) -> SiteKind {
		SiteKind::Class
	}

	fn site_name(&self) -> &str {
		&self.name
	}

	fn slots_mut(&mut self) -> &mut DirectiveSlots {
		&mut self.slots
	}
}
