use std::sync::Arc;

use indexmap::IndexMap;

use crate::{ClassRef, DeclarationSite, DirectiveSlots, InstanceRef, InterfaceRef, SiteKind, Value};

/// A named member of a namespace.
#[derive(Debug, Clone)]
pub enum Member {
	Class(ClassRef),
	Instance(InstanceRef),
	Interface(InterfaceRef),
	/// Another namespace bound under a local name (an import).
	Namespace(NamespaceRef),
	/// Plain data.
	Value(Value),
}

/// A loaded module-like container.
///
/// Members may be defined here or merely imported; only locally defined
/// classes and instances take part in grokking.
#[derive(Debug)]
pub struct Namespace {
	name: String,
	members: IndexMap<String, Member>,
	slots: DirectiveSlots,
	subs: Vec<NamespaceRef>,
	package: bool,
}

pub type NamespaceRef = Arc<Namespace>;

impl Namespace {
	/// Import-qualified dotted name.
	pub fn qualified_name(&self) -> &str {
		&self.name
	}

	/// Last component of the qualified name.
	pub fn short_name(&self) -> &str {
		self.name.rsplit('.').next().unwrap_or(&self.name)
	}

	pub fn member(&self, name: &str) -> Option<&Member> {
		self.members.get(name)
	}

	pub fn members(&self) -> impl Iterator<Item = (&str, &Member)> {
		self.members.iter().map(|(k, v)| (k.as_str(), v))
	}

	/// All member names, sorted.
	pub fn member_names(&self) -> Vec<&str> {
		let mut names: Vec<&str> = self.members.keys().map(String::as_str).collect();
		names.sort_unstable();
		names
	}

	/// Returns true if `member` was declared in this namespace rather than
	/// imported into it.
	pub fn defines_locally(&self, member: &Member) -> bool {
		match member {
			Member::Class(class) => class.module() == self.name,
			Member::Instance(instance) => instance.module() == self.name,
			Member::Interface(iface) => iface.module() == self.name,
			Member::Namespace(_) | Member::Value(_) => false,
		}
	}

	/// Sorted names of the members declared in this namespace.
	pub fn locally_defined_members(&self) -> Vec<&str> {
		self.member_names()
			.into_iter()
			.filter(|name| self.members.get(*name).is_some_and(|m| self.defines_locally(m)))
			.collect()
	}

	/// Locally defined classes, in member-name order.
	pub fn local_classes(&self) -> impl Iterator<Item = &ClassRef> {
		self.locally_defined_members()
			.into_iter()
			.filter_map(move |name| match self.members.get(name) {
				Some(Member::Class(class)) => Some(class),
				_ => None,
			})
	}

	/// Sub-namespaces in the order the loader supplied them.
	pub fn sub_namespaces(&self) -> &[NamespaceRef] {
		&self.subs
	}

	pub fn is_package(&self) -> bool {
		self.package
	}

	pub fn slots(&self) -> &DirectiveSlots {
		&self.slots
	}
}

/// Collects a namespace body during the declaration phase.
pub struct NamespaceBuilder {
	name: String,
	members: IndexMap<String, Member>,
	slots: DirectiveSlots,
	subs: Vec<NamespaceRef>,
	package: bool,
}

impl NamespaceBuilder {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			members: IndexMap::new(),
			slots: DirectiveSlots::new(),
			subs: Vec::new(),
			package: false,
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Binds a class under its own name.
	pub fn class(mut self, class: &ClassRef) -> Self {
		self.members.insert(class.name().to_string(), Member::Class(class.clone()));
		self
	}

	pub fn instance(mut self, name: impl Into<String>, instance: &InstanceRef) -> Self {
		self.members.insert(name.into(), Member::Instance(instance.clone()));
		self
	}

	pub fn interface(mut self, iface: &InterfaceRef) -> Self {
		self.members.insert(iface.name().to_string(), Member::Interface(iface.clone()));
		self
	}

	pub fn value(mut self, name: impl Into<String>, value: Value) -> Self {
		self.members.insert(name.into(), Member::Value(value));
		self
	}

	/// Binds an arbitrary member under `name`, typically something defined
	/// elsewhere.
	pub fn import(mut self, name: impl Into<String>, member: Member) -> Self {
		self.members.insert(name.into(), member);
		self
	}

	/// Adds a sub-namespace and marks this namespace as a package.
	pub fn sub(mut self, sub: NamespaceRef) -> Self {
		self.subs.push(sub);
		self.package = true;
		self
	}

	/// Marks this namespace as a package even without sub-namespaces.
	pub fn package(mut self) -> Self {
		self.package = true;
		self
	}

	pub fn build(self) -> NamespaceRef {
		Arc::new(Namespace {
			name: self.name,
			members: self.members,
			slots: self.slots,
			subs: self.subs,
			package: self.package,
		})
	}
}

impl DeclarationSite for NamespaceBuilder {
	fn site_kind(&self) -> SiteKind {
		SiteKind::Module
	}

	fn site_name(&self) -> &str {
		&self.name
	}

	fn slots_mut(&mut self) -> &mut DirectiveSlots {
		&mut self.slots
	}
}
