use indexmap::IndexMap;

use crate::Value;

/// Directive values attached to a single descriptor.
///
/// Keys are directive dotted names, so two unrelated directives can never
/// share a slot. Slots are written during the declaration phase and are
/// read-only once the owning descriptor is built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectiveSlots {
	slots: IndexMap<String, Value>,
}

impl DirectiveSlots {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn get(&self, key: &str) -> Option<&Value> {
		self.slots.get(key)
	}

	pub fn contains(&self, key: &str) -> bool {
		self.slots.contains_key(key)
	}

	/// Returns the slot for `key`, inserting `init()` when it is empty.
	pub fn get_or_insert_with(&mut self, key: &str, init: impl FnOnce() -> Value) -> &mut Value {
		self.slots.entry(key.to_string()).or_insert_with(init)
	}

	pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
		self.slots.insert(key.into(), value)
	}

	pub fn len(&self) -> usize {
		self.slots.len()
	}

	pub fn is_empty(&self) -> bool {
		self.slots.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
		self.slots.iter().map(|(k, v)| (k.as_str(), v))
	}
}

/// Kind of declaration site a directive is called from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SiteKind {
	/// A class body.
	Class,
	/// A namespace body.
	Module,
	/// A method inside a class body.
	Method,
	/// A constructed instance.
	Instance,
}

impl core::fmt::Display for SiteKind {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		match self {
			Self::Class => write!(f, "class"),
			Self::Module => write!(f, "module"),
			Self::Method => write!(f, "method"),
			Self::Instance => write!(f, "instance"),
		}
	}
}

/// A descriptor under construction that directives can be declared on.
pub trait DeclarationSite {
	/// Returns the kind of body this site represents.
	fn site_kind(&self) -> SiteKind;

	/// Returns a display name for diagnostics.
	fn site_name(&self) -> &str;

	/// Returns the directive slots being collected for this site.
	fn slots_mut(&mut self) -> &mut DirectiveSlots;
}
