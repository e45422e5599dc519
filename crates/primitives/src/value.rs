use indexmap::IndexMap;

use crate::{ClassRef, InterfaceRef};

/// A directive argument or stored directive value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
	/// Absence of a value. Also the static default of directives declared
	/// without one.
	#[default]
	None,
	/// Boolean value.
	Bool(bool),
	/// Integer value.
	Int(i64),
	/// Text value.
	Str(String),
	/// Raw byte string, as handed over by callers that did not decode text.
	Bytes(Vec<u8>),
	/// Ordered list of values.
	List(Vec<Value>),
	/// Insertion-ordered string-keyed mapping.
	Map(IndexMap<String, Value>),
	/// Reference to a class descriptor.
	Class(ClassRef),
	/// Reference to an interface descriptor.
	Interface(InterfaceRef),
}

impl Value {
	/// Builds the two-element list that dict-storing directive factories
	/// return.
	pub fn pair(key: impl Into<String>, value: impl Into<Value>) -> Self {
		Value::List(vec![Value::Str(key.into()), value.into()])
	}

	/// Splits a key/value pair produced by [`Value::pair`].
	pub fn as_pair(&self) -> Option<(&str, &Value)> {
		match self {
			Value::List(items) if items.len() == 2 => Some((items[0].as_str()?, &items[1])),
			_ => None,
		}
	}

	pub fn is_none(&self) -> bool {
		matches!(self, Value::None)
	}

	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Value::Bool(v) => Some(*v),
			_ => None,
		}
	}

	pub fn as_int(&self) -> Option<i64> {
		match self {
			Value::Int(v) => Some(*v),
			_ => None,
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::Str(v) => Some(v),
			_ => None,
		}
	}

	pub fn as_list(&self) -> Option<&[Value]> {
		match self {
			Value::List(v) => Some(v),
			_ => None,
		}
	}

	pub fn as_map(&self) -> Option<&IndexMap<String, Value>> {
		match self {
			Value::Map(v) => Some(v),
			_ => None,
		}
	}

	pub fn as_class(&self) -> Option<&ClassRef> {
		match self {
			Value::Class(v) => Some(v),
			_ => None,
		}
	}

	pub fn as_interface(&self) -> Option<&InterfaceRef> {
		match self {
			Value::Interface(v) => Some(v),
			_ => None,
		}
	}

	/// Returns the kind of this value.
	pub fn kind(&self) -> ValueKind {
		match self {
			Value::None => ValueKind::None,
			Value::Bool(_) => ValueKind::Bool,
			Value::Int(_) => ValueKind::Int,
			Value::Str(_) => ValueKind::Str,
			Value::Bytes(_) => ValueKind::Bytes,
			Value::List(_) => ValueKind::List,
			Value::Map(_) => ValueKind::Map,
			Value::Class(_) => ValueKind::Class,
			Value::Interface(_) => ValueKind::Interface,
		}
	}

	/// Returns the type name of this value for diagnostics.
	pub fn type_name(&self) -> &'static str {
		self.kind().name()
	}
}

/// The kind of a [`Value`], used by directive signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
	None,
	Bool,
	Int,
	Str,
	Bytes,
	List,
	Map,
	Class,
	Interface,
}

impl ValueKind {
	pub const fn name(self) -> &'static str {
		match self {
			ValueKind::None => "none",
			ValueKind::Bool => "bool",
			ValueKind::Int => "int",
			ValueKind::Str => "str",
			ValueKind::Bytes => "bytes",
			ValueKind::List => "list",
			ValueKind::Map => "map",
			ValueKind::Class => "class",
			ValueKind::Interface => "interface",
		}
	}
}

impl core::fmt::Display for ValueKind {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.write_str(self.name())
	}
}

impl From<bool> for Value {
	fn from(v: bool) -> Self {
		Value::Bool(v)
	}
}

impl From<i64> for Value {
	fn from(v: i64) -> Self {
		Value::Int(v)
	}
}

impl From<i32> for Value {
	fn from(v: i32) -> Self {
		Value::Int(v.into())
	}
}

impl From<String> for Value {
	fn from(v: String) -> Self {
		Value::Str(v)
	}
}

impl From<&str> for Value {
	fn from(v: &str) -> Self {
		Value::Str(v.to_string())
	}
}

impl From<Vec<Value>> for Value {
	fn from(v: Vec<Value>) -> Self {
		Value::List(v)
	}
}

impl From<IndexMap<String, Value>> for Value {
	fn from(v: IndexMap<String, Value>) -> Self {
		Value::Map(v)
	}
}

impl From<ClassRef> for Value {
	fn from(v: ClassRef) -> Self {
		Value::Class(v)
	}
}

impl From<&ClassRef> for Value {
	fn from(v: &ClassRef) -> Self {
		Value::Class(v.clone())
	}
}

impl From<InterfaceRef> for Value {
	fn from(v: InterfaceRef) -> Self {
		Value::Interface(v)
	}
}

impl From<&InterfaceRef> for Value {
	fn from(v: &InterfaceRef) -> Self {
		Value::Interface(v.clone())
	}
}
