use grok_primitives::{ClassRef, DirectiveSlots, Entity, Value};
use indexmap::IndexMap;

use crate::{DeclarationError, Scope};

/// How a directive stores declared values and how it reads them back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorePolicy {
	/// Single value; the nearest ancestor's value is inherited.
	Once,
	/// Single value; never inherited.
	OnceLocal,
	/// Accumulating list; ancestors contribute, base first. A contribution
	/// equal to one already taken from a more ancestral class is skipped.
	Multiple,
	/// Accumulating list; never inherited.
	MultipleLocal,
	/// Key/value map; ancestors contribute, derived keys win.
	Dict,
}

impl StorePolicy {
	/// Whether reads consult ancestor classes.
	pub const fn inherits(self) -> bool {
		matches!(self, Self::Once | Self::Multiple | Self::Dict)
	}

	/// Stores `value` under `key`.
	pub(crate) fn write(
		self,
		directive: &str,
		scope: Scope,
		slots: &mut DirectiveSlots,
		key: &str,
		value: Value,
	) -> Result<(), DeclarationError> {
		match self {
			Self::Once | Self::OnceLocal => {
				if slots.contains(key) {
					return Err(DeclarationError::Repeated {
						directive: directive.to_string(),
						scope: scope.description(),
					});
				}
				slots.insert(key, value);
			}
			Self::Multiple | Self::MultipleLocal => {
				let slot = slots.get_or_insert_with(key, || Value::List(Vec::new()));
				match slot {
					Value::List(items) => items.push(value),
					other => {
						let previous = std::mem::take(other);
						*other = Value::List(vec![previous, value]);
					}
				}
			}
			Self::Dict => {
				let Some((k, v)) = value.as_pair() else {
					return Err(DeclarationError::NotAPair {
						directive: directive.to_string(),
					});
				};
				let slot = slots.get_or_insert_with(key, || Value::Map(IndexMap::new()));
				match slot {
					Value::Map(map) => {
						map.insert(k.to_string(), v.clone());
					}
					other => {
						*other = Value::Map(IndexMap::from([(k.to_string(), v.clone())]));
					}
				}
			}
		}
		Ok(())
	}

	/// Reads the value stored under `key` for `entity`, or `None` if nothing
	/// reachable under this policy carries it.
	pub fn read(self, key: &str, entity: &Entity) -> Option<Value> {
		match entity {
			Entity::Class(class) => self.read_class(key, class),
			Entity::Instance(instance) => {
				let own = instance.slots().get(key).cloned();
				if own.is_some() || !self.inherits() {
					return own;
				}
				self.read_class(key, instance.class())
			}
			Entity::Namespace(_) | Entity::Method(_) => entity.slots().get(key).cloned(),
		}
	}

	fn read_class(self, key: &str, class: &ClassRef) -> Option<Value> {
		match self {
			Self::Once => class.mro().find_map(|c| c.slots().get(key)).cloned(),
			Self::OnceLocal | Self::MultipleLocal => class.slots().get(key).cloned(),
			Self::Multiple => {
				let chain: Vec<&ClassRef> = class.mro().collect();
				let mut taken: Vec<&Value> = Vec::new();
				for c in chain.iter().rev() {
					if let Some(v) = c.slots().get(key)
						&& !taken.contains(&v)
					{
						taken.push(v);
					}
				}
				if taken.is_empty() {
					return None;
				}
				let mut merged = Vec::new();
				for v in taken {
					match v {
						Value::List(items) => merged.extend(items.iter().cloned()),
						other => merged.push(other.clone()),
					}
				}
				Some(Value::List(merged))
			}
			Self::Dict => {
				let chain: Vec<&ClassRef> = class.mro().collect();
				let mut merged: Option<IndexMap<String, Value>> = None;
				for c in chain.iter().rev() {
					if let Some(Value::Map(map)) = c.slots().get(key) {
						let acc = merged.get_or_insert_with(IndexMap::new);
						for (k, v) in map {
							acc.insert(k.clone(), v.clone());
						}
					}
				}
				merged.map(Value::Map)
			}
		}
	}
}
