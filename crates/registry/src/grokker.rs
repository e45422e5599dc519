use std::sync::Arc;

use grok_directive::builtin::{COMPONENT, PRIORITY};
use grok_directive::{BoundDirective, Data, ResolveCx, ResolveError};
use grok_primitives::{ClassRef, Entity, InstanceRef, NamespaceRef, ResolvedMethod, Value};

use crate::{GrokContext, GrokError, GrokkerFactory, RegistryError};

/// Handles classes deriving from its target type.
pub trait ClassGrokker: Send + Sync {
	/// Directives resolved for every matched class, in order. Each
	/// resolution sees the values resolved before it.
	fn directives(&self) -> Vec<BoundDirective> {
		Vec::new()
	}

	fn execute(&self, class: &ClassRef, data: &Data, ctx: &mut GrokContext<'_>) -> Result<bool, GrokError>;
}

/// Handles each public method a matched class adds over its target type.
pub trait MethodGrokker: Send + Sync {
	/// Directives resolved at class level. A value declared on a method
	/// overrides the class-level value for that method only.
	fn directives(&self) -> Vec<BoundDirective> {
		Vec::new()
	}

	fn execute(
		&self,
		class: &ClassRef,
		method: &ResolvedMethod,
		data: &Data,
		ctx: &mut GrokContext<'_>,
	) -> Result<bool, GrokError>;
}

/// Handles instances whose class derives from its target type.
pub trait InstanceGrokker: Send + Sync {
	fn grok(&self, name: &str, instance: &InstanceRef, ctx: &mut GrokContext<'_>) -> Result<bool, GrokError>;
}

/// Runs once per namespace pass.
pub trait GlobalGrokker: Send + Sync {
	fn grok(&self, name: &str, namespace: &NamespaceRef, ctx: &mut GrokContext<'_>) -> Result<bool, GrokError>;
}

/// Dispatch shape, fixed when the grokker class is declared.
pub enum GrokkerShape {
	Global(Box<dyn GlobalGrokker>),
	Class(Box<dyn ClassGrokker>),
	Method(Box<dyn MethodGrokker>),
	Instance(Box<dyn InstanceGrokker>),
}

impl GrokkerShape {
	pub fn name(&self) -> &'static str {
		match self {
			Self::Global(_) => "global",
			Self::Class(_) => "class",
			Self::Method(_) => "method",
			Self::Instance(_) => "instance",
		}
	}

	/// Whether the shape is keyed by a target type.
	pub fn is_targeted(&self) -> bool {
		!matches!(self, Self::Global(_))
	}
}

impl core::fmt::Debug for GrokkerShape {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		write!(f, "GrokkerShape::{}", self.name())
	}
}

/// A grokker instance: its declaring class plus the handler itself.
#[derive(Debug)]
pub struct Grokker {
	class: ClassRef,
	target: Option<ClassRef>,
	shape: GrokkerShape,
}

pub type GrokkerRef = Arc<Grokker>;

impl Grokker {
	/// Pairs `shape` with the class that declares it, reading the target
	/// type from the class's `component` directive.
	pub fn new(class: &ClassRef, shape: GrokkerShape) -> Result<GrokkerRef, RegistryError> {
		let target = COMPONENT
			.read(&Entity::Class(class.clone()))
			.and_then(|v| v.as_class().cloned());
		if shape.is_targeted() && target.is_none() {
			return Err(RegistryError::MissingTarget {
				grokker: class.to_string(),
			});
		}
		Ok(Self::with_target(class, target, shape))
	}

	pub(crate) fn with_target(class: &ClassRef, target: Option<ClassRef>, shape: GrokkerShape) -> GrokkerRef {
		Arc::new(Self {
			class: class.clone(),
			target,
			shape,
		})
	}

	/// Instantiates a grokker class declared with [`crate::GrokkerDecl`].
	pub fn from_class(class: &ClassRef) -> Result<GrokkerRef, RegistryError> {
		let Some(factory) = class.payload::<GrokkerFactory>() else {
			return Err(RegistryError::NotAGrokker {
				class: class.to_string(),
			});
		};
		Self::new(class, factory.instantiate())
	}

	pub fn class(&self) -> &ClassRef {
		&self.class
	}

	pub fn target(&self) -> Option<&ClassRef> {
		self.target.as_ref()
	}

	pub fn shape(&self) -> &GrokkerShape {
		&self.shape
	}

	/// Ordering key; higher runs first. Read from the class on every call.
	pub fn priority(&self) -> i64 {
		PRIORITY
			.bind()
			.get(&Entity::Class(self.class.clone()), &ResolveCx::detached())
			.ok()
			.flatten()
			.and_then(|v| v.as_int())
			.unwrap_or(0)
	}

	/// Runs the grokker against `entity`, found under `name`.
	pub fn grok(&self, name: &str, entity: &Entity, ctx: &mut GrokContext<'_>) -> Result<bool, GrokError> {
		tracing::trace!(grokker = %self.class, shape = self.shape.name(), entity = %entity, "grok");
		match (&self.shape, entity) {
			(GrokkerShape::Class(g), Entity::Class(class)) => {
				let data = resolve_directives(&g.directives(), class, ctx)?;
				g.execute(class, &data, ctx)
			}
			(GrokkerShape::Method(g), Entity::Class(class)) => self.grok_methods(g.as_ref(), class, ctx),
			(GrokkerShape::Instance(g), Entity::Instance(instance)) => g.grok(name, instance, ctx),
			(GrokkerShape::Global(g), Entity::Namespace(namespace)) => g.grok(name, namespace, ctx),
			_ => Err(GrokError::ShapeMismatch {
				grokker: self.class.to_string(),
				entity: entity.to_string(),
			}),
		}
	}

	fn grok_methods(
		&self,
		g: &dyn MethodGrokker,
		class: &ClassRef,
		ctx: &mut GrokContext<'_>,
	) -> Result<bool, GrokError> {
		let directives = g.directives();
		let data = resolve_directives(&directives, class, ctx)?;

		let inherited = self.target.as_ref().map(ClassRef::public_methods).unwrap_or_default();
		let methods: Vec<ResolvedMethod> = class
			.public_methods()
			.into_iter()
			.filter(|m| !inherited.contains(m))
			.collect();
		if methods.is_empty() {
			return Err(GrokError::NoPublicMethods {
				class: Entity::Class(class.clone()).to_string(),
			});
		}

		let mut grokked = false;
		for method in &methods {
			let mut method_data = data.clone();
			let on_method = Entity::Method(method.method.clone());
			for bound in &directives {
				if let Some(value) = bound.directive().read(&on_method) {
					method_data.insert(bound.name().to_string(), value);
				}
			}
			grokked |= g.execute(class, method, &method_data, ctx)?;
		}
		Ok(grokked)
	}
}

impl core::fmt::Display for Grokker {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		write!(f, "{}", self.class)
	}
}

/// Resolves `directives` for `class` on top of the pass data.
fn resolve_directives(
	directives: &[BoundDirective],
	class: &ClassRef,
	ctx: &GrokContext<'_>,
) -> Result<Data, GrokError> {
	let mut data = ctx.data().clone();
	let entity = Entity::Class(class.clone());
	for bound in directives {
		let value: Option<Value> = bound.get(&entity, &ctx.resolve_cx(&data))?;
		let Some(value) = value else {
			return Err(ResolveError::Unresolved {
				directive: bound.directive().dotted_name().to_string(),
				entity: entity.to_string(),
			}
			.into());
		};
		data.insert(bound.name().to_string(), value);
	}
	Ok(data)
}
