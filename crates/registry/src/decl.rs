use std::sync::Arc;

use grok_directive::DeclarationError;
use grok_directive::builtin::{BASECLASS, COMPONENT, PRIORITY};
use grok_primitives::{
	ClassBuilder, ClassRef, DeclarationSite, DirectiveSlots, HierarchyError, MethodRef, SiteKind, Value,
};

use crate::components::{CLASS_GROKKER, GLOBAL_GROKKER, INSTANCE_GROKKER, METHOD_GROKKER};
use crate::{ClassGrokker, GlobalGrokker, GrokkerShape, InstanceGrokker, MethodGrokker};

/// Constructor stored on a grokker class; builds a fresh handler each time
/// the class is instantiated.
#[derive(Clone)]
pub struct GrokkerFactory(Arc<dyn Fn() -> GrokkerShape + Send + Sync>);

impl GrokkerFactory {
	pub fn new(f: impl Fn() -> GrokkerShape + Send + Sync + 'static) -> Self {
		Self(Arc::new(f))
	}

	pub fn instantiate(&self) -> GrokkerShape {
		(self.0)()
	}
}

impl core::fmt::Debug for GrokkerFactory {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.write_str("GrokkerFactory(..)")
	}
}

/// Declaration of a grokker class.
///
/// The built class derives from the built-in base matching its shape, so
/// the bootstrap meta-grokkers recognise it when it is found in a
/// namespace.
///
/// ```ignore
/// let grokker = GrokkerDecl::class("app.grokkers", "ViewGrokker", || ViewGrokker)
/// 	.target(&view_base)?
/// 	.priority(10)?
/// 	.build()?;
/// ```
pub struct GrokkerDecl {
	builder: ClassBuilder,
	shape_base: ClassRef,
}

impl GrokkerDecl {
	fn with_shape(module: &str, name: &str, shape_base: &ClassRef, factory: GrokkerFactory) -> Self {
		Self {
			builder: ClassBuilder::new(module, name).payload(Arc::new(factory)),
			shape_base: shape_base.clone(),
		}
	}

	pub fn class<G, F>(module: &str, name: &str, make: F) -> Self
	where
		G: ClassGrokker + 'static,
		F: Fn() -> G + Send + Sync + 'static,
	{
		let factory = GrokkerFactory::new(move || GrokkerShape::Class(Box::new(make())));
		Self::with_shape(module, name, &CLASS_GROKKER, factory)
	}

	pub fn method<G, F>(module: &str, name: &str, make: F) -> Self
	where
		G: MethodGrokker + 'static,
		F: Fn() -> G + Send + Sync + 'static,
	{
		let factory = GrokkerFactory::new(move || GrokkerShape::Method(Box::new(make())));
		Self::with_shape(module, name, &METHOD_GROKKER, factory)
	}

	pub fn instance<G, F>(module: &str, name: &str, make: F) -> Self
	where
		G: InstanceGrokker + 'static,
		F: Fn() -> G + Send + Sync + 'static,
	{
		let factory = GrokkerFactory::new(move || GrokkerShape::Instance(Box::new(make())));
		Self::with_shape(module, name, &INSTANCE_GROKKER, factory)
	}

	pub fn global<G, F>(module: &str, name: &str, make: F) -> Self
	where
		G: GlobalGrokker + 'static,
		F: Fn() -> G + Send + Sync + 'static,
	{
		let factory = GrokkerFactory::new(move || GrokkerShape::Global(Box::new(make())));
		Self::with_shape(module, name, &GLOBAL_GROKKER, factory)
	}

	/// Sets the type this grokker handles.
	pub fn target(mut self, class: &ClassRef) -> Result<Self, DeclarationError> {
		COMPONENT.declare(&mut self.builder, [Value::from(class)])?;
		Ok(self)
	}

	pub fn priority(mut self, priority: i64) -> Result<Self, DeclarationError> {
		PRIORITY.declare(&mut self.builder, [Value::Int(priority)])?;
		Ok(self)
	}

	/// Marks the class as inherit-only: it is never registered itself.
	pub fn base_only(mut self) -> Result<Self, DeclarationError> {
		BASECLASS.declare(&mut self.builder, [])?;
		Ok(self)
	}

	/// Derives from another grokker class, inheriting its target and
	/// priority.
	pub fn base(mut self, class: &ClassRef) -> Self {
		self.builder = self.builder.base(class);
		self
	}

	pub fn method_def(mut self, method: MethodRef) -> Self {
		self.builder = self.builder.method(method);
		self
	}

	pub fn build(self) -> Result<ClassRef, HierarchyError> {
		let mut builder = self.builder;
		if !builder.has_base(&self.shape_base) {
			builder = builder.base(&self.shape_base);
		}
		builder.build()
	}
}

impl DeclarationSite for GrokkerDecl {
	fn site_kind(&self) -> SiteKind {
		SiteKind::Class
	}

	fn site_name(&self) -> &str {
		self.builder.name()
	}

	fn slots_mut(&mut self) -> &mut DirectiveSlots {
		self.builder.slots_mut()
	}
}
