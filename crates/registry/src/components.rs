//! Built-in grokker base classes and the meta-grokkers that register
//! grokker classes as they are discovered.

use std::sync::{Arc, LazyLock};

use grok_directive::Data;
use grok_directive::builtin::{BASECLASS, COMPONENT};
use grok_primitives::{ClassBuilder, ClassRef, NamespaceBuilder, NamespaceRef, Value};

use crate::{ClassGrokker, GrokContext, GrokError, Grokker, GrokkerFactory, GrokkerRef, GrokkerShape};

/// Namespace the built-in classes are declared in.
pub const NAMESPACE: &str = "grok.components";

fn base_class(name: &str, parent: Option<&ClassRef>) -> ClassRef {
	let mut builder = ClassBuilder::new(NAMESPACE, name);
	BASECLASS.set(&mut builder, Value::Bool(true));
	builder.build_single(parent)
}

pub static CLASS_GROKKER: LazyLock<ClassRef> = LazyLock::new(|| base_class("ClassGrokker", None));
pub static METHOD_GROKKER: LazyLock<ClassRef> =
	LazyLock::new(|| base_class("MethodGrokker", Some(&*CLASS_GROKKER)));
pub static INSTANCE_GROKKER: LazyLock<ClassRef> = LazyLock::new(|| base_class("InstanceGrokker", None));
pub static GLOBAL_GROKKER: LazyLock<ClassRef> = LazyLock::new(|| base_class("GlobalGrokker", None));

/// Instantiates each grokker class it matches and announces it.
struct MetaGrokker;

impl ClassGrokker for MetaGrokker {
	fn execute(&self, class: &ClassRef, _data: &Data, ctx: &mut GrokContext<'_>) -> Result<bool, GrokError> {
		let grokker = Grokker::from_class(class)?;
		tracing::debug!(
			grokker = %class,
			shape = grokker.shape().name(),
			namespace = ctx.namespace().qualified_name(),
			"discovered grokker"
		);
		ctx.announce(grokker);
		Ok(true)
	}
}

fn meta_class(name: &str, target: &ClassRef) -> ClassRef {
	let factory = GrokkerFactory::new(|| GrokkerShape::Class(Box::new(MetaGrokker)));
	let mut builder = ClassBuilder::new(NAMESPACE, name).payload(Arc::new(factory));
	COMPONENT.set(&mut builder, Value::from(target));
	builder.build_single(Some(&*CLASS_GROKKER))
}

pub static CLASS_META_GROKKER: LazyLock<ClassRef> =
	LazyLock::new(|| meta_class("ClassMetaGrokker", &CLASS_GROKKER));
pub static INSTANCE_META_GROKKER: LazyLock<ClassRef> =
	LazyLock::new(|| meta_class("InstanceMetaGrokker", &INSTANCE_GROKKER));
pub static GLOBAL_META_GROKKER: LazyLock<ClassRef> =
	LazyLock::new(|| meta_class("GlobalMetaGrokker", &GLOBAL_GROKKER));

/// The `grok.components` namespace holding every built-in class.
pub static COMPONENTS: LazyLock<NamespaceRef> = LazyLock::new(|| {
	[
		&*CLASS_GROKKER,
		&*METHOD_GROKKER,
		&*INSTANCE_GROKKER,
		&*GLOBAL_GROKKER,
		&*CLASS_META_GROKKER,
		&*INSTANCE_META_GROKKER,
		&*GLOBAL_META_GROKKER,
	]
	.into_iter()
	.fold(NamespaceBuilder::new(NAMESPACE), NamespaceBuilder::class)
	.build()
});

/// Fresh instances of the three meta-grokkers.
pub fn meta_grokkers() -> Vec<GrokkerRef> {
	[
		(&*CLASS_META_GROKKER, &*CLASS_GROKKER),
		(&*INSTANCE_META_GROKKER, &*INSTANCE_GROKKER),
		(&*GLOBAL_META_GROKKER, &*GLOBAL_GROKKER),
	]
	.into_iter()
	.map(|(meta, target)| {
		Grokker::with_target(meta, Some(target.clone()), GrokkerShape::Class(Box::new(MetaGrokker)))
	})
	.collect()
}
