#![allow(dead_code)]

use std::sync::Arc;

use grok_directive::Data;
use grok_primitives::{ClassBuilder, ClassRef, InstanceRef, NamespaceRef, ResolvedMethod};
use grok_registry::{
	ClassGrokker, GlobalGrokker, GrokContext, GrokError, GrokkerDecl, InstanceGrokker, MethodGrokker,
};
use parking_lot::Mutex;

pub type Log = Arc<Mutex<Vec<String>>>;

pub fn init_tracing() {
	let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

pub fn class(module: &str, name: &str, bases: &[&ClassRef]) -> ClassRef {
	bases
		.iter()
		.fold(ClassBuilder::new(module, name), |b, base| b.base(base))
		.build()
		.unwrap()
}

/// Records `label:Class` for every class it is handed.
pub struct ClassRecorder {
	pub label: &'static str,
	pub log: Log,
}

impl ClassGrokker for ClassRecorder {
	fn execute(&self, class: &ClassRef, _data: &Data, _ctx: &mut GrokContext<'_>) -> Result<bool, GrokError> {
		self.log.lock().push(format!("{}:{}", self.label, class.name()));
		Ok(true)
	}
}

pub struct MethodRecorder {
	pub log: Log,
}

impl MethodGrokker for MethodRecorder {
	fn execute(
		&self,
		class: &ClassRef,
		method: &ResolvedMethod,
		_data: &Data,
		_ctx: &mut GrokContext<'_>,
	) -> Result<bool, GrokError> {
		self.log.lock().push(format!("{}.{}", class.name(), method.name()));
		Ok(true)
	}
}

pub struct InstanceRecorder {
	pub log: Log,
}

impl InstanceGrokker for InstanceRecorder {
	fn grok(&self, name: &str, instance: &InstanceRef, _ctx: &mut GrokContext<'_>) -> Result<bool, GrokError> {
		self.log.lock().push(format!("instance:{name}:{}", instance.class().name()));
		Ok(true)
	}
}

pub struct GlobalRecorder {
	pub log: Log,
}

impl GlobalGrokker for GlobalRecorder {
	fn grok(&self, name: &str, _namespace: &NamespaceRef, ctx: &mut GrokContext<'_>) -> Result<bool, GrokError> {
		let seed = ctx
			.data()
			.get("site")
			.and_then(|v| v.as_str())
			.map(|s| format!(" site={s}"))
			.unwrap_or_default();
		self.log.lock().push(format!("global:{name}{seed}"));
		Ok(false)
	}
}

pub fn class_recorder(module: &str, label: &'static str, target: &ClassRef, log: &Log) -> ClassRef {
	let log = log.clone();
	GrokkerDecl::class(module, label, move || ClassRecorder {
		label,
		log: log.clone(),
	})
	.target(target)
	.unwrap()
	.build()
	.unwrap()
}
