mod common;

use std::sync::{Arc, LazyLock};

use common::{GlobalRecorder, Log, MethodRecorder, class, class_recorder, init_tracing};
use grok_directive::builtin::{BASECLASS, IGNORE};
use grok_directive::{
	BoundDirective, ClassPredicate, Data, Directive, DirectiveRef, ResolveError, Scope, UniqueSibling,
};
use grok_primitives::{
	ClassBuilder, ClassRef, Entity, InterfaceRef, Member, MethodBuilder, NamespaceBuilder, NamespaceRef,
	NamespaceTable, Value,
};
use grok_registry::{
	ClassGrokker, GrokContext, GrokError, Grokker, GrokkerDecl, ModuleGrokker, Registry,
};
use pretty_assertions::assert_eq;

static TITLE: LazyLock<DirectiveRef> =
	LazyLock::new(|| Directive::once("app", "title", Scope::Class).into_ref());
static CONTEXT: LazyLock<DirectiveRef> =
	LazyLock::new(|| Directive::once("app", "context", Scope::ClassOrModule).into_ref());
static ICONTEXT: LazyLock<InterfaceRef> = LazyLock::new(|| InterfaceRef::new("app", "IContext", &[]));

/// Resolves `context` and `title`, then records what it saw.
struct ViewGrokker {
	log: Log,
}

impl ClassGrokker for ViewGrokker {
	fn directives(&self) -> Vec<BoundDirective> {
		let sibling = UniqueSibling::new(ClassPredicate::Implements(ICONTEXT.clone()), "context", "context");
		vec![
			CONTEXT
				.bind()
				.with_get_default(move |entity, ns, _| sibling.lookup(entity, ns)),
			TITLE.bind().with_get_default(|entity, _, data| {
				let context = data.get("context").and_then(Value::as_class).map(|c| c.name().to_string());
				let class = entity.as_class().map(|c| c.name().to_lowercase());
				Ok(class.map(|c| Value::Str(format!("{c}@{}", context.unwrap_or_default()))))
			}),
		]
	}

	fn execute(&self, class: &ClassRef, data: &Data, _ctx: &mut GrokContext<'_>) -> Result<bool, GrokError> {
		let context = data.get("context").and_then(Value::as_class).map(|c| c.name().to_string());
		let title = data.get("title").and_then(Value::as_str).unwrap_or_default();
		self.log
			.lock()
			.push(format!("{} context={} title={title}", class.name(), context.unwrap_or_default()));
		Ok(true)
	}
}

fn view_grokker(view_base: &ClassRef, log: &Log) -> ModuleGrokker {
	let log = log.clone();
	let decl = GrokkerDecl::class("app.grokkers", "ViewGrokker", move || ViewGrokker { log: log.clone() })
		.target(view_base)
		.unwrap()
		.build()
		.unwrap();
	let mut registry = Registry::new();
	registry.register_class(&decl).unwrap();
	ModuleGrokker::new(registry)
}

fn views_namespace(view_base: &ClassRef) -> (NamespaceRef, NamespaceTable) {
	let ctx = ClassBuilder::new("app.views", "Ctx")
		.implements(&ICONTEXT)
		.build()
		.unwrap();
	let mut titled = ClassBuilder::new("app.views", "Titled").base(view_base);
	TITLE.declare(&mut titled, [Value::from("explicit")]).unwrap();
	let titled = titled.build().unwrap();
	let plain = class("app.views", "Plain", &[view_base]);

	let ns = NamespaceBuilder::new("app.views")
		.class(&ctx)
		.class(&titled)
		.class(&plain)
		.build();
	let table = NamespaceTable::new().with_tree(&ns);
	(ns, table)
}

#[test]
fn class_grokker_resolves_directives_in_order() {
	init_tracing();
	let log = Log::default();
	let view_base = class("app.base", "View", &[]);
	let (ns, table) = views_namespace(&view_base);
	let mut grokker = view_grokker(&view_base, &log).with_resolver(Arc::new(table));

	assert!(grokker.grok("app.views", &ns, &Data::new()).unwrap());
	assert_eq!(
		*log.lock(),
		[
			"Plain context=Ctx title=plain@Ctx",
			"Titled context=Ctx title=explicit",
		]
	);
}

#[test]
fn sibling_scan_sees_grokked_namespace_without_a_resolver() {
	let log = Log::default();
	let view_base = class("app.base", "View", &[]);
	let ctx = ClassBuilder::new("app.views", "Ctx")
		.implements(&ICONTEXT)
		.build()
		.unwrap();
	let plain = class("app.views", "Plain", &[&view_base]);
	let ns = NamespaceBuilder::new("app.views").class(&ctx).class(&plain).build();

	let mut grokker = view_grokker(&view_base, &log);
	assert!(grokker.grok("app.views", &ns, &Data::new()).unwrap());
	assert_eq!(*log.lock(), ["Plain context=Ctx title=plain@Ctx"]);
}

#[test]
fn module_level_value_beats_sibling_scan() {
	let log = Log::default();
	let view_base = class("app.base", "View", &[]);
	let ctx = class("app.views", "Other", &[]);
	let plain = class("app.views", "Plain", &[&view_base]);
	let mut nb = NamespaceBuilder::new("app.views");
	CONTEXT.declare(&mut nb, [Value::from(&ctx)]).unwrap();
	let ns = nb.class(&plain).build();

	let mut grokker = view_grokker(&view_base, &log);
	grokker.grok("app.views", &ns, &Data::new()).unwrap();
	assert_eq!(*log.lock(), ["Plain context=Other title=plain@Other"]);
}

#[test]
fn first_default_failure_surfaces_from_the_grokked_class() {
	let log = Log::default();
	let view_base = class("app.base", "View", &[]);
	let lonely = class("app.lonely", "Lonely", &[&view_base]);
	let ns = NamespaceBuilder::new("app.lonely").class(&lonely).build();
	let table = NamespaceTable::new().with_tree(&ns);
	let mut grokker = view_grokker(&view_base, &log).with_resolver(Arc::new(table));

	let err = grokker.grok("app.lonely", &ns, &Data::new()).unwrap_err();
	assert_eq!(
		err.to_string(),
		"No module-level context for <class app.lonely.Lonely>, please use the 'context' directive."
	);
	assert!(log.lock().is_empty());
}

struct Strict;

impl ClassGrokker for Strict {
	fn directives(&self) -> Vec<BoundDirective> {
		vec![TITLE.bind().with_get_default(|_, _, _| Ok(None))]
	}

	fn execute(&self, _class: &ClassRef, _data: &Data, _ctx: &mut GrokContext<'_>) -> Result<bool, GrokError> {
		Ok(true)
	}
}

#[test]
fn unresolved_directive_is_an_error() {
	let base = class("app", "Base", &[]);
	let strict = GrokkerDecl::class("app", "Strict", || Strict)
		.target(&base)
		.unwrap()
		.build()
		.unwrap();
	let mut registry = Registry::new();
	registry.register_class(&strict).unwrap();
	let member = class("app", "Member", &[&base]);
	let ns = NamespaceBuilder::new("app").class(&member).build();

	let err = ModuleGrokker::new(registry)
		.grok("app", &ns, &Data::new())
		.unwrap_err();
	assert!(
		matches!(&err, GrokError::Resolve(ResolveError::Unresolved { directive, .. }) if directive == "app.title"),
		"{err}"
	);
}

fn method_registry(target: &ClassRef, log: &Log) -> Registry {
	let log = log.clone();
	let decl = GrokkerDecl::method("app.grokkers", "Handlers", move || MethodRecorder { log: log.clone() })
		.target(target)
		.unwrap()
		.build()
		.unwrap();
	let mut registry = Registry::new();
	registry.register_class(&decl).unwrap();
	registry
}

#[test]
fn method_grokker_runs_per_contributed_method() {
	let log = Log::default();
	let handler = ClassBuilder::new("app.base", "Handler")
		.method(MethodBuilder::new("setup").build())
		.build()
		.unwrap();
	let concrete = ClassBuilder::new("app.handlers", "Concrete")
		.base(&handler)
		.method(MethodBuilder::new("render").build())
		.method(MethodBuilder::new("update").build())
		.method(MethodBuilder::new("_private").build())
		.build()
		.unwrap();
	let ns = NamespaceBuilder::new("app.handlers").class(&concrete).build();

	let mut grokker = ModuleGrokker::new(method_registry(&handler, &log));
	assert!(grokker.grok("app.handlers", &ns, &Data::new()).unwrap());
	assert_eq!(*log.lock(), ["Concrete.render", "Concrete.update"]);
}

#[test]
fn method_grokker_rejects_class_without_contributions() {
	let log = Log::default();
	let handler = ClassBuilder::new("app.base", "Handler")
		.method(MethodBuilder::new("setup").build())
		.build()
		.unwrap();
	let empty = class("app.handlers", "Empty", &[&handler]);
	let ns = NamespaceBuilder::new("app.handlers").class(&empty).build();

	let err = ModuleGrokker::new(method_registry(&handler, &log))
		.grok("app.handlers", &ns, &Data::new())
		.unwrap_err();
	assert!(matches!(err, GrokError::NoPublicMethods { .. }));
	assert_eq!(
		err.to_string(),
		"<class app.handlers.Empty> does not define any public methods. Please add methods to this class to enable its registration."
	);
}

/// Reports `title` per method, returning true only for `hit`.
struct TitlePerMethod {
	log: Log,
	hit: &'static str,
}

impl grok_registry::MethodGrokker for TitlePerMethod {
	fn directives(&self) -> Vec<BoundDirective> {
		vec![TITLE.bind().with_default(Value::from("class-level"))]
	}

	fn execute(
		&self,
		_class: &ClassRef,
		method: &grok_primitives::ResolvedMethod,
		data: &Data,
		_ctx: &mut GrokContext<'_>,
	) -> Result<bool, GrokError> {
		let title = data.get("title").and_then(Value::as_str).unwrap_or_default();
		self.log.lock().push(format!("{}={title}", method.name()));
		Ok(method.name() == self.hit)
	}
}

#[test]
fn method_level_directive_overrides_only_that_method() {
	let log = Log::default();
	let handler = class("app.base", "Handler", &[]);
	let mut update = MethodBuilder::new("update");
	TITLE.declare(&mut update, [Value::from("method-level")]).unwrap();
	let concrete = ClassBuilder::new("app.handlers", "Concrete")
		.base(&handler)
		.method(MethodBuilder::new("render").build())
		.method(update.build())
		.build()
		.unwrap();
	let ns = NamespaceBuilder::new("app.handlers").class(&concrete).build();

	let decl = {
		let log = log.clone();
		GrokkerDecl::method("app.grokkers", "Titles", move || TitlePerMethod {
			log: log.clone(),
			hit: "render",
		})
			.target(&handler)
			.unwrap()
			.build()
			.unwrap()
	};
	let mut registry = Registry::new();
	registry.register_class(&decl).unwrap();

	assert!(ModuleGrokker::new(registry).grok("app.handlers", &ns, &Data::new()).unwrap());
	assert_eq!(*log.lock(), ["render=class-level", "update=method-level"]);
}

#[test]
fn method_grokker_true_after_false_is_still_true() {
	let log = Log::default();
	let handler = class("app.base", "Handler", &[]);
	let concrete = ClassBuilder::new("app.handlers", "Concrete")
		.base(&handler)
		.method(MethodBuilder::new("render").build())
		.method(MethodBuilder::new("update").build())
		.build()
		.unwrap();
	let ns = NamespaceBuilder::new("app.handlers").class(&concrete).build();

	let decl = {
		let log = log.clone();
		GrokkerDecl::method("app.grokkers", "Titles", move || TitlePerMethod {
			log: log.clone(),
			hit: "update",
		})
		.target(&handler)
		.unwrap()
		.build()
		.unwrap()
	};
	let mut registry = Registry::new();
	registry.register_class(&decl).unwrap();

	assert!(ModuleGrokker::new(registry).grok("app.handlers", &ns, &Data::new()).unwrap());
	assert_eq!(*log.lock(), ["render=class-level", "update=class-level"]);
}

#[test]
fn global_grokker_runs_once_per_pass() {
	let log = Log::default();
	let global = {
		let log = log.clone();
		GrokkerDecl::global("app.grokkers", "Once", move || GlobalRecorder { log: log.clone() })
			.build()
			.unwrap()
	};
	let mut registry = Registry::new();
	registry.register_class(&global).unwrap();
	let a = class("app.mod", "A", &[]);
	let b = class("app.mod", "B", &[]);
	let ns = NamespaceBuilder::new("app.mod").class(&a).class(&b).build();

	let mut grokker = ModuleGrokker::new(registry);
	assert!(!grokker.grok("app.mod", &ns, &Data::new()).unwrap());
	assert_eq!(*log.lock(), ["global:app.mod"]);
}

#[test]
fn orchestrator_skips_members_it_must_not_grok() {
	let log = Log::default();
	let target = class("app.base", "Target", &[]);
	let foreign = class("app.elsewhere", "Foreign", &[&target]);
	let mut abstract_b = ClassBuilder::new("app.mod", "Abstract").base(&target);
	BASECLASS.declare(&mut abstract_b, []).unwrap();
	let abstract_c = abstract_b.build().unwrap();
	let dotted = class("app.mod", "Dotted", &[&target]);
	let ignored = class("app.mod", "Ignored", &[&target]);
	let kept = class("app.mod", "Kept", &[&target]);

	let mut nb = NamespaceBuilder::new("app.mod");
	IGNORE.declare(&mut nb, [Value::from("Ignored")]).unwrap();
	let ns = nb
		.class(&foreign)
		.class(&abstract_c)
		.import("pkg.Dotted", Member::Class(dotted))
		.class(&ignored)
		.class(&kept)
		.value("answer", Value::Int(42))
		.build();

	let mut registry = Registry::new();
	registry
		.register_class(&class_recorder("app.grokkers", "Rec", &target, &log))
		.unwrap();
	let mut grokker = ModuleGrokker::new(registry);
	grokker.grok("app.mod", &ns, &Data::new()).unwrap();
	assert_eq!(*log.lock(), ["Rec:Kept"]);
}

#[test]
fn prepare_feeds_data_and_finalize_runs_last() {
	let log = Log::default();
	let global = {
		let log = log.clone();
		GrokkerDecl::global("app.grokkers", "Once", move || GlobalRecorder { log: log.clone() })
			.build()
			.unwrap()
	};
	let mut registry = Registry::new();
	registry.register_class(&global).unwrap();
	let ns = NamespaceBuilder::new("app.mod").build();

	let finalize_log = log.clone();
	let mut grokker = ModuleGrokker::new(registry)
		.with_prepare(|_, _, data| {
			data.insert("site".to_string(), Value::from("main"));
			Ok(())
		})
		.with_finalize(move |name, _, _| {
			finalize_log.lock().push(format!("finalize:{name}"));
			Ok(())
		});
	grokker.grok("app.mod", &ns, &Data::new()).unwrap();
	assert_eq!(*log.lock(), ["global:app.mod site=main", "finalize:app.mod"]);
}

#[test]
fn failing_prepare_aborts_the_pass() {
	let log = Log::default();
	let target = class("app.base", "Target", &[]);
	let mut registry = Registry::new();
	registry
		.register_class(&class_recorder("app.grokkers", "Rec", &target, &log))
		.unwrap();
	let kept = class("app.mod", "Kept", &[&target]);
	let ns = NamespaceBuilder::new("app.mod").class(&kept).build();

	let mut grokker = ModuleGrokker::new(registry).with_prepare(|_, _, _| Err(GrokError::hook("not ready")));
	let err = grokker.grok("app.mod", &ns, &Data::new()).unwrap_err();
	assert_eq!(err.to_string(), "not ready");
	assert!(log.lock().is_empty());
}

#[test]
fn grokker_rejects_entity_of_wrong_shape() {
	let log = Log::default();
	let target = class("app.base", "Target", &[]);
	let g = Grokker::from_class(&class_recorder("app.grokkers", "Rec", &target, &log)).unwrap();
	let ns = NamespaceBuilder::new("app.mod").build();
	let data = Data::new();
	let table = NamespaceTable::new();
	let mut ctx = GrokContext::new(&ns, &table, &data);

	let err = g.grok("app.mod", &Entity::Namespace(ns.clone()), &mut ctx).unwrap_err();
	assert!(matches!(err, GrokError::ShapeMismatch { .. }), "{err}");
}
