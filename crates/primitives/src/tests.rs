use proptest::prelude::*;

use crate::{
	ClassBuilder, ClassRef, HierarchyError, InstanceBuilder, InterfaceRef, Member, MethodBuilder,
	NamespaceBuilder, NamespaceResolver, NamespaceTable, Value,
};

fn class(name: &str, bases: &[&ClassRef]) -> ClassRef {
	let mut b = ClassBuilder::new("app", name);
	for base in bases {
		b = b.base(base);
	}
	b.build().unwrap()
}

fn names(c: &ClassRef) -> Vec<String> {
	c.mro().map(|c| c.name().to_string()).collect()
}

#[test]
fn test_mro_single_chain() {
	let a = class("A", &[]);
	let b = class("B", &[&a]);
	let c = class("C", &[&b]);
	assert_eq!(names(&c), ["C", "B", "A"]);
	assert!(c.is_subclass_of(&a));
	assert!(!a.is_subclass_of(&c));
}

#[test]
fn test_mro_diamond_visits_shared_base_last() {
	let a = class("A", &[]);
	let b = class("B", &[&a]);
	let c = class("C", &[&a]);
	let d = class("D", &[&b, &c]);
	assert_eq!(names(&d), ["D", "B", "C", "A"]);
}

#[test]
fn test_mro_inconsistent_order_is_rejected() {
	let a = class("A", &[]);
	let b = class("B", &[&a]);
	let err = ClassBuilder::new("app", "X")
		.base(&a)
		.base(&b)
		.build()
		.unwrap_err();
	assert!(matches!(err, HierarchyError::Inconsistent { .. }), "{err}");
}

#[test]
fn test_duplicate_base_is_rejected() {
	let a = class("A", &[]);
	let err = ClassBuilder::new("app", "X")
		.base(&a)
		.base(&a)
		.build()
		.unwrap_err();
	assert!(matches!(err, HierarchyError::DuplicateBase { .. }));
}

#[test]
fn test_public_methods_resolve_to_most_derived_owner() {
	let base = ClassBuilder::new("app", "Base")
		.method(MethodBuilder::new("render").build())
		.method(MethodBuilder::new("update").build())
		.method(MethodBuilder::new("_hidden").build())
		.build()
		.unwrap();
	let derived = ClassBuilder::new("app", "Derived")
		.base(&base)
		.method(MethodBuilder::new("update").build())
		.method(MethodBuilder::new("extra").build())
		.build()
		.unwrap();

	let methods = derived.public_methods();
	let listed: Vec<(&str, &str)> = methods
		.iter()
		.map(|m| (m.name(), m.owner.name()))
		.collect();
	assert_eq!(
		listed,
		[("extra", "Derived"), ("render", "Base"), ("update", "Derived")]
	);
}

#[test]
fn test_implements_follows_ancestors_and_extension() {
	let icontext = InterfaceRef::new("app", "IContext", &[]);
	let ispecial = InterfaceRef::new("app", "ISpecial", &[icontext.clone()]);
	let a = ClassBuilder::new("app", "A").implements(&ispecial).build().unwrap();
	let b = class("B", &[&a]);
	assert!(b.implements(&icontext));
	assert!(b.implements(&ispecial));
	let other = InterfaceRef::new("app", "IOther", &[]);
	assert!(!b.implements(&other));
}

#[test]
fn test_locally_defined_members_excludes_imports() {
	let local = ClassBuilder::new("pkg.mod", "Local").build().unwrap();
	let foreign = ClassBuilder::new("pkg.other", "Foreign").build().unwrap();
	let inst = InstanceBuilder::new(&foreign).module("pkg.mod").build();
	let ns = NamespaceBuilder::new("pkg.mod")
		.class(&local)
		.class(&foreign)
		.instance("thing", &inst)
		.value("answer", Value::Int(42))
		.build();

	assert_eq!(ns.locally_defined_members(), ["Local", "thing"]);
	assert_eq!(ns.member_names(), ["Foreign", "Local", "answer", "thing"]);
	assert_eq!(ns.short_name(), "mod");
}

#[test]
fn test_namespace_table_resolves_members() {
	let local = ClassBuilder::new("pkg.mod", "Local").build().unwrap();
	let sub = NamespaceBuilder::new("pkg.mod").class(&local).build();
	let root = NamespaceBuilder::new("pkg").sub(sub).build();
	let table = NamespaceTable::new().with_tree(&root);

	assert_eq!(table.len(), 2);
	assert!(root.is_package());
	assert!(matches!(table.resolve_entity("pkg.mod"), Some(Member::Namespace(_))));
	match table.resolve_entity("pkg.mod.Local") {
		Some(Member::Class(c)) => assert_eq!(c, local),
		other => panic!("unexpected {other:?}"),
	}
	assert!(table.resolve_entity("pkg.mod.Missing").is_none());
}

#[test]
fn test_value_pair_round_trip() {
	let pair = Value::pair("k", 1);
	assert_eq!(pair.as_pair(), Some(("k", &Value::Int(1))));
	assert_eq!(Value::Int(1).as_pair(), None);
}

proptest! {
	#[test]
	fn prop_linear_chain_mro_is_reverse_declaration_order(depth in 1usize..12) {
		let mut chain: Vec<ClassRef> = Vec::new();
		for i in 0..depth {
			let mut b = ClassBuilder::new("app", format!("C{i}"));
			if let Some(parent) = chain.last() {
				b = b.base(parent);
			}
			chain.push(b.build().unwrap());
		}
		let leaf = chain.last().unwrap();
		let mro: Vec<ClassRef> = leaf.mro().cloned().collect();
		let expected: Vec<ClassRef> = chain.iter().rev().cloned().collect();
		prop_assert_eq!(mro, expected);
	}
}

#[test]
fn test_build_single_matches_linearized_chain() {
	let a = class("A", &[]);
	let b = ClassBuilder::new("app", "B").base(&a).base(&a).build_single(Some(&a));
	assert_eq!(names(&b), ["B", "A"]);
	assert_eq!(b.bases(), [a]);
	let root = ClassBuilder::new("app", "Root").build_single(None);
	assert_eq!(names(&root), ["Root"]);
}
