//! Validation predicates for directive arguments. Each checks the first
//! argument only.

use grok_primitives::Value;

use crate::{DeclarationError, Directive};

fn invalid(directive: &Directive, expected: &str) -> DeclarationError {
	DeclarationError::Invalid {
		directive: directive.name().to_string(),
		expected: expected.to_string(),
	}
}

/// Accepts a string, or bytes that are pure ASCII.
pub fn validate_text(directive: &Directive, args: &[Value]) -> Result<(), DeclarationError> {
	match args.first() {
		Some(Value::Str(_)) => Ok(()),
		Some(Value::Bytes(b)) if b.is_ascii() => Ok(()),
		_ => Err(invalid(directive, "unicode or ASCII")),
	}
}

pub fn validate_class(directive: &Directive, args: &[Value]) -> Result<(), DeclarationError> {
	match args.first() {
		Some(Value::Class(_)) => Ok(()),
		_ => Err(invalid(directive, "a class")),
	}
}

pub fn validate_interface(directive: &Directive, args: &[Value]) -> Result<(), DeclarationError> {
	match args.first() {
		Some(Value::Interface(_)) => Ok(()),
		_ => Err(invalid(directive, "an interface")),
	}
}

pub fn validate_interface_or_class(directive: &Directive, args: &[Value]) -> Result<(), DeclarationError> {
	match args.first() {
		Some(Value::Class(_) | Value::Interface(_)) => Ok(()),
		_ => Err(invalid(directive, "a class or an interface")),
	}
}
