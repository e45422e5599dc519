use grok_primitives::{Value, ValueKind};

use crate::DeclarationError;

/// A single declared parameter of a directive's factory.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
	name: String,
	kind: Option<ValueKind>,
	default: Option<Value>,
}

impl Param {
	pub fn name(&self) -> &str {
		&self.name
	}

	/// The accepted kind, or `None` if any value is accepted.
	pub fn kind(&self) -> Option<ValueKind> {
		self.kind
	}

	pub fn is_required(&self) -> bool {
		self.default.is_none()
	}
}

/// Positional parameter list a directive's arguments are checked against.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Signature {
	params: Vec<Param>,
	variadic: Option<Option<ValueKind>>,
}

impl Signature {
	/// No arguments at all.
	pub fn empty() -> Self {
		Self::default()
	}

	/// One required argument named `value` of any kind.
	pub fn value() -> Self {
		Self::empty().required("value", None)
	}

	pub fn required(mut self, name: impl Into<String>, kind: Option<ValueKind>) -> Self {
		self.params.push(Param {
			name: name.into(),
			kind,
			default: None,
		});
		self
	}

	pub fn optional(mut self, name: impl Into<String>, kind: Option<ValueKind>, default: Value) -> Self {
		self.params.push(Param {
			name: name.into(),
			kind,
			default: Some(default),
		});
		self
	}

	/// Accepts any number of trailing arguments of `kind`.
	pub fn variadic(mut self, kind: Option<ValueKind>) -> Self {
		self.variadic = Some(kind);
		self
	}

	pub fn params(&self) -> &[Param] {
		&self.params
	}

	fn required_count(&self) -> usize {
		self.params.iter().filter(|p| p.is_required()).count()
	}

	/// Checks `args` against the parameter list and fills in defaults for
	/// omitted optional parameters.
	pub fn bind(&self, directive: &str, mut args: Vec<Value>) -> Result<Vec<Value>, DeclarationError> {
		let required = self.required_count();
		let max = self.params.len();
		let given = args.len();

		if given < required || (self.variadic.is_none() && given > max) {
			return Err(DeclarationError::Arity(self.arity_message(directive, given)));
		}

		for (i, arg) in args.iter().enumerate() {
			let (name, kind) = match self.params.get(i) {
				Some(p) => (p.name.as_str(), p.kind),
				None => ("*args", self.variadic.flatten()),
			};
			if let Some(expected) = kind
				&& arg.kind() != expected
			{
				return Err(DeclarationError::Type {
					directive: directive.to_string(),
					param: name.to_string(),
					expected: expected.name(),
					got: arg.type_name(),
				});
			}
		}

		for param in self.params.iter().skip(given) {
			if let Some(default) = &param.default {
				args.push(default.clone());
			}
		}
		Ok(args)
	}

	fn arity_message(&self, directive: &str, given: usize) -> String {
		let required = self.required_count();
		let max = self.params.len();
		let (qualifier, count) = if self.variadic.is_some() || (given < required && required != max) {
			("at least", required)
		} else if required == max {
			("exactly", max)
		} else {
			("at most", max)
		};
		let plural = if count == 1 { "" } else { "s" };
		format!("{directive}() takes {qualifier} {count} argument{plural} ({given} given)")
	}
}
