use grok_primitives::SiteKind;

/// Where a directive may be declared and where it is looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
	/// Class bodies (and the methods inside them).
	Class,
	/// Namespace bodies.
	Module,
	/// Either; lookups fall back from the class to its namespace.
	ClassOrModule,
}

impl Scope {
	pub const fn description(self) -> &'static str {
		match self {
			Scope::Class => "class",
			Scope::Module => "module",
			Scope::ClassOrModule => "class or module",
		}
	}

	/// Returns true if a directive of this scope may be declared on `site`.
	///
	/// Methods are declared inside a class body, so class scope covers them.
	/// Instances never accept declarations; values reach them through
	/// [`crate::Directive::set`].
	pub const fn allows(self, site: SiteKind) -> bool {
		matches!(
			(self, site),
			(Scope::Class, SiteKind::Class | SiteKind::Method)
				| (Scope::Module, SiteKind::Module)
				| (Scope::ClassOrModule, SiteKind::Class | SiteKind::Method | SiteKind::Module)
		)
	}
}

impl core::fmt::Display for Scope {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.write_str(self.description())
	}
}
