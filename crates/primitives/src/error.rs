/// Errors raised while freezing a descriptor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HierarchyError {
	/// The same base class was listed twice.
	#[error("duplicate base class {base} in bases of {class}")]
	DuplicateBase { class: String, base: String },

	/// The bases admit no consistent ancestor order.
	#[error("cannot create a consistent method resolution order for {class} (bases {bases})")]
	Inconsistent { class: String, bases: String },
}
