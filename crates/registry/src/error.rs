use grok_directive::{DeclarationError, ResolveError};
use grok_primitives::HierarchyError;

/// Errors raised while turning a class into a registered grokker.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
	/// A class- or instance-targeted grokker without a target type.
	#[error("grokker {grokker} has no target type; declare one with the 'component' directive")]
	MissingTarget { grokker: String },

	/// The class carries no grokker constructor.
	#[error("{class} is not a grokker class")]
	NotAGrokker { class: String },
}

/// Errors raised while reading discovery configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("failed to parse discovery config: {0}")]
	Parse(#[from] toml::de::Error),

	#[error("invalid exclude pattern: {0}")]
	Pattern(#[from] globset::Error),

	#[error("data.{key}: {kind} values are not supported")]
	Unsupported { key: String, kind: &'static str },
}

/// Top-level error for a grok pass.
#[derive(Debug, thiserror::Error)]
pub enum GrokError {
	#[error(transparent)]
	Resolve(#[from] ResolveError),

	#[error(transparent)]
	Declaration(#[from] DeclarationError),

	#[error(transparent)]
	Hierarchy(#[from] HierarchyError),

	#[error(transparent)]
	Registry(#[from] RegistryError),

	#[error(transparent)]
	Config(#[from] ConfigError),

	/// A method-targeted grokker matched a class that contributes no public
	/// methods beyond its target type.
	#[error(
		"{class} does not define any public methods. Please add methods to this class to enable its registration."
	)]
	NoPublicMethods { class: String },

	/// A grokker was handed an entity of the wrong kind.
	#[error("{grokker} cannot grok {entity}")]
	ShapeMismatch { grokker: String, entity: String },

	#[error("no namespace named '{0}' has been loaded")]
	UnknownNamespace(String),

	/// A prepare, finalize or execute callback failed.
	#[error("{0}")]
	Hook(String),
}

impl GrokError {
	pub fn hook(message: impl Into<String>) -> Self {
		GrokError::Hook(message.into())
	}
}
