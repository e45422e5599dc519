use grok_directive::{Data, ResolveCx};
use grok_primitives::{NamespaceRef, NamespaceResolver};

use crate::GrokkerRef;

/// State visible to a single grokker invocation.
///
/// Grokkers declared during a pass are announced here rather than written
/// into the registry directly; the orchestrator registers them once the
/// invocation returns.
pub struct GrokContext<'a> {
	namespace: &'a NamespaceRef,
	resolver: &'a dyn NamespaceResolver,
	data: &'a Data,
	announced: Vec<GrokkerRef>,
}

impl<'a> GrokContext<'a> {
	pub fn new(namespace: &'a NamespaceRef, resolver: &'a dyn NamespaceResolver, data: &'a Data) -> Self {
		Self {
			namespace,
			resolver,
			data,
			announced: Vec::new(),
		}
	}

	/// Namespace being grokked.
	pub fn namespace(&self) -> &'a NamespaceRef {
		self.namespace
	}

	pub fn resolver(&self) -> &'a dyn NamespaceResolver {
		self.resolver
	}

	/// Pass data shared by every grokker in this pass.
	pub fn data(&self) -> &'a Data {
		self.data
	}

	/// Resolution context over `data` within the grokked namespace.
	pub fn resolve_cx<'d>(&self, data: &'d Data) -> ResolveCx<'d>
	where
		'a: 'd,
	{
		ResolveCx::new(self.resolver, data).in_namespace(self.namespace)
	}

	/// Queues `grokker` for registration after the current invocation.
	pub fn announce(&mut self, grokker: GrokkerRef) {
		self.announced.push(grokker);
	}

	pub fn announced(&self) -> &[GrokkerRef] {
		&self.announced
	}

	pub(crate) fn take_announced(&mut self) -> Vec<GrokkerRef> {
		std::mem::take(&mut self.announced)
	}
}
