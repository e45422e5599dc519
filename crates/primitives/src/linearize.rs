//! C3 linearization of class ancestors.

use std::collections::VecDeque;

use crate::{ClassRef, HierarchyError};

/// Computes the ancestor chain of a class with the given direct bases,
/// most-derived first, excluding the class itself.
pub(crate) fn linearize(class: &str, bases: &[ClassRef]) -> Result<Vec<ClassRef>, HierarchyError> {
	let mut seqs: Vec<VecDeque<ClassRef>> = bases
		.iter()
		.map(|b| b.mro().cloned().collect())
		.collect();
	seqs.push(bases.iter().cloned().collect());

	let mut out = Vec::new();
	loop {
		seqs.retain(|s| !s.is_empty());
		if seqs.is_empty() {
			return Ok(out);
		}

		// A head is admissible when it does not appear in the tail of any sequence.
		let head = seqs
			.iter()
			.filter_map(|s| s.front())
			.find(|cand| !seqs.iter().any(|s| s.iter().skip(1).any(|c| c == *cand)))
			.cloned();

		let Some(head) = head else {
			return Err(HierarchyError::Inconsistent {
				class: class.to_string(),
				bases: bases
					.iter()
					.map(ToString::to_string)
					.collect::<Vec<_>>()
					.join(", "),
			});
		};

		for seq in &mut seqs {
			if seq.front() == Some(&head) {
				seq.pop_front();
			}
		}
		out.push(head);
	}
}
