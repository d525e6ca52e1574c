//! Affix expansion: derive every surface form a rule produces from a root

use crate::aff::{AffixEntry, AffixRule, Flag, RuleKind};
use std::collections::HashMap;

/// Continuation flags chain rules freely, so malformed files could loop
const MAX_CONTINUATION_DEPTH: usize = 16;

/// Apply one rule to a value, emitting every derived surface form in
/// entry declaration order, continuations included
pub(crate) fn expand(
	value: &str,
	rule: &AffixRule,
	rules: &HashMap<Flag, AffixRule>,
) -> Vec<String> {
	let mut forms = Vec::new();
	expand_into(value, rule, rules, 0, &mut forms);
	forms
}

fn expand_into(
	value: &str,
	rule: &AffixRule,
	rules: &HashMap<Flag, AffixRule>,
	depth: usize,
	forms: &mut Vec<String>,
) {
	if depth > MAX_CONTINUATION_DEPTH {
		return;
	}

	for entry in &rule.entries {
		let Some(form) = apply(value, rule.kind, entry) else {
			continue;
		};

		forms.push(form.clone());

		for flag in &entry.flags {
			if let Some(next) = rules.get(flag) {
				expand_into(&form, next, rules, depth + 1, forms);
			}
		}
	}
}

/// Apply a single entry, `None` when its condition or strip do not fit
fn apply(value: &str, kind: RuleKind, entry: &AffixEntry) -> Option<String> {
	if let Some(condition) = &entry.condition {
		if !condition.is_match(value) {
			return None;
		}
	}

	let form = if entry.strip.is_empty() {
		match kind {
			RuleKind::Suffix => format!("{value}{}", entry.add),
			RuleKind::Prefix => format!("{}{value}", entry.add),
		}
	} else {
		match kind {
			RuleKind::Suffix => {
				format!("{}{}", value.strip_suffix(entry.strip.as_str())?, entry.add)
			}
			RuleKind::Prefix => {
				format!("{}{}", entry.add, value.strip_prefix(entry.strip.as_str())?)
			}
		}
	};

	Some(form)
}
