//! Logic of the [`Checker`] to validate a word

use crate::{
	aff::{Flag, Flags},
	casing::{self, Casing},
	Checker,
};

/// Verdict of [`Checker::spell`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpellResult {
	/// The word is valid
	pub correct: bool,
	/// The word exists but is explicitly forbidden
	pub forbidden: bool,
	/// The word is rare or probably a mistake (`WARN`)
	pub warn: bool,
}

/// Methods for querying the checker
impl Checker {
	/// Whether the word is valid
	pub fn correct(&self, word: &str) -> bool {
		self.spell(word).correct
	}

	/// Check a word, reporting forbidden and warning verdicts too
	pub fn spell(&self, word: &str) -> SpellResult {
		let mut result = SpellResult::default();

		let word = word.trim();
		if word.is_empty() {
			return result;
		}

		// Input conversion based on the `ICONV` table
		let normalized = self.aff.options.input_conversion.convert(word);

		if let Some(form) = self.find_form(&normalized, true) {
			result.correct = true;

			if let Some(flags) = self.graph.flags(&form) {
				if self.is_forbidden(flags) {
					result.forbidden = true;
					result.correct = false;
				}
				if flags.matches(self.aff.special.warn) {
					result.warn = true;
					if self.aff.options.forbid_warn {
						result.correct = false;
					}
				}
			}
		} else if self.is_compound(&normalized) {
			result.correct = true;
		}

		result
	}

	/// Probe the graph for a stored form of the value, trying case
	/// variants from most to least faithful
	pub(crate) fn find_form(&self, value: &str, include_forbidden: bool) -> Option<String> {
		if self.graph.has(value) {
			let flags = self.graph.flags(value);
			let compound_only = flags.is_some_and(|f| f.matches(self.aff.special.compound_only));
			let forbidden = flags.is_some_and(|f| self.is_forbidden(f));

			if !compound_only && (include_forbidden || !forbidden) {
				return Some(value.to_owned());
			}
		}

		if Casing::detect(value) == Some(Casing::Upper) {
			let capitalized = casing::capitalize(value);
			if self.probe(&capitalized, include_forbidden) {
				return Some(capitalized);
			}
		}

		let lower = value.to_lowercase();
		if lower != value && self.probe(&lower, include_forbidden) {
			return Some(lower);
		}

		None
	}

	/// Whether a case-folded candidate is acceptable
	///
	/// `KEEPCASE` forms only ever match in their stored shape.
	fn probe(&self, candidate: &str, include_forbidden: bool) -> bool {
		if !self.graph.has(candidate) {
			return false;
		}
		let Some(flags) = self.graph.flags(candidate) else {
			return true;
		};

		if flags.matches(self.aff.special.keep_case) {
			return false;
		}
		if !include_forbidden && self.is_forbidden(flags) {
			return false;
		}
		true
	}

	pub(crate) fn is_forbidden(&self, flags: &Flags) -> bool {
		flags.contains(&Flag::Forbidden) || flags.matches(self.aff.special.forbidden_word)
	}

	/// Whether the value matches one of the precompiled compound rules
	fn is_compound(&self, value: &str) -> bool {
		let min = usize::try_from(self.aff.options.compound_min).unwrap_or(usize::MAX);
		if value.chars().count() < min.saturating_mul(2) {
			return false;
		}

		self.compound_patterns
			.iter()
			.any(|pattern| pattern.is_match(value))
	}
}
