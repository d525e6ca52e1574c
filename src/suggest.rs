//! Logic of the [`Checker`] to suggest corrections
//!
//! Candidates come from seven strategies applied in order: replacement
//! table, keyboard proximity, doubled characters, case variants, edit
//! distance one and, as a last resort, a bounded walk of edit distance
//! two. Every candidate goes through the same memoized validation.

use crate::{
	casing::{self, Casing},
	Checker,
};
use std::collections::HashMap;

/// At most this many suggestions are returned
const MAX_SUGGESTIONS: usize = 10;

/// Candidates rewritten by the replacement table outrank everything
const REPLACEMENT_WEIGHT: u8 = 10;

/// Methods for suggesting corrections
impl Checker {
	/// Suggest corrections for a word, most plausible first
	///
	/// A correctly spelled word gets no suggestions.
	pub fn suggest(&self, word: &str) -> Vec<String> {
		let value = self.aff.options.input_conversion.convert(word.trim());
		if value.is_empty() || self.correct(&value) {
			return Vec::new();
		}

		let mut state = Suggestor::new(self, value);
		state.run();
		state.finish()
	}
}

/// One validated candidate
struct Suggestion {
	value: String,
	weight: u8,
}

/// Shared state of a single `suggest` call
struct Suggestor<'c> {
	checker: &'c Checker,
	value: String,
	case: Option<Casing>,
	/// Validation verdict per candidate, also the dedup barrier
	seen: HashMap<String, bool>,
	suggestions: Vec<Suggestion>,
}

impl<'c> Suggestor<'c> {
	fn new(checker: &'c Checker, value: String) -> Self {
		Self {
			checker,
			case: Casing::detect(&value),
			value,
			seen: HashMap::new(),
			suggestions: Vec::new(),
		}
	}

	fn run(&mut self) {
		self.replacement_table();
		self.keyboard_groups();
		self.doubled_characters();

		let variants = self.case_variants();

		let checker = self.checker;
		let mut distance_one = Vec::new();
		for variant in &variants {
			for candidate in edits(variant, &checker.aff.options.try_chars) {
				self.consider(candidate.clone(), 0);
				distance_one.push(candidate);
			}
		}

		// Distance two only runs when nothing closer worked out
		if self.suggestions.is_empty() {
			self.distance_two(&distance_one);
		}
	}

	/// Validate a candidate, memoized; keep it when it spells a word
	fn consider(&mut self, candidate: String, weight: u8) {
		if self.seen.contains_key(&candidate) {
			return;
		}

		let valid = self.is_valid(&candidate);
		self.seen.insert(candidate.clone(), valid);
		if valid {
			self.suggestions.push(Suggestion {
				value: candidate,
				weight,
			});
		}
	}

	/// A candidate is kept when some non-forbidden form exists and that
	/// form is not marked `NOSUGGEST`
	fn is_valid(&self, candidate: &str) -> bool {
		let Some(form) = self.checker.find_form(candidate, false) else {
			return false;
		};

		!self
			.checker
			.graph
			.flags(&form)
			.is_some_and(|flags| flags.matches(self.checker.aff.special.no_suggest))
	}

	/// Strategy 1: apply every `REP` pair at every occurrence
	fn replacement_table(&mut self) {
		let mut candidates = Vec::new();

		for rep in &self.checker.aff.options.replacements {
			let mut offset = 0;
			while let Some(found) = self.value[offset..].find(&rep.from) {
				let at = offset + found;
				candidates.push(format!(
					"{}{}{}",
					&self.value[..at],
					rep.to,
					&self.value[at + rep.from.len()..]
				));

				// overlapping occurrences count too
				offset = at + self.value[at..].chars().next().map_or(1, char::len_utf8);
			}
		}

		for candidate in candidates {
			self.consider(candidate, REPLACEMENT_WEIGHT);
		}
	}

	/// Strategy 2: swap each letter for its keyboard neighbours
	fn keyboard_groups(&mut self) {
		let chars: Vec<char> = self.value.chars().collect();
		let mut candidates = Vec::new();

		for (index, &char) in chars.iter().enumerate() {
			let lower = char.to_lowercase().next().unwrap_or(char);
			let was_upper = char != lower;

			let mut tried = Vec::new();
			for group in &self.checker.aff.options.key {
				if !group.contains(&lower) {
					continue;
				}
				for &other in group {
					if other == lower || tried.contains(&other) {
						continue;
					}
					tried.push(other);

					let replacement = if was_upper {
						other.to_uppercase().next().unwrap_or(other)
					} else {
						other
					};
					let mut candidate: String = chars[..index].iter().collect();
					candidate.push(replacement);
					candidate.extend(&chars[index + 1..]);
					candidates.push(candidate);
				}
			}
		}

		for candidate in candidates {
			self.consider(candidate, 0);
		}
	}

	/// Strategy 3: grow a value table where characters may double
	///
	/// Branching is capped, the table grows by at most three
	/// generations before the remaining characters append linearly.
	fn doubled_characters(&mut self) {
		let chars: Vec<char> = self.value.chars().collect();
		let mut values = vec![String::new()];
		let mut generations = 0;

		for (index, &char) in chars.iter().enumerate() {
			let branch = generations < 3 && chars.get(index + 1) != Some(&char);
			if branch {
				generations += 1;
			}

			let mut doubled = Vec::new();
			for entry in &mut values {
				if branch {
					let mut with_double = entry.clone();
					with_double.push(char);
					with_double.push(char);
					doubled.push(with_double);
				}
				entry.push(char);
			}
			values.append(&mut doubled);
		}

		for candidate in values {
			self.consider(candidate, 0);
		}
	}

	/// Strategy 4: the value in its other casings, also the seed set
	/// for the edit-distance strategies
	fn case_variants(&mut self) -> Vec<String> {
		let mut variants = vec![self.value.clone()];

		if self.value == self.value.to_lowercase() || self.case.is_none() {
			variants.push(casing::capitalize(&self.value));
		}
		let upper = self.value.to_uppercase();
		if self.value != upper {
			variants.push(upper);
		}

		for variant in variants.clone() {
			self.consider(variant, 0);
		}
		variants
	}

	/// Strategy 6: rerun the edit-distance pass over its own output
	///
	/// Batched so that short inputs, which have few close neighbours,
	/// search further than long ones; stops at the first batch that
	/// lands a valid suggestion.
	fn distance_two(&mut self, distance_one: &[String]) {
		let checker = self.checker;
		let length = self.value.chars().count();

		let batch = match 10_usize.checked_sub(length) {
			Some(base) if base > 0 => base.pow(3),
			_ => 1,
		};
		let bound = 15_usize
			.saturating_sub(length)
			.max(3)
			.pow(3)
			.min(distance_one.len());

		let mut start = 0;
		while start < bound {
			let end = (start + batch).min(bound);
			for word in &distance_one[start..end] {
				for candidate in edits(word, &checker.aff.options.try_chars) {
					self.consider(candidate, 0);
				}
			}
			if !self.suggestions.is_empty() {
				return;
			}
			start = end;
		}
	}

	/// Rank, convert and cap the validated candidates
	fn finish(mut self) -> Vec<String> {
		let case = self.case;
		self.suggestions.sort_by(|a, b| {
			b.weight
				.cmp(&a.weight)
				// candidates matching the input casing come first
				.then_with(|| {
					let a_matches = Casing::detect(&a.value) == case;
					let b_matches = Casing::detect(&b.value) == case;
					b_matches.cmp(&a_matches)
				})
				.then_with(|| {
					a.value
						.to_lowercase()
						.cmp(&b.value.to_lowercase())
						.then_with(|| a.value.cmp(&b.value))
				})
		});

		let mut folded_seen = Vec::new();
		let mut out = Vec::new();
		for suggestion in &self.suggestions {
			let converted = self
				.checker
				.aff
				.options
				.output_conversion
				.convert(&suggestion.value);

			let folded = converted.to_lowercase();
			if folded_seen.contains(&folded) {
				continue;
			}
			folded_seen.push(folded);

			out.push(converted);
			if out.len() == MAX_SUGGESTIONS {
				break;
			}
		}
		out
	}
}

/// Strategy 5: every edit at distance one of the word
///
/// Removals, transpositions, case switches where the casing flips, and
/// injections from the `TRY` alphabet. Injections next to an uppercase
/// letter are emitted in both cases so the cap pattern survives.
fn edits(word: &str, try_chars: &[char]) -> Vec<String> {
	let chars: Vec<char> = word.chars().collect();
	let mut candidates = Vec::new();

	for position in 0..=chars.len() {
		// remove one character
		if position < chars.len() {
			let mut candidate: String = chars[..position].iter().collect();
			candidate.extend(&chars[position + 1..]);
			candidates.push(candidate);
		}

		// transpose neighbours
		if position + 1 < chars.len() {
			let mut swapped = chars.clone();
			swapped.swap(position, position + 1);
			candidates.push(swapped.iter().collect());
		}

		// switch the case of the tail where its casing flips
		if position + 2 < chars.len()
			&& chars[position + 1].is_uppercase() != chars[position + 2].is_uppercase()
		{
			let head: String = chars[..position].iter().collect();

			let tail: String = chars[position + 1..]
				.iter()
				.map(|c| casing::switch_case(*c))
				.collect();
			candidates.push(format!("{head}{tail}"));

			let mut transposed = head;
			transposed.push(casing::switch_case(chars[position + 1]));
			transposed.push(casing::switch_case(chars[position]));
			transposed.extend(&chars[position + 2..]);
			candidates.push(transposed);
		}

		// inject the alphabet, inserting and replacing
		let before_upper = position > 0 && chars[position - 1].is_uppercase();
		let at_upper = position < chars.len() && chars[position].is_uppercase();

		for &try_char in try_chars {
			let upper = try_char.to_uppercase().next().unwrap_or(try_char);
			let has_upper = !try_char.is_uppercase() && upper != try_char;

			let mut inserted: String = chars[..position].iter().collect();
			inserted.push(try_char);
			inserted.extend(&chars[position..]);
			candidates.push(inserted);

			if has_upper && (before_upper || at_upper) {
				let mut inserted: String = chars[..position].iter().collect();
				inserted.push(upper);
				inserted.extend(&chars[position..]);
				candidates.push(inserted);
			}

			if position < chars.len() {
				let mut replaced: String = chars[..position].iter().collect();
				replaced.push(try_char);
				replaced.extend(&chars[position + 1..]);
				candidates.push(replaced);

				if has_upper && at_upper {
					let mut replaced: String = chars[..position].iter().collect();
					replaced.push(upper);
					replaced.extend(&chars[position + 1..]);
					candidates.push(replaced);
				}
			}
		}
	}

	candidates
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn edits_cover_single_typos() {
		let try_chars: Vec<char> = "etaoinshrdlcumwfgypbvkjxqz".chars().collect();

		// missing letter
		assert!(edits("helo", &try_chars).contains(&"hello".to_owned()));
		// transposed letters
		assert!(edits("hlelo", &try_chars).contains(&"hello".to_owned()));
		// extra letter
		assert!(edits("heello", &try_chars).contains(&"hello".to_owned()));
		// wrong letter
		assert!(edits("hallo", &try_chars).contains(&"hello".to_owned()));
	}

	#[test]
	fn edits_preserve_cap_pattern() {
		let try_chars = vec!['e'];

		let candidates = edits("Hllo", &try_chars);
		assert!(candidates.contains(&"HEllo".to_owned()));
		assert!(candidates.contains(&"Hello".to_owned()));
	}

	#[test]
	fn edits_of_empty_word_only_insert() {
		let candidates = edits("", &['a', 'b']);
		assert_eq!(candidates, vec!["a".to_owned(), "b".to_owned()]);
	}
}
