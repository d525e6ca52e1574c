//! Parsing of `.dic` word lists and personal dictionaries

use crate::aff::{flag_list, Flag, FlagType};
use nom::combinator::all_consuming;

/// One `.dic` line: a root word and its flag codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DicEntry {
	pub(crate) word: String,
	pub(crate) flags: Vec<Flag>,
}

/// Parse a `.dic` payload into its entries
///
/// The first non-blank line is consumed as the word count when it is a
/// pure decimal number. Lines with an empty word or an unparseable flag
/// string are silently skipped.
pub(crate) fn parse_entries(content: &str, fty: &FlagType) -> Vec<DicEntry> {
	let mut entries = Vec::new();
	let mut seen_content = false;

	for line in content.lines() {
		let line = line.trim();
		if line.is_empty() {
			continue;
		}

		if !seen_content {
			seen_content = true;
			if line.chars().all(|c| c.is_ascii_digit()) {
				continue;
			}
		}

		if let Some(entry) = parse_entry(line, fty) {
			entries.push(entry);
		} else {
			log::debug!("skipping dictionary line {line:?}");
		}
	}

	entries
}

/// Parse one `word[/flagstring]` line
fn parse_entry(line: &str, fty: &FlagType) -> Option<DicEntry> {
	let (word, raw_flags) = split_at_flags(line);
	// morphological fields after the flag string are ignored
	let raw_flags = raw_flags.and_then(|raw| raw.split_whitespace().next());

	let word = word.trim().to_owned();
	if word.is_empty() {
		return None;
	}

	let flags = match raw_flags {
		None | Some("") => Vec::new(),
		Some(raw) => all_consuming(flag_list(fty))(raw).ok()?.1,
	};

	Some(DicEntry { word, flags })
}

/// Split a line at the first unescaped `/`, decoding `\/` in the word
fn split_at_flags(line: &str) -> (String, Option<&str>) {
	let mut word = String::with_capacity(line.len());
	let mut chars = line.char_indices();

	while let Some((index, char)) = chars.next() {
		match char {
			'\\' => match chars.next() {
				Some((_, '/')) => word.push('/'),
				Some((_, other)) => {
					word.push('\\');
					word.push(other);
				}
				None => word.push('\\'),
			},
			'/' => return (word, Some(&line[index + 1..])),
			_ => word.push(char),
		}
	}

	(word, None)
}

/// One line of a personal dictionary
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PersonalEntry {
	/// `word` adds a root
	Add(String),
	/// `word/model` adds a root inheriting the model's flags
	AddWithModel(String, String),
	/// `*word` marks the word forbidden
	Forbid(String),
}

/// Parse a personal-dictionary payload
pub(crate) fn parse_personal(content: &str) -> Vec<PersonalEntry> {
	content
		.lines()
		.map(str::trim)
		.filter(|line| !line.is_empty())
		.map(|line| match line.strip_prefix('*') {
			Some(word) => PersonalEntry::Forbid(word.to_owned()),
			None => match line.split_once('/') {
				Some((word, model)) => {
					PersonalEntry::AddWithModel(word.to_owned(), model.to_owned())
				}
				None => PersonalEntry::Add(line.to_owned()),
			},
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn count_line_is_ignored() {
		let entries = parse_entries("2\nhello\nworld/AB\n", &FlagType::Short);

		assert_eq!(entries.len(), 2);
		assert_eq!(entries[0].word, "hello");
		assert!(entries[0].flags.is_empty());
		assert_eq!(entries[1].word, "world");
		assert_eq!(entries[1].flags, vec![Flag::Short('A'), Flag::Short('B')]);
	}

	#[test]
	fn first_line_word_is_kept() {
		let entries = parse_entries("hello\nworld\n", &FlagType::Short);
		assert_eq!(entries.len(), 2);
	}

	#[test]
	fn escaped_slash_stays_in_word() {
		let entries = parse_entries("1\nand\\/or/X\n", &FlagType::Short);

		assert_eq!(entries[0].word, "and/or");
		assert_eq!(entries[0].flags, vec![Flag::Short('X')]);
	}

	#[test]
	fn unparseable_flag_string_skips_line() {
		let entries = parse_entries("2\nword/12a\nfine/12\n", &FlagType::Numeric);

		assert_eq!(entries.len(), 1);
		assert_eq!(entries[0].word, "fine");
		assert_eq!(entries[0].flags, vec![Flag::Numeric(12)]);
	}

	#[test]
	fn morphological_fields_are_ignored() {
		let entries = parse_entries("1\nword/AB po:noun\n", &FlagType::Short);

		assert_eq!(entries[0].word, "word");
		assert_eq!(entries[0].flags, vec![Flag::Short('A'), Flag::Short('B')]);
	}

	#[test]
	fn personal_lines() {
		let entries = parse_personal("hello\n*bad\nword/model\n\n");

		assert_eq!(
			entries,
			vec![
				PersonalEntry::Add("hello".to_owned()),
				PersonalEntry::Forbid("bad".to_owned()),
				PersonalEntry::AddWithModel("word".to_owned(), "model".to_owned()),
			]
		);
	}
}
