//! High level interface to query a dictionary pair
//!
//! Entrypoint methods are
//! - [`Checker::correct`]: looks through the word graph to check a word
//! - [`Checker::suggest`]: tries to find words close to the input for
//!   quick/auto-correction

use crate::{
	aff::{AffFile, Flag, Flags},
	dic::{self, PersonalEntry},
	expand,
	graph::WordGraph,
};
use regex::Regex;
use std::{fs, io, path::Path};

pub use crate::graph::GraphStats;

/// A loaded spell checker
///
/// Construction parses the affix grammar, expands every root of the
/// word list into its surface forms and stores them all in a shared
/// prefix graph.
#[derive(Debug)]
pub struct Checker {
	/// Parsed `.aff` file
	pub(crate) aff: AffFile,
	/// Every known surface form
	pub(crate) graph: WordGraph,
	/// Compiled `COMPOUNDRULE` patterns, built once at construction
	pub(crate) compound_patterns: Vec<Regex>,
}

/// Ways initializing a [`Checker`] could go wrong
#[derive(Debug, thiserror::Error)]
pub enum InitializeError {
	/// The affix description is the one required artifact
	#[error("missing affix file")]
	MissingAffix,

	/// Could not make sense of the affix file at all
	#[error("Could not parse file: {0}")]
	Parser(String),

	/// Could not correctly open given files
	#[error(transparent)]
	Io(#[from] io::Error),
}

/// Constructors
impl Checker {
	/// Build a checker from decoded `.aff` and optional `.dic` text.
	///
	/// # Errors
	///
	/// Will only error if the affix file cannot be parsed at all;
	/// individually malformed lines are skipped.
	pub fn new(aff: &str, dic: Option<&str>) -> Result<Self, InitializeError> {
		let aff = AffFile::new(aff)?;
		let mut checker = Self {
			aff,
			graph: WordGraph::default(),
			compound_patterns: Vec::new(),
		};

		if let Some(dic) = dic {
			checker.load(dic);
		}
		checker.compound_patterns = checker.compile_compound_patterns();

		Ok(checker)
	}

	/// Given a path `/path/to/hunspell/en_US`, this function will append
	/// `.aff` and `.dic` and then read those files.
	///
	/// # Errors
	///
	/// Will error if the affix file is absent or unreadable. A missing
	/// word list is fine, the checker starts empty.
	pub fn from_pair(base: &Path) -> Result<Self, InitializeError> {
		let aff_path = base.with_extension("aff");
		if !aff_path.exists() {
			return Err(InitializeError::MissingAffix);
		}
		let aff = fs::read_to_string(aff_path)?;

		let dic_path = base.with_extension("dic");
		let dic = if dic_path.exists() {
			Some(fs::read_to_string(dic_path)?)
		} else {
			None
		};

		Self::new(&aff, dic.as_deref())
	}
}

/// Mutators
impl Checker {
	/// Add a flagless root word
	pub fn add(&mut self, word: &str) -> &mut Self {
		self.add_root(word, &[]);
		self
	}

	/// Add a root word inheriting the flags of an already known model
	pub fn add_with_model(&mut self, word: &str, model: &str) -> &mut Self {
		let codes = self
			.graph
			.flags(model)
			.map(|flags| flags.iter().copied().collect::<Vec<_>>())
			.unwrap_or_default();
		self.add_root(word, &codes);
		self
	}

	/// Unmark the exact word, derived forms stay untouched
	pub fn remove(&mut self, word: &str) -> &mut Self {
		self.graph.remove(word);
		self
	}

	/// Load an additional `.dic` payload
	pub fn dictionary(&mut self, text: &str) -> &mut Self {
		self.load(text);
		self
	}

	/// Load a personal-dictionary payload
	///
	/// Lines are `word`, `word/model` or `*word`; the last marks the
	/// word forbidden on top of whatever flags it already carries.
	pub fn personal(&mut self, text: &str) -> &mut Self {
		for entry in dic::parse_personal(text) {
			match entry {
				PersonalEntry::Add(word) => {
					self.add_root(&word, &[]);
				}
				PersonalEntry::AddWithModel(word, model) => {
					self.add_with_model(&word, &model);
				}
				PersonalEntry::Forbid(word) => {
					let mut flags = self.graph.flags(&word).cloned().unwrap_or_default();
					flags.push(Flag::Forbidden);
					self.graph.insert(&word, Some(flags));
				}
			}
		}
		self
	}
}

/// Accessors
impl Checker {
	/// Whether some known word starts with the given prefix
	pub fn has_prefix(&self, prefix: &str) -> bool {
		self.graph.has_prefix(prefix)
	}

	/// Extra word characters declared by `WORDCHARS`
	pub fn word_characters(&self) -> Option<&str> {
		self.aff.options.word_chars.as_deref()
	}

	/// Size and shape counters of the word graph
	pub fn stats(&self) -> GraphStats {
		self.graph.stats()
	}
}

/// Loading internals
impl Checker {
	fn load(&mut self, content: &str) {
		let entries = dic::parse_entries(content, &self.aff.options.flag_ty);
		log::debug!("loading {} roots", entries.len());

		for entry in entries {
			self.add_root(&entry.word, &entry.flags);
		}
	}

	/// Register one root: store it, fill compound buckets and expand
	/// every affix rule its codes name
	pub(crate) fn add_root(&mut self, word: &str, codes: &[Flag]) {
		let need_affix = self
			.aff
			.special
			.need_affix
			.is_some_and(|flag| codes.contains(&flag));
		if !need_affix {
			let flags = if codes.is_empty() {
				None
			} else {
				Some(Flags::from(codes.to_vec()))
			};
			self.graph.insert(word, flags);
		}

		for code in codes {
			if let Some(bucket) = self.aff.compound_codes.get_mut(code) {
				bucket.push(word.to_owned());
			}

			let Some(rule) = self.aff.rules.get(code) else {
				continue;
			};
			let derived = expand::expand(word, rule, &self.aff.rules);

			for form in &derived {
				self.graph.insert_form(form);

				if !rule.cross_product {
					continue;
				}
				for other in codes {
					let Some(other_rule) = self.aff.rules.get(other) else {
						continue;
					};
					if !other_rule.cross_product || other_rule.kind == rule.kind {
						continue;
					}
					for cross in expand::expand(form, other_rule, &self.aff.rules) {
						self.graph.insert_form(&cross);
					}
				}
			}
		}
	}

	/// Inline every compound bucket into its rule patterns
	///
	/// A rule naming a code no root was registered under is omitted.
	fn compile_compound_patterns(&self) -> Vec<Regex> {
		let mut patterns = Vec::new();

		'rules: for rule in &self.aff.options.compound_rules {
			let mut pattern = String::from("^");
			for char in rule.chars() {
				match char {
					'*' | '?' | '(' => pattern.push(char),
					// a parenthesized group is optional as a whole
					')' => pattern.push_str(")?"),
					char => {
						let code = Flag::from_rule_char(char, &self.aff.options.flag_ty);
						let alternatives = match self.aff.compound_codes.get(&code) {
							Some(bucket) if !bucket.is_empty() => bucket
								.iter()
								.map(|root| regex::escape(root))
								.collect::<Vec<_>>()
								.join("|"),
							_ => continue 'rules,
						};
						pattern.push('(');
						pattern.push_str(&alternatives);
						pattern.push(')');
					}
				}
			}
			pattern.push('$');

			match Regex::new(&pattern) {
				Ok(regex) => patterns.push(regex),
				Err(err) => log::debug!("dropping compound rule {rule:?}: {err}"),
			}
		}

		patterns
	}
}
