//! The `.aff` grammar: affix rules, suggestion settings and special
//! flags.
//!
//! [`AffParser`] walks the text line by line and leaves an [`AffFile`]
//! behind; anything it cannot make sense of is skipped.

use crate::checker::InitializeError;
use nom::{
	branch::alt,
	bytes::complete::{is_not, tag, take_while1},
	character::complete::{newline, satisfy, space0, space1, u16 as u16_p, u64 as u64_p},
	combinator::{map, opt, verify},
	multi::{many0, many1, many_m_n, separated_list1},
	sequence::{preceded, terminated, tuple},
	IResult, Parser,
};
use nom_supreme::ParserExt;
use regex::Regex;
use std::{collections::HashMap, fmt, fs::File, io::Read, path::Path};

/// English letters sorted by corpus frequency, used to complete `TRY`
const TRY_ALPHABET: &str = "etaoinshrdlcumwfgypbvkjxqz";

/// Keyboard rows assumed when the file defines no `KEY` groups
const DEFAULT_KEY: &str = "qwertyuiop|asdfghjkl|zxcvbnm";

/// Everything a parsed `.aff` file declares: scalar options, special
/// flags and the affix rule table.
#[derive(Debug)]
pub(crate) struct AffFile {
	/// Scalar options
	pub(crate) options: Options,
	/// Special flags applying to whole words
	pub(crate) special: SpecialFlags,
	/// Affix rules indexed by their flag code
	pub(crate) rules: HashMap<Flag, AffixRule>,
	/// Roots registered under each compound-rule code.
	///
	/// Buckets are seeded here for every literal character of a
	/// `COMPOUNDRULE` pattern and for the `ONLYINCOMPOUND` code; the
	/// dictionary loader fills them.
	pub(crate) compound_codes: HashMap<Flag, Vec<String>>,
}

impl AffFile {
	/// Parse decoded `.aff` text
	pub(crate) fn new(content: &str) -> Result<Self, InitializeError> {
		let mut content = content.replace("\r\n", "\n");
		if !content.ends_with('\n') {
			content.push('\n');
		}

		let AffParser {
			mut options,
			special,
			rules,
			compound_codes,
		} = AffParser::default().parse(&content)?;

		// Complete the injection alphabet and fall back on the default
		// keyboard layout when the file stays silent.
		for char in TRY_ALPHABET.chars() {
			if !options.try_chars.contains(&char) {
				options.try_chars.push(char);
			}
		}
		if options.key.is_empty() {
			options.key = DEFAULT_KEY
				.split('|')
				.map(|group| group.chars().collect())
				.collect();
		}

		Ok(Self {
			options,
			special,
			rules,
			compound_codes,
		})
	}

	/// Read and parse an `.aff` file on disk
	pub(crate) fn file(path: &Path) -> Result<Self, InitializeError> {
		if !path.exists() {
			return Err(InitializeError::MissingAffix);
		}

		let mut file = File::open(path)?;
		let mut buffer = String::new();
		file.read_to_string(&mut buffer)?;
		Self::new(&buffer)
	}
}

/// Scalar settings read from the file, with their defaults
#[derive(Debug)]
pub(crate) struct Options {
	/// `FLAG`
	pub(crate) flag_ty: FlagType,
	/// `TRY`, completed with [`TRY_ALPHABET`]
	pub(crate) try_chars: Vec<char>,
	/// `KEY`
	pub(crate) key: Vec<Vec<char>>,
	/// `REP`
	pub(crate) replacements: Vec<Replacement>,
	/// `ICONV`
	pub(crate) input_conversion: ConversionTable,
	/// `OCONV`
	pub(crate) output_conversion: ConversionTable,
	/// `COMPOUNDRULE`
	pub(crate) compound_rules: Vec<String>,
	/// `COMPOUNDMIN`
	pub(crate) compound_min: u64,
	/// `FORBIDWARN`
	pub(crate) forbid_warn: bool,
	/// `WORDCHARS`
	pub(crate) word_chars: Option<String>,
	/// First argument of every directive the parser does not model
	pub(crate) extra: HashMap<String, String>,
}

impl Default for Options {
	fn default() -> Self {
		Self {
			flag_ty: FlagType::default(),
			try_chars: Vec::new(),
			key: Vec::new(),
			replacements: Vec::new(),
			input_conversion: ConversionTable::default(),
			output_conversion: ConversionTable::default(),
			compound_rules: Vec::new(),
			compound_min: 3,
			forbid_warn: false,
			word_chars: None,
			extra: HashMap::new(),
		}
	}
}

/// Flags that are not affixes but mark special word behaviour
#[derive(Debug, Default)]
pub(crate) struct SpecialFlags {
	/// `NOSUGGEST`
	pub(crate) no_suggest: Option<Flag>,
	/// `WARN`
	pub(crate) warn: Option<Flag>,
	/// `FORBIDDENWORD`
	pub(crate) forbidden_word: Option<Flag>,
	/// `KEEPCASE`
	pub(crate) keep_case: Option<Flag>,
	/// `ONLYINCOMPOUND`
	pub(crate) compound_only: Option<Flag>,
	/// `NEEDAFFIX`
	pub(crate) need_affix: Option<Flag>,
}

/// Which end of the word an affix rule works on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RuleKind {
	Prefix,
	Suffix,
}

/// A named group of affix transformations, declared by a `PFX` or `SFX`
/// header line and indexed by its flag code.
///
/// ```aff
/// SFX B Y 1
/// SFX B   0     s      .
/// #   ^fg ^strp ^add   ^cond
/// ```
#[derive(Debug)]
pub(crate) struct AffixRule {
	/// Prefix or suffix
	pub(crate) kind: RuleKind,
	/// Whether this rule may pair with the opposite kind on one root
	pub(crate) cross_product: bool,
	/// Transformation entries in declaration order
	pub(crate) entries: Vec<AffixEntry>,
}

/// One transformation of an [`AffixRule`]
#[derive(Debug)]
pub(crate) struct AffixEntry {
	/// What to strip from the stem before adding, empty when `0`
	pub(crate) strip: String,
	/// Affix part added to the stem, empty when `0`
	pub(crate) add: String,
	/// Stem must match before the entry applies, anchored at the
	/// relevant end; `None` when the condition was `.`
	pub(crate) condition: Option<Regex>,
	/// Continuation codes applied recursively to the derived form
	pub(crate) flags: Vec<Flag>,
}

/// A `REP` typo rewrite pair
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Replacement {
	pub(crate) from: String,
	pub(crate) to: String,
}

/// Used for input and output conversion tables (`ICONV`, `OCONV`) which
/// transliterate words before lookup and suggestions before output.
#[derive(Debug, Default)]
pub(crate) struct ConversionTable {
	/// Ordered pattern and replacement pairs
	replacements: Vec<(Regex, String)>,
}

impl ConversionTable {
	/// Compile one pair into the table, dropping unusable patterns
	fn add(&mut self, pattern: &str, rep: &str) {
		match Regex::new(pattern) {
			Ok(pattern) => self.replacements.push((pattern, rep.to_owned())),
			Err(err) => log::debug!("dropping conversion pattern {pattern:?}: {err}"),
		}
	}

	/// Transliterate, applying every pair in declaration order
	pub(crate) fn convert(&self, word: &str) -> String {
		let mut word = word.to_owned();
		for (pattern, rep) in &self.replacements {
			word = pattern.replace_all(&word, rep.as_str()).into_owned();
		}
		word
	}
}

/// Accumulator the directive dispatch writes into while walking the
/// file
#[derive(Default)]
struct AffParser {
	/// Options collected so far
	options: Options,
	/// Special flags collected so far
	special: SpecialFlags,
	/// Every parsed affix rule
	rules: HashMap<Flag, AffixRule>,
	/// Compound-rule code buckets, still empty of roots
	compound_codes: HashMap<Flag, Vec<String>>,
}

impl AffParser {
	/// Run the dispatch over the whole text
	fn parse(mut self, content: &str) -> Result<Self, InitializeError> {
		many0(alt((
			tag("#")
				.terminated(opt(is_not("\n")))
				.terminated(newline)
				.value(()),
			newline.value(()),
			Self::parse_directive(&mut self),
			// A malformed line never poisons the rest of the file
			is_not("\n").terminated(newline).value(()),
		)))
		.all_consuming()
		.parse(content)
		.map_err(|e: nom::Err<nom::error::Error<_>>| InitializeError::Parser(e.to_string()))?;

		Ok(self)
	}

	#[allow(clippy::too_many_lines)]
	/// One directive, newline included, dispatched on its name
	fn parse_directive<'a>(&mut self) -> impl FnMut(&'a str) -> IResult<&'a str, ()> + '_ {
		let Self {
			options,
			special,
			rules,
			compound_codes,
		} = self;

		move |i: &'a str| {
			let (i, directive_name) = terminated(
				take_while1(|c: char| c.is_ascii_uppercase() || c == '_'),
				space0,
			)(i)?;

			let mut rest_of_line = terminated(is_not("\n"), newline);
			let mut chars_of_line = map(terminated(is_not("\n"), newline), |s: &str| {
				s.chars().collect::<Vec<char>>()
			});

			let res = match directive_name {
				// options carrying one value on the directive line;
				// SET is consumed for nothing since text is already
				// decoded when it reaches the parser
				"SET" => {
					let (i, _) = rest_of_line(i)?;
					(i, ())
				}
				"FLAG" => {
					let (i, name) = rest_of_line(i)?;
					(i, options.flag_ty = FlagType::parse(name))
				}
				"TRY" => {
					let (i, chars) = chars_of_line(i)?;
					(
						i,
						options.try_chars =
							chars.into_iter().filter(|c| c.is_lowercase()).collect(),
					)
				}
				"KEY" => {
					let (i, groups) = rest_of_line(i)?;
					let adjacency_groups = groups
						.split('|')
						.map(|group| group.chars().collect())
						.collect();
					(i, options.key = adjacency_groups)
				}
				"WORDCHARS" => {
					let (i, chars) = rest_of_line(i)?;
					(i, options.word_chars = Some(chars.to_owned()))
				}
				"COMPOUNDMIN" => {
					let (i, num) = u64_p(i)?;
					(i, options.compound_min = num)
				}
				"FORBIDWARN" => (i, options.forbid_warn = true),

				// markers: one flag code singles out a word behaviour
				"NOSUGGEST" => {
					let (i, flag) = flag_code(&options.flag_ty)(i)?;
					(i, set_flag(&mut special.no_suggest, flag))
				}
				"WARN" => {
					let (i, flag) = flag_code(&options.flag_ty)(i)?;
					(i, set_flag(&mut special.warn, flag))
				}
				"FORBIDDENWORD" => {
					let (i, flag) = flag_code(&options.flag_ty)(i)?;
					(i, set_flag(&mut special.forbidden_word, flag))
				}
				"KEEPCASE" => {
					let (i, flag) = flag_code(&options.flag_ty)(i)?;
					(i, set_flag(&mut special.keep_case, flag))
				}
				"NEEDAFFIX" => {
					let (i, flag) = flag_code(&options.flag_ty)(i)?;
					(i, set_flag(&mut special.need_affix, flag))
				}
				"ONLYINCOMPOUND" => {
					let (i, flag) = flag_code(&options.flag_ty)(i)?;
					compound_codes.entry(flag).or_default();
					(i, set_flag(&mut special.compound_only, flag))
				}

				// counted tables, with a tolerated bare single-line form
				"REP" => {
					let rep_pair = |i: &'a str| {
						tuple((is_not(" \t\n").terminated(space1), is_not(" \t\n")))
							.map(|(from, to): (&str, &str)| Replacement {
								from: from.to_owned(),
								to: to.to_owned(),
							})
							.terminated(space0)
							.terminated(newline)
							.parse(i)
					};

					let header: IResult<&'a str, u64> =
						u64_p.terminated(space0).terminated(newline).parse(i);
					match header {
						Ok((i, num)) => {
							let (i, mut reps) = many_m_n(
								0,
								usize::try_from(num).unwrap_or(0),
								tag("REP ").precedes(rep_pair),
							)(i)?;

							(i, options.replacements.append(&mut reps))
						}
						Err(_) => {
							let (i, rep) = rep_pair(i)?;
							(i, options.replacements.push(rep))
						}
					}
				}
				"ICONV" | "OCONV" => {
					let conversion_pair = |i: &'a str| -> IResult<&'a str, (&'a str, &'a str)> {
						let (i, pattern) = is_not(" \t\n")(i)?;
						let (i, rep) = preceded(space1, terminated(is_not("\n"), newline))(i)?;

						Ok((i, (pattern, rep)))
					};

					let header: IResult<&'a str, u64> =
						u64_p.terminated(space0).terminated(newline).parse(i);
					let (i, conversions) = match header {
						Ok((i, num)) => many_m_n(
							0,
							usize::try_from(num).unwrap_or(0),
							tag(directive_name)
								.terminated(space1)
								.precedes(conversion_pair),
						)(i)?,
						Err(_) => conversion_pair.map(|pair| vec![pair]).parse(i)?,
					};

					let table = match directive_name {
						"ICONV" => &mut options.input_conversion,
						_ => &mut options.output_conversion,
					};
					for (pattern, rep) in conversions {
						table.add(pattern, rep);
					}
					(i, ())
				}
				"COMPOUNDRULE" => {
					let header: IResult<&'a str, u64> =
						u64_p.terminated(space0).terminated(newline).parse(i);
					let (i, patterns) = match header {
						Ok((i, num)) => many_m_n(
							0,
							usize::try_from(num).unwrap_or(0),
							tag("COMPOUNDRULE ")
								.precedes(is_not(" \t\n"))
								.terminated(space0)
								.terminated(newline),
						)(i)?,
						Err(_) => is_not(" \t\n")
							.terminated(space0)
							.terminated(newline)
							.map(|pattern| vec![pattern])
							.parse(i)?,
					};

					for pattern in patterns {
						for char in pattern.chars() {
							if !matches!(char, '*' | '?' | '(' | ')') {
								compound_codes
									.entry(Flag::from_rule_char(char, &options.flag_ty))
									.or_default();
							}
						}
						options.compound_rules.push(pattern.to_owned());
					}
					(i, ())
				}

				// affix rule blocks
				"PFX" | "SFX" => {
					let kind = match directive_name {
						"PFX" => RuleKind::Prefix,
						_ => RuleKind::Suffix,
					};

					// the header announces the flag, cross pairing and
					// the number of entry lines
					let (i, (flag, cross_product, num)) = tuple((
						flag_code(&options.flag_ty),
						alt((tag("Y").value(true), tag("N").value(false)))
							.preceded_by(space1),
						u64_p
							.preceded_by(space1)
							.terminated(space0)
							.terminated(newline),
					))(i)?;

					let (i, entries) = many_m_n(
						0,
						usize::try_from(num).unwrap_or(0),
						Self::parse_affix_entry(kind, &options.flag_ty, flag),
					)(i)?;
					let entries = entries.into_iter().flatten().collect::<Vec<_>>();

					log::debug!(
						"({directive_name}) registered {flag} with {} entries",
						entries.len()
					);
					rules.insert(
						flag,
						AffixRule {
							kind,
							cross_product,
							entries,
						},
					);
					(i, ())
				}

				// everything else lands in the overflow map
				unknown => {
					let (i, value) = terminated(opt(is_not("\n")), newline)(i)?;
					let first = value
						.and_then(|v| v.split_whitespace().next())
						.unwrap_or_default();
					options.extra.insert(unknown.to_owned(), first.to_owned());
					(i, ())
				}
			};

			Ok(res)
		}
	}

	/// Parse one `PFX`/`SFX` entry line
	///
	/// Yields `None` for entries whose condition does not compile, so
	/// they get dropped while the surrounding rule survives.
	fn parse_affix_entry<'o>(
		kind: RuleKind,
		fty: &'o FlagType,
		flag: Flag,
	) -> impl FnMut(&str) -> IResult<&str, Option<AffixEntry>> + 'o {
		move |i: &str| {
			let (i, _) = tag(match kind {
				RuleKind::Prefix => "PFX",
				RuleKind::Suffix => "SFX",
			})(i)?;
			let (i, _) = verify(preceded(space1, flag_code(fty)), |f| *f == flag)(i)?;

			// `0` stands for the empty string
			let (i, strip) = is_not(" \t\n")
				.preceded_by(space1)
				.map(|s| if s == "0" { "" } else { s })
				.parse(i)?;

			let (i, (add, flags)) = tuple((
				is_not("/ \t\n").map(|s| if s == "0" { "" } else { s }),
				opt(flag_list(fty).preceded_by(tag("/"))),
			))
			.preceded_by(space1)
			.parse(i)?;

			// . is the unconditional placeholder
			let (i, condition) = opt(is_not(" \t\n").preceded_by(space1))
				.map(|s: Option<&str>| s.filter(|s| *s != "."))
				.parse(i)?;

			// morphological fields and trailing blanks are ignored
			let (i, _) = tuple((opt(is_not("\n").preceded_by(space1)), space0, newline))(i)?;

			let condition = match condition {
				None => None,
				Some(cond) => {
					let anchored = match kind {
						RuleKind::Prefix => format!("^{cond}"),
						RuleKind::Suffix => format!("{cond}$"),
					};
					match Regex::new(&anchored) {
						Ok(regex) => Some(regex),
						Err(err) => {
							log::debug!("skipping entry of {flag}, bad condition {cond:?}: {err}");
							return Ok((i, None));
						}
					}
				}
			};

			Ok((
				i,
				Some(AffixEntry {
					strip: strip.to_owned(),
					add: add.to_owned(),
					condition,
					flags: flags.unwrap_or_default(),
				}),
			))
		}
	}
}

/// Parser for one flag code under the active encoding
pub(crate) fn flag_code(fty: &FlagType) -> impl Fn(&str) -> IResult<&str, Flag> + '_ {
	move |i: &str| match fty {
		FlagType::Short => map(satisfy(|c: char| c.is_ascii_graphic()), Flag::Short)(i),
		FlagType::Long => map(
			tuple((
				satisfy(|c: char| c.is_ascii_graphic()),
				satisfy(|c: char| c.is_ascii_graphic()),
			)),
			|(first, second)| Flag::Long([first, second]),
		)(i),
		FlagType::Utf8 => map(satisfy(|c: char| !c.is_whitespace()), Flag::Utf8)(i),
		FlagType::Numeric => map(u16_p, Flag::Numeric)(i),
	}
}

/// Parser for a whole flag string
///
/// Codes follow each other back to back except under `num`, where a
/// comma separates them.
pub(crate) fn flag_list(fty: &FlagType) -> impl Fn(&str) -> IResult<&str, Vec<Flag>> + '_ {
	move |i: &str| {
		if matches!(fty, FlagType::Numeric) {
			separated_list1(tag(","), flag_code(fty))(i)
		} else {
			many1(flag_code(fty))(i)
		}
	}
}

/// Flag codes carried by one stored root
///
/// Sets stay tiny, membership scans linearly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Flags(Vec<Flag>);

impl Flags {
	pub(crate) fn contains(&self, flag: &Flag) -> bool {
		self.0.iter().any(|known| known == flag)
	}

	/// Whether the set carries a special flag that may be undeclared
	pub(crate) fn matches(&self, special: Option<Flag>) -> bool {
		special.map_or(false, |flag| self.contains(&flag))
	}

	/// Attach a flag unless it is already present
	pub(crate) fn push(&mut self, flag: Flag) {
		if !self.contains(&flag) {
			self.0.push(flag);
		}
	}

	pub(crate) fn iter(&self) -> std::slice::Iter<'_, Flag> {
		self.0.iter()
	}
}

impl From<Vec<Flag>> for Flags {
	fn from(flags: Vec<Flag>) -> Self {
		Self(flags)
	}
}

/// A single flag code
///
/// The `FLAG` directive picks the wire shape: one ascii character by
/// default, ascii pairs under `long`, whole scalar values under
/// `UTF-8`, decimal numbers under `num`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Flag {
	/// One-character code of the default encoding, `X`
	Short(char),
	/// Two-character code, `Xy`
	Long([char; 2]),
	/// Code drawn from the whole unicode range, `ß`
	Utf8(char),
	/// Decimal code, `4711`
	Numeric(u16),
	/// Marker attached by personal-dictionary `*word` lines; no file
	/// encoding can produce it
	Forbidden,
}

impl Flag {
	/// Flag code denoted by one literal `COMPOUNDRULE` character
	pub(crate) fn from_rule_char(char: char, fty: &FlagType) -> Self {
		match fty {
			FlagType::Utf8 => Self::Utf8(char),
			FlagType::Numeric => char
				.to_digit(10)
				.map_or(Self::Utf8(char), |d| Self::Numeric(d as u16)),
			FlagType::Short | FlagType::Long => Self::Short(char),
		}
	}
}

impl fmt::Display for Flag {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match *self {
			Self::Numeric(code) => write!(f, "{code}"),
			Self::Forbidden => f.write_str("(forbidden)"),
			Self::Short(code) | Self::Utf8(code) => write!(f, "{code}"),
			Self::Long(pair) => write!(f, "{}{}", pair[0], pair[1]),
		}
	}
}

/// Wire shape of flag codes, chosen by the `FLAG` directive
#[derive(Debug, Default, Clone)]
pub(crate) enum FlagType {
	/// One character per code
	#[default]
	Short,
	/// Two characters per code
	Long,
	/// One scalar value per code
	Utf8,
	/// Comma-separated decimal codes
	Numeric,
}

impl FlagType {
	/// Read the `FLAG` argument, keeping the default for unknown names
	fn parse(name: &str) -> Self {
		match name {
			"long" => Self::Long,
			"num" => Self::Numeric,
			"UTF-8" => Self::Utf8,
			_ => Self::Short,
		}
	}
}

fn set_flag(place: &mut Option<Flag>, flag: Flag) {
	if let Some(old_flag) = place.replace(flag) {
		log::debug!("flag redefined, was {old_flag}");
	}
}
