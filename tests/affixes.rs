mod utils;

const BASE_AFF: &str = "\
PFX A Y 1
PFX A   0     un     .

SFX B Y 1
SFX B   0     s      .

SFX D Y 2
SFX D   0     d      e
SFX D   0     ed     [^e]
";

const BASE_DIC: &str = "\
3
hello/B
test/ABD
world
";

/// Roots expand through their prefix, suffix and combined forms, and
/// the case cascade accepts folded variants of all of them
#[test]
fn affix_application() -> Result<(), Box<dyn std::error::Error>> {
	utils::test_dictionary_pair(
		BASE_AFF,
		BASE_DIC,
		&[
			"hello",
			"hellos",
			"test",
			"tests",
			"tested",
			"untest",
			"untests",
			"untested",
			"world",
			"HELLO",
			"Hello",
			"Untested",
		],
		&["unhello", "worlded", "unworld", "helloed", "untesteds"],
		None,
	)
}

/// Suffixes only apply where their condition matches
#[test]
fn suffix_conditions() -> Result<(), Box<dyn std::error::Error>> {
	utils::test_dictionary_pair(
		"\
SFX D Y 2
SFX D   0     d      e
SFX D   0     ed     [^e]
",
		"\
2
like/D
walk/D
",
		&["liked", "walked"],
		&["likeed", "walkd"],
		None,
	)
}

/// Continuation flags on an entry chain into further rules
#[test]
fn continuation_flags() -> Result<(), Box<dyn std::error::Error>> {
	utils::test_dictionary_pair(
		"\
SFX B Y 1
SFX B   0     s      .

SFX E Y 1
SFX E   0     er/B   .
",
		"\
1
quick/E
",
		&["quick", "quicker", "quickers"],
		&["quicks"],
		None,
	)
}
