use respell::Checker;

#[test]
fn empty_and_blank_inputs_are_neutral() -> Result<(), Box<dyn std::error::Error>> {
	let checker = Checker::new("", Some("1\nhello\n"))?;

	assert!(!checker.correct(""));
	assert!(!checker.correct("   "));
	assert!(checker.suggest("").is_empty());
	assert!(checker.suggest("  \t ").is_empty());
	assert!(!checker.has_prefix("x"));

	let verdict = checker.spell("");
	assert!(!verdict.correct);
	assert!(!verdict.forbidden);
	assert!(!verdict.warn);

	Ok(())
}

/// The distance-two walk is capped, so even absurd inputs come back
#[test]
fn very_long_input_terminates() -> Result<(), Box<dyn std::error::Error>> {
	let checker = Checker::new("", Some("1\nhello\n"))?;

	let long = "a".repeat(100);
	assert!(!checker.correct(&long));
	assert!(checker.suggest(&long).len() <= 10);

	Ok(())
}

#[test]
fn escaped_slash_in_word() -> Result<(), Box<dyn std::error::Error>> {
	let checker = Checker::new("", Some("1\nand\\/or\n"))?;

	assert!(checker.correct("and/or"));
	assert!(!checker.correct("and"));

	Ok(())
}

/// Non-ASCII roots, affix strings and flag codes in `UTF-8` flag mode
#[test]
fn utf8_flags_and_words() -> Result<(), Box<dyn std::error::Error>> {
	let aff = "\
FLAG UTF-8
SFX π Y 1
SFX π   0     n      .
";
	let checker = Checker::new(aff, Some("2\nküche/π\nnaïve\n"))?;

	assert!(checker.correct("küche"));
	assert!(checker.correct("küchen"));
	assert!(checker.correct("naïve"));
	assert!(checker.correct("NAÏVE"));
	assert!(!checker.correct("küchen's"));

	Ok(())
}

#[test]
fn numeric_flag_mode() -> Result<(), Box<dyn std::error::Error>> {
	let aff = "\
FLAG num
SFX 501 Y 1
SFX 501   0     s      .
";
	let checker = Checker::new(aff, Some("1\nword/501\n"))?;

	assert!(checker.correct("word"));
	assert!(checker.correct("words"));

	Ok(())
}

/// Long flag mode reads codes as character pairs
#[test]
fn long_flag_mode() -> Result<(), Box<dyn std::error::Error>> {
	let aff = "\
FLAG long
SFX Zx Y 1
SFX Zx   0     s      .
";
	let checker = Checker::new(aff, Some("1\nword/Zx\n"))?;

	assert!(checker.correct("words"));

	Ok(())
}

#[test]
fn stats_track_the_graph() -> Result<(), Box<dyn std::error::Error>> {
	let checker = Checker::new("SFX B Y 1\nSFX B 0 s .\n", Some("2\nfoo/B\nbar\n"))?;

	let stats = checker.stats();
	// foo, foos, bar
	assert_eq!(stats.words, 3);
	assert!(stats.nodes >= stats.words);
	assert!(stats.avg_depth > 0.0);

	Ok(())
}
