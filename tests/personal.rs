use respell::Checker;

/// A `*word` personal line forbids an otherwise fine word
#[test]
fn forbidden_via_personal() -> Result<(), Box<dyn std::error::Error>> {
	let mut checker = Checker::new("", Some("2\nhello\nworld\n"))?;

	assert!(checker.correct("hello"));

	checker.personal("*hello");

	let verdict = checker.spell("hello");
	assert!(verdict.forbidden);
	assert!(!verdict.correct);

	// the neighbours are untouched
	assert!(checker.correct("world"));

	// and the forbidden form never comes back as a correction
	assert!(!checker.suggest("helo").iter().any(|s| s == "hello"));

	Ok(())
}

/// Plain lines add words, `word/model` lines inherit the model's flags
#[test]
fn personal_add_and_model() -> Result<(), Box<dyn std::error::Error>> {
	let mut checker = Checker::new("SFX B Y 1\nSFX B 0 s .\n", Some("1\nword/B\n"))?;

	checker.personal("plain\nother/word\n");

	assert!(checker.correct("plain"));
	assert!(!checker.correct("plains"));

	assert!(checker.correct("other"));
	assert!(checker.correct("others"));

	Ok(())
}

/// Forbidding keeps previously attached flags around
#[test]
fn forbid_preserves_existing_flags() -> Result<(), Box<dyn std::error::Error>> {
	let mut checker = Checker::new("WARN W\n", Some("1\nrare/W\n"))?;

	checker.personal("*rare");

	let verdict = checker.spell("rare");
	assert!(verdict.forbidden);
	assert!(verdict.warn);
	assert!(!verdict.correct);

	Ok(())
}

/// Forbidding an unknown word introduces it as forbidden-only
#[test]
fn forbid_unknown_word() -> Result<(), Box<dyn std::error::Error>> {
	let mut checker = Checker::new("", Some("1\nhello\n"))?;

	checker.personal("*goodbye");

	let verdict = checker.spell("goodbye");
	assert!(verdict.forbidden);
	assert!(!verdict.correct);

	Ok(())
}
