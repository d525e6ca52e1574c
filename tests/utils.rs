use respell::Checker;

#[derive(Debug, thiserror::Error)]
#[error("{0} words failed to be correctly spellchecked")]
struct SpellCheckErrors(usize);

pub(crate) fn test_dictionary_pair(
	aff: &str,
	dic: &str,
	good: &[&str],
	wrong: &[&str],
	suggestions: Option<&[Vec<&str>]>,
) -> Result<(), Box<dyn std::error::Error>> {
	let _ = pretty_env_logger::try_init();

	let checker = Checker::new(aff, Some(dic))?;

	let mut errors = 0;

	errors += good
		.iter()
		.filter(|w| {
			if checker.correct(w) {
				log::info!("{w} is indeed fine");
				false
			} else {
				log::error!("{w} is supposed to be fine but is wrong");
				true
			}
		})
		.count();

	errors += wrong
		.iter()
		.filter(|w| {
			if checker.correct(w) {
				log::error!("{w} is supposed to be wrong but is fine");
				true
			} else {
				log::info!("{w} is indeed wrong");
				false
			}
		})
		.count();

	if let Some(suggestions) = suggestions {
		assert_eq!(suggestions.len(), wrong.len());

		for (word, expected) in wrong.iter().zip(suggestions) {
			let actual = checker.suggest(word);
			for expectation in expected {
				if actual.iter().any(|s| s == expectation) {
					log::info!("{word} did suggest {expectation}");
				} else {
					log::error!("{word} should have suggested {expectation}, got {actual:?}");
					errors += 1;
				}
			}
		}
	}

	if errors == 0 {
		Ok(())
	} else {
		Err(Box::new(SpellCheckErrors(errors)))
	}
}
