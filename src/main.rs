//! respell CLI
//!
//! Checks the words given on the command line against a dictionary
//! pair, printing suggestions for the misspelt ones.

use respell::Checker;
use std::{env, path::Path};

fn main() -> Result<(), Box<dyn std::error::Error>> {
	pretty_env_logger::init();

	let mut args = env::args().skip(1);
	let base = args
		.next()
		.ok_or("usage: respell <dictionary-base-path> <word>...")?;
	let checker = Checker::from_pair(Path::new(&base))?;

	for word in args {
		if checker.correct(&word) {
			println!("{word}: ok");
		} else {
			println!("{word}: {}", checker.suggest(&word).join(", "));
		}
	}

	Ok(())
}
