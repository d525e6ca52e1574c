//! respell
//!
//! Hunspell-compatible spell checking built on a pair of dictionary
//! artifacts: an affix description (`.aff`) and a word list (`.dic`).
//!
//! Entrypoint methods are
//! - [`Checker::correct`]: is this token a valid word?
//! - [`Checker::suggest`]: what are the most plausible corrections?

mod aff;
mod casing;
mod dic;
mod expand;
mod graph;

pub mod checker;
pub mod lookup;
pub mod suggest;

pub use checker::Checker;
