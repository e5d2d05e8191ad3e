//! Shared kana primitives for the cipher engines.
//!
//! This crate owns everything the cipher families agree on before any
//! transform happens: which symbols exist, in which order, where they sit
//! on the coordinate grid, how a voiced or semi-voiced kana splits into a
//! base symbol and a mark, and how raw input text is folded into the form
//! the engines expect.
//!
//! # Architecture
//!
//! - [`alphabet`] -- Ordered symbol set, index arithmetic and grid layout
//! - [`diacritic`] -- Decompose/recompose of voiced and semi-voiced kana
//! - [`script`] -- Katakana/hiragana folding and combining-mark composition

pub mod alphabet;
pub mod diacritic;
pub mod script;

pub use alphabet::{Alphabet, AlphabetError, GridCoordinate};
pub use diacritic::Mark;
