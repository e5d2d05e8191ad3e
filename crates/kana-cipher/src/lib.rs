//! Classical cipher engines over the kana syllabary.
//!
//! Every engine reads hiragana or katakana text, transforms the symbols of
//! its alphabet and leaves everything else where it was. Katakana input is
//! folded to hiragana first; output is hiragana.
//!
//! # Architecture
//!
//! - [`adapter`] -- Member walk shared by all families (normalize, resolve, splice)
//! - [`substitution`] -- Fixed, reflective, running-key and one-time-key shifts
//! - [`transposition`] -- Rail fence and keyed columnar permutation
//! - [`rotor`] -- Three-rotor machine with reflector
//! - [`coordinate`] -- Polybius square and tap code
//! - [`symbolic`] -- Shinobi iroha and pigpen
//! - [`xor`] -- XOR over code points with hex tokens
//! - [`keys`] -- Key schemas and lenient key resolution
//! - [`engine`] -- Engine identifiers and catalogue metadata
//! - [`codebook`] -- Dispatch by engine id, the boundary front ends call

pub mod adapter;
pub mod codebook;
pub mod coordinate;
pub mod engine;
pub mod keys;
pub mod rotor;
pub mod substitution;
pub mod symbolic;
pub mod transposition;
pub mod xor;

pub use codebook::{CipherInput, CipherOutput, Codebook, Direction, Encryption};
pub use engine::{Category, EngineId, EngineInfo, OutputKind};
pub use keys::{KeySet, ParamKind, ParamSpec};
pub use symbolic::PigpenGlyph;

/// Error type for codebook calls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CipherError {
    /// No engine has this identifier.
    #[error("unknown engine: {0}")]
    UnknownEngine(String),

    /// A key pair was not of the form `NAME=VALUE`.
    #[error("malformed key (expected NAME=VALUE): {0}")]
    MalformedKey(String),

    /// The engine failed unexpectedly; the message is for logs only.
    #[error("{engine} failed: {message}")]
    Internal {
        engine: &'static str,
        message: String,
    },
}
