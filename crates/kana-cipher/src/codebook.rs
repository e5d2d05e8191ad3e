// Codebook: dispatch by engine id, the single entry point for front ends
//
// The codebook owns the symbol tables that are worth building once (the
// shinobi and pigpen lookup maps). Everything else is derived per call from
// the key set, so a shared codebook can serve any number of callers.
//
// Error handling at this boundary:
// - bad key values are resolved to defaults inside `keys`
// - input of the wrong shape (glyphs for a text engine, text for pigpen
//   decryption) comes back unchanged
// - a panic inside an engine is caught and reported as `CipherError::Internal`

use std::panic::{self, AssertUnwindSafe};

use kana_core::Alphabet;

use crate::CipherError;
use crate::coordinate;
use crate::engine::{self, EngineId, OutputKind};
use crate::keys::KeySet;
use crate::rotor::{self, RotorKey};
use crate::substitution::{self, RunningKey};
use crate::symbolic::{PigpenGlyph, PigpenTable, ShinobiTable};
use crate::transposition::{self, ColumnarKey};
use crate::xor::{self, XorKey};

/// Input to an engine call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherInput<'a> {
    Text(&'a str),
    Glyphs(&'a [PigpenGlyph]),
}

impl<'a> From<&'a str> for CipherInput<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a [PigpenGlyph]> for CipherInput<'a> {
    fn from(glyphs: &'a [PigpenGlyph]) -> Self {
        Self::Glyphs(glyphs)
    }
}

impl<'a> From<&'a Vec<PigpenGlyph>> for CipherInput<'a> {
    fn from(glyphs: &'a Vec<PigpenGlyph>) -> Self {
        Self::Glyphs(glyphs)
    }
}

/// Output of an engine call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CipherOutput {
    Text(String),
    Glyphs(Vec<PigpenGlyph>),
}

impl CipherOutput {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Glyphs(_) => None,
        }
    }

    pub fn as_glyphs(&self) -> Option<&[PigpenGlyph]> {
        match self {
            Self::Text(_) => None,
            Self::Glyphs(glyphs) => Some(glyphs),
        }
    }

    pub fn kind(&self) -> OutputKind {
        match self {
            Self::Text(_) => OutputKind::Text,
            Self::Glyphs(_) => OutputKind::Glyphs,
        }
    }
}

/// Result of a successful call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encryption {
    pub output: CipherOutput,
    /// Key material generated during the call, which the caller needs to
    /// decrypt. Only set by engines whose catalogue entry says
    /// `generates_key`.
    pub used_key: Option<String>,
}

impl Encryption {
    fn text(output: String) -> Self {
        Self {
            output: CipherOutput::Text(output),
            used_key: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Encrypt,
    Decrypt,
}

/// Prepared tables plus dispatch for every engine in the catalogue.
#[derive(Debug, Clone, Default)]
pub struct Codebook {
    shinobi: ShinobiTable,
    pigpen: PigpenTable,
}

impl Codebook {
    pub fn new() -> Self {
        Self {
            shinobi: ShinobiTable::new(),
            pigpen: PigpenTable::new(),
        }
    }

    /// Encrypt with the engine named `engine`.
    pub fn encrypt<'a>(
        &self,
        engine: &str,
        input: impl Into<CipherInput<'a>>,
        keys: &KeySet,
    ) -> Result<Encryption, CipherError> {
        self.run(lookup(engine)?, Direction::Encrypt, input.into(), keys)
    }

    /// Decrypt with the engine named `engine`.
    pub fn decrypt<'a>(
        &self,
        engine: &str,
        input: impl Into<CipherInput<'a>>,
        keys: &KeySet,
    ) -> Result<Encryption, CipherError> {
        self.run(lookup(engine)?, Direction::Decrypt, input.into(), keys)
    }

    /// Run one engine call. Panics inside the engine are caught and
    /// returned as [`CipherError::Internal`].
    ///
    /// The process panic hook still runs first; the default one prints the
    /// message to stderr. Front ends that want the error alone install their
    /// own hook. On wasm32 a panic aborts and is never caught here.
    pub fn run(
        &self,
        engine: EngineId,
        direction: Direction,
        input: CipherInput<'_>,
        keys: &KeySet,
    ) -> Result<Encryption, CipherError> {
        let call = AssertUnwindSafe(|| self.dispatch(engine, direction, input, keys));
        panic::catch_unwind(call).map_err(|payload| {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            tracing::error!(engine = engine.id(), ?direction, %message, "engine panicked");
            CipherError::Internal {
                engine: engine.id(),
                message,
            }
        })
    }

    fn dispatch(
        &self,
        engine: EngineId,
        direction: Direction,
        input: CipherInput<'_>,
        keys: &KeySet,
    ) -> Encryption {
        let text = match (engine, direction, input) {
            (EngineId::Pigpen, Direction::Encrypt, CipherInput::Text(text)) => {
                return Encryption {
                    output: CipherOutput::Glyphs(self.pigpen.encrypt(text)),
                    used_key: None,
                };
            }
            (EngineId::Pigpen, Direction::Decrypt, CipherInput::Glyphs(glyphs)) => {
                return Encryption::text(self.pigpen.decrypt(glyphs));
            }
            (_, _, CipherInput::Glyphs(glyphs)) => {
                tracing::debug!(engine = engine.id(), "glyph input for a text engine, returned unchanged");
                return Encryption {
                    output: CipherOutput::Glyphs(glyphs.to_vec()),
                    used_key: None,
                };
            }
            (EngineId::Pigpen, Direction::Decrypt, CipherInput::Text(text)) => {
                tracing::debug!("text input for pigpen decryption, returned unchanged");
                return Encryption::text(text.to_string());
            }
            (_, _, CipherInput::Text(text)) => text,
        };

        let alphabet = select_alphabet(engine, keys);
        let encrypt = direction == Direction::Encrypt;
        tracing::trace!(engine = engine.id(), ?direction, alphabet = alphabet.name(), "dispatch");

        match engine {
            EngineId::Caesar => {
                let shift = keys.number(&engine::SHIFT);
                let shift = if encrypt { shift } else { -shift };
                Encryption::text(substitution::shift(&alphabet, text, shift))
            }
            EngineId::Atbash => Encryption::text(substitution::reflect(&alphabet, text)),
            EngineId::Vigenere => {
                let key = RunningKey::new(&alphabet, keys.text(&engine::VIGENERE_KEYWORD));
                Encryption::text(if encrypt {
                    substitution::running_key_encrypt(&alphabet, text, &key)
                } else {
                    substitution::running_key_decrypt(&alphabet, text, &key)
                })
            }
            EngineId::Polybius => Encryption::text(if encrypt {
                coordinate::polybius_encrypt(&alphabet, text)
            } else {
                coordinate::polybius_decrypt(&alphabet, text)
            }),
            EngineId::TapCode => Encryption::text(if encrypt {
                coordinate::tap_code_encrypt(&alphabet, text)
            } else {
                coordinate::tap_code_decrypt(&alphabet, text)
            }),
            EngineId::RailFence => {
                let rails = usize::try_from(keys.number(&engine::RAILS)).unwrap_or(1);
                Encryption::text(if encrypt {
                    transposition::rail_fence_encrypt(&alphabet, text, rails)
                } else {
                    transposition::rail_fence_decrypt(&alphabet, text, rails)
                })
            }
            EngineId::Columnar => {
                let key = ColumnarKey::new(&alphabet, keys.text(&engine::COLUMNAR_KEYWORD));
                Encryption::text(if encrypt {
                    transposition::columnar_encrypt(&alphabet, text, &key)
                } else {
                    transposition::columnar_decrypt(&alphabet, text, &key)
                })
            }
            EngineId::Shinobi => Encryption::text(if encrypt {
                self.shinobi.encrypt(text)
            } else {
                self.shinobi.decrypt(text)
            }),
            EngineId::Enigma => {
                let rotors = engine::ROTORS.map(|spec| keys.choice(&spec));
                let key = RotorKey::parse(rotors, keys.text(&engine::START_POSITION));
                Encryption::text(rotor::encipher(text, &key))
            }
            EngineId::OneTimePad => {
                let key = keys.text(&engine::PAD_KEY);
                if encrypt {
                    let pad = substitution::one_time_pad_encrypt(&alphabet, text, key);
                    Encryption {
                        output: CipherOutput::Text(pad.output),
                        used_key: Some(pad.key),
                    }
                } else {
                    Encryption::text(substitution::one_time_pad_decrypt(&alphabet, text, key))
                }
            }
            EngineId::Xor => {
                let key = XorKey::new(keys.text(&engine::XOR_KEY));
                Encryption::text(if encrypt {
                    xor::encrypt(text, &key)
                } else {
                    xor::decrypt(text, &key)
                })
            }
            // Handled above for every input shape.
            EngineId::Pigpen => Encryption::text(text.to_string()),
        }
    }
}

fn lookup(engine: &str) -> Result<EngineId, CipherError> {
    EngineId::from_id(engine).ok_or_else(|| CipherError::UnknownEngine(engine.to_string()))
}

fn select_alphabet(engine: EngineId, keys: &KeySet) -> Alphabet {
    if engine.info().selects_alphabet() {
        Alphabet::by_name(keys.choice(&engine::ALPHABET)).unwrap_or_default()
    } else {
        Alphabet::GOJUON
    }
}
