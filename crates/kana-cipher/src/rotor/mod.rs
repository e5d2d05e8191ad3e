// Rotor cipher machine: three stepping rotors and a reflector
//
// The machine is rebuilt for every call and stepped once per member symbol.
// Because the reflector is an involution without fixed points, the same
// keyed machine both encrypts and decrypts, and no symbol ever maps to
// itself.

pub mod tables;

use std::fmt;

use kana_core::Alphabet;

use crate::adapter;
use tables::{INVERSE_WIRINGS, NOTCHES, REFLECTOR, ROTOR_SIZE, WIRINGS};

const _: () = assert!(ROTOR_SIZE == Alphabet::GOJUON.len());

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// One of the five wired rotors.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RotorId {
    #[default]
    I,
    II,
    III,
    IV,
    V,
}

impl RotorId {
    pub const ALL: [RotorId; 5] = [Self::I, Self::II, Self::III, Self::IV, Self::V];

    /// Roman numerals accepted by [`RotorId::parse`].
    pub const NAMES: [&'static str; 5] = ["I", "II", "III", "IV", "V"];

    /// Parse a roman numeral. Anything unrecognized selects rotor I.
    pub fn parse(name: &str) -> Self {
        match name.trim() {
            "I" => Self::I,
            "II" => Self::II,
            "III" => Self::III,
            "IV" => Self::IV,
            "V" => Self::V,
            other => {
                tracing::debug!(rotor = other, "unknown rotor, using I");
                Self::I
            }
        }
    }

    pub const fn name(self) -> &'static str {
        Self::NAMES[self as usize]
    }

    const fn table(self) -> usize {
        self as usize
    }
}

impl fmt::Display for RotorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Start position string used when none is given.
pub const DEFAULT_START: &str = "あああ";

/// Rotor selection and start offsets, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotorKey {
    pub rotors: [RotorId; 3],
    pub offsets: [usize; 3],
}

impl Default for RotorKey {
    fn default() -> Self {
        Self {
            rotors: [RotorId::I, RotorId::II, RotorId::III],
            offsets: [0; 3],
        }
    }
}

impl RotorKey {
    /// Build a key from rotor numerals and a start-position string.
    ///
    /// The first three member symbols of `start` give the left, middle and
    /// right offsets; missing symbols leave the offset at 0.
    pub fn parse(rotors: [&str; 3], start: &str) -> Self {
        let mut offsets = [0; 3];
        for (slot, index) in offsets
            .iter_mut()
            .zip(adapter::member_indices(&Alphabet::GOJUON, start))
        {
            *slot = index;
        }
        Self {
            rotors: rotors.map(RotorId::parse),
            offsets,
        }
    }
}

// ---------------------------------------------------------------------------
// Machine
// ---------------------------------------------------------------------------

/// Three rotor slots with their current offsets. Slot 0 is the left rotor,
/// slot 2 the fast right rotor.
#[derive(Debug, Clone)]
pub struct RotorMachine {
    rotors: [RotorId; 3],
    offsets: [usize; 3],
}

impl RotorMachine {
    pub fn new(key: &RotorKey) -> Self {
        Self {
            rotors: key.rotors,
            offsets: key.offsets.map(|o| o % ROTOR_SIZE),
        }
    }

    pub fn offsets(&self) -> [usize; 3] {
        self.offsets
    }

    /// Advance the rotors before a key press.
    ///
    /// The right rotor always moves. It carries into the middle rotor when
    /// it sat on its notch, and the middle carries into the left when both
    /// sat on their notches.
    pub fn step(&mut self) {
        let notch = |slot: usize| NOTCHES[self.rotors[slot].table()] as usize;
        let middle_moves = self.offsets[2] == notch(2);
        let left_moves = middle_moves && self.offsets[1] == notch(1);

        self.offsets[2] = (self.offsets[2] + 1) % ROTOR_SIZE;
        if middle_moves {
            self.offsets[1] = (self.offsets[1] + 1) % ROTOR_SIZE;
        }
        if left_moves {
            self.offsets[0] = (self.offsets[0] + 1) % ROTOR_SIZE;
        }
    }

    /// Step, then send `index` through the rotors, the reflector and back.
    pub fn press(&mut self, index: usize) -> usize {
        self.step();
        let mut signal = index % ROTOR_SIZE;
        for slot in (0..3).rev() {
            signal = self.through(slot, signal, &WIRINGS);
        }
        signal = REFLECTOR[signal] as usize;
        for slot in 0..3 {
            signal = self.through(slot, signal, &INVERSE_WIRINGS);
        }
        signal
    }

    fn through(&self, slot: usize, signal: usize, wirings: &[[u8; ROTOR_SIZE]; 5]) -> usize {
        let offset = self.offsets[slot];
        let contact = (signal + offset) % ROTOR_SIZE;
        let out = wirings[self.rotors[slot].table()][contact] as usize;
        (out + ROTOR_SIZE - offset) % ROTOR_SIZE
    }
}

/// Encrypt or decrypt `text`; the operation is its own inverse.
///
/// Only members of the 80-symbol alphabet step the machine. Everything
/// else is copied through.
pub fn encipher(text: &str, key: &RotorKey) -> String {
    let alphabet = Alphabet::GOJUON;
    let mut machine = RotorMachine::new(key);
    adapter::map_members(&alphabet, text, |m, _| m.with_index(machine.press(m.index)))
}
