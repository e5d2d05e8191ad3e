// Symbol ciphers: kana replaced by drawn or typographic symbols

pub mod pigpen;
pub mod shinobi;

pub use pigpen::{PigpenGlyph, PigpenTable};
pub use shinobi::ShinobiTable;
