// Script normalization: katakana/hiragana folding and combining-mark composition

use crate::diacritic::{Mark, decompose, recompose};

/// Offset between a katakana code point and its hiragana counterpart.
const KATAKANA_OFFSET: u32 = 0x60;

/// Prolonged sound mark. Shared by both scripts and counted as kana.
pub const PROLONGED_SOUND_MARK: char = 'ー';

/// Whether `ch` is hiragana (U+3041..=U+3096) or the prolonged sound mark.
pub fn is_hiragana(ch: char) -> bool {
    matches!(ch, '\u{3041}'..='\u{3096}') || ch == PROLONGED_SOUND_MARK
}

/// Whether `ch` is katakana (U+30A1..=U+30F6) or the prolonged sound mark.
pub fn is_katakana(ch: char) -> bool {
    matches!(ch, '\u{30A1}'..='\u{30F6}') || ch == PROLONGED_SOUND_MARK
}

/// Fold one katakana character to hiragana; anything else is returned as is.
pub fn katakana_to_hiragana(ch: char) -> char {
    if matches!(ch, '\u{30A1}'..='\u{30F6}') {
        char::from_u32(ch as u32 - KATAKANA_OFFSET).unwrap_or(ch)
    } else {
        ch
    }
}

/// Lift one hiragana character to katakana; anything else is returned as is.
pub fn hiragana_to_katakana(ch: char) -> char {
    if matches!(ch, '\u{3041}'..='\u{3096}') {
        char::from_u32(ch as u32 + KATAKANA_OFFSET).unwrap_or(ch)
    } else {
        ch
    }
}

pub fn to_hiragana(text: &str) -> String {
    text.chars().map(katakana_to_hiragana).collect()
}

pub fn to_katakana(text: &str) -> String {
    text.chars().map(hiragana_to_katakana).collect()
}

/// Compose combining voiced/semi-voiced marks onto the preceding kana.
///
/// A combining mark that cannot attach (no preceding character, or no
/// registered variant such as あ + U+3099) is kept in place.
pub fn compose_marks(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if let Some(mark) = Mark::from_combining(ch) {
            if let Some(prev) = out.pop() {
                let (base, existing) = decompose(prev);
                let composed = recompose(base, mark);
                if existing == Mark::None && composed != base {
                    out.push(composed);
                    continue;
                }
                out.push(prev);
            }
        }
        out.push(ch);
    }
    out
}

/// The normal form every engine works on: katakana folded to hiragana,
/// combining marks composed.
pub fn normalize(text: &str) -> String {
    compose_marks(&to_hiragana(text))
}
