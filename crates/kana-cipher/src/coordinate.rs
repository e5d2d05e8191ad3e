// Coordinate ciphers: grid cells serialized as digits (Polybius) or taps
//
// Both encoders are driven by the alphabet grid. When a marked kana reaches
// the alphabet only through its base form, the base cell is written followed
// by the spacing mark (゛ or ゜) and the decoder reattaches it.
//
// Decoding is total: a token that does not describe a symbol is copied to
// the output as it is.

use kana_core::diacritic::Mark;
use kana_core::{Alphabet, GridCoordinate};

use crate::adapter::{self, Member, Piece};

const TAP: char = '・';
const TAP_SEPARATOR: &str = " / ";

fn cell(alphabet: &Alphabet, member: Member) -> GridCoordinate {
    let cols = alphabet.grid_cols();
    GridCoordinate::new(member.index / cols, member.index % cols)
}

fn push_mark(out: &mut String, mark: Mark) {
    if let Some(suffix) = mark.spacing() {
        out.push(suffix);
    }
}

/// Strip a trailing spacing mark from a token.
fn split_mark(token: &str) -> (&str, Mark) {
    if let Some(last) = token.chars().next_back() {
        if let Some(mark) = Mark::from_spacing(last) {
            return (&token[..token.len() - last.len_utf8()], mark);
        }
    }
    (token, Mark::None)
}

/// Member for a decoded cell. Marks are only read for alphabets that carry
/// them on their base symbols.
fn member_at(alphabet: &Alphabet, row: usize, col: usize, mark: Mark) -> Option<Member> {
    alphabet.symbol_at_coordinate(row, col)?;
    if mark != Mark::None && !adapter::carries_marks(alphabet) {
        return None;
    }
    Some(Member::new(row * alphabet.grid_cols() + col, mark))
}

// ---------------------------------------------------------------------------
// Polybius square
// ---------------------------------------------------------------------------

/// Replace each member with a three-digit token `RRC`: two-digit 1-based row,
/// one-digit 1-based column. Other characters become their own token,
/// except whitespace, which is the token delimiter and is dropped.
pub fn polybius_encrypt(alphabet: &Alphabet, text: &str) -> String {
    let mut tokens = Vec::new();
    for piece in adapter::pieces(alphabet, text) {
        let token = match piece {
            Piece::Member(member) => {
                let at = cell(alphabet, member);
                let mut token = format!("{:02}{}", at.row + 1, at.col + 1);
                push_mark(&mut token, member.mark);
                token
            }
            Piece::Other(ch) if ch.is_whitespace() => continue,
            Piece::Other(ch) => ch.to_string(),
        };
        tokens.push(token);
    }
    tokens.join(" ")
}

fn decode_polybius_token(alphabet: &Alphabet, token: &str) -> Option<Member> {
    let (digits, mark) = split_mark(token);
    let bytes = digits.as_bytes();
    if bytes.len() != 3 || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    let row = usize::from(bytes[0] - b'0') * 10 + usize::from(bytes[1] - b'0');
    let col = usize::from(bytes[2] - b'0');
    member_at(alphabet, row.checked_sub(1)?, col.checked_sub(1)?, mark)
}

pub fn polybius_decrypt(alphabet: &Alphabet, text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut after_member = false;
    for token in text.split_whitespace() {
        let member = decode_polybius_token(alphabet, token);
        match member {
            Some(member) => adapter::render_into(&mut out, alphabet, member),
            None if after_member => adapter::push_after_member(&mut out, alphabet, token),
            None => out.push_str(token),
        }
        after_member = member.is_some();
    }
    out
}

// ---------------------------------------------------------------------------
// Tap code
// ---------------------------------------------------------------------------

/// Replace each member with `row + 1` taps, a space and `col + 1` taps.
/// Symbols are separated by `" / "`; other characters, whitespace included,
/// are kept as their own part.
pub fn tap_code_encrypt(alphabet: &Alphabet, text: &str) -> String {
    let parts: Vec<String> = adapter::pieces(alphabet, text)
        .into_iter()
        .map(|piece| match piece {
            Piece::Member(member) => {
                let at = cell(alphabet, member);
                let mut part = String::new();
                part.extend(std::iter::repeat_n(TAP, at.row + 1));
                part.push(' ');
                part.extend(std::iter::repeat_n(TAP, at.col + 1));
                push_mark(&mut part, member.mark);
                part
            }
            Piece::Other(ch) => ch.to_string(),
        })
        .collect();
    parts.join(TAP_SEPARATOR)
}

fn tap_count(group: &str) -> Option<usize> {
    if group.chars().all(|c| c == TAP) {
        group.chars().count().checked_sub(1)
    } else {
        None
    }
}

fn decode_tap_part(alphabet: &Alphabet, part: &str) -> Option<Member> {
    let (taps, mark) = split_mark(part.trim());
    let mut groups = taps.split_whitespace();
    let (row, col) = match (groups.next(), groups.next(), groups.next()) {
        (Some(row), Some(col), None) => (tap_count(row)?, tap_count(col)?),
        _ => return None,
    };
    member_at(alphabet, row, col, mark)
}

pub fn tap_code_decrypt(alphabet: &Alphabet, text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut after_member = false;
    for part in text.split(TAP_SEPARATOR) {
        let member = decode_tap_part(alphabet, part);
        match member {
            Some(member) => adapter::render_into(&mut out, alphabet, member),
            None if after_member => adapter::push_after_member(&mut out, alphabet, part),
            None => out.push_str(part),
        }
        after_member = member.is_some();
    }
    out
}
