// Member transform walk shared by every cipher family.
//
// Text is normalized first (katakana folded, combining marks composed), then
// split into pieces: *members* of the alphabet and other characters. A
// character is a member either directly, or through the diacritic adapter
// when the alphabet only holds its base form. Members are handed to the
// cipher as (index, mark); everything else stays where it is.
//
// For a base-only alphabet a mark must survive landing on a base that has no
// such variant (が shifted onto あ). It is then written as a combining mark
// after the base, and read back from there on the way in, so the transform
// stays reversible.
//
// A stray combining mark (one that composed with nothing on the way in) is a
// non-member and never moves. After a transform the member in front of it
// may be one the mark would compose with, or one that absorbs it. Such a
// mark is written after a combining grapheme joiner, which blocks both, and
// the joiner is dropped again when the text is read.

use std::iter::Peekable;

use kana_core::diacritic::{self, Mark};
use kana_core::{Alphabet, script};

/// A character resolved against an alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Member {
    /// Index of the (base) symbol in the alphabet.
    pub index: usize,
    /// Mark to reattach after the transform. Always [`Mark::None`] when the
    /// symbol is itself a member.
    pub mark: Mark,
}

impl Member {
    pub const fn new(index: usize, mark: Mark) -> Self {
        Self { index, mark }
    }

    /// Same mark, different index.
    pub const fn with_index(self, index: usize) -> Self {
        Self {
            index,
            mark: self.mark,
        }
    }
}

/// One unit of normalized text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Piece {
    Member(Member),
    Other(char),
}

/// Resolve `ch` against `alphabet`.
pub fn resolve(alphabet: &Alphabet, ch: char) -> Option<Member> {
    if let Some(index) = alphabet.index_of(ch) {
        return Some(Member::new(index, Mark::None));
    }
    let (base, mark) = diacritic::decompose(ch);
    if mark == Mark::None {
        return None;
    }
    alphabet.index_of(base).map(|index| Member::new(index, mark))
}

/// Whether the alphabet reaches marked kana only through their base form.
pub fn carries_marks(alphabet: &Alphabet) -> bool {
    !alphabet.symbols().iter().any(|&ch| diacritic::is_marked(ch))
}

/// Written between a member and a stray combining mark that would otherwise
/// join it when the text is read again.
pub const MARK_JOINER: char = '\u{034F}';

fn next_piece<I>(alphabet: &Alphabet, carries: bool, chars: &mut Peekable<I>) -> Option<Piece>
where
    I: Iterator<Item = char> + Clone,
{
    let ch = chars.next()?;
    let Some(mut member) = resolve(alphabet, ch) else {
        return Some(Piece::Other(ch));
    };
    if carries && member.mark == Mark::None {
        if let Some(mark) = chars.peek().and_then(|&next| Mark::from_combining(next)) {
            chars.next();
            member.mark = mark;
        }
    }
    if chars.peek() == Some(&MARK_JOINER) && is_combining_mark(chars.clone().nth(1)) {
        chars.next();
    }
    Some(Piece::Member(member))
}

fn is_combining_mark(ch: Option<char>) -> bool {
    ch.and_then(Mark::from_combining).is_some()
}

/// Normalize `text` and split it into pieces.
pub fn pieces(alphabet: &Alphabet, text: &str) -> Vec<Piece> {
    let normalized = script::normalize(text);
    let carries = carries_marks(alphabet);
    let mut chars = normalized.chars().peekable();
    std::iter::from_fn(|| next_piece(alphabet, carries, &mut chars)).collect()
}

/// Whether `mark` written right after `prev` would be taken into it on the
/// next read: composed by normalization, or absorbed by a base-only
/// alphabet.
fn joins(alphabet: &Alphabet, prev: char, mark: Mark) -> bool {
    if Mark::from_combining(prev).is_some() {
        return false;
    }
    let (base, existing) = diacritic::decompose(prev);
    existing == Mark::None && (carries_marks(alphabet) || diacritic::has_variant(base, mark))
}

/// Append non-member text that directly follows a rendered member. A leading
/// stray mark that would join the member is kept apart by [`MARK_JOINER`].
pub fn push_after_member(out: &mut String, alphabet: &Alphabet, text: &str) {
    let mark = text.chars().next().and_then(Mark::from_combining);
    if let (Some(prev), Some(mark)) = (out.chars().next_back(), mark) {
        if joins(alphabet, prev, mark) {
            out.push(MARK_JOINER);
        }
    }
    out.push_str(text);
}

/// Write a member back as text, reattaching its mark. A mark the symbol
/// has no variant for is written as the combining character after it.
pub fn render_into(out: &mut String, alphabet: &Alphabet, member: Member) {
    let base = alphabet.symbol_at(member.index as i64);
    let ch = diacritic::recompose(base, member.mark);
    out.push(ch);
    if ch == base {
        if let Some(combining) = member.mark.combining() {
            out.push(combining);
        }
    }
}

pub fn render(alphabet: &Alphabet, member: Member) -> String {
    let mut out = String::new();
    render_into(&mut out, alphabet, member);
    out
}

fn render_pieces(alphabet: &Alphabet, pieces: &[Piece]) -> String {
    let mut out = String::with_capacity(pieces.len() * 3);
    let mut after_member = false;
    for piece in pieces {
        match *piece {
            Piece::Member(member) => render_into(&mut out, alphabet, member),
            Piece::Other(ch) if after_member => {
                push_after_member(&mut out, alphabet, ch.encode_utf8(&mut [0; 4]))
            }
            Piece::Other(ch) => out.push(ch),
        }
        after_member = matches!(piece, Piece::Member(_));
    }
    out
}

/// Number of members in `text` (after normalization).
pub fn count_members(alphabet: &Alphabet, text: &str) -> usize {
    pieces(alphabet, text)
        .iter()
        .filter(|p| matches!(p, Piece::Member(_)))
        .count()
}

/// Indices of the members of `text`, in order. Marks are dropped.
///
/// This is how key material is read: a keyword goes through the same
/// normalization as plaintext and contributes one index per member.
pub fn member_indices(alphabet: &Alphabet, text: &str) -> Vec<usize> {
    pieces(alphabet, text)
        .into_iter()
        .filter_map(|p| match p {
            Piece::Member(m) => Some(m.index),
            Piece::Other(_) => None,
        })
        .collect()
}

/// Substitute every member of `text`.
///
/// `f` receives the member and its ordinal among members (0, 1, 2, ...),
/// which is what running-key ciphers index their key with. Non-members are
/// copied to the output at their original position.
pub fn map_members<F>(alphabet: &Alphabet, text: &str, mut f: F) -> String
where
    F: FnMut(Member, usize) -> Member,
{
    let mut pieces = pieces(alphabet, text);
    let mut ordinal = 0;
    for piece in &mut pieces {
        if let Piece::Member(member) = piece {
            *member = f(*member, ordinal);
            ordinal += 1;
        }
    }
    render_pieces(alphabet, &pieces)
}

/// Permute the members of `text` and splice them back into the member
/// positions. Non-members never move.
///
/// `permute` must return exactly as many members as it was given.
pub fn permute_members<F>(alphabet: &Alphabet, text: &str, permute: F) -> String
where
    F: FnOnce(&[Member]) -> Vec<Member>,
{
    let mut pieces = pieces(alphabet, text);
    let (slots, members): (Vec<usize>, Vec<Member>) = pieces
        .iter()
        .enumerate()
        .filter_map(|(slot, piece)| match *piece {
            Piece::Member(m) => Some((slot, m)),
            Piece::Other(_) => None,
        })
        .unzip();

    let permuted = permute(&members);
    debug_assert_eq!(permuted.len(), members.len());

    for (slot, member) in slots.into_iter().zip(permuted) {
        pieces[slot] = Piece::Member(member);
    }
    render_pieces(alphabet, &pieces)
}
