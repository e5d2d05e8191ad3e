// Substitution family: per-position modular shifts of member indices.
//
// Every variant adds some shift to a member's index modulo N:
// - fixed shift (Caesar): the same shift everywhere
// - reflective shift (Atbash): i -> N-1-i, its own inverse
// - running key (Vigenère): the k-th member shifts by the (k mod len)-th key index
// - one-time key: running key padded with random symbols to the message length

use kana_core::Alphabet;
use rand::Rng;

use crate::adapter::{self, Member};

// ---------------------------------------------------------------------------
// Fixed shift
// ---------------------------------------------------------------------------

/// Shift every member by `shift` positions. A negative shift moves backwards,
/// so `shift(shift(text, k), -k)` restores the member symbols.
pub fn shift(alphabet: &Alphabet, text: &str, shift: i64) -> String {
    adapter::map_members(alphabet, text, |m, _| {
        m.with_index(alphabet.floor_mod(m.index as i64 + shift))
    })
}

// ---------------------------------------------------------------------------
// Reflective shift
// ---------------------------------------------------------------------------

/// Map index `i` to `N-1-i`. Applying it twice is the identity.
pub fn reflect(alphabet: &Alphabet, text: &str) -> String {
    let last = alphabet.len() - 1;
    adapter::map_members(alphabet, text, |m, _| m.with_index(last - m.index))
}

// ---------------------------------------------------------------------------
// Running key
// ---------------------------------------------------------------------------

/// Cyclic sequence of shifts read from a keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunningKey {
    shifts: Vec<usize>,
}

impl RunningKey {
    /// Read a keyword against `alphabet`. Non-member characters in the
    /// keyword are ignored; a keyword without members acts as a single
    /// zero shift.
    pub fn new(alphabet: &Alphabet, keyword: &str) -> Self {
        let mut shifts = adapter::member_indices(alphabet, keyword);
        if shifts.is_empty() {
            shifts.push(0);
        }
        Self { shifts }
    }

    pub fn shifts(&self) -> &[usize] {
        &self.shifts
    }

    fn at(&self, ordinal: usize) -> i64 {
        self.shifts[ordinal % self.shifts.len()] as i64
    }
}

pub fn running_key_encrypt(alphabet: &Alphabet, text: &str, key: &RunningKey) -> String {
    adapter::map_members(alphabet, text, |m, k| {
        m.with_index(alphabet.floor_mod(m.index as i64 + key.at(k)))
    })
}

pub fn running_key_decrypt(alphabet: &Alphabet, text: &str, key: &RunningKey) -> String {
    adapter::map_members(alphabet, text, |m, k| {
        m.with_index(alphabet.floor_mod(m.index as i64 - key.at(k)))
    })
}

// ---------------------------------------------------------------------------
// One-time key
// ---------------------------------------------------------------------------

/// Ciphertext together with the key that produced it.
///
/// When the supplied key was shorter than the message, `key` contains the
/// random padding as well. The ciphertext cannot be decrypted without it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneTimePad {
    pub output: String,
    pub key: String,
}

/// Encrypt with a one-time key, padding it from the thread-local RNG.
pub fn one_time_pad_encrypt(alphabet: &Alphabet, text: &str, key: &str) -> OneTimePad {
    one_time_pad_encrypt_with_rng(alphabet, text, key, &mut rand::thread_rng())
}

/// Encrypt with a one-time key, padding it with uniformly random symbols
/// drawn from `rng` until it covers every member of `text`.
pub fn one_time_pad_encrypt_with_rng<R: Rng>(
    alphabet: &Alphabet,
    text: &str,
    key: &str,
    rng: &mut R,
) -> OneTimePad {
    let needed = adapter::count_members(alphabet, text);
    let mut indices = adapter::member_indices(alphabet, key);
    if indices.len() < needed {
        let padding = needed - indices.len();
        tracing::debug!(padding, "padding one-time key with random symbols");
        indices.extend((0..padding).map(|_| rng.gen_range(0..alphabet.len())));
    }

    let output = adapter::map_members(alphabet, text, |m, k| {
        m.with_index(alphabet.floor_mod((m.index + indices[k]) as i64))
    });
    let key = indices
        .iter()
        .map(|&i| alphabet.symbol_at(i as i64))
        .collect();
    OneTimePad { output, key }
}

/// Decrypt with a one-time key. Members beyond the end of the key are left
/// unshifted.
pub fn one_time_pad_decrypt(alphabet: &Alphabet, text: &str, key: &str) -> String {
    let indices = adapter::member_indices(alphabet, key);
    adapter::map_members(alphabet, text, |m: Member, k| {
        let shift = indices.get(k).copied().unwrap_or(0) as i64;
        m.with_index(alphabet.floor_mod(m.index as i64 - shift))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const G: Alphabet = Alphabet::GOJUON;

    #[test]
    fn fixed_shift_moves_index() {
        assert_eq!(shift(&G, "あ", 3), "え");
        assert_eq!(shift(&G, "え", -3), "あ");
    }

    #[test]
    fn fixed_shift_wraps_around() {
        assert_eq!(shift(&G, "ょ", 1), "あ");
        assert_eq!(shift(&G, "あ", -1), "ょ");
        assert_eq!(shift(&G, "あ", 160), "あ");
    }

    #[test]
    fn fixed_shift_passes_non_members() {
        assert_eq!(shift(&G, "あ, B-1 い", 1), "い, B-1 う");
    }

    #[test]
    fn reflect_is_involution() {
        let text = "こんにちは、せかい!がっこう";
        assert_eq!(reflect(&G, "あ"), "ょ");
        assert_eq!(reflect(&G, &reflect(&G, text)), text);
    }

    #[test]
    fn running_key_uses_member_ordinal() {
        // Key さ(10): あ -> さ, skipping the comma does not consume key.
        let key = RunningKey::new(&G, "さ");
        assert_eq!(running_key_encrypt(&G, "あ、あ", &key), "さ、さ");

        let key = RunningKey::new(&G, "いう");
        assert_eq!(running_key_encrypt(&G, "あああ", &key), "いうい");
        assert_eq!(running_key_decrypt(&G, "いうい", &key), "あああ");
    }

    #[test]
    fn running_key_without_members_is_zero_shift() {
        let key = RunningKey::new(&G, "xyz");
        assert_eq!(key.shifts(), &[0]);
        assert_eq!(running_key_encrypt(&G, "かな", &key), "かな");
    }

    #[test]
    fn one_time_pad_pads_and_returns_key() {
        let mut rng = StdRng::seed_from_u64(7);
        let pad = one_time_pad_encrypt_with_rng(&G, "ひみつのあんごう", "あ", &mut rng);
        assert_eq!(pad.key.chars().count(), 8);
        assert!(pad.key.starts_with('あ'));
        assert!(pad.key.chars().all(|c| G.is_member(c)));
        assert_eq!(one_time_pad_decrypt(&G, &pad.output, &pad.key), "ひみつのあんごう");
    }

    #[test]
    fn one_time_pad_keeps_long_key() {
        let mut rng = StdRng::seed_from_u64(1);
        let pad = one_time_pad_encrypt_with_rng(&G, "あい", "いいいい", &mut rng);
        assert_eq!(pad.output, "いう");
        assert_eq!(pad.key, "いいいい");
    }

    #[test]
    fn one_time_pad_short_key_decrypts_tail_unshifted() {
        assert_eq!(one_time_pad_decrypt(&G, "いいい", "い"), "あいい");
    }

    #[test]
    fn seion_shift_carries_marks() {
        let s = Alphabet::SEION;
        // か(5)+1 = き, voiced mark carried over.
        assert_eq!(shift(&s, "が", 1), "ぎ");
        assert_eq!(shift(&s, "ぎ", -1), "が");
        // Small kana are not in the base alphabet.
        assert_eq!(shift(&s, "っ", 1), "っ");
    }

    #[test]
    fn seion_shift_onto_unmarkable_base() {
        let s = Alphabet::SEION;
        let enc = shift(&s, "ぱ", 17);
        assert_eq!(enc, "ろ\u{309A}");
        assert_eq!(shift(&s, &enc, -17), "ぱ");
        assert_eq!(reflect(&s, &reflect(&s, "がっこう")), "がっこう");
    }
}
