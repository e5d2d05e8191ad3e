// XOR over kana code points, written as four-digit hex tokens

use kana_core::script;

/// Key used when none is given.
pub const DEFAULT_KEY: &str = "ひみつ";

/// Code point used when the key holds no kana (あ).
const FALLBACK_CODE: u32 = 0x3042;

/// Cyclic sequence of key code points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XorKey {
    codes: Vec<u32>,
}

impl XorKey {
    /// Take the kana of `key` (after folding katakana). A key without kana
    /// becomes the single code point of あ.
    pub fn new(key: &str) -> Self {
        let mut codes: Vec<u32> = script::normalize(key)
            .chars()
            .filter(|&c| script::is_hiragana(c))
            .map(u32::from)
            .collect();
        if codes.is_empty() {
            tracing::debug!(key, "xor key has no kana, using fallback");
            codes.push(FALLBACK_CODE);
        }
        Self { codes }
    }

    pub fn codes(&self) -> &[u32] {
        &self.codes
    }

    fn at(&self, k: usize) -> u32 {
        self.codes[k % self.codes.len()]
    }
}

impl Default for XorKey {
    fn default() -> Self {
        Self::new(DEFAULT_KEY)
    }
}

/// Each kana becomes a four-digit uppercase hex token; other characters
/// are their own token. Tokens are joined by single spaces and whitespace
/// in the plaintext is dropped.
pub fn encrypt(text: &str, key: &XorKey) -> String {
    let mut tokens = Vec::new();
    let mut k = 0;
    for ch in script::normalize(text).chars() {
        if ch.is_whitespace() {
            continue;
        }
        if script::is_hiragana(ch) {
            tokens.push(format!("{:04X}", u32::from(ch) ^ key.at(k)));
            k += 1;
        } else {
            tokens.push(ch.to_string());
        }
    }
    tokens.join(" ")
}

fn hex_token(token: &str) -> Option<u32> {
    if token.len() == 4 && token.bytes().all(|b| b.is_ascii_hexdigit()) {
        u32::from_str_radix(token, 16).ok()
    } else {
        None
    }
}

/// Reverse [`encrypt`]. Every hex token consumes one key position; a token
/// whose result is not a valid character is kept as it is.
pub fn decrypt(text: &str, key: &XorKey) -> String {
    let mut out = String::with_capacity(text.len());
    let mut k = 0;
    for token in text.split_whitespace() {
        match hex_token(token) {
            Some(value) => {
                match char::from_u32(value ^ key.at(k)) {
                    Some(ch) => out.push(ch),
                    None => out.push_str(token),
                }
                k += 1;
            }
            None => out.push_str(token),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encrypts_to_hex_tokens() {
        // あ (3042) ^ あ (3042) = 0
        let key = XorKey::new("あ");
        assert_eq!(encrypt("あい", &key), "0000 0006");
    }

    #[test]
    fn non_kana_are_own_tokens() {
        let key = XorKey::new("あ");
        assert_eq!(encrypt("あ!b い", &key), "0000 ! b 0006");
        assert_eq!(decrypt("0000 ! b 0006", &key), "あ!bい");
    }

    #[test]
    fn key_cycles_over_kana_only() {
        let key = XorKey::new("あい");
        // あ^あ, あ^い, あ^あ
        assert_eq!(encrypt("あ、ああ", &key), "0000 、 0006 0000");
    }

    #[test]
    fn round_trip_default_key() {
        let key = XorKey::default();
        let text = "ひみつのメッセージ";
        let enc = encrypt(text, &key);
        assert_eq!(decrypt(&enc, &key), "ひみつのめっせーじ");
    }

    #[test]
    fn key_without_kana_uses_fallback() {
        assert_eq!(XorKey::new("abc").codes(), &[0x3042]);
        assert_eq!(XorKey::new("").codes(), &[0x3042]);
        assert_eq!(XorKey::new("カ").codes(), &[0x304B]);
    }

    #[test]
    fn decode_is_total() {
        let key = XorKey::new("あ");
        assert_eq!(decrypt("zz12 123 12345 GGGG", &key), "zz1212312345GGGG");
        // 0xE830 ^ 0x3042 is a surrogate: kept as it is.
        assert_eq!(decrypt("E830", &key), "E830");
        assert_eq!(decrypt("", &key), "");
    }
}
