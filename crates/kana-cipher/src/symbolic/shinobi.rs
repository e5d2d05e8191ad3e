// Shinobi iroha: kana in iroha-poem order paired with geometric symbols

use hashbrown::HashMap;
use kana_core::script;

/// Kana in extended iroha order: the 45 kana of the poem (without ゐ and
/// ゑ), then ん, the voiced, semi-voiced and small kana.
#[rustfmt::skip]
pub const IROHA_ORDER: [char; 80] = [
    'い', 'ろ', 'は', 'に', 'ほ', 'へ', 'と', 'ち', 'り', 'ぬ', //
    'る', 'を', 'わ', 'か', 'よ', 'た', 'れ', 'そ', 'つ', 'ね', //
    'な', 'ら', 'む', 'う', 'の', 'お', 'く', 'や', 'ま', 'け', //
    'ふ', 'こ', 'え', 'て', 'あ', 'さ', 'き', 'ゆ', 'め', 'み', //
    'し', 'ひ', 'も', 'せ', 'す', 'ん', 'が', 'ぎ', 'ぐ', 'げ', //
    'ご', 'ざ', 'じ', 'ず', 'ぜ', 'ぞ', 'だ', 'ぢ', 'づ', 'で', //
    'ど', 'ば', 'び', 'ぶ', 'べ', 'ぼ', 'ぱ', 'ぴ', 'ぷ', 'ぺ', //
    'ぽ', 'ぁ', 'ぃ', 'ぅ', 'ぇ', 'ぉ', 'っ', 'ゃ', 'ゅ', 'ょ', //
];

/// Symbol paired with each entry of [`IROHA_ORDER`].
#[rustfmt::skip]
pub const IROHA_SYMBOLS: [char; 80] = [
    '☆', '△', '□', '◇', '○', '◎', '★', '▽', '◆', '●', //
    '▲', '■', '♦', '♠', '♣', '♥', '⊕', '⊗', '⊙', '⊘', //
    '⊞', '⊟', '⊠', '⊡', '⊢', '⊣', '⊤', '⊥', '⊦', '⊧', //
    '⊨', '⊩', '⊪', '⊫', '⊬', '⊭', '⊮', '⊯', '⊰', '⊱', //
    '⊲', '⊳', '⊴', '⊵', '⊶', '⊷', '⊸', '⊹', '⊺', '⊻', //
    '⊼', '⊽', '⊾', '⊿', '⋀', '⋁', '⋂', '⋃', '⋄', '⋅', //
    '⋆', '⋇', '⋈', '⋉', '⋊', '⋋', '⋌', '⋍', '⋎', '⋏', //
    '⋐', '⋑', '⋒', '⋓', '⋔', '⋕', '⋖', '⋗', '⋘', '⋙', //
];

/// Both directions of the iroha substitution.
#[derive(Debug, Clone)]
pub struct ShinobiTable {
    encode: HashMap<char, char>,
    decode: HashMap<char, char>,
}

impl ShinobiTable {
    pub fn new() -> Self {
        let encode: HashMap<char, char> = IROHA_ORDER
            .iter()
            .copied()
            .zip(IROHA_SYMBOLS.iter().copied())
            .collect();
        let decode = encode.iter().map(|(&kana, &symbol)| (symbol, kana)).collect();
        Self { encode, decode }
    }

    pub fn encrypt(&self, text: &str) -> String {
        script::normalize(text)
            .chars()
            .map(|ch| self.encode.get(&ch).copied().unwrap_or(ch))
            .collect()
    }

    /// Map symbols back to kana.
    ///
    /// Older ciphertext wrote voiced kana as the base symbol followed by a
    /// combining mark; such a mark is composed onto the decoded kana. A mark
    /// with nothing to compose with is kept.
    pub fn decrypt(&self, text: &str) -> String {
        let kana: String = text
            .chars()
            .map(|ch| self.decode.get(&ch).copied().unwrap_or(ch))
            .collect();
        script::compose_marks(&kana)
    }
}

impl Default for ShinobiTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kana_core::Alphabet;

    #[test]
    fn tables_are_bijective() {
        let table = ShinobiTable::new();
        assert_eq!(table.encode.len(), 80);
        assert_eq!(table.decode.len(), 80);
    }

    #[test]
    fn order_covers_the_whole_alphabet() {
        for ch in Alphabet::GOJUON.symbols() {
            assert!(IROHA_ORDER.contains(ch), "{ch} missing");
        }
    }

    #[test]
    fn iroha_order_pairs() {
        let table = ShinobiTable::new();
        assert_eq!(table.encrypt("いろは"), "☆△□");
        assert_eq!(table.encrypt("ん"), "⊷");
        assert_eq!(table.encrypt("ょ"), "⋙");
    }

    #[test]
    fn round_trip_with_passthrough() {
        let table = ShinobiTable::new();
        let text = "しのびの、あんごう!";
        let enc = table.encrypt(text);
        assert!(enc.contains('、'));
        assert_eq!(table.decrypt(&enc), text);
    }

    #[test]
    fn katakana_is_folded() {
        let table = ShinobiTable::new();
        assert_eq!(table.encrypt("イロハ"), table.encrypt("いろは"));
    }

    #[test]
    fn decrypt_composes_marked_symbols() {
        let table = ShinobiTable::new();
        // か and は written as base symbol plus mark.
        assert_eq!(table.decrypt("♠\u{3099}□\u{309A}x"), "がぱx");
        // い takes no voiced mark.
        assert_eq!(table.decrypt("☆\u{3099}"), "い\u{3099}");
    }

    #[test]
    fn stray_marks_round_trip() {
        let table = ShinobiTable::new();
        for text in ["え\u{3099}", "が\u{3099}ん\u{309A}", "\u{3099}あ"] {
            assert_eq!(table.decrypt(&table.encrypt(text)), text);
        }
    }
}
