// Transposition family: permute the member subsequence, leave everything else
//
// The permutations themselves are generic over the item type so they can be
// checked on plain position lists; the text-level wrappers extract members
// through the adapter and splice the permuted sequence back.

pub mod columnar;
pub mod rail_fence;

use kana_core::Alphabet;

use crate::adapter;

pub use columnar::ColumnarKey;

pub fn rail_fence_encrypt(alphabet: &Alphabet, text: &str, rails: usize) -> String {
    adapter::permute_members(alphabet, text, |members| {
        rail_fence::encrypt(members, rails)
    })
}

pub fn rail_fence_decrypt(alphabet: &Alphabet, text: &str, rails: usize) -> String {
    adapter::permute_members(alphabet, text, |members| {
        rail_fence::decrypt(members, rails)
    })
}

pub fn columnar_encrypt(alphabet: &Alphabet, text: &str, key: &ColumnarKey) -> String {
    adapter::permute_members(alphabet, text, |members| {
        columnar::encrypt(members, key.order())
    })
}

pub fn columnar_decrypt(alphabet: &Alphabet, text: &str, key: &ColumnarKey) -> String {
    adapter::permute_members(alphabet, text, |members| {
        columnar::decrypt(members, key.order())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const G: Alphabet = Alphabet::GOJUON;

    #[test]
    fn rail_fence_text_round_trip() {
        let text = "いろはにほへと、ちりぬるを。";
        let enc = rail_fence_encrypt(&G, text, 3);
        assert_ne!(enc, text);
        assert_eq!(rail_fence_decrypt(&G, &enc, 3), text);
    }

    #[test]
    fn rail_fence_keeps_punctuation_positions() {
        let enc = rail_fence_encrypt(&G, "あい、うえお", 2);
        // Members あいうえお -> rails [あうお][いえ] -> あうおいえ
        assert_eq!(enc, "あう、おいえ");
    }

    #[test]
    fn columnar_text_round_trip() {
        let key = ColumnarKey::new(&G, "ひみつ");
        let text = "あいうえおかきくけこさ";
        let enc = columnar_encrypt(&G, text, &key);
        assert_ne!(enc, text);
        assert_eq!(columnar_decrypt(&G, &enc, &key), text);
    }

    #[test]
    fn marked_symbols_travel_whole_in_seion() {
        let s = Alphabet::SEION;
        let enc = rail_fence_encrypt(&s, "がぎぐげご", 2);
        assert_eq!(enc, "がぐごぎげ");
        assert_eq!(rail_fence_decrypt(&s, &enc, 2), "がぎぐげご");
    }
}
