//! Decrypt-after-encrypt over every engine.
//!
//! For whitespace-free input every engine restores the normalized text
//! (katakana folded to hiragana). Whitespace is covered by the unit tests of
//! the engines that drop it.
//!
//! Run: cargo test -p kana-cipher --test round_trip

use kana_cipher::{CipherOutput, Codebook, EngineId, KeySet, OutputKind};
use kana_core::script::normalize;
use proptest::prelude::*;

const TEXT_ENGINES: [&str; 11] = [
    "caesar", "atbash", "vigenere", "polybius", "railfence", "columnar", "shinobi", "enigma",
    "otp", "tapcode", "xor",
];

/// Encrypt then decrypt, feeding back generated key material.
fn round_trip(book: &Codebook, engine: &str, text: &str, keys: &KeySet) -> String {
    let enc = book
        .encrypt(engine, text, keys)
        .unwrap_or_else(|e| panic!("{engine} encrypt failed: {e}"));
    let mut keys = keys.clone();
    if let Some(used) = &enc.used_key {
        keys.insert("key", used.as_str());
    }
    let dec = match &enc.output {
        CipherOutput::Text(cipher) => book.decrypt(engine, cipher.as_str(), &keys),
        CipherOutput::Glyphs(glyphs) => book.decrypt(engine, glyphs, &keys),
    }
    .unwrap_or_else(|e| panic!("{engine} decrypt failed: {e}"));
    dec.output
        .as_text()
        .unwrap_or_else(|| panic!("{engine} decrypt returned glyphs"))
        .to_string()
}

#[test]
fn text_engine_list_matches_catalogue() {
    let from_catalogue: Vec<&str> = EngineId::ALL
        .iter()
        .filter(|e| e.info().output == OutputKind::Text)
        .map(|e| e.id())
        .collect();
    assert_eq!(from_catalogue.len(), TEXT_ENGINES.len());
    for id in from_catalogue {
        assert!(TEXT_ENGINES.contains(&id), "{id} missing");
    }
}

// ---------------------------------------------------------------------------
// Edge cases
// ---------------------------------------------------------------------------

fn edge_cases() -> Vec<(&'static str, String)> {
    vec![
        ("empty", String::new()),
        ("single member", "あ".to_string()),
        ("single small kana", "ょ".to_string()),
        ("no members", "Rust2026!?".to_string()),
        ("mixed", "ガッコウ、がっこう。abc123ー".to_string()),
        ("decomposed", "か\u{3099}は\u{309A}ハ\u{3099}".to_string()),
        ("stray mark", "あ\u{3099}".to_string()),
        ("stray marks after members", "え\u{3099}が\u{3099}ん\u{309A}゛゜".to_string()),
        ("long", "いろはにほへとちりぬるをわかよたれそつねならむ".repeat(5)),
    ]
}

#[test]
fn every_engine_restores_edge_cases() {
    let book = Codebook::new();
    let keys = KeySet::new();
    for engine in TEXT_ENGINES.iter().chain(["pigpen"].iter()) {
        for (name, text) in edge_cases() {
            assert_eq!(
                round_trip(&book, engine, &text, &keys),
                normalize(&text),
                "{engine}: {name}"
            );
        }
    }
}

#[test]
fn every_selectable_engine_restores_under_seion() {
    let book = Codebook::new();
    let keys = KeySet::new().with("alphabet", "seion");
    let texts = [
        "ぱぴぷぺぽばびぶべぼ",
        "ガッコウのニンジャ",
        "ぎんざ、しぶや。",
        "か\u{3099}あ\u{3099}が\u{3099}は\u{309A}\u{309A}",
    ];
    for id in EngineId::ALL {
        if !id.info().selects_alphabet() {
            continue;
        }
        for text in texts {
            assert_eq!(
                round_trip(&book, id.id(), text, &keys),
                normalize(text),
                "{id}: {text}"
            );
        }
    }
}

#[test]
fn long_message_uses_whole_pad() {
    let book = Codebook::new();
    let text = "あ".repeat(120);
    let enc = book.encrypt("otp", text.as_str(), &KeySet::new()).unwrap();
    let key = enc.used_key.as_deref().unwrap();
    assert_eq!(key.chars().count(), 120);
    assert_eq!(round_trip(&book, "otp", &text, &KeySet::new()), text);
}

#[test]
fn out_of_range_keys_still_round_trip() {
    let book = Codebook::new();
    let text = "かなのあんごう、たのしい";
    let cases = [
        ("caesar", KeySet::new().with("shift", "500")),
        ("caesar", KeySet::new().with("shift", "-4")),
        ("caesar", KeySet::new().with("shift", "three")),
        ("railfence", KeySet::new().with("rails", "1")),
        ("railfence", KeySet::new().with("rails", "99")),
        ("vigenere", KeySet::new().with("keyword", "abc")),
        ("columnar", KeySet::new().with("keyword", "")),
        ("enigma", KeySet::new().with("rotor1", "IX").with("startPos", "xyz")),
        ("xor", KeySet::new().with("key", "123")),
    ];
    for (engine, keys) in cases {
        assert_eq!(round_trip(&book, engine, text, &keys), text, "{engine} {keys:?}");
    }
}

#[test]
fn stray_marks_stay_apart_from_shifted_members() {
    let book = Codebook::new();
    let cases = [
        ("caesar", KeySet::new(), "え\u{3099}"),
        ("columnar", KeySet::new().with("keyword", "いあ"), "かが\u{3099}"),
        ("railfence", KeySet::new(), "あいうえお\u{309A}かきくけの\u{3099}"),
        ("otp", KeySet::new().with("key", "かきく"), "ん\u{3099}ね\u{3099}"),
    ];
    for (engine, keys, text) in cases {
        assert_eq!(round_trip(&book, engine, text, &keys), text, "{engine}");
    }
}

#[test]
fn rotor_stays_an_involution_with_stray_marks() {
    let book = Codebook::new();
    let keys = KeySet::new();
    for &base in kana_core::Alphabet::SEION.symbols() {
        for mark in ['\u{3099}', '\u{309A}'] {
            let text = format!("{base}{mark}");
            let once = book.encrypt("enigma", text.as_str(), &keys).unwrap();
            let once = once.output.as_text().unwrap();
            let twice = book.encrypt("enigma", once, &keys).unwrap();
            assert_eq!(twice.output.as_text(), Some(normalize(&text).as_str()), "{text:?} -> {once:?}");
        }
    }
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

/// Kana, punctuation, ASCII, the long vowel mark and both forms of the
/// voiced and semi-voiced marks; no whitespace and none of the characters
/// the token formats reserve.
fn text_strategy() -> impl Strategy<Value = String> {
    "[ぁ-ゖァ-ヶ、。!?a-zA-Z0-9ー\u{3099}\u{309A}゛゜]{0,150}"
}

fn kana_keyword() -> impl Strategy<Value = String> {
    "[ぁ-ん]{0,8}"
}

fn alphabet_name() -> impl Strategy<Value = &'static str> {
    prop::sample::select(kana_core::Alphabet::NAMES.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn fixed_key_engines(text in text_strategy(), alphabet in alphabet_name()) {
        let book = Codebook::new();
        let keys = KeySet::new().with("alphabet", alphabet);
        for engine in ["caesar", "atbash", "polybius", "tapcode", "shinobi", "xor", "otp", "pigpen"] {
            prop_assert_eq!(round_trip(&book, engine, &text, &keys), normalize(&text), "{}", engine);
        }
    }

    #[test]
    fn caesar_any_shift(text in text_strategy(), shift in 1i64..80, alphabet in alphabet_name()) {
        let book = Codebook::new();
        let keys = KeySet::new().with("shift", shift.to_string()).with("alphabet", alphabet);
        prop_assert_eq!(round_trip(&book, "caesar", &text, &keys), normalize(&text));
    }

    #[test]
    fn vigenere_any_keyword(text in text_strategy(), keyword in kana_keyword(), alphabet in alphabet_name()) {
        let book = Codebook::new();
        let keys = KeySet::new().with("keyword", keyword).with("alphabet", alphabet);
        prop_assert_eq!(round_trip(&book, "vigenere", &text, &keys), normalize(&text));
    }

    #[test]
    fn rail_fence_any_rails(text in text_strategy(), rails in 2usize..=10, alphabet in alphabet_name()) {
        let book = Codebook::new();
        let keys = KeySet::new().with("rails", rails.to_string()).with("alphabet", alphabet);
        prop_assert_eq!(round_trip(&book, "railfence", &text, &keys), normalize(&text));
    }

    #[test]
    fn columnar_any_keyword(text in text_strategy(), keyword in kana_keyword(), alphabet in alphabet_name()) {
        let book = Codebook::new();
        let keys = KeySet::new().with("keyword", keyword).with("alphabet", alphabet);
        prop_assert_eq!(round_trip(&book, "columnar", &text, &keys), normalize(&text));
    }

    #[test]
    fn enigma_any_setting(
        text in text_strategy(),
        rotors in prop::array::uniform3(prop::sample::select(vec!["I", "II", "III", "IV", "V"])),
        start in "[ぁ-ん]{0,3}",
    ) {
        let book = Codebook::new();
        let keys = KeySet::new()
            .with("rotor1", rotors[0])
            .with("rotor2", rotors[1])
            .with("rotor3", rotors[2])
            .with("startPos", start);
        prop_assert_eq!(round_trip(&book, "enigma", &text, &keys), normalize(&text));
    }

    #[test]
    fn xor_any_key(text in text_strategy(), key in "[ぁ-んa-z]{0,6}") {
        let book = Codebook::new();
        let keys = KeySet::new().with("key", key);
        prop_assert_eq!(round_trip(&book, "xor", &text, &keys), normalize(&text));
    }

    #[test]
    fn substitution_preserves_member_count(text in text_strategy(), alphabet in alphabet_name()) {
        let book = Codebook::new();
        let keys = KeySet::new().with("alphabet", alphabet);
        let alphabet = kana_core::Alphabet::by_name(alphabet).unwrap_or_default();
        for engine in ["caesar", "atbash", "vigenere", "railfence", "columnar"] {
            let enc = book.encrypt(engine, text.as_str(), &keys).unwrap();
            let cipher = enc.output.as_text().unwrap();
            prop_assert_eq!(
                kana_cipher::adapter::count_members(&alphabet, cipher),
                kana_cipher::adapter::count_members(&alphabet, &text),
                "{}", engine
            );
        }
    }
}
