// Engine catalogue: identifiers, display metadata and key schemas

use std::fmt;

use crate::keys::{ParamKind, ParamSpec};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Every engine the codebook can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineId {
    Caesar,
    Atbash,
    Vigenere,
    Polybius,
    Pigpen,
    RailFence,
    Columnar,
    Shinobi,
    Enigma,
    OneTimePad,
    TapCode,
    Xor,
}

impl EngineId {
    /// Catalogue order.
    pub const ALL: [EngineId; 12] = [
        Self::Caesar,
        Self::Atbash,
        Self::Vigenere,
        Self::Polybius,
        Self::Pigpen,
        Self::RailFence,
        Self::Columnar,
        Self::Shinobi,
        Self::Enigma,
        Self::OneTimePad,
        Self::TapCode,
        Self::Xor,
    ];

    /// Stable identifier used by front ends.
    pub const fn id(self) -> &'static str {
        match self {
            Self::Caesar => "caesar",
            Self::Atbash => "atbash",
            Self::Vigenere => "vigenere",
            Self::Polybius => "polybius",
            Self::Pigpen => "pigpen",
            Self::RailFence => "railfence",
            Self::Columnar => "columnar",
            Self::Shinobi => "shinobi",
            Self::Enigma => "enigma",
            Self::OneTimePad => "otp",
            Self::TapCode => "tapcode",
            Self::Xor => "xor",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|engine| engine.id() == id)
    }

    pub fn info(self) -> &'static EngineInfo {
        &CATALOGUE[self as usize]
    }
}

impl fmt::Display for EngineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Grouping shown in engine listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Substitution,
    Transposition,
    Japanese,
    Mechanical,
    Modern,
}

impl Category {
    pub const fn id(self) -> &'static str {
        match self {
            Self::Substitution => "substitution",
            Self::Transposition => "transposition",
            Self::Japanese => "japanese",
            Self::Mechanical => "mechanical",
            Self::Modern => "modern",
        }
    }
}

/// Form of an engine's ciphertext.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputKind {
    Text,
    /// A sequence of pigpen glyphs.
    Glyphs,
}

/// Display metadata and capabilities of one engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineInfo {
    pub id: EngineId,
    pub name: &'static str,
    pub name_en: &'static str,
    pub category: Category,
    pub era: &'static str,
    /// 1 (easy) to 3 (hard).
    pub difficulty: u8,
    pub description: &'static str,
    pub params: &'static [ParamSpec],
    pub output: OutputKind,
    /// Whether encryption may produce key material the caller must keep.
    pub generates_key: bool,
}

impl EngineInfo {
    pub fn param(&self, id: &str) -> Option<&'static ParamSpec> {
        self.params.iter().find(|p| p.id == id)
    }

    /// Whether the engine accepts the `alphabet` parameter.
    pub fn selects_alphabet(&self) -> bool {
        self.param(ALPHABET.id).is_some()
    }
}

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

pub const ALPHABET: ParamSpec = ParamSpec {
    id: "alphabet",
    label: "文字表",
    kind: ParamKind::Choice {
        options: &kana_core::Alphabet::NAMES,
        default: "gojuon",
    },
};

pub const SHIFT: ParamSpec = ParamSpec {
    id: "shift",
    label: "シフト数",
    kind: ParamKind::Number {
        min: 1,
        max: 79,
        default: 3,
    },
};

pub const VIGENERE_KEYWORD: ParamSpec = ParamSpec {
    id: "keyword",
    label: "キーワード",
    kind: ParamKind::Text { default: "さくら" },
};

pub const RAILS: ParamSpec = ParamSpec {
    id: "rails",
    label: "レール数",
    kind: ParamKind::Number {
        min: 2,
        max: 10,
        default: 3,
    },
};

pub const COLUMNAR_KEYWORD: ParamSpec = ParamSpec {
    id: "keyword",
    label: "キーワード",
    kind: ParamKind::Text {
        default: crate::transposition::columnar::DEFAULT_KEYWORD,
    },
};

const ROTOR_OPTIONS: &[&str] = &crate::rotor::RotorId::NAMES;

pub const ROTORS: [ParamSpec; 3] = [
    ParamSpec {
        id: "rotor1",
        label: "ローター1",
        kind: ParamKind::Choice {
            options: ROTOR_OPTIONS,
            default: "I",
        },
    },
    ParamSpec {
        id: "rotor2",
        label: "ローター2",
        kind: ParamKind::Choice {
            options: ROTOR_OPTIONS,
            default: "II",
        },
    },
    ParamSpec {
        id: "rotor3",
        label: "ローター3",
        kind: ParamKind::Choice {
            options: ROTOR_OPTIONS,
            default: "III",
        },
    },
];

pub const START_POSITION: ParamSpec = ParamSpec {
    id: "startPos",
    label: "開始位置 (3文字)",
    kind: ParamKind::Text {
        default: crate::rotor::DEFAULT_START,
    },
};

pub const PAD_KEY: ParamSpec = ParamSpec {
    id: "key",
    label: "鍵 (空欄で自動生成)",
    kind: ParamKind::Text { default: "" },
};

pub const XOR_KEY: ParamSpec = ParamSpec {
    id: "key",
    label: "キーワード",
    kind: ParamKind::Text {
        default: crate::xor::DEFAULT_KEY,
    },
};

// ---------------------------------------------------------------------------
// Catalogue
// ---------------------------------------------------------------------------

const ENTRIES: [EngineInfo; 12] = [
    EngineInfo {
        id: EngineId::Caesar,
        name: "シーザー暗号",
        name_en: "Caesar Cipher",
        category: Category::Substitution,
        era: "紀元前1世紀",
        difficulty: 1,
        description: "五十音表を一定数シフトして文字を入れ替える最古の暗号",
        params: &[SHIFT, ALPHABET],
        output: OutputKind::Text,
        generates_key: false,
    },
    EngineInfo {
        id: EngineId::Atbash,
        name: "アトバシュ暗号",
        name_en: "Atbash Cipher",
        category: Category::Substitution,
        era: "紀元前500年頃",
        difficulty: 1,
        description: "五十音の順序を反転させて置換する対称暗号",
        params: &[ALPHABET],
        output: OutputKind::Text,
        generates_key: false,
    },
    EngineInfo {
        id: EngineId::Vigenere,
        name: "ヴィジュネル暗号",
        name_en: "Vigenère Cipher",
        category: Category::Substitution,
        era: "16世紀",
        difficulty: 2,
        description: "キーワードの各文字でシフト量を変える多表式暗号",
        params: &[VIGENERE_KEYWORD, ALPHABET],
        output: OutputKind::Text,
        generates_key: false,
    },
    EngineInfo {
        id: EngineId::Polybius,
        name: "ポリュビオス暗号",
        name_en: "Polybius Cipher",
        category: Category::Substitution,
        era: "紀元前2世紀",
        difficulty: 1,
        description: "五十音表の行列座標で文字を数字に変換する暗号",
        params: &[ALPHABET],
        output: OutputKind::Text,
        generates_key: false,
    },
    EngineInfo {
        id: EngineId::Pigpen,
        name: "豚小屋暗号",
        name_en: "Pigpen Cipher",
        category: Category::Substitution,
        era: "18世紀",
        difficulty: 1,
        description: "格子模様の記号で文字を表す秘密結社の暗号",
        params: &[],
        output: OutputKind::Glyphs,
        generates_key: false,
    },
    EngineInfo {
        id: EngineId::RailFence,
        name: "レールフェンス暗号",
        name_en: "Rail Fence Cipher",
        category: Category::Transposition,
        era: "古代ギリシャ",
        difficulty: 1,
        description: "ジグザグに書いた文字を段ごとに読み出す転置暗号",
        params: &[RAILS, ALPHABET],
        output: OutputKind::Text,
        generates_key: false,
    },
    EngineInfo {
        id: EngineId::Columnar,
        name: "列転置暗号",
        name_en: "Columnar Transposition",
        category: Category::Transposition,
        era: "第一次世界大戦",
        difficulty: 2,
        description: "キーワードの五十音順で列の読み出し順を変える",
        params: &[COLUMNAR_KEYWORD, ALPHABET],
        output: OutputKind::Text,
        generates_key: false,
    },
    EngineInfo {
        id: EngineId::Shinobi,
        name: "忍びいろは",
        name_en: "Shinobi Iroha",
        category: Category::Japanese,
        era: "戦国時代",
        difficulty: 1,
        description: "いろは歌の順番で記号に置き換える忍者の暗号",
        params: &[],
        output: OutputKind::Text,
        generates_key: false,
    },
    EngineInfo {
        id: EngineId::Enigma,
        name: "エニグマ暗号機",
        name_en: "Enigma Machine",
        category: Category::Mechanical,
        era: "第二次世界大戦",
        difficulty: 3,
        description: "複数の回転ローターとリフレクターで暗号化する機械式暗号",
        params: &[ROTORS[0], ROTORS[1], ROTORS[2], START_POSITION],
        output: OutputKind::Text,
        generates_key: false,
    },
    EngineInfo {
        id: EngineId::OneTimePad,
        name: "ワンタイムパッド",
        name_en: "One-Time Pad",
        category: Category::Modern,
        era: "1882年",
        difficulty: 2,
        description: "平文と同じ長さのランダム鍵で理論上解読不可能な暗号",
        params: &[PAD_KEY],
        output: OutputKind::Text,
        generates_key: true,
    },
    EngineInfo {
        id: EngineId::TapCode,
        name: "タップコード",
        name_en: "Tap Code",
        category: Category::Modern,
        era: "第一次世界大戦",
        difficulty: 1,
        description: "五十音グリッドの座標をタップ数で伝える暗号",
        params: &[ALPHABET],
        output: OutputKind::Text,
        generates_key: false,
    },
    EngineInfo {
        id: EngineId::Xor,
        name: "XOR暗号",
        name_en: "XOR Cipher",
        category: Category::Modern,
        era: "20世紀",
        difficulty: 2,
        description: "文字コードの排他的論理和で暗号化し、16進数で出力する",
        params: &[XOR_KEY],
        output: OutputKind::Text,
        generates_key: false,
    },
];

static CATALOGUE: [EngineInfo; 12] = ENTRIES;

const _: () = {
    let mut i = 0;
    while i < ENTRIES.len() {
        assert!(ENTRIES[i].id as usize == i, "catalogue out of order");
        i += 1;
    }
};
