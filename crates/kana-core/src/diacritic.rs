// Diacritic adapter: split voiced/semi-voiced kana into (base, mark) and back

/// Diacritic mark carried by a kana symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mark {
    /// Plain symbol.
    #[default]
    None,
    /// Dakuten (゛), e.g. か -> が.
    Voiced,
    /// Handakuten (゜), e.g. は -> ぱ.
    SemiVoiced,
}

impl Mark {
    /// Combining form (U+3099 / U+309A) as found in decomposed text.
    pub const fn combining(self) -> Option<char> {
        match self {
            Mark::None => None,
            Mark::Voiced => Some('\u{3099}'),
            Mark::SemiVoiced => Some('\u{309A}'),
        }
    }

    /// Spacing form (U+309B / U+309C) used when a mark is written on its own.
    pub const fn spacing(self) -> Option<char> {
        match self {
            Mark::None => None,
            Mark::Voiced => Some('\u{309B}'),
            Mark::SemiVoiced => Some('\u{309C}'),
        }
    }

    pub const fn from_combining(ch: char) -> Option<Mark> {
        match ch {
            '\u{3099}' => Some(Mark::Voiced),
            '\u{309A}' => Some(Mark::SemiVoiced),
            _ => None,
        }
    }

    pub const fn from_spacing(ch: char) -> Option<Mark> {
        match ch {
            '\u{309B}' => Some(Mark::Voiced),
            '\u{309C}' => Some(Mark::SemiVoiced),
            _ => None,
        }
    }
}

/// Registered variants: (marked symbol, base symbol, mark).
const VARIANTS: [(char, char, Mark); 25] = [
    ('が', 'か', Mark::Voiced),
    ('ぎ', 'き', Mark::Voiced),
    ('ぐ', 'く', Mark::Voiced),
    ('げ', 'け', Mark::Voiced),
    ('ご', 'こ', Mark::Voiced),
    ('ざ', 'さ', Mark::Voiced),
    ('じ', 'し', Mark::Voiced),
    ('ず', 'す', Mark::Voiced),
    ('ぜ', 'せ', Mark::Voiced),
    ('ぞ', 'そ', Mark::Voiced),
    ('だ', 'た', Mark::Voiced),
    ('ぢ', 'ち', Mark::Voiced),
    ('づ', 'つ', Mark::Voiced),
    ('で', 'て', Mark::Voiced),
    ('ど', 'と', Mark::Voiced),
    ('ば', 'は', Mark::Voiced),
    ('び', 'ひ', Mark::Voiced),
    ('ぶ', 'ふ', Mark::Voiced),
    ('べ', 'へ', Mark::Voiced),
    ('ぼ', 'ほ', Mark::Voiced),
    ('ぱ', 'は', Mark::SemiVoiced),
    ('ぴ', 'ひ', Mark::SemiVoiced),
    ('ぷ', 'ふ', Mark::SemiVoiced),
    ('ぺ', 'へ', Mark::SemiVoiced),
    ('ぽ', 'ほ', Mark::SemiVoiced),
];

/// Split a symbol into its base form and mark.
///
/// Symbols without a registered variant come back unchanged with
/// [`Mark::None`].
pub fn decompose(ch: char) -> (char, Mark) {
    VARIANTS
        .iter()
        .find(|&&(marked, _, _)| marked == ch)
        .map_or((ch, Mark::None), |&(_, base, mark)| (base, mark))
}

/// Attach `mark` to `base`.
///
/// Returns `base` itself when the pair is not registered (for example a
/// voiced mark on あ); this never fails.
pub fn recompose(base: char, mark: Mark) -> char {
    if mark == Mark::None {
        return base;
    }
    VARIANTS
        .iter()
        .find(|&&(_, b, m)| b == base && m == mark)
        .map_or(base, |&(marked, _, _)| marked)
}

/// Whether `ch` is a registered marked variant.
pub fn is_marked(ch: char) -> bool {
    decompose(ch).1 != Mark::None
}

/// Whether `base` accepts `mark` (always true for [`Mark::None`]).
pub fn has_variant(base: char, mark: Mark) -> bool {
    mark == Mark::None || recompose(base, mark) != base
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::Alphabet;

    #[test]
    fn decompose_marked() {
        assert_eq!(decompose('が'), ('か', Mark::Voiced));
        assert_eq!(decompose('ぽ'), ('ほ', Mark::SemiVoiced));
        assert_eq!(decompose('ぼ'), ('ほ', Mark::Voiced));
    }

    #[test]
    fn decompose_plain_is_identity() {
        assert_eq!(decompose('か'), ('か', Mark::None));
        assert_eq!(decompose('ゃ'), ('ゃ', Mark::None));
        assert_eq!(decompose('A'), ('A', Mark::None));
    }

    #[test]
    fn recompose_undoes_decompose_for_every_gojuon_symbol() {
        for &ch in Alphabet::GOJUON.symbols() {
            let (base, mark) = decompose(ch);
            assert_eq!(recompose(base, mark), ch, "symbol {ch}");
        }
    }

    #[test]
    fn recompose_unregistered_falls_back_to_base() {
        assert_eq!(recompose('あ', Mark::Voiced), 'あ');
        assert_eq!(recompose('か', Mark::SemiVoiced), 'か');
        assert_eq!(recompose('x', Mark::Voiced), 'x');
    }

    #[test]
    fn marked_classification() {
        assert!(is_marked('ざ'));
        assert!(!is_marked('さ'));
        assert!(has_variant('さ', Mark::Voiced));
        assert!(!has_variant('さ', Mark::SemiVoiced));
        assert!(has_variant('ん', Mark::None));
    }

    #[test]
    fn mark_forms() {
        assert_eq!(Mark::Voiced.combining(), Some('\u{3099}'));
        assert_eq!(Mark::SemiVoiced.spacing(), Some('゜'));
        assert_eq!(Mark::None.spacing(), None);
        assert_eq!(Mark::from_spacing('゛'), Some(Mark::Voiced));
        assert_eq!(Mark::from_combining('\u{309A}'), Some(Mark::SemiVoiced));
        assert_eq!(Mark::from_combining('゛'), None);
    }
}
