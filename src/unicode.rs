//! Character-level normalization for kana targets.
//!
//! All three filters map one char to one char, so character indices in a
//! normalized string line up with the caller's original; `predict` relies on
//! this to slice its confirmed-kana prefix out of the input it was given.

/// Convert katakana to hiragana by shifting the ァ..ヶ range down by 0x60.
///
/// Only that range moves, so the prolonged sound mark ー keeps its own
/// mapping-table entry; ASCII and everything else pass through unchanged.
pub fn katakana_to_hiragana(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            'ァ'..='ヶ' => char::from_u32(c as u32 - 0x60).unwrap_or(c),
            _ => c,
        })
        .collect()
}

/// Convert full-width digits and Latin letters (０-９Ａ-Ｚａ-ｚ) to ASCII.
pub fn normalize_halfwidth(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '０'..='９' | 'Ａ'..='Ｚ' | 'ａ'..='ｚ' => {
                char::from_u32(c as u32 - 0xFEE0).unwrap_or(c)
            }
            _ => c,
        })
        .collect()
}

/// The full target filter: katakana→hiragana, full-width→ASCII, lowercase.
///
/// Callers normally pre-normalize; the DAG builder applies this again as a
/// safety net so both sides agree on character indices.
pub fn normalize_kana(s: &str) -> String {
    normalize_halfwidth(&katakana_to_hiragana(s)).to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_katakana_to_hiragana() {
        assert_eq!(katakana_to_hiragana("カタカナ"), "かたかな");
        assert_eq!(katakana_to_hiragana("ラーメン"), "らーめん");
        assert_eq!(katakana_to_hiragana("ヵヶ"), "ゕゖ");
        assert_eq!(katakana_to_hiragana("abcあ"), "abcあ");
        assert_eq!(katakana_to_hiragana(""), "");
    }

    #[test]
    fn test_normalize_halfwidth() {
        assert_eq!(normalize_halfwidth("１２３"), "123");
        assert_eq!(normalize_halfwidth("ＡｂＣ"), "AbC");
        assert_eq!(normalize_halfwidth("かな123"), "かな123");
    }

    #[test]
    fn test_normalize_kana() {
        assert_eq!(normalize_kana("カナ"), "かな");
        assert_eq!(normalize_kana("Ｋａ"), "ka");
        assert_eq!(normalize_kana("ABCあ"), "abcあ");
    }

    #[test]
    fn test_char_count_preserved() {
        for s in ["カタカナ", "１Ａｚ", "Mixedかなカナ１"] {
            assert_eq!(normalize_kana(s).chars().count(), s.chars().count());
        }
    }
}
