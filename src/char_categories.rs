//! Character classification for Thai text.
//!
//! Every code point of the Thai block is looked up in an embedded table
//! (consonant, vowel position, tone mark, ...). Characters outside the block
//! only get the coarse classes the cluster segmenter needs to group runs.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Character categories used by the segmenter and the normalizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CharCategory {
    /// Thai consonant (ก..ฮ)
    Cons,
    /// Vowel written before the consonant it follows in speech (เ แ โ ใ ไ)
    LeadVow,
    /// Vowel written after the consonant (ะ า ำ ๅ)
    FollowVow,
    /// Vowel written above the consonant
    AboveVow,
    /// Vowel written below the consonant
    BelowVow,
    /// Tone mark (่ ้ ๊ ๋)
    Tone,
    /// Other combining sign (็ ์ ํ ๎ ฺ)
    Diacritic,
    /// Thai digit (๐..๙)
    ThaiDigit,
    /// Abbreviation and repetition signs (ฯ ๆ)
    ThaiSign,
    /// Thai currency symbol and punctuation (฿ ๏ ๚ ๛)
    ThaiPunct,
    /// ASCII digit
    Digit,
    /// Latin letter, including accented forms
    Latin,
    /// Whitespace and zero-width separators
    Space,
    /// Punctuation and symbols outside the Thai block
    Punct,
    /// Letters of any other script
    #[default]
    Foreign,
}

impl CharCategory {
    /// Parse a category string from the CSV file
    fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "CONS" => Some(CharCategory::Cons),
            "LEAD_VOW" => Some(CharCategory::LeadVow),
            "FOLLOW_VOW" => Some(CharCategory::FollowVow),
            "ABOVE_VOW" => Some(CharCategory::AboveVow),
            "BELOW_VOW" => Some(CharCategory::BelowVow),
            "TONE" => Some(CharCategory::Tone),
            "DIACRITIC" => Some(CharCategory::Diacritic),
            "DIGIT" => Some(CharCategory::ThaiDigit),
            "SIGN" => Some(CharCategory::ThaiSign),
            "PUNCT" => Some(CharCategory::ThaiPunct),
            _ => None,
        }
    }

    /// Whether this character is clustered by the Thai orthographic rules
    pub fn is_thai_letter(&self) -> bool {
        matches!(
            self,
            CharCategory::Cons
                | CharCategory::LeadVow
                | CharCategory::FollowVow
                | CharCategory::AboveVow
                | CharCategory::BelowVow
                | CharCategory::Tone
                | CharCategory::Diacritic
                | CharCategory::ThaiSign
        )
    }

    /// Whether this is a digit of either script
    pub fn is_digit(&self) -> bool {
        matches!(self, CharCategory::Digit | CharCategory::ThaiDigit)
    }

    /// Whether this character combines with the preceding base character
    pub fn is_combining(&self) -> bool {
        matches!(
            self,
            CharCategory::AboveVow
                | CharCategory::BelowVow
                | CharCategory::Tone
                | CharCategory::Diacritic
        )
    }
}

/// Embedded character table from th_uni_table.csv
static TH_UNI_TABLE: &str = include_str!("data/th_uni_table.csv");

/// Lazily initialized map from character to category
static CHAR_MAP: Lazy<HashMap<char, CharCategory>> = Lazy::new(|| {
    let mut map = HashMap::new();

    for line in TH_UNI_TABLE.lines().skip(1) {
        let parts: Vec<&str> = line.split(',').collect();
        if parts.len() < 3 {
            continue;
        }
        let Some(c) = u32::from_str_radix(parts[0].trim(), 16)
            .ok()
            .and_then(char::from_u32)
        else {
            continue;
        };
        if let Some(category) = CharCategory::from_str(parts[2]) {
            map.insert(c, category);
        }
    }

    map
});

/// Separators that `char::is_whitespace` does not cover
const INVISIBLE_SPACES: &[char] = &[
    '\u{200B}', // ZERO WIDTH SPACE
    '\u{2060}', // WORD JOINER
    '\u{FEFF}', // ZERO WIDTH NO-BREAK SPACE
];

/// Get the category of a character
pub fn get_char_category(c: char) -> CharCategory {
    if ('\u{0E00}'..='\u{0E7F}').contains(&c) {
        return CHAR_MAP.get(&c).copied().unwrap_or(CharCategory::Foreign);
    }

    if c.is_whitespace() || INVISIBLE_SPACES.contains(&c) {
        return CharCategory::Space;
    }

    if c.is_ascii_digit() {
        return CharCategory::Digit;
    }

    if c.is_ascii_alphabetic() {
        return CharCategory::Latin;
    }

    // Latin-1 letters, Latin Extended-A/B, combining diacritics, Latin Extended Additional
    if (('\u{00C0}'..='\u{024F}').contains(&c) && c.is_alphabetic())
        || ('\u{0300}'..='\u{036F}').contains(&c)
        || ('\u{1E00}'..='\u{1EFF}').contains(&c)
    {
        return CharCategory::Latin;
    }

    if c.is_alphanumeric() {
        CharCategory::Foreign
    } else {
        CharCategory::Punct
    }
}
