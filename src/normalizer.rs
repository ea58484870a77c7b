//! Rule-based normalization of Thai text.
//!
//! Fixes typing-order mistakes (tone mark typed before the vowel, two เ for
//! แ, ...), collapses repeated marks and whitespace, and optionally separates
//! numbers from surrounding text. Rules are applied until nothing changes, so
//! `normalize` is idempotent.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Passes allowed on top of one per input char
const EXTRA_PASSES: usize = 16;

/// Marks that never legitimately repeat
const DEDUP_MARKS: &[char] = &[
    'ะ', 'ั', '็', 'า', 'ิ', 'ี', 'ึ', 'ื', 'ุ', 'ู', 'ใ', 'ไ', 'โ', '่', '้', '๊', '๋', '์', 'ํ',
    'ำ',
];

/// `(pattern, replacement)` pairs applied in order
const THAI_RULES: &[(&str, &str)] = &[
    // เ + เ -> แ
    ("\u{0E40}\u{0E40}", "\u{0E41}"),
    // nikhahit + sara aa -> sara am
    ("\u{0E4D}\u{0E32}", "\u{0E33}"),
    ("\u{0E4D}([\u{0E48}-\u{0E4B}])\u{0E32}", "${1}\u{0E33}"),
    // tone mark before an upper vowel
    ("([\u{0E48}-\u{0E4B}]+)([\u{0E31}\u{0E34}-\u{0E37}]+)", "${2}${1}"),
    // tone mark before a lower vowel
    ("([\u{0E48}-\u{0E4B}]+)([\u{0E38}\u{0E39}]+)", "${2}${1}"),
    // sara am before a tone mark
    ("\u{0E33}([\u{0E48}-\u{0E4B}]+)", "${1}\u{0E33}"),
    // thanthakhat before a vowel
    ("(\u{0E4C}+)([\u{0E31}\u{0E34}-\u{0E39}]+)", "${2}${1}"),
];

static COMPILED_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    THAI_RULES
        .iter()
        .map(|(pattern, replacement)| {
            (
                Regex::new(pattern).expect("Invalid normalization rule"),
                *replacement,
            )
        })
        .collect()
});

static NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new("[0-9๐-๙]+(?:[.,][0-9๐-๙]+)*").expect("Invalid number pattern"));

static REPEATED_WHITESPACE: Lazy<[(Regex, &'static str); 3]> = Lazy::new(|| {
    [
        (Regex::new(" {2,}").expect("Invalid space pattern"), " "),
        (Regex::new("\t{2,}").expect("Invalid tab pattern"), "\t"),
        (Regex::new("\n{2,}").expect("Invalid newline pattern"), "\n"),
    ]
});

/// Put a single space between each number and adjacent non-space text
fn space_numbers(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut last = 0;

    for m in NUMBER.find_iter(text) {
        out.push_str(&text[last..m.start()]);
        if out.chars().next_back().map_or(false, |c| !c.is_whitespace()) {
            out.push(' ');
        }
        out.push_str(m.as_str());
        if text[m.end()..]
            .chars()
            .next()
            .map_or(false, |c| !c.is_whitespace())
        {
            out.push(' ');
        }
        last = m.end();
    }
    out.push_str(&text[last..]);

    out
}

fn collapse_whitespace(text: &str) -> String {
    REPEATED_WHITESPACE
        .iter()
        .fold(text.to_string(), |acc, (re, rep)| {
            re.replace_all(&acc, *rep).into_owned()
        })
}

fn apply_thai_rules(text: &str) -> String {
    COMPILED_RULES
        .iter()
        .fold(text.to_string(), |acc, (re, rep)| {
            re.replace_all(&acc, *rep).into_owned()
        })
}

fn dedup_marks(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev = None;
    for c in text.chars() {
        if prev == Some(c) && DEDUP_MARKS.contains(&c) {
            continue;
        }
        out.push(c);
        prev = Some(c);
    }
    out
}

fn normalize_once(text: &str, whitespace_number: bool) -> String {
    let text: String = text.chars().filter(|c| *c != '\u{200B}').nfc().collect();
    let text = if whitespace_number {
        space_numbers(&text)
    } else {
        text
    };
    let text = collapse_whitespace(&text);
    let text = apply_thai_rules(&text);
    dedup_marks(&text)
}

/// Normalize Thai text.
///
/// With `whitespace_number`, numbers are separated from neighbouring text by
/// one space on each side.
pub fn normalize(text: &str, whitespace_number: bool) -> String {
    let limit = text.chars().count() + EXTRA_PASSES;
    let mut current = normalize_once(text, whitespace_number);
    for _ in 1..limit {
        let next = normalize_once(&current, whitespace_number);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

/// Reverse a string by Unicode scalar values.
///
/// Combining marks end up before their base character.
pub fn reverse_text(text: &str) -> String {
    text.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_sara_e() {
        assert_eq!(normalize("เเปลก", false), "แปลก");
    }

    #[test]
    fn test_sara_am() {
        assert_eq!(normalize("\u{0E19}\u{0E4D}\u{0E32}", false), "นำ");
        // น + nikhahit + mai tho + sara aa -> น้ำ
        assert_eq!(normalize("\u{0E19}\u{0E4D}\u{0E49}\u{0E32}", false), "น้ำ");
        // sara am typed before the tone mark
        assert_eq!(normalize("\u{0E19}\u{0E33}\u{0E49}", false), "น้ำ");
    }

    #[test]
    fn test_tone_vowel_order() {
        // tone typed before sara i
        assert_eq!(normalize("\u{0E1E}\u{0E48}\u{0E35}", false), "พี่");
        // tone typed before sara u
        assert_eq!(normalize("\u{0E1C}\u{0E49}\u{0E39}", false), "ผู้");
    }

    #[test]
    fn test_repeated_marks() {
        assert_eq!(normalize("นานาาาา", false), "นานา");
        assert_eq!(normalize("ก่่่า", false), "ก่า");
        // consonants are never collapsed
        assert_eq!(normalize("กก", false), "กก");
    }

    #[test]
    fn test_whitespace() {
        assert_eq!(normalize("ไป  กิน\t\tข้าว\n\n\n", false), "ไป กิน\tข้าว\n");
        assert_eq!(normalize("a\u{200B}b", false), "ab");
    }

    #[test]
    fn test_whitespace_number() {
        assert_eq!(normalize("ราคา2,500บาท", true), "ราคา 2,500 บาท");
        assert_eq!(normalize("ปี๒๕๖๗", true), "ปี ๒๕๖๗");
        assert_eq!(normalize("ปี 2567 แล้ว", true), "ปี 2567 แล้ว");
        assert_eq!(normalize("ราคา2,500บาท", false), "ราคา2,500บาท");
    }

    #[test]
    fn test_idempotent() {
        for text in [
            "เเม่่ไป  ตลาด9โมง",
            "\u{0E19}\u{0E33}\u{0E49}",
            "1.5.",
            "ก์ิ",
            "\u{0E19}\u{0E4D}\u{0E48}\u{0E48}\u{0E32}",
            "\u{0E01}\u{0E4C}\u{0E4C}\u{0E38}\u{0E48}",
        ] {
            let once = normalize(text, true);
            assert_eq!(normalize(&once, true), once);
        }
    }

    #[test]
    fn test_reverse() {
        assert_eq!(reverse_text("abc"), "cba");
        assert_eq!(reverse_text(""), "");
        let text = "สวัสดี";
        assert_eq!(reverse_text(&reverse_text(text)), text);
        assert_eq!(reverse_text("กา"), "าก");
    }
}
