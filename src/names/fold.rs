//! # Name Folding
//!
//! Normalizes free text (airport names, municipalities, user input) into the
//! keys of the name index. Folding is a pure function over code points and is
//! applied in a fixed order:
//!
//! 1. **Case fold** each letter: follow its lower-case mapping to a fixed
//!    point; if the result is outside Latin-1 but another case form of it is
//!    inside (`ſ` -> `S` -> `s`), take the Latin-1 form; otherwise use the
//!    default lower-case mapping
//! 2. **Diacritic fold** through a static table covering Latin-1 Supplement
//!    and Latin Extended-A (`é` -> `e`, `ő` -> `o`, `ß` -> `ss`)
//!
//! Non-letters pass through unchanged. Tokenizing and noise-word removal
//! happen afterwards, in the name index.
//!
//! ## Example
//!
//! ```text
//! "Zürich"          -> "zurich"
//! "MÁLAGA"          -> "malaga"
//! "Łódź"            -> "lodz"
//! "São Paulo/Guarulhos" -> "sao paulo/guarulhos"
//! ```

use phf::{phf_map, phf_set};

const LATIN1_MAX: u32 = 0xFF;

static DIACRITICS: phf::Map<char, &'static str> = phf_map! {
    // Latin-1 Supplement
    'à' => "a", 'á' => "a", 'â' => "a", 'ã' => "a", 'ä' => "a", 'å' => "a",
    'æ' => "ae", 'ç' => "c",
    'è' => "e", 'é' => "e", 'ê' => "e", 'ë' => "e",
    'ì' => "i", 'í' => "i", 'î' => "i", 'ï' => "i",
    'ð' => "d", 'ñ' => "n",
    'ò' => "o", 'ó' => "o", 'ô' => "o", 'õ' => "o", 'ö' => "o", 'ø' => "o",
    'ù' => "u", 'ú' => "u", 'û' => "u", 'ü' => "u",
    'ý' => "y", 'ÿ' => "y", 'þ' => "th", 'ß' => "ss",
    // Latin Extended-A
    'ā' => "a", 'ă' => "a", 'ą' => "a",
    'ć' => "c", 'ĉ' => "c", 'ċ' => "c", 'č' => "c",
    'ď' => "d", 'đ' => "d",
    'ē' => "e", 'ĕ' => "e", 'ė' => "e", 'ę' => "e", 'ě' => "e",
    'ĝ' => "g", 'ğ' => "g", 'ġ' => "g", 'ģ' => "g",
    'ĥ' => "h", 'ħ' => "h",
    'ĩ' => "i", 'ī' => "i", 'ĭ' => "i", 'į' => "i", 'ı' => "i",
    'ĳ' => "ij", 'ĵ' => "j", 'ķ' => "k", 'ĸ' => "k",
    'ĺ' => "l", 'ļ' => "l", 'ľ' => "l", 'ŀ' => "l", 'ł' => "l",
    'ń' => "n", 'ņ' => "n", 'ň' => "n", 'ŉ' => "n", 'ŋ' => "n",
    'ō' => "o", 'ŏ' => "o", 'ő' => "o", 'œ' => "oe",
    'ŕ' => "r", 'ŗ' => "r", 'ř' => "r",
    'ś' => "s", 'ŝ' => "s", 'ş' => "s", 'š' => "s",
    'ţ' => "t", 'ť' => "t", 'ŧ' => "t",
    'ũ' => "u", 'ū' => "u", 'ŭ' => "u", 'ů' => "u", 'ű' => "u", 'ų' => "u",
    'ŵ' => "w", 'ŷ' => "y", 'ź' => "z", 'ż' => "z", 'ž' => "z",
    // Romanian comma-below forms, common in municipality names
    'ș' => "s", 'ț' => "t",
};

static NOISE_WORDS: phf::Set<&'static str> = phf_set! {
    "international",
    "air",
};

fn single(mut mapping: impl Iterator<Item = char>) -> Option<char> {
    let first = mapping.next()?;
    mapping.next().is_none().then_some(first)
}

/// Case-folds one character.
pub fn fold_case(c: char) -> char {
    if !c.is_alphabetic() {
        return c;
    }

    let mut current = c;
    while let Some(next) = single(current.to_lowercase()) {
        if next == current {
            break;
        }
        current = next;
    }
    if current as u32 <= LATIN1_MAX {
        return current;
    }

    let latin1 = single(current.to_uppercase())
        .and_then(|upper| single(upper.to_lowercase()))
        .filter(|&c| c as u32 <= LATIN1_MAX);
    if let Some(c) = latin1 {
        return c;
    }

    // multi-char mappings such as 'İ' -> "i̇": keep the leading base letter
    current.to_lowercase().next().unwrap_or(current)
}

/// Folds `text` into index-key form.
pub fn fold(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        let c = fold_case(c);
        match DIACRITICS.get(&c) {
            Some(replacement) => out.push_str(replacement),
            None => out.push(c),
        }
    }
    out
}

/// Whether a folded name token carries no identifying information.
pub fn is_noise(token: &str) -> bool {
    NOISE_WORDS.contains(token) || token.contains("airport") || token.ends_with('.')
}

/// Splits a folded airport name into its identifying tokens.
///
/// Noise is judged on the raw whitespace token (so `intl.` is dropped as an
/// abbreviation) and again after surrounding punctuation is trimmed (so
/// `(international)` is dropped too).
pub fn name_tokens(folded: &str) -> impl Iterator<Item = &str> {
    folded
        .split_whitespace()
        .filter(|token| !is_noise(token))
        .map(|token| token.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|token| !token.is_empty() && !is_noise(token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_case_and_diacritics() {
        assert_eq!(fold("Budapest"), "budapest");
        assert_eq!(fold("Zürich"), "zurich");
        assert_eq!(fold("MÁLAGA"), "malaga");
        assert_eq!(fold("Łódź"), "lodz");
        assert_eq!(fold("Győr"), "gyor");
        assert_eq!(fold("Straße"), "strasse");
        assert_eq!(fold("Timișoara"), "timisoara");
    }

    #[test]
    fn non_letters_pass_through() {
        assert_eq!(fold("São Paulo/Guarulhos"), "sao paulo/guarulhos");
        assert_eq!(fold("Rio-de-Janeiro, 2"), "rio-de-janeiro, 2");
        assert_eq!(fold(""), "");
    }

    #[test]
    fn case_fold_prefers_latin1_member() {
        assert_eq!(fold_case('ſ'), 's');
        assert_eq!(fold_case('\u{212A}'), 'k');
        assert_eq!(fold_case('Ö'), 'ö');
    }

    #[test]
    fn case_fold_falls_back_to_default_lowercase() {
        assert_eq!(fold_case('Ω'), 'ω');
        assert_eq!(fold_case('Ж'), 'ж');
        assert_eq!(fold_case('İ'), 'i');
    }

    #[test]
    fn folding_is_idempotent() {
        for text in ["Liszt Ferenc", "ZÜRICH", "Łódź", "Ærø", "ſtraße"] {
            let once = fold(text);
            assert_eq!(fold(&once), once, "{}", text);
        }
    }

    #[test]
    fn noise_words_are_recognized() {
        assert!(is_noise("international"));
        assert!(is_noise("air"));
        assert!(is_noise("airport"));
        assert!(is_noise("airport,"));
        assert!(is_noise("intl."));
        assert!(!is_noise("airways"));
        assert!(!is_noise("ferenc"));
    }

    #[test]
    fn name_tokens_drop_noise_and_punctuation() {
        let folded = fold("Budapest Liszt Ferenc International Airport");
        let tokens: Vec<&str> = name_tokens(&folded).collect();
        assert_eq!(tokens, ["budapest", "liszt", "ferenc"]);

        let folded = fold("Ferenc (International) \"Air\" Airport");
        let tokens: Vec<&str> = name_tokens(&folded).collect();
        assert_eq!(tokens, ["ferenc"]);

        let folded = fold("Reykjavík (Keflavík) Int. Air Base");
        let tokens: Vec<&str> = name_tokens(&folded).collect();
        assert_eq!(tokens, ["reykjavik", "keflavik", "base"]);
    }
}
