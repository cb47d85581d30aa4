//! Text normalization primitives for match key components.
//!
//! Three transforms feed every composite key component:
//!
//! - [`strip_punctuation`] folds punctuation and symbols to a replacement string
//!   and drops leading English articles.
//! - [`normalize_and_unaccent`] removes diacritics via canonical decomposition.
//! - [`pad_content`] produces fixed-width, underscore-filled tokens.

use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref DIACRITIC: Regex = Regex::new(r"\p{Diacritic}").expect("diacritic pattern is valid");
}

/// Characters replaced by the caller's replacement string, after the
/// percent-escape, article, brace and ampersand rules have run.
const FOLDED_CHARS: &[char] = &[
    ' ', '!', '"', '#', '$', '(', ')', '*', '+', ',', '-', '.', '/', ':', ';', '<', '=', '>',
    '?', '@', '[', '\\', ']', '^', '_', '`', '|', '~', '\u{00A9}',
];

/// Characters removed outright.
const DROPPED_CHARS: &[char] = &['\'', '{', '}'];

/// Leading articles, tried in this order. Each one is stripped only when it
/// starts the (space-trimmed) string and is followed by at least one space.
const LEADING_ARTICLES: &[&str] = &["a", "an", "the"];

/// Fill character for fixed-width tokens.
pub const PAD_CHAR: char = '_';

/// Fold punctuation in a key part to `replacement`.
///
/// Rules run in a fixed order:
///
/// 1. `%22` and then any remaining `%` become `_` (and so end up as `replacement`).
/// 2. A leading `a`, `an`, then `the` (any case, followed by spaces) is removed.
/// 3. `'`, `{` and `}` are removed.
/// 4. `&` becomes `and`.
/// 5. Space and ``!"#$()*+,-./:;<=>?@[\]^_`|~©`` become `replacement`.
///
/// # Examples
///
/// ```
/// use marc_matchkey::normalize::strip_punctuation;
///
/// assert_eq!(strip_punctuation("The Sun Also Rises", " "), "Sun Also Rises");
/// assert_eq!(strip_punctuation("Rock & roll!", ""), "Rockandroll");
/// assert_eq!(strip_punctuation("Tom's {book}", "_"), "Toms_book");
/// ```
#[must_use]
pub fn strip_punctuation(key_part: &str, replacement: &str) -> String {
    let unescaped = key_part.replace("%22", "_").replace('%', "_");

    let mut trimmed = unescaped.as_str();
    for article in LEADING_ARTICLES {
        trimmed = strip_leading_article(trimmed, article);
    }

    let mut result = String::with_capacity(trimmed.len());
    for ch in trimmed.chars() {
        if DROPPED_CHARS.contains(&ch) {
            continue;
        }
        if ch == '&' {
            result.push_str("and");
        } else if FOLDED_CHARS.contains(&ch) {
            result.push_str(replacement);
        } else {
            result.push(ch);
        }
    }
    result
}

fn strip_leading_article<'a>(text: &'a str, article: &str) -> &'a str {
    let rest = text.trim_start_matches(' ');
    let Some(head) = rest.get(..article.len()) else {
        return text;
    };
    if !head.eq_ignore_ascii_case(article) {
        return text;
    }
    let after = &rest[article.len()..];
    if after.starts_with(' ') {
        after.trim_start_matches(' ')
    } else {
        text
    }
}

/// Remove diacritical marks: canonical decomposition, then drop every
/// character with the Unicode `Diacritic` property.
///
/// This covers combining accents as well as spacing modifier letters such as
/// the ALA-LC romanization marks `ʻ` and `ʼ`. Combining vowel signs in
/// scripts like Devanagari are not diacritics and are kept.
///
/// `None` passes through unchanged.
///
/// # Examples
///
/// ```
/// use marc_matchkey::normalize::normalize_and_unaccent;
///
/// assert_eq!(normalize_and_unaccent(Some("Göttingen")), Some("Gottingen".to_string()));
/// assert_eq!(normalize_and_unaccent(None), None);
/// ```
#[must_use]
pub fn normalize_and_unaccent(field_data: Option<&str>) -> Option<String> {
    field_data.map(unaccent)
}

/// [`normalize_and_unaccent`] for values known to be present.
#[must_use]
pub fn unaccent(text: &str) -> String {
    let decomposed: String = text.nfd().collect();
    DIACRITIC.replace_all(&decomposed, "").into_owned()
}

/// Collapse whitespace runs, turn spaces into `_`, and truncate or right-pad
/// with `_` to exactly `length` characters.
///
/// # Examples
///
/// ```
/// use marc_matchkey::normalize::pad_content;
///
/// assert_eq!(pad_content("ab  c", 8), "ab_c____");
/// assert_eq!(pad_content("penguin", 5), "pengu");
/// ```
#[must_use]
pub fn pad_content(key_part: &str, length: usize) -> String {
    let mut padded = String::with_capacity(length);
    let mut count = 0;
    let mut in_whitespace = false;

    for ch in key_part.chars() {
        if count == length {
            break;
        }
        if ch.is_whitespace() {
            if in_whitespace {
                continue;
            }
            in_whitespace = true;
            padded.push(PAD_CHAR);
        } else {
            in_whitespace = false;
            padded.push(ch);
        }
        count += 1;
    }

    padded.extend(std::iter::repeat(PAD_CHAR).take(length - count));
    padded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_articles() {
        assert_eq!(strip_punctuation("A Tale of Two Cities", ""), "TaleofTwoCities");
        assert_eq!(strip_punctuation("An Apple a Day", " "), "Apple a Day");
        assert_eq!(strip_punctuation("the hobbit", " "), "hobbit");
        assert_eq!(strip_punctuation("THE HOBBIT", " "), "HOBBIT");
        assert_eq!(strip_punctuation("  The  Hobbit", " "), "Hobbit");
    }

    #[test]
    fn test_articles_stripped_in_sequence() {
        assert_eq!(strip_punctuation("A The Cat", " "), "Cat");
    }

    #[test]
    fn test_articles_only_at_start() {
        assert_eq!(
            strip_punctuation("Gone with the Wind", " "),
            "Gone with the Wind"
        );
        assert_eq!(strip_punctuation("Theory of a Nation", " "), "Theory of a Nation");
        assert_eq!(strip_punctuation("Anathem", " "), "Anathem");
        assert_eq!(strip_punctuation("A", " "), "A");
    }

    #[test]
    fn test_percent_escapes() {
        assert_eq!(strip_punctuation("say %22hi%22", "-"), "say--hi-");
        assert_eq!(strip_punctuation("100%", ""), "100");
    }

    #[test]
    fn test_folded_and_dropped_characters() {
        assert_eq!(
            strip_punctuation("a!b\"c#d$e(f)g*h+i,j-k.l/m:n;o<p=q>r?s@t[u\\v]w^x_y`z|~©", ""),
            "abcdefghijklmnopqrstuvwxyz"
        );
        assert_eq!(strip_punctuation("it's {ok}", ""), "itsok");
        assert_eq!(strip_punctuation("Simon & Schuster", " "), "Simon and Schuster");
    }

    #[test]
    fn test_non_ascii_passes_through() {
        assert_eq!(strip_punctuation("Café—Paris", ""), "Café—Paris");
    }

    #[test]
    fn test_unaccent() {
        assert_eq!(unaccent("Mémoires d'outre-tombe"), "Memoires d'outre-tombe");
        assert_eq!(unaccent("Dvořák"), "Dvorak");
        assert_eq!(unaccent("plain"), "plain");
    }

    #[test]
    fn test_unaccent_romanization_marks() {
        assert_eq!(unaccent("Taʼrīkh al-ʻArab"), "Tarikh al-Arab");
        assert_eq!(unaccent("l·l"), "ll");
    }

    #[test]
    fn test_unaccent_keeps_vowel_signs() {
        // virama is a diacritic, the vowel signs are not
        assert_eq!(unaccent("हिन्दी"), "हिनदी");
        assert_ne!(unaccent("हिन्दी"), unaccent("हन्द"));
    }

    #[test]
    fn test_unaccent_precomposed_and_decomposed_agree() {
        assert_eq!(unaccent("e\u{0301}"), unaccent("\u{00E9}"));
    }

    #[test]
    fn test_pad_content() {
        assert_eq!(pad_content("", 5), "_____");
        assert_eq!(pad_content("abc", 3), "abc");
        assert_eq!(pad_content("a \t b", 5), "a_b__");
        assert_eq!(pad_content("1999", 4), "1999");
        assert_eq!(pad_content("19992001", 4), "1999");
    }

    #[test]
    fn test_pad_content_counts_characters() {
        let padded = pad_content("Ærø", 5);
        assert_eq!(padded, "Ærø__");
        assert_eq!(padded.chars().count(), 5);
    }
}
