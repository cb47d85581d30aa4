//! Builders for the individual match key components.
//!
//! Each builder takes the raw candidate values for its component, in priority
//! order, with `None` standing in for a source the record does not have. The
//! output is a normalized token: fixed-width for title, year, publisher and
//! author; a single character for record type and the electronic indicator.
//!
//! | Component | Sources | Width |
//! |---|---|---|
//! | [`title`] | 245$a, 245$b, 245$p | 70 |
//! | [`publication_year`] | 008, 264$c, 260$c | 4 |
//! | [`publisher_name`] | 264$b, 260$b | 5 |
//! | [`record_type`] | leader/06 | 0 or 1 |
//! | [`author`] | 100$a, 110$a, 111$a, 130$a | 5 |
//! | [`electronic_indicator`] | 245$h, 590$a, 533$a, 300$a, 007, 337$a, 086 + 856 | 1 |
//! | [`standard_number`] | 020$a, 022$a, 024$a | variable |

use crate::field_access::FieldAccess;
use crate::leader::Leader;
use crate::normalize::{pad_content, strip_punctuation, unaccent};
use lazy_static::lazy_static;
use regex::Regex;

/// Width of the title token.
pub const TITLE_LENGTH: usize = 70;
/// Width of the publication year token.
pub const YEAR_LENGTH: usize = 4;
/// Width of the publisher token.
pub const PUBLISHER_LENGTH: usize = 5;
/// Width of the author token.
pub const AUTHOR_LENGTH: usize = 5;

/// Year used when no source yields a usable one.
pub const UNKNOWN_YEAR: &str = "0000";

/// Standard number tags, in probing order: ISBN, ISSN, other standard identifier.
pub const STANDARD_NUMBER_TAGS: [&str; 3] = ["020", "022", "024"];

const ISBN_TAG: &str = "020";
const OPEN_ENDED_YEAR: &str = "9999";
const REISSUE_DATE_TYPE: char = 'r';

lazy_static! {
    static ref YEAR: Regex = Regex::new(r"[1-9][0-9]{3}").expect("year pattern is valid");
    static ref NON_WORD: Regex = Regex::new(r"[^A-Za-z0-9_]").expect("non-word pattern is valid");
    static ref ELECTRONIC_RESOURCE: Regex =
        Regex::new(r"(?i-u)\belectronic resource\b").expect("electronic resource pattern is valid");
    static ref ELECTRONIC_REPRODUCTION: Regex = Regex::new(r"(?i-u)\belectronic reproduction\b")
        .expect("electronic reproduction pattern is valid");
    static ref ONLINE_RESOURCE: Regex =
        Regex::new(r"(?i-u)\bonline resource\b").expect("online resource pattern is valid");
}

/// First present candidate and its priority index.
#[must_use]
pub fn first_present<'a>(candidates: &[Option<&'a str>]) -> Option<(usize, &'a str)> {
    candidates
        .iter()
        .enumerate()
        .find_map(|(idx, candidate)| candidate.map(|value| (idx, value)))
}

/// Transform present candidates in priority order and return the first
/// transformed value that `accept` takes. Later candidates are not transformed.
pub fn first_accepted<T, A>(candidates: &[Option<&str>], mut transform: T, accept: A) -> Option<String>
where
    T: FnMut(usize, &str) -> String,
    A: Fn(&str) -> bool,
{
    candidates.iter().enumerate().find_map(|(idx, candidate)| {
        let value = transform(idx, (*candidate)?);
        accept(&value).then_some(value)
    })
}

/// Title token from 245$a, 245$b and 245$p.
///
/// Every present part contributes, not just the first.
///
/// # Examples
///
/// ```
/// use marc_matchkey::components::title;
///
/// let token = title(&[Some("The Great Gatsby /"), None, None]);
/// assert!(token.starts_with("GreatGatsby___"));
/// assert_eq!(token.len(), 70);
/// ```
#[must_use]
pub fn title(candidates: &[Option<&str>]) -> String {
    let joined: String = candidates
        .iter()
        .flatten()
        .map(|part| strip_punctuation(part, " ").trim().to_string())
        .collect();
    pad_content(&unaccent(&joined.replace(' ', "")), TITLE_LENGTH)
}

/// Publication year token from 008, 264$c and 260$c.
///
/// The 008 candidate yields Date 1 (positions 7-10) for reissues and Date 2
/// (positions 11-14) otherwise. The other candidates yield all of their
/// digits. The first candidate containing a plausible year that is not the
/// open-ended `9999` wins; its digits are then cut to four characters.
///
/// # Examples
///
/// ```
/// use marc_matchkey::components::publication_year;
///
/// assert_eq!(publication_year(&[Some("950315r19991995nyu"), None, None]), "1999");
/// assert_eq!(publication_year(&[None, Some("c2004."), None]), "2004");
/// assert_eq!(publication_year(&[None, None, None]), "0000");
/// ```
#[must_use]
pub fn publication_year(candidates: &[Option<&str>]) -> String {
    let year = first_accepted(
        candidates,
        |idx, value| {
            if idx == 0 {
                fixed_field_date(value)
            } else {
                digits_only(value)
            }
        },
        |digits| YEAR.is_match(digits) && digits != OPEN_ENDED_YEAR,
    );
    pad_content(year.as_deref().unwrap_or(UNKNOWN_YEAR), YEAR_LENGTH)
}

fn fixed_field_date(field_008: &str) -> String {
    let date = if field_008.chars().nth(6) == Some(REISSUE_DATE_TYPE) {
        char_range(field_008, 7, 11)
    } else {
        char_range(field_008, 11, 15)
    };
    digits_only(&date)
}

fn char_range(value: &str, start: usize, end: usize) -> String {
    value.chars().skip(start).take(end - start).collect()
}

fn digits_only(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Publisher token from 264$b, falling back to 260$b.
///
/// A present 264$b always wins. Among the fallbacks the *last* present one is
/// used, unlike every other component.
#[must_use]
pub fn publisher_name(candidates: &[Option<&str>]) -> String {
    let chosen = match candidates.split_first() {
        Some((Some(preferred), _)) => Some(*preferred),
        Some((None, fallbacks)) => fallbacks.iter().flatten().last().copied(),
        None => None,
    };
    let folded = unaccent(chosen.unwrap_or_default()).to_lowercase();
    pad_content(
        &strip_punctuation(&folded, " ").replace(' ', ""),
        PUBLISHER_LENGTH,
    )
}

/// Record type token: leader position 6, or empty for short leaders.
#[must_use]
pub fn record_type(leader: &Leader) -> String {
    leader.record_type().map(String::from).unwrap_or_default()
}

/// Author token from the main entry fields 100$a, 110$a, 111$a and 130$a.
///
/// All present entries are joined and reduced to ASCII letters and digits.
#[must_use]
pub fn author(candidates: &[Option<&str>]) -> String {
    let joined: String = candidates
        .iter()
        .flatten()
        .map(|name| unaccent(&strip_punctuation(name, "")))
        .collect();
    let alphanumeric: String = joined.chars().filter(char::is_ascii_alphanumeric).collect();
    pad_content(&alphanumeric, AUTHOR_LENGTH)
}

/// `'e'` for electronic resources, `'p'` for everything else.
///
/// Checks run in a fixed order and the first hit wins:
///
/// 1. 245$h mentions "electronic resource"
/// 2. 590$a mentions "electronic reproduction"
/// 3. 533$a mentions "electronic reproduction"
/// 4. 300$a mentions "online resource"
/// 5. 007 starts with `c` (computer file)
/// 6. 337$a starts with `c` (RDA media type "computer")
/// 7. both 086 (government document number) and 856 (electronic location) exist
#[must_use]
pub fn electronic_indicator<R: FieldAccess + ?Sized>(record: &R) -> char {
    let note_checks: [(&str, char, &Regex); 4] = [
        ("245", 'h', &*ELECTRONIC_RESOURCE),
        ("590", 'a', &*ELECTRONIC_REPRODUCTION),
        ("533", 'a', &*ELECTRONIC_REPRODUCTION),
        ("300", 'a', &*ONLINE_RESOURCE),
    ];
    let noted = note_checks.iter().any(|(tag, code, pattern)| {
        record
            .get_relevant_subfield(tag, *code)
            .is_some_and(|value| pattern.is_match(&unaccent(value)))
    });
    let is_electronic = noted
        || starts_with_computer_code(record.get_field("007", None))
        || starts_with_computer_code(record.get_field("337", Some('a')))
        || (record.has_field("086") && record.has_field("856"));

    if is_electronic {
        'e'
    } else {
        'p'
    }
}

fn starts_with_computer_code(value: Option<&str>) -> bool {
    value.is_some_and(|value| value.starts_with('c'))
}

/// Standard number token, `"<tag>_<number>"`.
///
/// Non-word characters are removed. ISBNs additionally lose their check digit
/// and any `97x` EAN prefix, so the ISBN-10 and ISBN-13 forms of one book
/// produce the same token.
///
/// # Examples
///
/// ```
/// use marc_matchkey::components::standard_number;
///
/// assert_eq!(standard_number("020", "978-0-14-143951-8"), "020_014143951");
/// assert_eq!(standard_number("020", "0-14-143951-3"), "020_014143951");
/// assert_eq!(standard_number("022", "0028-0836"), "022_00280836");
/// ```
#[must_use]
pub fn standard_number(tag: &str, number: &str) -> String {
    let mut normalized = NON_WORD.replace_all(number, "").into_owned();
    if tag == ISBN_TAG {
        normalized.pop();
        if normalized.starts_with("97") {
            if let Some(rest) = normalized.get(3..) {
                normalized = rest.to_string();
            }
        }
    }
    format!("{tag}_{normalized}")
}

/// First standard number in the record: the tag it came from and its raw $a.
pub fn find_standard_number<R: FieldAccess + ?Sized>(record: &R) -> Option<(&'static str, &str)> {
    let candidates = STANDARD_NUMBER_TAGS.map(|tag| record.get_relevant_subfield(tag, 'a'));
    first_present(&candidates).map(|(idx, number)| (STANDARD_NUMBER_TAGS[idx], number))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Field, Record};

    fn field(tag: &str, subfields: &[(char, &str)]) -> Field {
        let mut field = Field::new(tag.to_string(), ' ', ' ');
        for (code, value) in subfields {
            field.add_subfield(*code, (*value).to_string());
        }
        field
    }

    fn record_with(fields: Vec<Field>) -> Record {
        let mut record = Record::new(Leader::default());
        record.fields = fields;
        record
    }

    #[test]
    fn test_first_present() {
        assert_eq!(first_present(&[None, Some("b"), Some("c")]), Some((1, "b")));
        assert_eq!(first_present(&[None, None]), None);
        assert_eq!(first_present(&[]), None);
    }

    #[test]
    fn test_first_accepted_stops_at_first_acceptance() {
        let mut seen = Vec::new();
        let result = first_accepted(
            &[Some("x"), None, Some("yy"), Some("zz")],
            |idx, value| {
                seen.push(idx);
                value.to_uppercase()
            },
            |value| value.len() == 2,
        );
        assert_eq!(result.as_deref(), Some("YY"));
        assert_eq!(seen, vec![0, 2]);
    }

    #[test]
    fn test_title_concatenates_parts() {
        let token = title(&[Some("Gatsby :"), Some("a novel /"), Some("Part one.")]);
        assert_eq!(token, format!("GatsbynovelPartone{}", "_".repeat(52)));
        assert_eq!(token.chars().count(), TITLE_LENGTH);
    }

    #[test]
    fn test_title_unaccents_and_truncates() {
        let long = "Élan ".repeat(30);
        let token = title(&[Some(&long), None, None]);
        assert!(token.starts_with("ElanElan"));
        assert_eq!(token.chars().count(), TITLE_LENGTH);
        assert!(!token.contains('_'));
    }

    #[test]
    fn test_title_missing() {
        assert_eq!(title(&[None, None, None]), "_".repeat(TITLE_LENGTH));
    }

    #[test]
    fn test_year_from_008_date2_for_non_reissue() {
        // 008/06 's' reads 008/11-14, which is blank for single dates
        assert_eq!(
            publication_year(&[Some("950315s1995    nyu"), Some("1995."), None]),
            "1995"
        );
        assert_eq!(
            publication_year(&[Some("950315m19952001nyu"), None, None]),
            "2001"
        );
    }

    #[test]
    fn test_year_rejects_open_ended() {
        assert_eq!(
            publication_year(&[Some("950315m19959999nyu"), Some("[1996]"), None]),
            "1996"
        );
        assert_eq!(publication_year(&[None, Some("9999"), Some("1850")]), "1850");
    }

    #[test]
    fn test_year_falls_back_past_unusable_candidates() {
        assert_eq!(
            publication_year(&[Some("950315r19uu    nyu"), Some("c19--"), Some("1923")]),
            "1923"
        );
        assert_eq!(publication_year(&[Some("short"), None, None]), UNKNOWN_YEAR);
        assert_eq!(publication_year(&[None, Some("0999"), None]), UNKNOWN_YEAR);
    }

    #[test]
    fn test_year_truncates_digit_runs() {
        assert_eq!(publication_year(&[None, Some("1999-2001"), None]), "1999");
    }

    #[test]
    fn test_publisher_prefers_264() {
        assert_eq!(
            publisher_name(&[Some("Penguin Books,"), Some("Viking")]),
            "pengu"
        );
    }

    #[test]
    fn test_publisher_last_fallback_wins() {
        assert_eq!(
            publisher_name(&[None, Some("Viking"), Some("Scribner")]),
            "scrib"
        );
    }

    #[test]
    fn test_publisher_normalization() {
        assert_eq!(publisher_name(&[Some("The Éditions"), None]), "editi");
        assert_eq!(publisher_name(&[None, Some("A & B")]), "andb_");
        assert_eq!(publisher_name(&[None, None]), "_____");
    }

    #[test]
    fn test_record_type() {
        assert_eq!(record_type(&Leader::new("00000cjm a22000000a 4500")), "j");
        assert_eq!(record_type(&Leader::new("00000")), "");
    }

    #[test]
    fn test_author() {
        assert_eq!(author(&[Some("Fitzgerald, F. Scott"), None, None, None]), "Fitzg");
        assert_eq!(author(&[None, None, None, None]), "_____");
        assert_eq!(author(&[Some("Dvořák,"), None, None, None]), "Dvora");
    }

    #[test]
    fn test_author_concatenates_entries() {
        assert_eq!(author(&[Some("Li"), Some("Wu"), None, Some("X")]), "LiWuX");
    }

    #[test]
    fn test_author_drops_non_ascii_letters() {
        assert_eq!(author(&[Some("Æsop—"), None, None, None]), "sop__");
    }

    #[test]
    fn test_electronic_indicator_defaults_to_print() {
        let record = record_with(vec![field("245", &[('a', "Print book")])]);
        assert_eq!(electronic_indicator(&record), 'p');
    }

    #[test]
    fn test_electronic_indicator_notes() {
        let gmd = record_with(vec![field("245", &[('h', "[Electronic resource] /")])]);
        assert_eq!(electronic_indicator(&gmd), 'e');

        let repro = record_with(vec![field(
            "533",
            &[('a', "Electronic reproduction.")],
        )]);
        assert_eq!(electronic_indicator(&repro), 'e');

        let local = record_with(vec![field("590", &[('a', "Electronic reproduction")])]);
        assert_eq!(electronic_indicator(&local), 'e');

        let extent = record_with(vec![field("300", &[('a', "1 online resource (200 p.)")])]);
        assert_eq!(electronic_indicator(&extent), 'e');
    }

    #[test]
    fn test_electronic_indicator_needs_whole_words() {
        let record = record_with(vec![field("300", &[('a', "online resources")])]);
        assert_eq!(electronic_indicator(&record), 'p');
    }

    #[test]
    fn test_electronic_indicator_ascii_matching() {
        // no Unicode case folding: long s is not an s
        let long_s = record_with(vec![field("300", &[('a', "1 online reſource")])]);
        assert_eq!(electronic_indicator(&long_s), 'p');

        // non-ASCII letters are not word characters
        let sharp_s = record_with(vec![field("245", &[('h', "ßelectronic resource")])]);
        assert_eq!(electronic_indicator(&sharp_s), 'e');

        let upper = record_with(vec![field("300", &[('a', "1 ONLINE RESOURCE")])]);
        assert_eq!(electronic_indicator(&upper), 'e');
    }

    #[test]
    fn test_electronic_indicator_coded_fields() {
        let mut physical = record_with(vec![]);
        physical.add_control_field_str("007", "ta");
        assert_eq!(electronic_indicator(&physical), 'p');

        let mut computer = record_with(vec![]);
        computer.add_control_field_str("007", "cr |n|||||||||");
        assert_eq!(electronic_indicator(&computer), 'e');

        let rda = record_with(vec![field("337", &[('a', "computer"), ('b', "c")])]);
        assert_eq!(electronic_indicator(&rda), 'e');

        let unmediated = record_with(vec![field("337", &[('a', "unmediated")])]);
        assert_eq!(electronic_indicator(&unmediated), 'p');
    }

    #[test]
    fn test_electronic_indicator_government_document_online() {
        let both = record_with(vec![field("086", &[('a', "Y 4.2")]), field("856", &[])]);
        assert_eq!(electronic_indicator(&both), 'e');

        let only_086 = record_with(vec![field("086", &[('a', "Y 4.2")])]);
        assert_eq!(electronic_indicator(&only_086), 'p');
    }

    #[test]
    fn test_standard_number_isbn() {
        assert_eq!(standard_number("020", "9780306406157 (pbk.)"), "020_0306406157pb");
        assert_eq!(standard_number("020", "0306406152"), "020_030640615");
        assert_eq!(standard_number("020", "97"), "020_9");
    }

    #[test]
    fn test_standard_number_non_isbn_keeps_all_word_chars() {
        assert_eq!(standard_number("024", "0 12345-67890 5"), "024_012345678905");
        assert_eq!(standard_number("022", "1234-567X"), "022_1234567X");
    }

    #[test]
    fn test_find_standard_number_order() {
        let record = record_with(vec![
            field("024", &[('a', "0123456789012")]),
            field("022", &[('a', "0028-0836")]),
            field("020", &[('z', "cancelled")]),
        ]);
        assert_eq!(find_standard_number(&record), Some(("022", "0028-0836")));
        assert_eq!(find_standard_number(&record_with(vec![])), None);
    }
}
