use std::borrow::Cow;

use unicode_general_category::{get_general_category, GeneralCategory};

/// Whether `c` is in one of the Unicode letter categories (L*). Letter
/// numbers, combining marks and symbols are not letters.
pub fn is_letter(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
    )
}

/// Splits text into words. Anything that isn't a letter (whitespace,
/// punctuation, digits, marks, symbols) is a separator, and runs of
/// separators count as a single boundary. Case is kept as-is.
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !is_letter(c))
        .filter(|word| !word.is_empty())
}

/// Decodes raw mail bytes. Invalid UTF-8 turns into U+FFFD, which the
/// tokenizer then treats as a separator.
pub fn decode(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}
