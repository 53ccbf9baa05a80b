//! Locale-aware string ordering for display lists.
//!
//! Strings are compared in three passes: base letters ignoring case and accents, then
//! accents, then case with lowercase first. This matches the default root-locale order
//! closely enough for personal names.

use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

pub fn compare(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| accented(a).cmp(accented(b)))
        .then_with(|| case_marks(a).cmp(case_marks(b)))
}

fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().filter(|c| !is_combining_mark(*c)).flat_map(char::to_lowercase)
}

fn accented(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}

fn case_marks(s: &str) -> impl Iterator<Item = bool> + '_ {
    s.nfd().filter(|c| !is_combining_mark(*c)).map(char::is_uppercase)
}
