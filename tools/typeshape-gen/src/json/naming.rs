// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Record names derived from JSON keys.

/// Split an identifier into words.
///
/// Words are runs of digits, runs of lowercase letters with at most one
/// leading capital, and capital runs (acronyms). An acronym directly followed
/// by a lowercase word gives up its last capital to that word, so
/// `HTMLParser` splits as `HTML`, `Parser`. Everything else separates words.
/// An input without any word is returned whole.
pub fn split_words(input: &str) -> Vec<&str> {
    let bytes = input.as_bytes();
    let run = |from: usize, pred: fn(&u8) -> bool| {
        from + bytes[from..].iter().take_while(|b| pred(*b)).count()
    };

    let mut words = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        let end = if b.is_ascii_uppercase() {
            let caps = run(i, u8::is_ascii_uppercase);
            let followed_by_lower = bytes.get(caps).is_some_and(u8::is_ascii_lowercase);
            match caps - i {
                1 if followed_by_lower => run(caps, u8::is_ascii_lowercase),
                n if n > 1 && followed_by_lower => caps - 1,
                _ => caps,
            }
        } else if b.is_ascii_lowercase() {
            run(i, u8::is_ascii_lowercase)
        } else if b.is_ascii_digit() {
            run(i, u8::is_ascii_digit)
        } else {
            i += 1;
            continue;
        };
        words.push(&input[i..end]);
        i = end;
    }

    if words.is_empty() {
        words.push(input);
    }
    words
}

/// `user_id` -> `UserId`, `HTMLParser` -> `HtmlParser`.
pub fn to_pascal_case(input: &str) -> String {
    split_words(input)
        .into_iter()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect()
}

/// PascalCase identifier built from `input`, restricted to ASCII letters and
/// digits. Falls back to `fallback` when nothing is left, and prefixes it
/// when the result would start with a digit.
pub fn safe_type_name(input: &str, fallback: &str) -> String {
    let candidate: String = to_pascal_case(input)
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect();

    if candidate.is_empty() {
        fallback.to_string()
    } else if candidate.starts_with(|c: char| c.is_ascii_digit()) {
        format!("{fallback}{candidate}")
    } else {
        candidate
    }
}
