// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Lexical pass over Go source: finds type declarations and splits struct
//! bodies into field entries.
//!
//! The scanner works on a sanitized copy of the source in which comments and
//! the contents of string literals are blanked out, so braces and keywords
//! inside them never count.

use regex::Regex;
use std::sync::OnceLock;

/// One `type` declaration found in a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TypeSpec {
    /// `type Name struct { ... }`; `Err` when the body is not closed.
    Struct {
        name: String,
        body: Result<String, String>,
    },
    /// `type Name interface { ... }`
    Interface { name: String },
    /// `type Name Other` or `type Name = Other`
    Alias { name: String, target: String },
}

/// A parsed struct field entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FieldEntry {
    pub names: Vec<String>,
    pub ty: String,
}

fn cached(cell: &'static OnceLock<Option<Regex>>, pattern: &str) -> Option<&'static Regex> {
    cell.get_or_init(|| Regex::new(pattern).ok()).as_ref()
}

fn type_keyword() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    cached(&RE, r"\btype\b")
}

fn spec_head() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    cached(&RE, r"(?s)^([A-Za-z_]\w*)(\s*=)?(.*)$")
}

fn named_field() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    cached(&RE, r"(?s)^([A-Za-z_]\w*(?:\s*,\s*[A-Za-z_]\w*)*)\s+(\S.*)$")
}

fn embedded_field() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    cached(&RE, r"^\*?(?:[A-Za-z_]\w*\.)?([A-Za-z_]\w*)(?:\[.*\])?$")
}

/// Blank out comments and string literal contents, keeping newlines and
/// byte offsets intact.
pub(crate) fn sanitize(src: &str) -> String {
    #[derive(Clone, Copy, PartialEq)]
    enum State {
        Code,
        LineComment,
        BlockComment,
        Quoted(char),
    }

    let mut out = String::with_capacity(src.len());
    let mut state = State::Code;
    let mut chars = src.chars().peekable();

    while let Some(c) = chars.next() {
        match state {
            State::Code => match c {
                '/' if chars.peek() == Some(&'/') => {
                    chars.next();
                    out.push_str("  ");
                    state = State::LineComment;
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    out.push_str("  ");
                    state = State::BlockComment;
                }
                '"' | '`' | '\'' => {
                    out.push(c);
                    state = State::Quoted(c);
                }
                _ => out.push(c),
            },
            State::LineComment => {
                if c == '\n' {
                    out.push('\n');
                    state = State::Code;
                } else {
                    push_blank(&mut out, c);
                }
            }
            State::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    out.push_str("  ");
                    state = State::Code;
                } else {
                    push_blank(&mut out, c);
                }
            }
            State::Quoted(delim) => {
                if c == '\\' && delim != '`' {
                    push_blank(&mut out, c);
                    if let Some(escaped) = chars.next() {
                        push_blank(&mut out, escaped);
                    }
                } else if c == delim {
                    out.push(c);
                    state = State::Code;
                } else if c == '\n' && delim != '`' {
                    // Unterminated interpreted literal; resume at the next line.
                    out.push('\n');
                    state = State::Code;
                } else {
                    push_blank(&mut out, c);
                }
            }
        }
    }

    out
}

fn push_blank(out: &mut String, c: char) {
    if c == '\n' {
        out.push('\n');
    } else {
        for _ in 0..c.len_utf8() {
            out.push(' ');
        }
    }
}

/// Take one declaration entry from the start of `text`.
///
/// An entry ends at a newline or `;` outside any bracket pair, or before a
/// closing bracket that has no opener in the entry. Returns the entry, the
/// number of bytes consumed and whether all brackets were closed.
pub(crate) fn take_entry(text: &str) -> (&str, usize, bool) {
    let mut depth: usize = 0;

    for (i, c) in text.char_indices() {
        match c {
            '{' | '[' | '(' => depth += 1,
            '}' | ']' | ')' => {
                if depth == 0 {
                    return (&text[..i], i, true);
                }
                depth -= 1;
            }
            '\n' | ';' if depth == 0 => return (&text[..i], i + 1, true),
            _ => {}
        }
    }

    (text, text.len(), depth == 0)
}

/// Split a block body into trimmed, non-empty entries.
pub(crate) fn split_entries(body: &str) -> Vec<&str> {
    let mut entries = Vec::new();
    let mut rest = body;

    while !rest.is_empty() {
        let (entry, consumed, _) = take_entry(rest);
        let entry = entry.trim();
        if !entry.is_empty() {
            entries.push(entry);
        }
        if consumed == 0 {
            // Stray closing bracket: skip it.
            let skip = rest.chars().next().map_or(1, char::len_utf8);
            rest = &rest[skip..];
        } else {
            rest = &rest[consumed..];
        }
    }

    entries
}

/// Find every top-level or grouped `type` declaration in sanitized source.
pub(crate) fn find_type_specs(text: &str) -> Vec<TypeSpec> {
    let mut specs = Vec::new();

    for m in type_keyword().into_iter().flat_map(|re| re.find_iter(text)) {
        let after = text[m.end()..].trim_start();

        if let Some(group) = after.strip_prefix('(') {
            let (body, _, _) = take_entry_until_close(group);
            for entry in split_entries(body) {
                specs.extend(parse_spec(entry));
            }
        } else {
            let (entry, _, closed) = take_entry(after);
            let spec = parse_spec(entry.trim());
            specs.extend(spec.map(|spec| match spec {
                TypeSpec::Struct { name, body: Ok(_) } if !closed => TypeSpec::Struct {
                    name,
                    body: Err("unbalanced braces in struct body".to_string()),
                },
                other => other,
            }));
        }
    }

    specs
}

/// Like [`take_entry`] but only stops at the unmatched closing bracket.
fn take_entry_until_close(text: &str) -> (&str, usize, bool) {
    let mut depth: usize = 0;
    for (i, c) in text.char_indices() {
        match c {
            '{' | '[' | '(' => depth += 1,
            '}' | ']' | ')' => {
                if depth == 0 {
                    return (&text[..i], i + 1, true);
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    (text, text.len(), false)
}

fn parse_spec(entry: &str) -> Option<TypeSpec> {
    let caps = spec_head()?.captures(entry)?;
    let name = caps.get(1)?.as_str().to_string();
    let is_alias = caps.get(2).is_some();
    let rest = caps.get(3).map_or("", |m| m.as_str());

    // Generic declarations (`type List[T any] ...`) are not described.
    if !is_alias && rest.starts_with('[') {
        return None;
    }

    let rest = rest.trim();
    if rest.is_empty() {
        return None;
    }

    if !is_alias {
        if let Some(after) = keyword_block(rest, "struct") {
            return Some(TypeSpec::Struct {
                name,
                body: block_body(after),
            });
        }
        if keyword_block(rest, "interface").is_some() {
            return Some(TypeSpec::Interface { name });
        }
    }

    Some(TypeSpec::Alias {
        name,
        target: rest.to_string(),
    })
}

/// If `text` is `keyword {...`, return the text from the opening brace.
fn keyword_block<'a>(text: &'a str, keyword: &str) -> Option<&'a str> {
    let after = text.strip_prefix(keyword)?;
    let trimmed = after.trim_start();
    trimmed.starts_with('{').then_some(trimmed)
}

/// Contents between the leading `{` and its matching `}`.
fn block_body(text: &str) -> Result<String, String> {
    let inner = &text[1..];
    let (body, _, closed) = take_entry_until_close(inner);
    if closed {
        Ok(body.to_string())
    } else {
        Err("unbalanced braces in struct body".to_string())
    }
}

/// Parse one struct body entry. Tags must already be blanked by [`sanitize`].
pub(crate) fn parse_field(entry: &str) -> Result<FieldEntry, String> {
    let entry = strip_tag(entry.trim());

    if let Some(caps) = named_field().and_then(|re| re.captures(entry)) {
        let names = caps[1]
            .split(',')
            .map(|n| n.trim().to_string())
            .collect::<Vec<_>>();
        return Ok(FieldEntry {
            names,
            ty: caps[2].trim().to_string(),
        });
    }

    if let Some(caps) = embedded_field().and_then(|re| re.captures(entry)) {
        return Ok(FieldEntry {
            names: vec![caps[1].to_string()],
            ty: entry.to_string(),
        });
    }

    Err(format!("cannot parse field declaration `{}`", entry))
}

fn strip_tag(entry: &str) -> &str {
    for delim in ['`', '"'] {
        if let Some(head) = entry.strip_suffix(delim) {
            if let Some(open) = head.rfind(delim) {
                return head[..open].trim_end();
            }
        }
    }
    entry
}
