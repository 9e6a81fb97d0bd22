// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Go type expressions to [`TypeExpr`].

use typeshape::TypeExpr;

/// Types nested deeper than this are kept as opaque.
pub(crate) const MAX_TYPE_DEPTH: usize = 256;

/// Parse the spelling of a Go type.
///
/// Never fails: spellings without a structural meaning become
/// [`TypeExpr::Opaque`], and collections whose component is missing keep a
/// `None` so the extraction pass reports them as malformed.
pub(crate) fn parse_type(text: &str) -> TypeExpr {
    parse_nested(text, 0)
}

fn parse_nested(text: &str, depth: usize) -> TypeExpr {
    let t = text.trim();

    if depth >= MAX_TYPE_DEPTH {
        return TypeExpr::opaque(format!("type nested deeper than {MAX_TYPE_DEPTH} levels"));
    }

    if let Some(rest) = t.strip_prefix('*') {
        if rest.trim().is_empty() {
            return TypeExpr::opaque(t);
        }
        return TypeExpr::optional(parse_nested(rest, depth + 1));
    }

    if t.starts_with('[') {
        return match matching_bracket(t, 0) {
            Some(close) if is_array_length(&t[1..close]) => {
                let element = t[close + 1..].trim();
                if element.is_empty() {
                    TypeExpr::Sequence(None)
                } else {
                    TypeExpr::seq(parse_nested(element, depth + 1))
                }
            }
            _ => TypeExpr::opaque(normalize(t)),
        };
    }

    if let Some(after) = t.strip_prefix("map") {
        if after.trim_start().starts_with('[') {
            return parse_map(after.trim_start(), depth);
        }
    }

    if let Some(inner) = t.strip_prefix('(').and_then(|r| r.strip_suffix(')')) {
        return parse_nested(inner, depth + 1);
    }

    if t == "any" || is_keyword_type(t, "interface") {
        return TypeExpr::Any;
    }

    if is_keyword_type(t, "chan")
        || t.starts_with("<-")
        || is_keyword_type(t, "func")
        || is_keyword_type(t, "struct")
    {
        return TypeExpr::opaque(normalize(t));
    }

    if is_identifier(t) {
        return builtin(t).unwrap_or_else(|| TypeExpr::named(t));
    }

    TypeExpr::opaque(normalize(t))
}

fn parse_map(text: &str, depth: usize) -> TypeExpr {
    let Some(close) = matching_bracket(text, 0) else {
        return TypeExpr::Mapping {
            key: None,
            value: None,
        };
    };

    let key = text[1..close].trim();
    let value = text[close + 1..].trim();

    TypeExpr::Mapping {
        key: (!key.is_empty()).then(|| Box::new(parse_nested(key, depth + 1))),
        value: (!value.is_empty()).then(|| Box::new(parse_nested(value, depth + 1))),
    }
}

// @audit-ok: Simple pattern matching - Go predeclared type table
fn builtin(name: &str) -> Option<TypeExpr> {
    let ty = match name {
        "bool" => TypeExpr::Bool,
        "string" => TypeExpr::Str,
        "int" | "int64" => TypeExpr::int(),
        "int8" => TypeExpr::Int {
            signed: true,
            bits: 8,
        },
        "int16" => TypeExpr::Int {
            signed: true,
            bits: 16,
        },
        "int32" | "rune" => TypeExpr::Int {
            signed: true,
            bits: 32,
        },
        "uint" | "uint64" | "uintptr" => TypeExpr::uint(64),
        "uint8" | "byte" => TypeExpr::uint(8),
        "uint16" => TypeExpr::uint(16),
        "uint32" => TypeExpr::uint(32),
        "float32" => TypeExpr::Float { bits: 32 },
        "float64" => TypeExpr::float(),
        "complex64" | "complex128" | "error" => TypeExpr::opaque(name),
        _ => return None,
    };
    Some(ty)
}

/// Index of the `]` matching the `[` at `open`.
fn matching_bracket(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in text[open..].char_indices() {
        match c {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + i);
                }
            }
            _ => {}
        }
    }
    None
}

/// `[]`, `[4]`, `[...]` and `[N]` (named constant) are array/slice prefixes.
fn is_array_length(inside: &str) -> bool {
    let inside = inside.trim();
    inside.is_empty()
        || inside == "..."
        || inside.chars().all(|c| c.is_ascii_digit() || c == '_')
        || is_identifier(inside)
}

fn is_keyword_type(text: &str, keyword: &str) -> bool {
    text.strip_prefix(keyword).is_some_and(|rest| {
        rest.is_empty() || rest.starts_with(|c: char| c.is_whitespace() || c == '{' || c == '(')
    })
}

fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
