//! Permissive pattern input grammar.
//!
//! Accepted forms: bare shorthand strings ("1-3-6"), flat token sequences,
//! and sequences of sequences (multi-row). Tokens that match no recognized
//! shape pass through as [`Span::Raw`]; nothing here ever fails.

use serde::Deserialize;

use super::core::{HIDDEN_MARKER, NormalizedPattern, PatternEntry, Span};

/// One user-supplied pattern token: a bare track count or a textual form
/// ("a/b", "c:r", "_", shorthand).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PatternToken {
    Count(u32),
    Text(String),
}

/// Element of a top-level pattern array: a token or a nested row.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawPatternItem {
    Token(PatternToken),
    Row(Vec<PatternToken>),
}

/// Pattern input as supplied by the caller, before parsing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawPattern {
    /// Bare top-level string; shorthand-shaped text expands to the whole
    /// flat row.
    Text(String),
    Items(Vec<RawPatternItem>),
}

/// Parse raw input into rows of span pairs. Multi-row when any element is a
/// nested array; bare tokens alongside nested arrays become single-entry
/// rows.
pub fn parse_pattern(raw: &RawPattern) -> NormalizedPattern {
    let rows = match raw {
        RawPattern::Text(text) => vec![parse_text_token(text)],
        RawPattern::Items(items) => {
            let multi_row = items
                .iter()
                .any(|item| matches!(item, RawPatternItem::Row(_)));
            if multi_row {
                items
                    .iter()
                    .map(|item| match item {
                        RawPatternItem::Row(tokens) => parse_row(tokens),
                        RawPatternItem::Token(token) => parse_token(token),
                    })
                    .collect()
            } else {
                let row = items
                    .iter()
                    .flat_map(|item| match item {
                        RawPatternItem::Token(token) => parse_token(token),
                        RawPatternItem::Row(tokens) => parse_row(tokens),
                    })
                    .collect();
                vec![row]
            }
        }
    };
    NormalizedPattern::from_rows(rows)
}

/// Split comma-separated rows of whitespace-separated tokens, coercing
/// purely-numeric tokens to counts.
pub fn string_to_pattern(text: &str) -> RawPattern {
    let rows: Vec<Vec<PatternToken>> = text
        .split(',')
        .map(|row| {
            row.split_whitespace()
                .map(|token| match token.parse::<u32>() {
                    Ok(n) => PatternToken::Count(n),
                    Err(_) => PatternToken::Text(token.to_string()),
                })
                .collect()
        })
        .collect();

    if rows.len() == 1 {
        let row = rows.into_iter().next().unwrap_or_default();
        RawPattern::Items(row.into_iter().map(RawPatternItem::Token).collect())
    } else {
        RawPattern::Items(rows.into_iter().map(RawPatternItem::Row).collect())
    }
}

fn parse_row(tokens: &[PatternToken]) -> Vec<PatternEntry> {
    tokens.iter().flat_map(parse_token).collect()
}

/// One token can yield several entries (shorthand expansion), hence the Vec.
fn parse_token(token: &PatternToken) -> Vec<PatternEntry> {
    match token {
        PatternToken::Count(n) => vec![PatternEntry::new(Span::Implicit(*n))],
        PatternToken::Text(text) => parse_text_token(text),
    }
}

fn parse_text_token(text: &str) -> Vec<PatternEntry> {
    if let Some((col, row)) = text.split_once(':') {
        return vec![PatternEntry::with_row(
            parse_axis_span(col),
            parse_axis_span(row),
        )];
    }
    if let Some(spans) = expand_shorthand(text) {
        return spans.into_iter().map(PatternEntry::new).collect();
    }
    vec![PatternEntry::new(parse_axis_span(text))]
}

/// Single-axis span token. Unrecognized shapes pass through as `Raw`.
fn parse_axis_span(token: &str) -> Span {
    let token = token.trim();
    if token == HIDDEN_MARKER {
        return Span::Hidden;
    }
    if let Some((start, end)) = token.split_once('/') {
        match (start.trim().parse::<i32>(), end.trim().parse::<i32>()) {
            (Ok(start), Ok(end)) => return Span::explicit(start, end),
            _ => return Span::Raw(token.to_string()),
        }
    }
    match token.parse::<u32>() {
        Ok(n) => Span::Implicit(n),
        Err(_) => Span::Raw(token.to_string()),
    }
}

/// Shorthand detection: an interior dash with neither `/` nor `:` and no
/// leading `-`. "a-b-c" becomes explicit spans a/b, b/c. Any non-numeric
/// part cancels the expansion (the token then falls through as `Raw`).
fn expand_shorthand(token: &str) -> Option<Vec<Span>> {
    if !token.contains('-')
        || token.contains('/')
        || token.contains(':')
        || token.starts_with('-')
    {
        return None;
    }
    let lines: Vec<i32> = token
        .split('-')
        .map(|part| part.trim().parse::<i32>())
        .collect::<std::result::Result<_, _>>()
        .ok()?;
    if lines.len() < 2 {
        return None;
    }
    Some(
        lines
            .windows(2)
            .map(|pair| Span::explicit(pair[0], pair[1]))
            .collect(),
    )
}
