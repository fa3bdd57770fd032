//! `.env` content parsing
//!
//! One pass over the text. Each `KEY=value` line becomes an entry, and a
//! `# ...` line directly above it becomes its comment.
//!
//! Value forms:
//! - `'single'`: taken literally, may span lines
//! - `"double"`: `\n`, `\r`, `\t`, `\\`, `\"` escapes and `$VAR`/`${VAR}`
//!   substitution, may span lines
//! - unquoted: runs to the end of the line, a ` #` starts a trailing
//!   comment, surrounding whitespace is trimmed, substitution applies
//!
//! Substitution looks at keys defined earlier in the same content first and
//! only then at the process environment. An unknown name expands to nothing;
//! `\$` is a literal dollar sign.
//!
//! A line that is not blank, not a comment and has no `=` fails the whole
//! file.

use std::collections::HashMap;

use crate::error::{EnvaultError, EnvaultResult};

use super::EnvVar;

/// Parse `.env` content into entries in file order
///
/// A key that appears more than once keeps the position of its first
/// occurrence and the value of its last.
pub fn parse(content: &[u8]) -> EnvaultResult<Vec<EnvVar>> {
    let text = std::str::from_utf8(content)
        .map_err(|e| EnvaultError::Parse(format!("content is not valid UTF-8: {}", e)))?;

    let mut vars: Vec<EnvVar> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut pending: Option<String> = None;
    let mut rest = text;
    let mut line_no = 1;

    while !rest.is_empty() {
        let (line, line_len) = split_line(rest);
        let trimmed = line.trim();

        let consumed = if trimmed.is_empty() {
            pending = None;
            line_len
        } else if let Some(comment) = trimmed.strip_prefix('#') {
            pending = Some(comment.trim().to_string());
            line_len
        } else {
            let lookup = |name: &str| -> String {
                positions
                    .get(name)
                    .map(|&i| vars[i].value.clone())
                    .or_else(|| std::env::var(name).ok())
                    .unwrap_or_default()
            };
            let (key, value, consumed) = parse_entry(rest, line_no, &lookup)?;

            let comment = pending.take().unwrap_or_default();
            match positions.get(&key) {
                Some(&index) => vars[index].value = value,
                None => {
                    positions.insert(key.clone(), vars.len());
                    vars.push(EnvVar::new(key, value).with_comment(comment));
                }
            }
            consumed
        };

        line_no += rest[..consumed].matches('\n').count();
        rest = &rest[consumed..];
    }

    tracing::debug!(count = vars.len(), "parsed env entries");

    Ok(vars)
}

fn parse_error(line_no: usize, message: &str) -> EnvaultError {
    EnvaultError::Parse(format!("line {}: {}", line_no, message))
}

/// The first line of `s` without its newline, and the bytes it spans with it
fn split_line(s: &str) -> (&str, usize) {
    match s.find('\n') {
        Some(i) => (&s[..i], i + 1),
        None => (s, s.len()),
    }
}

/// Parse one entry starting at `input`; returns key, value and bytes consumed
fn parse_entry(
    input: &str,
    line_no: usize,
    lookup: &dyn Fn(&str) -> String,
) -> EnvaultResult<(String, String, usize)> {
    let (line, line_len) = split_line(input);

    let eq = line
        .find('=')
        .ok_or_else(|| parse_error(line_no, "expected KEY=VALUE"))?;

    let mut key = line[..eq].trim();
    if let Some(stripped) = key.strip_prefix("export") {
        if stripped.starts_with(char::is_whitespace) {
            key = stripped.trim_start();
        }
    }
    if !is_valid_key(key) {
        return Err(parse_error(
            line_no,
            &format!("invalid variable name '{}'", key),
        ));
    }

    let after = &input[eq + 1..];
    let body = after.trim_start_matches(|c: char| c == ' ' || c == '\t');
    let offset = eq + 1 + (after.len() - body.len());

    match body.chars().next() {
        Some(quote @ ('\'' | '"')) => {
            let inner = &body[1..];
            let close = find_closing(inner, quote)
                .ok_or_else(|| parse_error(line_no, "unterminated quoted value"))?;
            let raw = &inner[..close];

            let value = if quote == '\'' {
                raw.to_string()
            } else {
                expand(raw, true, lookup)
            };

            let tail_start = offset + 1 + close + 1;
            let (tail, tail_len) = split_line(&input[tail_start..]);
            let tail = tail.trim();
            if !(tail.is_empty() || tail.starts_with('#')) {
                return Err(parse_error(line_no, "unexpected text after closing quote"));
            }

            Ok((key.to_string(), value, tail_start + tail_len))
        }
        _ => {
            let raw = strip_inline_comment(&line[offset..]).trim();
            Ok((key.to_string(), expand(raw, false, lookup), line_len))
        }
    }
}

fn is_valid_key(key: &str) -> bool {
    let mut chars = key.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(is_name_char)
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Index of the closing quote, skipping `\"` inside double quotes
fn find_closing(s: &str, quote: char) -> Option<usize> {
    if quote == '\'' {
        return s.find('\'');
    }

    let mut escaped = false;
    for (i, c) in s.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '"' {
            return Some(i);
        }
    }
    None
}

/// Cut an unquoted value at a `#` that follows whitespace
fn strip_inline_comment(s: &str) -> &str {
    s.char_indices()
        .find(|&(i, c)| c == '#' && s[..i].ends_with(|p: char| p == ' ' || p == '\t'))
        .map_or(s, |(i, _)| &s[..i])
}

/// Apply `$VAR`/`${VAR}` substitution, and backslash escapes when `escapes`
fn expand(raw: &str, escapes: bool, lookup: &dyn Fn(&str) -> String) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.peek().copied() {
                Some('$') => {
                    chars.next();
                    out.push('$');
                }
                Some(next) if escapes => {
                    chars.next();
                    match next {
                        'n' => out.push('\n'),
                        'r' => out.push('\r'),
                        't' => out.push('\t'),
                        other => out.push(other),
                    }
                }
                _ => out.push('\\'),
            },
            '$' => match chars.peek().copied() {
                Some('{') => {
                    chars.next();
                    let mut name = String::new();
                    let mut closed = false;
                    for c in chars.by_ref() {
                        if c == '}' {
                            closed = true;
                            break;
                        }
                        name.push(c);
                    }
                    if closed {
                        out.push_str(&lookup(&name));
                    } else {
                        out.push_str("${");
                        out.push_str(&name);
                    }
                }
                Some(next) if is_name_char(next) => {
                    let mut name = String::new();
                    while let Some(&n) = chars.peek() {
                        if !is_name_char(n) {
                            break;
                        }
                        name.push(n);
                        chars.next();
                    }
                    out.push_str(&lookup(&name));
                }
                _ => out.push('$'),
            },
            other => out.push(other),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(vars: &[EnvVar]) -> Vec<&str> {
        vars.iter().map(|v| v.key.as_str()).collect()
    }

    #[test]
    fn test_basic_pairs_in_order() {
        let vars = parse(b"ZETA=1\nALPHA=2\nMID=3\n").unwrap();
        assert_eq!(keys(&vars), vec!["ZETA", "ALPHA", "MID"]);
        assert_eq!(vars[0].value, "1");
        assert!(vars.iter().all(|v| v.enabled));
    }

    #[test]
    fn test_quoted_values() {
        let vars = parse(b"KEY1=\"quoted value\"\nKEY2='single quoted'\n").unwrap();
        assert_eq!(vars[0].value, "quoted value");
        assert_eq!(vars[1].value, "single quoted");
    }

    #[test]
    fn test_blank_lines_and_comments_are_skipped() {
        let vars = parse(b"KEY1=value1\n\n# note\nKEY2=value2").unwrap();
        assert_eq!(keys(&vars), vec!["KEY1", "KEY2"]);
    }

    #[test]
    fn test_comment_attaches_to_next_key() {
        let content = b"# Database connection\nDB_URL=postgres://x\nPLAIN=1\n";
        let vars = parse(content).unwrap();
        assert_eq!(vars[0].comment, "Database connection");
        assert_eq!(vars[1].comment, "");
    }

    #[test]
    fn test_blank_line_resets_comment() {
        let content = b"# orphaned\n\nKEY=1\n";
        let vars = parse(content).unwrap();
        assert_eq!(vars[0].comment, "");
    }

    #[test]
    fn test_last_comment_line_wins() {
        let content = b"# first\n# second\nKEY=1\n";
        let vars = parse(content).unwrap();
        assert_eq!(vars[0].comment, "second");
    }

    #[test]
    fn test_export_prefix() {
        let content = b"# exported\nexport TOKEN=abc\n";
        let vars = parse(content).unwrap();
        assert_eq!(vars[0].key, "TOKEN");
        assert_eq!(vars[0].value, "abc");
        assert_eq!(vars[0].comment, "exported");
    }

    #[test]
    fn test_duplicate_key_keeps_first_position_last_value() {
        let vars = parse(b"A=1\nB=2\nA=3\n").unwrap();
        assert_eq!(keys(&vars), vec!["A", "B"]);
        assert_eq!(vars[0].value, "3");
    }

    #[test]
    fn test_malformed_line_is_an_error() {
        let result = parse(b"GOOD=1\nthis line is not valid\n");
        assert!(matches!(result, Err(EnvaultError::Parse(_))));
    }

    #[test]
    fn test_invalid_utf8_is_an_error() {
        let result = parse(&[b'A', b'=', 0xff, 0xfe]);
        assert!(matches!(result, Err(EnvaultError::Parse(_))));
    }

    #[test]
    fn test_unquoted_value_with_spaces() {
        let vars = parse(b"A=1\nB=two words\n").unwrap();
        assert_eq!(vars[0].value, "1");
        assert_eq!(vars[1].value, "two words");
    }

    #[test]
    fn test_unquoted_value_trims_and_drops_trailing_comment() {
        let vars = parse(b"A=  padded value   # note\nB=a#b\nC=\r\n").unwrap();
        assert_eq!(vars[0].value, "padded value");
        assert_eq!(vars[1].value, "a#b");
        assert_eq!(vars[2].value, "");
    }

    #[test]
    fn test_substitution_prefers_earlier_keys_over_process_env() {
        std::env::set_var("ENVAULT_PARSER_HOST", "from-caller-env");
        let vars =
            parse(b"ENVAULT_PARSER_HOST=db.internal\nURL=postgres://${ENVAULT_PARSER_HOST}/app\n")
                .unwrap();
        std::env::remove_var("ENVAULT_PARSER_HOST");

        assert_eq!(vars[1].value, "postgres://db.internal/app");
    }

    #[test]
    fn test_substitution_falls_back_to_process_env() {
        std::env::set_var("ENVAULT_PARSER_FALLBACK", "outer");
        let vars = parse(b"A=$ENVAULT_PARSER_FALLBACK-x\nB=\"${ENVAULT_PARSER_UNSET_NAME}\"\n")
            .unwrap();
        std::env::remove_var("ENVAULT_PARSER_FALLBACK");

        assert_eq!(vars[0].value, "outer-x");
        assert_eq!(vars[1].value, "");
    }

    #[test]
    fn test_literal_dollar_forms() {
        let vars = parse(b"A='$HOME'\nB=\"\\$HOME\"\nC=\\$HOME\nD=cost $\n").unwrap();
        assert_eq!(vars[0].value, "$HOME");
        assert_eq!(vars[1].value, "$HOME");
        assert_eq!(vars[2].value, "$HOME");
        assert_eq!(vars[3].value, "cost $");
    }

    #[test]
    fn test_double_quoted_escapes() {
        let vars = parse(b"A=\"say \\\"hi\\\"\\n\"\n").unwrap();
        assert_eq!(vars[0].value, "say \"hi\"\n");
    }

    #[test]
    fn test_multi_line_quoted_value() {
        let content = b"A=\"line1\nline2\"\n# next\nB='x\ny'\nC=3\n";
        let vars = parse(content).unwrap();
        assert_eq!(vars[0].value, "line1\nline2");
        assert_eq!(vars[1].value, "x\ny");
        assert_eq!(vars[1].comment, "next");
        assert_eq!(vars[2].value, "3");
    }

    #[test]
    fn test_error_names_the_line() {
        let err = parse(b"A=1\n\nnope\n").unwrap_err();
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_unterminated_quote_is_an_error() {
        assert!(matches!(parse(b"A=\"open\nB=2\n"), Err(EnvaultError::Parse(_))));
    }

    #[test]
    fn test_invalid_key_is_an_error() {
        assert!(matches!(parse(b"1BAD=x\n"), Err(EnvaultError::Parse(_))));
        assert!(matches!(parse(b"MY KEY=x\n"), Err(EnvaultError::Parse(_))));
    }

    #[test]
    fn test_text_after_closing_quote_is_an_error() {
        assert!(matches!(parse(b"A=\"x\" y\n"), Err(EnvaultError::Parse(_))));
        assert_eq!(parse(b"A=\"x\" # fine\n").unwrap()[0].value, "x");
    }

    #[test]
    fn test_empty_content() {
        assert!(parse(b"").unwrap().is_empty());
    }
}
