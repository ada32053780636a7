//! Reader for the Python-literal text found in nested CSV columns.
//!
//! Columns such as `genres` hold values like
//! `[{'id': 28, 'name': 'Action'}, {'id': 35, 'name': 'Comedy'}]`.
//! This is close to JSON but uses single quotes, `True`/`False`/`None` and
//! tuples, so it is parsed here into a [`serde_json::Value`] tree.

use serde_json::{Map, Number, Value};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LiteralError {
    #[error("unexpected end of input")]
    UnexpectedEnd,
    #[error("unexpected character {found:?} at offset {offset}")]
    Unexpected { found: char, offset: usize },
    #[error("invalid number {0:?}")]
    InvalidNumber(String),
    #[error("invalid escape sequence at offset {0}")]
    InvalidEscape(usize),
    #[error("trailing characters at offset {0}")]
    Trailing(usize),
    #[error("nesting deeper than {0} levels")]
    TooDeep(usize),
}

/// Containers nested deeper than this are rejected instead of recursing.
pub const MAX_DEPTH: usize = 64;

/// Parse one literal. The whole input must be consumed, surrounding
/// whitespace excepted.
pub fn parse_literal(text: &str) -> Result<Value, LiteralError> {
    let mut reader = Reader {
        chars: text.chars().collect(),
        pos: 0,
        depth: 0,
    };
    let value = reader.value()?;
    reader.skip_ws();
    if reader.pos < reader.chars.len() {
        return Err(LiteralError::Trailing(reader.pos));
    }
    Ok(value)
}

struct Reader {
    chars: Vec<char>,
    pos: usize,
    depth: usize,
}

impl Reader {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Result<char, LiteralError> {
        let c = self.peek().ok_or(LiteralError::UnexpectedEnd)?;
        self.pos += 1;
        Ok(c)
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn unexpected(&self, found: char) -> LiteralError {
        LiteralError::Unexpected {
            found,
            offset: self.pos,
        }
    }

    fn value(&mut self) -> Result<Value, LiteralError> {
        self.skip_ws();
        match self.peek() {
            None => Err(LiteralError::UnexpectedEnd),
            Some(open @ ('[' | '(' | '{')) => {
                self.pos += 1;
                self.depth += 1;
                if self.depth > MAX_DEPTH {
                    return Err(LiteralError::TooDeep(MAX_DEPTH));
                }
                let value = self.container(open)?;
                self.depth -= 1;
                Ok(value)
            }
            Some(q @ ('\'' | '"')) => {
                self.pos += 1;
                self.string(q, false).map(Value::String)
            }
            Some(c) if c.is_ascii_digit() || matches!(c, '-' | '+' | '.') => self.number(),
            Some(c) if c.is_alphabetic() || c == '_' => self.keyword(),
            Some(c) => Err(self.unexpected(c)),
        }
    }

    /// Body of a list, tuple or dict whose opening bracket was consumed.
    fn container(&mut self, open: char) -> Result<Value, LiteralError> {
        match open {
            '[' => self.sequence(']').map(|(items, _)| Value::Array(items)),
            '(' => {
                let (mut items, trailing_comma) = self.sequence(')')?;
                // `(x)` is just a parenthesised value, `(x,)` is a tuple.
                if items.len() == 1 && !trailing_comma {
                    Ok(items.remove(0))
                } else {
                    Ok(Value::Array(items))
                }
            }
            _ => self.mapping(),
        }
    }

    /// Comma-separated values up to `close`. Also reports whether the last
    /// element was followed by a comma.
    fn sequence(&mut self, close: char) -> Result<(Vec<Value>, bool), LiteralError> {
        let mut items = Vec::new();
        let mut trailing_comma = false;
        loop {
            self.skip_ws();
            if self.peek() == Some(close) {
                self.pos += 1;
                return Ok((items, trailing_comma));
            }
            items.push(self.value()?);
            self.skip_ws();
            match self.bump()? {
                ',' => trailing_comma = true,
                c if c == close => return Ok((items, false)),
                c => {
                    self.pos -= 1;
                    return Err(self.unexpected(c));
                }
            }
        }
    }

    fn mapping(&mut self) -> Result<Value, LiteralError> {
        let mut map = Map::new();
        loop {
            self.skip_ws();
            if self.peek() == Some('}') {
                self.pos += 1;
                return Ok(Value::Object(map));
            }
            let key = match self.value()? {
                Value::String(s) => s,
                other => other.to_string(),
            };
            self.skip_ws();
            match self.bump()? {
                ':' => {}
                c => {
                    self.pos -= 1;
                    return Err(self.unexpected(c));
                }
            }
            let value = self.value()?;
            map.insert(key, value);
            self.skip_ws();
            match self.bump()? {
                ',' => {}
                '}' => return Ok(Value::Object(map)),
                c => {
                    self.pos -= 1;
                    return Err(self.unexpected(c));
                }
            }
        }
    }

    /// Body of a quoted string. Raw strings keep backslashes as written.
    fn string(&mut self, quote: char, raw: bool) -> Result<String, LiteralError> {
        let mut out = String::new();
        loop {
            match self.bump()? {
                c if c == quote => return Ok(out),
                '\\' if raw => {
                    out.push('\\');
                    out.push(self.bump()?);
                }
                '\\' => {
                    let start = self.pos - 1;
                    match self.bump()? {
                        '\\' => out.push('\\'),
                        '\'' => out.push('\''),
                        '"' => out.push('"'),
                        'n' => out.push('\n'),
                        't' => out.push('\t'),
                        'r' => out.push('\r'),
                        '\n' => {}
                        d @ '0'..='7' => out.push(self.octal_escape(d)),
                        'x' => out.push(self.hex_escape(2, start)?),
                        'u' => out.push(self.hex_escape(4, start)?),
                        'U' => out.push(self.hex_escape(8, start)?),
                        // Unknown escapes are kept verbatim.
                        other => {
                            out.push('\\');
                            out.push(other);
                        }
                    }
                }
                c => out.push(c),
            }
        }
    }

    /// Up to three octal digits, the first already consumed.
    fn octal_escape(&mut self, first: char) -> char {
        let mut code = first.to_digit(8).unwrap_or(0);
        for _ in 0..2 {
            match self.peek().and_then(|c| c.to_digit(8)) {
                Some(d) => {
                    code = code * 8 + d;
                    self.pos += 1;
                }
                None => break,
            }
        }
        // At most 0o777, always a valid scalar value.
        char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    fn hex_escape(&mut self, digits: usize, start: usize) -> Result<char, LiteralError> {
        let mut code = 0u32;
        for _ in 0..digits {
            let d = self
                .bump()?
                .to_digit(16)
                .ok_or(LiteralError::InvalidEscape(start))?;
            code = code * 16 + d;
        }
        char::from_u32(code).ok_or(LiteralError::InvalidEscape(start))
    }

    fn number(&mut self) -> Result<Value, LiteralError> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '+' | '_'))
        {
            self.pos += 1;
        }
        let raw: String = self.chars[start..self.pos].iter().collect();
        let cleaned = raw.replace('_', "");
        if let Some(int) = radix_int(&cleaned) {
            return int.map(Value::from).ok_or(LiteralError::InvalidNumber(raw));
        }
        if let Ok(i) = cleaned.parse::<i64>() {
            return Ok(Value::from(i));
        }
        cleaned
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or(LiteralError::InvalidNumber(raw))
    }

    fn keyword(&mut self) -> Result<Value, LiteralError> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '_')
        {
            self.pos += 1;
        }
        let word: String = self.chars[start..self.pos].iter().collect();
        match word.as_str() {
            "True" => Ok(Value::Bool(true)),
            "False" => Ok(Value::Bool(false)),
            "None" => Ok(Value::Null),
            "u" | "U" | "r" | "R" => match self.peek() {
                Some(q @ ('\'' | '"')) => {
                    self.pos += 1;
                    let raw = matches!(word.as_str(), "r" | "R");
                    self.string(q, raw).map(Value::String)
                }
                _ => Err(LiteralError::Unexpected {
                    found: self.chars[start],
                    offset: start,
                }),
            },
            _ => Err(LiteralError::Unexpected {
                found: self.chars[start],
                offset: start,
            }),
        }
    }
}

/// `0x1c`, `-0o17`, `0b101`. `None` when `text` has no radix prefix,
/// `Some(None)` when it has one but the digits do not fit.
fn radix_int(text: &str) -> Option<Option<i64>> {
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let radix = match unsigned.get(..2).map(str::to_ascii_lowercase).as_deref() {
        Some("0x") => 16,
        Some("0o") => 8,
        Some("0b") => 2,
        _ => return None,
    };
    let digits = &unsigned[2..];
    if digits.is_empty() || digits.starts_with(|c| c == '+' || c == '-') {
        return Some(None);
    }
    Some(
        i64::from_str_radix(digits, radix)
            .ok()
            .map(|i| if negative { -i } else { i }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parses_genre_list() {
        let v = parse_literal("[{'id': 16, 'name': 'Animation'}, {'id': 35, 'name': \"Comedy\"}]")
            .unwrap();
        assert_eq!(
            v,
            json!([{"id": 16, "name": "Animation"}, {"id": 35, "name": "Comedy"}])
        );
    }

    #[test]
    fn test_keywords_and_numbers() {
        assert_eq!(
            parse_literal("[True, False, None, -3, 2.5, 1e3]").unwrap(),
            json!([true, false, null, -3, 2.5, 1000.0])
        );
    }

    #[test]
    fn test_tuples_and_parentheses() {
        assert_eq!(parse_literal("(1, 2)").unwrap(), json!([1, 2]));
        assert_eq!(parse_literal("(1,)").unwrap(), json!([1]));
        assert_eq!(parse_literal("(1)").unwrap(), json!(1));
        assert_eq!(parse_literal("()").unwrap(), json!([]));
    }

    #[test]
    fn test_escapes_inside_strings() {
        assert_eq!(
            parse_literal(r"'Children\'s Films'").unwrap(),
            json!("Children's Films")
        );
        assert_eq!(parse_literal(r"'caf\xe9'").unwrap(), json!("café"));
        assert_eq!(parse_literal(r"'a\qb'").unwrap(), json!("a\\qb"));
    }

    #[test]
    fn test_trailing_commas_are_accepted() {
        assert_eq!(parse_literal("[1, 2,]").unwrap(), json!([1, 2]));
        assert_eq!(parse_literal("{'a': 1,}").unwrap(), json!({"a": 1}));
    }

    #[test]
    fn test_non_string_keys_are_stringified() {
        assert_eq!(parse_literal("{1: 'x'}").unwrap(), json!({"1": "x"}));
    }

    #[test]
    fn test_rejects_malformed_input() {
        assert_eq!(parse_literal(""), Err(LiteralError::UnexpectedEnd));
        assert_eq!(parse_literal("[1, 2"), Err(LiteralError::UnexpectedEnd));
        assert_eq!(parse_literal("'open"), Err(LiteralError::UnexpectedEnd));
        assert!(matches!(
            parse_literal("not valid data"),
            Err(LiteralError::Unexpected { found: 'n', offset: 0 })
        ));
        assert_eq!(parse_literal("[1] [2]"), Err(LiteralError::Trailing(4)));
        assert!(matches!(
            parse_literal("{'a' 1}"),
            Err(LiteralError::Unexpected { found: '1', .. })
        ));
        assert!(matches!(parse_literal("1.2.3"), Err(LiteralError::InvalidNumber(_))));
        assert!(matches!(parse_literal("0x"), Err(LiteralError::InvalidNumber(_))));
        assert!(matches!(parse_literal("0b12"), Err(LiteralError::InvalidNumber(_))));
    }

    #[test]
    fn test_deep_nesting_is_rejected() {
        let deep = "[".repeat(200_000);
        assert_eq!(parse_literal(&deep), Err(LiteralError::TooDeep(MAX_DEPTH)));

        let closed = format!("{}{}", "[".repeat(MAX_DEPTH + 1), "]".repeat(MAX_DEPTH + 1));
        assert_eq!(parse_literal(&closed), Err(LiteralError::TooDeep(MAX_DEPTH)));

        let allowed = format!("{}{}", "[".repeat(MAX_DEPTH), "]".repeat(MAX_DEPTH));
        assert!(parse_literal(&allowed).is_ok());
    }

    #[test]
    fn test_string_prefixes() {
        assert_eq!(parse_literal("u'Action'").unwrap(), json!("Action"));
        assert_eq!(parse_literal(r"r'a\nb'").unwrap(), json!("a\\nb"));
        assert_eq!(parse_literal(r"R'it\'s'").unwrap(), json!("it\\'s"));
        assert!(parse_literal("x'Action'").is_err());
    }

    #[test]
    fn test_octal_escapes() {
        assert_eq!(parse_literal(r"'\012'").unwrap(), json!("\n"));
        assert_eq!(parse_literal(r"'\0'").unwrap(), json!("\0"));
        assert_eq!(parse_literal(r"'\1018'").unwrap(), json!("A8"));
    }

    #[test]
    fn test_radix_integers() {
        assert_eq!(parse_literal("[0x1c, 0o17, 0b101, -0X1F]").unwrap(), json!([28, 15, 5, -31]));
    }
}
