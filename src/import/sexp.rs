//! Minimal S-expression reader for tileset descriptions.

use std::{iter::Peekable, str::Chars};

use crate::error::ImportError;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    List(Vec<Value>),
    Symbol(String),
    String(String),
    Integer(i64),
    Real(f64),
    Boolean(bool),
}

impl Value {
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Value::Symbol(sym) => Some(sym),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// The leading symbol of a list, `foo` in `(foo ...)`
    pub fn head(&self) -> Option<&str> {
        return self.as_list()?.first()?.as_symbol();
    }

    /// Everything after the leading symbol
    pub fn tail(&self) -> &[Value] {
        return self.as_list().and_then(|items| items.get(1..)).unwrap_or(&[]);
    }

    /// The first child list headed by `key`
    pub fn find(&self, key: &str) -> Option<&Value> {
        return self.tail().iter().find(|child| child.head() == Some(key));
    }
}

/// Parses a single top-level expression
pub fn parse(src: &str) -> Result<Value, ImportError> {
    let mut reader = Reader::new(src);
    reader.skip_blank();
    let value = reader.value()?;
    reader.skip_blank();
    if reader.peek().is_some() {
        return Err(reader.error("unexpected data after top-level expression"));
    }
    return Ok(value);
}

/// Deepest list nesting accepted before giving up
const MAX_DEPTH: usize = 256;

struct Reader<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
    column: usize,
    depth: usize,
}

impl<'a> Reader<'a> {
    fn new(src: &'a str) -> Self {
        return Self {
            chars: src.chars().peekable(),
            line: 1,
            column: 1,
            depth: 0,
        };
    }

    fn error(&self, message: impl Into<String>) -> ImportError {
        return ImportError::Syntax {
            line: self.line,
            column: self.column,
            message: message.into(),
        };
    }

    fn peek(&mut self) -> Option<char> {
        return self.chars.peek().copied();
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        return Some(c);
    }

    fn skip_blank(&mut self) {
        while let Some(c) = self.peek() {
            if c == ';' {
                while !matches!(self.bump(), Some('\n') | None) {}
            } else if c.is_whitespace() {
                self.bump();
            } else {
                break;
            }
        }
    }

    fn value(&mut self) -> Result<Value, ImportError> {
        match self.peek() {
            None => Err(self.error("unexpected end of input")),
            Some('(') => self.list(),
            Some(')') => Err(self.error("unexpected `)`")),
            Some('"') => self.string(),
            Some(_) => self.atom(),
        }
    }

    fn list(&mut self) -> Result<Value, ImportError> {
        if self.depth >= MAX_DEPTH {
            return Err(self.error("lists nested too deeply"));
        }
        self.bump();
        self.depth += 1;
        let mut items = Vec::new();
        loop {
            self.skip_blank();
            match self.peek() {
                None => return Err(self.error("unclosed `(`")),
                Some(')') => {
                    self.bump();
                    self.depth -= 1;
                    return Ok(Value::List(items));
                }
                Some(_) => items.push(self.value()?),
            }
        }
    }

    fn string(&mut self) -> Result<Value, ImportError> {
        self.bump();
        let mut s = String::new();
        loop {
            match self.bump() {
                None => return Err(self.error("unterminated string")),
                Some('"') => return Ok(Value::String(s)),
                Some('\\') => match self.bump() {
                    Some('n') => s.push('\n'),
                    Some('t') => s.push('\t'),
                    Some(c @ ('"' | '\\')) => s.push(c),
                    Some(c) => return Err(self.error(format!("unknown escape `\\{c}`"))),
                    None => return Err(self.error("unterminated string")),
                },
                Some(c) => s.push(c),
            }
        }
    }

    fn atom(&mut self) -> Result<Value, ImportError> {
        let mut token = String::new();
        while let Some(c) = self.peek() {
            if c.is_whitespace() || matches!(c, '(' | ')' | '"' | ';') {
                break;
            }
            token.push(c);
            self.bump();
        }
        return match token.as_str() {
            "#t" => Ok(Value::Boolean(true)),
            "#f" => Ok(Value::Boolean(false)),
            _ if token.starts_with('#') => Err(self.error(format!("unknown literal `{token}`"))),
            _ => {
                if let Ok(i) = token.parse::<i64>() {
                    Ok(Value::Integer(i))
                } else if let Some(r) = token
                    .parse::<f64>()
                    .ok()
                    .filter(|_| token.starts_with(|c: char| c.is_ascii_digit() || c == '-' || c == '.'))
                {
                    Ok(Value::Real(r))
                } else {
                    Ok(Value::Symbol(token))
                }
            }
        };
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn nested_lists_and_atoms() {
        let value = parse(r#"(root (ids 1 2 -3) (name "a \"b\"") (on #t) (scale 0.5) sym)"#).unwrap();
        assert_eq!(value.head(), Some("root"));
        let ids: Vec<i64> = value.find("ids").unwrap().tail().iter().filter_map(Value::as_int).collect();
        assert_eq!(ids, vec![1, 2, -3]);
        assert_eq!(value.find("name").unwrap().tail()[0].as_str(), Some("a \"b\""));
        assert_eq!(value.find("on").unwrap().tail()[0].as_bool(), Some(true));
        assert_eq!(value.find("scale").unwrap().tail()[0], Value::Real(0.5));
        assert_eq!(value.tail().last().and_then(Value::as_symbol), Some("sym"));
    }

    #[test]
    fn comments_are_skipped() {
        let value = parse("; header\n(a ; inline\n 1)\n; trailer").unwrap();
        assert_eq!(value.tail(), &[Value::Integer(1)]);
    }

    #[test]
    fn dashed_symbols_are_not_numbers() {
        let value = parse("(supertux-tiles -)").unwrap();
        assert_eq!(value.head(), Some("supertux-tiles"));
        assert_eq!(value.tail()[0].as_symbol(), Some("-"));
    }

    #[test]
    fn unclosed_list_reports_position() {
        match parse("(a\n  (b 1)") {
            Err(ImportError::Syntax { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn deep_nesting_is_an_error() {
        let src = "(".repeat(1_000_000);
        match parse(&src) {
            Err(ImportError::Syntax { line, column, .. }) => {
                assert_eq!(line, 1);
                assert_eq!(column, MAX_DEPTH + 1);
            }
            other => panic!("expected syntax error, got {other:?}"),
        }
        let ok = format!("{}{}", "(".repeat(MAX_DEPTH), ")".repeat(MAX_DEPTH));
        assert!(parse(&ok).is_ok());
    }

    #[test]
    fn stray_close_paren() {
        assert!(matches!(parse(")"), Err(ImportError::Syntax { .. })));
        assert!(matches!(parse("(a) b"), Err(ImportError::Syntax { .. })));
    }

    #[test]
    fn unterminated_string() {
        assert!(matches!(parse("(a \"oops)"), Err(ImportError::Syntax { .. })));
    }

    #[test]
    fn find_misses() {
        let value = parse("(a (b 1))").unwrap();
        assert!(value.find("c").is_none());
        assert!(Value::Integer(3).tail().is_empty());
    }
}
