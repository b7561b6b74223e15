//! Reader for PHP array-literal translation documents.
//!
//! Documents are parsed as data, never evaluated. The accepted shape is what
//! translation files contain in practice:
//!
//! ```php
//! <?php
//!
//! declare(strict_types=1);
//!
//! // comment
//! return [
//!     'login' => [
//!         'title' => 'Login',
//!     ],
//!     "count" => 3,
//! ];
//! ```
//!
//! Both `[...]` and `array(...)` are accepted. Numbers and booleans become their
//! literal text, `null` entries are skipped, and entries without a key are
//! numbered from zero. Anything else is reported as an error.

use anyhow::{Result, bail};

use crate::core::tree::{Entries, Tree};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    OpenTag,
    Ident(String),
    Str(String),
    Number(String),
    Arrow,
    Assign,
    Comma,
    Semicolon,
    LeftBracket,
    RightBracket,
    LeftParen,
    RightParen,
    Minus,
    CloseTag,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::OpenTag => "'<?php'".to_string(),
            Token::Ident(name) => format!("identifier '{}'", name),
            Token::Str(_) => "string".to_string(),
            Token::Number(n) => format!("number '{}'", n),
            Token::Arrow => "'=>'".to_string(),
            Token::Assign => "'='".to_string(),
            Token::Comma => "','".to_string(),
            Token::Semicolon => "';'".to_string(),
            Token::LeftBracket => "'['".to_string(),
            Token::RightBracket => "']'".to_string(),
            Token::LeftParen => "'('".to_string(),
            Token::RightParen => "')'".to_string(),
            Token::Minus => "'-'".to_string(),
            Token::CloseTag => "'?>'".to_string(),
        }
    }
}

struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            chars: source.chars().peekable(),
            line: 1,
        }
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next();
        if c == Some('\n') {
            self.line += 1;
        }
        c
    }

    fn eat_if(&mut self, expected: char) -> bool {
        if self.chars.peek() == Some(&expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn tokenize(mut self) -> Result<Vec<(Token, usize)>> {
        let mut tokens = Vec::new();

        while let Some(&c) = self.chars.peek() {
            let line = self.line;
            let token = match c {
                ' ' | '\t' | '\r' | '\n' => {
                    self.bump();
                    continue;
                }
                '#' => {
                    self.skip_line();
                    continue;
                }
                '/' => {
                    self.bump();
                    if self.eat_if('/') {
                        self.skip_line();
                    } else if self.eat_if('*') {
                        self.skip_block_comment()?;
                    } else {
                        bail!("line {}: unexpected '/'", line);
                    }
                    continue;
                }
                '<' => {
                    self.bump();
                    for expected in ['?', 'p', 'h', 'p'] {
                        match self.bump() {
                            Some(c) if c.to_ascii_lowercase() == expected => {}
                            _ => bail!("line {}: expected '<?php'", line),
                        }
                    }
                    Token::OpenTag
                }
                '?' => {
                    self.bump();
                    if !self.eat_if('>') {
                        bail!("line {}: unexpected '?'", line);
                    }
                    Token::CloseTag
                }
                '\'' => {
                    self.bump();
                    Token::Str(self.single_quoted(line)?)
                }
                '"' => {
                    self.bump();
                    Token::Str(self.double_quoted(line)?)
                }
                '0'..='9' | '.' => Token::Number(self.number()),
                c if c.is_alphabetic() || c == '_' || c == '\\' => Token::Ident(self.ident()),
                '=' => {
                    self.bump();
                    if self.eat_if('>') {
                        Token::Arrow
                    } else {
                        Token::Assign
                    }
                }
                ',' => self.single(Token::Comma),
                ';' => self.single(Token::Semicolon),
                '[' => self.single(Token::LeftBracket),
                ']' => self.single(Token::RightBracket),
                '(' => self.single(Token::LeftParen),
                ')' => self.single(Token::RightParen),
                '-' => self.single(Token::Minus),
                other => bail!("line {}: unexpected character '{}'", line, other),
            };
            tokens.push((token, line));
        }

        Ok(tokens)
    }

    fn single(&mut self, token: Token) -> Token {
        self.bump();
        token
    }

    fn skip_line(&mut self) {
        while let Some(&c) = self.chars.peek() {
            if c == '\n' {
                break;
            }
            self.bump();
        }
    }

    fn skip_block_comment(&mut self) -> Result<()> {
        let start = self.line;
        while let Some(c) = self.bump() {
            if c == '*' && self.eat_if('/') {
                return Ok(());
            }
        }
        bail!("line {}: unterminated comment", start)
    }

    /// Single-quoted body: only `\'` and `\\` are escapes.
    fn single_quoted(&mut self, start: usize) -> Result<String> {
        let mut value = String::new();
        while let Some(c) = self.bump() {
            match c {
                '\'' => return Ok(value),
                '\\' => match self.chars.peek() {
                    Some(&next @ ('\'' | '\\')) => {
                        self.bump();
                        value.push(next);
                    }
                    _ => value.push('\\'),
                },
                other => value.push(other),
            }
        }
        bail!("line {}: unterminated string", start)
    }

    fn double_quoted(&mut self, start: usize) -> Result<String> {
        let mut value = String::new();
        while let Some(c) = self.bump() {
            match c {
                '"' => return Ok(value),
                '$' => bail!("line {}: interpolated strings are not supported", start),
                '\\' => {
                    let Some(next) = self.bump() else { break };
                    match next {
                        'n' => value.push('\n'),
                        't' => value.push('\t'),
                        'r' => value.push('\r'),
                        'v' => value.push('\u{0b}'),
                        'e' => value.push('\u{1b}'),
                        'f' => value.push('\u{0c}'),
                        '0' => value.push('\0'),
                        '\\' | '"' | '$' => value.push(next),
                        other => {
                            value.push('\\');
                            value.push(other);
                        }
                    }
                }
                other => value.push(other),
            }
        }
        bail!("line {}: unterminated string", start)
    }

    fn number(&mut self) -> String {
        let mut text = String::new();
        while let Some(&c) = self.chars.peek() {
            if c.is_ascii_alphanumeric() || c == '.' || c == '_' {
                text.push(c);
                self.bump();
            } else {
                break;
            }
        }
        text
    }

    fn ident(&mut self) -> String {
        let mut text = String::new();
        while let Some(&c) = self.chars.peek() {
            if c.is_alphanumeric() || c == '_' || c == '\\' {
                text.push(c);
                self.bump();
            } else {
                break;
            }
        }
        text
    }
}

/// A scalar or array value in the document.
enum Value {
    Text(String),
    Null,
    Array(Entries),
}

struct Parser {
    tokens: Vec<(Token, usize)>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(token, _)| token)
    }

    fn line(&self) -> usize {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map(|(_, line)| *line)
            .unwrap_or(1)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).map(|(token, _)| token.clone());
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, expected: &Token) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: Token) -> Result<()> {
        let line = self.line();
        match self.next() {
            Some(token) if token == expected => Ok(()),
            Some(token) => bail!(
                "line {}: expected {}, found {}",
                line,
                expected.describe(),
                token.describe()
            ),
            None => bail!("line {}: expected {}, found end of file", line, expected.describe()),
        }
    }

    fn is_ident(&self, name: &str) -> bool {
        matches!(self.peek(), Some(Token::Ident(ident)) if ident.eq_ignore_ascii_case(name))
    }

    /// `<?php`, any `declare(...);` statements, then `return <array>;`.
    fn document(&mut self) -> Result<Entries> {
        self.expect(Token::OpenTag)?;

        while self.is_ident("declare") {
            self.pos += 1;
            self.skip_parenthesized()?;
            self.expect(Token::Semicolon)?;
        }

        if !self.is_ident("return") {
            let line = self.line();
            bail!("line {}: expected 'return' statement", line);
        }
        self.pos += 1;

        let entries = match self.value()? {
            Value::Array(entries) => entries,
            _ => bail!("document must return an array"),
        };

        self.expect(Token::Semicolon)?;
        self.eat(&Token::CloseTag);

        if let Some(token) = self.peek() {
            let line = self.line();
            bail!("line {}: unexpected {} after return", line, token.describe());
        }

        Ok(entries)
    }

    fn skip_parenthesized(&mut self) -> Result<()> {
        self.expect(Token::LeftParen)?;
        let mut depth = 1;
        while depth > 0 {
            match self.next() {
                Some(Token::LeftParen) => depth += 1,
                Some(Token::RightParen) => depth -= 1,
                Some(_) => {}
                None => bail!("unbalanced parentheses"),
            }
        }
        Ok(())
    }

    fn value(&mut self) -> Result<Value> {
        let line = self.line();
        match self.next() {
            Some(Token::Str(s)) => Ok(Value::Text(s)),
            Some(Token::Number(n)) => Ok(Value::Text(n)),
            Some(Token::Minus) => match self.next() {
                Some(Token::Number(n)) => Ok(Value::Text(format!("-{}", n))),
                _ => bail!("line {}: expected number after '-'", line),
            },
            Some(Token::LeftBracket) => self.array_body(Token::RightBracket).map(Value::Array),
            Some(Token::Ident(ident)) => match ident.to_ascii_lowercase().as_str() {
                "array" => {
                    self.expect(Token::LeftParen)?;
                    self.array_body(Token::RightParen).map(Value::Array)
                }
                "true" | "false" => Ok(Value::Text(ident.to_ascii_lowercase())),
                "null" => Ok(Value::Null),
                _ => bail!("line {}: unsupported expression '{}'", line, ident),
            },
            Some(token) => bail!("line {}: unexpected {}", line, token.describe()),
            None => bail!("line {}: unexpected end of file", line),
        }
    }

    fn array_body(&mut self, close: Token) -> Result<Entries> {
        let mut entries = Entries::new();
        // `None` once the largest integer key has been used.
        let mut next_index: Option<i64> = Some(0);

        loop {
            if self.eat(&close) {
                return Ok(entries);
            }

            let first = self.value()?;
            let line = self.line();
            let (key, value) = if self.eat(&Token::Arrow) {
                let key = match first {
                    Value::Text(key) => key,
                    _ => bail!("line {}: array keys must be strings or integers", line),
                };
                if let Ok(index) = key.parse::<i64>() {
                    next_index = match (next_index, index.checked_add(1)) {
                        (Some(next), Some(after)) => Some(next.max(after)),
                        _ => None,
                    };
                }
                (key, self.value()?)
            } else {
                let Some(index) = next_index else {
                    bail!("line {}: array index overflow", line);
                };
                next_index = index.checked_add(1);
                (index.to_string(), first)
            };

            match value {
                Value::Text(text) => {
                    entries.insert(key, Tree::Leaf(text));
                }
                Value::Array(children) => {
                    entries.insert(key, Tree::Node(children));
                }
                Value::Null => {}
            }

            if !self.eat(&Token::Comma) {
                self.expect(close.clone())?;
                return Ok(entries);
            }
        }
    }
}

/// Parse a PHP translation document into its top-level entries.
pub fn parse_document(source: &str) -> Result<Entries> {
    let tokens = Lexer::new(source).tokenize()?;
    Parser { tokens, pos: 0 }.document()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn leaf(value: &str) -> Tree {
        Tree::Leaf(value.to_string())
    }

    #[test]
    fn test_parse_nested_document() {
        let source = r#"<?php

/**
 * Translation file: auth
 */

return [
    'login' => [
        'title' => 'Login',
        'button' => "Sign In",
    ],
    'failed' => 'These credentials do not match our records.',
];
"#;
        let entries = parse_document(source).unwrap();
        let tree = Tree::Node(entries);

        assert_eq!(tree.get_path(&["login", "title"]), Some(&leaf("Login")));
        assert_eq!(tree.get_path(&["login", "button"]), Some(&leaf("Sign In")));
        assert_eq!(
            tree.get_path(&["failed"]),
            Some(&leaf("These credentials do not match our records."))
        );
    }

    #[test]
    fn test_parse_long_array_syntax_and_declare() {
        let source = "<?php\ndeclare(strict_types=1);\n# hash comment\nreturn array(\n  'a' => array('b' => 'c'),\n);";
        let tree = Tree::Node(parse_document(source).unwrap());

        assert_eq!(tree.get_path(&["a", "b"]), Some(&leaf("c")));
    }

    #[test]
    fn test_parse_escapes() {
        let source = r#"<?php return [
    'quote' => 'It\'s a \\ backslash',
    'literal' => 'keeps \n as is',
    "double" => "line\nbreak \"quoted\"",
];"#;
        let entries = parse_document(source).unwrap();

        assert_eq!(entries["quote"], leaf(r"It's a \ backslash"));
        assert_eq!(entries["literal"], leaf(r"keeps \n as is"));
        assert_eq!(entries["double"], leaf("line\nbreak \"quoted\""));
    }

    #[test]
    fn test_parse_scalars_and_auto_index() {
        let source = "<?php return ['count' => 3, 'ratio' => -1.5, 'on' => TRUE, 'gone' => null, 'list' => ['x', 'y'], 5 => 'five', 'six'];";
        let entries = parse_document(source).unwrap();

        assert_eq!(entries["count"], leaf("3"));
        assert_eq!(entries["ratio"], leaf("-1.5"));
        assert_eq!(entries["on"], leaf("true"));
        assert!(!entries.contains_key("gone"));
        assert_eq!(
            entries["list"],
            Tree::Node(
                [("0".to_string(), leaf("x")), ("1".to_string(), leaf("y"))]
                    .into_iter()
                    .collect()
            )
        );
        assert_eq!(entries["5"], leaf("five"));
        assert_eq!(entries["6"], leaf("six"));
    }

    #[test]
    fn test_largest_index_cannot_be_followed_by_auto_index() {
        let err = parse_document("<?php return [9223372036854775807 => 'x', 'y'];").unwrap_err();
        assert!(err.to_string().contains("array index overflow"));

        let entries = parse_document("<?php return ['y', 9223372036854775807 => 'x'];").unwrap();
        assert_eq!(entries["0"], leaf("y"));
        assert_eq!(entries["9223372036854775807"], leaf("x"));
    }

    #[test]
    fn test_empty_array() {
        assert!(parse_document("<?php return [];").unwrap().is_empty());
    }

    #[test]
    fn test_rejects_code() {
        let err = parse_document("<?php return ['a' => strtoupper('b')];").unwrap_err();
        assert!(err.to_string().contains("unsupported expression"));

        assert!(parse_document("<?php echo 'x';").is_err());
        assert!(parse_document("return [];").is_err());
        assert!(parse_document("<?php return ['a' => 'b'];\n$x = 1;").is_err());
        assert!(parse_document("<?php return ['a' => \"hi $name\"];").is_err());
    }

    #[test]
    fn test_rejects_truncated_document() {
        let err = parse_document("<?php\nreturn [\n    'a' => 'b',\n").unwrap_err();
        assert!(err.to_string().contains("end of file"));

        assert!(parse_document("<?php return ['a' => 'unterminated];").is_err());
    }
}
