//! A hand-written character-at-a-time scanner, in the style of the
//! reference tokenizer: single-char punctuation, `:-` as one token, and a
//! longest-match scan for the symbolic operators.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("{message} (line {line}, column {col})")]
pub struct SyntaxError {
    pub line: usize,
    pub col: usize,
    pub message: String,
}

impl SyntaxError {
    fn at(line: usize, col: usize, message: impl Into<String>) -> Self {
        SyntaxError {
            line,
            col,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Atom(String),
    Var(String),
    Int(i64),
    Float(f64),
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Bar,
    Dot,
    /// `:-`
    Rule,
    /// One of the symbolic infix/prefix operators: `+ - * / // ^ ** = \= =:= =\= < =< > >=`.
    Op(String),
    Eof,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub col: usize,
}

/// Three-character operator lexemes, tried before any shorter candidate.
const THREE_CHAR_OPS: &[&str] = &["=:=", "=\\="];
/// Two-character operator lexemes.
const TWO_CHAR_OPS: &[&str] = &["**", "//", "=<", ">=", "\\="];

pub struct Lexer {
    chars: Vec<char>,
    i: usize,
    line: usize,
    col: usize,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Lexer {
            chars: source.chars().collect(),
            i: 0,
            line: 1,
            col: 1,
        }
    }

    /// Scans the whole source into a token vector, ending in exactly one `Eof`.
    pub fn tokenize(mut self) -> Result<Vec<Token>, SyntaxError> {
        let mut tokens = Vec::new();
        loop {
            let tok = self.next_token()?;
            let at_end = tok.kind == TokenKind::Eof;
            tokens.push(tok);
            if at_end {
                return Ok(tokens);
            }
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.i).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.i + offset).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.i += 1;
        if ch == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    fn advance_n(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    fn matches_str(&self, s: &str) -> bool {
        s.chars().enumerate().all(|(i, c)| self.peek_at(i) == Some(c))
    }

    /// Skips whitespace and `%`-to-end-of-line comments.
    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.advance();
                }
                Some('%') => {
                    while !matches!(self.peek(), None | Some('\n')) {
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    fn next_token(&mut self) -> Result<Token, SyntaxError> {
        self.skip_trivia();
        let (line, col) = (self.line, self.col);
        let Some(ch) = self.peek() else {
            return Ok(Token { kind: TokenKind::Eof, line, col });
        };

        match ch {
            '(' => self.single(TokenKind::LParen, line, col),
            ')' => self.single(TokenKind::RParen, line, col),
            '[' => self.single(TokenKind::LBracket, line, col),
            ']' => self.single(TokenKind::RBracket, line, col),
            ',' => self.single(TokenKind::Comma, line, col),
            '|' => self.single(TokenKind::Bar, line, col),
            '!' => self.single(TokenKind::Atom("!".to_string()), line, col),
            ';' => self.single(TokenKind::Atom(";".to_string()), line, col),
            ':' => {
                self.advance();
                if self.peek() == Some('-') {
                    self.advance();
                    Ok(Token { kind: TokenKind::Rule, line, col })
                } else {
                    Err(SyntaxError::at(line, col, "expected '-' after ':'"))
                }
            }
            '.' => {
                self.advance();
                Ok(Token { kind: TokenKind::Dot, line, col })
            }
            '\'' => self.consume_quoted_atom(line, col),
            '_' => {
                let ident = self.consume_ident();
                Ok(Token { kind: TokenKind::Var(ident), line, col })
            }
            c if c.is_alphabetic() && c.is_uppercase() => {
                let ident = self.consume_ident();
                Ok(Token { kind: TokenKind::Var(ident), line, col })
            }
            c if c.is_alphabetic() && c.is_lowercase() => {
                let ident = self.consume_ident();
                Ok(Token { kind: TokenKind::Atom(ident), line, col })
            }
            c if c.is_ascii_digit() => self.consume_number(line, col),
            '+' | '-' | '*' | '/' | '^' | '=' | '<' | '>' | '\\' => {
                self.consume_symbol_operator(line, col)
            }
            other => Err(SyntaxError::at(line, col, format!("unexpected character '{other}'"))),
        }
    }

    fn single(&mut self, kind: TokenKind, line: usize, col: usize) -> Result<Token, SyntaxError> {
        self.advance();
        Ok(Token { kind, line, col })
    }

    fn consume_ident(&mut self) -> String {
        let mut s = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                s.push(c);
                self.advance();
            } else {
                break;
            }
        }
        s
    }

    fn consume_number(&mut self, line: usize, col: usize) -> Result<Token, SyntaxError> {
        let mut s = String::new();
        while let Some(c) = self.peek().filter(|c| c.is_ascii_digit()) {
            s.push(c);
            self.advance();
        }
        if self.peek() == Some('.') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
            s.push('.');
            self.advance();
            while let Some(c) = self.peek().filter(|c| c.is_ascii_digit()) {
                s.push(c);
                self.advance();
            }
            let value: f64 = s
                .parse()
                .map_err(|_| SyntaxError::at(line, col, format!("invalid float literal '{s}'")))?;
            return Ok(Token { kind: TokenKind::Float(value), line, col });
        }
        let value: i64 = s
            .parse()
            .map_err(|_| SyntaxError::at(line, col, format!("invalid integer literal '{s}'")))?;
        Ok(Token { kind: TokenKind::Int(value), line, col })
    }

    fn consume_quoted_atom(&mut self, line: usize, col: usize) -> Result<Token, SyntaxError> {
        self.advance();
        let mut s = String::new();
        loop {
            match self.advance() {
                Some('\'') => return Ok(Token { kind: TokenKind::Atom(s), line, col }),
                Some(c) => s.push(c),
                None => return Err(SyntaxError::at(line, col, "unterminated quoted atom")),
            }
        }
    }

    fn consume_symbol_operator(&mut self, line: usize, col: usize) -> Result<Token, SyntaxError> {
        for candidate in THREE_CHAR_OPS {
            if self.matches_str(candidate) {
                self.advance_n(candidate.chars().count());
                return Ok(Token { kind: TokenKind::Op(candidate.to_string()), line, col });
            }
        }
        for candidate in TWO_CHAR_OPS {
            if self.matches_str(candidate) {
                self.advance_n(candidate.chars().count());
                return Ok(Token { kind: TokenKind::Op(candidate.to_string()), line, col });
            }
        }
        let ch = self.advance().expect("caller already peeked this character");
        Ok(Token { kind: TokenKind::Op(ch.to_string()), line, col })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        Lexer::new(src)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn recognises_facts_and_rules() {
        assert_eq!(
            kinds("parent(tom, bob)."),
            vec![
                TokenKind::Atom("parent".into()),
                TokenKind::LParen,
                TokenKind::Atom("tom".into()),
                TokenKind::Comma,
                TokenKind::Atom("bob".into()),
                TokenKind::RParen,
                TokenKind::Dot,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn recognises_rule_arrow_and_vars() {
        assert_eq!(
            kinds("p(X) :- q(X)."),
            vec![
                TokenKind::Atom("p".into()),
                TokenKind::LParen,
                TokenKind::Var("X".into()),
                TokenKind::RParen,
                TokenKind::Rule,
                TokenKind::Atom("q".into()),
                TokenKind::LParen,
                TokenKind::Var("X".into()),
                TokenKind::RParen,
                TokenKind::Dot,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn longest_match_prefers_three_char_operators() {
        assert_eq!(
            kinds("X =:= Y"),
            vec![
                TokenKind::Var("X".into()),
                TokenKind::Op("=:=".into()),
                TokenKind::Var("Y".into()),
                TokenKind::Eof,
            ]
        );
        assert_eq!(
            kinds("X =\\= Y"),
            vec![
                TokenKind::Var("X".into()),
                TokenKind::Op("=\\=".into()),
                TokenKind::Var("Y".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn comments_are_skipped_to_end_of_line() {
        assert_eq!(
            kinds("a. % a trailing remark\nb."),
            vec![
                TokenKind::Atom("a".into()),
                TokenKind::Dot,
                TokenKind::Atom("b".into()),
                TokenKind::Dot,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn numbers_distinguish_int_and_float() {
        assert_eq!(kinds("42"), vec![TokenKind::Int(42), TokenKind::Eof]);
        assert_eq!(kinds("3.14"), vec![TokenKind::Float(3.14), TokenKind::Eof]);
    }
}
