// src/lexer.rs

use std::fmt;

use phf::phf_map;

use crate::error::ParseError;

/// Tokens: let in \ ( ) + - * / -> = VAR CONSTR LITERAL, plus END at the
/// end of input (idempotent) and ERROR for an unrecognized character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Let,
    In,
    Backslash,
    LParen,
    RParen,
    Plus,
    Minus,
    Star,
    Slash,
    Arrow,
    Equals,
    Var(String),
    Constr(String),
    Literal(i64),
    End,
    Error(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Let,
    In,
    Backslash,
    LParen,
    RParen,
    Plus,
    Minus,
    Star,
    Slash,
    Arrow,
    Equals,
    Var,
    Constr,
    Literal,
    End,
    Error,
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Let => TokenKind::Let,
            Token::In => TokenKind::In,
            Token::Backslash => TokenKind::Backslash,
            Token::LParen => TokenKind::LParen,
            Token::RParen => TokenKind::RParen,
            Token::Plus => TokenKind::Plus,
            Token::Minus => TokenKind::Minus,
            Token::Star => TokenKind::Star,
            Token::Slash => TokenKind::Slash,
            Token::Arrow => TokenKind::Arrow,
            Token::Equals => TokenKind::Equals,
            Token::Var(_) => TokenKind::Var,
            Token::Constr(_) => TokenKind::Constr,
            Token::Literal(_) => TokenKind::Literal,
            Token::End => TokenKind::End,
            Token::Error(_) => TokenKind::Error,
        }
    }
}

impl TokenKind {
    /// Human-readable form used in parse error messages.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Let => "'let'",
            TokenKind::In => "'in'",
            TokenKind::Backslash => "'\\'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Arrow => "'->'",
            TokenKind::Equals => "'='",
            TokenKind::Var => "a variable",
            TokenKind::Constr => "a constructor",
            TokenKind::Literal => "a literal",
            TokenKind::End => "the end of input",
            TokenKind::Error => "an unrecognized character",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}

// Exact identifiers that lex as keywords rather than variables.
static KEYWORDS: phf::Map<&'static str, Token> = phf_map! {
    "let" => Token::Let,
    "in" => Token::In,
};

// --- The Lexer ---
//
// Holds the only mutable cursor state; tokens are immutable once produced.
pub struct Lexer {
    input: Vec<char>,
    pos: usize,
    cur: Token,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        let mut lexer = Lexer {
            input: input.chars().collect(),
            pos: 0,
            cur: Token::End,
        };
        lexer.cur = lexer.scan();
        lexer
    }

    /// Returns the current token without consuming it.
    pub fn peek(&self) -> &Token {
        &self.cur
    }

    /// Returns and consumes the current token.
    pub fn next(&mut self) -> Token {
        let scanned = self.scan();
        std::mem::replace(&mut self.cur, scanned)
    }

    /// Consumes the current token if it has the requested kind.
    pub fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.cur.kind() == kind {
            Ok(self.next())
        } else {
            Err(ParseError::UnexpectedToken {
                expected: kind.describe(),
                got: self.cur.kind(),
            })
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn peek_char(&self) -> Option<char> {
        self.input.get(self.pos + 1).copied()
    }

    fn scan(&mut self) -> Token {
        while matches!(self.current_char(), Some(' ' | '\t' | '\n')) {
            self.pos += 1;
        }
        let c = match self.current_char() {
            Some(c) => c,
            None => return Token::End,
        };
        match c {
            // Maximal munch: '-' followed by '>' is the arrow token.
            '-' if self.peek_char() == Some('>') => {
                self.pos += 2;
                Token::Arrow
            }
            '-' => {
                self.pos += 1;
                Token::Minus
            }
            '\\' => {
                self.pos += 1;
                Token::Backslash
            }
            '(' => {
                self.pos += 1;
                Token::LParen
            }
            ')' => {
                self.pos += 1;
                Token::RParen
            }
            '+' => {
                self.pos += 1;
                Token::Plus
            }
            '*' => {
                self.pos += 1;
                Token::Star
            }
            '/' => {
                self.pos += 1;
                Token::Slash
            }
            '=' => {
                self.pos += 1;
                Token::Equals
            }
            '0'..='9' => self.scan_literal(c),
            'A'..='Z' => Token::Constr(self.scan_word()),
            'a'..='z' | '_' => {
                let word = self.scan_word();
                match KEYWORDS.get(word.as_str()) {
                    Some(keyword) => keyword.clone(),
                    None => Token::Var(word),
                }
            }
            other => {
                self.pos += 1;
                Token::Error(other)
            }
        }
    }

    fn scan_word(&mut self) -> String {
        let mut word = String::new();
        while let Some(c) = self.current_char() {
            if c.is_ascii_alphanumeric() || c == '_' {
                word.push(c);
                self.pos += 1;
            } else {
                break;
            }
        }
        word
    }

    fn scan_literal(&mut self, first: char) -> Token {
        let mut digits = String::new();
        while let Some(c) = self.current_char() {
            if c.is_ascii_digit() {
                digits.push(c);
                self.pos += 1;
            } else {
                break;
            }
        }
        match digits.parse::<i64>() {
            Ok(value) => Token::Literal(value),
            // A digit run too large for i64 is treated like any other
            // unrecognized input.
            Err(_) => Token::Error(first),
        }
    }
}
