use std::iter::Peekable;
use std::str::Chars;

use meridian_error::{MeridianError, Result};

use crate::keywords::{keyword_from_str, Keyword};

/// A word in a sql statement, either an identifier or keyword.
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    /// The word as it appeared in the query, with quotes stripped.
    pub value: String,

    /// Quote character if the word was quoted.
    pub quote: Option<char>,

    /// Keyword this word matches, if any. Always None for quoted words.
    pub keyword: Option<Keyword>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Word(Word),
    SingleQuotedString(String),
    Number(String),
    Comma,
    LeftParen,
    RightParen,
    Period,
    Plus,
    Minus,
    Mul,
    Div,
    Mod,
    Eq,
    Semicolon,
}

#[derive(Debug)]
pub struct Tokenizer<'a> {
    sql: &'a str,
}

impl<'a> Tokenizer<'a> {
    pub fn new(sql: &'a str) -> Self {
        Tokenizer { sql }
    }

    pub fn tokenize(&self) -> Result<Vec<Token>> {
        let mut chars = self.sql.chars().peekable();
        let mut toks = Vec::new();

        while let Some(tok) = Self::next_token(&mut chars)? {
            toks.push(tok);
        }

        Ok(toks)
    }

    fn next_token(chars: &mut Peekable<Chars>) -> Result<Option<Token>> {
        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }

        let c = match chars.next() {
            Some(c) => c,
            None => return Ok(None),
        };

        Ok(Some(match c {
            '(' => Token::LeftParen,
            ')' => Token::RightParen,
            ',' => Token::Comma,
            '.' => Token::Period,
            ';' => Token::Semicolon,
            '+' => Token::Plus,
            '*' => Token::Mul,
            '/' => Token::Div,
            '%' => Token::Mod,
            '=' => Token::Eq,
            '-' => {
                // '--' starts a line comment.
                if chars.peek() == Some(&'-') {
                    for c in chars.by_ref() {
                        if c == '\n' {
                            break;
                        }
                    }
                    return Self::next_token(chars);
                }
                Token::Minus
            }
            '\'' => Token::SingleQuotedString(Self::take_quoted_string(chars)?),
            '"' => {
                let mut value = String::new();
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some(c) => value.push(c),
                        None => {
                            return Err(MeridianError::new("Unterminated quoted identifier"))
                        }
                    }
                }
                Token::Word(Word {
                    value,
                    quote: Some('"'),
                    keyword: None,
                })
            }
            c if c.is_ascii_digit() => {
                let mut value = String::from(c);
                let mut saw_period = false;
                while let Some(c) = chars.peek() {
                    match c {
                        c if c.is_ascii_digit() => value.push(*c),
                        '.' if !saw_period => {
                            saw_period = true;
                            value.push('.');
                        }
                        _ => break,
                    }
                    chars.next();
                }
                Token::Number(value)
            }
            c if c.is_alphabetic() || c == '_' => {
                let mut value = String::from(c);
                while let Some(c) = chars.peek() {
                    if c.is_alphanumeric() || *c == '_' {
                        value.push(*c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let keyword = keyword_from_str(&value);
                Token::Word(Word {
                    value,
                    quote: None,
                    keyword,
                })
            }
            other => {
                return Err(MeridianError::new(format!(
                    "Unable to handle character: {other}"
                )))
            }
        }))
    }

    /// Read the remainder of a single quoted string, handling doubled quotes
    /// as escapes.
    fn take_quoted_string(chars: &mut Peekable<Chars>) -> Result<String> {
        let mut value = String::new();
        loop {
            match chars.next() {
                Some('\'') => {
                    // '' inside a string is an escaped quote.
                    if chars.peek() == Some(&'\'') {
                        chars.next();
                        value.push('\'');
                        continue;
                    }
                    return Ok(value);
                }
                Some(c) => value.push(c),
                None => return Err(MeridianError::new("Unterminated string literal")),
            }
        }
    }
}
