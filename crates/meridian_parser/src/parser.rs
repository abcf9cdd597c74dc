use meridian_error::{MeridianError, Result};
use tracing::trace;

use crate::ast::{AstParseable, QueryNode};
use crate::keywords::Keyword;
use crate::statement::Statement;
use crate::tokens::{Token, Tokenizer};

/// Parse a sql string into statements.
pub fn parse(sql: &str) -> Result<Vec<Statement>> {
    trace!(%sql, "parsing sql statements");
    let toks = Tokenizer::new(sql).tokenize()?;
    Parser::with_tokens(toks).parse_statements()
}

#[derive(Debug)]
pub struct Parser {
    toks: Vec<Token>,
    /// Index of the next token to process.
    idx: usize,
}

impl Parser {
    pub fn with_tokens(toks: Vec<Token>) -> Self {
        Parser { toks, idx: 0 }
    }

    pub fn parse_statements(&mut self) -> Result<Vec<Statement>> {
        let mut stmts = Vec::new();

        loop {
            while self.consume_token(&Token::Semicolon) {}

            if self.peek().is_none() {
                break;
            }

            stmts.push(self.parse_statement()?);

            // Statements must be separated by semicolons.
            if !self.consume_token(&Token::Semicolon) {
                if let Some(tok) = self.peek() {
                    return Err(MeridianError::new(format!(
                        "Expected end of statement, got {tok:?}"
                    )));
                }
            }
        }

        Ok(stmts)
    }

    pub fn parse_statement(&mut self) -> Result<Statement> {
        if self.is_query_node_start() {
            return Ok(Statement::Query(QueryNode::parse(self)?));
        }

        match self.peek() {
            Some(tok) => Err(MeridianError::new(format!(
                "Unexpected token at start of statement: {tok:?}"
            ))),
            None => Err(MeridianError::new("Empty statement")),
        }
    }

    /// Check if the next token starts a SELECT or VALUES node.
    pub fn is_query_node_start(&self) -> bool {
        matches!(
            self.peek_keyword(),
            Some(Keyword::SELECT) | Some(Keyword::VALUES)
        )
    }

    pub fn peek(&self) -> Option<&Token> {
        self.toks.get(self.idx)
    }

    pub fn peek_keyword(&self) -> Option<Keyword> {
        match self.peek() {
            Some(Token::Word(w)) => w.keyword,
            _ => None,
        }
    }

    pub fn next_token(&mut self) -> Option<&Token> {
        let tok = self.toks.get(self.idx)?;
        self.idx += 1;
        Some(tok)
    }

    /// Consume the next token if it matches the given keyword.
    pub fn parse_keyword(&mut self, kw: Keyword) -> bool {
        if self.peek_keyword() == Some(kw) {
            self.idx += 1;
            return true;
        }
        false
    }

    /// Consume the next tokens if they match the given keyword sequence.
    ///
    /// The parser does not advance if the full sequence doesn't match.
    pub fn parse_keyword_sequence(&mut self, kws: &[Keyword]) -> bool {
        let start = self.idx;
        for kw in kws {
            if !self.parse_keyword(*kw) {
                self.idx = start;
                return false;
            }
        }
        true
    }

    pub fn expect_keyword(&mut self, kw: Keyword) -> Result<()> {
        if !self.parse_keyword(kw) {
            return Err(match self.peek() {
                Some(tok) => {
                    MeridianError::new(format!("Expected keyword {kw}, got {tok:?}"))
                }
                None => MeridianError::new(format!(
                    "Expected keyword {kw}, found end of statement"
                )),
            });
        }
        Ok(())
    }

    /// Get the next token as a keyword, erroring if it isn't one.
    pub fn next_keyword(&mut self) -> Result<Keyword> {
        match self.next_token() {
            Some(Token::Word(w)) => match w.keyword {
                Some(kw) => Ok(kw),
                None => Err(MeridianError::new(format!(
                    "Expected a keyword, got '{}'",
                    w.value
                ))),
            },
            Some(other) => Err(MeridianError::new(format!(
                "Expected a keyword, got {other:?}"
            ))),
            None => Err(MeridianError::new(
                "Expected a keyword, found end of statement",
            )),
        }
    }

    pub fn expect_token(&mut self, expected: &Token) -> Result<()> {
        if !self.consume_token(expected) {
            return Err(match self.peek() {
                Some(tok) => {
                    MeridianError::new(format!("Expected {expected:?}, got {tok:?}"))
                }
                None => MeridianError::new(format!(
                    "Expected {expected:?}, found end of statement"
                )),
            });
        }
        Ok(())
    }

    /// Consume the next token if it matches the expected token.
    pub fn consume_token(&mut self, expected: &Token) -> bool {
        if self.peek() == Some(expected) {
            self.idx += 1;
            return true;
        }
        false
    }

    pub fn parse_comma_separated<T>(
        &mut self,
        mut f: impl FnMut(&mut Parser) -> Result<T>,
    ) -> Result<Vec<T>> {
        let mut items = Vec::new();
        loop {
            items.push(f(self)?);
            if !self.consume_token(&Token::Comma) {
                break;
            }
        }
        Ok(items)
    }

    /// Parse a possibly empty comma separated list between parentheses.
    ///
    /// The caller is expected to handle the parentheses themselves.
    pub fn parse_parenthesized_comma_separated<T>(
        &mut self,
        f: impl FnMut(&mut Parser) -> Result<T>,
    ) -> Result<Vec<T>> {
        if self.peek() == Some(&Token::RightParen) {
            return Ok(Vec::new());
        }
        self.parse_comma_separated(f)
    }
}
