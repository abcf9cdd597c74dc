mod expr;
pub use expr::*;
mod query;
pub use query::*;

#[cfg(test)]
pub(crate) mod testutil;

use std::fmt;

use meridian_error::{MeridianError, Result};

use crate::parser::Parser;
use crate::tokens::Token;

/// An AST node that can be parsed from a sequence of tokens.
pub trait AstParseable: Sized {
    /// Parse an instance of Self from the provided parser.
    ///
    /// It's assumed that the parser is in the correct state for parsing this
    /// node, and if it isn't, an error should be returned.
    fn parse(parser: &mut Parser) -> Result<Self>;
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ident {
    pub value: String,
}

impl Ident {
    pub fn from_string(s: impl Into<String>) -> Self {
        Ident { value: s.into() }
    }
}

impl AstParseable for Ident {
    fn parse(parser: &mut Parser) -> Result<Self> {
        match parser.next_token() {
            Some(Token::Word(w)) => Ok(Ident {
                value: w.value.clone(),
            }),
            Some(other) => Err(MeridianError::new(format!(
                "Unexpected token: {other:?}. Expected an identifier."
            ))),
            None => Err(MeridianError::new(
                "Expected an identifier, found end of statement",
            )),
        }
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A period separated list of identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectReference(pub Vec<Ident>);

impl ObjectReference {
    pub fn from_strings<S: Into<String>>(strings: impl IntoIterator<Item = S>) -> Self {
        ObjectReference(strings.into_iter().map(Ident::from_string).collect())
    }

    /// Get the rightmost identifier, the object's own name.
    pub fn base(&self) -> Result<&Ident> {
        self.0.last().ok_or_else(|| {
            MeridianError::new("Object reference contains no identifiers")
        })
    }
}

impl AstParseable for ObjectReference {
    fn parse(parser: &mut Parser) -> Result<Self> {
        let mut idents = vec![Ident::parse(parser)?];
        while parser.consume_token(&Token::Period) {
            idents.push(Ident::parse(parser)?);
        }
        Ok(ObjectReference(idents))
    }
}

impl fmt::Display for ObjectReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, ident) in self.0.iter().enumerate() {
            if idx > 0 {
                write!(f, ".")?;
            }
            write!(f, "{ident}")?;
        }
        Ok(())
    }
}
