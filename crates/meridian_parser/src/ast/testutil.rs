use meridian_error::Result;

use super::AstParseable;
use crate::parser::Parser;
use crate::tokens::Tokenizer;

/// Parse a single AST node from the provided string.
pub fn parse_ast<A: AstParseable>(s: &str) -> Result<A> {
    let toks = Tokenizer::new(s).tokenize()?;
    let mut parser = Parser::with_tokens(toks);
    A::parse(&mut parser)
}
