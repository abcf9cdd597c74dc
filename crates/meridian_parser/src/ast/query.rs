use meridian_error::{MeridianError, Result};

use super::{AstParseable, Expr, Ident};
use crate::keywords::Keyword;
use crate::parser::Parser;
use crate::tokens::Token;

/// SELECT/VALUES
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryNode {
    Select(SelectNode),
    Values(Values),
}

impl AstParseable for QueryNode {
    fn parse(parser: &mut Parser) -> Result<Self> {
        match parser.peek_keyword() {
            Some(Keyword::SELECT) => Ok(QueryNode::Select(SelectNode::parse(parser)?)),
            Some(Keyword::VALUES) => Ok(QueryNode::Values(Values::parse(parser)?)),
            _ => Err(MeridianError::new(format!(
                "Expected SELECT or VALUES, got {:?}",
                parser.peek()
            ))),
        }
    }
}

/// A single item in a select list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectExpr {
    /// An unaliased expression.
    Expr(Expr),
    /// An expression with an alias, `<expr> AS <ident>`.
    AliasedExpr(Expr, Ident),
}

impl AstParseable for SelectExpr {
    fn parse(parser: &mut Parser) -> Result<Self> {
        let expr = Expr::parse(parser)?;
        if parser.parse_keyword(Keyword::AS) {
            let alias = Ident::parse(parser)?;
            return Ok(SelectExpr::AliasedExpr(expr, alias));
        }
        Ok(SelectExpr::Expr(expr))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectNode {
    /// Projection list.
    pub projections: Vec<SelectExpr>,
}

impl AstParseable for SelectNode {
    fn parse(parser: &mut Parser) -> Result<Self> {
        parser.expect_keyword(Keyword::SELECT)?;
        let projections = parser.parse_comma_separated(SelectExpr::parse)?;
        Ok(SelectNode { projections })
    }
}

/// VALUES (<expr>, ...), ...
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Values {
    pub rows: Vec<Vec<Expr>>,
}

impl AstParseable for Values {
    fn parse(parser: &mut Parser) -> Result<Self> {
        parser.expect_keyword(Keyword::VALUES)?;

        let rows = parser.parse_comma_separated(|parser| {
            parser.expect_token(&Token::LeftParen)?;
            let exprs = parser.parse_parenthesized_comma_separated(Expr::parse)?;
            parser.expect_token(&Token::RightParen)?;
            Ok(exprs)
        })?;

        Ok(Values { rows })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::ast::testutil::parse_ast;
    use crate::ast::{Function, Literal, ObjectReference};

    #[test]
    fn select_with_alias() {
        let got = parse_ast::<QueryNode>("SELECT lower('ABC') AS lowered").unwrap();
        let expected = QueryNode::Select(SelectNode {
            projections: vec![SelectExpr::AliasedExpr(
                Expr::Function(Function {
                    name: ObjectReference::from_strings(["lower"]),
                    args: vec![Expr::Literal(Literal::SingleQuotedString(
                        "ABC".to_string(),
                    ))],
                }),
                Ident::from_string("lowered"),
            )],
        });
        assert_eq!(expected, got);
    }

    #[test]
    fn select_multiple_projections() {
        let got = parse_ast::<QueryNode>("SELECT 1, 'two', 3.0").unwrap();
        let expected = QueryNode::Select(SelectNode {
            projections: vec![
                SelectExpr::Expr(Expr::Literal(Literal::Number("1".to_string()))),
                SelectExpr::Expr(Expr::Literal(Literal::SingleQuotedString(
                    "two".to_string(),
                ))),
                SelectExpr::Expr(Expr::Literal(Literal::Number("3.0".to_string()))),
            ],
        });
        assert_eq!(expected, got);
    }

    #[test]
    fn values_rows() {
        let got = parse_ast::<QueryNode>("VALUES (1, 'a'), (2, 'b')").unwrap();
        let expected = QueryNode::Values(Values {
            rows: vec![
                vec![
                    Expr::Literal(Literal::Number("1".to_string())),
                    Expr::Literal(Literal::SingleQuotedString("a".to_string())),
                ],
                vec![
                    Expr::Literal(Literal::Number("2".to_string())),
                    Expr::Literal(Literal::SingleQuotedString("b".to_string())),
                ],
            ],
        });
        assert_eq!(expected, got);
    }

    #[test]
    fn values_missing_parens() {
        parse_ast::<QueryNode>("VALUES 1, 2").unwrap_err();
    }
}
