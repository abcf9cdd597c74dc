use meridian_error::{MeridianError, Result};

use super::{AstParseable, Ident, ObjectReference};
use crate::keywords::Keyword;
use crate::parser::Parser;
use crate::tokens::Token;

const PRECEDENCE_ADD_SUB: u8 = 30;
const PRECEDENCE_MUL_DIV_MOD: u8 = 40;
const PRECEDENCE_UNARY: u8 = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    /// Unparsed number literal.
    Number(String),
    /// String literal.
    SingleQuotedString(String),
    /// Boolean literal.
    Boolean(bool),
    /// Null literal.
    Null,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Plus,
    Minus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulo,
}

/// A scalar function call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    pub name: ObjectReference,
    pub args: Vec<Expr>,
}

/// Data types that can appear in a CAST.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlType {
    Boolean,
    BigInt,
    Double,
    Varchar,
}

impl AstParseable for SqlType {
    fn parse(parser: &mut Parser) -> Result<Self> {
        Ok(match parser.next_keyword()? {
            Keyword::BOOLEAN => SqlType::Boolean,
            Keyword::BIGINT => SqlType::BigInt,
            Keyword::DOUBLE => SqlType::Double,
            Keyword::VARCHAR => SqlType::Varchar,
            other => {
                return Err(MeridianError::new(format!(
                    "Unexpected keyword for data type: {other}"
                )))
            }
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Column or variable reference.
    Ident(Ident),
    /// Literal value.
    Literal(Literal),
    /// Unary expression.
    UnaryExpr {
        op: UnaryOperator,
        expr: Box<Expr>,
    },
    /// Binary expression.
    BinaryExpr {
        left: Box<Expr>,
        op: BinaryOperator,
        right: Box<Expr>,
    },
    /// Scalar function call.
    Function(Function),
    /// Expression wrapped in parentheses.
    Nested(Box<Expr>),
    /// CAST(expr AS type)
    Cast {
        datatype: SqlType,
        expr: Box<Expr>,
    },
}

impl AstParseable for Expr {
    fn parse(parser: &mut Parser) -> Result<Self> {
        Self::parse_subexpr(parser, 0)
    }
}

impl Expr {
    fn parse_subexpr(parser: &mut Parser, precedence: u8) -> Result<Expr> {
        let mut expr = Self::parse_prefix(parser)?;

        loop {
            let next_precedence = Self::next_precedence(parser);
            if precedence >= next_precedence {
                break;
            }
            expr = Self::parse_infix(parser, expr, next_precedence)?;
        }

        Ok(expr)
    }

    fn parse_prefix(parser: &mut Parser) -> Result<Expr> {
        if parser.parse_keyword(Keyword::NULL) {
            return Ok(Expr::Literal(Literal::Null));
        }
        if parser.parse_keyword(Keyword::TRUE) {
            return Ok(Expr::Literal(Literal::Boolean(true)));
        }
        if parser.parse_keyword(Keyword::FALSE) {
            return Ok(Expr::Literal(Literal::Boolean(false)));
        }
        if parser.parse_keyword(Keyword::CAST) {
            return Self::parse_cast(parser);
        }

        let tok = match parser.next_token() {
            Some(tok) => tok.clone(),
            None => {
                return Err(MeridianError::new(
                    "Expected an expression, found end of statement",
                ))
            }
        };

        match tok {
            Token::Word(w) => {
                let ident = Ident { value: w.value };
                if parser.consume_token(&Token::LeftParen) {
                    let args = parser.parse_parenthesized_comma_separated(Expr::parse)?;
                    parser.expect_token(&Token::RightParen)?;
                    Ok(Expr::Function(Function {
                        name: ObjectReference(vec![ident]),
                        args,
                    }))
                } else {
                    Ok(Expr::Ident(ident))
                }
            }
            Token::Number(n) => Ok(Expr::Literal(Literal::Number(n))),
            Token::SingleQuotedString(s) => Ok(Expr::Literal(Literal::SingleQuotedString(s))),
            Token::Minus => Ok(Expr::UnaryExpr {
                op: UnaryOperator::Minus,
                expr: Box::new(Self::parse_subexpr(parser, PRECEDENCE_UNARY)?),
            }),
            Token::Plus => Ok(Expr::UnaryExpr {
                op: UnaryOperator::Plus,
                expr: Box::new(Self::parse_subexpr(parser, PRECEDENCE_UNARY)?),
            }),
            Token::LeftParen => {
                let inner = Expr::parse(parser)?;
                parser.expect_token(&Token::RightParen)?;
                Ok(Expr::Nested(Box::new(inner)))
            }
            other => Err(MeridianError::new(format!(
                "Unexpected token in expression: {other:?}"
            ))),
        }
    }

    fn next_precedence(parser: &Parser) -> u8 {
        match parser.peek() {
            Some(Token::Plus | Token::Minus) => PRECEDENCE_ADD_SUB,
            Some(Token::Mul | Token::Div | Token::Mod) => PRECEDENCE_MUL_DIV_MOD,
            _ => 0,
        }
    }

    fn parse_infix(parser: &mut Parser, left: Expr, precedence: u8) -> Result<Expr> {
        let op = match parser.next_token() {
            Some(Token::Plus) => BinaryOperator::Plus,
            Some(Token::Minus) => BinaryOperator::Minus,
            Some(Token::Mul) => BinaryOperator::Multiply,
            Some(Token::Div) => BinaryOperator::Divide,
            Some(Token::Mod) => BinaryOperator::Modulo,
            Some(other) => {
                return Err(MeridianError::new(format!(
                    "Unexpected operator token: {other:?}"
                )))
            }
            None => {
                return Err(MeridianError::new(
                    "Expected an operator, found end of statement",
                ))
            }
        };

        let right = Self::parse_subexpr(parser, precedence)?;

        Ok(Expr::BinaryExpr {
            left: Box::new(left),
            op,
            right: Box::new(right),
        })
    }

    fn parse_cast(parser: &mut Parser) -> Result<Expr> {
        parser.expect_token(&Token::LeftParen)?;
        let expr = Expr::parse(parser)?;
        parser.expect_keyword(Keyword::AS)?;
        let datatype = SqlType::parse(parser)?;
        parser.expect_token(&Token::RightParen)?;

        Ok(Expr::Cast {
            datatype,
            expr: Box::new(expr),
        })
    }
}
