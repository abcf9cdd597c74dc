pub mod cast_expr;
pub mod literal_expr;
pub mod scalar_function_expr;

pub mod physical;

use cast_expr::CastExpr;
use literal_expr::LiteralExpr;
use meridian_array::datatype::DataType;
use meridian_error::Result;
use scalar_function_expr::ScalarFunctionExpr;

/// A bound scalar expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Cast(CastExpr),
    Literal(LiteralExpr),
    ScalarFunction(ScalarFunctionExpr),
}

impl Expression {
    pub fn datatype(&self) -> Result<DataType> {
        Ok(match self {
            Self::Cast(expr) => expr.to.clone(),
            Self::Literal(expr) => expr.literal.datatype(),
            Self::ScalarFunction(expr) => expr.function.return_type(),
        })
    }
}
