pub mod planner;

pub mod cast_expr;
pub mod literal_expr;
pub mod scalar_function_expr;

use std::sync::Arc;

use cast_expr::PhysicalCastExpr;
use literal_expr::PhysicalLiteralExpr;
use meridian_array::array::Array;
use meridian_array::batch::Batch;
use meridian_error::Result;
use scalar_function_expr::PhysicalScalarFunctionExpr;

#[derive(Debug, Clone)]
pub enum PhysicalScalarExpression {
    Cast(PhysicalCastExpr),
    Literal(PhysicalLiteralExpr),
    ScalarFunction(PhysicalScalarFunctionExpr),
}

impl PhysicalScalarExpression {
    /// Evaluate this expression against a batch.
    ///
    /// The resulting array will have the same number of elements as the batch
    /// has rows.
    pub fn eval(&self, batch: &Batch) -> Result<Arc<Array>> {
        match self {
            Self::Cast(expr) => expr.eval(batch),
            Self::Literal(expr) => expr.eval(batch),
            Self::ScalarFunction(expr) => expr.eval(batch),
        }
    }
}
