use meridian_error::Result;

use crate::expr::Expression;

use super::cast_expr::PhysicalCastExpr;
use super::literal_expr::PhysicalLiteralExpr;
use super::scalar_function_expr::PhysicalScalarFunctionExpr;
use super::PhysicalScalarExpression;

/// Plans bound expressions into executable physical expressions.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhysicalExpressionPlanner;

impl PhysicalExpressionPlanner {
    pub fn plan_scalar(&self, expr: &Expression) -> Result<PhysicalScalarExpression> {
        Ok(match expr {
            Expression::Cast(cast) => PhysicalScalarExpression::Cast(PhysicalCastExpr {
                to: cast.to.clone(),
                expr: Box::new(self.plan_scalar(&cast.expr)?),
            }),
            Expression::Literal(lit) => PhysicalScalarExpression::Literal(PhysicalLiteralExpr {
                literal: lit.literal.clone(),
            }),
            Expression::ScalarFunction(func) => {
                let inputs = func
                    .inputs
                    .iter()
                    .map(|input| self.plan_scalar(input))
                    .collect::<Result<Vec<_>>>()?;

                PhysicalScalarExpression::ScalarFunction(PhysicalScalarFunctionExpr {
                    function: func.function.clone(),
                    inputs,
                })
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use meridian_array::batch::Batch;
    use meridian_array::datatype::DataType;
    use meridian_array::scalar::ScalarValue;

    use crate::expr::cast_expr::CastExpr;
    use crate::expr::literal_expr::LiteralExpr;
    use crate::expr::scalar_function_expr::ScalarFunctionExpr;
    use crate::functions::scalar::arith::Add;
    use crate::functions::scalar::ScalarFunction;

    use super::*;

    #[test]
    fn plan_and_eval_function_over_literals() {
        let function = Add
            .plan_from_datatypes(&[DataType::Int64, DataType::Int64])
            .unwrap();

        let expr = Expression::ScalarFunction(ScalarFunctionExpr {
            function,
            inputs: vec![
                Expression::Literal(LiteralExpr {
                    literal: ScalarValue::Int64(4),
                }),
                Expression::Literal(LiteralExpr {
                    literal: ScalarValue::Int64(5),
                }),
            ],
        });

        let physical = PhysicalExpressionPlanner.plan_scalar(&expr).unwrap();

        let batch = Batch::empty_with_num_rows(1);
        let out = physical.eval(&batch).unwrap();

        assert_eq!(1, out.len());
        assert_eq!(Some(ScalarValue::Int64(9)), out.scalar(0));
    }

    #[test]
    fn plan_and_eval_cast() {
        let expr = Expression::Cast(CastExpr {
            to: DataType::Float64,
            expr: Box::new(Expression::Literal(LiteralExpr {
                literal: ScalarValue::Int64(3),
            })),
        });

        let physical = PhysicalExpressionPlanner.plan_scalar(&expr).unwrap();

        let batch = Batch::empty_with_num_rows(2);
        let out = physical.eval(&batch).unwrap();

        assert_eq!(2, out.len());
        assert_eq!(Some(ScalarValue::Float64(3.0)), out.scalar(0));
    }
}
