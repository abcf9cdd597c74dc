use meridian_array::datatype::{DataType, DataTypeId};
use meridian_array::scalar::OwnedScalarValue;
use meridian_error::{not_implemented, MeridianError, Result};
use meridian_parser::ast;

use crate::database::DatabaseContext;
use crate::expr::cast_expr::CastExpr;
use crate::expr::literal_expr::LiteralExpr;
use crate::expr::scalar_function_expr::ScalarFunctionExpr;
use crate::expr::Expression;
use crate::functions::scalar::ScalarFunction;
use crate::functions::{invalid_input_types_error, CastType};

/// Binds AST expressions into logical expressions.
///
/// All function references get resolved against the system catalog, and
/// implicit casts get inserted wherever the input types don't line up with a
/// function signature.
#[derive(Debug)]
pub struct ExpressionBinder<'a> {
    context: &'a DatabaseContext,
}

impl<'a> ExpressionBinder<'a> {
    pub const fn new(context: &'a DatabaseContext) -> Self {
        ExpressionBinder { context }
    }

    pub fn bind_expression(&self, expr: &ast::Expr) -> Result<Expression> {
        match expr {
            ast::Expr::Ident(ident) => Err(MeridianError::new(format!(
                "Unable to resolve column '{ident}'"
            ))),
            ast::Expr::Literal(literal) => Self::bind_literal(literal),
            ast::Expr::UnaryExpr { op, expr } => match op {
                ast::UnaryOperator::Plus => self.bind_expression(expr),
                ast::UnaryOperator::Minus => {
                    let input = self.bind_expression(expr)?;
                    self.bind_function("negate", vec![input])
                }
            },
            ast::Expr::BinaryExpr { left, op, right } => {
                let name = match op {
                    ast::BinaryOperator::Plus => "+",
                    ast::BinaryOperator::Minus => "-",
                    ast::BinaryOperator::Multiply => "*",
                    ast::BinaryOperator::Divide => "/",
                    ast::BinaryOperator::Modulo => "%",
                };
                let left = self.bind_expression(left)?;
                let right = self.bind_expression(right)?;
                self.bind_function(name, vec![left, right])
            }
            ast::Expr::Function(func) => {
                // TODO: Search path.
                if func.name.0.len() != 1 {
                    not_implemented!("qualified function names");
                }
                let name = &func.name.base()?.value;

                let inputs = func
                    .args
                    .iter()
                    .map(|arg| self.bind_expression(arg))
                    .collect::<Result<Vec<_>>>()?;

                self.bind_function(name, inputs)
            }
            ast::Expr::Nested(inner) => self.bind_expression(inner),
            ast::Expr::Cast { datatype, expr } => {
                let expr = self.bind_expression(expr)?;
                Self::bind_cast(expr, datatype_for_sql_type(*datatype))
            }
        }
    }

    fn bind_literal(literal: &ast::Literal) -> Result<Expression> {
        let scalar = match literal {
            ast::Literal::Number(n) => {
                if let Ok(n) = n.parse::<i64>() {
                    OwnedScalarValue::Int64(n)
                } else if let Ok(n) = n.parse::<f64>() {
                    OwnedScalarValue::Float64(n)
                } else {
                    return Err(MeridianError::new(format!(
                        "Unable to parse '{n}' as a number"
                    )));
                }
            }
            ast::Literal::SingleQuotedString(s) => OwnedScalarValue::Utf8(s.clone().into()),
            ast::Literal::Boolean(b) => OwnedScalarValue::Boolean(*b),
            ast::Literal::Null => OwnedScalarValue::Null,
        };

        Ok(Expression::Literal(LiteralExpr { literal: scalar }))
    }

    /// Look up a scalar function in the catalog and plan it against the given
    /// inputs.
    fn bind_function(&self, name: &str, inputs: Vec<Expression>) -> Result<Expression> {
        let catalog = self.context.system_catalog();

        let function = match catalog.get_scalar_function(name) {
            Some(function) => function,
            None => {
                let mut msg = format!("Unable to find scalar function '{name}'");
                if let Some(similar) = catalog.find_similar_function(name) {
                    msg.push_str(&format!(". Did you mean '{similar}'?"));
                }
                return Err(MeridianError::new(msg));
            }
        };

        self.plan_scalar_function(function, inputs)
    }

    fn plan_scalar_function(
        &self,
        function: Box<dyn ScalarFunction>,
        inputs: Vec<Expression>,
    ) -> Result<Expression> {
        let datatypes = inputs
            .iter()
            .map(|input| input.datatype())
            .collect::<Result<Vec<_>>>()?;

        // Exact signature match, no casts needed.
        if function.return_type_for_inputs(&datatypes).is_some() {
            let planned = function.plan_from_datatypes(&datatypes)?;
            return Ok(Expression::ScalarFunction(ScalarFunctionExpr {
                function: planned,
                inputs,
            }));
        }

        // Otherwise rank the signatures we could satisfy with implicit casts.
        let mut candidates = function.candidate_signatures(&datatypes);

        let mut best: Option<(usize, i32)> = None;
        for (idx, candidate) in candidates.iter().enumerate() {
            let score = candidate.total_score();
            match best {
                Some((_, best_score)) if best_score >= score => (),
                _ => best = Some((idx, score)),
            }
        }

        let best = match best {
            Some((idx, _)) => candidates.swap_remove(idx),
            None => {
                let refs: Vec<_> = datatypes.iter().collect();
                return Err(invalid_input_types_error(function.as_ref(), &refs));
            }
        };

        // Apply the casts the candidate needs.
        let inputs = inputs
            .into_iter()
            .zip(&best.casts)
            .map(|(input, cast)| match cast {
                CastType::Cast { to, .. } => Self::bind_cast(input, self.datatype_for_id(*to)?),
                CastType::NoCastNeeded => Ok(input),
            })
            .collect::<Result<Vec<_>>>()?;

        let datatypes = inputs
            .iter()
            .map(|input| input.datatype())
            .collect::<Result<Vec<_>>>()?;

        let planned = function.plan_from_datatypes(&datatypes)?;

        Ok(Expression::ScalarFunction(ScalarFunctionExpr {
            function: planned,
            inputs,
        }))
    }

    /// Wrap an expression in a cast, skipping the cast entirely if the
    /// expression already has the wanted type.
    fn bind_cast(expr: Expression, to: DataType) -> Result<Expression> {
        if expr.datatype()? == to {
            return Ok(expr);
        }

        Ok(Expression::Cast(CastExpr {
            to,
            expr: Box::new(expr),
        }))
    }

    /// Resolve a type id from a signature into a concrete type.
    ///
    /// Extension ids resolve through the catalog so that signatures can name
    /// types installed by extensions.
    fn datatype_for_id(&self, id: DataTypeId) -> Result<DataType> {
        match id {
            DataTypeId::Extension(name) => self
                .context
                .system_catalog()
                .get_extension_type(name)
                .map(DataType::Extension)
                .ok_or_else(|| MeridianError::new(format!("Missing extension type '{name}'"))),
            other => other.try_default_datatype(),
        }
    }
}

fn datatype_for_sql_type(sql_type: ast::SqlType) -> DataType {
    match sql_type {
        ast::SqlType::Boolean => DataType::Boolean,
        ast::SqlType::BigInt => DataType::Int64,
        ast::SqlType::Double => DataType::Float64,
        ast::SqlType::Varchar => DataType::Utf8,
    }
}
