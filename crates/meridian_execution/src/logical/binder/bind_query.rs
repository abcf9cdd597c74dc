use meridian_array::field::{Field, Schema};
use meridian_error::{MeridianError, Result};
use meridian_parser::ast;

use super::expr_binder::ExpressionBinder;
use crate::database::DatabaseContext;
use crate::expr::Expression;

/// A bound query with a fully resolved output schema.
#[derive(Debug)]
pub struct BoundQuery {
    pub output_schema: Schema,
    pub root: BoundQueryNode,
}

#[derive(Debug)]
pub enum BoundQueryNode {
    Select(BoundSelect),
    Values(BoundValues),
}

#[derive(Debug)]
pub struct BoundSelect {
    pub projections: Vec<Expression>,
}

#[derive(Debug)]
pub struct BoundValues {
    pub rows: Vec<Vec<Expression>>,
}

/// Binds query ASTs.
#[derive(Debug)]
pub struct QueryBinder<'a> {
    context: &'a DatabaseContext,
}

impl<'a> QueryBinder<'a> {
    pub const fn new(context: &'a DatabaseContext) -> Self {
        QueryBinder { context }
    }

    pub fn bind(&self, query: &ast::QueryNode) -> Result<BoundQuery> {
        match query {
            ast::QueryNode::Select(select) => self.bind_select(select),
            ast::QueryNode::Values(values) => self.bind_values(values),
        }
    }

    fn bind_select(&self, select: &ast::SelectNode) -> Result<BoundQuery> {
        let expr_binder = ExpressionBinder::new(self.context);

        let mut projections = Vec::with_capacity(select.projections.len());
        let mut fields = Vec::with_capacity(select.projections.len());

        for projection in &select.projections {
            let (expr, alias) = match projection {
                ast::SelectExpr::Expr(expr) => (expr, None),
                ast::SelectExpr::AliasedExpr(expr, alias) => (expr, Some(alias)),
            };

            let bound = expr_binder.bind_expression(expr)?;

            let name = match alias {
                Some(alias) => alias.value.clone(),
                None => output_name(expr, &bound),
            };

            fields.push(Field::new(name, bound.datatype()?, true));
            projections.push(bound);
        }

        Ok(BoundQuery {
            output_schema: Schema::new(fields),
            root: BoundQueryNode::Select(BoundSelect { projections }),
        })
    }

    fn bind_values(&self, values: &ast::Values) -> Result<BoundQuery> {
        if values.rows.is_empty() {
            return Err(MeridianError::new("Empty VALUES expression"));
        }

        let expr_binder = ExpressionBinder::new(self.context);

        let mut rows = Vec::with_capacity(values.rows.len());
        for row in &values.rows {
            let bound = row
                .iter()
                .map(|expr| expr_binder.bind_expression(expr))
                .collect::<Result<Vec<_>>>()?;
            rows.push(bound);
        }

        // All rows must line up with the types of the first row.
        let types = rows[0]
            .iter()
            .map(|expr| expr.datatype())
            .collect::<Result<Vec<_>>>()?;

        for row in &rows[1..] {
            if row.len() != types.len() {
                return Err(MeridianError::new(format!(
                    "VALUES rows must all be the same length, expected {}, got {}",
                    types.len(),
                    row.len(),
                )));
            }
            for (expr, expected) in row.iter().zip(&types) {
                let datatype = expr.datatype()?;
                if &datatype != expected {
                    return Err(MeridianError::new(format!(
                        "VALUES rows must all have the same types, expected {expected}, got {datatype}"
                    )));
                }
            }
        }

        let fields = types
            .into_iter()
            .enumerate()
            .map(|(idx, datatype)| Field::new(format!("column{}", idx + 1), datatype, true));

        Ok(BoundQuery {
            output_schema: Schema::new(fields),
            root: BoundQueryNode::Values(BoundValues { rows }),
        })
    }
}

/// Output name for an unaliased projection.
fn output_name(expr: &ast::Expr, bound: &Expression) -> String {
    match (expr, bound) {
        (ast::Expr::Function(_), Expression::ScalarFunction(func)) => {
            func.function.scalar_function().name().to_string()
        }
        _ => "?column?".to_string(),
    }
}
