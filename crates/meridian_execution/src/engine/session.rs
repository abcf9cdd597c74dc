use meridian_array::batch::Batch;
use meridian_error::Result;
use meridian_parser::parser;
use meridian_parser::statement::Statement;
use tracing::trace;

use super::result::{ExecutionResult, ResultStream};
use crate::database::DatabaseContext;
use crate::expr::physical::planner::PhysicalExpressionPlanner;
use crate::logical::binder::bind_query::{BoundQuery, BoundQueryNode, QueryBinder};

/// A session for executing queries.
///
/// Sessions are cheap to create, and any number of them may exist for an
/// engine at a time.
#[derive(Debug)]
pub struct Session {
    context: DatabaseContext,
}

impl Session {
    pub fn new(context: DatabaseContext) -> Self {
        Session { context }
    }

    /// Execute every statement in `sql`, returning results in statement
    /// order.
    ///
    /// Statements execute eagerly, the streams on the returned results just
    /// hand out batches that already exist.
    pub fn simple(&mut self, sql: &str) -> Result<Vec<ExecutionResult>> {
        let statements = parser::parse(sql)?;

        let mut results = Vec::with_capacity(statements.len());
        for statement in statements {
            match statement {
                Statement::Query(query) => {
                    let binder = QueryBinder::new(&self.context);
                    let bound = binder.bind(&query)?;
                    trace!(?bound, "bound query");

                    results.push(self.execute_bound(bound)?);
                }
            }
        }

        Ok(results)
    }

    fn execute_bound(&self, bound: BoundQuery) -> Result<ExecutionResult> {
        let planner = PhysicalExpressionPlanner::default();

        // Expressions evaluate against a single placeholder row since there's
        // no FROM to provide input.
        let input = Batch::empty_with_num_rows(1);

        let batches = match bound.root {
            BoundQueryNode::Select(select) => {
                let arrays = select
                    .projections
                    .iter()
                    .map(|expr| planner.plan_scalar(expr)?.eval(&input))
                    .collect::<Result<Vec<_>>>()?;

                vec![Batch::try_new(arrays)?]
            }
            BoundQueryNode::Values(values) => {
                // One batch per row.
                let mut batches = Vec::with_capacity(values.rows.len());
                for row in values.rows {
                    let arrays = row
                        .iter()
                        .map(|expr| planner.plan_scalar(expr)?.eval(&input))
                        .collect::<Result<Vec<_>>>()?;
                    batches.push(Batch::try_new(arrays)?);
                }
                batches
            }
        };

        Ok(ExecutionResult {
            output_schema: bound.output_schema,
            stream: ResultStream::new(batches),
        })
    }
}
