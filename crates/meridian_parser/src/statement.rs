use crate::ast::QueryNode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// SELECT/VALUES
    Query(QueryNode),
}
