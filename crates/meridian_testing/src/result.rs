//! Materialized query results.

/// A fully executed query result with every value rendered as a string.
///
/// Types hold the display names of the output datatypes, e.g. "Int64" or
/// "geometry". Comparing rendered strings keeps test assertions independent
/// of the underlying array representations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializedResult {
    pub types: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl MaterializedResult {
    /// Start building an expected result with the given column types.
    pub fn builder<I, S>(types: I) -> MaterializedResultBuilder
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MaterializedResultBuilder {
            types: types.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }
}

#[derive(Debug, Default)]
pub struct MaterializedResultBuilder {
    types: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl MaterializedResultBuilder {
    pub fn row<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(values.into_iter().map(Into::into).collect());
        self
    }

    pub fn build(self) -> MaterializedResult {
        MaterializedResult {
            types: self.types,
            rows: self.rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_collects_rows_in_order() {
        let result = MaterializedResult::builder(["Int64", "Utf8"])
            .row(["1", "a"])
            .row(["2", "b"])
            .build();

        assert_eq!(vec!["Int64", "Utf8"], result.types);
        assert_eq!(vec![vec!["1", "a"], vec!["2", "b"]], result.rows);
    }

    #[test]
    fn builder_no_rows() {
        let result = MaterializedResult::builder(["Boolean"]).build();
        assert!(result.rows.is_empty());
    }
}
