use crate::catalog::column::Column;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<Column>,
}

impl Schema {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// Schema with no columns, used by DDL and mutation plan nodes that
    /// produce no batches.
    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
        }
    }

    pub fn get_column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn get_column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    pub fn get_columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn get_column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.get_name() == name)
    }

    /// Concatenation of two schemas, used for join output.
    pub fn join(left: &Schema, right: &Schema) -> Schema {
        let mut columns = left.columns.clone();
        columns.extend(right.columns.iter().cloned());
        Schema::new(columns)
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.columns.iter().map(|c| c.to_string()).collect();
        write!(f, "({})", parts.join(", "))
    }
}
