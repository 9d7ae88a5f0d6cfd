use crate::common::exception::ExpressionError;
use crate::execution::expressions::abstract_expression::Expression;
use crate::storage::tuple::Tuple;
use crate::types_db::value::Value;
use std::fmt;
use std::fmt::{Display, Formatter};

/// Reference to a column of an input tuple. `tuple_index` selects which side
/// of a join the column comes from: 0 for the outer/left input, 1 for the
/// inner/right input. Single-input operators always use side 0.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnRefExpression {
    tuple_index: usize,
    column_index: usize,
}

impl ColumnRefExpression {
    pub fn new(tuple_index: usize, column_index: usize) -> Self {
        Self {
            tuple_index,
            column_index,
        }
    }

    pub fn get_tuple_index(&self) -> usize {
        self.tuple_index
    }

    pub fn get_column_index(&self) -> usize {
        self.column_index
    }

    pub fn evaluate(&self, tuple: &Tuple) -> Result<Value, ExpressionError> {
        tuple
            .get_value(self.column_index)
            .cloned()
            .ok_or(ExpressionError::ColumnOutOfBounds {
                index: self.column_index,
                column_count: tuple.get_column_count(),
            })
    }

    pub fn evaluate_join(
        &self,
        left_tuple: &Tuple,
        right_tuple: &Tuple,
    ) -> Result<Value, ExpressionError> {
        let tuple = if self.tuple_index == 0 {
            left_tuple
        } else {
            right_tuple
        };
        self.evaluate(tuple)
    }
}

impl Display for ColumnRefExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#{}.{}", self.tuple_index, self.column_index)
    }
}

impl From<ColumnRefExpression> for Expression {
    fn from(expr: ColumnRefExpression) -> Self {
        Expression::ColumnRef(expr)
    }
}
