use crate::common::exception::ExpressionError;
use crate::execution::expressions::abstract_expression::Expression;
use crate::types_db::value::Value;
use std::fmt;
use std::fmt::{Display, Formatter};

/// Placeholder bound to a statement parameter by position.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterExpression {
    param_index: usize,
}

impl ParameterExpression {
    pub fn new(param_index: usize) -> Self {
        Self { param_index }
    }

    pub fn get_param_index(&self) -> usize {
        self.param_index
    }

    pub fn evaluate(&self, params: &[Value]) -> Result<Value, ExpressionError> {
        params
            .get(self.param_index)
            .cloned()
            .ok_or(ExpressionError::ParameterOutOfBounds {
                index: self.param_index,
                param_count: params.len(),
            })
    }
}

impl Display for ParameterExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.param_index)
    }
}

impl From<ParameterExpression> for Expression {
    fn from(expr: ParameterExpression) -> Self {
        Expression::Parameter(expr)
    }
}
