use crate::common::exception::ExpressionError;
use crate::execution::expressions::abstract_expression::Expression;
use crate::types_db::value::Value;
use std::fmt;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq)]
pub struct ConstantExpression {
    value: Value,
}

impl ConstantExpression {
    pub fn new(value: Value) -> Self {
        Self { value }
    }

    pub fn get_value(&self) -> &Value {
        &self.value
    }

    pub fn evaluate(&self) -> Result<Value, ExpressionError> {
        Ok(self.value.clone())
    }
}

impl Display for ConstantExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl From<ConstantExpression> for Expression {
    fn from(expr: ConstantExpression) -> Self {
        Expression::Constant(expr)
    }
}
