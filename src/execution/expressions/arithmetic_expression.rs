use crate::common::exception::ExpressionError;
use crate::execution::expressions::abstract_expression::{Expression, ExpressionOps};
use crate::storage::tuple::Tuple;
use crate::types_db::value::Value;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticType {
    Add,
    Subtract,
    Multiply,
    Divide,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArithmeticExpression {
    left: Arc<Expression>,
    right: Arc<Expression>,
    arithmetic_type: ArithmeticType,
}

impl ArithmeticExpression {
    pub fn new(
        left: Arc<Expression>,
        right: Arc<Expression>,
        arithmetic_type: ArithmeticType,
    ) -> Self {
        Self {
            left,
            right,
            arithmetic_type,
        }
    }

    pub fn get_arithmetic_type(&self) -> ArithmeticType {
        self.arithmetic_type
    }

    pub fn evaluate(&self, tuple: &Tuple, params: &[Value]) -> Result<Value, ExpressionError> {
        let lhs = self.left.evaluate(tuple, params)?;
        let rhs = self.right.evaluate(tuple, params)?;
        self.perform_arithmetic(&lhs, &rhs)
    }

    pub fn evaluate_join(
        &self,
        left_tuple: &Tuple,
        right_tuple: &Tuple,
        params: &[Value],
    ) -> Result<Value, ExpressionError> {
        let lhs = self.left.evaluate_join(left_tuple, right_tuple, params)?;
        let rhs = self.right.evaluate_join(left_tuple, right_tuple, params)?;
        self.perform_arithmetic(&lhs, &rhs)
    }

    fn perform_arithmetic(&self, lhs: &Value, rhs: &Value) -> Result<Value, ExpressionError> {
        match self.arithmetic_type {
            ArithmeticType::Add => lhs.add(rhs),
            ArithmeticType::Subtract => lhs.subtract(rhs),
            ArithmeticType::Multiply => lhs.multiply(rhs),
            ArithmeticType::Divide => lhs.divide(rhs),
        }
    }
}

impl Display for ArithmeticType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ArithmeticType::Add => write!(f, "+"),
            ArithmeticType::Subtract => write!(f, "-"),
            ArithmeticType::Multiply => write!(f, "*"),
            ArithmeticType::Divide => write!(f, "/"),
        }
    }
}

impl Display for ArithmeticExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {})", self.left, self.arithmetic_type, self.right)
    }
}

impl From<ArithmeticExpression> for Expression {
    fn from(expr: ArithmeticExpression) -> Self {
        Expression::Arithmetic(expr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::execution::expressions::column_value_expression::ColumnRefExpression;
    use crate::execution::expressions::constant_value_expression::ConstantExpression;
    use crate::execution::expressions::parameter_expression::ParameterExpression;

    #[test]
    fn test_add_column_and_parameter() {
        let tuple = Tuple::new(vec![Value::Integer(100)]);
        let expr = ArithmeticExpression::new(
            Arc::new(ColumnRefExpression::new(0, 0).into()),
            Arc::new(ParameterExpression::new(0).into()),
            ArithmeticType::Add,
        );
        assert_eq!(
            expr.evaluate(&tuple, &[Value::Integer(25)]),
            Ok(Value::Integer(125))
        );
    }

    #[test]
    fn test_division_by_zero_is_an_error() {
        let tuple = Tuple::new(vec![Value::Integer(1)]);
        let expr = ArithmeticExpression::new(
            Arc::new(ColumnRefExpression::new(0, 0).into()),
            Arc::new(ConstantExpression::new(Value::Integer(0)).into()),
            ArithmeticType::Divide,
        );
        assert_eq!(expr.evaluate(&tuple, &[]), Err(ExpressionError::DivisionByZero));
    }
}
