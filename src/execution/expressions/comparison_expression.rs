use crate::common::exception::ExpressionError;
use crate::execution::expressions::abstract_expression::{Expression, ExpressionOps};
use crate::storage::tuple::Tuple;
use crate::types_db::value::Value;
use std::cmp::Ordering;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonType {
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonExpression {
    left: Arc<Expression>,
    right: Arc<Expression>,
    comp_type: ComparisonType,
}

impl ComparisonExpression {
    pub fn new(left: Arc<Expression>, right: Arc<Expression>, comp_type: ComparisonType) -> Self {
        Self {
            left,
            right,
            comp_type,
        }
    }

    pub fn get_comp_type(&self) -> ComparisonType {
        self.comp_type
    }

    pub fn evaluate(&self, tuple: &Tuple, params: &[Value]) -> Result<Value, ExpressionError> {
        let lhs = self.left.evaluate(tuple, params)?;
        let rhs = self.right.evaluate(tuple, params)?;
        Ok(Value::Boolean(self.perform_comparison(&lhs, &rhs)))
    }

    pub fn evaluate_join(
        &self,
        left_tuple: &Tuple,
        right_tuple: &Tuple,
        params: &[Value],
    ) -> Result<Value, ExpressionError> {
        let lhs = self.left.evaluate_join(left_tuple, right_tuple, params)?;
        let rhs = self.right.evaluate_join(left_tuple, right_tuple, params)?;
        Ok(Value::Boolean(self.perform_comparison(&lhs, &rhs)))
    }

    fn perform_comparison(&self, lhs: &Value, rhs: &Value) -> bool {
        let ordering = lhs.cmp(rhs);
        match self.comp_type {
            ComparisonType::Equal => ordering == Ordering::Equal,
            ComparisonType::NotEqual => ordering != Ordering::Equal,
            ComparisonType::LessThan => ordering == Ordering::Less,
            ComparisonType::LessThanOrEqual => ordering != Ordering::Greater,
            ComparisonType::GreaterThan => ordering == Ordering::Greater,
            ComparisonType::GreaterThanOrEqual => ordering != Ordering::Less,
        }
    }
}

impl Display for ComparisonType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ComparisonType::Equal => write!(f, "="),
            ComparisonType::NotEqual => write!(f, "!="),
            ComparisonType::LessThan => write!(f, "<"),
            ComparisonType::LessThanOrEqual => write!(f, "<="),
            ComparisonType::GreaterThan => write!(f, ">"),
            ComparisonType::GreaterThanOrEqual => write!(f, ">="),
        }
    }
}

impl Display for ComparisonExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {})", self.left, self.comp_type, self.right)
    }
}

impl From<ComparisonExpression> for Expression {
    fn from(expr: ComparisonExpression) -> Self {
        Expression::Comparison(expr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::execution::expressions::column_value_expression::ColumnRefExpression;
    use crate::execution::expressions::constant_value_expression::ConstantExpression;

    fn column(idx: usize) -> Arc<Expression> {
        Arc::new(ColumnRefExpression::new(0, idx).into())
    }

    fn constant(value: Value) -> Arc<Expression> {
        Arc::new(ConstantExpression::new(value).into())
    }

    #[test]
    fn test_comparison_on_tuple() {
        let tuple = Tuple::new(vec![Value::Integer(5), Value::Integer(10)]);
        let expr = ComparisonExpression::new(
            column(0),
            constant(Value::Integer(10)),
            ComparisonType::LessThan,
        );
        assert_eq!(expr.evaluate(&tuple, &[]), Ok(Value::Boolean(true)));

        let expr = ComparisonExpression::new(column(0), column(1), ComparisonType::Equal);
        assert_eq!(expr.evaluate(&tuple, &[]), Ok(Value::Boolean(false)));
    }

    #[test]
    fn test_cross_type_numeric_comparison() {
        let tuple = Tuple::new(vec![Value::Integer(5)]);
        let expr = ComparisonExpression::new(
            column(0),
            constant(Value::Decimal(5.0)),
            ComparisonType::Equal,
        );
        assert_eq!(expr.evaluate(&tuple, &[]), Ok(Value::Boolean(true)));
    }
}
