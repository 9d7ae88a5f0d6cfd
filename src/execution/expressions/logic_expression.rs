use crate::common::exception::ExpressionError;
use crate::execution::expressions::abstract_expression::{Expression, ExpressionOps};
use crate::storage::tuple::Tuple;
use crate::types_db::value::Value;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicType {
    And,
    Or,
    Not,
}

/// Boolean connective. `Not` ignores its right child.
#[derive(Debug, Clone, PartialEq)]
pub struct LogicExpression {
    left: Arc<Expression>,
    right: Option<Arc<Expression>>,
    logic_type: LogicType,
}

impl LogicExpression {
    pub fn new(left: Arc<Expression>, right: Arc<Expression>, logic_type: LogicType) -> Self {
        Self {
            left,
            right: Some(right),
            logic_type,
        }
    }

    pub fn negation(child: Arc<Expression>) -> Self {
        Self {
            left: child,
            right: None,
            logic_type: LogicType::Not,
        }
    }

    pub fn get_logic_type(&self) -> LogicType {
        self.logic_type
    }

    pub fn evaluate(&self, tuple: &Tuple, params: &[Value]) -> Result<Value, ExpressionError> {
        let lhs = self.left.evaluate(tuple, params)?.is_true();
        let result = match self.logic_type {
            LogicType::Not => !lhs,
            LogicType::And => {
                lhs && self.right_child()?.evaluate(tuple, params)?.is_true()
            }
            LogicType::Or => {
                lhs || self.right_child()?.evaluate(tuple, params)?.is_true()
            }
        };
        Ok(Value::Boolean(result))
    }

    pub fn evaluate_join(
        &self,
        left_tuple: &Tuple,
        right_tuple: &Tuple,
        params: &[Value],
    ) -> Result<Value, ExpressionError> {
        let lhs = self
            .left
            .evaluate_join(left_tuple, right_tuple, params)?
            .is_true();
        let result = match self.logic_type {
            LogicType::Not => !lhs,
            LogicType::And => {
                lhs && self
                    .right_child()?
                    .evaluate_join(left_tuple, right_tuple, params)?
                    .is_true()
            }
            LogicType::Or => {
                lhs || self
                    .right_child()?
                    .evaluate_join(left_tuple, right_tuple, params)?
                    .is_true()
            }
        };
        Ok(Value::Boolean(result))
    }

    fn right_child(&self) -> Result<&Arc<Expression>, ExpressionError> {
        self.right.as_ref().ok_or_else(|| {
            ExpressionError::TypeMismatch("binary logic expression missing right child".to_string())
        })
    }
}

impl Display for LogicExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match (self.logic_type, &self.right) {
            (LogicType::Not, _) => write!(f, "(NOT {})", self.left),
            (LogicType::And, Some(right)) => write!(f, "({} AND {})", self.left, right),
            (LogicType::Or, Some(right)) => write!(f, "({} OR {})", self.left, right),
            _ => write!(f, "({})", self.left),
        }
    }
}

impl From<LogicExpression> for Expression {
    fn from(expr: LogicExpression) -> Self {
        Expression::Logic(expr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::execution::expressions::column_value_expression::ColumnRefExpression;
    use crate::execution::expressions::comparison_expression::{
        ComparisonExpression, ComparisonType,
    };
    use crate::execution::expressions::constant_value_expression::ConstantExpression;

    fn column_gt(idx: usize, threshold: i32) -> Arc<Expression> {
        Arc::new(
            ComparisonExpression::new(
                Arc::new(ColumnRefExpression::new(0, idx).into()),
                Arc::new(ConstantExpression::new(Value::Integer(threshold)).into()),
                ComparisonType::GreaterThan,
            )
            .into(),
        )
    }

    #[test]
    fn test_and_or_not() {
        let tuple = Tuple::new(vec![Value::Integer(5), Value::Integer(50)]);

        let both = LogicExpression::new(column_gt(0, 0), column_gt(1, 100), LogicType::And);
        assert_eq!(both.evaluate(&tuple, &[]), Ok(Value::Boolean(false)));

        let either = LogicExpression::new(column_gt(0, 0), column_gt(1, 100), LogicType::Or);
        assert_eq!(either.evaluate(&tuple, &[]), Ok(Value::Boolean(true)));

        let negated = LogicExpression::negation(column_gt(1, 100));
        assert_eq!(negated.evaluate(&tuple, &[]), Ok(Value::Boolean(true)));
    }
}
