use crate::common::exception::ExpressionError;
use crate::execution::expressions::arithmetic_expression::ArithmeticExpression;
use crate::execution::expressions::column_value_expression::ColumnRefExpression;
use crate::execution::expressions::comparison_expression::ComparisonExpression;
use crate::execution::expressions::constant_value_expression::ConstantExpression;
use crate::execution::expressions::logic_expression::LogicExpression;
use crate::execution::expressions::parameter_expression::ParameterExpression;
use crate::storage::tuple::Tuple;
use crate::types_db::value::Value;
use std::fmt;
use std::fmt::{Display, Formatter};

/// Closed expression tree evaluated against tuples at execution time.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Constant(ConstantExpression),
    ColumnRef(ColumnRefExpression),
    Parameter(ParameterExpression),
    Arithmetic(ArithmeticExpression),
    Comparison(ComparisonExpression),
    Logic(LogicExpression),
}

pub trait ExpressionOps {
    fn evaluate(&self, tuple: &Tuple, params: &[Value]) -> Result<Value, ExpressionError>;
    fn evaluate_join(
        &self,
        left_tuple: &Tuple,
        right_tuple: &Tuple,
        params: &[Value],
    ) -> Result<Value, ExpressionError>;
}

impl ExpressionOps for Expression {
    fn evaluate(&self, tuple: &Tuple, params: &[Value]) -> Result<Value, ExpressionError> {
        match self {
            Self::Constant(expr) => expr.evaluate(),
            Self::ColumnRef(expr) => expr.evaluate(tuple),
            Self::Parameter(expr) => expr.evaluate(params),
            Self::Arithmetic(expr) => expr.evaluate(tuple, params),
            Self::Comparison(expr) => expr.evaluate(tuple, params),
            Self::Logic(expr) => expr.evaluate(tuple, params),
        }
    }

    fn evaluate_join(
        &self,
        left_tuple: &Tuple,
        right_tuple: &Tuple,
        params: &[Value],
    ) -> Result<Value, ExpressionError> {
        match self {
            Self::Constant(expr) => expr.evaluate(),
            Self::ColumnRef(expr) => expr.evaluate_join(left_tuple, right_tuple),
            Self::Parameter(expr) => expr.evaluate(params),
            Self::Arithmetic(expr) => expr.evaluate_join(left_tuple, right_tuple, params),
            Self::Comparison(expr) => expr.evaluate_join(left_tuple, right_tuple, params),
            Self::Logic(expr) => expr.evaluate_join(left_tuple, right_tuple, params),
        }
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(expr) => write!(f, "{}", expr),
            Self::ColumnRef(expr) => write!(f, "{}", expr),
            Self::Parameter(expr) => write!(f, "{}", expr),
            Self::Arithmetic(expr) => write!(f, "{}", expr),
            Self::Comparison(expr) => write!(f, "{}", expr),
            Self::Logic(expr) => write!(f, "{}", expr),
        }
    }
}
