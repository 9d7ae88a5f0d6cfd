use crate::catalog::schema::Schema;
use crate::common::exception::ExpressionError;
use crate::execution::expressions::abstract_expression::{Expression, ExpressionOps};
use crate::storage::tuple::Tuple;
use crate::types_db::value::Value;
use std::sync::Arc;

/// Projection specification for update-style operators.
///
/// The target list names the columns an update recomputes, each with the
/// expression producing its new value. The direct map list copies untouched
/// columns straight from the old tuple. Together they must cover the target
/// schema; uncovered columns come out Null, which is a plan construction bug
/// rather than a runtime condition.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectInfo {
    target_list: Vec<(usize, Arc<Expression>)>,
    direct_map_list: Vec<(usize, usize)>,
}

impl ProjectInfo {
    pub fn new(
        target_list: Vec<(usize, Arc<Expression>)>,
        direct_map_list: Vec<(usize, usize)>,
    ) -> Self {
        Self {
            target_list,
            direct_map_list,
        }
    }

    /// Convenience constructor: recompute the named columns, copy every
    /// other column of `schema` through unchanged.
    pub fn with_passthrough(
        target_list: Vec<(usize, Arc<Expression>)>,
        schema: &Schema,
    ) -> Self {
        let targeted: Vec<usize> = target_list.iter().map(|(idx, _)| *idx).collect();
        let direct_map_list = (0..schema.get_column_count())
            .filter(|idx| !targeted.contains(idx))
            .map(|idx| (idx, idx))
            .collect();
        Self {
            target_list,
            direct_map_list,
        }
    }

    pub fn get_target_list(&self) -> &[(usize, Arc<Expression>)] {
        &self.target_list
    }

    pub fn get_direct_map_list(&self) -> &[(usize, usize)] {
        &self.direct_map_list
    }

    /// Builds the new tuple an update writes, evaluating targets against the
    /// old tuple and the statement parameters.
    pub fn evaluate(
        &self,
        old_tuple: &Tuple,
        schema: &Schema,
        params: &[Value],
    ) -> Result<Tuple, ExpressionError> {
        let mut values = vec![Value::Null; schema.get_column_count()];
        for (dest, src) in &self.direct_map_list {
            if let Some(value) = old_tuple.get_value(*src) {
                values[*dest] = value.clone();
            }
        }
        for (dest, expr) in &self.target_list {
            values[*dest] = expr.evaluate(old_tuple, params)?;
        }
        Ok(Tuple::new(values))
    }
}
