use crate::common::exception::ExecutorError;
use crate::execution::executors::abstract_executor::{
    check_child_count, AbstractExecutor, BoxedExecutor, ExecuteResult,
};
use crate::execution::logical_tile::LogicalTile;
use crate::execution::plans::abstract_plan::AbstractPlanNode;
use crate::execution::plans::order_by_plan::{OrderByPlanNode, SortDirection};
use crate::storage::tuple::Tuple;
use crate::types_db::value::Value;
use std::cmp::Ordering;
use std::sync::Arc;

/// Full materializing sort: drains the child, sorts once, emits one tile.
pub struct OrderByExecutor {
    plan: OrderByPlanNode,
    children: Vec<BoxedExecutor>,
    output: Option<LogicalTile>,
    done: bool,
}

impl OrderByExecutor {
    pub fn new(plan: OrderByPlanNode) -> Self {
        Self {
            plan,
            children: Vec::new(),
            output: None,
            done: false,
        }
    }

    fn compare(&self, a: &Tuple, b: &Tuple) -> Ordering {
        for (column, direction) in self.plan.get_sort_keys() {
            let lhs = a.get_value(*column).unwrap_or(&Value::Null);
            let rhs = b.get_value(*column).unwrap_or(&Value::Null);
            let ordering = match direction {
                SortDirection::Ascending => lhs.cmp(rhs),
                SortDirection::Descending => rhs.cmp(lhs),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

impl AbstractExecutor for OrderByExecutor {
    fn init(&mut self) -> Result<(), ExecutorError> {
        check_child_count(&self.children, 1, "OrderByExecutor")?;
        self.done = false;
        self.children[0].init()
    }

    fn execute(&mut self) -> ExecuteResult {
        if self.done {
            return ExecuteResult::Exhausted;
        }
        self.done = true;

        let mut rows = Vec::new();
        loop {
            match self.children[0].execute() {
                ExecuteResult::Produced => {
                    if let Some(tile) = self.children[0].get_output() {
                        rows.extend(tile.materialize());
                    }
                }
                ExecuteResult::Exhausted => break,
                ExecuteResult::Failed => return ExecuteResult::Failed,
            }
        }
        if rows.is_empty() {
            return ExecuteResult::Exhausted;
        }
        rows.sort_by(|a, b| self.compare(a, b));
        self.output = Some(LogicalTile::from_tuples(
            rows,
            Arc::clone(self.plan.get_output_schema()),
        ));
        ExecuteResult::Produced
    }

    fn get_output(&mut self) -> Option<LogicalTile> {
        self.output.take()
    }

    fn add_child(&mut self, child: BoxedExecutor) {
        self.children.push(child);
    }

    fn get_children(&mut self) -> &mut [BoxedExecutor] {
        &mut self.children
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::column::Column;
    use crate::catalog::schema::Schema;
    use crate::execution::executors::mock_scan_executor::MockScanExecutor;
    use crate::execution::plans::mock_scan_plan::MockScanPlanNode;
    use crate::types_db::type_id::TypeId;

    #[test]
    fn test_sort_descending() {
        let schema = Arc::new(Schema::new(vec![Column::new("x", TypeId::Integer)]));
        let source = MockScanPlanNode::new(
            Arc::clone(&schema),
            vec![
                vec![Tuple::new(vec![Value::Integer(2)])],
                vec![
                    Tuple::new(vec![Value::Integer(9)]),
                    Tuple::new(vec![Value::Integer(4)]),
                ],
            ],
        );
        let plan = OrderByPlanNode::new(
            schema,
            vec![(0, SortDirection::Descending)],
            source.clone().into(),
        );

        let mut executor = OrderByExecutor::new(plan);
        executor.add_child(Box::new(MockScanExecutor::new(source)));
        executor.init().unwrap();

        assert_eq!(executor.execute(), ExecuteResult::Produced);
        let tile = executor.get_output().unwrap();
        let values: Vec<_> = (0..tile.row_count())
            .map(|i| tile.get_value(i, 0).unwrap())
            .collect();
        assert_eq!(
            values,
            vec![Value::Integer(9), Value::Integer(4), Value::Integer(2)]
        );
        assert_eq!(executor.execute(), ExecuteResult::Exhausted);
    }
}
