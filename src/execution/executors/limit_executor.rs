use crate::common::exception::ExecutorError;
use crate::execution::executors::abstract_executor::{
    check_child_count, AbstractExecutor, BoxedExecutor, ExecuteResult,
};
use crate::execution::logical_tile::LogicalTile;
use crate::execution::plans::abstract_plan::AbstractPlanNode;
use crate::execution::plans::limit_plan::LimitPlanNode;
use std::sync::Arc;

/// Applies offset/limit across child batches, trimming position lists at
/// the batch boundaries and stopping the pull early once the quota is met.
pub struct LimitExecutor {
    plan: LimitPlanNode,
    children: Vec<BoxedExecutor>,
    skipped: usize,
    returned: usize,
    output: Option<LogicalTile>,
}

impl LimitExecutor {
    pub fn new(plan: LimitPlanNode) -> Self {
        Self {
            plan,
            children: Vec::new(),
            skipped: 0,
            returned: 0,
            output: None,
        }
    }
}

impl AbstractExecutor for LimitExecutor {
    fn init(&mut self) -> Result<(), ExecutorError> {
        check_child_count(&self.children, 1, "LimitExecutor")?;
        self.skipped = 0;
        self.returned = 0;
        self.children[0].init()
    }

    fn execute(&mut self) -> ExecuteResult {
        loop {
            if self.returned >= self.plan.get_limit() {
                return ExecuteResult::Exhausted;
            }
            match self.children[0].execute() {
                ExecuteResult::Produced => {}
                other => return other,
            }
            let tile = match self.children[0].get_output() {
                Some(tile) => tile,
                None => continue,
            };

            let mut rows: Vec<usize> = (0..tile.row_count()).collect();
            // Burn through the remaining offset first.
            let to_skip = (self.plan.get_offset() - self.skipped).min(rows.len());
            self.skipped += to_skip;
            rows.drain(..to_skip);

            let quota = self.plan.get_limit() - self.returned;
            rows.truncate(quota);
            if rows.is_empty() {
                continue;
            }
            self.returned += rows.len();

            let tuples: Vec<_> = rows.into_iter().filter_map(|i| tile.get_tuple(i)).collect();
            self.output = Some(LogicalTile::from_tuples(
                tuples,
                Arc::clone(self.plan.get_output_schema()),
            ));
            return ExecuteResult::Produced;
        }
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
    use crate::storage::tuple::Tuple;
    use crate::types_db::type_id::TypeId;
    use crate::types_db::value::Value;

    fn int_schema() -> Arc<Schema> {
        Arc::new(Schema::new(vec![Column::new("id", TypeId::Integer)]))
    }

    fn mock_batches(batches: Vec<Vec<i32>>) -> BoxedExecutor {
        let tuples = batches
            .into_iter()
            .map(|batch| {
                batch
                    .into_iter()
                    .map(|v| Tuple::new(vec![Value::Integer(v)]))
                    .collect()
            })
            .collect();
        Box::new(MockScanExecutor::new(MockScanPlanNode::new(
            int_schema(),
            tuples,
        )))
    }

    #[test]
    fn test_limit_with_offset_spanning_batches() {
        let child_plan = mock_batches(vec![vec![1, 2, 3], vec![4, 5, 6], vec![7]]);
        let plan = LimitPlanNode::new(
            int_schema(),
            3,
            2,
            MockScanPlanNode::new(int_schema(), Vec::new()).into(),
        );
        let mut executor = LimitExecutor::new(plan);
        executor.add_child(child_plan);
        executor.init().unwrap();

        let mut seen = Vec::new();
        while executor.execute() == ExecuteResult::Produced {
            let tile = executor.get_output().unwrap();
            for i in 0..tile.row_count() {
                seen.push(tile.get_value(i, 0).unwrap());
            }
        }
        assert_eq!(
            seen,
            vec![Value::Integer(3), Value::Integer(4), Value::Integer(5)]
        );
    }
}
