use crate::common::exception::ExecutorError;
use crate::execution::executors::abstract_executor::{
    check_child_count, AbstractExecutor, BoxedExecutor, ExecuteResult,
};
use crate::execution::logical_tile::LogicalTile;
use crate::execution::plans::abstract_plan::AbstractPlanNode;
use crate::execution::plans::mock_scan_plan::MockScanPlanNode;

/// Emits the plan's canned batches one tile at a time. Used to drive
/// executor trees in tests without touching storage.
pub struct MockScanExecutor {
    plan: MockScanPlanNode,
    children: Vec<BoxedExecutor>,
    output: Option<LogicalTile>,
    cursor: usize,
}

impl MockScanExecutor {
    pub fn new(plan: MockScanPlanNode) -> Self {
        Self {
            plan,
            children: Vec::new(),
            output: None,
            cursor: 0,
        }
    }
}

impl AbstractExecutor for MockScanExecutor {
    fn init(&mut self) -> Result<(), ExecutorError> {
        check_child_count(&self.children, 0, "MockScanExecutor")?;
        self.cursor = 0;
        Ok(())
    }

    fn execute(&mut self) -> ExecuteResult {
        match self.plan.get_batches().get(self.cursor) {
            Some(batch) => {
                self.cursor += 1;
                self.output = Some(LogicalTile::from_tuples(
                    batch.clone(),
                    self.plan.get_output_schema().clone(),
                ));
                ExecuteResult::Produced
            }
            None => ExecuteResult::Exhausted,
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
    use crate::storage::tuple::Tuple;
    use crate::types_db::type_id::TypeId;
    use crate::types_db::value::Value;
    use std::sync::Arc;

    #[test]
    fn test_mock_scan_emits_batches_then_stays_exhausted() {
        let schema = Arc::new(Schema::new(vec![Column::new("id", TypeId::Integer)]));
        let plan = MockScanPlanNode::new(
            schema,
            vec![
                vec![Tuple::new(vec![Value::Integer(1)])],
                vec![Tuple::new(vec![Value::Integer(2)])],
            ],
        );
        let mut executor = MockScanExecutor::new(plan);
        executor.init().unwrap();

        assert_eq!(executor.execute(), ExecuteResult::Produced);
        assert_eq!(executor.get_output().unwrap().row_count(), 1);
        assert_eq!(executor.execute(), ExecuteResult::Produced);
        assert_eq!(executor.execute(), ExecuteResult::Exhausted);
        // Exhaustion is idempotent.
        assert_eq!(executor.execute(), ExecuteResult::Exhausted);
    }
}
