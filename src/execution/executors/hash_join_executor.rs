use crate::common::exception::ExecutorError;
use crate::execution::executors::abstract_executor::{
    check_child_count, AbstractExecutor, BoxedExecutor, ExecuteResult,
};
use crate::execution::logical_tile::LogicalTile;
use crate::execution::plans::abstract_plan::AbstractPlanNode;
use crate::execution::plans::hash_join_plan::HashJoinPlanNode;
use crate::storage::tuple::Tuple;
use crate::types_db::value::Value;
use log::debug;
use std::collections::HashMap;
use std::sync::Arc;
use xxhash_rust::xxh3::Xxh3Builder;

type JoinTable = HashMap<Vec<Value>, Vec<Tuple>, Xxh3Builder>;

/// Equi-join: build side is the right child, probe side is the left.
/// Rows with a Null join key never match anything.
pub struct HashJoinExecutor {
    plan: HashJoinPlanNode,
    children: Vec<BoxedExecutor>,
    build_table: JoinTable,
    built: bool,
    output: Option<LogicalTile>,
}

impl HashJoinExecutor {
    pub fn new(plan: HashJoinPlanNode) -> Self {
        Self {
            plan,
            children: Vec::new(),
            build_table: JoinTable::with_hasher(Xxh3Builder::new()),
            built: false,
            output: None,
        }
    }

    fn extract_key(tuple: &Tuple, columns: &[usize]) -> Option<Vec<Value>> {
        let mut key = Vec::with_capacity(columns.len());
        for column in columns {
            let value = tuple.get_value(*column)?;
            if value.is_null() {
                return None;
            }
            key.push(value.clone());
        }
        Some(key)
    }

    fn build(&mut self) -> ExecuteResult {
        loop {
            match self.children[1].execute() {
                ExecuteResult::Produced => {
                    let tile = match self.children[1].get_output() {
                        Some(tile) => tile,
                        None => continue,
                    };
                    for tuple in tile.materialize() {
                        if let Some(key) =
                            Self::extract_key(&tuple, self.plan.get_right_key_columns())
                        {
                            self.build_table.entry(key).or_default().push(tuple);
                        }
                    }
                }
                ExecuteResult::Exhausted => {
                    debug!("Hash join built {} buckets", self.build_table.len());
                    self.built = true;
                    return ExecuteResult::Produced;
                }
                ExecuteResult::Failed => return ExecuteResult::Failed,
            }
        }
    }
}

impl AbstractExecutor for HashJoinExecutor {
    fn init(&mut self) -> Result<(), ExecutorError> {
        check_child_count(&self.children, 2, "HashJoinExecutor")?;
        if self.plan.get_left_key_columns().len() != self.plan.get_right_key_columns().len() {
            return Err(ExecutorError::InitializationFailure(
                "hash join key column lists differ in length".to_string(),
            ));
        }
        self.children[0].init()?;
        self.children[1].init()
    }

    fn execute(&mut self) -> ExecuteResult {
        if !self.built && self.build() == ExecuteResult::Failed {
            return ExecuteResult::Failed;
        }

        loop {
            match self.children[0].execute() {
                ExecuteResult::Produced => {}
                other => return other,
            }
            let tile = match self.children[0].get_output() {
                Some(tile) => tile,
                None => continue,
            };

            let mut joined = Vec::new();
            for probe_tuple in tile.materialize() {
                let key = match Self::extract_key(&probe_tuple, self.plan.get_left_key_columns()) {
                    Some(key) => key,
                    None => continue,
                };
                if let Some(matches) = self.build_table.get(&key) {
                    for build_tuple in matches {
                        let mut values = probe_tuple.get_values().to_vec();
                        values.extend(build_tuple.get_values().iter().cloned());
                        joined.push(Tuple::new(values));
                    }
                }
            }
            if joined.is_empty() {
                continue;
            }
            self.output = Some(LogicalTile::from_tuples(
                joined,
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
    use crate::types_db::type_id::TypeId;

    fn pair_schema() -> Arc<Schema> {
        Arc::new(Schema::new(vec![
            Column::new("k", TypeId::Integer),
            Column::new("v", TypeId::Integer),
        ]))
    }

    fn row(k: i32, v: i32) -> Tuple {
        Tuple::new(vec![Value::Integer(k), Value::Integer(v)])
    }

    #[test]
    fn test_hash_join_matches_by_key() {
        let schema = pair_schema();
        let joined_schema = Arc::new(Schema::join(&schema, &schema));

        let left = MockScanPlanNode::new(
            Arc::clone(&schema),
            vec![vec![row(1, 10), row(2, 20), row(3, 30)]],
        );
        let right =
            MockScanPlanNode::new(Arc::clone(&schema), vec![vec![row(2, 200), row(2, 201)]]);
        let plan = HashJoinPlanNode::new(
            joined_schema,
            vec![0],
            vec![0],
            left.clone().into(),
            right.clone().into(),
        );

        let mut executor = HashJoinExecutor::new(plan);
        executor.add_child(Box::new(MockScanExecutor::new(left)));
        executor.add_child(Box::new(MockScanExecutor::new(right)));
        executor.init().unwrap();

        assert_eq!(executor.execute(), ExecuteResult::Produced);
        let tile = executor.get_output().unwrap();
        // Left row 2 matches both build rows.
        assert_eq!(tile.row_count(), 2);
        assert_eq!(tile.get_value(0, 0), Some(Value::Integer(2)));
        assert_eq!(tile.get_value(1, 3), Some(Value::Integer(201)));
        assert_eq!(executor.execute(), ExecuteResult::Exhausted);
    }
}
