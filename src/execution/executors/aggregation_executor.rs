use crate::common::exception::ExecutorError;
use crate::execution::executors::abstract_executor::{
    check_child_count, AbstractExecutor, BoxedExecutor, ExecuteResult,
};
use crate::execution::logical_tile::LogicalTile;
use crate::execution::plans::abstract_plan::AbstractPlanNode;
use crate::execution::plans::aggregation_plan::{AggregateType, AggregationPlanNode};
use crate::storage::tuple::Tuple;
use crate::types_db::value::Value;
use std::collections::HashMap;
use std::sync::Arc;
use xxhash_rust::xxh3::Xxh3Builder;

/// Running state for one aggregate term within one group.
#[derive(Debug, Clone, Default)]
struct Accumulator {
    count: u64,
    sum: Option<Value>,
    min: Option<Value>,
    max: Option<Value>,
}

impl Accumulator {
    fn advance(&mut self, value: Option<&Value>) {
        let value = match value {
            Some(value) if !value.is_null() => value,
            _ => return,
        };
        self.count += 1;
        self.sum = Some(match &self.sum {
            Some(sum) => sum.add(value).unwrap_or(Value::Null),
            None => value.clone(),
        });
        self.min = Some(match &self.min {
            Some(min) if min <= value => min.clone(),
            _ => value.clone(),
        });
        self.max = Some(match &self.max {
            Some(max) if max >= value => max.clone(),
            _ => value.clone(),
        });
    }

    fn finish(&self, aggregate_type: AggregateType, rows_in_group: u64) -> Value {
        match aggregate_type {
            AggregateType::CountStar => Value::BigInt(rows_in_group as i64),
            AggregateType::Count => Value::BigInt(self.count as i64),
            AggregateType::Sum => self.sum.clone().unwrap_or(Value::Null),
            AggregateType::Min => self.min.clone().unwrap_or(Value::Null),
            AggregateType::Max => self.max.clone().unwrap_or(Value::Null),
            AggregateType::Avg => match &self.sum {
                Some(sum) if self.count > 0 => sum
                    .divide(&Value::Decimal(self.count as f64))
                    .unwrap_or(Value::Null),
                _ => Value::Null,
            },
        }
    }
}

#[derive(Debug, Clone)]
struct GroupState {
    rows: u64,
    accumulators: Vec<Accumulator>,
}

/// Hash aggregation. The child is drained entirely on the first pull, then
/// every group comes out as a single tile. Ungrouped aggregation over empty
/// input still yields one row, so `count(*)` on an empty table is 0 rather
/// than no answer.
pub struct AggregationExecutor {
    plan: AggregationPlanNode,
    children: Vec<BoxedExecutor>,
    output: Option<LogicalTile>,
    done: bool,
}

impl AggregationExecutor {
    pub fn new(plan: AggregationPlanNode) -> Self {
        Self {
            plan,
            children: Vec::new(),
            output: None,
            done: false,
        }
    }

    fn aggregate_all(&mut self) -> Result<Vec<Tuple>, ExecuteResult> {
        let term_count = self.plan.get_terms().len();
        let mut groups: HashMap<Vec<Value>, GroupState, Xxh3Builder> =
            HashMap::with_hasher(Xxh3Builder::new());

        loop {
            match self.children[0].execute() {
                ExecuteResult::Produced => {
                    let tile = match self.children[0].get_output() {
                        Some(tile) => tile,
                        None => continue,
                    };
                    for tuple in tile.materialize() {
                        let key: Vec<Value> = self
                            .plan
                            .get_group_by_columns()
                            .iter()
                            .map(|idx| tuple.get_value(*idx).cloned().unwrap_or(Value::Null))
                            .collect();
                        let state = groups.entry(key).or_insert_with(|| GroupState {
                            rows: 0,
                            accumulators: vec![Accumulator::default(); term_count],
                        });
                        state.rows += 1;
                        for (term, accumulator) in
                            self.plan.get_terms().iter().zip(&mut state.accumulators)
                        {
                            if let Some(column) = term.column {
                                accumulator.advance(tuple.get_value(column));
                            }
                        }
                    }
                }
                ExecuteResult::Exhausted => break,
                ExecuteResult::Failed => return Err(ExecuteResult::Failed),
            }
        }

        if groups.is_empty() && self.plan.get_group_by_columns().is_empty() {
            groups.insert(
                Vec::new(),
                GroupState {
                    rows: 0,
                    accumulators: vec![Accumulator::default(); term_count],
                },
            );
        }

        let mut rows = Vec::with_capacity(groups.len());
        for (key, state) in groups {
            let mut values = key;
            for (term, accumulator) in self.plan.get_terms().iter().zip(&state.accumulators) {
                values.push(accumulator.finish(term.aggregate_type, state.rows));
            }
            rows.push(Tuple::new(values));
        }
        Ok(rows)
    }
}

impl AbstractExecutor for AggregationExecutor {
    fn init(&mut self) -> Result<(), ExecutorError> {
        check_child_count(&self.children, 1, "AggregationExecutor")?;
        self.done = false;
        self.children[0].init()
    }

    fn execute(&mut self) -> ExecuteResult {
        if self.done {
            return ExecuteResult::Exhausted;
        }
        self.done = true;
        match self.aggregate_all() {
            Ok(rows) => {
                if rows.is_empty() {
                    return ExecuteResult::Exhausted;
                }
                self.output = Some(LogicalTile::from_tuples(
                    rows,
                    Arc::clone(self.plan.get_output_schema()),
                ));
                ExecuteResult::Produced
            }
            Err(failed) => failed,
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
    use crate::execution::plans::aggregation_plan::AggregateTerm;
    use crate::execution::plans::mock_scan_plan::MockScanPlanNode;
    use crate::types_db::type_id::TypeId;

    fn row(group: i32, amount: i32) -> Tuple {
        Tuple::new(vec![Value::Integer(group), Value::Integer(amount)])
    }

    #[test]
    fn test_grouped_sum_and_count() {
        let in_schema = Arc::new(Schema::new(vec![
            Column::new("g", TypeId::Integer),
            Column::new("amount", TypeId::Integer),
        ]));
        let out_schema = Arc::new(Schema::new(vec![
            Column::new("g", TypeId::Integer),
            Column::new("total", TypeId::BigInt),
            Column::new("n", TypeId::BigInt),
        ]));
        let source = MockScanPlanNode::new(
            Arc::clone(&in_schema),
            vec![vec![row(1, 10), row(2, 5)], vec![row(1, 20)]],
        );
        let plan = AggregationPlanNode::new(
            out_schema,
            vec![0],
            vec![
                AggregateTerm::new(AggregateType::Sum, Some(1)),
                AggregateTerm::new(AggregateType::CountStar, None),
            ],
            source.clone().into(),
        );

        let mut executor = AggregationExecutor::new(plan);
        executor.add_child(Box::new(MockScanExecutor::new(source)));
        executor.init().unwrap();

        assert_eq!(executor.execute(), ExecuteResult::Produced);
        let tile = executor.get_output().unwrap();
        assert_eq!(tile.row_count(), 2);
        let mut totals = std::collections::HashMap::new();
        for i in 0..tile.row_count() {
            totals.insert(tile.get_value(i, 0).unwrap(), tile.get_value(i, 1).unwrap());
        }
        assert_eq!(totals[&Value::Integer(1)], Value::Integer(30));
        assert_eq!(totals[&Value::Integer(2)], Value::Integer(5));
        assert_eq!(executor.execute(), ExecuteResult::Exhausted);
    }

    #[test]
    fn test_count_star_over_empty_input() {
        let in_schema = Arc::new(Schema::new(vec![Column::new("x", TypeId::Integer)]));
        let out_schema = Arc::new(Schema::new(vec![Column::new("n", TypeId::BigInt)]));
        let source = MockScanPlanNode::new(Arc::clone(&in_schema), Vec::new());
        let plan = AggregationPlanNode::new(
            out_schema,
            Vec::new(),
            vec![AggregateTerm::new(AggregateType::CountStar, None)],
            source.clone().into(),
        );

        let mut executor = AggregationExecutor::new(plan);
        executor.add_child(Box::new(MockScanExecutor::new(source)));
        executor.init().unwrap();

        assert_eq!(executor.execute(), ExecuteResult::Produced);
        let tile = executor.get_output().unwrap();
        assert_eq!(tile.row_count(), 1);
        assert_eq!(tile.get_value(0, 0), Some(Value::BigInt(0)));
    }
}
