use crate::common::exception::ExecutorError;
use crate::execution::executors::abstract_executor::{
    check_child_count, AbstractExecutor, BoxedExecutor, ExecuteResult,
};
use crate::execution::logical_tile::LogicalTile;
use crate::execution::plans::abstract_plan::AbstractPlanNode;
use crate::execution::plans::materialization_plan::MaterializationPlanNode;
use std::sync::Arc;

/// Turns positional tiles into owned rows so the output survives the
/// statement regardless of what happens to the underlying storage.
pub struct MaterializationExecutor {
    plan: MaterializationPlanNode,
    children: Vec<BoxedExecutor>,
    output: Option<LogicalTile>,
}

impl MaterializationExecutor {
    pub fn new(plan: MaterializationPlanNode) -> Self {
        Self {
            plan,
            children: Vec::new(),
            output: None,
        }
    }
}

impl AbstractExecutor for MaterializationExecutor {
    fn init(&mut self) -> Result<(), ExecutorError> {
        check_child_count(&self.children, 1, "MaterializationExecutor")?;
        self.children[0].init()
    }

    fn execute(&mut self) -> ExecuteResult {
        loop {
            match self.children[0].execute() {
                ExecuteResult::Produced => {}
                other => return other,
            }
            let tile = match self.children[0].get_output() {
                Some(tile) => tile,
                None => continue,
            };
            let tuples = tile.materialize();
            if tuples.is_empty() {
                continue;
            }
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
