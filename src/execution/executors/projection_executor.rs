use crate::common::exception::ExecutorError;
use crate::concurrency::transaction::TransactionResult;
use crate::execution::executor_context::ExecutorContext;
use crate::execution::executors::abstract_executor::{
    check_child_count, AbstractExecutor, BoxedExecutor, ExecuteResult,
};
use crate::execution::expressions::abstract_expression::ExpressionOps;
use crate::execution::logical_tile::LogicalTile;
use crate::execution::plans::abstract_plan::AbstractPlanNode;
use crate::execution::plans::projection_plan::ProjectionPlanNode;
use crate::storage::tuple::Tuple;
use log::warn;
use std::sync::Arc;

/// Evaluates one expression per output column over each child row.
pub struct ProjectionExecutor {
    context: Arc<ExecutorContext>,
    plan: ProjectionPlanNode,
    children: Vec<BoxedExecutor>,
    output: Option<LogicalTile>,
}

impl ProjectionExecutor {
    pub fn new(context: Arc<ExecutorContext>, plan: ProjectionPlanNode) -> Self {
        Self {
            context,
            plan,
            children: Vec::new(),
            output: None,
        }
    }
}

impl AbstractExecutor for ProjectionExecutor {
    fn init(&mut self) -> Result<(), ExecutorError> {
        check_child_count(&self.children, 1, "ProjectionExecutor")?;
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

            let params = self.context.get_params();
            let mut projected = Vec::with_capacity(tile.row_count());
            for tuple in tile.materialize() {
                let mut values = Vec::with_capacity(self.plan.get_expressions().len());
                for expr in self.plan.get_expressions() {
                    match expr.evaluate(&tuple, params) {
                        Ok(value) => values.push(value),
                        Err(err) => {
                            warn!("Projection failed: {}", err);
                            let txn = self.context.get_transaction();
                            self.context
                                .get_transaction_manager()
                                .set_transaction_result(txn, TransactionResult::Failure);
                            return ExecuteResult::Failed;
                        }
                    }
                }
                projected.push(Tuple::new(values));
            }
            if projected.is_empty() {
                continue;
            }
            self.output = Some(LogicalTile::from_tuples(
                projected,
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
