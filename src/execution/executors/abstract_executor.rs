use crate::common::exception::ExecutorError;
use crate::execution::logical_tile::LogicalTile;

/// Outcome of one pull on an executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecuteResult {
    /// A batch was produced; fetch it with `get_output`. DML operators may
    /// produce without an output tile.
    Produced,
    /// No more batches. Further pulls keep returning Exhausted.
    Exhausted,
    /// The operator hit a conflict or runtime error; the transaction result
    /// carries the reason. The caller stops pulling.
    Failed,
}

/// Pull-based executor in the Volcano style, one logical tile per pull.
///
/// Lifecycle: construct, attach children, `init` once top-down, then pull
/// `execute` until it stops returning Produced. Teardown is `Drop`; there is
/// no explicit close call, dropping the root drops the whole tree.
pub trait AbstractExecutor {
    /// One-time setup. Must be called before the first `execute`.
    fn init(&mut self) -> Result<(), ExecutorError>;

    /// Produces the next batch.
    fn execute(&mut self) -> ExecuteResult;

    /// Takes the batch produced by the last `execute`.
    fn get_output(&mut self) -> Option<LogicalTile>;

    fn add_child(&mut self, child: BoxedExecutor);

    fn get_children(&mut self) -> &mut [BoxedExecutor];
}

pub type BoxedExecutor = Box<dyn AbstractExecutor>;

/// Verifies an executor was wired with the child count its plan requires.
pub fn check_child_count(
    children: &[BoxedExecutor],
    expected: usize,
    executor_name: &str,
) -> Result<(), ExecutorError> {
    if children.len() == expected {
        Ok(())
    } else {
        Err(ExecutorError::InitializationFailure(format!(
            "{} expects {} children, got {}",
            executor_name,
            expected,
            children.len()
        )))
    }
}
