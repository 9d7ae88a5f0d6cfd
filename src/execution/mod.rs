pub mod executor_context;
pub mod executor_factory;
pub mod executors;
pub mod expressions;
pub mod logical_tile;
pub mod plan_executor;
pub mod plans;
