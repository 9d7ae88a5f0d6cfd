pub mod abstract_executor;
pub mod aggregation_executor;
pub mod create_table_executor;
pub mod delete_executor;
pub mod drop_table_executor;
pub mod hash_join_executor;
pub mod index_scan_executor;
pub mod insert_executor;
pub mod limit_executor;
pub mod materialization_executor;
pub mod mock_scan_executor;
pub mod nested_loop_join_executor;
pub mod order_by_executor;
pub mod projection_executor;
pub mod seq_scan_executor;
pub mod update_executor;
