pub mod abstract_plan;
pub mod aggregation_plan;
pub mod create_table_plan;
pub mod delete_plan;
pub mod drop_table_plan;
pub mod hash_join_plan;
pub mod index_scan_plan;
pub mod insert_plan;
pub mod limit_plan;
pub mod materialization_plan;
pub mod mock_scan_plan;
pub mod nested_loop_join_plan;
pub mod order_by_plan;
pub mod projection_plan;
pub mod seq_scan_plan;
pub mod update_plan;
