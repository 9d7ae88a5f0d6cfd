pub mod data_table;
pub mod storage_manager;
pub mod tile_group;
pub mod tuple;
