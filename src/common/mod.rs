pub mod config;
pub mod exception;
pub mod item_pointer;
pub mod logger;
