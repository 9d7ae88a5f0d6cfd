pub mod catalog;
pub mod column;
pub mod schema;
