pub mod abstract_expression;
pub mod arithmetic_expression;
pub mod column_value_expression;
pub mod comparison_expression;
pub mod constant_value_expression;
pub mod logic_expression;
pub mod parameter_expression;
pub mod project_info;
