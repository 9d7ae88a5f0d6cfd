use crate::catalog::schema::Schema;
use crate::common::config::Oid;
use crate::execution::expressions::abstract_expression::Expression;
use crate::execution::plans::abstract_plan::{AbstractPlanNode, PlanNode, PlanType};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Full-table scan, optionally filtered by a predicate evaluated per tuple.
#[derive(Debug, Clone, PartialEq)]
pub struct SeqScanPlanNode {
    output_schema: Arc<Schema>,
    table_oid: Oid,
    table_name: String,
    predicate: Option<Arc<Expression>>,
    children: Vec<PlanNode>,
}

impl SeqScanPlanNode {
    pub fn new(
        output_schema: Arc<Schema>,
        table_oid: Oid,
        table_name: String,
        predicate: Option<Arc<Expression>>,
    ) -> Self {
        Self {
            output_schema,
            table_oid,
            table_name,
            predicate,
            children: Vec::new(),
        }
    }

    pub fn get_table_oid(&self) -> Oid {
        self.table_oid
    }

    pub fn get_table_name(&self) -> &str {
        &self.table_name
    }

    pub fn get_predicate(&self) -> Option<&Arc<Expression>> {
        self.predicate.as_ref()
    }
}

impl AbstractPlanNode for SeqScanPlanNode {
    fn get_output_schema(&self) -> &Arc<Schema> {
        &self.output_schema
    }

    fn get_children(&self) -> &[PlanNode] {
        &self.children
    }

    fn get_type(&self) -> PlanType {
        PlanType::SeqScan
    }
}

impl Display for SeqScanPlanNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "SeqScan: {}", self.table_name)?;
        if let Some(predicate) = &self.predicate {
            write!(f, " filter {}", predicate)?;
        }
        Ok(())
    }
}

impl From<SeqScanPlanNode> for PlanNode {
    fn from(node: SeqScanPlanNode) -> Self {
        PlanNode::SeqScan(node)
    }
}
