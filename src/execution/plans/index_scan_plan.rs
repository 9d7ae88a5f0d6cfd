use crate::catalog::schema::Schema;
use crate::common::config::Oid;
use crate::execution::plans::abstract_plan::{AbstractPlanNode, PlanNode, PlanType};
use crate::types_db::value::Value;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Point lookup through a named index on the target table.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexScanPlanNode {
    output_schema: Arc<Schema>,
    table_oid: Oid,
    index_name: String,
    key: Value,
    children: Vec<PlanNode>,
}

impl IndexScanPlanNode {
    pub fn new(output_schema: Arc<Schema>, table_oid: Oid, index_name: String, key: Value) -> Self {
        Self {
            output_schema,
            table_oid,
            index_name,
            key,
            children: Vec::new(),
        }
    }

    pub fn get_table_oid(&self) -> Oid {
        self.table_oid
    }

    pub fn get_index_name(&self) -> &str {
        &self.index_name
    }

    pub fn get_key(&self) -> &Value {
        &self.key
    }
}

impl AbstractPlanNode for IndexScanPlanNode {
    fn get_output_schema(&self) -> &Arc<Schema> {
        &self.output_schema
    }

    fn get_children(&self) -> &[PlanNode] {
        &self.children
    }

    fn get_type(&self) -> PlanType {
        PlanType::IndexScan
    }
}

impl Display for IndexScanPlanNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "IndexScan: {} key {}", self.index_name, self.key)
    }
}

impl From<IndexScanPlanNode> for PlanNode {
    fn from(node: IndexScanPlanNode) -> Self {
        PlanNode::IndexScan(node)
    }
}
