use crate::catalog::schema::Schema;
use crate::common::config::Oid;
use crate::execution::expressions::project_info::ProjectInfo;
use crate::execution::plans::abstract_plan::{AbstractPlanNode, PlanNode, PlanType};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Updates the rows its child produces, rewriting them through the project
/// info. The child is typically a scan over the target table.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdatePlanNode {
    output_schema: Arc<Schema>,
    table_oid: Oid,
    project_info: Arc<ProjectInfo>,
    children: Vec<PlanNode>,
}

impl UpdatePlanNode {
    pub fn new(
        output_schema: Arc<Schema>,
        table_oid: Oid,
        project_info: Arc<ProjectInfo>,
        child: PlanNode,
    ) -> Self {
        Self {
            output_schema,
            table_oid,
            project_info,
            children: vec![child],
        }
    }

    pub fn get_table_oid(&self) -> Oid {
        self.table_oid
    }

    pub fn get_project_info(&self) -> &Arc<ProjectInfo> {
        &self.project_info
    }
}

impl AbstractPlanNode for UpdatePlanNode {
    fn get_output_schema(&self) -> &Arc<Schema> {
        &self.output_schema
    }

    fn get_children(&self) -> &[PlanNode] {
        &self.children
    }

    fn get_type(&self) -> PlanType {
        PlanType::Update
    }
}

impl Display for UpdatePlanNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Update: table {} ({} targets)",
            self.table_oid,
            self.project_info.get_target_list().len()
        )
    }
}

impl From<UpdatePlanNode> for PlanNode {
    fn from(node: UpdatePlanNode) -> Self {
        PlanNode::Update(node)
    }
}
