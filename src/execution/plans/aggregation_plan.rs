use crate::catalog::schema::Schema;
use crate::execution::plans::abstract_plan::{AbstractPlanNode, PlanNode, PlanType};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateType {
    CountStar,
    Count,
    Sum,
    Min,
    Max,
    Avg,
}

/// One aggregate to compute; `column` is None only for CountStar.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateTerm {
    pub aggregate_type: AggregateType,
    pub column: Option<usize>,
}

impl AggregateTerm {
    pub fn new(aggregate_type: AggregateType, column: Option<usize>) -> Self {
        Self {
            aggregate_type,
            column,
        }
    }
}

/// Hash aggregation over the child, grouped by `group_by_columns`. Output
/// rows carry the group-by values first, then one column per term.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationPlanNode {
    output_schema: Arc<Schema>,
    group_by_columns: Vec<usize>,
    terms: Vec<AggregateTerm>,
    children: Vec<PlanNode>,
}

impl AggregationPlanNode {
    pub fn new(
        output_schema: Arc<Schema>,
        group_by_columns: Vec<usize>,
        terms: Vec<AggregateTerm>,
        child: PlanNode,
    ) -> Self {
        Self {
            output_schema,
            group_by_columns,
            terms,
            children: vec![child],
        }
    }

    pub fn get_group_by_columns(&self) -> &[usize] {
        &self.group_by_columns
    }

    pub fn get_terms(&self) -> &[AggregateTerm] {
        &self.terms
    }
}

impl AbstractPlanNode for AggregationPlanNode {
    fn get_output_schema(&self) -> &Arc<Schema> {
        &self.output_schema
    }

    fn get_children(&self) -> &[PlanNode] {
        &self.children
    }

    fn get_type(&self) -> PlanType {
        PlanType::Aggregation
    }
}

impl Display for AggregateType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            AggregateType::CountStar => write!(f, "count(*)"),
            AggregateType::Count => write!(f, "count"),
            AggregateType::Sum => write!(f, "sum"),
            AggregateType::Min => write!(f, "min"),
            AggregateType::Max => write!(f, "max"),
            AggregateType::Avg => write!(f, "avg"),
        }
    }
}

impl Display for AggregationPlanNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Aggregation: {} terms, group by {:?}",
            self.terms.len(),
            self.group_by_columns
        )
    }
}

impl From<AggregationPlanNode> for PlanNode {
    fn from(node: AggregationPlanNode) -> Self {
        PlanNode::Aggregation(node)
    }
}
