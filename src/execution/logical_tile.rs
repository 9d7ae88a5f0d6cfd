use crate::catalog::schema::Schema;
use crate::common::item_pointer::ItemPointer;
use crate::storage::tile_group::TileGroup;
use crate::storage::tuple::Tuple;
use crate::types_db::value::Value;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Backing storage for a logical tile: either a borrowed tile group that the
/// position list indexes into, or rows an operator materialized itself.
#[derive(Debug, Clone)]
pub enum TileSource {
    TileGroup(Arc<TileGroup>),
    Materialized(Vec<Tuple>),
}

/// The unit of data flow between executors.
///
/// Scans hand out position lists over a single tile group without copying
/// tuples; operators that synthesize rows (joins, aggregates, projections)
/// carry them materialized. Either way consumers read rows through the same
/// accessors and never care which form they got.
#[derive(Debug, Clone)]
pub struct LogicalTile {
    source: TileSource,
    position_list: Vec<u32>,
    schema: Arc<Schema>,
}

impl LogicalTile {
    pub fn from_tile_group(
        tile_group: Arc<TileGroup>,
        position_list: Vec<u32>,
        schema: Arc<Schema>,
    ) -> Self {
        Self {
            source: TileSource::TileGroup(tile_group),
            position_list,
            schema,
        }
    }

    pub fn from_tuples(tuples: Vec<Tuple>, schema: Arc<Schema>) -> Self {
        let position_list = (0..tuples.len() as u32).collect();
        Self {
            source: TileSource::Materialized(tuples),
            position_list,
            schema,
        }
    }

    pub fn get_schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn row_count(&self) -> usize {
        self.position_list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.position_list.is_empty()
    }

    pub fn get_position_list(&self) -> &[u32] {
        &self.position_list
    }

    /// The tile group this tile borrows from, if it is not materialized.
    pub fn get_tile_group(&self) -> Option<&Arc<TileGroup>> {
        match &self.source {
            TileSource::TileGroup(tile_group) => Some(tile_group),
            TileSource::Materialized(_) => None,
        }
    }

    /// Location of the `row_idx`-th row, when it refers to real storage.
    pub fn get_location(&self, row_idx: usize) -> Option<ItemPointer> {
        match &self.source {
            TileSource::TileGroup(tile_group) => {
                let offset = *self.position_list.get(row_idx)?;
                Some(ItemPointer::new(tile_group.get_tile_group_id(), offset))
            }
            TileSource::Materialized(_) => None,
        }
    }

    pub fn get_tuple(&self, row_idx: usize) -> Option<Tuple> {
        let offset = *self.position_list.get(row_idx)?;
        match &self.source {
            TileSource::TileGroup(tile_group) => tile_group.get_tuple(offset),
            TileSource::Materialized(tuples) => tuples.get(offset as usize).cloned(),
        }
    }

    pub fn get_value(&self, row_idx: usize, column_idx: usize) -> Option<Value> {
        self.get_tuple(row_idx)?.get_value(column_idx).cloned()
    }

    /// Collects every row into owned tuples, in position-list order.
    pub fn materialize(&self) -> Vec<Tuple> {
        (0..self.row_count()).filter_map(|i| self.get_tuple(i)).collect()
    }
}

impl Display for LogicalTile {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "LogicalTile [{} rows]", self.row_count())?;
        for i in 0..self.row_count() {
            if let Some(tuple) = self.get_tuple(i) {
                writeln!(f, "  {}", tuple)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::column::Column;
    use crate::types_db::type_id::TypeId;

    fn test_schema() -> Arc<Schema> {
        Arc::new(Schema::new(vec![
            Column::new("id", TypeId::Integer),
            Column::new("value", TypeId::Integer),
        ]))
    }

    #[test]
    fn test_tile_over_tile_group_is_positional() {
        let schema = test_schema();
        let tile_group = Arc::new(TileGroup::new(1, Arc::clone(&schema), 4));
        for i in 0..4 {
            tile_group.insert_tuple(Tuple::new(vec![
                Value::Integer(i),
                Value::Integer(i * 10),
            ]));
        }

        // Only rows 1 and 3 are selected.
        let tile = LogicalTile::from_tile_group(Arc::clone(&tile_group), vec![1, 3], schema);
        assert_eq!(tile.row_count(), 2);
        assert_eq!(tile.get_value(0, 0), Some(Value::Integer(1)));
        assert_eq!(tile.get_value(1, 1), Some(Value::Integer(30)));
        assert_eq!(tile.get_location(1), Some(ItemPointer::new(1, 3)));
    }

    #[test]
    fn test_materialized_tile() {
        let schema = test_schema();
        let tile = LogicalTile::from_tuples(
            vec![Tuple::new(vec![Value::Integer(7), Value::Integer(70)])],
            schema,
        );
        assert_eq!(tile.row_count(), 1);
        assert_eq!(tile.get_location(0), None);
        assert_eq!(tile.get_value(0, 1), Some(Value::Integer(70)));
    }
}
