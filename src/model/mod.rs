//! Catalog records: dimensions, items, roll-up mappings, and time.

pub mod dimension;
pub mod time;

pub use dimension::{
    aggregate_item, Dimension, DimensionId, DimensionItem, DimensionItemId, DimensionMapping,
    AGGREGATE_ITEM_ID,
};
pub use time::{
    DateOrNow, Granularity, TimeDimension, DEFAULT_NUM_STEPS, TIME_DIMENSION_ID,
};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Lookup table from dimension id to its full record.
///
/// The catalog is loaded once by a collaborator and then only read; nothing
/// in this crate mutates a [`Dimension`] after it is inserted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    dimensions: HashMap<DimensionId, Dimension>,
}

impl Catalog {
    /// Build a catalog from dimension records, keyed by id.
    ///
    /// A later dimension with a duplicate id replaces the earlier one.
    pub fn new(dimensions: impl IntoIterator<Item = Dimension>) -> Self {
        Self {
            dimensions: dimensions
                .into_iter()
                .map(|dimension| (dimension.id.clone(), dimension))
                .collect(),
        }
    }

    /// Insert one dimension, returning any record it replaced.
    pub fn insert(&mut self, dimension: Dimension) -> Option<Dimension> {
        self.dimensions.insert(dimension.id.clone(), dimension)
    }

    /// Look up a dimension by id.
    pub fn get(&self, id: &str) -> Option<&Dimension> {
        self.dimensions.get(id)
    }

    /// True if a dimension with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.dimensions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.dimensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty()
    }

    /// All dimensions, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Dimension> {
        self.dimensions.values()
    }
}

impl FromIterator<Dimension> for Catalog {
    fn from_iter<I: IntoIterator<Item = Dimension>>(iter: I) -> Self {
        Self::new(iter)
    }
}
