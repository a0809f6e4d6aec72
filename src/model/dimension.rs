// src/model/dimension.rs
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::LazyLock;

/// Identifies a [`Dimension`] uniquely across the whole system.
pub type DimensionId = String;

/// Identifies a [`DimensionItem`]. Item ids share one id space with
/// dimension ids in stored selection expressions, so they must not collide.
pub type DimensionItemId = String;

/// Reserved item id meaning "all items of this dimension collapsed into one".
///
/// Kept verbatim from stored selection expressions for compatibility;
/// new code should use [`crate::selection::Selector::Aggregate`] instead of
/// smuggling this id through filter positions.
pub const AGGREGATE_ITEM_ID: &str = "AGGREGATE_LABEL_ID";

static AGGREGATE_ITEM: LazyLock<DimensionItem> = LazyLock::new(|| DimensionItem {
    id: AGGREGATE_ITEM_ID.to_string(),
    name: "Aggregate".to_string(),
    mappings: Vec::new(),
});

/// The sentinel item representing an aggregated dimension.
///
/// Exists by construction, never as catalog data; carries no mappings.
pub fn aggregate_item() -> &'static DimensionItem {
    &AGGREGATE_ITEM
}

/// A named axis of breakdown (e.g. "Country").
///
/// Immutable after construction; the catalog loader is the only producer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    pub id: DimensionId,
    pub name: String,
    /// Items in catalog order. Order is observable: cartesian products
    /// enumerate items in this order.
    pub items: Vec<DimensionItem>,
    /// Creating user; -1 for synthetic dimensions.
    pub owner_id: i64,
    /// Models this dimension is associated with.
    pub model_ids: Vec<i64>,
}

impl Dimension {
    /// Create a dimension with no owner or model associations.
    pub fn new(
        id: impl Into<DimensionId>,
        name: impl Into<String>,
        items: Vec<DimensionItem>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            items,
            owner_id: -1,
            model_ids: Vec::new(),
        }
    }

    /// Associate this dimension with the given models.
    pub fn with_model_ids(mut self, model_ids: Vec<i64>) -> Self {
        self.model_ids = model_ids;
        self
    }

    /// Look up an item by id, in catalog order.
    pub fn item(&self, item_id: &str) -> Option<&DimensionItem> {
        self.items.iter().find(|item| item.id == item_id)
    }

    /// Item ids in catalog order.
    pub fn item_ids(&self) -> Vec<DimensionItemId> {
        self.items.iter().map(|item| item.id.clone()).collect()
    }

    /// Global ordering on dimensions (lexical by id).
    pub fn cmp_by_id(&self, other: &Dimension) -> Ordering {
        self.id.cmp(&other.id)
    }
}

/// One discrete value within a [`Dimension`] (e.g. "Germany").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionItem {
    pub id: DimensionItemId,
    pub name: String,
    /// Roll-up edges into items of other dimensions. This is how
    /// country -> region -> planet hierarchies are expressed without
    /// nesting dimensions themselves.
    pub mappings: Vec<DimensionMapping>,
}

impl DimensionItem {
    /// Create an item with no roll-up mappings.
    pub fn new(id: impl Into<DimensionItemId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            mappings: Vec::new(),
        }
    }

    /// Attach roll-up mappings.
    pub fn with_mappings(mut self, mappings: Vec<DimensionMapping>) -> Self {
        self.mappings = mappings;
        self
    }

    /// The mapping into `dimension_id`, if this item declares one.
    pub fn mapping_to(&self, dimension_id: &str) -> Option<&DimensionMapping> {
        self.mappings
            .iter()
            .find(|mapping| mapping.to_dimension_id == dimension_id)
    }
}

/// A directed roll-up edge: "this item, viewed through dimension
/// `to_dimension_id`, is item `to_item_id`".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionMapping {
    pub id: String,
    pub to_dimension_id: DimensionId,
    pub to_item_id: DimensionItemId,
}

impl DimensionMapping {
    pub fn new(
        id: impl Into<String>,
        to_dimension_id: impl Into<DimensionId>,
        to_item_id: impl Into<DimensionItemId>,
    ) -> Self {
        Self {
            id: id.into(),
            to_dimension_id: to_dimension_id.into(),
            to_item_id: to_item_id.into(),
        }
    }
}
