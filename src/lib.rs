//! # Crosscut
//!
//! Multi-dimensional breakdown core: dimension catalogs, flat breakdown
//! coordinates, recursive breakdown trees, and selection labeling.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │            Catalog (Dimensions, Items, Mappings)         │
//! └─────────────────────────────────────────────────────────┘
//!              │                               │
//!              ▼ [cartesian product]           ▼ [classification]
//! ┌───────────────────────────┐   ┌───────────────────────────┐
//! │ DimensionMap              │   │ SelectionExpr             │
//! │ (flat coordinate)         │   │ (aggregate/group/filter)  │
//! └───────────────────────────┘   └───────────────────────────┘
//!              │                               │
//!              ▼ [from_map / value_at]         ▼ [label_names]
//! ┌───────────────────────────┐   ┌───────────────────────────┐
//! │ MultiDimensional<T>       │   │ LabelResult               │
//! │ (breakdown tree)          │   │ (display pairs + issues)  │
//! └───────────────────────────┘   └───────────────────────────┘
//! ```
//!
//! Everything is synchronous and side-effect free: values in, values out.
//! Catalogs and trees are never mutated after construction, so shared
//! references are safe across threads without locking.

pub mod map;
pub mod model;
pub mod selection;
pub mod tree;

// Re-export the working set at crate level for convenience
pub use map::{aggregate, cartesian_product, DimensionMap, MapError, MapResult};
pub use model::{
    aggregate_item, Catalog, Dimension, DimensionId, DimensionItem, DimensionItemId,
    DimensionMapping, TimeDimension, AGGREGATE_ITEM_ID, TIME_DIMENSION_ID,
};
pub use selection::{
    label_names, LabelPair, LabelResult, SelectionEntry, SelectionExpr, Selector, UnresolvedRef,
    ILLEGAL,
};
pub use tree::MultiDimensional;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::map::{aggregate, cartesian_product, DimensionMap, MapError, MapResult};
    pub use crate::model::{
        aggregate_item, Catalog, DateOrNow, Dimension, DimensionId, DimensionItem,
        DimensionItemId, DimensionMapping, Granularity, TimeDimension, AGGREGATE_ITEM_ID,
        DEFAULT_NUM_STEPS, TIME_DIMENSION_ID,
    };
    pub use crate::selection::{
        label_names, LabelPair, LabelResult, SelectionEntry, SelectionExpr, Selector,
        UnresolvedRef, ILLEGAL,
    };
    pub use crate::tree::MultiDimensional;
}
