//! Recursive breakdown trees.
//!
//! A [`MultiDimensional<T>`] is a trie over dimension-item choices: each
//! branch names the dimension it splits on and maps item ids to subtrees,
//! each leaf holds a payload. A value broken down by country and then ads
//! looks like:
//!
//! ```text
//! Branch(country)
//! ├─ germany ─ Branch(ads)
//! │            ├─ google ──── Leaf(10)
//! │            └─ facebook ── Leaf(4)
//! └─ poland ── Branch(ads)
//!              ├─ google ──── Leaf(7)
//!              └─ facebook ── Leaf(1)
//! ```
//!
//! Trees need not be balanced and sibling branches may split on different
//! dimensions; every algorithm here except [`MultiDimensional::depth`]
//! handles that. Nodes are never mutated after construction; transforms
//! rebuild from the leaves up.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::map::DimensionMap;
use crate::model::{DimensionId, DimensionItemId};

/// A breakdown tree: either a terminal value or a split along one dimension.
///
/// Children are keyed by item id in id order, so traversal, equality, and
/// serialization are deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MultiDimensional<T> {
    /// Terminal payload.
    Leaf(T),
    /// Split along `dimension_id`, one subtree per selected item.
    Branch {
        dimension_id: DimensionId,
        children: BTreeMap<DimensionItemId, MultiDimensional<T>>,
    },
}

impl<T> MultiDimensional<T> {
    /// A terminal node holding `value`.
    pub fn leaf(value: T) -> Self {
        MultiDimensional::Leaf(value)
    }

    /// Build a branch from `(item_id, subtree)` pairs.
    pub fn branch<K, I>(dimension_id: impl Into<String>, children: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, MultiDimensional<T>)>,
    {
        MultiDimensional::Branch {
            dimension_id: dimension_id.into(),
            children: children
                .into_iter()
                .map(|(item_id, child)| (item_id.into(), child))
                .collect(),
        }
    }

    /// A branch holding exactly one subtree under one item.
    pub fn single(
        dimension_id: impl Into<String>,
        item_id: impl Into<String>,
        child: MultiDimensional<T>,
    ) -> Self {
        MultiDimensional::Branch {
            dimension_id: dimension_id.into(),
            children: BTreeMap::from([(item_id.into(), child)]),
        }
    }

    /// Wrap `value` in one single-child branch per map entry.
    ///
    /// The dimension earliest in id order becomes the outermost branch, so
    /// equal maps always build equal trees. The resulting tree has exactly
    /// one leaf and depth `map.len()`.
    pub fn from_map(map: &DimensionMap, value: T) -> Self {
        let mut node = MultiDimensional::Leaf(value);
        for (dimension_id, item_id) in map.into_iter().rev() {
            node = MultiDimensional::Branch {
                dimension_id: dimension_id.clone(),
                children: BTreeMap::from([(item_id.clone(), node)]),
            };
        }
        node
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, MultiDimensional::Leaf(_))
    }

    /// The payload, if this node is a leaf.
    pub fn as_leaf(&self) -> Option<&T> {
        match self {
            MultiDimensional::Leaf(value) => Some(value),
            MultiDimensional::Branch { .. } => None,
        }
    }

    /// The dimension this node splits on, if it is a branch.
    pub fn dimension_id(&self) -> Option<&str> {
        match self {
            MultiDimensional::Leaf(_) => None,
            MultiDimensional::Branch { dimension_id, .. } => Some(dimension_id),
        }
    }

    /// Number of branch levels along the first-child path.
    ///
    /// Leaves have depth 0. Assumes every sibling subtree has the same
    /// depth; on an unbalanced tree the result only describes the path
    /// actually inspected.
    pub fn depth(&self) -> usize {
        match self {
            MultiDimensional::Leaf(_) => 0,
            MultiDimensional::Branch { children, .. } => match children.values().next() {
                Some(child) => 1 + child.depth(),
                None => 1,
            },
        }
    }

    /// Dimension ids along one representative root-to-leaf path (first
    /// child at every level).
    pub fn all_dimension_ids(&self) -> Vec<DimensionId> {
        let mut ids = Vec::new();
        let mut node = self;
        while let MultiDimensional::Branch {
            dimension_id,
            children,
        } = node
        {
            ids.push(dimension_id.clone());
            match children.values().next() {
                Some(child) => node = child,
                None => break,
            }
        }
        ids
    }

    /// Dimension ids of every branch in the tree, in visit order, repeats
    /// included. Inspection helper; use [`Self::all_dimension_ids`] for the
    /// per-level ids of a balanced tree.
    pub fn dimension_ids(&self) -> Vec<DimensionId> {
        let mut ids = Vec::new();
        self.collect_dimension_ids(&mut ids);
        ids
    }

    fn collect_dimension_ids(&self, ids: &mut Vec<DimensionId>) {
        if let MultiDimensional::Branch {
            dimension_id,
            children,
        } = self
        {
            ids.push(dimension_id.clone());
            for child in children.values() {
                child.collect_dimension_ids(ids);
            }
        }
    }

    /// The value at the coordinate `map`, following `map[dimension_id]` at
    /// every branch.
    ///
    /// `None` when a branch splits on a dimension the map leaves
    /// unconstrained, or the map names an item the branch lacks. Extra map
    /// keys beyond the path are allowed; see [`Self::value_at_exact`] for
    /// the strict form.
    pub fn value_at(&self, map: &DimensionMap) -> Option<&T> {
        self.lookup(map, false, 0)
    }

    /// Like [`Self::value_at`], but the map must name exactly the
    /// dimensions on the path to the leaf, no more and no fewer.
    pub fn value_at_exact(&self, map: &DimensionMap) -> Option<&T> {
        self.lookup(map, true, 0)
    }

    fn lookup(&self, map: &DimensionMap, exact: bool, descended: usize) -> Option<&T> {
        match self {
            MultiDimensional::Leaf(value) => {
                if exact && descended != map.len() {
                    None
                } else {
                    Some(value)
                }
            }
            MultiDimensional::Branch {
                dimension_id,
                children,
            } => {
                let item_id = map.get(dimension_id)?;
                children.get(item_id)?.lookup(map, exact, descended + 1)
            }
        }
    }

    /// Visit every leaf together with the coordinate of the path that
    /// reaches it.
    ///
    /// Each visit receives its own map holding exactly the branches
    /// descended on that path; sibling paths never share or extend each
    /// other's maps. Visit order is child-id order, depth first.
    pub fn for_each<F>(&self, mut visit: F)
    where
        F: FnMut(DimensionMap, &T),
    {
        self.visit_paths(DimensionMap::new(), &mut visit);
    }

    fn visit_paths<F>(&self, path: DimensionMap, visit: &mut F)
    where
        F: FnMut(DimensionMap, &T),
    {
        match self {
            MultiDimensional::Leaf(value) => visit(path, value),
            MultiDimensional::Branch {
                dimension_id,
                children,
            } => {
                for (item_id, child) in children {
                    let extended = path.clone().with(dimension_id.clone(), item_id.clone());
                    child.visit_paths(extended, visit);
                }
            }
        }
    }

    /// Every `(coordinate, leaf)` pair, in [`Self::for_each`] order.
    pub fn entries(&self) -> Vec<(DimensionMap, &T)> {
        let mut pairs = Vec::new();
        self.collect_entries(DimensionMap::new(), &mut pairs);
        pairs
    }

    fn collect_entries<'a>(
        &'a self,
        path: DimensionMap,
        pairs: &mut Vec<(DimensionMap, &'a T)>,
    ) {
        match self {
            MultiDimensional::Leaf(value) => pairs.push((path, value)),
            MultiDimensional::Branch {
                dimension_id,
                children,
            } => {
                for (item_id, child) in children {
                    let extended = path.clone().with(dimension_id.clone(), item_id.clone());
                    child.collect_entries(extended, pairs);
                }
            }
        }
    }

    /// Transform every leaf, keeping the branch structure intact.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> MultiDimensional<U> {
        self.map_inner(&mut f)
    }

    fn map_inner<U, F: FnMut(T) -> U>(self, f: &mut F) -> MultiDimensional<U> {
        match self {
            MultiDimensional::Leaf(value) => MultiDimensional::Leaf(f(value)),
            MultiDimensional::Branch {
                dimension_id,
                children,
            } => MultiDimensional::Branch {
                dimension_id,
                children: children
                    .into_iter()
                    .map(|(item_id, child)| (item_id, child.map_inner(&mut *f)))
                    .collect(),
            },
        }
    }

    /// All leaf values in [`Self::for_each`] order, path context discarded.
    pub fn flatten(&self) -> Vec<&T> {
        let mut values = Vec::new();
        self.collect_leaves(&mut values);
        values
    }

    fn collect_leaves<'a>(&'a self, values: &mut Vec<&'a T>) {
        match self {
            MultiDimensional::Leaf(value) => values.push(value),
            MultiDimensional::Branch { children, .. } => {
                for child in children.values() {
                    child.collect_leaves(values);
                }
            }
        }
    }

    /// Consuming form of [`Self::flatten`].
    pub fn into_flattened(self) -> Vec<T> {
        match self {
            MultiDimensional::Leaf(value) => vec![value],
            MultiDimensional::Branch { children, .. } => children
                .into_values()
                .flat_map(MultiDimensional::into_flattened)
                .collect(),
        }
    }
}
