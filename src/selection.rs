//! Selection expressions and label reconstruction.
//!
//! A [`SelectionExpr`] is an ordered list of directives against root
//! dimensions: aggregate the whole dimension, group it by another dimension,
//! or filter it to named items (optionally through an intermediate mapped
//! dimension). [`label_names`] turns an expression back into the display
//! strings a breakdown header or filter chip shows, one per root dimension.
//!
//! Precedence within one root: any aggregate wins outright, else the first
//! group-by wins, else every filter applies. Rendering is total: ids that no
//! longer resolve against the catalog become the [`ILLEGAL`] placeholder in
//! the output and are reported on the side in [`LabelResult::unresolved`].

use serde::{Deserialize, Serialize};

use crate::model::{
    aggregate_item, Catalog, Dimension, DimensionId, DimensionItemId, AGGREGATE_ITEM_ID,
};

/// Placeholder rendered for ids that resolve to nothing in the catalog.
pub const ILLEGAL: &str = "ILLEGAL";

/// One directive applied to a root dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selector {
    /// Collapse the whole dimension into one value.
    Aggregate,
    /// Break the root down by another dimension instead.
    GroupBy(DimensionId),
    /// Restrict to one item, optionally reached through an intermediate
    /// mapped dimension.
    Filter {
        via: Option<DimensionId>,
        item: DimensionItemId,
    },
}

/// A directive paired with the root dimension it targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionEntry {
    pub root: DimensionId,
    pub selector: Selector,
}

/// An ordered list of selection directives.
///
/// Several entries may target the same root: multiple filters accumulate,
/// and precedence between selector kinds is resolved at labeling time, not
/// on construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionExpr {
    pub entries: Vec<SelectionEntry>,
}

impl SelectionExpr {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an aggregate directive for `root`.
    pub fn aggregate(mut self, root: impl Into<String>) -> Self {
        self.entries.push(SelectionEntry {
            root: root.into(),
            selector: Selector::Aggregate,
        });
        self
    }

    /// Append a group-by directive: break `root` down by `dimension_id`.
    pub fn group_by(mut self, root: impl Into<String>, dimension_id: impl Into<String>) -> Self {
        self.entries.push(SelectionEntry {
            root: root.into(),
            selector: Selector::GroupBy(dimension_id.into()),
        });
        self
    }

    /// Append a filter on an item of `root` itself.
    pub fn filter(mut self, root: impl Into<String>, item_id: impl Into<String>) -> Self {
        self.entries.push(SelectionEntry {
            root: root.into(),
            selector: Selector::Filter {
                via: None,
                item: item_id.into(),
            },
        });
        self
    }

    /// Append a filter on an item of the mapped dimension `via`.
    pub fn filter_via(
        mut self,
        root: impl Into<String>,
        via: impl Into<String>,
        item_id: impl Into<String>,
    ) -> Self {
        self.entries.push(SelectionEntry {
            root: root.into(),
            selector: Selector::Filter {
                via: Some(via.into()),
                item: item_id.into(),
            },
        });
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Classify stored raw id rows into typed selectors.
    ///
    /// Each row is `[root, directive]` or `[root, via, item]`. A trailing
    /// [`AGGREGATE_ITEM_ID`] means aggregate; a two-id row whose directive
    /// names a catalog dimension is a group-by; anything else is a filter
    /// (pairs target the root, triples target the intermediate id). Rows
    /// with fewer than two ids carry no directive and are dropped; ids past
    /// the third are ignored.
    pub fn from_raw(rows: &[Vec<String>], catalog: &Catalog) -> Self {
        let mut expr = SelectionExpr::new();
        for row in rows {
            let (root, selector) = match row.as_slice() {
                [root, directive] => {
                    let selector = if directive.as_str() == AGGREGATE_ITEM_ID {
                        Selector::Aggregate
                    } else if catalog.contains(directive) {
                        Selector::GroupBy(directive.clone())
                    } else {
                        Selector::Filter {
                            via: None,
                            item: directive.clone(),
                        }
                    };
                    (root, selector)
                }
                [root, via, item, ..] => {
                    let selector = if item.as_str() == AGGREGATE_ITEM_ID {
                        Selector::Aggregate
                    } else {
                        Selector::Filter {
                            via: Some(via.clone()),
                            item: item.clone(),
                        }
                    };
                    (root, selector)
                }
                _ => continue,
            };
            expr.entries.push(SelectionEntry {
                root: root.clone(),
                selector,
            });
        }
        expr
    }
}

/// A `(name, description)` display pair for one root dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelPair {
    pub name: String,
    pub description: String,
}

impl LabelPair {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// An id in a selection that resolved to nothing in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnresolvedRef {
    Dimension(DimensionId),
    Item {
        dimension_id: DimensionId,
        item_id: DimensionItemId,
    },
}

/// Labels plus the data-quality problems found while building them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelResult {
    /// One entry per root dimension, in input order; `None` when the
    /// selection says nothing about that root.
    pub labels: Vec<Option<LabelPair>>,
    /// Every id that rendered as [`ILLEGAL`], in render order.
    pub unresolved: Vec<UnresolvedRef>,
}

impl LabelResult {
    pub fn is_fully_resolved(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Reconstruct display labels for each root dimension from a selection.
///
/// Per root, in entry order: no entries means the root is unset (`None`);
/// any aggregate yields `(root.name, "Aggregate")` and overrides everything;
/// otherwise the first group-by yields `(root.name, grouped.name)` and
/// overrides the filters; otherwise the filters are grouped by the
/// dimension they actually target. Filters on a single target render as
/// `(target.name, "Item1, Item2")`; filters across several targets render
/// under the root as `(root.name, "Target1 (items), Target2 (items)")`,
/// targets in first-encounter order, items in entry order.
pub fn label_names(expr: &SelectionExpr, roots: &[Dimension], catalog: &Catalog) -> LabelResult {
    let mut unresolved = Vec::new();
    let labels = roots
        .iter()
        .map(|root| label_for_root(expr, root, catalog, &mut unresolved))
        .collect();
    LabelResult { labels, unresolved }
}

fn label_for_root(
    expr: &SelectionExpr,
    root: &Dimension,
    catalog: &Catalog,
    unresolved: &mut Vec<UnresolvedRef>,
) -> Option<LabelPair> {
    let selectors: Vec<&Selector> = expr
        .entries
        .iter()
        .filter(|entry| entry.root == root.id)
        .map(|entry| &entry.selector)
        .collect();
    if selectors.is_empty() {
        return None;
    }

    if selectors
        .iter()
        .any(|selector| matches!(selector, Selector::Aggregate))
    {
        return Some(LabelPair::new(&root.name, &aggregate_item().name));
    }

    let group_by = selectors.iter().find_map(|selector| match selector {
        Selector::GroupBy(dimension_id) => Some(dimension_id),
        _ => None,
    });
    if let Some(dimension_id) = group_by {
        let description = match catalog.get(dimension_id) {
            Some(dimension) => dimension.name.clone(),
            None => {
                unresolved.push(UnresolvedRef::Dimension(dimension_id.clone()));
                ILLEGAL.to_string()
            }
        };
        return Some(LabelPair::new(&root.name, description));
    }

    // Only filters remain. Group them by the dimension they actually
    // target, keeping first-encounter target order and entry item order.
    let mut groups: Vec<(DimensionId, Vec<&DimensionItemId>)> = Vec::new();
    for selector in &selectors {
        if let Selector::Filter { via, item } = selector {
            let target = via.as_deref().unwrap_or(&root.id);
            match groups.iter_mut().find(|(id, _)| id == target) {
                Some((_, items)) => items.push(item),
                None => groups.push((target.to_string(), vec![item])),
            }
        }
    }

    let rendered: Vec<(String, String)> = groups
        .iter()
        .map(|(target_id, items)| render_filter_group(target_id, items, catalog, unresolved))
        .collect();

    match rendered.as_slice() {
        [] => None,
        [(name, items)] => Some(LabelPair::new(name, items)),
        _ => {
            let joined = rendered
                .iter()
                .map(|(name, items)| format!("{} ({})", name, items))
                .collect::<Vec<_>>()
                .join(", ");
            Some(LabelPair::new(&root.name, joined))
        }
    }
}

/// Resolve one target dimension and its filtered items to display names.
fn render_filter_group(
    target_id: &str,
    item_ids: &[&DimensionItemId],
    catalog: &Catalog,
    unresolved: &mut Vec<UnresolvedRef>,
) -> (String, String) {
    let Some(dimension) = catalog.get(target_id) else {
        unresolved.push(UnresolvedRef::Dimension(target_id.to_string()));
        let names = vec![ILLEGAL; item_ids.len()];
        return (ILLEGAL.to_string(), names.join(", "));
    };

    let names: Vec<String> = item_ids
        .iter()
        .map(|item_id| match dimension.item(item_id) {
            Some(item) => item.name.clone(),
            None => {
                unresolved.push(UnresolvedRef::Item {
                    dimension_id: dimension.id.clone(),
                    item_id: (*item_id).clone(),
                });
                ILLEGAL.to_string()
            }
        })
        .collect();
    (dimension.name.clone(), names.join(", "))
}
