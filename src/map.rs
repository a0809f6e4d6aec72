//! Flat coordinates in the breakdown space.
//!
//! A [`DimensionMap`] pins a subset of dimensions to one item each, e.g.
//! `{country: germany, ads: google}`. A key that is present means the
//! dimension is constrained to exactly that item; an absent key leaves the
//! dimension unconstrained. Maps are ephemeral lookup keys: operations here
//! return new maps rather than mutating shared ones.

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

use crate::model::{Catalog, DimensionId, DimensionItemId, TimeDimension, TIME_DIMENSION_ID};

/// Errors from dimension-map algebra.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    #[error("Aggregate requires at least one dimension map")]
    EmptyAggregate,

    #[error("Unknown dimension: {0}")]
    UnknownDimension(DimensionId),
}

pub type MapResult<T> = Result<T, MapError>;

/// One concrete coordinate in the breakdown space.
///
/// Ordered by dimension id so that iteration, `Display`, and serialization
/// are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DimensionMap {
    entries: BTreeMap<DimensionId, DimensionItemId>,
}

impl DimensionMap {
    /// The empty coordinate: no dimension constrained.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy of this map with one more dimension pinned.
    pub fn with(mut self, dimension_id: impl Into<String>, item_id: impl Into<String>) -> Self {
        self.entries.insert(dimension_id.into(), item_id.into());
        self
    }

    /// Pin a dimension in place, returning the item it previously held.
    pub fn insert(
        &mut self,
        dimension_id: impl Into<String>,
        item_id: impl Into<String>,
    ) -> Option<DimensionItemId> {
        self.entries.insert(dimension_id.into(), item_id.into())
    }

    /// The item this map pins for a dimension, if any.
    pub fn get(&self, dimension_id: &str) -> Option<&str> {
        self.entries.get(dimension_id).map(String::as_str)
    }

    /// True if this map constrains the given dimension.
    pub fn contains_dimension(&self, dimension_id: &str) -> bool {
        self.entries.contains_key(dimension_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Constrained dimension ids, in id order.
    pub fn dimension_ids(&self) -> impl Iterator<Item = &DimensionId> {
        self.entries.keys()
    }

    /// All `(dimension_id, item_id)` pairs, in dimension-id order.
    pub fn iter(&self) -> impl Iterator<Item = (&DimensionId, &DimensionItemId)> {
        self.entries.iter()
    }

    /// True iff every dimension this map pins is pinned to the same item in
    /// `other`. `other` may constrain more dimensions; the empty map is a
    /// subset of every map.
    pub fn is_subset_of(&self, other: &DimensionMap) -> bool {
        self.entries
            .iter()
            .all(|(dimension_id, item_id)| other.get(dimension_id) == Some(item_id.as_str()))
    }
}

impl fmt::Display for DimensionMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (dimension_id, item_id)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", dimension_id, item_id)?;
        }
        write!(f, "}}")
    }
}

impl From<BTreeMap<DimensionId, DimensionItemId>> for DimensionMap {
    fn from(entries: BTreeMap<DimensionId, DimensionItemId>) -> Self {
        Self { entries }
    }
}

impl FromIterator<(DimensionId, DimensionItemId)> for DimensionMap {
    fn from_iter<I: IntoIterator<Item = (DimensionId, DimensionItemId)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for DimensionMap {
    type Item = (DimensionId, DimensionItemId);
    type IntoIter = std::collections::btree_map::IntoIter<DimensionId, DimensionItemId>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a DimensionMap {
    type Item = (&'a DimensionId, &'a DimensionItemId);
    type IntoIter = std::collections::btree_map::Iter<'a, DimensionId, DimensionItemId>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// === Algebra over dimension maps ===

/// Intersect a non-empty list of maps, keeping only the pairs on which every
/// input agrees.
///
/// A key missing from any input, or bound to different items across inputs,
/// is dropped. With a single input the result is that map unchanged.
pub fn aggregate(maps: &[DimensionMap]) -> MapResult<DimensionMap> {
    let (first, rest) = maps.split_first().ok_or(MapError::EmptyAggregate)?;
    Ok(first
        .iter()
        .filter(|(dimension_id, item_id)| {
            rest.iter()
                .all(|map| map.get(dimension_id) == Some(item_id.as_str()))
        })
        .map(|(dimension_id, item_id)| (dimension_id.clone(), item_id.clone()))
        .collect())
}

/// Every combination of one item from each named dimension, in catalog item
/// order, with the first dimension varying slowest.
///
/// When `time` is supplied, [`TIME_DIMENSION_ID`] resolves to synthesized
/// step-index items instead of a catalog lookup. An empty `dimension_ids`
/// list yields exactly one empty map.
pub fn cartesian_product(
    catalog: &Catalog,
    dimension_ids: &[DimensionId],
    time: Option<&TimeDimension>,
) -> MapResult<Vec<DimensionMap>> {
    if dimension_ids.is_empty() {
        return Ok(vec![DimensionMap::new()]);
    }

    let mut axes: Vec<Vec<(DimensionId, DimensionItemId)>> =
        Vec::with_capacity(dimension_ids.len());
    for dimension_id in dimension_ids {
        let item_ids = match (time, dimension_id.as_str()) {
            (Some(time), TIME_DIMENSION_ID) => time.step_item_ids(),
            _ => catalog
                .get(dimension_id)
                .ok_or_else(|| MapError::UnknownDimension(dimension_id.clone()))?
                .item_ids(),
        };
        axes.push(
            item_ids
                .into_iter()
                .map(|item_id| (dimension_id.clone(), item_id))
                .collect(),
        );
    }

    Ok(axes
        .into_iter()
        .multi_cartesian_product()
        .map(DimensionMap::from_iter)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Dimension, DimensionItem};

    fn map(pairs: &[(&str, &str)]) -> DimensionMap {
        pairs
            .iter()
            .map(|(d, i)| (d.to_string(), i.to_string()))
            .collect()
    }

    #[test]
    fn test_subset_relation() {
        let small = map(&[("planet", "earth")]);
        let big = map(&[("planet", "earth"), ("country", "germany")]);
        assert!(small.is_subset_of(&big));
        assert!(!big.is_subset_of(&small));
        assert!(DimensionMap::new().is_subset_of(&big));
        assert!(big.is_subset_of(&big));
    }

    #[test]
    fn test_subset_requires_agreement() {
        let a = map(&[("planet", "earth")]);
        let b = map(&[("planet", "mars"), ("country", "germany")]);
        assert!(!a.is_subset_of(&b));
    }

    #[test]
    fn test_aggregate_keeps_agreeing_pairs() {
        let maps = vec![
            map(&[("planet", "earth"), ("country", "germany"), ("ads", "google")]),
            map(&[("planet", "earth"), ("country", "poland"), ("ads", "google")]),
        ];
        assert_eq!(
            aggregate(&maps),
            Ok(map(&[("planet", "earth"), ("ads", "google")]))
        );
    }

    #[test]
    fn test_aggregate_drops_keys_missing_from_any_input() {
        let maps = vec![
            map(&[("planet", "earth"), ("country", "germany")]),
            map(&[("planet", "earth")]),
        ];
        assert_eq!(aggregate(&maps), Ok(map(&[("planet", "earth")])));
    }

    #[test]
    fn test_aggregate_single_input_is_identity() {
        let only = map(&[("planet", "earth"), ("country", "germany")]);
        assert_eq!(aggregate(std::slice::from_ref(&only)), Ok(only));
    }

    #[test]
    fn test_aggregate_empty_input_fails() {
        assert_eq!(aggregate(&[]), Err(MapError::EmptyAggregate));
    }

    #[test]
    fn test_display_is_sorted_by_dimension() {
        let coordinate = map(&[("region", "emea"), ("ads", "google")]);
        assert_eq!(coordinate.to_string(), "{ads: google, region: emea}");
    }

    fn two_axis_catalog() -> Catalog {
        Catalog::new(vec![
            Dimension::new(
                "country",
                "Country",
                vec![
                    DimensionItem::new("germany", "Germany"),
                    DimensionItem::new("poland", "Poland"),
                ],
            ),
            Dimension::new(
                "ads",
                "Ads",
                vec![
                    DimensionItem::new("google", "Google"),
                    DimensionItem::new("facebook", "Facebook"),
                    DimensionItem::new("tiktok", "TikTok"),
                ],
            ),
        ])
    }

    #[test]
    fn test_cartesian_product_order() {
        let catalog = two_axis_catalog();
        let ids = vec!["country".to_string(), "ads".to_string()];
        let product = cartesian_product(&catalog, &ids, None).unwrap();
        assert_eq!(product.len(), 6);
        // First id varies slowest, catalog item order within each.
        assert_eq!(product[0], map(&[("country", "germany"), ("ads", "google")]));
        assert_eq!(product[1], map(&[("country", "germany"), ("ads", "facebook")]));
        assert_eq!(product[2], map(&[("country", "germany"), ("ads", "tiktok")]));
        assert_eq!(product[3], map(&[("country", "poland"), ("ads", "google")]));
        assert_eq!(product[5], map(&[("country", "poland"), ("ads", "tiktok")]));
    }

    #[test]
    fn test_cartesian_product_empty_ids_yields_one_empty_map() {
        let catalog = two_axis_catalog();
        let product = cartesian_product(&catalog, &[], None).unwrap();
        assert_eq!(product, vec![DimensionMap::new()]);
    }

    #[test]
    fn test_cartesian_product_single_dimension_matches_item_count() {
        let catalog = two_axis_catalog();
        let ids = vec!["ads".to_string()];
        let product = cartesian_product(&catalog, &ids, None).unwrap();
        assert_eq!(product.len(), 3);
        assert_eq!(product[0], map(&[("ads", "google")]));
    }

    #[test]
    fn test_cartesian_product_unknown_dimension_fails() {
        let catalog = two_axis_catalog();
        let ids = vec!["nonsense".to_string()];
        assert_eq!(
            cartesian_product(&catalog, &ids, None),
            Err(MapError::UnknownDimension("nonsense".to_string()))
        );
    }

    #[test]
    fn test_cartesian_product_synthesizes_time_steps() {
        let catalog = two_axis_catalog();
        let time = TimeDimension::default();
        let ids = vec![TIME_DIMENSION_ID.to_string(), "country".to_string()];
        let product = cartesian_product(&catalog, &ids, Some(&time)).unwrap();
        assert_eq!(product.len(), time.num_steps() * 2);
        assert_eq!(
            product[0],
            map(&[(TIME_DIMENSION_ID, "0"), ("country", "germany")])
        );
        assert_eq!(
            product[2],
            map(&[(TIME_DIMENSION_ID, "1"), ("country", "germany")])
        );
    }
}
