//! Interface to the calendar/time-bucketing collaborator.
//!
//! The core consumes time opaquely: a [`TimeDimension`] exposes a step count
//! and a date range, and the cartesian product synthesizes integer-indexed
//! pseudo-items for the virtual time dimension. Computing real step counts
//! from calendars is the calendar layer's job, not this crate's.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::dimension::DimensionItemId;

/// The fixed virtual dimension id standing in for time in dimension maps
/// and cartesian products. Never present in the catalog.
pub const TIME_DIMENSION_ID: &str = "TIME_DIMENSION_ID";

/// Step count used when no calendar layer has supplied one.
pub const DEFAULT_NUM_STEPS: usize = 10;

/// Time bucketing granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Granularity {
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

impl Granularity {
    /// Parse a granularity from a string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "day" => Some(Granularity::Day),
            "week" => Some(Granularity::Week),
            "month" => Some(Granularity::Month),
            "quarter" => Some(Granularity::Quarter),
            "year" => Some(Granularity::Year),
            _ => None,
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Granularity::Day => "Day",
            Granularity::Week => "Week",
            Granularity::Month => "Month",
            Granularity::Quarter => "Quarter",
            Granularity::Year => "Year",
        };
        write!(f, "{}", s)
    }
}

/// A concrete `YYYY-MM-DD` date or the moving "now" marker.
///
/// `Now` is resolved by the calendar layer; this crate never materializes it,
/// so a serialized range keeps its moving endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateOrNow {
    Date(String),
    Now,
}

/// Opaque handle to one time range bucketed at one granularity.
///
/// The step count is supplied by the calendar layer; the range fields are
/// carried for serialization only and are not interpreted here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeDimension {
    pub start: DateOrNow,
    pub end: DateOrNow,
    pub granularity: Granularity,
    num_steps: usize,
}

impl TimeDimension {
    pub fn new(
        start: DateOrNow,
        end: DateOrNow,
        granularity: Granularity,
        num_steps: usize,
    ) -> Self {
        Self {
            start,
            end,
            granularity,
            num_steps,
        }
    }

    /// Number of time buckets in the range.
    pub fn num_steps(&self) -> usize {
        self.num_steps
    }

    /// Pseudo-item id for one step: the decimal step index.
    pub fn step_item_id(step: usize) -> DimensionItemId {
        step.to_string()
    }

    /// Pseudo-item ids for every step, in step order.
    pub fn step_item_ids(&self) -> Vec<DimensionItemId> {
        (0..self.num_steps).map(Self::step_item_id).collect()
    }
}

impl Default for TimeDimension {
    fn default() -> Self {
        Self {
            start: DateOrNow::Now,
            end: DateOrNow::Now,
            granularity: Granularity::Month,
            num_steps: DEFAULT_NUM_STEPS,
        }
    }
}
