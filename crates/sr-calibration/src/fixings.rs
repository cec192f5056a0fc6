//! Historical index fixings.
//!
//! Fixings arrive as dated rate observations quoted in *percent* (the
//! market convention of the source feed) and stay in percent inside the
//! store; converting to decimals is the first step of whichever consumer
//! needs them, so a value read back always matches the value published.
//!
//! The store is a plain value handle over shared state: cloning it is cheap
//! and every clone sees the same data, but nothing is global. Whoever owns
//! the pipeline constructs the store and passes it along.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use chrono::NaiveDate;

use sr_core::{Real, TimeSeries};
use sr_termstructures::IndexTenor;

// ── Fixing points ─────────────────────────────────────────────────────────────

/// A single dated fixing, quoted in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixingPoint {
    /// Observation date.
    pub date: NaiveDate,
    /// Fixing in percent (e.g. `4.25` for 4.25 %).
    pub rate: Real,
}

impl FixingPoint {
    /// Creates a fixing point.
    pub fn new(date: NaiveDate, rate: Real) -> Self {
        Self { date, rate }
    }
}

// ── Queries ───────────────────────────────────────────────────────────────────

/// Date-range filter for [`FixingHistory::window`]. Both bounds are
/// inclusive; `None` leaves that side open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixingQuery {
    /// Earliest date to include.
    pub starting_at: Option<NaiveDate>,
    /// Latest date to include.
    pub up_to: Option<NaiveDate>,
}

impl FixingQuery {
    /// A query that selects the entire history.
    pub fn all() -> Self {
        Self::default()
    }

    /// Selects fixings on or after `date`.
    pub fn starting_at(date: NaiveDate) -> Self {
        Self {
            starting_at: Some(date),
            up_to: None,
        }
    }

    /// Selects fixings between `start` and `end`, inclusive.
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            starting_at: Some(start),
            up_to: Some(end),
        }
    }
}

// ── Per-index history ─────────────────────────────────────────────────────────

/// Fixing history for one index, ordered by date.
///
/// Dates are unique: adding a fixing for an existing date overwrites it, so
/// the last write wins and re-loading a feed is idempotent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FixingHistory {
    series: TimeSeries<NaiveDate, Real>,
}

impl FixingHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a history from points; later points overwrite earlier ones
    /// on the same date.
    pub fn from_points(points: impl IntoIterator<Item = FixingPoint>) -> Self {
        Self {
            series: points.into_iter().map(|p| (p.date, p.rate)).collect(),
        }
    }

    /// Records a fixing, overwriting any existing value on `date`.
    pub fn add_fixing(&mut self, date: NaiveDate, rate: Real) {
        self.series.insert(date, rate);
    }

    /// Number of recorded fixings.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Whether the history holds no fixings.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// The fixing on `date`, if any.
    pub fn fixing(&self, date: NaiveDate) -> Option<Real> {
        self.series.get(&date).copied()
    }

    /// Earliest recorded date.
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.series.first_key().copied()
    }

    /// Latest recorded date.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.series.last_key().copied()
    }

    /// Date-sorted fixings inside the query window, still in percent.
    pub fn window(&self, query: FixingQuery) -> Vec<FixingPoint> {
        self.series
            .range(query.starting_at.as_ref(), query.up_to.as_ref())
            .map(|(date, rate)| FixingPoint::new(*date, *rate))
            .collect()
    }
}

// ── Shared store ──────────────────────────────────────────────────────────────

/// Thread-safe registry of fixing histories keyed by index name and tenor.
///
/// Clones share the underlying map, so one store handle can be filled by a
/// loader thread while the pipeline reads from another.
#[derive(Debug, Clone, Default)]
pub struct FixingStore {
    data: Arc<RwLock<BTreeMap<(String, IndexTenor), FixingHistory>>>,
}

impl FixingStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one fixing for `(name, tenor)`, overwriting any existing
    /// value on the same date.
    pub fn add_fixing(&self, name: &str, tenor: IndexTenor, date: NaiveDate, rate: Real) {
        self.data
            .write()
            .unwrap()
            .entry((name.to_string(), tenor))
            .or_default()
            .add_fixing(date, rate);
    }

    /// Records a batch of fixings for `(name, tenor)`.
    pub fn add_fixings(
        &self,
        name: &str,
        tenor: IndexTenor,
        points: impl IntoIterator<Item = FixingPoint>,
    ) {
        let mut data = self.data.write().unwrap();
        let history = data.entry((name.to_string(), tenor)).or_default();
        for point in points {
            history.add_fixing(point.date, point.rate);
        }
    }

    /// A snapshot of the history for `(name, tenor)`, if one exists.
    pub fn history(&self, name: &str, tenor: IndexTenor) -> Option<FixingHistory> {
        self.data
            .read()
            .unwrap()
            .get(&(name.to_string(), tenor))
            .cloned()
    }

    /// Number of `(name, tenor)` series in the store.
    pub fn len(&self) -> usize {
        self.data.read().unwrap().len()
    }

    /// Whether the store holds no series at all.
    pub fn is_empty(&self) -> bool {
        self.data.read().unwrap().is_empty()
    }

    /// Removes every series.
    pub fn clear(&self) {
        self.data.write().unwrap().clear();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
