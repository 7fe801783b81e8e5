//! Numeric range views: spawn chance and physical size.

use crate::record::Pokemon;

/// Inclusive `spawn_chance` bounds. Defaults to `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRange {
    pub min: f64,
    pub max: f64,
}

impl SpawnRange {
    pub const DEFAULT_MIN: f64 = 0.0;
    pub const DEFAULT_MAX: f64 = 100.0;

    /// Builds a range, filling absent bounds with the defaults.
    #[must_use]
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self {
            min: min.unwrap_or(Self::DEFAULT_MIN),
            max: max.unwrap_or(Self::DEFAULT_MAX),
        }
    }

    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Keeps records inside the range, highest `spawn_chance` first.
    ///
    /// The sort is stable: records with equal spawn chance keep their
    /// snapshot order.
    #[must_use]
    pub fn apply(&self, mut records: Vec<Pokemon>) -> Vec<Pokemon> {
        records.retain(|p| self.contains(p.data.spawn_chance));
        records.sort_by(|a, b| b.data.spawn_chance.total_cmp(&a.data.spawn_chance));
        records
    }
}

impl Default for SpawnRange {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Independent optional bounds on height and weight.
///
/// Height and weight are free-form strings such as `"0.71 m"`; only their
/// leading numeric token is compared (see [`leading_number`]).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SizeRange {
    pub min_height: Option<f64>,
    pub max_height: Option<f64>,
    pub min_weight: Option<f64>,
    pub max_weight: Option<f64>,
}

impl SizeRange {
    /// Whether a record satisfies the bounds on both dimensions.
    #[must_use]
    pub fn matches(&self, pokemon: &Pokemon) -> bool {
        within(leading_number(&pokemon.data.height), self.min_height, self.max_height)
            && within(leading_number(&pokemon.data.weight), self.min_weight, self.max_weight)
    }

    /// Keeps matching records in snapshot order.
    #[must_use]
    pub fn apply(&self, mut records: Vec<Pokemon>) -> Vec<Pokemon> {
        records.retain(|p| self.matches(p));
        records
    }
}

fn within(value: f64, min: Option<f64>, max: Option<f64>) -> bool {
    min.is_none_or(|m| value >= m) && max.is_none_or(|m| value <= m)
}

/// Parses the first whitespace-separated token of a measurement.
///
/// The unit suffix is discarded: `"6.9 kg"` becomes `6.9`. An empty or
/// malformed token parses as `0.0` and still takes part in comparisons.
#[must_use]
pub fn leading_number(measurement: &str) -> f64 {
    measurement
        .split_whitespace()
        .next()
        .and_then(|token| token.parse::<f64>().ok())
        .unwrap_or(0.0)
}
