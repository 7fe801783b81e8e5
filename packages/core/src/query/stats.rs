//! Collection-wide statistics.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::record::Pokemon;

/// Summary of a snapshot.
///
/// On an empty collection the mean is `0.0` and both extremes are `None`
/// instead of failing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stats {
    #[serde(rename = "total_pokemons")]
    pub total: usize,
    /// Records per type tag; a record counts once for each of its tags.
    pub by_type: BTreeMap<String, usize>,
    pub avg_spawn_chance: f64,
    /// First record with the highest `spawn_chance`.
    pub highest_spawn: Option<Pokemon>,
    /// First record with the lowest `spawn_chance`.
    pub lowest_spawn: Option<Pokemon>,
}

impl Stats {
    #[must_use]
    pub fn compute(records: &[Pokemon]) -> Self {
        let mut by_type = BTreeMap::new();
        let mut sum = 0.0;
        let mut highest: Option<&Pokemon> = None;
        let mut lowest: Option<&Pokemon> = None;

        for pokemon in records {
            for tag in &pokemon.data.types {
                *by_type.entry(tag.clone()).or_insert(0) += 1;
            }
            let chance = pokemon.data.spawn_chance;
            sum += chance;
            if highest.is_none_or(|h| chance > h.data.spawn_chance) {
                highest = Some(pokemon);
            }
            if lowest.is_none_or(|l| chance < l.data.spawn_chance) {
                lowest = Some(pokemon);
            }
        }

        #[allow(clippy::cast_precision_loss)]
        let avg_spawn_chance = if records.is_empty() {
            0.0
        } else {
            sum / records.len() as f64
        };

        Self {
            total: records.len(),
            by_type,
            avg_spawn_chance,
            highest_spawn: highest.cloned(),
            lowest_spawn: lowest.cloned(),
        }
    }
}
