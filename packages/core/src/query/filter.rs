//! Predicate filters over a snapshot. All of them keep the input order.

use crate::record::Pokemon;

/// Keeps records whose `type` list contains `tag`, ignoring case.
#[must_use]
pub fn by_type(mut records: Vec<Pokemon>, tag: &str) -> Vec<Pokemon> {
    records.retain(|p| contains_ignore_case(&p.data.types, tag));
    records
}

/// Keeps records whose `weaknesses` list contains `tag`, ignoring case.
#[must_use]
pub fn by_weakness(mut records: Vec<Pokemon>, tag: &str) -> Vec<Pokemon> {
    records.retain(|p| contains_ignore_case(&p.data.weaknesses, tag));
    records
}

/// List search: case-insensitive substring of `name`, or case-sensitive
/// substring of `num`.
#[must_use]
pub fn by_search(mut records: Vec<Pokemon>, text: &str) -> Vec<Pokemon> {
    let needle = text.to_lowercase();
    records.retain(|p| p.data.name.to_lowercase().contains(&needle) || p.data.num.contains(text));
    records
}

/// Keyword search across `name`, `candy` and `num`.
///
/// The keyword is lowercased once and matched against the lowercased name
/// and candy and against the raw number.
#[must_use]
pub fn by_keyword(mut records: Vec<Pokemon>, keyword: &str) -> Vec<Pokemon> {
    let needle = keyword.to_lowercase();
    records.retain(|p| {
        p.data.name.to_lowercase().contains(&needle)
            || p.data.num.contains(&needle)
            || p.data.candy.to_lowercase().contains(&needle)
    });
    records
}

/// Keeps records whose `candy` contains `text` (case-sensitive).
#[must_use]
pub fn by_candy(mut records: Vec<Pokemon>, text: &str) -> Vec<Pokemon> {
    records.retain(|p| p.data.candy.contains(text));
    records
}

/// Keeps records whose `egg` equals `distance` exactly, e.g. `"2 km"`.
#[must_use]
pub fn by_egg(mut records: Vec<Pokemon>, distance: &str) -> Vec<Pokemon> {
    records.retain(|p| p.data.egg == distance);
    records
}

fn contains_ignore_case(tags: &[String], wanted: &str) -> bool {
    let wanted = wanted.to_lowercase();
    tags.iter().any(|t| t.to_lowercase() == wanted)
}
