//! Record model: the stored [`Pokemon`], its client-supplied [`PokemonData`],
//! and the sparse [`PokemonPatch`] used by partial updates.
//!
//! Wire names are snake_case. Decoding is lenient the same way for every
//! field: a JSON `null` or a missing key yields the field's default, and
//! unknown keys (including `id`, `created_at`, `updated_at`) are ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Denormalized reference to another record in an evolution chain.
///
/// Not enforced as a foreign key; the referenced record may not exist.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Evolution {
    #[serde(default, deserialize_with = "nullable")]
    pub num: String,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
}

impl Evolution {
    #[must_use]
    pub fn new(num: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            num: num.into(),
            name: name.into(),
        }
    }
}

/// Every field a client may supply for a record.
///
/// Used as the create/replace/bulk input and embedded (flattened) in the
/// stored [`Pokemon`], so a full replace is a plain assignment.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PokemonData {
    /// Business key. Expected unique, only checked on creation.
    #[serde(default, deserialize_with = "nullable")]
    pub num: String,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub img: String,
    /// Category tags, in order.
    #[serde(rename = "type", default, deserialize_with = "nullable")]
    pub types: Vec<String>,
    /// Free-form, e.g. `"0.71 m"`.
    #[serde(default, deserialize_with = "nullable")]
    pub height: String,
    /// Free-form, e.g. `"6.9 kg"`.
    #[serde(default, deserialize_with = "nullable")]
    pub weight: String,
    #[serde(default, deserialize_with = "nullable")]
    pub candy: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candy_count: Option<i64>,
    #[serde(default, deserialize_with = "nullable")]
    pub egg: String,
    #[serde(default, deserialize_with = "nullable")]
    pub spawn_chance: f64,
    #[serde(default, deserialize_with = "nullable")]
    pub avg_spawns: f64,
    #[serde(default, deserialize_with = "nullable")]
    pub spawn_time: String,
    #[serde(default, deserialize_with = "nullable")]
    pub multipliers: Vec<f64>,
    #[serde(default, deserialize_with = "nullable")]
    pub weaknesses: Vec<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub next_evolution: Vec<Evolution>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub prev_evolution: Vec<Evolution>,
}

/// A record held by the [`RecordStore`](crate::RecordStore).
///
/// `id` and `created_at` are assigned once by the store and never change;
/// `updated_at` is refreshed on every replace or patch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pokemon {
    pub id: i64,
    #[serde(flatten)]
    pub data: PokemonData,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Sparse field assignments for a partial update.
///
/// One slot per mutable field; an absent key (`None`) leaves the stored
/// value untouched. A key sent as `null` is present and resets the field to
/// its empty value (`""`, `[]`, `0`, or no `candy_count`), matching what a
/// full replace without that key would store. There are no slots for `id`,
/// `created_at` or `updated_at`, so those keys are dropped during decoding.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct PokemonPatch {
    #[serde(deserialize_with = "null_clears")]
    pub num: Option<String>,
    #[serde(deserialize_with = "null_clears")]
    pub name: Option<String>,
    #[serde(deserialize_with = "null_clears")]
    pub img: Option<String>,
    #[serde(rename = "type", deserialize_with = "null_clears")]
    pub types: Option<Vec<String>>,
    #[serde(deserialize_with = "null_clears")]
    pub height: Option<String>,
    #[serde(deserialize_with = "null_clears")]
    pub weight: Option<String>,
    #[serde(deserialize_with = "null_clears")]
    pub candy: Option<String>,
    #[serde(deserialize_with = "null_clears")]
    pub candy_count: Option<Option<i64>>,
    #[serde(deserialize_with = "null_clears")]
    pub egg: Option<String>,
    #[serde(deserialize_with = "null_clears")]
    pub spawn_chance: Option<f64>,
    #[serde(deserialize_with = "null_clears")]
    pub avg_spawns: Option<f64>,
    #[serde(deserialize_with = "null_clears")]
    pub spawn_time: Option<String>,
    #[serde(deserialize_with = "null_clears")]
    pub multipliers: Option<Vec<f64>>,
    #[serde(deserialize_with = "null_clears")]
    pub weaknesses: Option<Vec<String>>,
    #[serde(deserialize_with = "null_clears")]
    pub next_evolution: Option<Vec<Evolution>>,
    #[serde(deserialize_with = "null_clears")]
    pub prev_evolution: Option<Vec<Evolution>>,
}

impl PokemonPatch {
    /// Returns `true` if the patch assigns no field at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Writes every present slot onto `data`.
    pub fn apply_to(self, data: &mut PokemonData) {
        macro_rules! assign {
            ($($field:ident),* $(,)?) => {
                $(if let Some(value) = self.$field {
                    data.$field = value;
                })*
            };
        }

        assign!(
            num,
            name,
            img,
            types,
            height,
            weight,
            candy,
            candy_count,
            egg,
            spawn_chance,
            avg_spawns,
            spawn_time,
            multipliers,
            weaknesses,
            next_evolution,
            prev_evolution,
        );
    }
}

/// Treats an explicit JSON `null` like a missing key.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Marks a key as present; an explicit `null` becomes the field's default.
fn null_clears<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    nullable(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    fn stored(data: PokemonData) -> Pokemon {
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        Pokemon {
            id: 1,
            data,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn data_decodes_from_snake_case_payload() {
        let data: PokemonData = serde_json::from_value(json!({
            "name": "Pikachu",
            "num": "025",
            "type": ["Electric"],
            "height": "0.41 m",
            "weight": "6.0 kg",
            "candy": "Pikachu Candy",
            "candy_count": 50,
            "egg": "2 km",
            "spawn_chance": 0.21,
            "avg_spawns": 21,
            "spawn_time": "04:00",
            "weaknesses": ["Ground"]
        }))
        .unwrap();

        assert_eq!(data.name, "Pikachu");
        assert_eq!(data.types, vec!["Electric"]);
        assert_eq!(data.candy_count, Some(50));
        assert!((data.avg_spawns - 21.0).abs() < f64::EPSILON);
        assert!(data.multipliers.is_empty());
        assert!(data.next_evolution.is_empty());
    }

    #[test]
    fn data_treats_null_as_default() {
        let data: PokemonData = serde_json::from_value(json!({
            "name": "Venusaur",
            "multipliers": null,
            "type": null,
            "egg": null
        }))
        .unwrap();

        assert!(data.multipliers.is_empty());
        assert!(data.types.is_empty());
        assert_eq!(data.egg, "");
    }

    #[test]
    fn data_ignores_server_assigned_keys() {
        let data: PokemonData = serde_json::from_value(json!({
            "id": 99,
            "name": "Mew",
            "created_at": "2020-01-01T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(data.name, "Mew");
    }

    #[test]
    fn stored_record_serializes_flat_and_omits_empty_optionals() {
        let value = serde_json::to_value(stored(PokemonData {
            num: "003".to_string(),
            name: "Venusaur".to_string(),
            ..PokemonData::default()
        }))
        .unwrap();

        assert_eq!(value["id"], 1);
        assert_eq!(value["num"], "003");
        assert_eq!(value["created_at"], "2024-01-02T03:04:05Z");
        assert!(value.get("candy_count").is_none());
        assert!(value.get("next_evolution").is_none());
        assert!(value.get("prev_evolution").is_none());
        assert_eq!(value["multipliers"], json!([]));
    }

    #[test]
    fn stored_record_decodes_from_snapshot_shape() {
        let original = stored(PokemonData {
            num: "004".to_string(),
            name: "Charmander".to_string(),
            candy_count: Some(25),
            next_evolution: vec![Evolution::new("005", "Charmeleon")],
            ..PokemonData::default()
        });
        let text = serde_json::to_string(&original).unwrap();
        let decoded: Pokemon = serde_json::from_str(&text).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn patch_applies_only_present_slots() {
        let mut data = PokemonData {
            num: "001".to_string(),
            name: "Bulbasaur".to_string(),
            candy_count: Some(25),
            spawn_chance: 0.69,
            ..PokemonData::default()
        };
        let patch: PokemonPatch =
            serde_json::from_value(json!({ "name": "Bulba", "spawn_chance": 0.5 })).unwrap();

        patch.apply_to(&mut data);

        assert_eq!(data.name, "Bulba");
        assert_eq!(data.num, "001");
        assert_eq!(data.candy_count, Some(25));
        assert!((data.spawn_chance - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn patch_distinguishes_null_candy_count_from_absent() {
        let absent: PokemonPatch = serde_json::from_value(json!({})).unwrap();
        assert_eq!(absent.candy_count, None);
        assert!(absent.is_empty());

        let cleared: PokemonPatch =
            serde_json::from_value(json!({ "candy_count": null })).unwrap();
        assert_eq!(cleared.candy_count, Some(None));

        let mut data = PokemonData {
            candy_count: Some(100),
            ..PokemonData::default()
        };
        cleared.apply_to(&mut data);
        assert_eq!(data.candy_count, None);
    }

    #[test]
    fn patch_null_resets_every_field_kind() {
        let mut data = PokemonData {
            num: "001".to_string(),
            name: "Bulbasaur".to_string(),
            types: vec!["Grass".to_string()],
            spawn_chance: 0.69,
            next_evolution: vec![Evolution::new("002", "Ivysaur")],
            ..PokemonData::default()
        };
        let patch: PokemonPatch = serde_json::from_value(json!({
            "name": null,
            "type": null,
            "spawn_chance": null,
            "next_evolution": null
        }))
        .unwrap();
        assert_eq!(patch.name, Some(String::new()));
        assert!(!patch.is_empty());

        patch.apply_to(&mut data);

        assert_eq!(data.name, "");
        assert!(data.types.is_empty());
        assert!(data.spawn_chance.abs() < f64::EPSILON);
        assert!(data.next_evolution.is_empty());
        assert_eq!(data.num, "001");
    }

    #[test]
    fn patch_drops_server_assigned_keys() {
        let patch: PokemonPatch = serde_json::from_value(json!({
            "id": 42,
            "created_at": "2020-01-01T00:00:00Z",
            "updated_at": "2020-01-01T00:00:00Z"
        }))
        .unwrap();
        assert!(patch.is_empty());
    }
}
