//! Read-only views over a store snapshot: tag lookups, keyword search,
//! numeric ranges, and statistics.

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::routing::{get, MethodRouter};
use axum::Json;
use chrono::{SecondsFormat, Utc};
use pokedex_core::query::filter;
use pokedex_core::{Pokemon, SizeRange, SpawnRange, Stats};
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use super::AppState;

type Segment = Result<Path<String>, PathRejection>;
type ViewResult = Result<Json<Vec<Pokemon>>, ApiError>;

/// `GET /api/pokemons/type/{type}`
pub async fn by_type(State(state): State<AppState>, tag: Segment) -> ViewResult {
    let Path(tag) = tag?;
    Ok(Json(filter::by_type(state.store.snapshot(), &tag)))
}

/// `GET /api/pokemons/weakness/{type}`
pub async fn by_weakness(State(state): State<AppState>, tag: Segment) -> ViewResult {
    let Path(tag) = tag?;
    Ok(Json(filter::by_weakness(state.store.snapshot(), &tag)))
}

/// `GET /api/pokemons/search/{query}`
pub async fn search(State(state): State<AppState>, keyword: Segment) -> ViewResult {
    let Path(keyword) = keyword?;
    Ok(Json(filter::by_keyword(state.store.snapshot(), &keyword)))
}

/// `GET /api/pokemons/candy/{candy}`
pub async fn by_candy(State(state): State<AppState>, candy: Segment) -> ViewResult {
    let Path(candy) = candy?;
    Ok(Json(filter::by_candy(state.store.snapshot(), &candy)))
}

/// `GET /api/pokemons/egg/{egg}`
pub async fn by_egg(State(state): State<AppState>, egg: Segment) -> ViewResult {
    let Path(egg) = egg?;
    Ok(Json(filter::by_egg(state.store.snapshot(), &egg)))
}

/// Route for a lookup path whose parameter segment is empty, e.g.
/// `/api/pokemons/type/`. Answers 400 with `message`.
#[must_use]
pub fn parameter_required(message: &'static str) -> MethodRouter<AppState> {
    get(move || async move { ApiError::MissingParameter(message) })
}

/// Raw bounds of the spawn view; unparsable or non-finite numbers count as
/// absent.
#[derive(Debug, Default, Deserialize)]
pub struct SpawnParams {
    pub min: Option<String>,
    pub max: Option<String>,
}

impl From<SpawnParams> for SpawnRange {
    fn from(params: SpawnParams) -> Self {
        SpawnRange::new(number(params.min.as_deref()), number(params.max.as_deref()))
    }
}

/// `GET /api/pokemons/spawn?min=&max=`
pub async fn by_spawn_chance(
    State(state): State<AppState>,
    params: Result<Query<SpawnParams>, QueryRejection>,
) -> ViewResult {
    let Query(params) = params?;
    Ok(Json(SpawnRange::from(params).apply(state.store.snapshot())))
}

#[derive(Debug, Default, Deserialize)]
pub struct SizeParams {
    pub min_height: Option<String>,
    pub max_height: Option<String>,
    pub min_weight: Option<String>,
    pub max_weight: Option<String>,
}

impl From<SizeParams> for SizeRange {
    fn from(params: SizeParams) -> Self {
        SizeRange {
            min_height: number(params.min_height.as_deref()),
            max_height: number(params.max_height.as_deref()),
            min_weight: number(params.min_weight.as_deref()),
            max_weight: number(params.max_weight.as_deref()),
        }
    }
}

/// `GET /api/pokemons/size?min_height=&max_height=&min_weight=&max_weight=`
pub async fn by_size(
    State(state): State<AppState>,
    params: Result<Query<SizeParams>, QueryRejection>,
) -> ViewResult {
    let Query(params) = params?;
    Ok(Json(SizeRange::from(params).apply(state.store.snapshot())))
}

/// Statistics plus the time they were computed.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: Stats,
    pub last_updated: String,
}

/// `GET /api/stats`
pub async fn stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = Stats::compute(&state.store.snapshot());
    Json(StatsResponse {
        stats,
        last_updated: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
    })
}

/// Parses a numeric bound. `NaN` and infinities are rejected like any
/// other unusable value.
fn number(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::handlers::testing::{empty_state, seeded_state};

    fn names(records: &[Pokemon]) -> Vec<&str> {
        records.iter().map(|p| p.data.name.as_str()).collect()
    }

    #[tokio::test]
    async fn tag_views_ignore_case() {
        let fire = by_type(State(seeded_state()), Ok(Path("FIRE".to_string()))).await.unwrap().0;
        assert_eq!(names(&fire), ["Charmander", "Charmeleon"]);

        let weak = by_weakness(State(seeded_state()), Ok(Path("psychic".to_string()))).await.unwrap().0;
        assert_eq!(names(&weak), ["Bulbasaur", "Ivysaur", "Venusaur"]);
    }

    #[tokio::test]
    async fn search_matches_candy_name() {
        let hits = search(State(seeded_state()), Ok(Path("CHARMANDER CANDY".to_string()))).await.unwrap().0;
        assert_eq!(names(&hits), ["Charmander", "Charmeleon"]);
    }

    #[tokio::test]
    async fn candy_and_egg_views() {
        let candy = by_candy(State(seeded_state()), Ok(Path("Bulbasaur".to_string()))).await.unwrap().0;
        assert_eq!(candy.len(), 3);

        let eggs = by_egg(State(seeded_state()), Ok(Path("2 km".to_string()))).await.unwrap().0;
        assert_eq!(names(&eggs), ["Bulbasaur", "Charmander"]);
    }

    #[tokio::test]
    async fn spawn_view_sorts_descending_and_ignores_bad_bounds() {
        let params = SpawnParams {
            min: Some("0.02".to_string()),
            max: Some("not-a-number".to_string()),
        };
        let hits = by_spawn_chance(State(seeded_state()), Ok(Query(params))).await.unwrap().0;
        assert_eq!(names(&hits), ["Bulbasaur", "Charmander", "Ivysaur"]);
    }

    #[tokio::test]
    async fn size_view_combines_dimensions() {
        let params = SizeParams {
            max_height: Some("1.0".to_string()),
            min_weight: Some("7".to_string()),
            ..SizeParams::default()
        };
        let hits = by_size(State(seeded_state()), Ok(Query(params))).await.unwrap().0;
        assert_eq!(names(&hits), ["Ivysaur", "Charmander"]);
    }

    #[test]
    fn non_finite_bounds_count_as_absent() {
        assert_eq!(number(Some("NaN")), None);
        assert_eq!(number(Some("inf")), None);
        assert_eq!(number(Some("-infinity")), None);
        assert_eq!(number(Some(" 0.5 ")), Some(0.5));

        let range = SpawnRange::from(SpawnParams {
            min: Some("NaN".to_string()),
            max: Some("inf".to_string()),
        });
        assert_eq!(range, SpawnRange::new(None, None));
    }

    #[tokio::test]
    async fn nan_bound_does_not_empty_the_spawn_view() {
        let params = SpawnParams {
            min: Some("NaN".to_string()),
            ..SpawnParams::default()
        };
        let hits = by_spawn_chance(State(seeded_state()), Ok(Query(params)))
            .await
            .unwrap()
            .0;
        assert_eq!(hits.len(), 5);
    }

    #[tokio::test]
    async fn stats_summarise_seeded_store() {
        let body = serde_json::to_value(stats(State(seeded_state())).await.0).unwrap();
        assert_eq!(body["total_pokemons"], 5);
        assert_eq!(body["by_type"]["Grass"], 3);
        assert_eq!(body["by_type"]["Fire"], 2);
        assert_eq!(body["highest_spawn"]["name"], "Bulbasaur");
        assert_eq!(body["lowest_spawn"]["name"], "Charmeleon");
        assert!(body["last_updated"].as_str().unwrap().ends_with('Z'));
    }

    #[tokio::test]
    async fn stats_on_empty_store_do_not_fail() {
        let body = serde_json::to_value(stats(State(empty_state())).await.0).unwrap();
        assert_eq!(body["total_pokemons"], 0);
        assert_eq!(body["avg_spawn_chance"], 0.0);
        assert!(body["highest_spawn"].is_null());
        assert!(body["lowest_spawn"].is_null());
    }
}
