//! Collection and per-record endpoints: list, create, read, replace, patch,
//! delete, bulk create, and clear.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use pokedex_core::query::{self, ListQuery};
use pokedex_core::{Page, PageRequest, Pokemon, PokemonData, PokemonPatch};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use super::error::{parse_id, ApiError};
use super::AppState;

type ApiResult<T> = Result<T, ApiError>;

/// Query string of `GET /api/pokemons`. Values stay raw so unparsable
/// numbers fall back to defaults instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde(rename = "type")]
    pub type_filter: Option<String>,
    pub search: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl From<ListParams> for ListQuery {
    fn from(params: ListParams) -> Self {
        Self {
            page: PageRequest::parse(params.page.as_deref(), params.limit.as_deref()),
            type_filter: params.type_filter,
            search: params.search,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ClearParams {
    pub confirm: Option<String>,
}

/// `GET /api/pokemons`
pub async fn list_pokemons(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> ApiResult<Json<Page<Pokemon>>> {
    let Query(params) = params?;
    let query = ListQuery::from(params);
    Ok(Json(query::list(state.store.snapshot(), &query)))
}

/// `POST /api/pokemons`
pub async fn create_pokemon(
    State(state): State<AppState>,
    payload: Result<Json<PokemonData>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let Json(data) = payload?;
    let pokemon = state.store.insert(data)?;
    info!(id = pokemon.id, num = %pokemon.data.num, "pokemon created");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Pokemon created successfully",
            "pokemon": pokemon,
        })),
    ))
}

/// `GET /api/pokemons/{id}`
pub async fn get_pokemon(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<Pokemon>> {
    let Path(id) = id?;
    let id = parse_id(&id)?;
    Ok(Json(state.store.get(id)?))
}

/// `PUT /api/pokemons/{id}`
pub async fn replace_pokemon(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
    payload: Result<Json<PokemonData>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Path(id) = id?;
    let id = parse_id(&id)?;
    let Json(data) = payload?;
    let pokemon = state.store.replace(id, data)?;

    Ok(Json(json!({
        "message": "Pokemon updated successfully",
        "pokemon": pokemon,
    })))
}

/// `PATCH /api/pokemons/{id}`
pub async fn patch_pokemon(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
    payload: Result<Json<PokemonPatch>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Path(id) = id?;
    let id = parse_id(&id)?;
    let Json(patch) = payload?;
    let pokemon = state.store.patch(id, patch)?;

    Ok(Json(json!({
        "message": "Pokemon updated successfully",
        "pokemon": pokemon,
    })))
}

/// `DELETE /api/pokemons/{id}`
pub async fn delete_pokemon(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<Value>> {
    let Path(id) = id?;
    let id = parse_id(&id)?;
    let removed = state.store.delete(id)?;
    info!(id, num = %removed.data.num, "pokemon deleted");

    Ok(Json(json!({
        "message": "Pokemon deleted successfully",
        "id": id.to_string(),
    })))
}

/// `POST /api/pokemons/bulk`
///
/// 201 when every item was inserted, 206 when at least one failed.
pub async fn bulk_create_pokemons(
    State(state): State<AppState>,
    payload: Result<Json<Vec<PokemonData>>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let Json(candidates) = payload?;
    let outcome = state.store.bulk_insert(candidates);
    let status = if outcome.is_partial() {
        StatusCode::PARTIAL_CONTENT
    } else {
        StatusCode::CREATED
    };
    info!(
        created = outcome.inserted.len(),
        failed = outcome.errors.len(),
        "bulk create completed"
    );

    let errors: Vec<String> = outcome.errors.iter().map(ToString::to_string).collect();
    Ok((
        status,
        Json(json!({
            "message": "Bulk create completed",
            "created_count": outcome.inserted.len(),
            "failed_count": errors.len(),
            "created_pokemons": outcome.inserted,
            "errors": errors,
        })),
    ))
}

/// `DELETE /api/pokemons?confirm=true`
pub async fn clear_pokemons(
    State(state): State<AppState>,
    params: Result<Query<ClearParams>, QueryRejection>,
) -> ApiResult<Json<Value>> {
    let Query(params) = params?;
    if params.confirm.as_deref() != Some("true") {
        return Err(ApiError::ConfirmationRequired);
    }
    let deleted = state.store.clear();
    info!(deleted, "all pokemon deleted");

    Ok(Json(json!({
        "message": "All Pokemon deleted successfully",
        "deleted_count": deleted,
    })))
}
