//! `GET /` -- endpoint map and an example create payload.

use axum::Json;
use serde_json::{json, Value};

const ENDPOINTS: &[(&str, &str)] = &[
    ("GET    /", "API documentation"),
    ("GET    /health", "Health details"),
    ("GET    /api/stats", "Pokemon statistics"),
    ("GET    /api/pokemons", "List Pokemon (filter, search, pagination)"),
    ("POST   /api/pokemons", "Create a Pokemon"),
    ("DELETE /api/pokemons?confirm=true", "Delete all Pokemon"),
    ("GET    /api/pokemons/{id}", "Get a Pokemon by id"),
    ("PUT    /api/pokemons/{id}", "Replace a Pokemon"),
    ("PATCH  /api/pokemons/{id}", "Update some fields of a Pokemon"),
    ("DELETE /api/pokemons/{id}", "Delete a Pokemon"),
    ("POST   /api/pokemons/bulk", "Create many Pokemon"),
    ("GET    /api/pokemons/type/{type}", "Pokemon of a type"),
    ("GET    /api/pokemons/weakness/{type}", "Pokemon weak against a type"),
    ("GET    /api/pokemons/search/{query}", "Search name, number, and candy"),
    ("GET    /api/pokemons/candy/{candy}", "Pokemon sharing a candy"),
    ("GET    /api/pokemons/egg/{egg}", "Pokemon hatching from an egg distance"),
    ("GET    /api/pokemons/spawn?min=&max=", "Spawn chance range, highest first"),
    (
        "GET    /api/pokemons/size?min_height=&max_height=&min_weight=&max_weight=",
        "Height and weight range",
    ),
    ("?type=Fire", "Filter by type"),
    ("?search=char", "Search by name or number"),
    ("?page=2&limit=10", "Pagination"),
];

pub async fn home_handler() -> Json<Value> {
    let endpoints: serde_json::Map<String, Value> = ENDPOINTS
        .iter()
        .map(|(route, what)| ((*route).to_string(), Value::from(*what)))
        .collect();

    Json(json!({
        "message": "Pokemon REST API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": endpoints,
        "example_payload": {
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
            "weaknesses": ["Ground"],
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lists_every_endpoint_once() {
        let json = home_handler().await.0;
        let endpoints = json["endpoints"].as_object().unwrap();
        assert_eq!(endpoints.len(), ENDPOINTS.len());
        assert!(endpoints.contains_key("POST   /api/pokemons/bulk"));
    }

    #[tokio::test]
    async fn example_payload_decodes_as_a_record() {
        let json = home_handler().await.0;
        let data: pokedex_core::PokemonData =
            serde_json::from_value(json["example_payload"].clone()).unwrap();
        assert_eq!(data.name, "Pikachu");
        assert_eq!(data.candy_count, Some(50));
    }
}
