//! Built-in sample data used when no seed file is available.

use crate::record::{Evolution, PokemonData};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

fn image(num: &str) -> String {
    format!("http://www.serebii.net/pokemongo/pokemon/{num}.png")
}

/// The five built-in sample records, in seed order.
#[must_use]
pub fn sample_records() -> Vec<PokemonData> {
    let grass_poison_weak = strings(&["Fire", "Ice", "Flying", "Psychic"]);
    let fire_weak = strings(&["Water", "Ground", "Rock"]);

    vec![
        PokemonData {
            num: "001".to_string(),
            name: "Bulbasaur".to_string(),
            img: image("001"),
            types: strings(&["Grass", "Poison"]),
            height: "0.71 m".to_string(),
            weight: "6.9 kg".to_string(),
            candy: "Bulbasaur Candy".to_string(),
            candy_count: Some(25),
            egg: "2 km".to_string(),
            spawn_chance: 0.69,
            avg_spawns: 69.0,
            spawn_time: "20:00".to_string(),
            multipliers: vec![1.58],
            weaknesses: grass_poison_weak.clone(),
            next_evolution: vec![
                Evolution::new("002", "Ivysaur"),
                Evolution::new("003", "Venusaur"),
            ],
            prev_evolution: Vec::new(),
        },
        PokemonData {
            num: "002".to_string(),
            name: "Ivysaur".to_string(),
            img: image("002"),
            types: strings(&["Grass", "Poison"]),
            height: "0.99 m".to_string(),
            weight: "13.0 kg".to_string(),
            candy: "Bulbasaur Candy".to_string(),
            candy_count: Some(100),
            egg: "Not in Eggs".to_string(),
            spawn_chance: 0.042,
            avg_spawns: 4.2,
            spawn_time: "07:00".to_string(),
            multipliers: vec![1.2, 1.6],
            weaknesses: grass_poison_weak.clone(),
            next_evolution: vec![Evolution::new("003", "Venusaur")],
            prev_evolution: vec![Evolution::new("001", "Bulbasaur")],
        },
        PokemonData {
            num: "003".to_string(),
            name: "Venusaur".to_string(),
            img: image("003"),
            types: strings(&["Grass", "Poison"]),
            height: "2.01 m".to_string(),
            weight: "100.0 kg".to_string(),
            candy: "Bulbasaur Candy".to_string(),
            candy_count: None,
            egg: "Not in Eggs".to_string(),
            spawn_chance: 0.017,
            avg_spawns: 1.7,
            spawn_time: "11:30".to_string(),
            multipliers: Vec::new(),
            weaknesses: grass_poison_weak,
            next_evolution: Vec::new(),
            prev_evolution: vec![
                Evolution::new("001", "Bulbasaur"),
                Evolution::new("002", "Ivysaur"),
            ],
        },
        PokemonData {
            num: "004".to_string(),
            name: "Charmander".to_string(),
            img: image("004"),
            types: strings(&["Fire"]),
            height: "0.61 m".to_string(),
            weight: "8.5 kg".to_string(),
            candy: "Charmander Candy".to_string(),
            candy_count: Some(25),
            egg: "2 km".to_string(),
            spawn_chance: 0.253,
            avg_spawns: 25.3,
            spawn_time: "08:45".to_string(),
            multipliers: vec![1.65],
            weaknesses: fire_weak.clone(),
            next_evolution: vec![
                Evolution::new("005", "Charmeleon"),
                Evolution::new("006", "Charizard"),
            ],
            prev_evolution: Vec::new(),
        },
        PokemonData {
            num: "005".to_string(),
            name: "Charmeleon".to_string(),
            img: image("005"),
            types: strings(&["Fire"]),
            height: "1.09 m".to_string(),
            weight: "19.0 kg".to_string(),
            candy: "Charmander Candy".to_string(),
            candy_count: Some(100),
            egg: "Not in Eggs".to_string(),
            spawn_chance: 0.012,
            avg_spawns: 1.2,
            spawn_time: "19:00".to_string(),
            multipliers: vec![1.79],
            weaknesses: fire_weak,
            next_evolution: vec![Evolution::new("006", "Charizard")],
            prev_evolution: vec![Evolution::new("004", "Charmander")],
        },
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::RecordStore;

    #[test]
    fn samples_have_unique_numbers_and_names() {
        let samples = sample_records();
        assert_eq!(samples.len(), 5);
        let nums: HashSet<_> = samples.iter().map(|p| p.num.as_str()).collect();
        assert_eq!(nums.len(), 5);
        assert!(samples.iter().all(|p| !p.name.is_empty()));
    }

    #[test]
    fn samples_seed_a_store_in_order() {
        let store = RecordStore::new();
        store.seed(sample_records());
        let names: Vec<_> = store.snapshot().into_iter().map(|p| (p.id, p.data.name)).collect();
        assert_eq!(names[0], (1, "Bulbasaur".to_string()));
        assert_eq!(names[4], (5, "Charmeleon".to_string()));
    }
}
