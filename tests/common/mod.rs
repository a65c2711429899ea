//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use rickdex::state::{Character, CharacterPage};

pub const PAGE_2: &str = "https://rickandmortyapi.com/api/character?page=2";
pub const PAGE_3: &str = "https://rickandmortyapi.com/api/character?page=3";

pub fn character(id: u32, name: &str, species: &str, kind: &str, status: &str) -> Character {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "name": name,
        "status": status,
        "species": species,
        "type": kind,
        "gender": "Male",
        "origin": { "name": "Earth (C-137)", "url": "https://rickandmortyapi.com/api/location/1" },
        "location": { "name": "Citadel of Ricks", "url": "https://rickandmortyapi.com/api/location/3" },
        "image": format!("https://rickandmortyapi.com/api/character/avatar/{id}.jpeg"),
        "episode": ["https://rickandmortyapi.com/api/episode/1"],
        "created": "2017-11-04T18:48:46.250Z"
    }))
    .expect("fixture character")
}

/// Humans with ids in `ids`.
pub fn humans(ids: std::ops::Range<u32>) -> Vec<Character> {
    ids.map(|id| character(id, &format!("Citizen {id}"), "Human", "", "Alive"))
        .collect()
}

pub fn page(results: Vec<Character>, next: Option<&str>) -> CharacterPage {
    CharacterPage {
        next: next.map(str::to_string),
        results,
    }
}
