#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use pokedex::api::PokemonProvider;
use pokedex::error::FetchError;
use pokedex::model::{
    BaseStat, EntityDetail, EntitySummary, EntityWithDetail, EvolutionNode, FlavorText,
    MoveLearned, SpeciesDetail, SpriteSet,
};

pub const BASE: &str = "https://pokeapi.test/api/v2";

/// In-memory provider with canned payloads, injectable failures and a call log.
#[derive(Default)]
pub struct ScriptedProvider {
    pub summaries: Vec<EntitySummary>,
    pub details: HashMap<String, EntityDetail>,
    pub species: HashMap<String, SpeciesDetail>,
    pub chains: HashMap<String, EvolutionNode>,
    pub types: Vec<String>,
    pub failing: HashSet<String>,
    pub delays: HashMap<String, Duration>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_roster(count: u16) -> Self {
        let mut provider = Self::new();
        for id in 1..=count {
            provider.add_entity(detail(id, &format!("mon-{id}"), &["normal"]));
        }
        provider
    }

    pub fn add_entity(&mut self, detail: EntityDetail) {
        self.summaries.push(summary(detail.id, &detail.name));
        self.details.insert(detail.name.clone(), detail);
    }

    pub fn add_lookup(&mut self, detail: EntityDetail) {
        self.details.insert(detail.name.clone(), detail);
    }

    pub fn fail(&mut self, key: &str) {
        self.failing.insert(key.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    async fn pause(&self, key: &str) {
        if let Some(delay) = self.delays.get(key) {
            tokio::time::sleep(*delay).await;
        }
    }

    fn check(&self, key: &str) -> Result<(), FetchError> {
        if self.failing.contains(key) {
            return Err(FetchError::Status {
                url: key.to_string(),
                status: 500,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl PokemonProvider for ScriptedProvider {
    async fn pokemon_list(&self, limit: u16) -> Result<Vec<EntitySummary>, FetchError> {
        self.record(format!("list:{limit}"));
        self.check("list")?;
        Ok(self.summaries.iter().take(limit as usize).cloned().collect())
    }

    async fn pokemon(&self, name: &str) -> Result<EntityDetail, FetchError> {
        self.record(format!("pokemon:{name}"));
        self.pause(name).await;
        self.check(name)?;
        self.details.get(name).cloned().ok_or_else(|| FetchError::Status {
            url: name.to_string(),
            status: 404,
        })
    }

    async fn type_list(&self) -> Result<Vec<String>, FetchError> {
        self.record("types".to_string());
        self.check("types")?;
        Ok(self.types.clone())
    }

    async fn species(&self, url: &str) -> Result<SpeciesDetail, FetchError> {
        self.record(format!("species:{url}"));
        self.check(url)?;
        self.species.get(url).cloned().ok_or_else(|| FetchError::Status {
            url: url.to_string(),
            status: 404,
        })
    }

    async fn evolution_chain(&self, url: &str) -> Result<EvolutionNode, FetchError> {
        self.record(format!("chain:{url}"));
        self.check(url)?;
        self.chains.get(url).cloned().ok_or_else(|| FetchError::Status {
            url: url.to_string(),
            status: 404,
        })
    }

    async fn bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.record(format!("bytes:{url}"));
        self.check(url)?;
        Ok(Vec::new())
    }
}

pub fn summary(id: u16, name: &str) -> EntitySummary {
    EntitySummary::new(name, format!("{BASE}/pokemon/{id}/"))
}

pub fn species_url(id: u16) -> String {
    format!("{BASE}/pokemon-species/{id}/")
}

pub fn chain_url(id: u16) -> String {
    format!("{BASE}/evolution-chain/{id}/")
}

pub fn detail(id: u16, name: &str, categories: &[&str]) -> EntityDetail {
    EntityDetail {
        id,
        name: name.to_string(),
        height_decimeters: 7,
        weight_hectograms: 69,
        sprites: SpriteSet {
            front_default: Some(format!("front/{id}.png")),
            back_default: Some(format!("back/{id}.png")),
            front_shiny: Some(format!("shiny/{id}.png")),
            back_shiny: None,
            official_artwork: Some(format!("art/{id}.png")),
        },
        categories: categories.iter().map(|name| name.to_string()).collect(),
        base_stats: vec![BaseStat {
            name: "hp".to_string(),
            value: 45,
        }],
        abilities: Vec::new(),
        moves: Vec::new(),
        cry_url: Some(format!("cry/{id}.ogg")),
        species_url: Some(species_url(id)),
    }
}

pub fn entity(id: u16, name: &str, categories: &[&str]) -> EntityWithDetail {
    EntityWithDetail {
        summary: summary(id, name),
        detail: detail(id, name, categories),
    }
}

pub fn level_up(name: &str, level: u8) -> MoveLearned {
    MoveLearned {
        name: name.to_string(),
        learn_method: "level-up".to_string(),
        level_learned_at: level,
    }
}

pub fn flavor(text: &str, language: &str) -> FlavorText {
    FlavorText {
        text: text.to_string(),
        language: language.to_string(),
    }
}
