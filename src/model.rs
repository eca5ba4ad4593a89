//! Domain records shared by the data layer, the store and the presenter.

use serde::{Deserialize, Serialize};

/// One row of the `/pokemon?limit=N` batch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySummary {
    pub name: String,
    pub url: String,
    pub id: Option<u16>,
}

impl EntitySummary {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        let url = url.into();
        let id = id_from_url(&url);
        Self {
            name: name.into(),
            url,
            id,
        }
    }
}

/// Trailing numeric path segment of a resource url (`.../pokemon/25/` -> 25).
pub fn id_from_url(url: &str) -> Option<u16> {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .and_then(|segment| segment.parse().ok())
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteSet {
    pub front_default: Option<String>,
    pub back_default: Option<String>,
    pub front_shiny: Option<String>,
    pub back_shiny: Option<String>,
    pub official_artwork: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStat {
    pub name: String,
    pub value: u16,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilitySlot {
    pub name: String,
    pub is_hidden: bool,
    pub slot: u8,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveLearned {
    pub name: String,
    pub learn_method: String,
    pub level_learned_at: u8,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityDetail {
    pub id: u16,
    pub name: String,
    pub height_decimeters: u16,
    /// Tenths of a kilogram, as PokeAPI reports it.
    pub weight_hectograms: u16,
    pub sprites: SpriteSet,
    pub categories: Vec<String>,
    pub base_stats: Vec<BaseStat>,
    pub abilities: Vec<AbilitySlot>,
    pub moves: Vec<MoveLearned>,
    pub cry_url: Option<String>,
    pub species_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityWithDetail {
    pub summary: EntitySummary,
    pub detail: EntityDetail,
}

impl EntityWithDetail {
    pub fn name(&self) -> &str {
        &self.summary.name
    }

    /// Dex number, preferring the summary url and falling back to the detail id.
    pub fn number(&self) -> u16 {
        self.summary.id.unwrap_or(self.detail.id)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlavorText {
    pub text: String,
    pub language: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesDetail {
    pub descriptions: Vec<FlavorText>,
    pub evolution_chain_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionNode {
    pub species_name: String,
    pub children: Vec<EvolutionNode>,
}

impl EvolutionNode {
    pub fn leaf(species_name: impl Into<String>) -> Self {
        Self {
            species_name: species_name.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(species_name: impl Into<String>, children: Vec<EvolutionNode>) -> Self {
        Self {
            species_name: species_name.into(),
            children,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionEntry {
    pub name: String,
    pub id: u16,
    pub sprite_url: Option<String>,
}

/// Everything the detail screen shows for one entity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailBundle {
    pub detail: EntityDetail,
    pub description: Option<String>,
    pub evolution: Vec<EvolutionEntry>,
}
