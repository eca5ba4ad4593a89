use async_trait::async_trait;
use serde::Deserialize;

use crate::error::FetchError;
use crate::model::{
    AbilitySlot, BaseStat, EntityDetail, EntitySummary, EvolutionNode, FlavorText, MoveLearned,
    SpeciesDetail, SpriteSet,
};

pub const DEFAULT_API_BASE: &str = "https://pokeapi.co/api/v2";

const LEVEL_UP_METHOD: &str = "level-up";

/// Read-only access to the catalogue service.
#[async_trait]
pub trait PokemonProvider: Send + Sync {
    async fn pokemon_list(&self, limit: u16) -> Result<Vec<EntitySummary>, FetchError>;

    async fn pokemon(&self, name: &str) -> Result<EntityDetail, FetchError>;

    async fn type_list(&self) -> Result<Vec<String>, FetchError>;

    async fn species(&self, url: &str) -> Result<SpeciesDetail, FetchError>;

    async fn evolution_chain(&self, url: &str) -> Result<EvolutionNode, FetchError>;

    async fn bytes(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

#[derive(Clone, Debug, Deserialize)]
struct NamedResource {
    name: String,
    url: String,
}

#[derive(Clone, Debug, Deserialize)]
struct ApiResource {
    url: String,
}

#[derive(Clone, Debug, Deserialize)]
struct ListResponse {
    results: Vec<NamedResource>,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonResponse {
    id: u16,
    name: String,
    height: u16,
    weight: u16,
    #[serde(default)]
    types: Vec<PokemonTypeSlot>,
    #[serde(default)]
    stats: Vec<PokemonStatSlot>,
    #[serde(default)]
    abilities: Vec<PokemonAbilitySlot>,
    #[serde(default)]
    moves: Vec<PokemonMoveSlot>,
    #[serde(default)]
    sprites: serde_json::Value,
    cries: Option<PokemonCries>,
    species: Option<NamedResource>,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonTypeSlot {
    #[serde(rename = "type")]
    type_info: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonStatSlot {
    base_stat: u16,
    stat: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonAbilitySlot {
    ability: NamedResource,
    #[serde(default)]
    is_hidden: bool,
    #[serde(default)]
    slot: u8,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonMoveSlot {
    #[serde(rename = "move")]
    move_info: NamedResource,
    #[serde(default)]
    version_group_details: Vec<MoveVersionDetail>,
}

#[derive(Clone, Debug, Deserialize)]
struct MoveVersionDetail {
    level_learned_at: u8,
    move_learn_method: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonCries {
    latest: Option<String>,
    legacy: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonSpeciesResponse {
    #[serde(default)]
    flavor_text_entries: Vec<FlavorTextEntry>,
    evolution_chain: Option<ApiResource>,
}

#[derive(Clone, Debug, Deserialize)]
struct FlavorTextEntry {
    flavor_text: String,
    language: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct EvolutionChainResponse {
    chain: ChainLink,
}

#[derive(Clone, Debug, Deserialize)]
struct ChainLink {
    species: NamedResource,
    #[serde(default)]
    evolves_to: Vec<ChainLink>,
}

/// PokeAPI over HTTP.
#[derive(Clone, Debug)]
pub struct HttpProvider {
    client: reqwest::Client,
    base_url: String,
}

impl HttpProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn fetch_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let bytes = self.fetch_bytes(url).await?;
        serde_json::from_slice(&bytes).map_err(|err| FetchError::decode(url, err))
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| FetchError::request(url, err))?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|err| FetchError::request(url, err))?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl PokemonProvider for HttpProvider {
    async fn pokemon_list(&self, limit: u16) -> Result<Vec<EntitySummary>, FetchError> {
        let url = format!("{}/pokemon?limit={limit}", self.base_url);
        let response: ListResponse = self.fetch_json(&url).await?;
        Ok(response
            .results
            .into_iter()
            .map(|entry| EntitySummary::new(entry.name, entry.url))
            .collect())
    }

    async fn pokemon(&self, name: &str) -> Result<EntityDetail, FetchError> {
        let url = format!("{}/pokemon/{name}", self.base_url);
        let response: PokemonResponse = self.fetch_json(&url).await?;
        Ok(detail_from_response(response))
    }

    async fn type_list(&self) -> Result<Vec<String>, FetchError> {
        let url = format!("{}/type", self.base_url);
        let response: ListResponse = self.fetch_json(&url).await?;
        Ok(response
            .results
            .into_iter()
            .map(|entry| entry.name)
            .filter(|name| name != "unknown" && name != "shadow")
            .collect())
    }

    async fn species(&self, url: &str) -> Result<SpeciesDetail, FetchError> {
        let response: PokemonSpeciesResponse = self.fetch_json(url).await?;
        Ok(SpeciesDetail {
            descriptions: response
                .flavor_text_entries
                .into_iter()
                .map(|entry| FlavorText {
                    text: entry.flavor_text,
                    language: entry.language.name,
                })
                .collect(),
            evolution_chain_url: response.evolution_chain.map(|chain| chain.url),
        })
    }

    async fn evolution_chain(&self, url: &str) -> Result<EvolutionNode, FetchError> {
        let response: EvolutionChainResponse = self.fetch_json(url).await?;
        Ok(node_from_link(response.chain))
    }

    async fn bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.fetch_bytes(url).await
    }
}

fn detail_from_response(response: PokemonResponse) -> EntityDetail {
    let sprites = SpriteSet {
        front_default: pointer_string(&response.sprites, "/front_default"),
        back_default: pointer_string(&response.sprites, "/back_default"),
        front_shiny: pointer_string(&response.sprites, "/front_shiny"),
        back_shiny: pointer_string(&response.sprites, "/back_shiny"),
        official_artwork: pointer_string(
            &response.sprites,
            "/other/official-artwork/front_default",
        ),
    };
    let cry_url = response
        .cries
        .and_then(|cries| cries.latest.or(cries.legacy));

    EntityDetail {
        id: response.id,
        name: response.name,
        height_decimeters: response.height,
        weight_hectograms: response.weight,
        sprites,
        categories: response
            .types
            .into_iter()
            .map(|slot| slot.type_info.name)
            .collect(),
        base_stats: response
            .stats
            .into_iter()
            .map(|slot| BaseStat {
                name: slot.stat.name,
                value: slot.base_stat,
            })
            .collect(),
        abilities: response
            .abilities
            .into_iter()
            .map(|slot| AbilitySlot {
                name: slot.ability.name,
                is_hidden: slot.is_hidden,
                slot: slot.slot,
            })
            .collect(),
        moves: response.moves.into_iter().filter_map(move_from_slot).collect(),
        cry_url,
        species_url: response.species.map(|species| species.url),
    }
}

// One learn record per move: the first level-up entry with a real level, then
// any level-up entry, then whatever is listed first.
fn move_from_slot(slot: PokemonMoveSlot) -> Option<MoveLearned> {
    let details = &slot.version_group_details;
    let is_level_up =
        |detail: &&MoveVersionDetail| detail.move_learn_method.name == LEVEL_UP_METHOD;
    let detail = details
        .iter()
        .filter(is_level_up)
        .find(|detail| detail.level_learned_at > 0)
        .or_else(|| details.iter().find(is_level_up))
        .or_else(|| details.first())?;
    Some(MoveLearned {
        name: slot.move_info.name,
        learn_method: detail.move_learn_method.name.clone(),
        level_learned_at: detail.level_learned_at,
    })
}

fn node_from_link(link: ChainLink) -> EvolutionNode {
    EvolutionNode {
        species_name: link.species.name,
        children: link.evolves_to.into_iter().map(node_from_link).collect(),
    }
}

fn pointer_string(value: &serde_json::Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(|val| val.as_str())
        .map(|s| s.to_string())
}
