use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::api::PokemonProvider;
use crate::error::FetchError;
use crate::evolution;
use crate::model::{DetailBundle, EntityDetail, EntityWithDetail, EvolutionEntry};
use crate::presenter;

pub const ROSTER_CONCURRENCY: usize = 16;

/// Loads the summary batch and then every detail concurrently.
///
/// All-or-nothing: the first failed detail fails the call and the tasks still
/// in flight are detached. Output follows summary order.
pub async fn load_roster(
    provider: Arc<dyn PokemonProvider>,
    limit: u16,
) -> Result<Vec<EntityWithDetail>, FetchError> {
    let summaries = provider.pokemon_list(limit).await?;
    debug!(count = summaries.len(), "roster summaries fetched");
    if summaries.is_empty() {
        return Ok(Vec::new());
    }

    let semaphore = Arc::new(Semaphore::new(ROSTER_CONCURRENCY));
    let mut join_set = JoinSet::new();
    for summary in &summaries {
        let name = summary.name.clone();
        let provider = Arc::clone(&provider);
        let semaphore = semaphore.clone();
        join_set.spawn(async move {
            let result = match semaphore.acquire_owned().await {
                Ok(_permit) => provider.pokemon(&name).await,
                Err(err) => Err(FetchError::Task {
                    name: name.clone(),
                    message: err.to_string(),
                }),
            };
            (name, result)
        });
    }

    let mut details: HashMap<String, EntityDetail> = HashMap::with_capacity(summaries.len());
    while let Some(joined) = join_set.join_next().await {
        let failure = match joined {
            Ok((name, Ok(detail))) => {
                details.insert(name, detail);
                continue;
            }
            Ok((_, Err(err))) => err,
            Err(err) => FetchError::Task {
                name: "roster".to_string(),
                message: err.to_string(),
            },
        };
        join_set.detach_all();
        return Err(failure);
    }

    let mut roster = Vec::with_capacity(summaries.len());
    for summary in summaries {
        let detail = details.remove(&summary.name).ok_or_else(|| FetchError::Task {
            name: summary.name.clone(),
            message: "detail missing after join".to_string(),
        })?;
        roster.push(EntityWithDetail { summary, detail });
    }
    info!(count = roster.len(), "roster loaded");
    Ok(roster)
}

/// Everything the detail screen needs for `name`.
///
/// `cached` is the roster's copy of the detail; without it the detail is
/// fetched. Species and evolution chain failures leave those parts empty.
pub async fn load_detail(
    provider: Arc<dyn PokemonProvider>,
    name: &str,
    cached: Option<EntityDetail>,
) -> Result<DetailBundle, FetchError> {
    let detail = match cached {
        Some(detail) => detail,
        None => provider.pokemon(name).await?,
    };

    let species = match detail.species_url.as_deref() {
        Some(url) => match provider.species(url).await {
            Ok(species) => Some(species),
            Err(err) => {
                warn!(%name, error = %err, "species lookup failed");
                None
            }
        },
        None => None,
    };

    let description = species.as_ref().and_then(presenter::english_description);

    let chain_url = species.and_then(|species| species.evolution_chain_url);
    let evolution = match chain_url {
        Some(url) => match resolve_chain(provider.as_ref(), &url).await {
            Ok(entries) => entries,
            Err(err) => {
                warn!(%name, error = %err, "evolution chain lookup failed");
                Vec::new()
            }
        },
        None => Vec::new(),
    };

    Ok(DetailBundle {
        detail,
        description,
        evolution,
    })
}

async fn resolve_chain(
    provider: &dyn PokemonProvider,
    url: &str,
) -> Result<Vec<EvolutionEntry>, FetchError> {
    let root = provider.evolution_chain(url).await?;
    evolution::flatten(provider, &root).await
}
