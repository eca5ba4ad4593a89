use crate::api::PokemonProvider;
use crate::error::FetchError;
use crate::model::{EvolutionEntry, EvolutionNode};

/// Flattens an evolution tree in pre-order, resolving each species to its id
/// and default front sprite.
///
/// Lookups run one at a time in traversal order. The first failed lookup
/// aborts the whole walk.
pub async fn flatten(
    provider: &dyn PokemonProvider,
    root: &EvolutionNode,
) -> Result<Vec<EvolutionEntry>, FetchError> {
    let mut entries = Vec::new();
    for name in visit_order(root) {
        let detail = provider.pokemon(name).await?;
        entries.push(EvolutionEntry {
            name: name.to_string(),
            id: detail.id,
            sprite_url: detail.sprites.front_default,
        });
    }

    Ok(entries)
}

/// Pre-order species names. Siblings keep their order from the chain.
pub fn visit_order(root: &EvolutionNode) -> Vec<&str> {
    let mut names = Vec::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        names.push(node.species_name.as_str());
        stack.extend(node.children.iter().rev());
    }
    names
}
