use std::collections::BTreeSet;

use crate::model::EntityWithDetail;

/// Indices into `roster` of the entities matching both the name search and
/// every selected category, in roster order.
pub fn filter_indices(
    roster: &[EntityWithDetail],
    search: &str,
    categories: &BTreeSet<String>,
) -> Vec<usize> {
    let needle = search.to_lowercase();
    roster
        .iter()
        .enumerate()
        .filter(|(_, entity)| matches_entity(entity, &needle, categories))
        .map(|(index, _)| index)
        .collect()
}

pub fn apply_filter<'a>(
    roster: &'a [EntityWithDetail],
    search: &str,
    categories: &BTreeSet<String>,
) -> Vec<&'a EntityWithDetail> {
    filter_indices(roster, search, categories)
        .into_iter()
        .map(|index| &roster[index])
        .collect()
}

// `needle` is already lowercased.
fn matches_entity(entity: &EntityWithDetail, needle: &str, categories: &BTreeSet<String>) -> bool {
    if !needle.is_empty() && !entity.name().to_lowercase().contains(needle) {
        return false;
    }
    categories
        .iter()
        .all(|category| entity.detail.categories.iter().any(|own| own == category))
}
