mod common;

use std::collections::BTreeSet;

use pokedex::filter::{apply_filter, filter_indices};
use pokedex::model::EntityWithDetail;
use pretty_assertions::assert_eq;

use common::entity;

fn roster() -> Vec<EntityWithDetail> {
    vec![
        entity(1, "bulbasaur", &["grass", "poison"]),
        entity(4, "charmander", &["fire"]),
        entity(6, "charizard", &["fire", "flying"]),
        entity(25, "pikachu", &["electric"]),
        entity(149, "dragonite", &["dragon", "flying"]),
    ]
}

fn set(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn names<'a>(entries: &[&'a EntityWithDetail]) -> Vec<&'a str> {
    entries.iter().map(|entry| entry.name()).collect()
}

#[test]
fn empty_search_and_selection_returns_everything() {
    let roster = roster();
    assert_eq!(filter_indices(&roster, "", &BTreeSet::new()), vec![0, 1, 2, 3, 4]);
}

#[test]
fn name_match_is_case_insensitive_substring() {
    let roster = roster();
    let result = apply_filter(&roster, "CHAR", &BTreeSet::new());
    assert_eq!(names(&result), vec!["charmander", "charizard"]);
}

#[test]
fn search_text_is_not_trimmed() {
    let roster = roster();
    assert!(apply_filter(&roster, " pika", &BTreeSet::new()).is_empty());
}

#[test]
fn categories_require_every_selected_tag() {
    let roster = roster();
    let result = apply_filter(&roster, "", &set(&["fire", "flying"]));
    assert_eq!(names(&result), vec!["charizard"]);
}

#[test]
fn superset_entity_passes_category_filter() {
    let roster = vec![entity(1, "x", &["fire", "flying", "dragon"])];
    assert_eq!(filter_indices(&roster, "", &set(&["fire", "flying"])), vec![0]);
}

#[test]
fn name_and_categories_combine() {
    let roster = roster();
    let result = apply_filter(&roster, "char", &set(&["flying"]));
    assert_eq!(names(&result), vec!["charizard"]);
}

#[test]
fn unknown_category_matches_nothing() {
    let roster = roster();
    assert!(filter_indices(&roster, "", &set(&["ghost"])).is_empty());
}

#[test]
fn filtering_leaves_roster_untouched() {
    let roster = roster();
    let before = roster.clone();
    let _ = apply_filter(&roster, "saur", &set(&["grass"]));
    assert_eq!(roster, before);
}
