//! Roster and detail loading against a scripted provider.

mod common;

use std::sync::Arc;
use std::time::Duration;

use pokedex::api::PokemonProvider;
use pokedex::error::FetchError;
use pokedex::evolution;
use pokedex::model::{EvolutionEntry, EvolutionNode, SpeciesDetail};
use pokedex::repository::{load_detail, load_roster};
use pretty_assertions::assert_eq;

use common::{chain_url, detail, flavor, species_url, ScriptedProvider};

#[tokio::test]
async fn roster_keeps_summary_order_despite_completion_order() {
    let mut provider = ScriptedProvider::with_roster(5);
    provider
        .delays
        .insert("mon-1".to_string(), Duration::from_millis(30));
    provider
        .delays
        .insert("mon-3".to_string(), Duration::from_millis(10));

    let roster = load_roster(Arc::new(provider), 151).await.unwrap();

    let names: Vec<_> = roster.iter().map(|entry| entry.name().to_string()).collect();
    assert_eq!(names, vec!["mon-1", "mon-2", "mon-3", "mon-4", "mon-5"]);
    for entry in &roster {
        assert_eq!(entry.summary.name, entry.detail.name);
    }
}

#[tokio::test]
async fn roster_fails_whole_when_one_detail_fails() {
    let mut provider = ScriptedProvider::with_roster(151);
    provider.fail("mon-42");

    let result = load_roster(Arc::new(provider), 151).await;

    assert!(
        matches!(result, Err(FetchError::Status { ref url, status: 500 }) if url == "mon-42")
    );
}

#[tokio::test]
async fn roster_list_failure_issues_no_detail_requests() {
    let mut provider = ScriptedProvider::with_roster(3);
    provider.fail("list");
    let provider = Arc::new(provider);

    let result = load_roster(provider.clone(), 151).await;

    assert!(result.is_err());
    assert_eq!(provider.calls(), vec!["list:151".to_string()]);
}

#[tokio::test]
async fn empty_summary_batch_yields_empty_roster() {
    let provider = ScriptedProvider::new();
    let roster = load_roster(Arc::new(provider), 151).await.unwrap();
    assert!(roster.is_empty());
}

#[tokio::test]
async fn roster_respects_limit() {
    let provider = ScriptedProvider::with_roster(10);
    let roster = load_roster(Arc::new(provider), 4).await.unwrap();
    assert_eq!(roster.len(), 4);
}

#[tokio::test]
async fn flatten_walks_branches_in_preorder() {
    let mut provider = ScriptedProvider::new();
    provider.add_lookup(detail(1, "a", &[]));
    provider.add_lookup(detail(2, "b", &[]));
    let mut c = detail(3, "c", &[]);
    c.sprites.front_default = None;
    provider.add_lookup(c);

    let root = EvolutionNode::with_children(
        "a",
        vec![EvolutionNode::leaf("b"), EvolutionNode::leaf("c")],
    );
    let entries = evolution::flatten(&provider, &root).await.unwrap();

    assert_eq!(
        entries,
        vec![
            EvolutionEntry {
                name: "a".to_string(),
                id: 1,
                sprite_url: Some("front/1.png".to_string()),
            },
            EvolutionEntry {
                name: "b".to_string(),
                id: 2,
                sprite_url: Some("front/2.png".to_string()),
            },
            EvolutionEntry {
                name: "c".to_string(),
                id: 3,
                sprite_url: None,
            },
        ]
    );
    assert_eq!(provider.calls(), vec!["pokemon:a", "pokemon:b", "pokemon:c"]);
}

#[tokio::test]
async fn flatten_single_node_is_one_entry() {
    let mut provider = ScriptedProvider::new();
    provider.add_lookup(detail(132, "ditto", &["normal"]));

    let entries = evolution::flatten(&provider, &EvolutionNode::leaf("ditto"))
        .await
        .unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id, 132);
}

#[tokio::test]
async fn flatten_aborts_on_first_failed_lookup() {
    let mut provider = ScriptedProvider::new();
    provider.add_lookup(detail(1, "a", &[]));
    provider.add_lookup(detail(3, "c", &[]));
    provider.fail("b");

    let root = EvolutionNode::with_children(
        "a",
        vec![EvolutionNode::leaf("b"), EvolutionNode::leaf("c")],
    );
    let result = evolution::flatten(&provider, &root).await;

    assert!(result.is_err());
    assert!(!provider.calls().contains(&"pokemon:c".to_string()));
}

fn detail_provider() -> ScriptedProvider {
    let mut provider = ScriptedProvider::new();
    provider.add_entity(detail(1, "bulbasaur", &["grass", "poison"]));
    provider.add_lookup(detail(2, "ivysaur", &["grass", "poison"]));
    provider.species.insert(
        species_url(1),
        SpeciesDetail {
            descriptions: vec![
                flavor("Une graine", "fr"),
                flavor("A strange seed was\nplanted on its\u{000C}back.", "en"),
                flavor("Second entry", "en"),
            ],
            evolution_chain_url: Some(chain_url(1)),
        },
    );
    provider.chains.insert(
        chain_url(1),
        EvolutionNode::with_children("bulbasaur", vec![EvolutionNode::leaf("ivysaur")]),
    );
    provider
}

#[tokio::test]
async fn detail_bundle_combines_species_and_chain() {
    let provider: Arc<dyn PokemonProvider> = Arc::new(detail_provider());

    let bundle = load_detail(provider, "bulbasaur", None).await.unwrap();

    assert_eq!(bundle.detail.name, "bulbasaur");
    assert_eq!(
        bundle.description.as_deref(),
        Some("A strange seed was planted on its back.")
    );
    let names: Vec<_> = bundle.evolution.iter().map(|entry| entry.name.as_str()).collect();
    assert_eq!(names, vec!["bulbasaur", "ivysaur"]);
}

#[tokio::test]
async fn detail_uses_cached_roster_copy() {
    let provider = Arc::new(detail_provider());
    let cached = detail(1, "bulbasaur", &["grass", "poison"]);

    load_detail(provider.clone(), "bulbasaur", Some(cached)).await.unwrap();

    let calls = provider.calls();
    assert_eq!(calls[0], format!("species:{}", species_url(1)));
}

#[tokio::test]
async fn species_failure_degrades_to_empty_parts() {
    let mut provider = detail_provider();
    provider.fail(&species_url(1));

    let bundle = load_detail(Arc::new(provider), "bulbasaur", None).await.unwrap();

    assert_eq!(bundle.description, None);
    assert!(bundle.evolution.is_empty());
}

#[tokio::test]
async fn chain_failure_keeps_description() {
    let mut provider = detail_provider();
    provider.fail("ivysaur");

    let bundle = load_detail(Arc::new(provider), "bulbasaur", None).await.unwrap();

    assert!(bundle.description.is_some());
    assert!(bundle.evolution.is_empty());
}

#[tokio::test]
async fn missing_detail_fails_the_load() {
    let provider = Arc::new(ScriptedProvider::new());
    let result = load_detail(provider, "missingno", None).await;
    assert!(matches!(result, Err(FetchError::Status { status: 404, .. })));
}
