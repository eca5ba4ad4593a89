//! Screen rendering through `RenderHarness`.

mod common;

use pokedex::action::Action;
use pokedex::effect::Effect;
use pokedex::reducer::reducer;
use pokedex::state::AppState;
use pokedex::ui::{PokedexComponentId, PokedexUi};
use tui_dispatch::testing::RenderHarness;
use tui_dispatch::{EffectStore, EventContext, RenderContext};

use common::entity;

fn render(state: &AppState) -> String {
    let mut harness = RenderHarness::new(100, 30);
    let mut ui = PokedexUi::new();
    let mut event_ctx = EventContext::<PokedexComponentId>::default();
    harness.render_to_string_plain(|frame| {
        let area = frame.area();
        ui.render(frame, area, state, RenderContext::default(), &mut event_ctx);
    })
}

fn loaded_store() -> EffectStore<AppState, Action, Effect> {
    let mut store = EffectStore::new(AppState::default(), reducer);
    store.dispatch(Action::Init);
    store.dispatch(Action::RosterDidLoad(vec![
        entity(1, "bulbasaur", &["grass", "poison"]),
        entity(4, "charmander", &["fire"]),
    ]));
    store
}

#[test]
fn roster_renders_entries() {
    let store = loaded_store();
    let output = render(store.state());
    assert!(output.contains("Bulbasaur"));
    assert!(output.contains("Charmander"));
    assert!(!output.contains("Loading..."));
}

#[test]
fn transition_hides_screen_content() {
    let mut store = loaded_store();
    store.dispatch(Action::RosterOpen);

    let output = render(store.state());

    assert!(output.contains("Loading..."));
    assert!(!output.contains("Bulbasaur"));
    assert!(!output.contains("Charmander"));
}

#[test]
fn initial_load_shows_only_overlay() {
    let mut store = EffectStore::new(AppState::default(), reducer);
    store.dispatch(Action::Init);

    let output = render(store.state());

    assert!(output.contains("Loading roster..."));
}
