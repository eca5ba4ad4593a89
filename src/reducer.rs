use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::effect::Effect;
use crate::navigator::{Transition, ViewState};
use crate::presenter::{self, SpriteVariant};
use crate::state::AppState;

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => {
            state.roster = DataResource::Loading;
            DispatchResult::changed_with(Effect::LoadRoster {
                limit: state.roster_limit,
            })
        }

        // ===== Roster =====
        Action::RosterDidLoad(entries) => {
            state.roster = DataResource::Loaded(entries);
            state.nav.finish_loading();
            state.selected_index = 0;
            state.rebuild_filtered();
            DispatchResult::changed()
        }

        Action::RosterDidError(error) => {
            state.roster = DataResource::Failed(error);
            state.nav.finish_loading();
            state.filtered_indices.clear();
            state.selected_index = 0;
            DispatchResult::changed()
        }

        Action::RosterReload => {
            if !on_roster(state) || state.search.active {
                return DispatchResult::unchanged();
            }
            let reloadable = state.roster.is_failed()
                || state.roster.is_empty()
                || state.roster.data().is_some_and(Vec::is_empty);
            if !reloadable {
                return DispatchResult::unchanged();
            }
            state.roster = DataResource::Loading;
            state.filtered_indices.clear();
            state.selected_index = 0;
            DispatchResult::changed_with(Effect::LoadRoster {
                limit: state.roster_limit,
            })
        }

        Action::RosterSelect(index) => {
            if !on_roster(state) || !state.set_selected_index(index) {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed()
        }

        Action::RosterPage(delta) => {
            if !on_roster(state) {
                return DispatchResult::unchanged();
            }
            let page = state.page_size() as i64;
            let index = (state.selected_index as i64 + i64::from(delta) * page).max(0);
            if !state.set_selected_index(index as usize) {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed()
        }

        Action::RosterOpen => {
            if !on_roster(state) {
                return DispatchResult::unchanged();
            }
            let Some(name) = state.selected_name() else {
                return DispatchResult::unchanged();
            };
            request(state, Transition::OpenDetail(name))
        }

        // ===== Search =====
        Action::SearchStart => {
            if !on_roster(state) || state.search.active {
                return DispatchResult::unchanged();
            }
            state.search.active = true;
            DispatchResult::changed()
        }

        Action::SearchCancel => {
            if !state.search.active && state.search.query.is_empty() {
                return DispatchResult::unchanged();
            }
            state.search.active = false;
            state.search.query.clear();
            state.rebuild_filtered();
            DispatchResult::changed()
        }

        Action::SearchSubmit => {
            if !state.search.active {
                return DispatchResult::unchanged();
            }
            state.search.active = false;
            state.rebuild_filtered();
            DispatchResult::changed()
        }

        Action::SearchInput(ch) => {
            if !state.search.active {
                return DispatchResult::unchanged();
            }
            state.search.query.push(ch);
            state.rebuild_filtered();
            DispatchResult::changed()
        }

        Action::SearchBackspace => {
            if !state.search.active || state.search.query.pop().is_none() {
                return DispatchResult::unchanged();
            }
            state.rebuild_filtered();
            DispatchResult::changed()
        }

        // ===== Category panel =====
        Action::FilterOpen => {
            if state.search.active {
                return DispatchResult::unchanged();
            }
            request(state, Transition::OpenFilter)
        }

        Action::CategoriesDidLoad(options) => {
            state.category_panel.options = DataResource::Loaded(options);
            let count = state.category_panel.option_count();
            state.category_panel.cursor = state.category_panel.cursor.min(count.saturating_sub(1));
            DispatchResult::changed()
        }

        Action::CategoriesDidError(error) => {
            state.category_panel.options = DataResource::Failed(error);
            DispatchResult::changed()
        }

        Action::CategoryCursor(index) => {
            if !on_category_panel(state) {
                return DispatchResult::unchanged();
            }
            let count = state.category_panel.option_count();
            if count == 0 {
                return DispatchResult::unchanged();
            }
            let bounded = index.min(count - 1);
            if bounded == state.category_panel.cursor {
                return DispatchResult::unchanged();
            }
            state.category_panel.cursor = bounded;
            DispatchResult::changed()
        }

        Action::CategoryToggle => {
            if !on_category_panel(state) {
                return DispatchResult::unchanged();
            }
            let Some(option) = state.category_panel.option_at_cursor().cloned() else {
                return DispatchResult::unchanged();
            };
            let pending = &mut state.category_panel.pending;
            if !pending.remove(&option) {
                pending.insert(option);
            }
            DispatchResult::changed()
        }

        Action::CategorySubmit => {
            if !on_category_panel(state) {
                return DispatchResult::unchanged();
            }
            let selection = state.category_panel.pending.clone();
            request(state, Transition::ApplyCategories(selection))
        }

        // ===== Navigation =====
        Action::NavBack => request(state, Transition::Back),

        Action::TransitionDidElapse(ticket) => {
            let Some(transition) = state.nav.settle(ticket) else {
                return DispatchResult::unchanged();
            };
            commit(state, transition)
        }

        // ===== Detail =====
        Action::DetailDidLoad { name, bundle } => {
            if state.detail_name() != Some(name.as_str()) {
                return DispatchResult::unchanged();
            }
            state.detail = DataResource::Loaded(bundle);
            DispatchResult::changed()
        }

        Action::DetailDidError { name, error } => {
            if state.detail_name() != Some(name.as_str()) {
                return DispatchResult::unchanged();
            }
            state.detail = DataResource::Failed(error);
            DispatchResult::changed()
        }

        Action::DetailScroll(delta) => {
            if !on_detail(state) {
                return DispatchResult::unchanged();
            }
            let next = if delta < 0 {
                state.detail_scroll.saturating_sub(delta.unsigned_abs())
            } else {
                state.detail_scroll.saturating_add(delta as u16)
            };
            if next == state.detail_scroll {
                return DispatchResult::unchanged();
            }
            state.detail_scroll = next;
            DispatchResult::changed()
        }

        Action::EvolutionCursor(index) => {
            if !on_detail(state) {
                return DispatchResult::unchanged();
            }
            let count = state
                .current_bundle()
                .map(|bundle| bundle.evolution.len())
                .unwrap_or(0);
            if count == 0 {
                return DispatchResult::unchanged();
            }
            let bounded = index.min(count - 1);
            if bounded == state.evolution_cursor {
                return DispatchResult::unchanged();
            }
            state.evolution_cursor = bounded;
            DispatchResult::changed()
        }

        Action::EvolutionOpen => {
            if !on_detail(state) {
                return DispatchResult::unchanged();
            }
            let Some(name) = state
                .current_bundle()
                .and_then(|bundle| bundle.evolution.get(state.evolution_cursor))
                .map(|entry| entry.name.clone())
            else {
                return DispatchResult::unchanged();
            };
            request(state, Transition::OpenDetail(name))
        }

        // ===== Sprite / cry =====
        Action::SpriteToggleShiny => {
            if !on_detail(state) {
                return DispatchResult::unchanged();
            }
            state.sprite.shiny = !state.sprite.shiny;
            DispatchResult::changed()
        }

        Action::SpriteFlip => {
            if !on_detail(state) {
                return DispatchResult::unchanged();
            }
            let flippable = state
                .current_bundle()
                .is_some_and(|bundle| presenter::can_flip(&bundle.detail.sprites));
            if !flippable {
                return DispatchResult::unchanged();
            }
            state.sprite.back = !state.sprite.back;
            DispatchResult::changed()
        }

        Action::PlayCry => {
            if !on_detail(state) || state.cry_playing {
                return DispatchResult::unchanged();
            }
            let Some(bundle) = state.current_bundle() else {
                return DispatchResult::unchanged();
            };
            let Some(url) = bundle.detail.cry_url.clone() else {
                return DispatchResult::unchanged();
            };
            let name = bundle.detail.name.clone();
            state.cry_playing = true;
            DispatchResult::changed_with(Effect::PlayCry { name, url })
        }

        Action::CryDidPlay | Action::CryDidError(_) => {
            if !state.cry_playing {
                return DispatchResult::unchanged();
            }
            state.cry_playing = false;
            DispatchResult::changed()
        }

        // ===== UI =====
        Action::ThemeToggle => {
            if !on_roster(state) || state.search.active {
                return DispatchResult::unchanged();
            }
            state.theme.toggle();
            DispatchResult::changed()
        }

        Action::UiTerminalResize(width, height) => {
            if state.terminal_size != (width, height) {
                state.terminal_size = (width, height);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Tick => {
            state.tick = state.tick.wrapping_add(1);
            if state.overlay_visible() || state.roster.is_loading() || state.detail.is_loading() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

fn request(state: &mut AppState, transition: Transition) -> DispatchResult<Effect> {
    match state.nav.request(transition) {
        Some(ticket) => DispatchResult::changed_with(Effect::StartTransition { ticket }),
        None => DispatchResult::unchanged(),
    }
}

fn commit(state: &mut AppState, transition: Transition) -> DispatchResult<Effect> {
    match transition {
        Transition::OpenFilter => {
            state.category_panel.pending.clear();
            state.category_panel.cursor = 0;
            let panel = &mut state.category_panel;
            if panel.options.is_loaded() || panel.options.is_loading() {
                return DispatchResult::changed();
            }
            panel.options = DataResource::Loading;
            DispatchResult::changed_with(Effect::LoadCategories)
        }
        Transition::OpenDetail(name) => {
            state.detail = DataResource::Loading;
            state.detail_scroll = 0;
            state.evolution_cursor = 0;
            state.sprite = SpriteVariant::default();
            state.cry_playing = false;
            let cached = state.cached_detail(&name);
            DispatchResult::changed_with(Effect::LoadDetail { name, cached })
        }
        Transition::ApplyCategories(selection) => {
            state.categories = selection;
            state.selected_index = 0;
            state.rebuild_filtered();
            DispatchResult::changed()
        }
        Transition::Back => {
            state.detail = DataResource::Empty;
            state.detail_scroll = 0;
            state.evolution_cursor = 0;
            state.cry_playing = false;
            DispatchResult::changed()
        }
    }
}

fn on_roster(state: &AppState) -> bool {
    matches!(state.nav.view(), ViewState::Roster) && !state.nav.is_transitioning()
}

fn on_category_panel(state: &AppState) -> bool {
    matches!(state.nav.view(), ViewState::CategoryFilter) && !state.nav.is_transitioning()
}

fn on_detail(state: &AppState) -> bool {
    matches!(state.nav.view(), ViewState::Detail { .. }) && !state.nav.is_transitioning()
}
