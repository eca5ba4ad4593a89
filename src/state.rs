use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;
use tui_dispatch_debug::debug::{ron_string, DebugSection, DebugState};

use crate::config::DEFAULT_ROSTER_LIMIT;
use crate::filter;
use crate::model::{DetailBundle, EntityDetail, EntityWithDetail};
use crate::navigator::{Navigator, ViewState};
use crate::presenter::SpriteVariant;
use crate::theme::Theme;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchState {
    pub active: bool,
    pub query: String,
}

/// Category panel contents. `pending` is the selection being edited; it only
/// reaches the roster filter when applied.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CategoryPanel {
    pub options: DataResource<Vec<String>>,
    pub cursor: usize,
    pub pending: BTreeSet<String>,
}

impl Default for CategoryPanel {
    fn default() -> Self {
        Self {
            options: DataResource::Empty,
            cursor: 0,
            pending: BTreeSet::new(),
        }
    }
}

impl CategoryPanel {
    pub fn option_count(&self) -> usize {
        self.options.data().map(Vec::len).unwrap_or(0)
    }

    pub fn option_at_cursor(&self) -> Option<&String> {
        self.options.data().and_then(|options| options.get(self.cursor))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppState {
    pub terminal_size: (u16, u16),
    pub roster_limit: u16,
    pub theme: Theme,
    pub nav: Navigator,

    pub roster: DataResource<Vec<EntityWithDetail>>,
    pub filtered_indices: Vec<usize>,
    pub selected_index: usize,
    pub search: SearchState,
    pub categories: BTreeSet<String>,
    pub category_panel: CategoryPanel,

    pub detail: DataResource<DetailBundle>,
    pub detail_scroll: u16,
    pub evolution_cursor: usize,
    pub sprite: SpriteVariant,
    pub cry_playing: bool,

    pub tick: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            terminal_size: (80, 24),
            roster_limit: DEFAULT_ROSTER_LIMIT,
            theme: Theme::default(),
            nav: Navigator::new(),
            roster: DataResource::Empty,
            filtered_indices: Vec::new(),
            selected_index: 0,
            search: SearchState::default(),
            categories: BTreeSet::new(),
            category_panel: CategoryPanel::default(),
            detail: DataResource::Empty,
            detail_scroll: 0,
            evolution_cursor: 0,
            sprite: SpriteVariant::default(),
            cry_playing: false,
            tick: 0,
        }
    }
}

impl AppState {
    pub fn new(theme: Theme, roster_limit: u16) -> Self {
        Self {
            theme,
            roster_limit,
            ..Self::default()
        }
    }

    pub fn view(&self) -> &ViewState {
        self.nav.view()
    }

    pub fn roster_entries(&self) -> &[EntityWithDetail] {
        self.roster.data().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn selected_entry(&self) -> Option<&EntityWithDetail> {
        self.filtered_indices
            .get(self.selected_index)
            .and_then(|idx| self.roster_entries().get(*idx))
    }

    pub fn selected_name(&self) -> Option<String> {
        self.selected_entry().map(|entry| entry.name().to_string())
    }

    pub fn set_selected_index(&mut self, index: usize) -> bool {
        if self.filtered_indices.is_empty() {
            self.selected_index = 0;
            return false;
        }
        let bounded = index.min(self.filtered_indices.len() - 1);
        if bounded != self.selected_index {
            self.selected_index = bounded;
            return true;
        }
        false
    }

    pub fn rebuild_filtered(&mut self) {
        self.filtered_indices =
            filter::filter_indices(self.roster_entries(), &self.search.query, &self.categories);
        if self.selected_index >= self.filtered_indices.len() {
            self.selected_index = 0;
        }
    }

    /// Name on the detail screen, or the one it is about to show.
    pub fn detail_name(&self) -> Option<&str> {
        match self.nav.view() {
            ViewState::Detail { name } => Some(name.as_str()),
            _ => None,
        }
    }

    pub fn cached_detail(&self, name: &str) -> Option<EntityDetail> {
        self.roster_entries()
            .iter()
            .find(|entry| entry.name() == name)
            .map(|entry| entry.detail.clone())
    }

    pub fn current_bundle(&self) -> Option<&DetailBundle> {
        self.detail.data()
    }

    pub fn overlay_visible(&self) -> bool {
        matches!(self.nav.view(), ViewState::Loading) || self.nav.is_transitioning()
    }

    pub fn page_size(&self) -> usize {
        (self.terminal_size.1.saturating_sub(8) as usize).max(1)
    }
}

impl DebugState for AppState {
    fn debug_sections(&self) -> Vec<DebugSection> {
        vec![
            DebugSection::new("View")
                .entry("screen", ron_string(self.nav.view()))
                .entry("pending", ron_string(&self.nav.pending()))
                .entry("theme", ron_string(&self.theme.mode)),
            DebugSection::new("Roster")
                .entry("total", ron_string(&self.roster_entries().len()))
                .entry("loading", ron_string(&self.roster.is_loading()))
                .entry("failed", ron_string(&self.roster.error()))
                .entry("filtered", ron_string(&self.filtered_indices.len()))
                .entry("selected", ron_string(&self.selected_index))
                .entry("search", ron_string(&self.search.query))
                .entry("categories", ron_string(&self.categories)),
            DebugSection::new("Detail")
                .entry("name", ron_string(&self.detail_name()))
                .entry("loading", ron_string(&self.detail.is_loading()))
                .entry("failed", ron_string(&self.detail.error()))
                .entry("scroll", ron_string(&self.detail_scroll))
                .entry("evolution_cursor", ron_string(&self.evolution_cursor))
                .entry("sprite", ron_string(&self.sprite)),
        ]
    }
}
