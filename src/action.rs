use serde::{Deserialize, Serialize};

use crate::model::{DetailBundle, EntityWithDetail};

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[action(infer_categories)]
pub enum Action {
    Init,

    // ===== Roster =====
    RosterDidLoad(Vec<EntityWithDetail>),
    RosterDidError(String),
    /// Re-run the roster load after a failed or empty one
    RosterReload,
    RosterSelect(usize),
    RosterPage(i16),
    RosterOpen,

    // ===== Search =====
    SearchStart,
    SearchCancel,
    SearchSubmit,
    SearchInput(char),
    SearchBackspace,

    // ===== Category panel =====
    FilterOpen,
    CategoriesDidLoad(Vec<String>),
    CategoriesDidError(String),
    CategoryCursor(usize),
    CategoryToggle,
    CategorySubmit,

    // ===== Navigation =====
    NavBack,
    /// The delay of the transition holding `ticket` has elapsed
    TransitionDidElapse(u64),

    // ===== Detail =====
    DetailDidLoad { name: String, bundle: DetailBundle },
    DetailDidError { name: String, error: String },
    DetailScroll(i16),
    EvolutionCursor(usize),
    EvolutionOpen,

    // ===== Sprite / cry =====
    SpriteToggleShiny,
    SpriteFlip,
    PlayCry,
    CryDidPlay,
    CryDidError(String),

    // ===== UI =====
    ThemeToggle,
    UiTerminalResize(u16, u16),

    Tick,
    Quit,
}
