//! Display strings for the detail screen.

use serde::{Deserialize, Serialize};

use crate::model::{DetailBundle, MoveLearned, SpeciesDetail, SpriteSet};

pub const DESCRIPTION_FALLBACK: &str = "No description available.";
pub const NO_IMAGE: &str = "No Image";
pub const NO_PIXEL_SPRITE: &str = "No Pixel Sprite";
pub const NO_EVOLUTION_CHAIN: &str = "No Evolution Chain";
pub const NO_MOVES: &str = "No Moves Available";

pub const LEVEL_UP_LIMIT: usize = 5;

const LEVEL_UP_METHOD: &str = "level-up";
const DESCRIPTION_LANGUAGE: &str = "en";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelUpMove {
    pub name: String,
    pub level: u8,
}

/// Moves learned by levelling up, earliest level first, capped at five.
pub fn level_up_moves(moves: &[MoveLearned]) -> Vec<LevelUpMove> {
    let mut learned: Vec<LevelUpMove> = moves
        .iter()
        .filter(|entry| entry.learn_method == LEVEL_UP_METHOD && entry.level_learned_at > 0)
        .map(|entry| LevelUpMove {
            name: entry.name.clone(),
            level: entry.level_learned_at,
        })
        .collect();
    learned.sort_by_key(|entry| entry.level);
    learned.truncate(LEVEL_UP_LIMIT);
    learned
}

pub fn english_description(species: &SpeciesDetail) -> Option<String> {
    species
        .descriptions
        .iter()
        .find(|entry| entry.language == DESCRIPTION_LANGUAGE)
        .map(|entry| sanitize_text(&entry.text))
}

fn sanitize_text(text: &str) -> String {
    text.replace('\n', " ").replace('\u{000C}', " ")
}

/// `"special-attack"` -> `"Special Attack"`.
pub fn format_label(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => format!("{}{}", first.to_uppercase(), chars.as_str()),
                None => "".to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn format_dex_number(id: u16) -> String {
    format!("#{id:03}")
}

/// Tenths as a one-decimal figure: 69 -> "6.9".
pub fn format_tenths(value: u16) -> String {
    format!("{}.{}", value / 10, value % 10)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteVariant {
    pub shiny: bool,
    pub back: bool,
}

impl SpriteVariant {
    pub fn label(self) -> &'static str {
        match (self.shiny, self.back) {
            (false, false) => "Front",
            (false, true) => "Back",
            (true, false) => "Shiny Front",
            (true, true) => "Shiny Back",
        }
    }

    /// Resolves the variant against `sprites`. A missing back view falls
    /// back to the matching front view.
    pub fn pick(self, sprites: &SpriteSet) -> Option<&str> {
        let (front, back) = if self.shiny {
            (&sprites.front_shiny, &sprites.back_shiny)
        } else {
            (&sprites.front_default, &sprites.back_default)
        };
        if self.back {
            back.as_deref().or(front.as_deref())
        } else {
            front.as_deref()
        }
    }
}

/// The sprite line needs both default sprites; with them it can also flip.
pub fn can_flip(sprites: &SpriteSet) -> bool {
    sprites.front_default.is_some() && sprites.back_default.is_some()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvolutionLine {
    pub number: String,
    pub name: String,
    pub sprite: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailView {
    pub title: String,
    pub number: String,
    pub categories: Vec<String>,
    pub height: String,
    pub weight: String,
    pub abilities: Vec<String>,
    pub stats: Vec<String>,
    pub description: String,
    pub evolution: Vec<EvolutionLine>,
    pub moves: Vec<String>,
    pub sprite_label: &'static str,
    pub sprite: String,
    pub artwork: String,
}

impl DetailView {
    pub fn compose(bundle: &DetailBundle, variant: SpriteVariant) -> Self {
        let detail = &bundle.detail;

        let evolution = bundle
            .evolution
            .iter()
            .map(|entry| EvolutionLine {
                number: format_dex_number(entry.id),
                name: format_label(&entry.name),
                sprite: entry
                    .sprite_url
                    .clone()
                    .unwrap_or_else(|| NO_IMAGE.to_string()),
            })
            .collect();

        let moves = level_up_moves(&detail.moves);
        let moves = if moves.is_empty() {
            vec![NO_MOVES.to_string()]
        } else {
            moves
                .iter()
                .map(|entry| format!("{} (Level {})", format_label(&entry.name), entry.level))
                .collect()
        };

        Self {
            title: format_label(&detail.name),
            number: format_dex_number(detail.id),
            categories: detail.categories.iter().map(|name| format_label(name)).collect(),
            height: format!("{} m", format_tenths(detail.height_decimeters)),
            weight: format!("{} kg", format_tenths(detail.weight_hectograms)),
            abilities: detail
                .abilities
                .iter()
                .map(|ability| {
                    let label = format_label(&ability.name);
                    if ability.is_hidden {
                        format!("{label} (Hidden)")
                    } else {
                        label
                    }
                })
                .collect(),
            stats: detail
                .base_stats
                .iter()
                .map(|stat| format!("{}: {}", format_label(&stat.name), stat.value))
                .collect(),
            description: bundle
                .description
                .clone()
                .unwrap_or_else(|| DESCRIPTION_FALLBACK.to_string()),
            evolution,
            moves,
            sprite_label: variant.label(),
            sprite: Some(&detail.sprites)
                .filter(|sprites| can_flip(sprites))
                .and_then(|sprites| variant.pick(sprites))
                .map(str::to_string)
                .unwrap_or_else(|| NO_PIXEL_SPRITE.to_string()),
            artwork: detail
                .sprites
                .official_artwork
                .clone()
                .unwrap_or_else(|| NO_IMAGE.to_string()),
        }
    }

    pub fn evolution_placeholder(&self) -> Option<&'static str> {
        self.evolution.is_empty().then_some(NO_EVOLUTION_CHAIN)
    }
}
