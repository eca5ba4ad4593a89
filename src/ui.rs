use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use tui_dispatch::{
    Component, EventContext, EventKind, EventRoutingState, HandlerResponse, RenderContext,
};
use tui_dispatch_components::style::BorderStyle;
use tui_dispatch_components::{
    centered_rect, BaseStyle, Padding, SelectList, SelectListBehavior, SelectListProps,
    SelectListStyle, SelectionStyle, StatusBar, StatusBarHint, StatusBarItem, StatusBarProps,
    StatusBarSection, StatusBarStyle,
};

use crate::action::Action;
use crate::navigator::ViewState;
use crate::presenter::{self, DetailView};
use crate::state::AppState;
use crate::theme::Palette;

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];
const DETAIL_SCROLL_STEP: i16 = 5;

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum PokedexComponentId {
    Roster,
    Search,
    CategoryPanel,
    Detail,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PokedexContext {
    Roster,
    Search,
    CategoryPanel,
    Detail,
}

impl EventRoutingState<PokedexComponentId, PokedexContext> for AppState {
    fn focused(&self) -> Option<PokedexComponentId> {
        if self.overlay_visible() {
            return None;
        }
        if self.search.active {
            return Some(PokedexComponentId::Search);
        }
        match self.view() {
            ViewState::Loading => None,
            ViewState::Roster => Some(PokedexComponentId::Roster),
            ViewState::CategoryFilter => Some(PokedexComponentId::CategoryPanel),
            ViewState::Detail { .. } => Some(PokedexComponentId::Detail),
        }
    }

    fn modal(&self) -> Option<PokedexComponentId> {
        if self.search.active && !self.overlay_visible() {
            Some(PokedexComponentId::Search)
        } else {
            None
        }
    }

    fn binding_context(&self, id: PokedexComponentId) -> PokedexContext {
        match id {
            PokedexComponentId::Roster => PokedexContext::Roster,
            PokedexComponentId::Search => PokedexContext::Search,
            PokedexComponentId::CategoryPanel => PokedexContext::CategoryPanel,
            PokedexComponentId::Detail => PokedexContext::Detail,
        }
    }

    fn default_context(&self) -> PokedexContext {
        PokedexContext::Roster
    }
}

pub struct PokedexUi {
    roster_list: SelectList,
    category_list: SelectList,
    evolution_list: SelectList,
    status_bar: StatusBar,
}

impl Default for PokedexUi {
    fn default() -> Self {
        Self::new()
    }
}

impl PokedexUi {
    pub fn new() -> Self {
        Self {
            roster_list: SelectList::new(),
            category_list: SelectList::new(),
            evolution_list: SelectList::new(),
            status_bar: StatusBar::new(),
        }
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        _render_ctx: RenderContext,
        event_ctx: &mut EventContext<PokedexComponentId>,
    ) {
        let palette = state.theme.palette();
        frame.render_widget(Block::default().style(Style::default().bg(palette.bg_base)), area);
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(6),
                Constraint::Length(3),
            ])
            .split(area);

        render_header(frame, layout[0], state, &palette, event_ctx);
        if state.overlay_visible() {
            // Body stays blank until the pending screen is committed.
            render_footer(frame, layout[2], state, &palette, &mut self.status_bar);
            render_overlay(frame, area, state, &palette);
            return;
        }
        match state.view() {
            ViewState::Loading => {}
            ViewState::Roster => {
                render_roster(frame, layout[1], state, &palette, event_ctx, &mut self.roster_list)
            }
            ViewState::CategoryFilter => render_category_panel(
                frame,
                layout[1],
                state,
                &palette,
                event_ctx,
                &mut self.category_list,
            ),
            ViewState::Detail { name } => render_detail(
                frame,
                layout[1],
                state,
                name,
                &palette,
                event_ctx,
                &mut self.evolution_list,
            ),
        }
        render_footer(frame, layout[2], state, &palette, &mut self.status_bar);
    }

    pub fn handle_roster_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let actions = match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Enter => vec![Action::RosterOpen],
                KeyCode::PageDown => vec![Action::RosterPage(1)],
                KeyCode::PageUp => vec![Action::RosterPage(-1)],
                KeyCode::Char('/') => vec![Action::SearchStart],
                KeyCode::Char('f') => vec![Action::FilterOpen],
                KeyCode::Char('t') => vec![Action::ThemeToggle],
                KeyCode::Char('r') => vec![Action::RosterReload],
                _ => {
                    let palette = state.theme.palette();
                    let items = roster_items(state);
                    let props = SelectListProps {
                        items: &items,
                        count: items.len(),
                        selected: state.selected_index.min(items.len().saturating_sub(1)),
                        is_focused: true,
                        style: list_style(&palette),
                        behavior: SelectListBehavior {
                            show_scrollbar: true,
                            wrap_navigation: false,
                        },
                        on_select: Action::RosterSelect,
                        render_item: &|item| item.clone(),
                    };
                    self.roster_list.handle_event(event, props).into_iter().collect()
                }
            },
            EventKind::Scroll { delta, .. } => {
                let next = (state.selected_index as isize + *delta as isize * 3).max(0);
                vec![Action::RosterSelect(next as usize)]
            }
            _ => vec![],
        };
        handler_response(actions)
    }

    pub fn handle_search_event(
        &mut self,
        event: &EventKind,
        _state: &AppState,
    ) -> HandlerResponse<Action> {
        let actions = match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Esc => vec![Action::SearchCancel],
                KeyCode::Enter => vec![Action::SearchSubmit],
                KeyCode::Backspace => vec![Action::SearchBackspace],
                KeyCode::Char(ch) => vec![Action::SearchInput(ch)],
                _ => vec![],
            },
            _ => vec![],
        };
        handler_response(actions)
    }

    pub fn handle_category_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let actions = match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Char(' ') => vec![Action::CategoryToggle],
                KeyCode::Enter => vec![Action::CategorySubmit],
                KeyCode::Esc | KeyCode::Backspace => vec![Action::NavBack],
                _ => {
                    let palette = state.theme.palette();
                    let items = category_items(state);
                    let props = SelectListProps {
                        items: &items,
                        count: items.len(),
                        selected: state.category_panel.cursor,
                        is_focused: true,
                        style: list_style(&palette),
                        behavior: SelectListBehavior {
                            show_scrollbar: true,
                            wrap_navigation: true,
                        },
                        on_select: Action::CategoryCursor,
                        render_item: &|item| item.clone(),
                    };
                    self.category_list
                        .handle_event(event, props)
                        .into_iter()
                        .collect()
                }
            },
            _ => vec![],
        };
        handler_response(actions)
    }

    pub fn handle_detail_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let actions = match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Esc | KeyCode::Backspace => vec![Action::NavBack],
                KeyCode::Enter => vec![Action::EvolutionOpen],
                KeyCode::PageDown => vec![Action::DetailScroll(DETAIL_SCROLL_STEP)],
                KeyCode::PageUp => vec![Action::DetailScroll(-DETAIL_SCROLL_STEP)],
                KeyCode::Char('s') => vec![Action::SpriteToggleShiny],
                KeyCode::Char('p') => vec![Action::PlayCry],
                _ => {
                    let palette = state.theme.palette();
                    let items = evolution_items(state);
                    if items.is_empty() {
                        return HandlerResponse::ignored();
                    }
                    let props = SelectListProps {
                        items: &items,
                        count: items.len(),
                        selected: state.evolution_cursor.min(items.len().saturating_sub(1)),
                        is_focused: true,
                        style: list_style(&palette),
                        behavior: SelectListBehavior {
                            show_scrollbar: false,
                            wrap_navigation: false,
                        },
                        on_select: Action::EvolutionCursor,
                        render_item: &|item| item.clone(),
                    };
                    self.evolution_list
                        .handle_event(event, props)
                        .into_iter()
                        .collect()
                }
            },
            EventKind::Scroll { delta, .. } => vec![Action::DetailScroll((*delta * 3) as i16)],
            _ => vec![],
        };
        handler_response(actions)
    }
}

fn handler_response(actions: Vec<Action>) -> HandlerResponse<Action> {
    if actions.is_empty() {
        HandlerResponse::ignored()
    } else {
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn render_header(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    palette: &Palette,
    event_ctx: &mut EventContext<PokedexComponentId>,
) {
    if state.search.active {
        event_ctx.set_component_area(PokedexComponentId::Search, area);
    }
    let title_style = Style::default()
        .fg(palette.accent)
        .add_modifier(Modifier::BOLD);
    let search = if state.search.active {
        format!("/{}_", state.search.query)
    } else if state.search.query.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", state.search.query)
    };
    let categories = if state.categories.is_empty() {
        "All".to_string()
    } else {
        state
            .categories
            .iter()
            .map(|name| presenter::format_label(name))
            .collect::<Vec<_>>()
            .join(" + ")
    };
    let mut spans = vec![
        Span::styled("POKEDEX", title_style),
        Span::raw("  |  Search: "),
        Span::styled(search, Style::default().fg(palette.accent_alt)),
        Span::raw("  |  Types: "),
        Span::styled(categories, Style::default().fg(palette.accent_alt)),
        Span::raw(format!(
            "  |  {}/{}",
            state.filtered_indices.len(),
            state.roster_entries().len()
        )),
    ];
    if matches!(state.view(), ViewState::Roster) {
        let mode = if state.theme.is_dark() { "Dark" } else { "Light" };
        spans.push(Span::raw("  |  Theme: "));
        spans.push(Span::styled(mode, Style::default().fg(palette.text_dim)));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .style(Style::default().bg(palette.bg_panel).fg(palette.text_main))
        .border_style(Style::default().fg(palette.text_dim));
    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .block(block)
            .style(Style::default().fg(palette.text_main)),
        area,
    );
}

fn render_roster(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    palette: &Palette,
    event_ctx: &mut EventContext<PokedexComponentId>,
    roster_list: &mut SelectList,
) {
    event_ctx.set_component_area(PokedexComponentId::Roster, area);
    let block = panel_block("ROSTER", palette);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let items = roster_items(state);
    if items.is_empty() {
        let message = if state.roster.is_loading() {
            format!("{} Loading roster...", spinner(state))
        } else if state.roster_entries().is_empty() {
            "No entries. Press r to reload.".to_string()
        } else {
            "No matches.".to_string()
        };
        render_message(frame, inner, message, palette);
        return;
    }

    let props = SelectListProps {
        items: &items,
        count: items.len(),
        selected: state.selected_index.min(items.len().saturating_sub(1)),
        is_focused: !state.search.active,
        style: list_style(palette),
        behavior: SelectListBehavior {
            show_scrollbar: true,
            wrap_navigation: false,
        },
        on_select: Action::RosterSelect,
        render_item: &|item| item.clone(),
    };
    roster_list.render(frame, inner, props);
}

fn render_category_panel(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    palette: &Palette,
    event_ctx: &mut EventContext<PokedexComponentId>,
    category_list: &mut SelectList,
) {
    event_ctx.set_component_area(PokedexComponentId::CategoryPanel, area);
    let block = panel_block("TYPES", palette);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let items = category_items(state);
    if items.is_empty() {
        let message = if state.category_panel.options.is_loading() {
            format!("{} Loading types...", spinner(state))
        } else {
            "No types available.".to_string()
        };
        render_message(frame, inner, message, palette);
        return;
    }

    let props = SelectListProps {
        items: &items,
        count: items.len(),
        selected: state.category_panel.cursor.min(items.len().saturating_sub(1)),
        is_focused: true,
        style: list_style(palette),
        behavior: SelectListBehavior {
            show_scrollbar: true,
            wrap_navigation: true,
        },
        on_select: Action::CategoryCursor,
        render_item: &|item| item.clone(),
    };
    category_list.render(frame, inner, props);
}

fn render_detail(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    name: &str,
    palette: &Palette,
    event_ctx: &mut EventContext<PokedexComponentId>,
    evolution_list: &mut SelectList,
) {
    event_ctx.set_component_area(PokedexComponentId::Detail, area);
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(64), Constraint::Percentage(36)])
        .split(area);

    let block = panel_block("DATA", palette);
    let inner = block.inner(layout[0]);
    frame.render_widget(block, layout[0]);
    let text = detail_text(state, name, palette);
    frame.render_widget(
        Paragraph::new(text)
            .style(Style::default().fg(palette.text_main))
            .wrap(Wrap { trim: false })
            .scroll((state.detail_scroll, 0)),
        inner,
    );

    let block = panel_block("EVOLUTION", palette);
    let inner = block.inner(layout[1]);
    frame.render_widget(block, layout[1]);
    let items = evolution_items(state);
    if items.is_empty() {
        let message = if state.detail.is_loading() {
            format!("{} Loading...", spinner(state))
        } else {
            presenter::NO_EVOLUTION_CHAIN.to_string()
        };
        render_message(frame, inner, message, palette);
        return;
    }
    let props = SelectListProps {
        items: &items,
        count: items.len(),
        selected: state.evolution_cursor.min(items.len().saturating_sub(1)),
        is_focused: true,
        style: list_style(palette),
        behavior: SelectListBehavior {
            show_scrollbar: false,
            wrap_navigation: false,
        },
        on_select: Action::EvolutionCursor,
        render_item: &|item| item.clone(),
    };
    evolution_list.render(frame, inner, props);
}

fn detail_text(state: &AppState, name: &str, palette: &Palette) -> Text<'static> {
    let heading = Style::default()
        .fg(palette.accent)
        .add_modifier(Modifier::BOLD);
    let Some(bundle) = state.current_bundle() else {
        let message = if state.detail.is_loading() {
            format!("{} Loading {}...", spinner(state), presenter::format_label(name))
        } else {
            format!("{}: no details available.", presenter::format_label(name))
        };
        return Text::from(Line::from(Span::styled(
            message,
            Style::default().fg(palette.text_dim),
        )));
    };
    let view = DetailView::compose(bundle, state.sprite);

    let mut lines = vec![
        Line::from(vec![
            Span::styled(view.title.clone(), heading),
            Span::raw("  "),
            Span::styled(view.number.clone(), Style::default().fg(palette.accent_alt)),
        ]),
        Line::from(format!("Type: {}", view.categories.join(" / "))),
        Line::from(format!("Height: {}  Weight: {}", view.height, view.weight)),
        Line::from(""),
        Line::from(Span::styled("Description", heading)),
        Line::from(view.description.clone()),
        Line::from(""),
        Line::from(Span::styled("Abilities", heading)),
    ];
    lines.extend(view.abilities.iter().map(|ability| Line::from(format!("  {ability}"))));

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Base Stats", heading)));
    for (label, stat) in view.stats.iter().zip(&bundle.detail.base_stats) {
        lines.push(Line::from(vec![
            Span::raw(format!("  {label:<22}")),
            Span::styled(stat_bar(stat.value), Style::default().fg(palette.accent_alt)),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Level-up Moves", heading)));
    lines.extend(view.moves.iter().map(|entry| Line::from(format!("  {entry}"))));

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Sprites", heading)));
    lines.push(Line::from(format!("  Pixel ({}): {}", view.sprite_label, view.sprite)));
    lines.push(Line::from(format!("  Artwork: {}", view.artwork)));
    let cry = if state.cry_playing {
        "  Cry: playing"
    } else if bundle.detail.cry_url.is_some() {
        "  Cry: press p"
    } else {
        "  Cry: --"
    };
    lines.push(Line::from(Span::styled(cry, Style::default().fg(palette.text_dim))));
    Text::from(lines)
}

fn stat_bar(value: u16) -> String {
    let len = (value as usize / 10).clamp(1, 20);
    "#".repeat(len)
}

fn render_overlay(frame: &mut Frame, area: Rect, state: &AppState, palette: &Palette) {
    let overlay = centered_rect(24, 5, area);
    frame.render_widget(Clear, overlay);
    let label = if matches!(state.view(), ViewState::Loading) {
        "Loading roster"
    } else {
        "Loading"
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .style(Style::default().bg(palette.bg_panel_alt).fg(palette.text_main))
        .border_style(Style::default().fg(palette.accent));
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(spinner(state), Style::default().fg(palette.accent)),
            Span::raw(format!(" {label}...")),
        ]))
        .alignment(Alignment::Center)
        .block(block),
        overlay,
    );
}

fn render_footer(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    palette: &Palette,
    status_bar: &mut StatusBar,
) {
    let hints = status_hints(state);
    let global = [StatusBarHint::new("q", "Quit")];
    let status = screen_label(state);
    let status_span = Span::styled(status, Style::default().fg(palette.accent_alt));
    let status_items = [StatusBarItem::span(status_span)];

    let style = StatusBarStyle {
        base: BaseStyle {
            border: Some(BorderStyle {
                borders: Borders::ALL,
                style: Style::default().fg(palette.text_dim),
                focused_style: Some(Style::default().fg(palette.accent)),
            }),
            padding: Padding::xy(1, 0),
            bg: Some(palette.bg_panel),
            fg: Some(palette.text_main),
        },
        text: Style::default().fg(palette.text_dim),
        hint_key: Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD),
        hint_label: Style::default().fg(palette.text_dim),
        separator: Style::default().fg(palette.text_dim),
    };

    let props = StatusBarProps {
        left: StatusBarSection::hints(&hints).with_separator("  "),
        center: StatusBarSection::hints(&global).with_separator("  "),
        right: StatusBarSection::items(&status_items).with_separator("  "),
        style,
        is_focused: false,
    };
    Component::<Action>::render(status_bar, frame, area, props);
}

fn screen_label(state: &AppState) -> &'static str {
    match state.view() {
        ViewState::Loading => "Loading",
        ViewState::Roster => "Roster",
        ViewState::CategoryFilter => "Types",
        ViewState::Detail { .. } => "Detail",
    }
}

fn status_hints(state: &AppState) -> Vec<StatusBarHint<'static>> {
    if state.search.active {
        return vec![
            StatusBarHint::new("Enter", "Apply"),
            StatusBarHint::new("Esc", "Clear"),
            StatusBarHint::new("Bksp", "Delete"),
        ];
    }
    match state.view() {
        ViewState::Loading => Vec::new(),
        ViewState::Roster => vec![
            StatusBarHint::new("j/k", "Move"),
            StatusBarHint::new("Enter", "Open"),
            StatusBarHint::new("/", "Search"),
            StatusBarHint::new("f", "Types"),
            StatusBarHint::new("t", "Theme"),
            StatusBarHint::new("r", "Reload"),
        ],
        ViewState::CategoryFilter => vec![
            StatusBarHint::new("j/k", "Move"),
            StatusBarHint::new("Space", "Toggle"),
            StatusBarHint::new("Enter", "Apply"),
            StatusBarHint::new("Esc", "Cancel"),
        ],
        ViewState::Detail { .. } => vec![
            StatusBarHint::new("j/k", "Evo"),
            StatusBarHint::new("Enter", "Open"),
            StatusBarHint::new("PgUp/PgDn", "Scroll"),
            StatusBarHint::new("s", "Shiny"),
            StatusBarHint::new("p", "Cry"),
            StatusBarHint::new("Esc", "Back"),
        ],
    }
}

pub fn roster_items(state: &AppState) -> Vec<Line<'static>> {
    let roster = state.roster_entries();
    state
        .filtered_indices
        .iter()
        .filter_map(|idx| roster.get(*idx))
        .map(|entry| {
            let categories = entry
                .detail
                .categories
                .iter()
                .map(|name| presenter::format_label(name))
                .collect::<Vec<_>>()
                .join(" / ");
            Line::from(format!(
                "{} {:<14} {}",
                presenter::format_dex_number(entry.number()),
                presenter::format_label(entry.name()),
                categories
            ))
        })
        .collect()
}

pub fn category_items(state: &AppState) -> Vec<Line<'static>> {
    let Some(options) = state.category_panel.options.data() else {
        return Vec::new();
    };
    options
        .iter()
        .map(|name| {
            let mark = if state.category_panel.pending.contains(name) {
                "x"
            } else {
                " "
            };
            Line::from(format!("[{mark}] {}", presenter::format_label(name)))
        })
        .collect()
}

pub fn evolution_items(state: &AppState) -> Vec<Line<'static>> {
    let Some(bundle) = state.current_bundle() else {
        return Vec::new();
    };
    bundle
        .evolution
        .iter()
        .map(|entry| {
            Line::from(format!(
                "{} {}",
                presenter::format_dex_number(entry.id),
                presenter::format_label(&entry.name)
            ))
        })
        .collect()
}

fn spinner(state: &AppState) -> &'static str {
    SPINNER[(state.tick % SPINNER.len() as u64) as usize]
}

fn render_message(frame: &mut Frame, area: Rect, message: String, palette: &Palette) {
    frame.render_widget(
        Paragraph::new(message)
            .style(Style::default().fg(palette.text_dim))
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn panel_block(title: &'static str, palette: &Palette) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .style(Style::default().bg(palette.bg_panel).fg(palette.text_main))
        .border_style(Style::default().fg(palette.accent))
}

fn list_style(palette: &Palette) -> SelectListStyle {
    SelectListStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::xy(1, 0),
            bg: None,
            fg: Some(palette.text_main),
        },
        selection: SelectionStyle {
            style: Some(
                Style::default()
                    .bg(palette.bg_highlight)
                    .fg(palette.text_main)
                    .add_modifier(Modifier::BOLD),
            ),
            marker: None,
            disabled: false,
        },
        ..SelectListStyle::default()
    }
}
