use std::cell::RefCell;
use std::fs::File;
use std::io;
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventKind,
    HandlerResponse, Keybindings, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

use pokedex::action::Action;
use pokedex::api::{HttpProvider, PokemonProvider};
use pokedex::config::Config;
use pokedex::effect::Effect;
use pokedex::navigator::{hold_for, TRANSITION_DELAY};
use pokedex::reducer::reducer;
use pokedex::state::AppState;
use pokedex::theme::Theme;
use pokedex::ui::{PokedexComponentId, PokedexContext, PokedexUi};
use pokedex::{audio, repository};

#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(about = "Pokemon catalogue TUI backed by PokeAPI")]
struct Args {
    #[command(flatten)]
    debug: DebugCliArgs,
    #[command(flatten)]
    config: Config,
}

const TICK_INTERVAL: Duration = Duration::from_millis(90);
const SPRITE_FLIP_INTERVAL: Duration = Duration::from_millis(2000);

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    init_tracing(&args.config)?;
    let config = args.config;
    let debug = DebugSession::new(args.debug);

    let initial = AppState::new(Theme::new(config.theme), config.limit);
    let state = debug
        .load_state_or_else_async(|| {
            let initial = initial.clone();
            async move { Ok::<AppState, io::Error>(initial) }
        })
        .await
        .map_err(debug_error)?;
    let replay_actions = debug.load_replay_items().map_err(debug_error)?;
    let (middleware, recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    let provider: Arc<dyn PokemonProvider> = Arc::new(HttpProvider::new(config.api_base.clone()));
    info!(api_base = %config.api_base, limit = config.limit, "starting pokedex");

    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions, provider).await;

    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug.save_actions(recorder.as_ref()).map_err(debug_error)?;
    Ok(())
}

// The terminal belongs to the UI, so logs go to a file.
fn init_tracing(config: &Config) -> io::Result<()> {
    let file = File::create(config.log_path())?;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokedex=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
    provider: Arc<dyn PokemonProvider>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(PokedexUi::new()));
    let mut bus: EventBus<AppState, Action, PokedexComponentId, PokedexContext> = EventBus::new();
    let keybindings: Keybindings<PokedexContext> = Keybindings::new();

    let ui_roster = Rc::clone(&ui);
    bus.register(PokedexComponentId::Roster, move |event, state| {
        ui_roster
            .borrow_mut()
            .handle_roster_event(&event.kind, state)
    });

    let ui_search = Rc::clone(&ui);
    bus.register(PokedexComponentId::Search, move |event, state| {
        ui_search
            .borrow_mut()
            .handle_search_event(&event.kind, state)
    });

    let ui_categories = Rc::clone(&ui);
    bus.register(PokedexComponentId::CategoryPanel, move |event, state| {
        ui_categories
            .borrow_mut()
            .handle_category_event(&event.kind, state)
    });

    let ui_detail = Rc::clone(&ui);
    bus.register(PokedexComponentId::Detail, move |event, state| {
        ui_detail
            .borrow_mut()
            .handle_detail_event(&event.kind, state)
    });

    bus.register_global(|event, state| match event.kind {
        EventKind::Resize(width, height) => {
            HandlerResponse::action(Action::UiTerminalResize(width, height)).with_render()
        }
        EventKind::Key(key) => match key.code {
            KeyCode::Char('q') if !state.search.active => HandlerResponse::action(Action::Quit),
            _ => HandlerResponse::ignored(),
        },
        _ => HandlerResponse::ignored(),
    });

    let run_effect = move |effect: Effect, ctx: &mut EffectContext<Action>| {
        handle_effect(effect, ctx, Arc::clone(&provider))
    };

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::Init),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }
                runtime
                    .subscriptions()
                    .interval("tick", TICK_INTERVAL, || Action::Tick);
                runtime
                    .subscriptions()
                    .interval("sprite_flip", SPRITE_FLIP_INTERVAL, || Action::SpriteFlip);
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            run_effect,
        )
        .await
}

fn handle_effect(
    effect: Effect,
    ctx: &mut EffectContext<Action>,
    provider: Arc<dyn PokemonProvider>,
) {
    match effect {
        Effect::LoadRoster { limit } => {
            ctx.tasks().spawn(TaskKey::new("roster"), async move {
                match hold_for(TRANSITION_DELAY, repository::load_roster(provider, limit)).await {
                    Ok(roster) => Action::RosterDidLoad(roster),
                    Err(err) => {
                        error!(error = %err, "roster load failed");
                        Action::RosterDidError(err.to_string())
                    }
                }
            });
        }
        Effect::LoadCategories => {
            ctx.tasks().spawn(TaskKey::new("categories"), async move {
                match provider.type_list().await {
                    Ok(types) => Action::CategoriesDidLoad(types),
                    Err(err) => {
                        error!(error = %err, "type list load failed");
                        Action::CategoriesDidError(err.to_string())
                    }
                }
            });
        }
        Effect::LoadDetail { name, cached } => {
            ctx.tasks().spawn(TaskKey::new("detail"), async move {
                match repository::load_detail(provider, &name, cached).await {
                    Ok(bundle) => {
                        info!(%name, evolution = bundle.evolution.len(), "detail loaded");
                        Action::DetailDidLoad { name, bundle }
                    }
                    Err(err) => {
                        error!(%name, error = %err, "detail load failed");
                        Action::DetailDidError {
                            name,
                            error: err.to_string(),
                        }
                    }
                }
            });
        }
        Effect::StartTransition { ticket } => {
            ctx.tasks().spawn(TaskKey::new("transition"), async move {
                let ticket = hold_for(TRANSITION_DELAY, std::future::ready(ticket)).await;
                Action::TransitionDidElapse(ticket)
            });
        }
        Effect::PlayCry { name, url } => {
            ctx.tasks().spawn(TaskKey::new("cry"), async move {
                let bytes = match provider.bytes(&url).await {
                    Ok(bytes) => bytes,
                    Err(err) => {
                        warn!(%name, error = %err, "cry download failed");
                        return Action::CryDidError(err.to_string());
                    }
                };
                match tokio::task::spawn_blocking(move || audio::play_cry(bytes)).await {
                    Ok(Ok(())) => Action::CryDidPlay,
                    Ok(Err(err)) => {
                        warn!(%name, error = %err, "cry playback failed");
                        Action::CryDidError(err.to_string())
                    }
                    Err(err) => {
                        warn!(%name, error = %err, "cry task failed");
                        Action::CryDidError(err.to_string())
                    }
                }
            });
        }
    }
}
