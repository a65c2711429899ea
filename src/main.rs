//! Rick and Morty character catalog TUI

use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventKind,
    HandlerResponse, Keybindings, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{DebugRunOutput, DebugSession, DebugSessionError, ReplayItem};

use rickdex::action::Action;
use rickdex::api;
use rickdex::config::{AppConfig, Args};
use rickdex::effect::Effect;
use rickdex::error::ApiError;
use rickdex::favorites::{FavoritesStore, FileStorage};
use rickdex::logging;
use rickdex::reducer::reducer;
use rickdex::state::{AppState, FocusArea};
use rickdex::ui::{RickdexComponentId, RickdexContext, RickdexUi};

const TICK_MS: u64 = 120;
const FILTER_DEBOUNCE_KEY: &str = "filter_debounce";

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    let config = AppConfig::from_args(&args);
    if let Err(err) = logging::init(&config.log_file) {
        eprintln!("warning: {err}");
    }
    tracing::info!(
        api_base = %config.api_base,
        data_dir = %config.data_dir.display(),
        "starting rickdex"
    );

    let debug = DebugSession::new(args.debug);

    let api_base = config.api_base.clone();
    let data_dir = config.data_dir.clone();
    let state = debug
        .load_state_or_else_async(move || async move {
            let favorites = FavoritesStore::new(FileStorage::new(data_dir)).load();
            Ok::<AppState, io::Error>(AppState::new(api_base, favorites))
        })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;
    let (middleware, recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, &config, store, replay_actions).await;

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
    tracing::info!("rickdex stopped");
    Ok(())
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    config: &AppConfig,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(RickdexUi::new()));
    let mut bus: EventBus<AppState, Action, RickdexComponentId, RickdexContext> = EventBus::new();
    let keybindings: Keybindings<RickdexContext> = Keybindings::new();

    let ui_search = Rc::clone(&ui);
    bus.register(RickdexComponentId::Search, move |event, state| {
        ui_search
            .borrow_mut()
            .handle_search_event(&event.kind, state)
    });

    let ui_grid = Rc::clone(&ui);
    bus.register(RickdexComponentId::Grid, move |event, state| {
        ui_grid.borrow_mut().handle_grid_event(&event.kind, state)
    });

    let ui_favorites = Rc::clone(&ui);
    bus.register(RickdexComponentId::Favorites, move |event, state| {
        ui_favorites
            .borrow_mut()
            .handle_favorites_event(&event.kind, state)
    });

    bus.register_global(|event, state| {
        let typing = state.focus == FocusArea::Search;
        match event.kind {
            EventKind::Resize(width, height) => {
                HandlerResponse::action(Action::UiTerminalResize(width, height)).with_render()
            }
            EventKind::Key(key) => match key.code {
                KeyCode::Tab => HandlerResponse::action(Action::FocusNext),
                KeyCode::BackTab => HandlerResponse::action(Action::FocusPrev),
                KeyCode::Char('q') if !typing => HandlerResponse::action(Action::Quit),
                KeyCode::Char('/') if !typing => HandlerResponse::action(Action::SearchFocus),
                KeyCode::Char('s') if !typing => HandlerResponse::action(Action::FilterStatusNext),
                KeyCode::Char('S') if !typing => HandlerResponse::action(Action::FilterStatusPrev),
                KeyCode::Char('g') if !typing => HandlerResponse::action(Action::FilterGenderNext),
                KeyCode::Char('G') if !typing => HandlerResponse::action(Action::FilterGenderPrev),
                _ => HandlerResponse::ignored(),
            },
            _ => HandlerResponse::ignored(),
        }
    });

    let favorites_store = RefCell::new(FavoritesStore::new(FileStorage::new(
        config.data_dir.clone(),
    )));
    let debounce = config.debounce;

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
                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(TICK_MS),
                    || Action::Tick,
                );
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            move |effect, ctx| handle_effect(effect, ctx, &favorites_store, debounce),
        )
        .await
}

/// Handle effects by spawning tasks
fn handle_effect(
    effect: Effect,
    ctx: &mut EffectContext<Action>,
    favorites_store: &RefCell<FavoritesStore<FileStorage>>,
    debounce: Duration,
) {
    match effect {
        Effect::FetchPage { url, session } => {
            ctx.tasks().spawn(TaskKey::new("page"), async move {
                match api::fetch_character_page(&url).await {
                    Ok(page) => Action::PageDidLoad { session, page },
                    Err(ApiError::NotFound) => {
                        tracing::info!(url = %url, "listing exhausted");
                        Action::PageDidExhaust { session }
                    }
                    Err(error) => {
                        tracing::error!(url = %url, error = %error, "page fetch failed");
                        Action::PageDidError {
                            session,
                            error: error.to_string(),
                        }
                    }
                }
            });
        }
        Effect::DebounceFilter => {
            ctx.tasks()
                .debounce(FILTER_DEBOUNCE_KEY, debounce, async { Action::FilterApply });
        }
        Effect::CancelFilterDebounce => {
            ctx.tasks().cancel(&TaskKey::new(FILTER_DEBOUNCE_KEY));
        }
        Effect::LoadDetail {
            generation,
            request,
        } => {
            ctx.tasks().spawn(TaskKey::new("detail"), async move {
                match api::fetch_enrichment(request).await {
                    Ok(enrichment) => Action::DetailDidLoad {
                        generation,
                        enrichment,
                    },
                    Err(error) => {
                        tracing::error!(generation, error = %error, "detail enrichment failed");
                        Action::DetailDidError {
                            generation,
                            error: error.to_string(),
                        }
                    }
                }
            });
        }
        Effect::SaveFavorites(favorites) => {
            if let Err(error) = favorites_store.borrow_mut().save(&favorites) {
                tracing::error!(error = %error, "favorites save failed");
                let message = error.to_string();
                ctx.tasks()
                    .spawn(TaskKey::new("favorites_save"), async move {
                        Action::FavoriteSaveDidError(message)
                    });
            }
        }
    }
}
