use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::effect::Effect;
use crate::query::build_query_url;
use crate::state::{cycle_choice, AppState, Cursor, EnrichmentRequest, FocusArea, Gender, Status};
use crate::stats::StatsSnapshot;

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => {
            state.message = None;
            DispatchResult::changed_with(reset_session(state))
        }

        Action::SearchFocus => {
            if state.focus == FocusArea::Search {
                return DispatchResult::unchanged();
            }
            state.focus = FocusArea::Search;
            DispatchResult::changed()
        }

        Action::SearchBlur => {
            if state.focus != FocusArea::Search {
                return DispatchResult::unchanged();
            }
            state.focus = FocusArea::Grid;
            DispatchResult::changed()
        }

        Action::SearchInput(value) => {
            if value == state.search_input {
                return DispatchResult::unchanged();
            }
            state.search_input = value;
            DispatchResult::changed_with(Effect::DebounceFilter)
        }

        Action::SearchSubmit(value) => {
            state.search_input = value;
            state.focus = FocusArea::Grid;
            state.filter.name = normalize_name(&state.search_input);
            let fetch = reset_session(state);
            DispatchResult::changed_with_many(vec![Effect::CancelFilterDebounce, fetch])
        }

        Action::FilterApply => {
            state.filter.name = normalize_name(&state.search_input);
            DispatchResult::changed_with(reset_session(state))
        }

        Action::FilterStatusNext => {
            state.filter.status = cycle_choice(&Status::ALL, state.filter.status, 1);
            DispatchResult::changed_with(reset_session(state))
        }

        Action::FilterStatusPrev => {
            state.filter.status = cycle_choice(&Status::ALL, state.filter.status, -1);
            DispatchResult::changed_with(reset_session(state))
        }

        Action::FilterGenderNext => {
            state.filter.gender = cycle_choice(&Gender::ALL, state.filter.gender, 1);
            DispatchResult::changed_with(reset_session(state))
        }

        Action::FilterGenderPrev => {
            state.filter.gender = cycle_choice(&Gender::ALL, state.filter.gender, -1);
            DispatchResult::changed_with(reset_session(state))
        }

        Action::PageNext => match fetch_next_page(state) {
            Some(effect) => DispatchResult::changed_with(effect),
            None => DispatchResult::unchanged(),
        },

        Action::PageDidLoad { session, page } => {
            if session != state.session {
                return DispatchResult::unchanged();
            }
            state.loading = false;
            state.cursor = Cursor::from_next(page.next);
            state.characters.extend(page.results);
            state.stats = StatsSnapshot::compute(&state.characters);
            state.no_results = state.characters.is_empty();
            state.message = None;
            DispatchResult::changed()
        }

        Action::PageDidExhaust { session } => {
            if session != state.session {
                return DispatchResult::unchanged();
            }
            state.loading = false;
            state.cursor = Cursor::Exhausted;
            state.no_results = state.characters.is_empty();
            DispatchResult::changed()
        }

        Action::PageDidError { session, error } => {
            if session != state.session {
                return DispatchResult::unchanged();
            }
            state.loading = false;
            state.message = Some(format!("Load error: {error}"));
            DispatchResult::changed()
        }

        Action::GridMove(delta) => {
            let target = state.selected_index as i64 + delta as i64;
            move_selection(state, target)
        }

        Action::GridMoveRow(delta) => {
            let step = state.grid_columns() as i64;
            let target = state.selected_index as i64 + delta as i64 * step;
            move_selection(state, target)
        }

        Action::GridPage(delta) => {
            let step = (state.grid_columns() * state.grid_visible_rows()) as i64;
            let target = state.selected_index as i64 + delta as i64 * step;
            move_selection(state, target)
        }

        Action::GridJumpTop => move_selection(state, 0),

        Action::GridJumpBottom => {
            let last = state.characters.len().saturating_sub(1) as i64;
            move_selection(state, last)
        }

        Action::DetailOpen(id) => {
            let Some(character) = state.character(id).cloned() else {
                return DispatchResult::unchanged();
            };
            state.detail.generation += 1;
            let request = EnrichmentRequest::for_character(&character);
            state.detail.character = Some(character);
            state.detail.enrichment = DataResource::Loading;
            DispatchResult::changed_with(Effect::LoadDetail {
                generation: state.detail.generation,
                request,
            })
        }

        Action::DetailDidLoad {
            generation,
            enrichment,
        } => {
            if generation != state.detail.generation {
                return DispatchResult::unchanged();
            }
            state.detail.enrichment = DataResource::Loaded(enrichment);
            DispatchResult::changed()
        }

        Action::DetailDidError { generation, error } => {
            if generation != state.detail.generation {
                return DispatchResult::unchanged();
            }
            state.detail.enrichment = DataResource::Failed(error);
            DispatchResult::changed()
        }

        Action::FavoriteToggle(id) => {
            state.favorites.toggle(id);
            let loaded = state.loaded_favorites().len();
            state.favorites_selected = state.favorites_selected.min(loaded.saturating_sub(1));
            DispatchResult::changed_with(Effect::SaveFavorites(state.favorites.clone()))
        }

        Action::FavoriteMove(delta) => {
            let loaded = state.loaded_favorites().len();
            if loaded == 0 {
                return DispatchResult::unchanged();
            }
            let current = state.favorites_selected.min(loaded - 1) as i64;
            let next = (current + delta as i64).clamp(0, loaded as i64 - 1) as usize;
            if next == state.favorites_selected {
                return DispatchResult::unchanged();
            }
            state.favorites_selected = next;
            DispatchResult::changed()
        }

        Action::FavoriteSaveDidError(error) => {
            state.message = Some(format!("Favorites not saved: {error}"));
            DispatchResult::changed()
        }

        Action::FocusNext => {
            state.focus_next();
            DispatchResult::changed()
        }

        Action::FocusPrev => {
            state.focus_prev();
            DispatchResult::changed()
        }

        Action::UiTerminalResize(width, height) => {
            state.terminal_size = (width, height);
            DispatchResult::changed()
        }

        Action::Render => DispatchResult::changed(),

        Action::Tick => {
            if !state.loading && !state.detail.enrichment.is_loading() {
                return DispatchResult::unchanged();
            }
            state.tick = state.tick.wrapping_add(1);
            DispatchResult::changed()
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Start a new filter session: forget everything loaded so far and request
/// page one of the current filter.
fn reset_session(state: &mut AppState) -> Effect {
    state.characters.clear();
    state.stats = StatsSnapshot::default();
    state.selected_index = 0;
    state.favorites_selected = 0;
    state.no_results = false;
    state.detail.clear();

    state.session += 1;
    let url = build_query_url(&state.api_base, &state.filter);
    state.cursor = Cursor::Next(url.clone());
    state.loading = true;
    Effect::FetchPage {
        url,
        session: state.session,
    }
}

fn fetch_next_page(state: &mut AppState) -> Option<Effect> {
    if state.loading {
        return None;
    }
    let url = state.cursor.url()?.to_string();
    state.loading = true;
    Some(Effect::FetchPage {
        url,
        session: state.session,
    })
}

fn move_selection(state: &mut AppState, target: i64) -> DispatchResult<Effect> {
    let moved = state.set_selected_index(target.max(0) as usize);
    let prefetch = if state.near_end() {
        fetch_next_page(state)
    } else {
        None
    };
    match prefetch {
        Some(effect) => DispatchResult::changed_with(effect),
        None if moved => DispatchResult::changed(),
        None => DispatchResult::unchanged(),
    }
}

fn normalize_name(input: &str) -> String {
    input.to_lowercase()
}
