//! Store + effect flows through EffectStoreTestHarness, with rendering.

mod common;

use common::{character, humans, page, PAGE_2};
use rickdex::{
    action::Action,
    components::{Component, SearchBar, SearchBarProps},
    effect::Effect,
    reducer::reducer,
    state::{AppState, Cursor, Enrichment, EpisodeInfo, FocusArea, PlaceInfo},
    ui::RickdexUi,
};
use tui_dispatch::testing::*;
use tui_dispatch::NumericComponentId;

/// First page of 20 humans loaded, more pages available.
fn loaded_state() -> AppState {
    let mut state = AppState::default();
    reducer(&mut state, Action::Init);
    reducer(
        &mut state,
        Action::PageDidLoad {
            session: 1,
            page: page(humans(1..21), Some(PAGE_2)),
        },
    );
    state
}

#[test]
fn listing_loads_then_prefetches_at_the_bottom() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::Init);
    harness.assert_state(|s| s.loading);
    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| matches!(e, Effect::FetchPage { session: 1, .. }));

    harness.complete_action(Action::PageDidLoad {
        session: 1,
        page: page(humans(1..21), Some(PAGE_2)),
    });
    let (changed, total) = harness.process_emitted();
    assert_eq!(total, 1);
    assert_eq!(changed, 1);
    harness.assert_state(|s| s.characters.len() == 20 && !s.loading);

    harness.dispatch_collect(Action::GridJumpBottom);
    harness.assert_state(|s| s.selected_index == 19 && s.loading);
    let effects = harness.drain_effects();
    effects.effects_first_matches(|e| matches!(e, Effect::FetchPage { url, .. } if url == PAGE_2));
}

#[test]
fn exhausted_listing_stops_paging() {
    let mut harness = EffectStoreTestHarness::new(loaded_state(), reducer);

    harness.dispatch_collect(Action::PageNext);
    harness.drain_effects();
    harness.complete_action(Action::PageDidExhaust { session: 1 });
    harness.process_emitted();

    harness.assert_state(|s| s.cursor == Cursor::Exhausted);
    harness.assert_state(|s| s.characters.len() == 20 && !s.no_results);

    harness.dispatch_collect(Action::PageNext);
    harness.drain_effects().effects_count(0);
}

#[test]
fn detail_enrichment_flow() {
    let state = loaded_state();
    let generation = state.detail.generation + 1;
    let mut harness = EffectStoreTestHarness::new(state, reducer);

    harness.dispatch_collect(Action::DetailOpen(7));
    harness.assert_state(|s| s.detail.enrichment.is_loading());
    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| matches!(e, Effect::LoadDetail { generation: g, .. } if *g == generation));

    harness.complete_action(Action::DetailDidLoad {
        generation,
        enrichment: Enrichment {
            origin: Some(PlaceInfo {
                name: "Earth (C-137)".into(),
                kind: "Planet".into(),
                dimension: "Dimension C-137".into(),
            }),
            location: None,
            first_episode: Some(EpisodeInfo {
                name: "Pilot".into(),
                code: "S01E01".into(),
                air_date: "December 2, 2013".into(),
            }),
        },
    });
    let (changed, _) = harness.process_emitted();
    assert_eq!(changed, 1);

    harness.assert_state(|s| s.detail.enrichment.is_loaded());
    harness.assert_state(|s| s.detail.character.as_ref().is_some_and(|c| c.id == 7));
}

#[test]
fn detail_failure_is_generation_guarded() {
    let state = loaded_state();
    let first = state.detail.generation + 1;
    let mut harness = EffectStoreTestHarness::new(state, reducer);

    harness.dispatch_collect(Action::DetailOpen(1));
    harness.dispatch_collect(Action::DetailOpen(2));
    harness.drain_effects().effects_count(2);

    harness.complete_action(Action::DetailDidError {
        generation: first,
        error: "timeout".into(),
    });
    let (changed, total) = harness.process_emitted();
    assert_eq!(total, 1);
    assert_eq!(changed, 0);
    harness.assert_state(|s| s.detail.enrichment.is_loading());

    harness.complete_action(Action::DetailDidError {
        generation: first + 1,
        error: "timeout".into(),
    });
    harness.process_emitted();
    harness.assert_state(|s| s.detail.enrichment.is_failed());
}

#[test]
fn typing_in_search_debounces_then_applies() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    let mut search = SearchBar::new();
    harness.dispatch_collect(Action::SearchFocus);
    harness.assert_state(|s| s.focus == FocusArea::Search);

    let actions = harness.send_keys::<NumericComponentId, _, _>("m", |state, event| {
        let props = SearchBarProps {
            query: &state.search_input,
            status: state.filter.status,
            gender: state.filter.gender,
            favorites_count: state.favorites.len(),
            is_focused: true,
            on_change: Action::SearchInput,
            on_submit: Action::SearchSubmit,
        };
        search
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });
    actions.assert_first(Action::SearchInput("m".into()));

    for action in actions {
        harness.dispatch_collect(action);
    }
    harness.drain_effects().effects_first_matches(|e| matches!(e, Effect::DebounceFilter));

    // Timer fires.
    harness.complete_action(Action::FilterApply);
    harness.process_emitted();
    harness.assert_state(|s| s.filter.name == "m" && s.session == 1);
}

#[test]
fn favorite_toggle_emits_save() {
    let mut harness = EffectStoreTestHarness::new(loaded_state(), reducer);

    harness.dispatch_collect(Action::FavoriteToggle(4));
    harness.assert_state(|s| s.is_favorite(4));
    let effects = harness.drain_effects();
    effects.effects_first_matches(|e| matches!(e, Effect::SaveFavorites(f) if f.contains(4)));

    harness.complete_action(Action::FavoriteSaveDidError("disk full".into()));
    harness.process_emitted();
    harness.assert_state(|s| {
        s.message
            .as_deref()
            .is_some_and(|m| m.contains("disk full"))
    });
}

#[test]
fn render_full_screen_after_load() {
    let mut harness = EffectStoreTestHarness::new(loaded_state(), reducer);
    harness.dispatch_collect(Action::PageNext);
    harness.drain_effects();
    harness.complete_action(Action::PageDidLoad {
        session: 1,
        page: page(
            vec![character(21, "Squanchy", "Cat-Person", "", "Unknown")],
            None,
        ),
    });
    harness.process_emitted();
    harness.dispatch_collect(Action::FavoriteToggle(1));
    harness.dispatch_collect(Action::DetailOpen(1));

    let mut ui = RickdexUi::new();
    let output = harness.render_plain(120, 40, |frame, area, state| {
        ui.draw(frame, area, state);
    });

    assert!(output.contains("RICKDEX"));
    assert!(output.contains("CHARACTERS (21)"));
    assert!(output.contains("FAVORITES (1)"));
    assert!(output.contains("SPECIES"));
    assert!(output.contains("TYPES"));
    assert!(output.contains("Loading details..."));
}
