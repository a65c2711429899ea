use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders},
    Frame,
};
use tui_dispatch::{Component, EventContext, EventKind, EventRoutingState, HandlerResponse, RenderContext};
use tui_dispatch_components::style::BorderStyle;
use tui_dispatch_components::{
    BaseStyle, Padding, StatusBar, StatusBarHint, StatusBarItem, StatusBarProps,
    StatusBarSection, StatusBarStyle,
};

use crate::action::Action;
use crate::components::{
    spinner, CardGrid, CardGridProps, DetailPanel, DetailPanelProps, FavoritesBar,
    FavoritesBarProps, SearchBar, SearchBarProps, StatsPanel, StatsPanelProps, ACCENT_GOLD,
    ACCENT_PORTAL, BG_BASE, BG_PANEL, TEXT_DIM, TEXT_MAIN,
};
use crate::state::{AppState, FocusArea, GRID_WIDTH_PERCENT};

const HEADER_HEIGHT: u16 = 3;
const FAVORITES_HEIGHT: u16 = 3;
const FOOTER_HEIGHT: u16 = 3;
const STATS_HEIGHT: u16 = 12;
const CARD_MIN_HEIGHT: u16 = 8;

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum RickdexComponentId {
    Search,
    Grid,
    Favorites,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RickdexContext {
    Search,
    Grid,
    Favorites,
}

impl EventRoutingState<RickdexComponentId, RickdexContext> for AppState {
    fn focused(&self) -> Option<RickdexComponentId> {
        match self.focus {
            FocusArea::Search => Some(RickdexComponentId::Search),
            FocusArea::Grid => Some(RickdexComponentId::Grid),
            FocusArea::Favorites => Some(RickdexComponentId::Favorites),
        }
    }

    fn modal(&self) -> Option<RickdexComponentId> {
        None
    }

    fn binding_context(&self, id: RickdexComponentId) -> RickdexContext {
        match id {
            RickdexComponentId::Search => RickdexContext::Search,
            RickdexComponentId::Grid => RickdexContext::Grid,
            RickdexComponentId::Favorites => RickdexContext::Favorites,
        }
    }

    fn default_context(&self) -> RickdexContext {
        RickdexContext::Grid
    }
}

/// Screen regions, top to bottom.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AppLayout {
    pub header: Rect,
    pub favorites: Rect,
    pub grid: Rect,
    pub detail: Rect,
    pub stats: Rect,
    pub footer: Rect,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        let rows = Layout::vertical([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Length(FAVORITES_HEIGHT),
            Constraint::Min(CARD_MIN_HEIGHT),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(area);
        let grid_width = (area.width as u32 * GRID_WIDTH_PERCENT as u32 / 100) as u16;
        let body = Layout::horizontal([Constraint::Length(grid_width), Constraint::Min(1)])
            .split(rows[2]);
        let side = Layout::vertical([Constraint::Min(6), Constraint::Length(STATS_HEIGHT)])
            .split(body[1]);

        Self {
            header: rows[0],
            favorites: rows[1],
            grid: body[0],
            detail: side[0],
            stats: side[1],
            footer: rows[3],
        }
    }
}

pub struct RickdexUi {
    search: SearchBar,
    grid: CardGrid,
    favorites: FavoritesBar,
    detail: DetailPanel,
    stats: StatsPanel,
    status_bar: StatusBar,
}

impl Default for RickdexUi {
    fn default() -> Self {
        Self::new()
    }
}

impl RickdexUi {
    pub fn new() -> Self {
        Self {
            search: SearchBar::new(),
            grid: CardGrid::new(),
            favorites: FavoritesBar,
            detail: DetailPanel,
            stats: StatsPanel,
            status_bar: StatusBar::new(),
        }
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        _render_ctx: RenderContext,
        event_ctx: &mut EventContext<RickdexComponentId>,
    ) {
        let layout = self.draw(frame, area, state);
        event_ctx.set_component_area(RickdexComponentId::Search, layout.header);
        event_ctx.set_component_area(RickdexComponentId::Favorites, layout.favorites);
        event_ctx.set_component_area(RickdexComponentId::Grid, layout.grid);
    }

    /// Render every panel and return where each one went.
    pub fn draw(&mut self, frame: &mut Frame, area: Rect, state: &AppState) -> AppLayout {
        frame.render_widget(Block::default().style(Style::default().bg(BG_BASE)), area);
        let layout = AppLayout::new(area);

        self.search.render(frame, layout.header, search_props(state));

        let loaded = state.loaded_favorites();
        self.favorites.render(
            frame,
            layout.favorites,
            FavoritesBarProps {
                favorites: &loaded,
                total: state.favorites.len(),
                selected: state.favorites_selected,
                is_focused: state.focus == FocusArea::Favorites,
            },
        );

        self.grid.render(frame, layout.grid, grid_props(state));

        let is_favorite = state
            .detail
            .character
            .as_ref()
            .is_some_and(|c| state.is_favorite(c.id));
        self.detail.render(
            frame,
            layout.detail,
            DetailPanelProps {
                detail: &state.detail,
                is_favorite,
                tick: state.tick,
            },
        );

        self.stats.render(frame, layout.stats, StatsPanelProps { stats: &state.stats });
        render_footer(frame, layout.footer, state, &mut self.status_bar);
        layout
    }

    pub fn handle_search_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let actions: Vec<_> = self
            .search
            .handle_event(event, search_props(state))
            .into_iter()
            .collect();
        handler_response(actions)
    }

    pub fn handle_grid_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let actions: Vec<_> = self
            .grid
            .handle_event(event, grid_props(state))
            .into_iter()
            .collect();
        handler_response(actions)
    }

    pub fn handle_favorites_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let loaded = state.loaded_favorites();
        let props = FavoritesBarProps {
            favorites: &loaded,
            total: state.favorites.len(),
            selected: state.favorites_selected,
            is_focused: state.focus == FocusArea::Favorites,
        };
        let actions: Vec<_> = self
            .favorites
            .handle_event(event, props)
            .into_iter()
            .collect();
        handler_response(actions)
    }
}

fn search_props(state: &AppState) -> SearchBarProps<'_> {
    SearchBarProps {
        query: &state.search_input,
        status: state.filter.status,
        gender: state.filter.gender,
        favorites_count: state.favorites.len(),
        is_focused: state.focus == FocusArea::Search,
        on_change: Action::SearchInput,
        on_submit: Action::SearchSubmit,
    }
}

fn grid_props(state: &AppState) -> CardGridProps<'_> {
    CardGridProps {
        characters: &state.characters,
        favorites: &state.favorites,
        selected: state.selected_index,
        loading: state.loading,
        no_results: state.no_results,
        tick: state.tick,
        is_focused: state.focus == FocusArea::Grid,
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

fn render_footer(frame: &mut Frame, area: Rect, state: &AppState, status_bar: &mut StatusBar) {
    let status = state.message.clone().unwrap_or_else(|| {
        if state.loading {
            format!("{} Loading characters...", spinner(state.tick))
        } else if state.detail.enrichment.is_loading() {
            format!("{} Loading details...", spinner(state.tick))
        } else if state.cursor.is_exhausted() && !state.characters.is_empty() {
            "All characters loaded".to_string()
        } else {
            String::new()
        }
    });
    let hints = status_hints(state.focus);
    let global = [
        StatusBarHint::new("Tab", "Focus"),
        StatusBarHint::new("/", "Search"),
        StatusBarHint::new("s/S", "Status"),
        StatusBarHint::new("g/G", "Gender"),
        StatusBarHint::new("q", "Quit"),
    ];
    let status_span = Span::styled(status.as_str(), Style::default().fg(ACCENT_GOLD));
    let status_items = [StatusBarItem::span(status_span)];

    let style = StatusBarStyle {
        base: BaseStyle {
            border: Some(BorderStyle {
                borders: Borders::ALL,
                style: Style::default().fg(TEXT_DIM),
                focused_style: Some(Style::default().fg(ACCENT_PORTAL)),
            }),
            padding: Padding::xy(1, 0),
            bg: Some(BG_PANEL),
            fg: Some(TEXT_MAIN),
        },
        text: Style::default().fg(TEXT_DIM),
        hint_key: Style::default()
            .fg(ACCENT_PORTAL)
            .add_modifier(Modifier::BOLD),
        hint_label: Style::default().fg(TEXT_DIM),
        separator: Style::default().fg(TEXT_DIM),
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

fn status_hints(focus: FocusArea) -> Vec<StatusBarHint<'static>> {
    match focus {
        FocusArea::Search => vec![
            StatusBarHint::new("Enter", "Apply"),
            StatusBarHint::new("Esc", "Back"),
        ],
        FocusArea::Grid => vec![
            StatusBarHint::new("hjkl", "Move"),
            StatusBarHint::new("Enter", "Detail"),
            StatusBarHint::new("f", "Favorite"),
        ],
        FocusArea::Favorites => vec![
            StatusBarHint::new("h/l", "Select"),
            StatusBarHint::new("Enter", "Detail"),
            StatusBarHint::new("x", "Remove"),
        ],
    }
}
