use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tui_dispatch::DataResource;
use tui_dispatch_debug::debug::{ron_string, DebugSection, DebugState};

use crate::favorites::Favorites;
use crate::query::{QueryFilter, DEFAULT_API_BASE};
use crate::stats::StatsSnapshot;

pub type CharacterId = u32;

pub const CARD_WIDTH: u16 = 26;
pub const CARD_HEIGHT: u16 = 7;
pub const GRID_WIDTH_PERCENT: u16 = 58;
/// Rows of cards left below the selection before the next page is requested.
pub const PREFETCH_ROWS: usize = 2;
const CHROME_ROWS: u16 = 3 + 3 + 3 + 2;

/// Life status reported by the API. Anything unexpected collapses to `Unknown`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    Alive,
    Dead,
    Unknown,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Alive, Status::Dead, Status::Unknown];

    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "alive" => Status::Alive,
            "dead" => Status::Dead,
            _ => Status::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Status::Alive => "Alive",
            Status::Dead => "Dead",
            Status::Unknown => "unknown",
        }
    }

    pub fn query_value(self) -> &'static str {
        match self {
            Status::Alive => "alive",
            Status::Dead => "dead",
            Status::Unknown => "unknown",
        }
    }
}

impl From<String> for Status {
    fn from(value: String) -> Self {
        Status::parse(&value)
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        status.label().to_string()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Female,
    Male,
    Genderless,
    Unknown,
}

impl Gender {
    pub const ALL: [Gender; 4] = [
        Gender::Female,
        Gender::Male,
        Gender::Genderless,
        Gender::Unknown,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Gender::Female => "Female",
            Gender::Male => "Male",
            Gender::Genderless => "Genderless",
            Gender::Unknown => "unknown",
        }
    }

    pub fn query_value(self) -> &'static str {
        match self {
            Gender::Female => "female",
            Gender::Male => "male",
            Gender::Genderless => "genderless",
            Gender::Unknown => "unknown",
        }
    }
}

/// Step through `None` followed by every entry of `all`, wrapping at both ends.
pub fn cycle_choice<T: Copy + PartialEq>(all: &[T], current: Option<T>, step: i16) -> Option<T> {
    let slots = all.len() as i16 + 1;
    let index = current
        .and_then(|value| all.iter().position(|item| *item == value))
        .map(|idx| idx as i16 + 1)
        .unwrap_or(0);
    let next = (index + step).rem_euclid(slots);
    if next == 0 {
        None
    } else {
        Some(all[(next - 1) as usize])
    }
}

/// Named link to another resource; the API sends an empty url when there is none.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceRef {
    pub name: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub status: Status,
    pub species: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub gender: String,
    pub origin: PlaceRef,
    pub location: PlaceRef,
    pub image: String,
    #[serde(default)]
    pub episode: Vec<String>,
    pub created: DateTime<Utc>,
}

impl Character {
    pub fn kind(&self) -> Option<&str> {
        let kind = self.kind.trim();
        (!kind.is_empty()).then_some(kind)
    }

    pub fn first_episode_url(&self) -> Option<&str> {
        self.episode.first().map(String::as_str)
    }

    pub fn created_label(&self) -> String {
        self.created.format("%-d/%-m/%Y").to_string()
    }
}

/// One decoded listing page.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CharacterPage {
    pub next: Option<String>,
    pub results: Vec<Character>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cursor {
    Next(String),
    Exhausted,
}

impl Cursor {
    pub fn from_next(next: Option<String>) -> Self {
        match next {
            Some(url) if !url.is_empty() => Cursor::Next(url),
            _ => Cursor::Exhausted,
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            Cursor::Next(url) => Some(url),
            Cursor::Exhausted => None,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, Cursor::Exhausted)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceInfo {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub dimension: String,
}

impl PlaceInfo {
    pub fn kind(&self) -> Option<&str> {
        non_empty(&self.kind)
    }

    pub fn dimension(&self) -> Option<&str> {
        non_empty(&self.dimension)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EpisodeInfo {
    pub name: String,
    #[serde(rename = "episode")]
    pub code: String,
    pub air_date: String,
}

/// URLs the detail panel enriches a character with. Each one is optional.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentRequest {
    pub origin_url: Option<String>,
    pub location_url: Option<String>,
    pub episode_url: Option<String>,
}

impl EnrichmentRequest {
    pub fn for_character(character: &Character) -> Self {
        Self {
            origin_url: character.origin.url.clone(),
            location_url: character.location.url.clone(),
            episode_url: character.first_episode_url().map(str::to_string),
        }
    }
}

/// Best-effort extras for the detail panel; a missing field means "no data".
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Enrichment {
    pub origin: Option<PlaceInfo>,
    pub location: Option<PlaceInfo>,
    pub first_episode: Option<EpisodeInfo>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DetailView {
    /// Bumped on every open; only the matching completion may render.
    pub generation: u64,
    pub character: Option<Character>,
    pub enrichment: DataResource<Enrichment>,
}

impl Default for DetailView {
    fn default() -> Self {
        Self {
            generation: 0,
            character: None,
            enrichment: DataResource::Empty,
        }
    }
}

impl DetailView {
    /// Drop whatever is shown and invalidate in-flight enrichment.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.character = None;
        self.enrichment = DataResource::Empty;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FocusArea {
    Search,
    Grid,
    Favorites,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppState {
    pub terminal_size: (u16, u16),
    pub api_base: String,
    pub focus: FocusArea,

    /// Raw text of the search field; applied to `filter` after the debounce.
    pub search_input: String,
    pub filter: QueryFilter,

    pub characters: Vec<Character>,
    pub cursor: Cursor,
    pub loading: bool,
    /// Bumped on every filter reset; page completions from older sessions are dropped.
    pub session: u64,
    pub no_results: bool,
    pub selected_index: usize,

    pub favorites: Favorites,
    pub favorites_selected: usize,

    pub detail: DetailView,
    pub stats: StatsSnapshot,

    pub message: Option<String>,
    pub tick: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            terminal_size: (120, 40),
            api_base: DEFAULT_API_BASE.to_string(),
            focus: FocusArea::Grid,
            search_input: String::new(),
            filter: QueryFilter::default(),
            characters: Vec::new(),
            cursor: Cursor::Exhausted,
            loading: false,
            session: 0,
            no_results: false,
            selected_index: 0,
            favorites: Favorites::default(),
            favorites_selected: 0,
            detail: DetailView::default(),
            stats: StatsSnapshot::default(),
            message: None,
            tick: 0,
        }
    }
}

impl AppState {
    pub fn new(api_base: impl Into<String>, favorites: Favorites) -> Self {
        Self {
            api_base: api_base.into(),
            favorites,
            ..Self::default()
        }
    }

    pub fn character(&self, id: CharacterId) -> Option<&Character> {
        self.characters.iter().find(|character| character.id == id)
    }

    pub fn is_favorite(&self, id: CharacterId) -> bool {
        self.favorites.contains(id)
    }

    /// Favorites that are present in the loaded list, in the order they were added.
    pub fn loaded_favorites(&self) -> Vec<&Character> {
        self.favorites
            .iter()
            .filter_map(|id| self.character(id))
            .collect()
    }

    pub fn selected_favorite(&self) -> Option<&Character> {
        let loaded = self.loaded_favorites();
        let index = self.favorites_selected.min(loaded.len().saturating_sub(1));
        loaded.get(index).copied()
    }

    pub fn set_selected_index(&mut self, index: usize) -> bool {
        if self.characters.is_empty() {
            self.selected_index = 0;
            return false;
        }
        let bounded = index.min(self.characters.len() - 1);
        if bounded != self.selected_index {
            self.selected_index = bounded;
            return true;
        }
        false
    }

    pub fn grid_columns(&self) -> usize {
        grid_columns_for(grid_inner_width(self.terminal_size.0))
    }

    pub fn grid_visible_rows(&self) -> usize {
        let height = self.terminal_size.1.saturating_sub(CHROME_ROWS);
        ((height / CARD_HEIGHT) as usize).max(1)
    }

    /// True when the selection sits within the prefetch threshold of the list end.
    pub fn near_end(&self) -> bool {
        if self.characters.is_empty() {
            return false;
        }
        let remaining = self.characters.len() - 1 - self.selected_index.min(self.characters.len() - 1);
        remaining < self.grid_columns() * PREFETCH_ROWS
    }

    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            FocusArea::Search => FocusArea::Grid,
            FocusArea::Grid => FocusArea::Favorites,
            FocusArea::Favorites => FocusArea::Search,
        };
    }

    pub fn focus_prev(&mut self) {
        self.focus = match self.focus {
            FocusArea::Search => FocusArea::Favorites,
            FocusArea::Grid => FocusArea::Search,
            FocusArea::Favorites => FocusArea::Grid,
        };
    }
}

pub fn grid_inner_width(terminal_width: u16) -> u16 {
    (terminal_width as u32 * GRID_WIDTH_PERCENT as u32 / 100).saturating_sub(2) as u16
}

pub fn grid_columns_for(width: u16) -> usize {
    ((width / CARD_WIDTH) as usize).max(1)
}

fn non_empty(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|url| !url.trim().is_empty()))
}

impl DebugState for AppState {
    fn debug_sections(&self) -> Vec<DebugSection> {
        vec![
            DebugSection::new("Catalog")
                .entry("loaded", ron_string(&self.characters.len()))
                .entry("selected", ron_string(&self.selected_index))
                .entry("cursor", ron_string(&self.cursor))
                .entry("session", ron_string(&self.session))
                .entry("no_results", ron_string(&self.no_results)),
            DebugSection::new("Filters")
                .entry("search_input", ron_string(&self.search_input))
                .entry("name", ron_string(&self.filter.name))
                .entry("status", ron_string(&self.filter.status))
                .entry("gender", ron_string(&self.filter.gender))
                .entry("focus", ron_string(&self.focus)),
            DebugSection::new("Detail")
                .entry("generation", ron_string(&self.detail.generation))
                .entry(
                    "character",
                    ron_string(&self.detail.character.as_ref().map(|c| c.name.clone())),
                )
                .entry("loading", ron_string(&self.detail.enrichment.is_loading())),
            DebugSection::new("Status")
                .entry("loading", ron_string(&self.loading))
                .entry("favorites", ron_string(&self.favorites.len()))
                .entry("message", ron_string(&self.message)),
        ]
    }
}
