use serde::{Deserialize, Serialize};

use crate::state::{CharacterId, CharacterPage, Enrichment};

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[action(infer_categories)]
pub enum Action {
    Init,

    SearchFocus,
    SearchBlur,
    SearchInput(String),
    SearchSubmit(String),

    /// Apply the search field to the active filter and restart from page one.
    FilterApply,
    FilterStatusNext,
    FilterStatusPrev,
    FilterGenderNext,
    FilterGenderPrev,

    PageNext,
    PageDidLoad { session: u64, page: CharacterPage },
    /// Listing answered 404: nothing (more) to show for this filter.
    #[action(category = "page_did")]
    PageDidExhaust { session: u64 },
    PageDidError { session: u64, error: String },

    GridMove(i16),
    GridMoveRow(i16),
    GridPage(i16),
    GridJumpTop,
    GridJumpBottom,

    DetailOpen(CharacterId),
    DetailDidLoad { generation: u64, enrichment: Enrichment },
    DetailDidError { generation: u64, error: String },

    FavoriteToggle(CharacterId),
    FavoriteMove(i16),
    FavoriteSaveDidError(String),

    FocusNext,
    FocusPrev,

    UiTerminalResize(u16, u16),
    Render,
    Tick,
    Quit,
}
