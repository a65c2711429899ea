use crate::favorites::Favorites;
use crate::state::EnrichmentRequest;

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    FetchPage { url: String, session: u64 },
    DebounceFilter,
    CancelFilterDebounce,
    LoadDetail { generation: u64, request: EnrichmentRequest },
    SaveFavorites(Favorites),
}
