use std::sync::OnceLock;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::ApiError;
use crate::state::{Character, CharacterPage, EnrichmentRequest, Enrichment, EpisodeInfo, PlaceInfo};

#[derive(Debug, Deserialize)]
struct PageResponse {
    info: PageInfo,
    results: Vec<Character>,
}

#[derive(Debug, Deserialize)]
struct PageInfo {
    next: Option<String>,
}

impl From<PageResponse> for CharacterPage {
    fn from(response: PageResponse) -> Self {
        CharacterPage {
            next: response.info.next,
            results: response.results,
        }
    }
}

/// Fetch one listing page. A 404 surfaces as [`ApiError::NotFound`].
pub async fn fetch_character_page(url: &str) -> Result<CharacterPage, ApiError> {
    let bytes = fetch_bytes(url).await?;
    let page = parse_character_page(&bytes)?;
    tracing::debug!(url = %url, count = page.results.len(), has_next = page.next.is_some(), "page loaded");
    Ok(page)
}

pub fn parse_character_page(bytes: &[u8]) -> Result<CharacterPage, ApiError> {
    serde_json::from_slice::<PageResponse>(bytes)
        .map(CharacterPage::from)
        .map_err(|err| ApiError::Decode(err.to_string()))
}

/// Resolve origin, location and first episode concurrently.
///
/// Each lookup is independent: a missing URL or a failed request leaves its
/// field empty. Only a panicked task fails the whole enrichment.
pub async fn fetch_enrichment(request: EnrichmentRequest) -> Result<Enrichment, ApiError> {
    let origin = tokio::spawn(fetch_optional::<PlaceInfo>(request.origin_url));
    let location = tokio::spawn(fetch_optional::<PlaceInfo>(request.location_url));
    let episode = tokio::spawn(fetch_optional::<EpisodeInfo>(request.episode_url));

    let (origin, location, episode) = tokio::join!(origin, location, episode);
    Ok(Enrichment {
        origin: origin.map_err(task_error)?,
        location: location.map_err(task_error)?,
        first_episode: episode.map_err(task_error)?,
    })
}

async fn fetch_optional<T: DeserializeOwned>(url: Option<String>) -> Option<T> {
    let url = url?;
    match fetch_json(&url).await {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::debug!(url = %url, error = %err, "enrichment lookup failed");
            None
        }
    }
}

async fn fetch_json<T: DeserializeOwned>(url: &str) -> Result<T, ApiError> {
    let bytes = fetch_bytes(url).await?;
    serde_json::from_slice(&bytes).map_err(|err| ApiError::Decode(err.to_string()))
}

async fn fetch_bytes(url: &str) -> Result<Vec<u8>, ApiError> {
    let response = http_client()
        .get(url)
        .send()
        .await
        .map_err(|err| ApiError::Request(err.to_string()))?;
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::from_status(status.as_u16()));
    }
    let bytes = response
        .bytes()
        .await
        .map_err(|err| ApiError::Request(err.to_string()))?;
    Ok(bytes.to_vec())
}

fn task_error(err: tokio::task::JoinError) -> ApiError {
    ApiError::Task(err.to_string())
}

fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(reqwest::Client::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Status;
    use pretty_assertions::assert_eq;

    const PAGE: &str = r#"{
        "info": { "count": 826, "pages": 42, "next": "https://rickandmortyapi.com/api/character?page=2", "prev": null },
        "results": [{
            "id": 1,
            "name": "Rick Sanchez",
            "status": "Alive",
            "species": "Human",
            "type": "",
            "gender": "Male",
            "origin": { "name": "Earth (C-137)", "url": "https://rickandmortyapi.com/api/location/1" },
            "location": { "name": "Citadel of Ricks", "url": "https://rickandmortyapi.com/api/location/3" },
            "image": "https://rickandmortyapi.com/api/character/avatar/1.jpeg",
            "episode": ["https://rickandmortyapi.com/api/episode/1", "https://rickandmortyapi.com/api/episode/2"],
            "url": "https://rickandmortyapi.com/api/character/1",
            "created": "2017-11-04T18:48:46.250Z"
        }, {
            "id": 8,
            "name": "Adjudicator Rick",
            "status": "Dead",
            "species": "Human",
            "type": "",
            "gender": "Male",
            "origin": { "name": "unknown", "url": "" },
            "location": { "name": "Citadel of Ricks", "url": "https://rickandmortyapi.com/api/location/3" },
            "image": "https://rickandmortyapi.com/api/character/avatar/8.jpeg",
            "episode": ["https://rickandmortyapi.com/api/episode/28"],
            "url": "https://rickandmortyapi.com/api/character/8",
            "created": "2017-11-04T20:03:34.737Z"
        }]
    }"#;

    #[test]
    fn parses_listing_page() {
        let page = parse_character_page(PAGE.as_bytes()).unwrap();

        assert_eq!(
            page.next.as_deref(),
            Some("https://rickandmortyapi.com/api/character?page=2")
        );
        assert_eq!(page.results.len(), 2);
        let rick = &page.results[0];
        assert_eq!(rick.name, "Rick Sanchez");
        assert_eq!(rick.status, Status::Alive);
        assert_eq!(rick.kind(), None);
        assert_eq!(rick.created_label(), "4/11/2017");
        assert_eq!(page.results[1].origin.url, None);
    }

    #[test]
    fn last_page_has_no_next() {
        let json = r#"{ "info": { "next": null }, "results": [] }"#;
        let page = parse_character_page(json.as_bytes()).unwrap();
        assert_eq!(page.next, None);
        assert!(page.results.is_empty());
    }

    #[test]
    fn malformed_page_is_decode_error() {
        let err = parse_character_page(b"{\"results\": 3}").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn enrichment_without_urls_skips_requests() {
        let enrichment = fetch_enrichment(EnrichmentRequest::default()).await.unwrap();
        assert_eq!(enrichment, Enrichment::default());
    }

    #[tokio::test]
    async fn unreachable_lookups_resolve_to_no_data() {
        // Nothing listens on port 1, so both requests fail to connect.
        let request = EnrichmentRequest {
            origin_url: Some("http://127.0.0.1:1/api/location/1".into()),
            location_url: None,
            episode_url: Some("http://127.0.0.1:1/api/episode/1".into()),
        };

        let enrichment = fetch_enrichment(request).await.unwrap();

        assert_eq!(enrichment.origin, None);
        assert_eq!(enrichment.location, None);
        assert_eq!(enrichment.first_episode, None);
    }
}
