use reqwest::Client;
use url::Url;

use crate::{
    config,
    spotify::{CatalogError, get_json},
    types::{CatalogRecord, ItemType, Page, SearchResponse, SearchResults, SpotifyItem},
};

/// Searches artists and albums by keyword.
///
/// Issues one `GET {api}/search?q=<query>&type=artist,album` request and
/// maps both result lists into [`CatalogRecord`]s, in the order Spotify
/// returned them. `null` entries in the result pages are skipped.
///
/// # Errors
///
/// [`CatalogError::Unauthorized`] when the token is rejected, otherwise
/// [`CatalogError::Request`]. Neither is fatal for the session.
pub async fn search(token: &str, query: &str) -> Result<SearchResults, CatalogError> {
    let url = format!("{uri}/search", uri = config::spotify_apiurl());
    let client = Client::new();

    let response: SearchResponse = get_json(
        &client,
        &url,
        &[("q", query), ("type", "artist,album")],
        token,
    )
    .await?;

    Ok(SearchResults {
        artists: records(response.artists),
        albums: records(response.albums),
    })
}

/// Fetches a single artist or album by id.
///
/// The id becomes one escaped path segment of `{api}/artists/{id}` or
/// `{api}/albums/{id}`, so it can never address another endpoint.
pub async fn lookup(
    token: &str,
    id: &str,
    item_type: ItemType,
) -> Result<CatalogRecord, CatalogError> {
    let url = item_url(&config::spotify_apiurl(), id, item_type)?;
    let client = Client::new();

    let item: SpotifyItem = get_json(&client, url.as_str(), &[], token).await?;
    Ok(item.into())
}

fn item_url(api_url: &str, id: &str, item_type: ItemType) -> Result<Url, CatalogError> {
    if id.trim().is_empty() || id == "." || id == ".." {
        return Err(CatalogError::InvalidRequest(format!("bad id '{}'", id)));
    }

    let mut url = Url::parse(api_url).map_err(|e| CatalogError::InvalidRequest(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| CatalogError::InvalidRequest(format!("cannot use '{}' as API base", api_url)))?
        .pop_if_empty()
        .push(&format!("{}s", item_type.as_str()))
        .push(id);
    Ok(url)
}

fn records(page: Option<Page<SpotifyItem>>) -> Vec<CatalogRecord> {
    page.map(|p| p.items.into_iter().flatten().map(CatalogRecord::from).collect())
        .unwrap_or_default()
}
