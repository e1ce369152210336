use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Artist,
    Album,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Artist => "artist",
            ItemType::Album => "album",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalog entry as it is kept in the liked-items cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub external_url: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LikedItem {
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub item: CatalogRecord,
}

impl LikedItem {
    /// True when this entry has the identity `(item_type, id)`.
    pub fn is(&self, id: &str, item_type: ItemType) -> bool {
        self.item_type == item_type && self.item.id == id
    }
}

/// The end user a like/unlike notification is attributed to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Principal {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Body of `POST /like` and `POST /unlike`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LikeRequest {
    pub item: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub name: String,
    #[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExternalUrls {
    #[serde(default)]
    pub spotify: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
}

/// Artist or album object as returned by the Spotify Web API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    #[serde(default)]
    pub images: Vec<Image>,
}

impl From<SpotifyItem> for CatalogRecord {
    fn from(item: SpotifyItem) -> Self {
        CatalogRecord {
            id: item.id,
            name: item.name,
            external_url: item.external_urls.spotify,
            image_url: item.images.into_iter().next().map(|i| i.url),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<Option<T>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub artists: Option<Page<SpotifyItem>>,
    #[serde(default)]
    pub albums: Option<Page<SpotifyItem>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResults {
    pub artists: Vec<CatalogRecord>,
    pub albums: Vec<CatalogRecord>,
}

#[derive(Tabled)]
pub struct CatalogTableRow {
    #[tabled(rename = "♥")]
    pub liked: String,
    pub kind: String,
    pub name: String,
    pub id: String,
    pub url: String,
}
