use std::sync::Arc;

use crate::{
    management::storage::{LIKED_ITEMS_KEY, Storage, StorageError},
    sink::{LikeAction, LikeSink},
    types::{CatalogRecord, ItemType, LikeRequest, LikedItem, Principal},
    warning,
};

/// Owns the liked-items collection, its write-through cache and the toggle
/// protocol that keeps the remote like/unlike service informed.
pub struct LikesManager {
    storage: Arc<dyn Storage>,
    sink: Arc<dyn LikeSink>,
    liked: Vec<LikedItem>,
}

impl LikesManager {
    /// Loads the cached collection.
    ///
    /// A missing cache, an unreadable one or one that does not decode all
    /// degrade to an empty collection with a warning. Duplicate entries are
    /// dropped, keeping the first.
    pub fn load_cached_likes(storage: Arc<dyn Storage>, sink: Arc<dyn LikeSink>) -> Self {
        let liked = match storage.get_item(LIKED_ITEMS_KEY) {
            Ok(Some(content)) => match serde_json::from_str::<Vec<LikedItem>>(&content) {
                Ok(items) => dedupe(items),
                Err(e) => {
                    warning!("Ignoring corrupt liked items cache. Err: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warning!("Cannot read liked items cache. Err: {}", e);
                Vec::new()
            }
        };

        Self {
            storage,
            sink,
            liked,
        }
    }

    pub fn liked_items(&self) -> &[LikedItem] {
        &self.liked
    }

    pub fn count(&self) -> usize {
        self.liked.len()
    }

    pub fn is_liked(&self, item_id: &str, item_type: ItemType) -> bool {
        self.liked.iter().any(|l| l.is(item_id, item_type))
    }

    pub fn get(&self, item_id: &str, item_type: ItemType) -> Option<&LikedItem> {
        self.liked.iter().find(|l| l.is(item_id, item_type))
    }

    /// Likes `item` if it is not in the collection, unlikes it otherwise.
    ///
    /// The new collection is written to storage before it replaces the one in
    /// memory, so both always agree when this returns. Exactly one remote
    /// notification is then dispatched without waiting for it; its outcome
    /// never rolls back the local change.
    ///
    /// # Errors
    ///
    /// When the storage write fails nothing changes and nothing is sent.
    pub fn toggle_like(
        &mut self,
        item: &CatalogRecord,
        item_type: ItemType,
        principal: Option<&Principal>,
    ) -> Result<&[LikedItem], StorageError> {
        let mut updated = self.liked.clone();
        let action = apply_toggle(&mut updated, item, item_type);

        let json = serde_json::to_string(&updated)?;
        self.storage.set_item(LIKED_ITEMS_KEY, &json)?;
        self.liked = updated;

        self.sink.dispatch(
            action,
            LikeRequest {
                item: item.id.clone(),
                item_type,
                name: item.name.clone(),
                user_id: principal.map(|p| p.id.clone()),
            },
        );

        Ok(&self.liked)
    }
}

/// Removes the `(item_type, item.id)` entry if present, appends it otherwise.
pub fn apply_toggle(
    liked: &mut Vec<LikedItem>,
    item: &CatalogRecord,
    item_type: ItemType,
) -> LikeAction {
    match liked.iter().position(|l| l.is(&item.id, item_type)) {
        Some(index) => {
            liked.remove(index);
            LikeAction::Unlike
        }
        None => {
            liked.push(LikedItem {
                item_type,
                item: item.clone(),
            });
            LikeAction::Like
        }
    }
}

fn dedupe(items: Vec<LikedItem>) -> Vec<LikedItem> {
    let total = items.len();
    let mut unique: Vec<LikedItem> = Vec::with_capacity(total);
    for item in items {
        if !unique.iter().any(|u| u.is(&item.item.id, item.item_type)) {
            unique.push(item);
        }
    }

    if unique.len() != total {
        warning!(
            "Dropped {} duplicate entries from liked items cache",
            total - unique.len()
        );
    }
    unique
}
