use tabled::Table;

use crate::{
    info,
    spotify::{self, CatalogError},
    state::AppState,
    success,
    types::ItemType,
    utils, warning,
};

/// Toggles the liked state of the artist or album `id`.
///
/// Items already in the collection are unliked straight from the cache;
/// new ones are looked up in the catalog first, which needs a session.
pub async fn like(state: &mut AppState, id: String, item_type: ItemType) {
    let record = match state.likes.get(&id, item_type) {
        Some(liked) => liked.item.clone(),
        None => {
            let Some(token) = state.session.access_token() else {
                warning!("Please login. Run `musecli auth` first.");
                return;
            };
            match spotify::search::lookup(token, &id, item_type).await {
                Ok(record) => record,
                Err(CatalogError::Unauthorized) => {
                    warning!("Spotify rejected the access token. Run `musecli logout` and `musecli auth`.");
                    return;
                }
                Err(e) => {
                    warning!("Cannot find {} {}. Err: {}", item_type, id, e);
                    return;
                }
            }
        }
    };

    let principal = spotify::profile::known_principal(&state.session);

    if let Err(e) = state
        .likes
        .toggle_like(&record, item_type, principal.as_ref())
    {
        warning!("Cannot update liked items. Err: {}", e);
        return;
    }

    if state.likes.is_liked(&record.id, item_type) {
        success!("Liked {} \"{}\"", item_type, record.name);
    } else {
        success!("Unliked {} \"{}\"", item_type, record.name);
    }
}

/// Lists liked items in the order they were liked.
pub fn likes(state: &AppState, kind: Option<ItemType>) {
    let mut rows = Vec::new();
    for liked in state.likes.liked_items() {
        if kind.is_some_and(|k| k != liked.item_type) {
            continue;
        }
        rows.extend(utils::to_table_rows([&liked.item], liked.item_type, |_, _| true));
    }

    if rows.is_empty() {
        info!("No liked items yet.");
        return;
    }

    println!("{}", Table::new(rows));
}
