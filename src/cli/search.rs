use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    info,
    spotify::{self, CatalogError},
    state::AppState,
    types::ItemType,
    utils, warning,
};

/// Searches artists and albums and prints them, marking liked ones.
///
/// `kind` restricts the output to artists or albums. Search failures,
/// including a rejected token, are reported and leave the session as it is.
pub async fn search(state: &AppState, query: String, kind: Option<ItemType>) {
    let Some(token) = state.session.access_token() else {
        warning!("Please login. Run `musecli auth` first.");
        return;
    };

    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Searching for \"{}\"...", query));
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let result = spotify::search::search(token, &query).await;
    pb.finish_and_clear();

    let results = match result {
        Ok(r) => r,
        Err(CatalogError::Unauthorized) => {
            warning!("Spotify rejected the access token. Run `musecli logout` and `musecli auth`.");
            return;
        }
        Err(e) => {
            warning!("Error searching artists: {}", e);
            return;
        }
    };

    let is_liked = |id: &str, t: ItemType| state.likes.is_liked(id, t);
    let mut rows = Vec::new();
    if kind != Some(ItemType::Album) {
        rows.extend(utils::to_table_rows(&results.artists, ItemType::Artist, is_liked));
    }
    if kind != Some(ItemType::Artist) {
        rows.extend(utils::to_table_rows(&results.albums, ItemType::Album, is_liked));
    }

    if rows.is_empty() {
        info!("Nothing found for \"{}\"", query);
        return;
    }

    println!("{}", Table::new(rows));
}
