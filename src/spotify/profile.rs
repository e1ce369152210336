use reqwest::Client;

use crate::{
    config,
    management::SessionManager,
    spotify::{CatalogError, get_json},
    types::Principal,
};

/// Returns the profile of the user the token belongs to (`GET {api}/me`).
pub async fn current_user(token: &str) -> Result<Principal, CatalogError> {
    let url = format!("{uri}/me", uri = config::spotify_apiurl());
    let client = Client::new();
    get_json(&client, &url, &[], token).await
}

fn configured_principal() -> Option<Principal> {
    config::user_id().map(|id| Principal {
        id,
        display_name: None,
    })
}

/// Principal for attributing a like right now, without touching the network.
///
/// `MUSE_USER_ID` first, then the profile id remembered at sign-in.
pub fn known_principal(session: &SessionManager) -> Option<Principal> {
    configured_principal().or_else(|| session.principal())
}
