use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    config, error, info, location::Location, spotify, state::AppState, success, utils, warning,
};

/// Signs in through the implicit-grant redirect.
///
/// With `redirect_url` the user pastes the address the browser ended up on
/// (fragment included); otherwise the local redirect server captures it.
/// A token that is already stored takes priority over any new redirect, so
/// an authenticated session is left alone.
pub async fn auth(state: &mut AppState, redirect_url: Option<String>) {
    if state.session.is_authenticated() {
        info!("Already authenticated. Run `musecli logout` first to sign in again.");
        return;
    }

    let root = state.location.root().clone();
    let location = match redirect_url {
        Some(href) => {
            let location = match Location::from_redirect(root, &href) {
                Ok(l) => l,
                Err(e) => error!("Cannot parse redirect URL. Err: {}", e),
            };
            if let Err(e) = spotify::auth::verify_redirect(location.fragment().unwrap_or(""), None)
            {
                error!("{}", e);
            }
            location
        }
        None => {
            let shared_state: Arc<Mutex<Option<String>>> = Arc::new(Mutex::new(None));
            match spotify::auth::authorize(shared_state).await {
                Ok(fragment) => Location::with_fragment(root, &fragment),
                Err(e) => error!("{}", e),
            }
        }
    };

    state.location = location;
    if state
        .session
        .resolve_session(&mut state.location)
        .is_authenticated()
    {
        success!("Authentication successful!");
        remember_principal(state).await;
    } else {
        warning!("The redirect did not contain an access token.");
    }
}

// Looked up once here so liking never waits on the profile endpoint.
async fn remember_principal(state: &AppState) {
    if config::user_id().is_some() {
        return;
    }
    let Some(token) = state.session.access_token() else {
        return;
    };

    match spotify::profile::current_user(token).await {
        Ok(principal) => state.session.store_principal(&principal),
        Err(e) => warning!("Cannot look up the Spotify profile, likes will carry no user id. Err: {}", e),
    }
}

/// Forgets the session and returns to the application root.
pub fn logout(state: &mut AppState) {
    state.session.logout(&mut state.location);
    success!("Logged out.");
}

pub fn status(state: &AppState) {
    match state.session.access_token() {
        Some(token) => success!("Authenticated (token {})", utils::mask_token(token)),
        None => info!("Not authenticated. Run `musecli auth` to sign in."),
    }
    info!("{} liked items", state.likes.count());
}
