use std::{sync::Arc, time::Duration};

use tokio::sync::Mutex;

use crate::{config, info, server::start_api_server, utils, warning};

const REDIRECT_TIMEOUT: Duration = Duration::from_secs(120);

/// Runs the implicit-grant authorization and returns the redirect fragment.
///
/// 1. Builds the `response_type=token` authorization URL with a fresh `state`
/// 2. Starts the local redirect server on `SERVER_ADDRESS`
/// 3. Opens the URL in the default browser (or prints it)
/// 4. Waits for the redirect page to hand over `location.hash`
/// 5. Checks the fragment for an `error` and for the expected `state`
///
/// The fragment is returned untouched; extracting and storing the token is
/// the session manager's job.
///
/// # Errors
///
/// Missing client id, an unparsable authorization URL, a timeout, a denied
/// authorization or a `state` mismatch.
pub async fn authorize(shared_state: Arc<Mutex<Option<String>>>) -> Result<String, String> {
    let client_id = config::spotify_client_id()?;
    let state = utils::generate_state();

    let auth_url = utils::build_authorize_url(
        &config::spotify_apiauth_url(),
        &client_id,
        &config::spotify_redirect_uri(),
        &config::spotify_scope(),
        &state,
    )
    .map_err(|e| format!("Invalid authorization URL: {}", e))?;

    let server_state = Arc::clone(&shared_state);
    tokio::spawn(async move {
        if let Err(e) = start_api_server(server_state).await {
            warning!("Redirect server stopped: {}", e);
        }
    });

    if webbrowser::open(auth_url.as_str()).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }
    info!("Waiting for the authorization redirect...");

    let fragment = wait_for_fragment(shared_state, REDIRECT_TIMEOUT)
        .await
        .ok_or_else(|| "Authorization failed or timed out.".to_string())?;

    verify_redirect(&fragment, Some(&state))?;
    Ok(fragment)
}

/// Rejects redirect fragments that report an error or carry a foreign `state`.
///
/// `expected_state` is `None` when the fragment was pasted by hand and no
/// state was issued in this run.
pub fn verify_redirect(fragment: &str, expected_state: Option<&str>) -> Result<(), String> {
    if let Some(err) = utils::fragment_param(fragment, "error") {
        return Err(format!("Authorization was not granted: {}", err));
    }

    if let Some(expected) = expected_state {
        if utils::fragment_param(fragment, "state") != Some(expected) {
            return Err("Authorization state does not match, ignoring redirect.".to_string());
        }
    }

    Ok(())
}

/// Polls the shared slot once a second until the redirect page delivered
/// its fragment or `max_wait` elapsed.
async fn wait_for_fragment(
    shared_state: Arc<Mutex<Option<String>>>,
    max_wait: Duration,
) -> Option<String> {
    use std::time::Instant;

    let start = Instant::now();

    while start.elapsed() < max_wait {
        let mut lock = shared_state.lock().await;
        if let Some(fragment) = lock.take() {
            return Some(fragment);
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}
