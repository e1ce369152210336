use axum::{
    Extension, Router,
    routing::{get, post},
};
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tokio::sync::Mutex;

use crate::{Res, api, config};

/// Serves the authorization redirect on `SERVER_ADDRESS`.
///
/// `/` and `/callback` return the page that forwards the fragment,
/// `/fragment` stores it in `state` for the waiting authorization flow.
pub async fn start_api_server(state: Arc<Mutex<Option<String>>>) -> Res<()> {
    let app = Router::new()
        .route("/", get(api::callback))
        .route("/callback", get(api::callback))
        .route("/health", get(api::health))
        .route("/fragment", post(api::fragment).layer(Extension(state)));

    let addr = SocketAddr::from_str(&config::server_addr())?;
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
