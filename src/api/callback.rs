use std::sync::Arc;

use axum::{Extension, response::Html};
use tokio::sync::Mutex;

// The fragment never reaches the server, so the page posts it back itself
// and then drops it from the address bar.
const REDIRECT_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <title>musecli</title>
  </head>
  <body>
    <h4 id="status">Completing sign-in...</h4>
    <script>
      const fragment = window.location.hash.substring(1);
      const status = document.getElementById("status");
      if (!fragment) {
        status.textContent = "Missing access token.";
      } else {
        fetch("/fragment", { method: "POST", body: fragment })
          .then(() => {
            history.replaceState(null, "", window.location.pathname);
            status.textContent = "Authentication finished. Close this window.";
          })
          .catch(() => {
            status.textContent = "Could not reach musecli.";
          });
      }
    </script>
  </body>
</html>
"#;

pub async fn callback() -> Html<&'static str> {
    Html(REDIRECT_PAGE)
}

pub async fn fragment(
    Extension(shared_state): Extension<Arc<Mutex<Option<String>>>>,
    body: String,
) -> Html<&'static str> {
    if body.trim().is_empty() {
        return Html("<h4>Empty fragment.</h4>");
    }

    let mut state = shared_state.lock().await;
    *state = Some(body.trim().to_string());
    Html("<h4>Received.</h4>")
}
