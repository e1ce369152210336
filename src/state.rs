use std::sync::Arc;

use crate::{
    location::Location,
    management::{LikesManager, SessionManager, Storage},
    sink::LikeSink,
};

/// Root application state.
///
/// Owns the session and the liked-items collection; handlers borrow it
/// mutably, so there is a single writer at any time.
pub struct AppState {
    pub location: Location,
    pub session: SessionManager,
    pub likes: LikesManager,
}

impl AppState {
    /// Resolves the session and loads the cached likes, in that order.
    pub fn start(
        storage: Arc<dyn Storage>,
        sink: Arc<dyn LikeSink>,
        mut location: Location,
    ) -> Self {
        let mut session = SessionManager::new(Arc::clone(&storage));
        session.resolve_session(&mut location);
        let likes = LikesManager::load_cached_likes(storage, sink);

        Self {
            location,
            session,
            likes,
        }
    }
}
