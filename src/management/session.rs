use std::sync::Arc;

use crate::{
    location::Location,
    management::storage::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, Storage, USER_ID_KEY},
    types::Principal,
    utils, warning,
};

/// The current access credential for the catalog API, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub access_token: Option<String>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }
}

/// Owns the access token lifecycle: capture from the redirect fragment,
/// durable storage, lookup on startup and logout.
pub struct SessionManager {
    storage: Arc<dyn Storage>,
    session: Session,
}

impl SessionManager {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            session: Session::default(),
        }
    }

    /// Resolves the current session from storage or from the redirect fragment.
    ///
    /// A stored token always wins; the fragment is only consulted when
    /// nothing is stored. A fragment token is captured first, then the
    /// fragment is cleared from `location`, then the token is persisted.
    /// Finding no token anywhere leaves an unauthenticated session and is
    /// not an error.
    pub fn resolve_session(&mut self, location: &mut Location) -> &Session {
        let stored = match self.storage.get_item(ACCESS_TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warning!("Cannot read stored access token. Err: {}", e);
                None
            }
        };

        let token = match stored {
            Some(token) => Some(token),
            None => {
                let captured = location.fragment().and_then(utils::parse_access_token);
                if let Some(token) = &captured {
                    location.clear_fragment();
                    if let Err(e) = self.storage.set_item(ACCESS_TOKEN_KEY, token) {
                        warning!("Cannot store access token. Err: {}", e);
                    }
                }
                captured
            }
        };

        self.session = Session {
            access_token: token,
        };
        &self.session
    }

    /// Drops the session and returns the client to the application root.
    ///
    /// Clears the in-memory token, both stored token entries and the
    /// remembered principal. There is no confirmation step here.
    pub fn logout(&mut self, location: &mut Location) {
        self.session = Session::default();

        for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_ID_KEY] {
            if let Err(e) = self.storage.remove_item(key) {
                warning!("Cannot remove {} from storage. Err: {}", key, e);
            }
        }

        location.navigate_root();
    }

    /// Remembers who the session belongs to, so attributing a like later
    /// needs no catalog request.
    pub fn store_principal(&self, principal: &Principal) {
        if let Err(e) = self.storage.set_item(USER_ID_KEY, &principal.id) {
            warning!("Cannot store user id. Err: {}", e);
        }
    }

    /// The principal remembered by [`SessionManager::store_principal`].
    pub fn principal(&self) -> Option<Principal> {
        match self.storage.get_item(USER_ID_KEY) {
            Ok(id) => id.filter(|id| !id.is_empty()).map(|id| Principal {
                id,
                display_name: None,
            }),
            Err(e) => {
                warning!("Cannot read stored user id. Err: {}", e);
                None
            }
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn access_token(&self) -> Option<&str> {
        self.session.access_token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }
}
