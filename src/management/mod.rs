mod likes;
mod session;
mod storage;

pub use likes::LikesManager;
pub use likes::apply_toggle;
pub use session::Session;
pub use session::SessionManager;
pub use storage::ACCESS_TOKEN_KEY;
pub use storage::FileStorage;
pub use storage::LIKED_ITEMS_KEY;
pub use storage::REFRESH_TOKEN_KEY;
pub use storage::Storage;
pub use storage::StorageError;
pub use storage::USER_ID_KEY;
