use std::sync::Arc;

use crate::auth::TokenService;
use crate::database::Store;

/// Shared by every handler. Holds no per-request data and no entity cache.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub tokens: Arc<TokenService>,
    /// bcrypt work factor for new password hashes
    pub bcrypt_cost: u32,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, tokens: TokenService, bcrypt_cost: u32) -> Self {
        Self {
            store,
            tokens: Arc::new(tokens),
            bcrypt_cost,
        }
    }
}
