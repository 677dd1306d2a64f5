use crate::models::SessionUser;
use moka::future::Cache;
use uuid::Uuid;

/// In-process session store: opaque token -> authenticated user.
///
/// Presence of the token is the sole authentication check. No expiry is
/// enforced; sessions live until logout or process restart. Passed as app
/// data so identity is threaded explicitly into handlers instead of living
/// in a process-wide global.
#[derive(Clone)]
pub struct SessionStore {
    cache: Cache<String, SessionUser>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            cache: Cache::builder().max_capacity(100_000).build(),
        }
    }

    pub async fn create(&self, user: SessionUser) -> String {
        let token = Uuid::new_v4().to_string();
        self.cache.insert(token.clone(), user).await;
        token
    }

    pub async fn get(&self, token: &str) -> Option<SessionUser> {
        self.cache.get(token).await
    }

    pub async fn remove(&self, token: &str) {
        self.cache.invalidate(token).await;
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
