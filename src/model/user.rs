use serde::{Deserialize, Serialize};

/// User record as the backing store holds it. This type never crosses the
/// service boundary; clients only ever see `SessionUser`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub email: String,
    pub password: String,
}
