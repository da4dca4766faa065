use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered account as stored in `users.json`, keyed by email.
/// `password_hash` is a bcrypt string carrying its own salt and cost.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub user_id: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// The account fields safe to hand back to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub user_id: String,
    pub email: String,
}

impl From<&UserRecord> for PublicUser {
    fn from(record: &UserRecord) -> Self {
        Self {
            user_id: record.user_id.clone(),
            email: record.email.clone(),
        }
    }
}
