use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// User record in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,           // server-assigned, immutable
    pub name: String,
    pub last_name: String,
    pub email: String,
}

/// Editable part of a user, without the id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub last_name: String,
    pub email: String,
}

impl User {
    pub fn from_profile(id: i64, profile: UserProfile) -> Self {
        Self {
            id,
            name: profile.name,
            last_name: profile.last_name,
            email: profile.email,
        }
    }
}

/// What a save does: insert under a fresh id, or overwrite an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveUser {
    Create(UserProfile),
    Update { id: i64, profile: UserProfile },
}
