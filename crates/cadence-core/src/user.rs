use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A registered account. Serializing a `User` yields exactly the public
/// fields (`id`, `username`, `email`); the password hash never leaves
/// the server.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip)]
    pub password_hash: String,
    #[serde(skip)]
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_is_never_serialized() {
        let user = User {
            id: Uuid::now_v7(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "$argon2id$...".to_string(),
            created_at: Utc::now(),
        };

        let value = serde_json::to_value(&user).expect("serialize");
        assert_eq!(value["username"], "alice");
        assert_eq!(value["email"], "alice@example.com");
        assert!(value.get("password_hash").is_none());
        assert!(value.get("created_at").is_none());
    }
}
