//! User account entity.

use chrono::{DateTime, Utc};

/// An account record.
///
/// `password_hash` is an argon2 PHC string and never leaves the service.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_staff: bool,
    pub is_active: bool,
    pub is_superuser: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub date_joined: DateTime<Utc>,
    /// Ids of the groups this user belongs to, ascending.
    pub groups: Vec<i64>,
}

/// Mutable fields of a user, already validated and with the password hashed.
///
/// Updates replace every field, group membership included.
#[derive(Debug, Clone)]
pub struct UserFields {
    pub username: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_staff: bool,
    pub is_active: bool,
    pub is_superuser: bool,
    pub groups: Vec<i64>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(first: &str, last: &str) -> User {
        User {
            id: 1,
            username: "alice".to_string(),
            password_hash: String::new(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: String::new(),
            is_staff: false,
            is_active: true,
            is_superuser: false,
            last_login: None,
            date_joined: Utc::now(),
            groups: vec![],
        }
    }

    #[test]
    fn test_full_name() {
        assert_eq!(user("Alice", "Smith").full_name(), "Alice Smith");
        assert_eq!(user("Alice", "").full_name(), "Alice");
        assert_eq!(user("", "").full_name(), "");
    }
}
