//! User directory.
//!
//! The scheduler treats user management as an external concern: accounts are
//! seeded from configuration and looked up here when resolving invitees or
//! authenticating bearer tokens. Token issuance lives outside this crate.

use serde::{Deserialize, Serialize};

/// A registered user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Bearer token accepted for this user. Opaque to the core.
    #[serde(skip_serializing)]
    pub token: String,
}

/// Read-only lookup over the registered users.
#[derive(Debug, Default, Clone)]
pub struct Directory {
    users: Vec<User>,
}

impl Directory {
    pub fn new(users: Vec<User>) -> Self {
        Directory { users }
    }

    pub fn find_by_email(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|u| u.email == email)
    }

    pub fn find_by_token(&self, token: &str) -> Option<&User> {
        self.users.iter().find(|u| u.token == token)
    }

    pub fn find_by_id(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_email_and_token() {
        let dir = Directory::new(vec![User {
            id: "u1".into(),
            name: "Alice".into(),
            email: "alice@example.com".into(),
            token: "tok-alice".into(),
        }]);

        assert_eq!(dir.find_by_email("alice@example.com").unwrap().id, "u1");
        assert_eq!(dir.find_by_token("tok-alice").unwrap().id, "u1");
        assert!(dir.find_by_email("bob@example.com").is_none());
    }
}
