//! Server configuration.
//!
//! Loaded from a TOML file (default `calbook.toml`, overridable via the
//! `CALBOOK_CONFIG` environment variable). The user directory is seeded from
//! here: calbook verifies bearer tokens by lookup only, it does not issue
//! them.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use calbook_core::{Directory, User};

pub const DEFAULT_PORT: u16 = 4280;

fn default_port() -> u16 {
    DEFAULT_PORT
}

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    /// Registered users, each with the bearer token the server accepts.
    #[serde(default)]
    pub users: Vec<UserEntry>,
}

#[derive(Debug, Deserialize)]
pub struct UserEntry {
    pub id: String,
    pub name: String,
    pub email: String,
    pub token: String,
}

impl ServerConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let config: ServerConfig = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;
        Ok(config)
    }

    pub fn directory(&self) -> Directory {
        let users = self
            .users
            .iter()
            .map(|u| User {
                id: u.id.clone(),
                name: u.name.clone(),
                email: u.email.clone(),
                token: u.token.clone(),
            })
            .collect();
        Directory::new(users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config_with_users() {
        let raw = r#"
            port = 8080

            [[users]]
            id = "u1"
            name = "Alice"
            email = "alice@example.com"
            token = "tok-alice"
        "#;
        let config: ServerConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.port, 8080);
        let dir = config.directory();
        assert_eq!(dir.find_by_token("tok-alice").unwrap().id, "u1");
    }

    #[test]
    fn test_port_defaults_when_missing() {
        let config: ServerConfig = toml::from_str("").unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(config.users.is_empty());
    }
}
