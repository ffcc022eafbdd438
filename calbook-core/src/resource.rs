//! Bookable resources (rooms, equipment, ...).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A shared bookable entity. At most one occurrence may hold a resource for
/// any given time interval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    /// Unique display name.
    pub name: String,
    /// Free-text type tag (e.g. "room", "projector").
    #[serde(rename = "type")]
    pub kind: String,
}

impl Resource {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Resource {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            kind: kind.into(),
        }
    }
}
