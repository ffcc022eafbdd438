//! Event occurrence types.
//!
//! An [`Occurrence`] is one concrete, bookable calendar interval. A repeating
//! event request is expanded into a batch of independent occurrences at
//! creation time; the repeat rule is denormalized onto each of them for
//! descriptive purposes only and is never re-expanded afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CalbookError, CalbookResult};

/// One concrete calendar interval, persisted independently of its siblings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Occurrence {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Owner id. Immutable after creation.
    pub created_by: String,
    /// One entry per distinct invitee.
    pub invited_users: Vec<InvitedUser>,
    pub notification: Notification,
    pub repeat: RepeatRule,
    /// Id of the booked resource, if any.
    pub resource: Option<String>,
}

impl Occurrence {
    pub fn new(title: impl Into<String>, start: DateTime<Utc>, end: DateTime<Utc>, owner: impl Into<String>) -> Self {
        Occurrence {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            description: None,
            location: None,
            start,
            end,
            created_by: owner.into(),
            invited_users: Vec::new(),
            notification: Notification::default(),
            repeat: RepeatRule::default(),
            resource: None,
        }
    }

    /// Check the structural invariants that must hold before persistence.
    pub fn validate(&self) -> CalbookResult<()> {
        if self.title.trim().is_empty() {
            return Err(CalbookError::Validation("title is required".into()));
        }
        if self.start >= self.end {
            return Err(CalbookError::Validation(format!(
                "event '{}' must start before it ends",
                self.title
            )));
        }
        Ok(())
    }

    /// Whether `user` may see this occurrence (owner or listed invitee).
    pub fn visible_to(&self, user: &str) -> bool {
        self.created_by == user || self.invited_users.iter().any(|i| i.user == user)
    }
}

/// An invitee entry on an occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvitedUser {
    /// Id of the invited user.
    pub user: String,
    pub status: InviteStatus,
}

/// Response state of a single invitee, independent per occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InviteStatus {
    Pending,
    Accepted,
    Declined,
}

impl InviteStatus {
    /// Parse a response status from its wire form. Only the two terminal
    /// states are valid responses; `pending` is the initial state, not
    /// something an invitee can send.
    pub fn parse_response(s: &str) -> CalbookResult<Self> {
        match s {
            "accepted" => Ok(InviteStatus::Accepted),
            "declined" => Ok(InviteStatus::Declined),
            other => Err(CalbookError::Validation(format!(
                "invalid response status '{other}' (expected 'accepted' or 'declined')"
            ))),
        }
    }
}

/// Notification channel flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub system: bool,
    pub email: bool,
}

/// How an event repeats.
///
/// `days_of_week` uses JS-style indices: 0 = Sunday .. 6 = Saturday.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepeatRule {
    #[serde(default)]
    pub frequency: Frequency,
    #[serde(default)]
    pub days_of_week: Vec<u32>,
    pub day_of_month: Option<u32>,
    pub count: Option<u32>,
    pub until: Option<DateTime<Utc>>,
}

impl RepeatRule {
    pub fn once() -> Self {
        RepeatRule::default()
    }
}

/// Repeat frequency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
    Custom,
}
