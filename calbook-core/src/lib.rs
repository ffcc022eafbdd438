//! Core scheduling logic for calbook.
//!
//! This crate turns one "create event" request into a batch of concrete
//! occurrences: it expands the repeat rule, checks the requested resource for
//! double bookings, resolves invitees against the user directory, and stores
//! the batch so it can later be listed, responded to, deleted and exported as
//! a calendar feed. The HTTP surface lives in `calbook-server`.

pub mod conflict;
pub mod directory;
pub mod error;
pub mod event;
pub mod export;
pub mod ics;
pub mod invitation;
pub mod recurrence;
pub mod resource;
pub mod store;

pub use directory::{Directory, User};
pub use error::{CalbookError, CalbookResult};
pub use event::{Frequency, InviteStatus, InvitedUser, Notification, Occurrence, RepeatRule};
pub use resource::Resource;
pub use store::{EventStore, ResourceStore};
