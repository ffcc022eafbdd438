//! Invitee resolution and response tracking.

use tracing::warn;

use crate::directory::Directory;
use crate::error::{CalbookError, CalbookResult};
use crate::event::{InviteStatus, InvitedUser, Occurrence};

/// Resolve invitee contact handles (email addresses) to registered users.
///
/// Handles that do not resolve are dropped without failing the request; this
/// forgiving behavior is inherited from the original wire contract and is
/// surfaced to operators via a warning. Duplicate handles collapse to a
/// single entry. Every resolved invitee starts out `pending`.
pub fn resolve_invitees(directory: &Directory, handles: &[String]) -> Vec<InvitedUser> {
    let mut invitees: Vec<InvitedUser> = Vec::new();

    for handle in handles {
        match directory.find_by_email(handle) {
            Some(user) => {
                if !invitees.iter().any(|i| i.user == user.id) {
                    invitees.push(InvitedUser {
                        user: user.id.clone(),
                        status: InviteStatus::Pending,
                    });
                }
            }
            None => warn!(handle = %handle, "dropping unresolvable invitee"),
        }
    }

    invitees
}

/// Record `caller`'s response on one occurrence.
///
/// Only the addressed invitee may update their own entry; anyone else gets
/// an authorization failure, even if they are invited to other occurrences.
/// Re-responding overwrites the previous status.
pub fn respond(
    occurrence: &mut Occurrence,
    caller: &str,
    status: InviteStatus,
) -> CalbookResult<()> {
    let entry = occurrence
        .invited_users
        .iter_mut()
        .find(|i| i.user == caller)
        .ok_or_else(|| {
            CalbookError::Authorization(format!(
                "user '{caller}' is not invited to event '{}'",
                occurrence.title
            ))
        })?;

    entry.status = status;
    Ok(())
}
