//! In-memory stores for occurrences and resources.
//!
//! The event store is the unit of atomicity for scheduling: a batch of
//! expanded occurrences is validated, conflict-checked and inserted while a
//! single write lock is held, so either the whole batch becomes visible or
//! none of it does, and two racing create requests for the same resource
//! serialize instead of both passing the conflict check.

use parking_lot::RwLock;

use crate::conflict::find_conflict;
use crate::error::{CalbookError, CalbookResult};
use crate::event::{InviteStatus, Occurrence};
use crate::invitation;
use crate::resource::Resource;

/// Persisted occurrences, in creation order.
#[derive(Debug, Default)]
pub struct EventStore {
    occurrences: RwLock<Vec<Occurrence>>,
}

impl EventStore {
    pub fn new() -> Self {
        EventStore::default()
    }

    /// Persist an already-expanded batch of occurrences, all or nothing.
    ///
    /// Every occurrence is validated (title, interval, resource existence)
    /// and conflict-checked against both the stored occurrences and the
    /// earlier members of the same batch before anything is inserted. The
    /// write lock spans check and insert, which closes the window where two
    /// concurrent requests could both see the resource as free.
    pub fn create_batch(
        &self,
        batch: Vec<Occurrence>,
        resources: &ResourceStore,
    ) -> CalbookResult<Vec<Occurrence>> {
        let mut stored = self.occurrences.write();

        for (i, occ) in batch.iter().enumerate() {
            occ.validate()?;

            if let Some(resource_id) = &occ.resource {
                resources.require(resource_id).map_err(|_| {
                    CalbookError::Validation(format!("unknown resource '{resource_id}'"))
                })?;

                let earlier_in_batch = &batch[..i];
                if let Some(hit) = find_conflict(
                    stored.iter().chain(earlier_in_batch),
                    resource_id,
                    occ.start,
                    occ.end,
                ) {
                    return Err(CalbookError::Conflict(format!(
                        "resource '{resource_id}' is already booked by '{}' from {} to {}",
                        hit.title, hit.start, hit.end
                    )));
                }
            }
        }

        stored.extend(batch.iter().cloned());
        Ok(batch)
    }

    /// Occurrences the user owns or is invited to, in creation order.
    pub fn list_for_user(&self, user: &str) -> Vec<Occurrence> {
        self.occurrences
            .read()
            .iter()
            .filter(|occ| occ.visible_to(user))
            .cloned()
            .collect()
    }

    /// Every occurrence holding a given resource.
    pub fn list_for_resource(&self, resource: &str) -> Vec<Occurrence> {
        self.occurrences
            .read()
            .iter()
            .filter(|occ| occ.resource.as_deref() == Some(resource))
            .cloned()
            .collect()
    }

    /// Delete exactly one occurrence. Owner only; deleting a whole series
    /// takes one call per occurrence.
    pub fn delete(&self, id: &str, caller: &str) -> CalbookResult<()> {
        let mut stored = self.occurrences.write();

        let pos = stored
            .iter()
            .position(|occ| occ.id == id)
            .ok_or_else(|| CalbookError::NotFound(format!("event '{id}'")))?;

        if stored[pos].created_by != caller {
            return Err(CalbookError::Authorization(
                "only the event owner may delete it".into(),
            ));
        }

        stored.remove(pos);
        Ok(())
    }

    /// Record an invitee's response on one occurrence.
    pub fn respond(
        &self,
        id: &str,
        caller: &str,
        status: InviteStatus,
    ) -> CalbookResult<Occurrence> {
        let mut stored = self.occurrences.write();

        let occ = stored
            .iter_mut()
            .find(|occ| occ.id == id)
            .ok_or_else(|| CalbookError::NotFound(format!("event '{id}'")))?;

        invitation::respond(occ, caller, status)?;
        Ok(occ.clone())
    }
}

/// Registered bookable resources.
#[derive(Debug, Default)]
pub struct ResourceStore {
    resources: RwLock<Vec<Resource>>,
}

impl ResourceStore {
    pub fn new() -> Self {
        ResourceStore::default()
    }

    /// Register a resource. Names are unique.
    pub fn create(&self, resource: Resource) -> CalbookResult<Resource> {
        let mut stored = self.resources.write();

        if stored.iter().any(|r| r.name == resource.name) {
            return Err(CalbookError::Validation(format!(
                "resource name '{}' already exists",
                resource.name
            )));
        }

        stored.push(resource.clone());
        Ok(resource)
    }

    pub fn list(&self) -> Vec<Resource> {
        self.resources.read().clone()
    }

    pub fn get(&self, id: &str) -> Option<Resource> {
        self.resources.read().iter().find(|r| r.id == id).cloned()
    }

    pub fn require(&self, id: &str) -> CalbookResult<Resource> {
        self.get(id)
            .ok_or_else(|| CalbookError::NotFound(format!("resource '{id}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::InvitedUser;
    use chrono::{DateTime, TimeZone, Utc};
    use std::sync::{Arc, Barrier};

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 20, h, m, 0).unwrap()
    }

    fn booked(
        title: &str,
        owner: &str,
        resource: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Occurrence {
        let mut occ = Occurrence::new(title, start, end, owner);
        occ.resource = Some(resource.to_string());
        occ
    }

    fn room(resources: &ResourceStore) -> Resource {
        resources
            .create(Resource::new("Conference Room", "room"))
            .unwrap()
    }

    #[test]
    fn test_disjoint_bookings_on_same_resource_both_succeed() {
        let events = EventStore::new();
        let resources = ResourceStore::new();
        let room = room(&resources);

        let first = booked("First", "u1", &room.id, at(9, 0), at(10, 0));
        let second = booked("Second", "u2", &room.id, at(10, 0), at(11, 0));

        events.create_batch(vec![first], &resources).unwrap();
        events.create_batch(vec![second], &resources).unwrap();
        assert_eq!(events.list_for_resource(&room.id).len(), 2);
    }

    #[test]
    fn test_overlapping_booking_is_rejected_with_conflict() {
        let events = EventStore::new();
        let resources = ResourceStore::new();
        let room = room(&resources);

        let first = booked("First", "u1", &room.id, at(9, 0), at(10, 0));
        events.create_batch(vec![first], &resources).unwrap();

        // Exact containment counts as overlap too.
        let contained = booked("Contained", "u2", &room.id, at(9, 15), at(9, 45));
        let err = events.create_batch(vec![contained], &resources);
        assert!(matches!(err, Err(CalbookError::Conflict(_))));
        assert_eq!(events.list_for_resource(&room.id).len(), 1);
    }

    #[test]
    fn test_batch_is_all_or_nothing() {
        let events = EventStore::new();
        let resources = ResourceStore::new();
        let room = room(&resources);

        let mut bad = booked("Bad", "u1", &room.id, at(10, 0), at(11, 0));
        bad.title = String::new(); // fails validation

        let batch = vec![booked("Good", "u1", &room.id, at(9, 0), at(10, 0)), bad];
        assert!(events.create_batch(batch, &resources).is_err());
        assert!(events.list_for_user("u1").is_empty());
    }

    #[test]
    fn test_batch_members_conflict_with_each_other() {
        let events = EventStore::new();
        let resources = ResourceStore::new();
        let room = room(&resources);

        let batch = vec![
            booked("A", "u1", &room.id, at(9, 0), at(12, 0)),
            booked("B", "u1", &room.id, at(10, 0), at(11, 0)),
        ];
        assert!(matches!(
            events.create_batch(batch, &resources),
            Err(CalbookError::Conflict(_))
        ));
        assert!(events.list_for_resource(&room.id).is_empty());
    }

    #[test]
    fn test_unknown_resource_is_a_validation_error() {
        let events = EventStore::new();
        let resources = ResourceStore::new();

        let occ = booked("Ghost room", "u1", "no-such-id", at(9, 0), at(10, 0));
        assert!(matches!(
            events.create_batch(vec![occ], &resources),
            Err(CalbookError::Validation(_))
        ));
    }

    #[test]
    fn test_list_for_user_covers_owner_and_invitee() {
        let events = EventStore::new();
        let resources = ResourceStore::new();

        let mut occ = Occurrence::new("Planning", at(9, 0), at(10, 0), "owner");
        occ.invited_users.push(InvitedUser {
            user: "guest".to_string(),
            status: InviteStatus::Pending,
        });
        events.create_batch(vec![occ], &resources).unwrap();

        assert_eq!(events.list_for_user("owner").len(), 1);
        assert_eq!(events.list_for_user("guest").len(), 1);
        assert!(events.list_for_user("stranger").is_empty());
    }

    #[test]
    fn test_delete_by_non_owner_leaves_occurrence_intact() {
        let events = EventStore::new();
        let resources = ResourceStore::new();

        let occ = Occurrence::new("Private", at(9, 0), at(10, 0), "owner");
        let id = occ.id.clone();
        events.create_batch(vec![occ], &resources).unwrap();

        let err = events.delete(&id, "intruder");
        assert!(matches!(err, Err(CalbookError::Authorization(_))));
        assert_eq!(events.list_for_user("owner").len(), 1);

        events.delete(&id, "owner").unwrap();
        assert!(events.list_for_user("owner").is_empty());
    }

    #[test]
    fn test_delete_missing_occurrence_is_not_found() {
        let events = EventStore::new();
        assert!(matches!(
            events.delete("missing", "anyone"),
            Err(CalbookError::NotFound(_))
        ));
    }

    #[test]
    fn test_respond_is_scoped_to_one_occurrence() {
        let events = EventStore::new();
        let resources = ResourceStore::new();

        let mut invited = Occurrence::new("With guest", at(9, 0), at(10, 0), "owner");
        invited.invited_users.push(InvitedUser {
            user: "guest".to_string(),
            status: InviteStatus::Pending,
        });
        let other = Occurrence::new("Without guest", at(11, 0), at(12, 0), "owner");
        let other_id = other.id.clone();
        let invited_id = invited.id.clone();
        events.create_batch(vec![invited, other], &resources).unwrap();

        // Invited elsewhere, but not to this occurrence.
        assert!(matches!(
            events.respond(&other_id, "guest", InviteStatus::Accepted),
            Err(CalbookError::Authorization(_))
        ));

        let updated = events
            .respond(&invited_id, "guest", InviteStatus::Accepted)
            .unwrap();
        assert_eq!(updated.invited_users[0].status, InviteStatus::Accepted);
    }

    #[test]
    fn test_racing_creates_cannot_both_book_the_resource() {
        let events = Arc::new(EventStore::new());
        let resources = Arc::new(ResourceStore::new());
        let room = room(&resources);
        let barrier = Arc::new(Barrier::new(2));

        let handles: Vec<_> = ["u1", "u2"]
            .into_iter()
            .map(|user| {
                let events = Arc::clone(&events);
                let resources = Arc::clone(&resources);
                let barrier = Arc::clone(&barrier);
                let occ = booked("Race", user, &room.id, at(9, 0), at(10, 0));
                std::thread::spawn(move || {
                    barrier.wait();
                    events.create_batch(vec![occ], &resources).is_ok()
                })
            })
            .collect();

        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();

        assert_eq!(successes, 1);
        assert_eq!(events.list_for_resource(&room.id).len(), 1);
    }

    #[test]
    fn test_resource_names_are_unique() {
        let resources = ResourceStore::new();
        resources.create(Resource::new("Room A", "room")).unwrap();
        assert!(matches!(
            resources.create(Resource::new("Room A", "room")),
            Err(CalbookError::Validation(_))
        ));
    }
}
