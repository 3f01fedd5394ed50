//! Group chat creation and deletion.

use uuid::Uuid;

use nattstad_shared::GroupChat;

use crate::commands::lock;
use crate::error::CommandError;
use crate::state::SharedState;

/// Create a group owned by the session user. VIP-only; needs a name and at
/// least one invited member. The owner is always the first member and the
/// member list is deduplicated, so the owner-in-members invariant holds by
/// construction.
pub fn create_group(
    state: &SharedState,
    name: &str,
    member_ids: &[Uuid],
) -> Result<GroupChat, CommandError> {
    let mut guard = lock(state)?;
    let me = guard.current_user().cloned().ok_or(CommandError::NotLoggedIn)?;

    if !me.is_vip {
        return Err(CommandError::VipRequiredForGroups);
    }
    if name.trim().is_empty() {
        return Err(CommandError::GroupNameMissing);
    }
    if member_ids.is_empty() {
        return Err(CommandError::NoMembersSelected);
    }

    let mut members = vec![me.id];
    for id in member_ids {
        if !members.contains(id) {
            members.push(*id);
        }
    }

    let group = GroupChat {
        id: Uuid::new_v4(),
        name: name.to_string(),
        members,
        owner_id: me.id,
    };
    guard.add_group(group.clone());
    guard.notify(format!("Gruppen \"{}\" har skapats! 🎉", group.name));

    tracing::info!(group = %group.id, owner = %me.id, "group created");
    Ok(group)
}

/// Delete a group by id.
pub fn delete_group(state: &SharedState, id: Uuid) -> Result<bool, CommandError> {
    Ok(lock(state)?.delete_group(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{sample_user, shared_with_session};

    #[test]
    fn group_creation_is_vip_gated() {
        let user = sample_user("ada");
        let state = shared_with_session(&user);

        assert_eq!(
            create_group(&state, "Nattugglor", &[Uuid::new_v4()]).unwrap_err(),
            CommandError::VipRequiredForGroups
        );
        assert!(state.lock().unwrap().groups().is_empty());
    }

    #[test]
    fn owner_is_a_member_and_duplicates_collapse() {
        let mut user = sample_user("ada");
        user.is_vip = true;
        let state = shared_with_session(&user);

        let friend = Uuid::new_v4();
        let group = create_group(&state, "Nattugglor", &[friend, friend, user.id]).unwrap();

        assert_eq!(group.owner_id, user.id);
        assert_eq!(group.members, vec![user.id, friend]);
        assert!(group.members.contains(&group.owner_id));

        let guard = state.lock().unwrap();
        assert_eq!(guard.groups().len(), 1);
        assert_eq!(
            guard.flags().global_notification.as_deref(),
            Some("Gruppen \"Nattugglor\" har skapats! 🎉")
        );
    }

    #[test]
    fn name_and_members_are_required() {
        let mut user = sample_user("ada");
        user.is_vip = true;
        let state = shared_with_session(&user);

        assert_eq!(
            create_group(&state, "  ", &[Uuid::new_v4()]).unwrap_err(),
            CommandError::GroupNameMissing
        );
        assert_eq!(
            create_group(&state, "Nattugglor", &[]).unwrap_err(),
            CommandError::NoMembersSelected
        );
    }

    #[test]
    fn groups_can_be_deleted_by_id() {
        let mut user = sample_user("ada");
        user.is_vip = true;
        let state = shared_with_session(&user);

        let group = create_group(&state, "Nattugglor", &[Uuid::new_v4()]).unwrap();
        assert!(delete_group(&state, group.id).unwrap());
        assert!(!delete_group(&state, group.id).unwrap());
    }
}
