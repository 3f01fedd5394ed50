//! Friend requests, acceptance and removal.
//!
//! Both sides of a friendship live on the two user records, so every
//! mutation here runs as a single pass over the master list -- a half-applied
//! acceptance can never be observed or persisted.

use uuid::Uuid;

use nattstad_shared::constants::{FRIEND_LIMIT, FRIEND_LIMIT_VIP};
use nattstad_shared::UserProfile;

use crate::commands::lock;
use crate::error::CommandError;
use crate::state::SharedState;

fn friend_limit(user: &UserProfile) -> usize {
    if user.is_vip {
        FRIEND_LIMIT_VIP
    } else {
        FRIEND_LIMIT
    }
}

/// Ask `target_id` to be friends. Rejected -- with no mutation anywhere --
/// when a request is already outstanding, the two are already friends, or
/// the sender is at their friend limit.
pub fn send_friend_request(state: &SharedState, target_id: Uuid) -> Result<(), CommandError> {
    let mut guard = lock(state)?;
    let me = guard.current_user().cloned().ok_or(CommandError::NotLoggedIn)?;
    let target = guard
        .find_user(target_id)
        .cloned()
        .ok_or(CommandError::UserNotFound)?;

    if target.pending_requests.contains(&me.id) {
        return Err(CommandError::RequestAlreadySent);
    }
    if me.friends.contains(&target_id) {
        return Err(CommandError::AlreadyFriends);
    }
    if me.friends.len() >= friend_limit(&me) {
        return Err(CommandError::FriendLimitReached);
    }

    guard.update_users(|users| {
        if let Some(u) = users.iter_mut().find(|u| u.id == target_id) {
            if !u.pending_requests.contains(&me.id) {
                u.pending_requests.push(me.id);
            }
        }
    });
    guard.notify("Vänförfrågan skickad! 📨");
    Ok(())
}

/// Accept an incoming request: both records gain each other exactly once
/// and the pending entry disappears, all in one pass.
pub fn accept_friend_request(state: &SharedState, requester_id: Uuid) -> Result<(), CommandError> {
    let mut guard = lock(state)?;
    let me = guard.current_user().cloned().ok_or(CommandError::NotLoggedIn)?;
    if guard.find_user(requester_id).is_none() {
        return Err(CommandError::UserNotFound);
    }

    guard.update_users(|users| {
        for u in users.iter_mut() {
            if u.id == me.id {
                if !u.friends.contains(&requester_id) {
                    u.friends.push(requester_id);
                }
                u.pending_requests.retain(|id| *id != requester_id);
            } else if u.id == requester_id && !u.friends.contains(&me.id) {
                u.friends.push(me.id);
            }
        }
    });
    guard.notify("Vänförfrågan accepterad! 🎉");
    Ok(())
}

/// Turn down an incoming request.
pub fn decline_friend_request(state: &SharedState, requester_id: Uuid) -> Result<(), CommandError> {
    let mut guard = lock(state)?;
    let me = guard.current_user().cloned().ok_or(CommandError::NotLoggedIn)?;
    guard.update_users(|users| {
        if let Some(u) = users.iter_mut().find(|u| u.id == me.id) {
            u.pending_requests.retain(|id| *id != requester_id);
        }
    });
    Ok(())
}

/// Remove a confirmed friend from both sides.
pub fn remove_friend(state: &SharedState, target_id: Uuid) -> Result<(), CommandError> {
    let mut guard = lock(state)?;
    let me = guard.current_user().cloned().ok_or(CommandError::NotLoggedIn)?;
    guard.update_users(|users| {
        for u in users.iter_mut() {
            if u.id == me.id {
                u.friends.retain(|id| *id != target_id);
            } else if u.id == target_id {
                u.friends.retain(|id| *id != me.id);
            }
        }
    });
    guard.notify("Vän borttagen.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use crate::testutil::sample_user;

    fn two_user_state() -> (SharedState, UserProfile, UserProfile) {
        let ada = sample_user("ada");
        let bob = sample_user("bob");
        let mut state = AppState::in_memory();
        state.update_users(|users| {
            users.push(ada.clone());
            users.push(bob.clone());
        });
        state.set_current_user(Some(ada.clone()));
        (state.into_shared(), ada, bob)
    }

    fn login_as(state: &SharedState, user_id: Uuid) {
        let mut guard = state.lock().unwrap();
        let user = guard.find_user(user_id).cloned().unwrap();
        guard.set_current_user(Some(user));
    }

    #[test]
    fn request_then_accept_builds_a_mutual_friendship() {
        let (state, ada, bob) = two_user_state();

        // ada already has a couple of friends; that changes nothing here
        state.lock().unwrap().update_users(|users| {
            if let Some(u) = users.iter_mut().find(|u| u.id == ada.id) {
                u.friends = vec![Uuid::new_v4(), Uuid::new_v4()];
            }
        });

        send_friend_request(&state, bob.id).unwrap();
        {
            let guard = state.lock().unwrap();
            let bob_live = guard.find_user(bob.id).unwrap();
            assert_eq!(bob_live.pending_requests, vec![ada.id]);
            assert_eq!(
                guard.flags().global_notification.as_deref(),
                Some("Vänförfrågan skickad! 📨")
            );
        }

        // bob accepts
        login_as(&state, bob.id);
        accept_friend_request(&state, ada.id).unwrap();

        let guard = state.lock().unwrap();
        let ada_live = guard.find_user(ada.id).unwrap();
        let bob_live = guard.find_user(bob.id).unwrap();
        assert_eq!(ada_live.friends.iter().filter(|id| **id == bob.id).count(), 1);
        assert_eq!(bob_live.friends.iter().filter(|id| **id == ada.id).count(), 1);
        assert!(ada_live.pending_requests.is_empty());
        assert!(bob_live.pending_requests.is_empty());
    }

    #[test]
    fn duplicate_requests_are_rejected() {
        let (state, _ada, bob) = two_user_state();
        send_friend_request(&state, bob.id).unwrap();
        assert_eq!(
            send_friend_request(&state, bob.id).unwrap_err(),
            CommandError::RequestAlreadySent
        );
    }

    #[test]
    fn requesting_an_existing_friend_is_rejected() {
        let (state, ada, bob) = two_user_state();
        state.lock().unwrap().update_users(|users| {
            for u in users.iter_mut() {
                if u.id == ada.id {
                    u.friends.push(bob.id);
                } else if u.id == bob.id {
                    u.friends.push(ada.id);
                }
            }
        });

        assert_eq!(
            send_friend_request(&state, bob.id).unwrap_err(),
            CommandError::AlreadyFriends
        );
    }

    #[test]
    fn friend_limit_rejects_with_no_mutation_at_all() {
        let (state, ada, bob) = two_user_state();
        state.lock().unwrap().update_users(|users| {
            if let Some(u) = users.iter_mut().find(|u| u.id == ada.id) {
                u.friends = (0..FRIEND_LIMIT).map(|_| Uuid::new_v4()).collect();
            }
        });

        let before: Vec<UserProfile> = state.lock().unwrap().users().to_vec();
        assert_eq!(
            send_friend_request(&state, bob.id).unwrap_err(),
            CommandError::FriendLimitReached
        );
        let guard = state.lock().unwrap();
        assert_eq!(guard.users(), before.as_slice());
        assert!(guard.flags().global_notification.is_none());
    }

    #[test]
    fn vip_accounts_get_the_raised_limit() {
        let (state, ada, bob) = two_user_state();
        state.lock().unwrap().update_users(|users| {
            if let Some(u) = users.iter_mut().find(|u| u.id == ada.id) {
                u.is_vip = true;
                u.friends = (0..FRIEND_LIMIT).map(|_| Uuid::new_v4()).collect();
            }
        });

        send_friend_request(&state, bob.id).unwrap();
        assert_eq!(
            state
                .lock()
                .unwrap()
                .find_user(bob.id)
                .unwrap()
                .pending_requests,
            vec![ada.id]
        );
    }

    #[test]
    fn declining_removes_the_pending_entry_only() {
        let (state, ada, bob) = two_user_state();
        send_friend_request(&state, bob.id).unwrap();

        login_as(&state, bob.id);
        decline_friend_request(&state, ada.id).unwrap();

        let guard = state.lock().unwrap();
        assert!(guard.find_user(bob.id).unwrap().pending_requests.is_empty());
        assert!(guard.find_user(bob.id).unwrap().friends.is_empty());
        assert!(guard.find_user(ada.id).unwrap().friends.is_empty());
    }

    #[test]
    fn removing_a_friend_clears_both_sides() {
        let (state, ada, bob) = two_user_state();
        send_friend_request(&state, bob.id).unwrap();
        login_as(&state, bob.id);
        accept_friend_request(&state, ada.id).unwrap();

        remove_friend(&state, ada.id).unwrap();

        let guard = state.lock().unwrap();
        assert!(guard.find_user(ada.id).unwrap().friends.is_empty());
        assert!(guard.find_user(bob.id).unwrap().friends.is_empty());
    }

    #[test]
    fn commands_require_a_session() {
        let (state, _ada, bob) = two_user_state();
        state.lock().unwrap().set_current_user(None);
        assert_eq!(
            send_friend_request(&state, bob.id).unwrap_err(),
            CommandError::NotLoggedIn
        );
    }

    #[test]
    fn unknown_targets_are_reported() {
        let (state, _ada, _bob) = two_user_state();
        assert_eq!(
            send_friend_request(&state, Uuid::new_v4()).unwrap_err(),
            CommandError::UserNotFound
        );
    }
}
