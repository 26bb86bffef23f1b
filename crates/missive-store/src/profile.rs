//! Local user profile updates.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Result, StoreError};
use crate::models::{UserId, UserStatus};
use crate::store::Store;

/// A partial profile update with enumerated fields. `None` leaves the
/// current value in place; there is no free-form merge, so unknown fields
/// are rejected at the serde boundary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileUpdate {
    pub id: Option<UserId>,
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub status: Option<UserStatus>,
}

impl Store {
    /// Merge a [`ProfileUpdate`] into the local profile. Fails with
    /// `InvalidArgument` when the merge would leave the id empty; no other
    /// validation is applied.
    pub fn update_profile(&mut self, update: ProfileUpdate) -> Result<()> {
        if let Some(ref id) = update.id {
            if id.as_str().trim().is_empty() {
                return Err(StoreError::InvalidArgument(
                    "profile id must not be empty".into(),
                ));
            }
        }

        let old_id = self.profile.id.clone();
        if let Some(id) = update.id {
            self.profile.id = id;
        }
        if let Some(name) = update.name {
            self.profile.name = name;
        }
        if let Some(avatar) = update.avatar {
            self.profile.avatar = avatar;
        }
        if let Some(bio) = update.bio {
            self.profile.bio = bio;
        }
        if let Some(status) = update.status {
            self.profile.status = status;
        }

        // Keep the users table pointing at the current profile record.
        self.users.remove(&old_id);
        self.users
            .insert(self.profile.id.clone(), self.profile.clone());

        info!(user = %self.profile.id, "profile updated");
        Ok(())
    }

    /// Replace the local user's status line.
    pub fn set_status(&mut self, status: UserStatus) {
        self.profile.status = status.clone();
        if let Some(user) = self.users.get_mut(&self.profile.id) {
            user.status = status;
        }
    }

    /// Restore the default "Online / Available" status.
    pub fn clear_status(&mut self) {
        self.set_status(UserStatus::online());
    }
}
