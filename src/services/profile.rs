//! User profile service
//!
//! The profile is a single named entry, not a collection. Updates
//! replace it whole and stamp `last_updated`.

use crate::config::collections;
use crate::error::Result;
use crate::models::{ProfileUpdate, UserProfile};
use crate::store::Store;
use chrono::Utc;

#[derive(Clone)]
pub struct ProfileService {
    store: Store,
}

impl ProfileService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// The stored profile, or None when nothing was saved yet. A
    /// corrupt entry is treated the same as none.
    pub async fn get_profile(&self) -> Result<Option<UserProfile>> {
        match self.store.get(collections::PROFILE).await {
            Ok(profile) => Ok(profile),
            Err(err) if err.is_corrupt_data() => {
                tracing::warn!("Recovering profile entry as empty: {}", err);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    pub async fn update_profile(&self, update: ProfileUpdate) -> Result<UserProfile> {
        update.validate()?;

        let profile = UserProfile {
            name: update.name,
            email: update.email,
            bio: update.bio,
            avatar: update.avatar,
            last_updated: Utc::now(),
        };
        self.store.put(collections::PROFILE, &profile).await?;

        tracing::info!("Profile updated for {}", profile.name);
        Ok(profile)
    }
}
