//! Social profiles service
//!
//! Tracked social-media accounts with follower counts and an
//! active/inactive flag. Every mutation bumps `last_updated`.

use crate::config::collections;
use crate::error::Result;
use crate::models::{NewSocialProfile, SocialProfile};
use crate::store::Store;
use chrono::Utc;
use serde::Serialize;

/// Rollup for the social page header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SocialAnalytics {
    pub total_followers: u64,
    pub active_profiles: usize,
}

#[derive(Clone)]
pub struct SocialService {
    store: Store,
}

impl SocialService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn add_profile(&self, new: NewSocialProfile) -> Result<SocialProfile> {
        new.validate()?;

        let id = self.store.next_id(collections::SOCIAL_PROFILES).await?;
        let now = Utc::now();
        let profile = SocialProfile {
            id,
            platform: new.platform,
            username: new.username.clone(),
            url: new.url.clone(),
            followers: new.followers,
            bio: new.bio.clone(),
            is_active: new.is_active,
            date_added: now,
            last_updated: now,
        };

        let stored = profile.clone();
        self.store
            .mutate::<SocialProfile, _, _>(collections::SOCIAL_PROFILES, move |profiles| {
                profiles.push(stored)
            })
            .await?;

        tracing::info!("Created social profile {}: {}", profile.id, profile.username);
        Ok(profile)
    }

    /// Replace a profile, keyed by id; `date_added` survives and
    /// `last_updated` is refreshed. Unknown ids are a silent no-op.
    pub async fn update_profile(
        &self,
        id: u64,
        new: NewSocialProfile,
    ) -> Result<Option<SocialProfile>> {
        new.validate()?;

        self.store
            .mutate::<SocialProfile, _, _>(collections::SOCIAL_PROFILES, move |profiles| {
                let profile = profiles.iter_mut().find(|p| p.id == id)?;
                profile.platform = new.platform;
                profile.username = new.username;
                profile.url = new.url;
                profile.followers = new.followers;
                profile.bio = new.bio;
                profile.is_active = new.is_active;
                profile.last_updated = Utc::now();
                Some(profile.clone())
            })
            .await
    }

    /// Flip the active flag, bumping `last_updated`. Unknown ids are a
    /// silent no-op.
    pub async fn toggle_status(&self, id: u64) -> Result<Option<SocialProfile>> {
        self.store
            .mutate::<SocialProfile, _, _>(collections::SOCIAL_PROFILES, move |profiles| {
                let profile = profiles.iter_mut().find(|p| p.id == id)?;
                profile.is_active = !profile.is_active;
                profile.last_updated = Utc::now();
                Some(profile.clone())
            })
            .await
    }

    pub async fn delete_profile(&self, id: u64) -> Result<()> {
        self.store
            .mutate::<SocialProfile, _, _>(collections::SOCIAL_PROFILES, move |profiles| {
                profiles.retain(|p| p.id != id);
            })
            .await?;

        tracing::info!("Deleted social profile {}", id);
        Ok(())
    }

    pub async fn list_profiles(&self) -> Result<Vec<SocialProfile>> {
        self.store.load_or_default(collections::SOCIAL_PROFILES).await
    }

    /// Total followers across all profiles and the count of active ones.
    pub async fn analytics(&self) -> Result<SocialAnalytics> {
        let profiles = self.list_profiles().await?;
        Ok(SocialAnalytics {
            total_followers: profiles.iter().map(|p| p.followers).sum(),
            active_profiles: profiles.iter().filter(|p| p.is_active).count(),
        })
    }
}
