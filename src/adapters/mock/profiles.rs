use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

use crate::domain::errors::{WorkflowError, WorkflowResult};
use crate::domain::models::BrandProfile;
use crate::domain::ports::BrandProfileProvider;

/// Profiles held in memory, keyed by lowercased channel.
#[derive(Debug, Default)]
pub struct InMemoryProfileProvider {
    profiles: RwLock<HashMap<String, BrandProfile>>,
    invalid: RwLock<HashMap<String, String>>,
    loads: AtomicUsize,
}

impl InMemoryProfileProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(channel: &str, profile: BrandProfile) -> Self {
        let mut profiles = HashMap::new();
        profiles.insert(channel.to_lowercase(), profile);
        Self {
            profiles: RwLock::new(profiles),
            ..Self::default()
        }
    }

    pub async fn insert(&self, channel: &str, profile: BrandProfile) {
        self.profiles
            .write()
            .await
            .insert(channel.to_lowercase(), profile);
    }

    /// Make `load(channel)` fail with `ProfileInvalid`.
    pub async fn mark_invalid(&self, channel: &str, reason: impl Into<String>) {
        self.invalid
            .write()
            .await
            .insert(channel.to_lowercase(), reason.into());
    }

    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BrandProfileProvider for InMemoryProfileProvider {
    async fn load(&self, channel: &str) -> WorkflowResult<BrandProfile> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        let key = channel.to_lowercase();

        if let Some(reason) = self.invalid.read().await.get(&key) {
            return Err(WorkflowError::ProfileInvalid {
                channel: channel.to_string(),
                reason: reason.clone(),
            });
        }

        self.profiles
            .read()
            .await
            .get(&key)
            .cloned()
            .ok_or_else(|| WorkflowError::ProfileNotFound {
                channel: channel.to_string(),
                path: format!("memory://{key}"),
            })
    }
}
