//! Brand profiles stored as `<dir>/<channel>_brand_voice.json`.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::domain::errors::{WorkflowError, WorkflowResult};
use crate::domain::models::BrandProfile;
use crate::domain::ports::BrandProfileProvider;

#[derive(Debug, Clone)]
pub struct FileBrandProfileProvider {
    dir: PathBuf,
}

impl FileBrandProfileProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Location of the profile for `channel`. The channel is lowercased.
    pub fn profile_path(&self, channel: &str) -> PathBuf {
        self.dir
            .join(format!("{}_brand_voice.json", channel.trim().to_lowercase()))
    }
}

#[async_trait]
impl BrandProfileProvider for FileBrandProfileProvider {
    async fn load(&self, channel: &str) -> WorkflowResult<BrandProfile> {
        let path = self.profile_path(channel);
        debug!(channel, path = %path.display(), "Loading brand profile");

        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(WorkflowError::ProfileNotFound {
                    channel: channel.to_string(),
                    path: path.display().to_string(),
                });
            }
            Err(e) => {
                return Err(WorkflowError::ProfileInvalid {
                    channel: channel.to_string(),
                    reason: format!("cannot read {}: {e}", path.display()),
                });
            }
        };

        BrandProfile::from_json_str(channel, &raw)
    }
}
