use async_trait::async_trait;

use crate::domain::errors::WorkflowResult;
use crate::domain::models::BrandProfile;

/// Loads the brand profile for a channel.
///
/// # Errors
/// - `WorkflowError::ProfileNotFound` - no profile exists for the channel
/// - `WorkflowError::ProfileInvalid` - the profile exists but is malformed
#[async_trait]
pub trait BrandProfileProvider: Send + Sync {
    async fn load(&self, channel: &str) -> WorkflowResult<BrandProfile>;
}
