use async_trait::async_trait;

use crate::error::Result;

/// Produces a rendered listing page with the booking calendar open.
#[async_trait]
pub trait PageRenderer: Send + Sync {
    /// Best-effort snapshot of `url` paged towards `target_month` (e.g. "June 2025").
    ///
    /// The returned markup may not contain the target month; callers must
    /// tolerate that. Any browser session opened here is closed before returning.
    async fn fetch_snapshot(&self, url: &str, target_month: &str) -> Result<String>;
}
