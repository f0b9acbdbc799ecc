use crate::outcome::ResolveOutcome;
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait Redirector: Send + Sync + 'static {
    /// Resolves a raw request path (e.g. `/abc123`) to an outcome.
    async fn resolve(&self, raw_path: &str) -> Result<ResolveOutcome>;
}
