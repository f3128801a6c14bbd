use anyhow::Result;
use async_trait::async_trait;
use shared::{
    domain::{ContentItem, ContentKind, SubmissionId},
    protocol::ContactSubmission,
};

/// Where a view loads its base collection from.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Every item of `kind`, newest first.
    async fn fetch_all(&self, kind: ContentKind) -> Result<Vec<ContentItem>>;
}

/// Append-only destination for contact form submissions.
#[async_trait]
pub trait ContactSink: Send + Sync {
    async fn insert_contact(&self, submission: &ContactSubmission) -> Result<SubmissionId>;
}
