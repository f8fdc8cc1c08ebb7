use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::domain::{AssessmentId, AssessmentRecord, NewAssessment};

/// Durable store for scored assessments.
pub trait AssessmentRepository: Send + Sync {
    fn insert(&self, assessment: NewAssessment) -> Result<AssessmentId, RepositoryError>;
    fn mark_notification_sent(&self, id: &AssessmentId) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("storage unavailable: {0}")]
    Storage(String),
    #[error("stored value could not be encoded: {0}")]
    Encoding(String),
}

/// Message handed to the mail transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
}

/// Outbound mail hook; the concrete provider is a configuration concern.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, email: OutboundEmail) -> Result<(), MailError>;
}

/// Mail dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("mail transport is not configured")]
    NotConfigured,
    #[error("mail transport unavailable: {0}")]
    Transport(String),
    #[error("mail provider rejected message with status {status}")]
    Rejected { status: u16 },
}
