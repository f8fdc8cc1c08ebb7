use std::sync::Arc;

use tracing::{debug, error, info, warn};

use super::domain::{
    AssessmentId, AssessmentReceipt, AssessmentRecord, NewAssessment, ReadinessLevel,
    RequestMetadata, Respondent, Submission, ValidatedSubmission,
};
use super::repository::{
    AssessmentRepository, MailError, Notifier, OutboundEmail, RepositoryError,
};
use super::scoring::{calculate_score, classify, ScoreBreakdown};
use super::templates::select_template;
use super::validation::{validate, ValidationError};

pub const CONFIRMATION_MESSAGE: &str =
    "Assessment submitted successfully. Your personalized results are on their way to your inbox.";

/// A validated submission with its score and tier. No I/O has happened yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredSubmission {
    pub submission: ValidatedSubmission,
    pub breakdown: ScoreBreakdown,
    pub level: ReadinessLevel,
}

/// Validate, score and classify a submission.
pub fn assess(submission: Submission) -> Result<ScoredSubmission, ValidationError> {
    let submission = validate(submission)?;
    let breakdown = calculate_score(&submission.answers);
    let level = classify(breakdown.score);
    Ok(ScoredSubmission {
        submission,
        breakdown,
        level,
    })
}

/// What the notification phase needs to know about a persisted assessment.
struct StoredAssessment {
    id: AssessmentId,
    respondent: Respondent,
    score: u8,
    level: ReadinessLevel,
}

/// Pipeline composing validation, scoring, the store, and the notifier.
pub struct AssessmentService<R, N> {
    repository: Arc<R>,
    notifier: Arc<N>,
    sender: String,
}

impl<R, N> AssessmentService<R, N>
where
    R: AssessmentRepository + 'static,
    N: Notifier + 'static,
{
    pub fn new(repository: Arc<R>, notifier: Arc<N>, sender: impl Into<String>) -> Self {
        Self {
            repository,
            notifier,
            sender: sender.into(),
        }
    }

    /// Submit an assessment.
    ///
    /// The result is decided once the record is persisted. Notification runs afterwards and
    /// its failures are logged, never returned.
    pub async fn submit(
        &self,
        submission: Submission,
        metadata: RequestMetadata,
    ) -> Result<AssessmentReceipt, AssessmentServiceError> {
        let stored = self.record(submission, metadata).await?;

        match self.notify(&stored).await {
            Ok(()) => info!(assessment_id = stored.id.0, "assessment notification delivered"),
            Err(err) => warn!(
                assessment_id = stored.id.0,
                error = %err,
                "assessment notification failed; submission kept"
            ),
        }

        Ok(AssessmentReceipt {
            success: true,
            assessment_id: stored.id,
            score: stored.score,
            level: stored.level,
            message: CONFIRMATION_MESSAGE.to_string(),
        })
    }

    /// Fetch a persisted assessment.
    pub async fn get(&self, id: AssessmentId) -> Result<AssessmentRecord, AssessmentServiceError> {
        let repository = Arc::clone(&self.repository);
        let record = tokio::task::spawn_blocking(move || repository.fetch(&id))
            .await
            .map_err(|err| AssessmentServiceError::Unexpected(err.to_string()))??
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    async fn record(
        &self,
        submission: Submission,
        metadata: RequestMetadata,
    ) -> Result<StoredAssessment, AssessmentServiceError> {
        let ScoredSubmission {
            submission,
            breakdown,
            level,
        } = assess(submission)?;
        debug!(?breakdown, level = level.label(), "assessment scored");

        let respondent = submission.respondent.clone();
        let assessment = NewAssessment {
            respondent: submission.respondent,
            answers: submission.answers,
            score: breakdown.score,
            level,
            metadata,
        };

        let repository = Arc::clone(&self.repository);
        let id = tokio::task::spawn_blocking(move || repository.insert(assessment))
            .await
            .map_err(|err| AssessmentServiceError::Unexpected(err.to_string()))?
            .map_err(|err| {
                error!(error = %err, "failed to persist assessment");
                AssessmentServiceError::Persistence(err)
            })?;

        info!(
            assessment_id = id.0,
            score = breakdown.score,
            level = level.label(),
            "assessment recorded"
        );

        Ok(StoredAssessment {
            id,
            respondent,
            score: breakdown.score,
            level,
        })
    }

    async fn notify(&self, stored: &StoredAssessment) -> Result<(), NotificationError> {
        let content = select_template(
            stored.level,
            &stored.respondent.name,
            &stored.respondent.company,
            stored.score,
        );
        let email = OutboundEmail {
            from: self.sender.clone(),
            to: stored.respondent.email.clone(),
            subject: content.subject,
            text: content.body,
        };
        self.notifier.send(email).await?;

        let repository = Arc::clone(&self.repository);
        let id = stored.id;
        tokio::task::spawn_blocking(move || repository.mark_notification_sent(&id))
            .await
            .map_err(|err| RepositoryError::Storage(err.to_string()))??;
        Ok(())
    }
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("failed to persist assessment: {0}")]
    Persistence(#[from] RepositoryError),
    #[error("unexpected failure: {0}")]
    Unexpected(String),
}

/// Failure of the best-effort notification phase. Only ever logged.
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("delivery failed: {0}")]
    Delivery(#[from] MailError),
    #[error("notification status update failed: {0}")]
    StatusUpdate(#[from] RepositoryError),
}
