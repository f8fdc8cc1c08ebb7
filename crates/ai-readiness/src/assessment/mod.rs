//! Readiness assessment intake: validation, scoring, tier templates, persistence, and the
//! best-effort notification that follows a stored submission.

pub mod domain;
pub mod mail;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod sqlite;
pub mod templates;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    AssessmentId, AssessmentReceipt, AssessmentRecord, AssessmentStatusView, NewAssessment,
    QuestionnaireAnswers, ReadinessLevel, RequestMetadata, Respondent, Submission,
    ValidatedSubmission,
};
pub use mail::{HttpMailNotifier, MailTransport};
pub use repository::{
    AssessmentRepository, MailError, Notifier, OutboundEmail, RepositoryError,
};
pub use router::assessment_router;
pub use scoring::{calculate_score, classify, ScoreBreakdown};
pub use service::{
    assess, AssessmentService, AssessmentServiceError, NotificationError, ScoredSubmission,
};
pub use sqlite::SqliteAssessmentRepository;
pub use templates::{select_template, select_template_for_label, NotificationContent};
pub use validation::{validate, RequiredField, ValidationError};
