use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use crate::assessment::domain::{
    AssessmentId, AssessmentRecord, NewAssessment, QuestionnaireAnswers, Submission,
};
use crate::assessment::repository::{
    AssessmentRepository, MailError, Notifier, OutboundEmail, RepositoryError,
};
use crate::assessment::AssessmentService;

pub(super) const SENDER: &str = "AI Readiness <assessments@localhost>";

pub(super) fn submission() -> Submission {
    Submission {
        name: Some("Ada".to_string()),
        email: Some("ada@x.com".to_string()),
        company: Some("Acme".to_string()),
        role: Some("CTO".to_string()),
        industry: Some("tech".to_string()),
        answers: QuestionnaireAnswers {
            company_size: Some("small".to_string()),
            ai_level: Some("basic".to_string()),
            data_infrastructure: Some("good".to_string()),
            objectives: vec!["a".to_string(), "b".to_string()],
            timeline: Some("short".to_string()),
            budget: Some("50k-100k".to_string()),
        },
    }
}

pub(super) fn answers(
    ai_level: Option<&str>,
    data_infrastructure: Option<&str>,
    objectives: usize,
    timeline: Option<&str>,
    company_size: Option<&str>,
) -> QuestionnaireAnswers {
    QuestionnaireAnswers {
        company_size: company_size.map(str::to_string),
        ai_level: ai_level.map(str::to_string),
        data_infrastructure: data_infrastructure.map(str::to_string),
        objectives: (0..objectives).map(|idx| format!("objective-{idx}")).collect(),
        timeline: timeline.map(str::to_string),
        budget: None,
    }
}

#[derive(Default)]
pub(super) struct MemoryRepository {
    records: Mutex<BTreeMap<i64, AssessmentRecord>>,
    reject_status_updates: bool,
}

impl MemoryRepository {
    pub(super) fn rejecting_status_updates() -> Self {
        Self {
            reject_status_updates: true,
            ..Self::default()
        }
    }

    pub(super) fn records(&self) -> Vec<AssessmentRecord> {
        self.records
            .lock()
            .expect("repository mutex poisoned")
            .values()
            .cloned()
            .collect()
    }
}

impl AssessmentRepository for MemoryRepository {
    fn insert(&self, assessment: NewAssessment) -> Result<AssessmentId, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let id = AssessmentId(guard.len() as i64 + 1);
        guard.insert(
            id.0,
            AssessmentRecord {
                id,
                respondent: assessment.respondent,
                answers: assessment.answers,
                score: assessment.score,
                level: assessment.level,
                metadata: assessment.metadata,
                notification_sent: false,
                created_at: Utc::now(),
            },
        );
        Ok(id)
    }

    fn mark_notification_sent(&self, id: &AssessmentId) -> Result<(), RepositoryError> {
        if self.reject_status_updates {
            return Err(RepositoryError::Storage("database is locked".to_string()));
        }
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let record = guard.get_mut(&id.0).ok_or(RepositoryError::NotFound)?;
        record.notification_sent = true;
        Ok(())
    }

    fn fetch(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(&id.0).cloned())
    }
}

pub(super) struct UnavailableRepository;

impl AssessmentRepository for UnavailableRepository {
    fn insert(&self, _assessment: NewAssessment) -> Result<AssessmentId, RepositoryError> {
        Err(RepositoryError::Storage("disk I/O error".to_string()))
    }

    fn mark_notification_sent(&self, _id: &AssessmentId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Storage("disk I/O error".to_string()))
    }

    fn fetch(&self, _id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError> {
        Err(RepositoryError::Storage("disk I/O error".to_string()))
    }
}

#[derive(Default)]
pub(super) struct MemoryNotifier {
    sent: Mutex<Vec<OutboundEmail>>,
}

impl MemoryNotifier {
    pub(super) fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().expect("notifier mutex poisoned").clone()
    }
}

#[async_trait]
impl Notifier for MemoryNotifier {
    async fn send(&self, email: OutboundEmail) -> Result<(), MailError> {
        self.sent.lock().expect("notifier mutex poisoned").push(email);
        Ok(())
    }
}

#[derive(Default)]
pub(super) struct FailingNotifier {
    attempts: Mutex<usize>,
}

impl FailingNotifier {
    pub(super) fn attempts(&self) -> usize {
        *self.attempts.lock().expect("notifier mutex poisoned")
    }
}

#[async_trait]
impl Notifier for FailingNotifier {
    async fn send(&self, _email: OutboundEmail) -> Result<(), MailError> {
        *self.attempts.lock().expect("notifier mutex poisoned") += 1;
        Err(MailError::Transport("connection refused".to_string()))
    }
}

pub(super) fn service<R, N>(repository: Arc<R>, notifier: Arc<N>) -> Arc<AssessmentService<R, N>>
where
    R: AssessmentRepository + 'static,
    N: Notifier + 'static,
{
    Arc::new(AssessmentService::new(repository, notifier, SENDER))
}
