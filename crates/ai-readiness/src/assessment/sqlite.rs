//! SQLite-backed assessment store.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::warn;

use super::domain::{
    AssessmentId, AssessmentRecord, NewAssessment, QuestionnaireAnswers, ReadinessLevel,
    RequestMetadata, Respondent,
};
use super::repository::{AssessmentRepository, RepositoryError};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS assessments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    company TEXT NOT NULL,
    role TEXT NOT NULL,
    industry TEXT NOT NULL,
    company_size TEXT,
    ai_level TEXT,
    data_infrastructure TEXT,
    objectives TEXT NOT NULL DEFAULT '[]',
    timeline TEXT,
    budget TEXT,
    score INTEGER NOT NULL,
    readiness_level TEXT NOT NULL,
    session_id TEXT,
    user_agent TEXT,
    ip_address TEXT,
    email_sent INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_assessments_email ON assessments(email);
CREATE INDEX IF NOT EXISTS idx_assessments_created_at ON assessments(created_at);
"#;

const SELECT_COLUMNS: &str = "id, name, email, company, role, industry, company_size, ai_level, \
     data_infrastructure, objectives, timeline, budget, score, readiness_level, session_id, \
     user_agent, ip_address, email_sent, created_at";

#[derive(Clone)]
pub struct SqliteAssessmentRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteAssessmentRepository {
    pub fn open(path: &Path) -> Result<Self, RepositoryError> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|err| RepositoryError::Storage(err.to_string()))?;
        }
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    pub fn in_memory() -> Result<Self, RepositoryError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    pub fn from_connection(conn: Connection) -> Result<Self, RepositoryError> {
        if let Err(err) = conn.execute_batch("PRAGMA journal_mode = WAL;") {
            warn!(error = %err, "could not enable WAL journal; using default journal mode");
        }
        conn.busy_timeout(std::time::Duration::from_millis(5000))?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// The guard is the unit of acquisition: it is released when the calling scope ends.
    fn connection(&self) -> Result<MutexGuard<'_, Connection>, RepositoryError> {
        self.conn
            .lock()
            .map_err(|_| RepositoryError::Storage("connection mutex poisoned".to_string()))
    }
}

impl AssessmentRepository for SqliteAssessmentRepository {
    fn insert(&self, assessment: NewAssessment) -> Result<AssessmentId, RepositoryError> {
        let NewAssessment {
            respondent,
            answers,
            score,
            level,
            metadata,
        } = assessment;
        let objectives = serde_json::to_string(&answers.objectives)
            .map_err(|err| RepositoryError::Encoding(err.to_string()))?;
        let created_at = Utc::now();

        let conn = self.connection()?;
        conn.execute(
            "INSERT INTO assessments (name, email, company, role, industry, company_size, \
             ai_level, data_infrastructure, objectives, timeline, budget, score, readiness_level, \
             session_id, user_agent, ip_address, email_sent, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, 0, ?17)",
            params![
                respondent.name,
                respondent.email,
                respondent.company,
                respondent.role,
                respondent.industry,
                answers.company_size,
                answers.ai_level,
                answers.data_infrastructure,
                objectives,
                answers.timeline,
                answers.budget,
                i64::from(score),
                level.label(),
                metadata.session_id,
                metadata.user_agent,
                metadata.ip_address,
                created_at,
            ],
        )?;

        Ok(AssessmentId(conn.last_insert_rowid()))
    }

    fn mark_notification_sent(&self, id: &AssessmentId) -> Result<(), RepositoryError> {
        let conn = self.connection()?;
        let updated = conn.execute(
            "UPDATE assessments SET email_sent = 1 WHERE id = ?1",
            params![id.0],
        )?;
        if updated == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    fn fetch(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError> {
        let conn = self.connection()?;
        let sql = format!("SELECT {SELECT_COLUMNS} FROM assessments WHERE id = ?1");
        let row = conn
            .query_row(&sql, params![id.0], StoredRow::from_row)
            .optional()?;
        row.map(StoredRow::into_record).transpose()
    }
}

struct StoredRow {
    id: i64,
    respondent: Respondent,
    company_size: Option<String>,
    ai_level: Option<String>,
    data_infrastructure: Option<String>,
    objectives: String,
    timeline: Option<String>,
    budget: Option<String>,
    score: i64,
    readiness_level: String,
    metadata: RequestMetadata,
    email_sent: bool,
    created_at: DateTime<Utc>,
}

impl StoredRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            respondent: Respondent {
                name: row.get(1)?,
                email: row.get(2)?,
                company: row.get(3)?,
                role: row.get(4)?,
                industry: row.get(5)?,
            },
            company_size: row.get(6)?,
            ai_level: row.get(7)?,
            data_infrastructure: row.get(8)?,
            objectives: row.get(9)?,
            timeline: row.get(10)?,
            budget: row.get(11)?,
            score: row.get(12)?,
            readiness_level: row.get(13)?,
            metadata: RequestMetadata {
                session_id: row.get(14)?,
                user_agent: row.get(15)?,
                ip_address: row.get(16)?,
            },
            email_sent: row.get(17)?,
            created_at: row.get(18)?,
        })
    }

    fn into_record(self) -> Result<AssessmentRecord, RepositoryError> {
        let objectives: Vec<String> = serde_json::from_str(&self.objectives)
            .map_err(|err| RepositoryError::Encoding(err.to_string()))?;
        let score = u8::try_from(self.score)
            .map_err(|_| RepositoryError::Encoding(format!("score {} out of range", self.score)))?;
        let level = ReadinessLevel::from_label(&self.readiness_level).ok_or_else(|| {
            RepositoryError::Encoding(format!(
                "unknown readiness level '{}'",
                self.readiness_level
            ))
        })?;

        Ok(AssessmentRecord {
            id: AssessmentId(self.id),
            respondent: self.respondent,
            answers: QuestionnaireAnswers {
                company_size: self.company_size,
                ai_level: self.ai_level,
                data_infrastructure: self.data_infrastructure,
                objectives,
                timeline: self.timeline,
                budget: self.budget,
            },
            score,
            level,
            metadata: self.metadata,
            notification_sent: self.email_sent,
            created_at: self.created_at,
        })
    }
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(value: rusqlite::Error) -> Self {
        RepositoryError::Storage(value.to_string())
    }
}
