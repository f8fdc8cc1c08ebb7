use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Store-generated identifier for an accepted assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssessmentId(pub i64);

/// Raw questionnaire payload exactly as received. Required fields are optional here so the
/// validator can name the first one that is missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub name: Option<String>,
    pub email: Option<String>,
    pub company: Option<String>,
    pub role: Option<String>,
    pub industry: Option<String>,
    #[serde(flatten)]
    pub answers: QuestionnaireAnswers,
}

/// Optional scoring inputs. Unrecognized category values are kept verbatim and score as zero.
/// Non-string JSON values are kept as their JSON text rather than rejecting the payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionnaireAnswers {
    #[serde(default, alias = "companySize", deserialize_with = "lenient_text")]
    pub company_size: Option<String>,
    #[serde(default, alias = "aiLevel", deserialize_with = "lenient_text")]
    pub ai_level: Option<String>,
    #[serde(
        default,
        alias = "dataInfrastructure",
        deserialize_with = "lenient_text"
    )]
    pub data_infrastructure: Option<String>,
    #[serde(default, deserialize_with = "lenient_objectives")]
    pub objectives: Vec<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub timeline: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub budget: Option<String>,
}

fn value_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

/// `null` is absent; any other non-string value becomes its JSON text.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(other) => Some(value_text(other)),
    })
}

/// Anything other than an array counts as no objectives.
fn lenient_objectives<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items.into_iter().map(value_text).collect(),
        _ => Vec::new(),
    })
}

/// Identity of the person and organization behind a validated submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Respondent {
    pub name: String,
    pub email: String,
    pub company: String,
    pub role: String,
    pub industry: String,
}

/// Submission whose required fields are known to be present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSubmission {
    pub respondent: Respondent,
    pub answers: QuestionnaireAnswers,
}

/// Four ordered readiness tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ReadinessLevel {
    Foundation,
    Developing,
    Advanced,
    #[serde(rename = "AI-Ready")]
    AiReady,
}

impl ReadinessLevel {
    pub const ALL: [ReadinessLevel; 4] = [
        ReadinessLevel::Foundation,
        ReadinessLevel::Developing,
        ReadinessLevel::Advanced,
        ReadinessLevel::AiReady,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ReadinessLevel::Foundation => "Foundation",
            ReadinessLevel::Developing => "Developing",
            ReadinessLevel::Advanced => "Advanced",
            ReadinessLevel::AiReady => "AI-Ready",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|level| level.label().eq_ignore_ascii_case(label.trim()))
    }
}

/// Request metadata supplied by the transport layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestMetadata {
    pub session_id: Option<String>,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
}

/// Scored submission ready to be written to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAssessment {
    pub respondent: Respondent,
    pub answers: QuestionnaireAnswers,
    pub score: u8,
    pub level: ReadinessLevel,
    pub metadata: RequestMetadata,
}

/// Persisted assessment as read back from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssessmentRecord {
    pub id: AssessmentId,
    pub respondent: Respondent,
    pub answers: QuestionnaireAnswers,
    pub score: u8,
    pub level: ReadinessLevel,
    pub metadata: RequestMetadata,
    pub notification_sent: bool,
    pub created_at: DateTime<Utc>,
}

impl AssessmentRecord {
    pub fn status_view(&self) -> AssessmentStatusView {
        AssessmentStatusView {
            assessment_id: self.id,
            score: self.score,
            level: self.level,
            notification_sent: self.notification_sent,
            created_at: self.created_at,
        }
    }
}

/// Contact-free view exposed by the status endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssessmentStatusView {
    pub assessment_id: AssessmentId,
    pub score: u8,
    pub level: ReadinessLevel,
    pub notification_sent: bool,
    pub created_at: DateTime<Utc>,
}

/// Successful outcome of the submit operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssessmentReceipt {
    pub success: bool,
    pub assessment_id: AssessmentId,
    pub score: u8,
    pub level: ReadinessLevel,
    pub message: String,
}
