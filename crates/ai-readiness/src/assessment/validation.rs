use std::fmt;

use serde::Serialize;

use super::domain::{Respondent, Submission, ValidatedSubmission};

/// Fields every submission must carry, in the order they are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredField {
    Name,
    Email,
    Company,
    Role,
    Industry,
}

impl RequiredField {
    pub const ALL: [RequiredField; 5] = [
        RequiredField::Name,
        RequiredField::Email,
        RequiredField::Company,
        RequiredField::Role,
        RequiredField::Industry,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RequiredField::Name => "name",
            RequiredField::Email => "email",
            RequiredField::Company => "company",
            RequiredField::Role => "role",
            RequiredField::Industry => "industry",
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(RequiredField),
}

impl ValidationError {
    pub fn field(&self) -> RequiredField {
        match self {
            ValidationError::MissingField(field) => *field,
        }
    }
}

fn require(value: Option<String>, field: RequiredField) -> Result<String, ValidationError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ValidationError::MissingField(field)),
    }
}

/// Check presence of the required fields and hand back the typed submission.
///
/// Only presence is checked; email shape and category membership are left to scoring.
pub fn validate(submission: Submission) -> Result<ValidatedSubmission, ValidationError> {
    let Submission {
        name,
        email,
        company,
        role,
        industry,
        answers,
    } = submission;

    let respondent = Respondent {
        name: require(name, RequiredField::Name)?,
        email: require(email, RequiredField::Email)?,
        company: require(company, RequiredField::Company)?,
        role: require(role, RequiredField::Role)?,
        industry: require(industry, RequiredField::Industry)?,
    };

    Ok(ValidatedSubmission {
        respondent,
        answers,
    })
}
