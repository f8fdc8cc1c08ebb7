//! AI readiness assessment intake: scoring, tier classification, persistence, and
//! best-effort notification of the submitter.

pub mod assessment;
pub mod config;
pub mod error;
pub mod telemetry;
