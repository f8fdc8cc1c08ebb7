use ai_readiness::assessment::{RepositoryError, SqliteAssessmentRepository};
use ai_readiness::config::DatabaseConfig;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn open_repository(
    config: &DatabaseConfig,
) -> Result<SqliteAssessmentRepository, RepositoryError> {
    if config.is_in_memory() {
        SqliteAssessmentRepository::in_memory()
    } else {
        SqliteAssessmentRepository::open(&config.path)
    }
}
