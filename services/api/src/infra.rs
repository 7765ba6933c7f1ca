use metrics_exporter_prometheus::PrometheusHandle;
use recruit_flow::workflows::recruitment::{MemoryRecordStore, RecruitmentService};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Operational state shared by the health, readiness, and metrics endpoints.
#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type InMemoryRecruitmentService = RecruitmentService<MemoryRecordStore>;

pub(crate) fn in_memory_service() -> Arc<InMemoryRecruitmentService> {
    let store = Arc::new(MemoryRecordStore::new());
    Arc::new(RecruitmentService::new(store))
}
