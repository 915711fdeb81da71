use loan_eligibility::lending::{
    EligibilityPolicy, InMemoryApplicationRepository, InMemoryUserRepository,
    LoanApplicationService,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

pub(crate) type MemoryLoanService =
    LoanApplicationService<InMemoryApplicationRepository, InMemoryUserRepository>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Service backed by process-local stores; records vanish on restart.
pub(crate) fn in_memory_service(policy: EligibilityPolicy) -> Arc<MemoryLoanService> {
    Arc::new(LoanApplicationService::new(
        Arc::new(InMemoryApplicationRepository::default()),
        Arc::new(InMemoryUserRepository::default()),
        policy,
    ))
}
