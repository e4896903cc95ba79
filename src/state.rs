use crate::config::FailurePolicy;
use crate::fetcher::CandleFetcher;
use std::sync::Arc;

/// Process wide state, fixed at startup and shared by every request.
pub struct AppState {
    pub fetcher: CandleFetcher,
    pub failure_policy: FailurePolicy,
}

impl AppState {
    pub fn new(fetcher: CandleFetcher, failure_policy: FailurePolicy) -> Arc<Self> {
        Arc::new(AppState {
            fetcher,
            failure_policy,
        })
    }
}
