mod coordinator;
mod policy;

pub use coordinator::{RefreshCoordinator, RefreshError, RefreshOutcome};
pub use policy::{MAX_AUTH_RETRIES, REFRESH_PATH};

pub(crate) use policy::{should_refresh, RetryBudget};
