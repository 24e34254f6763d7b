use reqwest::StatusCode;

pub const REFRESH_PATH: &str = "/token/refresh";

/// A request is re-issued at most this many times after a token refresh.
pub const MAX_AUTH_RETRIES: u8 = 1;

pub(crate) fn is_refresh_path(path: &str) -> bool {
    let without_query = path.split(['?', '#']).next().unwrap_or(path);
    without_query.trim_end_matches('/') == REFRESH_PATH
}

pub(crate) fn should_refresh(status: StatusCode, has_refresh_token: bool, path: &str) -> bool {
    status == StatusCode::UNAUTHORIZED && has_refresh_token && !is_refresh_path(path)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RetryBudget {
    remaining: u8,
}

impl RetryBudget {
    pub(crate) fn new(max: u8) -> Self {
        Self { remaining: max }
    }

    pub(crate) fn try_consume(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }
}
