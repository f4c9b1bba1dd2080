//! Authorization-failure handling.
//!
//! The original surface for an expired session is navigation to a login
//! page. That side effect is abstracted behind [`UnauthorizedHandler`] so
//! embedders decide what "go log in again" means for them.

use tracing::warn;

/// Hook invoked after an authorization failure has purged the stored
/// credential. Fired once per 401 response; the failing call still
/// returns its error to the caller afterwards.
pub trait UnauthorizedHandler: Send + Sync {
    /// The session is no longer valid.
    fn session_expired(&self);
}

/// Default handler: announces the login surface the user must be sent to.
pub struct LoginRedirect {
    login_path: String,
}

impl LoginRedirect {
    /// Redirect to the given login route.
    pub fn new(login_path: impl Into<String>) -> Self {
        Self {
            login_path: login_path.into(),
        }
    }

    /// The configured login route.
    pub fn login_path(&self) -> &str {
        &self.login_path
    }
}

impl Default for LoginRedirect {
    fn default() -> Self {
        Self::new("/login")
    }
}

impl UnauthorizedHandler for LoginRedirect {
    fn session_expired(&self) {
        warn!("session expired, redirecting to {}", self.login_path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_redirect_targets_login() {
        assert_eq!(LoginRedirect::default().login_path(), "/login");
    }
}
