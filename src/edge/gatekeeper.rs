//! Edge gatekeeper state machine.
//!
//! One evaluation per inbound request, no retries, no shared state between
//! evaluations. States in order:
//!
//! 1. `PublicPath` — allow-listed path: admit, no cookie inspection.
//! 2. `HasAccess` — access cookie present: admit on presence. The cookie's
//!    Max-Age tracks the token lifetime, so presence approximates validity;
//!    the backend route guard is the authority-verified checkpoint.
//! 3. `NoAccessHasRefresh` — rotate. Success admits with the new pair to
//!    write back; explicit rejection goes to Reject; an indeterminate
//!    outcome follows the configured policy (fail open by default).
//! 4. `NoCredentials` — Reject.
//! 5. `Reject` — redirect to login carrying the original path, clearing
//!    credential cookies that were present so a stale pair cannot loop the
//!    redirect.
//!
//! Two concurrent requests from one browser can race the same refresh
//! token; rotation is single-use so the loser sees a rejection. That is
//! expected: the loser redirects (or fails open) and the next navigation
//! carries the winner's rotated cookies.

use crate::application::RefreshRotator;
use crate::domain::foundation::{AuthError, TokenPair};

use super::paths::PublicPaths;

/// What to do when a refresh outcome is indeterminate (authority
/// unreachable, timeout, 5xx).
///
/// This is an explicit, tested parameter of the machine rather than an ad
/// hoc branch: `FailOpen` admits the request as-is, `FailClosed` redirects
/// to login. Neither clears cookies — only an explicit rejection does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndeterminatePolicy {
    #[default]
    FailOpen,
    FailClosed,
}

/// Terminal outcome of one gate evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Let the request through. `rotated` carries a fresh pair that must
    /// be written to the response cookies (both together).
    Admit { rotated: Option<TokenPair> },

    /// Redirect to the login page. `clear_cookies` is set only when
    /// credential cookies were present on the request and must be removed
    /// to prevent a redirect loop.
    Redirect {
        location: String,
        clear_cookies: bool,
    },
}

impl GateDecision {
    pub fn is_admit(&self) -> bool {
        matches!(self, GateDecision::Admit { .. })
    }
}

/// The per-request edge gate.
#[derive(Clone)]
pub struct Gatekeeper {
    rotator: RefreshRotator,
    public_paths: PublicPaths,
    login_path: String,
    policy: IndeterminatePolicy,
}

impl Gatekeeper {
    pub fn new(rotator: RefreshRotator) -> Self {
        Self {
            rotator,
            public_paths: PublicPaths::default(),
            login_path: "/login".to_string(),
            policy: IndeterminatePolicy::default(),
        }
    }

    pub fn with_public_paths(mut self, public_paths: PublicPaths) -> Self {
        self.public_paths = public_paths;
        self
    }

    pub fn with_login_path(mut self, login_path: impl Into<String>) -> Self {
        self.login_path = login_path.into();
        self
    }

    pub fn with_policy(mut self, policy: IndeterminatePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Evaluate one request. `access_token` / `refresh_token` are the
    /// cookie values as read from the request; empty strings count as
    /// absent.
    pub async fn evaluate(
        &self,
        path: &str,
        access_token: Option<&str>,
        refresh_token: Option<&str>,
    ) -> GateDecision {
        // State 1: PublicPath.
        if self.public_paths.is_public(path) {
            return GateDecision::Admit { rotated: None };
        }

        let access = access_token.filter(|t| !t.is_empty());
        let refresh = refresh_token.filter(|t| !t.is_empty());
        let any_credential = access.is_some() || refresh.is_some();

        // State 2: HasAccess — trust on presence, no authority call.
        if access.is_some() {
            return GateDecision::Admit { rotated: None };
        }

        // State 3: NoAccessHasRefresh.
        if let Some(refresh) = refresh {
            return match self.rotator.rotate(refresh).await {
                Ok(pair) => {
                    tracing::debug!(%path, "gate rotated session");
                    GateDecision::Admit {
                        rotated: Some(pair),
                    }
                }
                Err(AuthError::RefreshIndeterminate(detail)) => match self.policy {
                    IndeterminatePolicy::FailOpen => {
                        tracing::warn!(%path, %detail, "refresh indeterminate, admitting");
                        GateDecision::Admit { rotated: None }
                    }
                    IndeterminatePolicy::FailClosed => {
                        tracing::warn!(%path, %detail, "refresh indeterminate, redirecting");
                        // Transient failure: redirect but keep the cookies.
                        self.reject(path, false)
                    }
                },
                Err(_) => {
                    tracing::info!(%path, "refresh rejected, forcing re-login");
                    self.reject(path, any_credential)
                }
            };
        }

        // State 4: NoCredentials.
        self.reject(path, any_credential)
    }

    /// State 5: Reject — build the login redirect with the original path
    /// as the post-login return target.
    fn reject(&self, path: &str, clear_cookies: bool) -> GateDecision {
        let location = format!("{}?redirect={}", self.login_path, urlencoding::encode(path));
        GateDecision::Redirect {
            location,
            clear_cookies,
        }
    }
}
