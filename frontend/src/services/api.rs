//! Shared HTTP client for backend calls.
//!
//! Every request goes out with the session cookies attached. Every response
//! is shown to a [`ResponsePolicy`] before anything else looks at it; the
//! default policy sends the whole page to the login screen on a 401.
//! Navigation goes through a [`Navigator`] so it can be observed without a
//! browser.

use gloo_net::http::{Request, Response};
use web_sys::{FormData, RequestCredentials};

use crate::config::{API_BASE_URL, LOGIN_PATH};
use crate::types::{UploadError, UploadOutcome};

/// HTTP status the backend uses for a missing or expired session.
pub const STATUS_UNAUTHORIZED: u16 = 401;

// =============================================================================
// Navigation
// =============================================================================

/// Moves the whole client to another location.
pub trait Navigator {
    fn navigate(&self, location: &str);
}

/// Navigator backed by `window.location`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn navigate(&self, location: &str) {
        let Some(window) = web_sys::window() else {
            log::error!("No window available, cannot redirect to {}", location);
            return;
        };
        if let Err(e) = window.location().set_href(location) {
            log::error!("Redirect to {} failed: {:?}", location, e);
        }
    }
}

// =============================================================================
// Response policy
// =============================================================================

/// What the client does with a response before normal handling.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PolicyAction {
    /// Hand the response to the caller.
    Continue,
    /// Leave the page; the caller gets [`UploadError::Unauthenticated`].
    Redirect(String),
}

/// Decides, from the status alone, whether a response preempts the caller.
pub trait ResponsePolicy {
    fn on_status(&self, status: u16) -> PolicyAction;
}

/// Redirects to the login page on 401, lets everything else through.
#[derive(Clone, Debug)]
pub struct RedirectOnUnauthorized {
    login_path: String,
}

impl RedirectOnUnauthorized {
    pub fn new(login_path: impl Into<String>) -> Self {
        Self {
            login_path: login_path.into(),
        }
    }
}

impl Default for RedirectOnUnauthorized {
    fn default() -> Self {
        Self::new(LOGIN_PATH)
    }
}

impl ResponsePolicy for RedirectOnUnauthorized {
    fn on_status(&self, status: u16) -> PolicyAction {
        if status == STATUS_UNAUTHORIZED {
            PolicyAction::Redirect(self.login_path.clone())
        } else {
            PolicyAction::Continue
        }
    }
}

// =============================================================================
// Client
// =============================================================================

/// A response the policy let through.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    /// Body text, `None` when it could not be read
    pub body: Option<String>,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP client shared by every backend call.
#[derive(Clone, Debug)]
pub struct ApiClient<P = RedirectOnUnauthorized, N = BrowserNavigator> {
    base_url: String,
    policy: P,
    navigator: N,
}

impl ApiClient {
    /// Client for the configured backend, redirecting to login on 401.
    pub fn new() -> Self {
        Self::with_policy(API_BASE_URL, RedirectOnUnauthorized::default(), BrowserNavigator)
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: ResponsePolicy, N: Navigator> ApiClient<P, N> {
    pub fn with_policy(base_url: impl Into<String>, policy: P, navigator: N) -> Self {
        Self {
            base_url: base_url.into(),
            policy,
            navigator,
        }
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Absolute URL for an endpoint path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Apply the response policy to a status.
    ///
    /// A redirect is carried out here, before the caller sees the response.
    pub fn intercept(&self, status: u16) -> UploadOutcome<()> {
        match self.policy.on_status(status) {
            PolicyAction::Continue => Ok(()),
            PolicyAction::Redirect(location) => {
                log::warn!("🔒 Backend answered {}, redirecting to {}", status, location);
                self.navigator.navigate(&location);
                Err(UploadError::Unauthenticated)
            }
        }
    }

    /// Build a multipart POST carrying the session cookies.
    ///
    /// The browser sets the multipart `Content-Type` and boundary.
    pub fn build_request(&self, path: &str, form: FormData) -> UploadOutcome<Request> {
        Request::post(&self.url(path))
            .credentials(RequestCredentials::Include)
            .body(form)
            .map_err(|e| UploadError::Transport(format!("Failed to build request: {}", e)))
    }

    /// Run a response through the policy, then read its body.
    ///
    /// A redirected response is dropped without touching the body.
    pub async fn receive(&self, response: Response) -> UploadOutcome<ApiResponse> {
        let status = response.status();
        self.intercept(status)?;

        let body = match response.text().await {
            Ok(text) => Some(text),
            Err(e) => {
                log::warn!("Could not read response body from {}: {}", response.url(), e);
                None
            }
        };

        Ok(ApiResponse { status, body })
    }

    /// POST a multipart form with the session cookies attached.
    pub async fn post_form(&self, path: &str, form: FormData) -> UploadOutcome<ApiResponse> {
        let response = self
            .build_request(path, form)?
            .send()
            .await
            .map_err(|e| UploadError::Transport(format!("HTTP request failed: {}", e)))?;

        self.receive(response).await
    }
}
