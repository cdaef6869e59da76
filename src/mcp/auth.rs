//! Per-session authorization context.

use std::fmt;

use serde_json::Value;
use tracing::debug;

use crate::todoist::{ApiError, ApiResult, TodoistApi};

/// Access token plus the identity of the authorized user.
///
/// Supplied once per session by whoever performed the OAuth exchange and
/// never mutated afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthContext {
    access_token: String,
    email: String,
    full_name: String,
}

impl AuthContext {
    pub fn new(
        access_token: impl Into<String>,
        email: impl Into<String>,
        full_name: impl Into<String>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            email: email.into(),
            full_name: full_name.into(),
        }
    }

    /// Build a context, filling missing identity fields from `GET /user`.
    ///
    /// No upstream call is made when both `email` and `full_name` are given.
    pub async fn resolve(
        api: &dyn TodoistApi,
        access_token: impl Into<String>,
        email: Option<String>,
        full_name: Option<String>,
    ) -> ApiResult<Self> {
        if let (Some(email), Some(full_name)) = (&email, &full_name) {
            return Ok(Self::new(access_token, email.clone(), full_name.clone()));
        }

        let user = api.get("/user", Default::default()).await?;
        debug!("resolved identity from upstream user record");

        let field = |name: &str| -> ApiResult<String> {
            user.get(name)
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| ApiError::InvalidResponse {
                    message: format!("user record has no '{}' field", name),
                })
        };

        let email = match email {
            Some(email) => email,
            None => field("email")?,
        };
        let full_name = match full_name {
            Some(full_name) => full_name,
            None => field("full_name")?,
        };

        Ok(Self::new(access_token, email, full_name))
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }
}

impl fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthContext")
            .field("access_token", &"<redacted>")
            .field("email", &self.email)
            .field("full_name", &self.full_name)
            .finish()
    }
}
