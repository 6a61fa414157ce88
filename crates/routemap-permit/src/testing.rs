//! Test doubles for applications using the permit middleware.

use crate::token::{extract_bearer_token, validate_token};
use crate::user::CurrentUser;

/// A stand-in request carrying a raw Authorization header value and the
/// roles the authenticated user should have. Implements [`CurrentUser`]
/// the way a host adapter typically would: extract the bearer token,
/// validate it, store the subject.
#[derive(Debug, Clone, Default)]
pub struct FakeRequest {
    pub secret: String,
    pub authorization: Option<String>,
    pub roles: Vec<String>,
    /// Set by `authenticated` once the token checks out.
    pub user: Option<String>,
    pub forbidden_calls: usize,
}

impl FakeRequest {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Self::default()
        }
    }

    pub fn authorization(mut self, header_value: impl Into<String>) -> Self {
        self.authorization = Some(header_value.into());
        self
    }

    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.roles.push(role.into());
        self
    }
}

impl CurrentUser for FakeRequest {
    type User = String;
    type Output = String;

    fn token(&self) -> Option<String> {
        let header = self.authorization.as_deref()?;
        extract_bearer_token(header).ok().flatten()
    }

    fn authenticate(&mut self) -> Option<String> {
        let token = self.token()?;
        validate_token(&token, &self.secret).ok().flatten()
    }

    fn authenticated(&mut self, user: String) -> Option<String> {
        self.user = Some(user.clone());
        Some(user)
    }

    fn forbidden(&mut self) -> String {
        self.forbidden_calls += 1;
        "403 Forbidden".to_string()
    }

    fn roles(&self) -> Vec<String> {
        self.roles.clone()
    }
}
