use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenError {
    /// An argument that must be a non-empty string was empty. This is a
    /// programming error at the call boundary, distinct from a token that
    /// merely fails verification.
    #[error("{0} must be a non-empty string")]
    EmptyArgument(&'static str),

    #[error("failed to sign token: {0}")]
    Sign(#[from] jsonwebtoken::errors::Error),
}
