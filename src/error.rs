//! Error types for the `html_guard` crate.
//!
//! Sanitizing and filtering never fail. Errors only arise while building a
//! custom [`Policy`](crate::Policy).

/// All errors that can occur while constructing a sanitization policy.
#[derive(Debug, thiserror::Error)]
pub enum HtmlGuardError {
    /// A tag, attribute or style property name is not lowercase ASCII
    /// alphanumerics and hyphens.
    #[error("Invalid name: {0:?}")]
    InvalidName(String),

    /// The tag holds raw text or script and can never be allowed.
    #[error("Tag cannot be allowed: {0}")]
    UnsafeTag(String),

    /// Event handler attributes can never be allowed.
    #[error("Attribute cannot be allowed: {0}")]
    UnsafeAttribute(String),

    /// The builder configuration is invalid.
    #[error("Config error: {0}")]
    Config(String),
}

/// A type alias for `Result<T, HtmlGuardError>`.
pub type Result<T> = std::result::Result<T, HtmlGuardError>;
