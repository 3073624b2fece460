use thiserror::Error;

/// Boxed application error raised by a factory body.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised while registering or resolving services.
#[derive(Debug, Error)]
pub enum InjectError {
  /// The `deps` field of a registration was not a list of tokens.
  #[error("Dependency list for '{token}' must be a list of tokens")]
  InvalidDependencyList { token: String },

  /// An inline `[token.., factory]` value was malformed.
  #[error("Invalid inline dependency entry for '{token}' at position {index}: {reason}")]
  InvalidDependencyEntry {
    token: String,
    index: usize,
    reason: &'static str,
  },

  #[error("Service '{token}' is already registered")]
  DuplicateRegistration { token: String },

  /// `path` runs from the first occurrence of `token` on the resolution
  /// stack back to `token` itself.
  #[error("Circular dependency detected while resolving '{token}': {}", .path.join(" -> "))]
  CircularDependency { token: String, path: Vec<String> },

  #[error("Unknown service '{token}'")]
  UnknownService { token: String },

  /// A factory read a positional argument that was never declared as a dependency.
  #[error("Factory for '{token}' requested argument {index}, but only {declared} dependencies were resolved")]
  MissingArgument {
    token: String,
    index: usize,
    declared: usize,
  },

  #[error("Service '{token}' is not of type {expected}")]
  TypeMismatch {
    token: String,
    expected: &'static str,
  },

  /// A failure raised by the factory itself.
  #[error(transparent)]
  Factory(#[from] BoxError),
}

impl InjectError {
  /// Wraps an application error raised inside a factory.
  pub fn factory<E>(err: E) -> Self
  where
    E: Into<BoxError>,
  {
    InjectError::Factory(err.into())
  }
}

/// A specialized `Result` type for container operations.
pub type Result<T, E = InjectError> = std::result::Result<T, E>;
