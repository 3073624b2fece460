//! The main `Container` struct and its associated methods.

use crate::core::{Instance, Provider, ResolutionGuard, ResolutionKey};
use crate::error::{InjectError, Result};
use crate::registration::Batch;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// The token that always resolves to the container itself.
pub const SELF_TOKEN: &str = "$Inject";

struct Inner {
  self_token: String,
  providers: DashMap<String, Arc<Provider>>,
}

/// The Inversion of Control (IoC) container.
///
/// Maps string tokens to lazily constructed singletons. A `Container` is a
/// cheap handle: clones share one registry, and the handle is what the
/// self-token resolves to. It is thread-safe; registration and resolution
/// may happen from any thread at any time.
#[derive(Clone)]
pub struct Container {
  inner: Arc<Inner>,
}

impl Default for Container {
  fn default() -> Self {
    ContainerBuilder::default().build()
  }
}

impl Container {
  /// Creates a new, empty `Container`.
  pub fn new() -> Self {
    Self::default()
  }

  pub fn builder() -> ContainerBuilder {
    ContainerBuilder::default()
  }

  /// The reserved token naming this container.
  pub fn self_token(&self) -> &str {
    &self.inner.self_token
  }

  /// Returns `true` if both handles refer to the same container.
  pub fn ptr_eq(&self, other: &Container) -> bool {
    Arc::ptr_eq(&self.inner, &other.inner)
  }

  /// Returns `true` if `token` can be resolved without an `UnknownService` error.
  pub fn contains(&self, token: &str) -> bool {
    token == self.inner.self_token || self.inner.providers.contains_key(token)
  }

  /// Returns `true` if the service behind `token` has already been constructed.
  pub fn is_resolved(&self, token: &str) -> bool {
    self
      .inner
      .providers
      .get(token)
      .map_or(false, |provider| provider.cached().is_some())
  }

  // --- Registration ---

  /// Registers one request, or several in order.
  ///
  /// Each request is validated and committed on its own. The first failure
  /// is returned immediately; requests before it stay registered.
  pub fn register(&self, request: impl Into<Batch>) -> Result<()> {
    for registration in request.into() {
      let (token, provider) = registration.into_provider()?;
      if token == self.inner.self_token {
        return Err(InjectError::DuplicateRegistration { token });
      }

      match self.inner.providers.entry(token) {
        Entry::Occupied(entry) => {
          return Err(InjectError::DuplicateRegistration {
            token: entry.key().clone(),
          });
        }
        Entry::Vacant(entry) => {
          debug!(token = %entry.key(), deps = ?provider.deps, "Registered service");
          entry.insert(Arc::new(provider));
        }
      }
    }
    Ok(())
  }

  // --- Resolution ---

  /// Resolves the service registered under `token`.
  ///
  /// The first successful call constructs the service after resolving its
  /// dependencies left to right; later calls return the same instance.
  /// Dependencies that were constructed stay cached even if this call fails.
  ///
  /// The self-token yields a new `Arc` around a handle to this container on
  /// every call, so `Arc::ptr_eq` between two such results is `false`.
  /// Downcast to [`Container`] and compare with [`Container::ptr_eq`] instead.
  pub fn get(&self, token: &str) -> Result<Instance> {
    if token == self.inner.self_token {
      return Ok(Arc::new(self.clone()));
    }

    let provider = self.provider(token)?;
    if let Some(instance) = provider.cached() {
      trace!(token, "Resolved cached service");
      return Ok(Arc::clone(instance));
    }

    let _guard = ResolutionGuard::enter(self.key(token)).map_err(|err| {
      warn!(token, error = %err, "Refusing to resolve service");
      err
    })?;

    // Dependencies resolve outside the cell; only the factory runs under its lock.
    let values = provider
      .deps
      .iter()
      .map(|dep| {
        trace!(token, dependency = %dep, "Resolving dependency");
        self.get(dep)
      })
      .collect::<Result<Vec<_>>>()?;

    provider.get_or_try_init(|| {
      debug!(token, "Constructing service");
      provider.construct(token, &values)
    })
  }

  /// Resolves the service registered under `token` and downcasts it to `T`.
  pub fn get_as<T: Any + Send + Sync>(&self, token: &str) -> Result<Arc<T>> {
    self
      .get(token)?
      .downcast::<T>()
      .map_err(|_| InjectError::TypeMismatch {
        token: token.to_owned(),
        expected: type_name::<T>(),
      })
  }

  // --- PRIVATE HELPERS ---

  // Clones the provider out so no map shard stays locked while a factory runs.
  fn provider(&self, token: &str) -> Result<Arc<Provider>> {
    self
      .inner
      .providers
      .get(token)
      .map(|entry| Arc::clone(entry.value()))
      .ok_or_else(|| InjectError::UnknownService {
        token: token.to_owned(),
      })
  }

  fn key(&self, token: &str) -> ResolutionKey {
    ResolutionKey {
      container: Arc::as_ptr(&self.inner) as usize,
      token: token.to_owned(),
    }
  }
}

impl fmt::Debug for Container {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Container")
      .field("self_token", &self.inner.self_token)
      .field("services", &self.inner.providers.len())
      .finish()
  }
}

/// A builder for creating `Container` instances.
#[derive(Debug, Clone)]
pub struct ContainerBuilder {
  self_token: String,
}

impl Default for ContainerBuilder {
  fn default() -> Self {
    Self {
      self_token: SELF_TOKEN.to_owned(),
    }
  }
}

impl ContainerBuilder {
  /// Sets the token that resolves to the container itself. Defaults to [`SELF_TOKEN`].
  pub fn self_token(mut self, token: impl Into<String>) -> Self {
    self.self_token = token.into();
    self
  }

  pub fn build(self) -> Container {
    Container {
      inner: Arc::new(Inner {
        self_token: self.self_token,
        providers: DashMap::new(),
      }),
    }
  }
}
