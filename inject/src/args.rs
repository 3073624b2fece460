//! Positional arguments handed to a factory.

use crate::core::Instance;
use crate::error::{InjectError, Result};

use std::any::{type_name, Any};
use std::sync::Arc;

/// The resolved dependencies of one service, in declaration order.
///
/// Only dependencies named in the registration are resolved. Reading past
/// them fails with [`InjectError::MissingArgument`] rather than producing a
/// value, so an incomplete annotation surfaces as an error at resolution time.
pub struct Args<'a> {
  token: &'a str,
  deps: &'a [String],
  values: &'a [Instance],
}

impl<'a> Args<'a> {
  pub(crate) fn new(token: &'a str, deps: &'a [String], values: &'a [Instance]) -> Self {
    Self {
      token,
      deps,
      values,
    }
  }

  /// The token of the service being constructed.
  pub fn service(&self) -> &str {
    self.token
  }

  pub fn len(&self) -> usize {
    self.values.len()
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }

  /// The dependency token declared at `index`.
  pub fn token(&self, index: usize) -> Option<&str> {
    self.deps.get(index).map(String::as_str)
  }

  /// The untyped instance at `index`.
  pub fn instance(&self, index: usize) -> Result<&Instance> {
    self.values.get(index).ok_or_else(|| InjectError::MissingArgument {
      token: self.token.to_owned(),
      index,
      declared: self.values.len(),
    })
  }

  /// The instance at `index`, downcast to `T`.
  pub fn get<T: Any + Send + Sync>(&self, index: usize) -> Result<Arc<T>> {
    let instance = self.instance(index)?;
    Arc::clone(instance)
      .downcast::<T>()
      .map_err(|_| InjectError::TypeMismatch {
        token: self.token(index).unwrap_or(self.token).to_owned(),
        expected: type_name::<T>(),
      })
  }
}
