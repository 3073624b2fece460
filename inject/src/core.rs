//! Core, non-public data structures for the IoC container.

use crate::args::Args;
use crate::error::{InjectError, Result};
use crate::registration::Factory;

use once_cell::sync::OnceCell;
use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::sync::Arc;

/// A realized service instance.
pub type Instance = Arc<dyn Any + Send + Sync>;

thread_local! {
  // Keys currently being resolved on this thread, in resolution order.
  // Detects circular dependencies without interfering with other threads.
  static RESOLVING_STACK: RefCell<Vec<ResolutionKey>> = RefCell::new(Vec::new());
}

/// Identifies one token within one container.
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct ResolutionKey {
  pub(crate) container: usize,
  pub(crate) token: String,
}

impl fmt::Debug for ResolutionKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Key(Container({:#x}), Token({}))", self.container, self.token)
  }
}

/// An RAII guard marking a token as being resolved.
///
/// Entering fails with `CircularDependency` when the key is already on this
/// thread's stack. Dropping the guard pops the key, so the stack is unwound
/// on success, on error and on panic alike.
pub(crate) struct ResolutionGuard {
  key: ResolutionKey,
}

impl ResolutionGuard {
  pub(crate) fn enter(key: ResolutionKey) -> Result<Self> {
    RESOLVING_STACK.with(|stack| {
      let mut stack = stack.borrow_mut();
      if let Some(start) = stack.iter().position(|k| *k == key) {
        let mut path: Vec<String> = stack[start..].iter().map(|k| k.token.clone()).collect();
        path.push(key.token.clone());
        return Err(InjectError::CircularDependency {
          token: key.token,
          path,
        });
      }
      stack.push(key.clone());
      Ok(Self { key })
    })
  }
}

impl Drop for ResolutionGuard {
  fn drop(&mut self) {
    RESOLVING_STACK.with(|stack| {
      let mut stack = stack.borrow_mut();
      // Guards drop in LIFO order, but search anyway in case of a mismatch.
      if let Some(pos) = stack.iter().rposition(|k| *k == self.key) {
        stack.remove(pos);
      }
    });
  }
}

/// Number of keys on this thread's resolution stack.
#[cfg(test)]
pub(crate) fn resolving_depth() -> usize {
  RESOLVING_STACK.with(|stack| stack.borrow().len())
}

/// The normalized form of every registration: a factory plus its ordered
/// dependency tokens, and the singleton cell holding the realized instance.
pub(crate) struct Provider {
  pub(crate) factory: Factory,
  pub(crate) deps: Vec<String>,
  cell: OnceCell<Instance>,
}

impl Provider {
  pub(crate) fn new(factory: Factory, deps: Vec<String>) -> Self {
    Self {
      factory,
      deps,
      cell: OnceCell::new(),
    }
  }

  pub(crate) fn cached(&self) -> Option<&Instance> {
    self.cell.get()
  }

  /// Returns the cached instance, or builds it with `init` exactly once.
  ///
  /// A failed `init` leaves the cell empty.
  pub(crate) fn get_or_try_init<F>(&self, init: F) -> Result<Instance>
  where
    F: FnOnce() -> Result<Instance>,
  {
    self.cell.get_or_try_init(init).cloned()
  }

  pub(crate) fn construct(&self, token: &str, values: &[Instance]) -> Result<Instance> {
    let args = Args::new(token, &self.deps, values);
    self.factory.call(&args)
  }
}

impl fmt::Debug for Provider {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Provider")
      .field("deps", &self.deps)
      .field("resolved", &self.cell.get().is_some())
      .finish()
  }
}
