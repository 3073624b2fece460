//! Registration requests and their normalization into providers.

use crate::args::Args;
use crate::core::{Instance, Provider};
use crate::error::{InjectError, Result};

use std::any::Any;
use std::fmt;
use std::sync::Arc;

type FactoryFn = dyn Fn(&Args<'_>) -> Result<Instance> + Send + Sync;

/// A callable that builds a service from its resolved dependencies.
///
/// A factory may carry its own dependency annotation (see [`Factory::with_deps`]),
/// which applies when the registration does not name `deps` explicitly.
#[derive(Clone)]
pub struct Factory {
  func: Arc<FactoryFn>,
  deps: Option<Vec<String>>,
}

impl Factory {
  /// Creates a factory from a closure returning the service value.
  pub fn new<T, F>(factory: F) -> Self
  where
    T: Any + Send + Sync,
    F: Fn(&Args<'_>) -> Result<T> + Send + Sync + 'static,
  {
    Self::from_instance(move |args| factory(args).map(|value| Arc::new(value) as Instance))
  }

  /// Creates a factory from a closure that returns an already shared instance.
  pub fn from_instance<F>(factory: F) -> Self
  where
    F: Fn(&Args<'_>) -> Result<Instance> + Send + Sync + 'static,
  {
    Self {
      func: Arc::new(factory),
      deps: None,
    }
  }

  /// Creates a factory for an [`Injectable`] type, annotated with `T::DEPS`.
  pub fn injectable<T: Injectable>() -> Self {
    Self::new(T::construct).with_deps(T::DEPS.iter().copied())
  }

  /// Attaches a dependency annotation to this factory.
  pub fn with_deps<I, S>(mut self, deps: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.deps = Some(deps.into_iter().map(Into::into).collect());
    self
  }

  /// The dependency annotation attached to this factory, if any.
  pub fn deps(&self) -> Option<&[String]> {
    self.deps.as_deref()
  }

  pub(crate) fn call(&self, args: &Args<'_>) -> Result<Instance> {
    (self.func)(args)
  }
}

impl fmt::Debug for Factory {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Factory").field("deps", &self.deps).finish_non_exhaustive()
  }
}

/// A type that knows how to build itself and which services it needs.
///
/// ```
/// use fibre_inject::{Args, Container, Factory, Injectable, Registration, Result};
///
/// struct Clock;
/// impl Injectable for Clock {
///   fn construct(_: &Args<'_>) -> Result<Self> {
///     Ok(Clock)
///   }
/// }
///
/// struct Scheduler {
///   clock: std::sync::Arc<Clock>,
/// }
/// impl Injectable for Scheduler {
///   const DEPS: &'static [&'static str] = &["clock"];
///   fn construct(args: &Args<'_>) -> Result<Self> {
///     Ok(Scheduler { clock: args.get(0)? })
///   }
/// }
///
/// let container = Container::new();
/// container
///   .register(vec![
///     Registration::new("clock", Factory::injectable::<Clock>()),
///     Registration::new("scheduler", Factory::injectable::<Scheduler>()),
///   ])
///   .unwrap();
/// assert!(container.get_as::<Scheduler>("scheduler").is_ok());
/// ```
pub trait Injectable: Any + Send + Sync + Sized {
  /// Tokens resolved and passed to [`Injectable::construct`], in order.
  const DEPS: &'static [&'static str] = &[];

  fn construct(args: &Args<'_>) -> Result<Self>;
}

/// A loosely typed field of a registration request.
///
/// `value` is normally a [`Item::Factory`] or an inline `[token.., factory]`
/// list; `deps` is normally a list of tokens. Anything else is rejected
/// when the request is registered.
#[derive(Clone, Debug)]
pub enum Item {
  Token(String),
  Factory(Factory),
  List(Vec<Item>),
}

impl From<&str> for Item {
  fn from(token: &str) -> Self {
    Item::Token(token.to_owned())
  }
}

impl From<String> for Item {
  fn from(token: String) -> Self {
    Item::Token(token)
  }
}

impl From<Factory> for Item {
  fn from(factory: Factory) -> Self {
    Item::Factory(factory)
  }
}

impl<T: Into<Item>> From<Vec<T>> for Item {
  fn from(items: Vec<T>) -> Self {
    Item::List(items.into_iter().map(Into::into).collect())
  }
}

impl<T: Into<Item>, const N: usize> From<[T; N]> for Item {
  fn from(items: [T; N]) -> Self {
    Item::List(items.into_iter().map(Into::into).collect())
  }
}

/// A request to register one service under a token.
#[derive(Clone, Debug)]
pub struct Registration {
  token: String,
  value: Item,
  deps: Option<Item>,
}

impl Registration {
  pub fn new(token: impl Into<String>, value: impl Into<Item>) -> Self {
    Self {
      token: token.into(),
      value: value.into(),
      deps: None,
    }
  }

  /// Sets the explicit dependency list, which outranks any other annotation.
  pub fn deps(mut self, deps: impl Into<Item>) -> Self {
    self.deps = Some(deps.into());
    self
  }

  pub fn token(&self) -> &str {
    &self.token
  }

  /// Validates the request and folds its annotation forms into one provider.
  ///
  /// Dependencies come from, in priority order: the explicit `deps` field,
  /// the annotation attached to the factory, the inline list.
  pub(crate) fn into_provider(self) -> Result<(String, Provider)> {
    let Registration { token, value, deps } = self;

    let explicit = match deps {
      None => None,
      Some(item) => Some(token_list(item).ok_or_else(|| InjectError::InvalidDependencyList {
        token: token.clone(),
      })?),
    };

    let (factory, inline) = match value {
      Item::Factory(factory) => (factory, Vec::new()),
      Item::List(items) => split_inline(&token, items)?,
      Item::Token(_) => {
        return Err(InjectError::InvalidDependencyEntry {
          token,
          index: 0,
          reason: "value must be a factory or an inline dependency list",
        })
      }
    };

    let deps = explicit
      .or_else(|| factory.deps().map(<[String]>::to_vec))
      .unwrap_or(inline);

    Ok((token, Provider::new(factory, deps)))
  }
}

fn token_list(item: Item) -> Option<Vec<String>> {
  match item {
    Item::List(items) => items
      .into_iter()
      .map(|item| match item {
        Item::Token(token) => Some(token),
        _ => None,
      })
      .collect(),
    _ => None,
  }
}

fn split_inline(token: &str, mut items: Vec<Item>) -> Result<(Factory, Vec<String>)> {
  let entry_error = |index, reason| InjectError::InvalidDependencyEntry {
    token: token.to_owned(),
    index,
    reason,
  };

  let last = items.len().saturating_sub(1);
  let factory = match items.pop() {
    Some(Item::Factory(factory)) => factory,
    _ => return Err(entry_error(last, "last entry must be a factory")),
  };

  let deps = items
    .into_iter()
    .enumerate()
    .map(|(index, item)| match item {
      Item::Token(dep) => Ok(dep),
      _ => Err(entry_error(index, "entry before the factory must be a token")),
    })
    .collect::<Result<Vec<_>>>()?;

  Ok((factory, deps))
}

/// One or more registration requests, committed in order.
#[derive(Debug, Default)]
pub struct Batch(Vec<Registration>);

impl From<Registration> for Batch {
  fn from(registration: Registration) -> Self {
    Batch(vec![registration])
  }
}

impl From<Vec<Registration>> for Batch {
  fn from(registrations: Vec<Registration>) -> Self {
    Batch(registrations)
  }
}

impl<const N: usize> From<[Registration; N]> for Batch {
  fn from(registrations: [Registration; N]) -> Self {
    Batch(registrations.into())
  }
}

impl IntoIterator for Batch {
  type Item = Registration;
  type IntoIter = std::vec::IntoIter<Registration>;

  fn into_iter(self) -> Self::IntoIter {
    self.0.into_iter()
  }
}
