//! Public macros for ergonomic registration and resolution.

/// Resolves a typed service from a container, panicking on failure.
///
/// Use this where a missing or misconfigured service is a programming error.
/// For a non-panicking version, use [`maybe_resolve_from!`] or
/// `container.get_as(...)` directly.
///
/// # Panics
///
/// Panics with the underlying `InjectError` if the service cannot be resolved.
///
/// # Examples
///
/// ```
/// use fibre_inject::{resolve_from, Container, Factory, Registration};
///
/// let container = Container::new();
/// container
///   .register(Registration::new("greeting", Factory::new(|_| Ok(String::from("hello")))))
///   .unwrap();
///
/// let greeting = resolve_from!(container, String, "greeting");
/// assert_eq!(*greeting, "hello");
/// ```
#[macro_export]
macro_rules! resolve_from {
  ($container:expr, $type:ty, $token:expr) => {
    match $container.get_as::<$type>($token) {
      Ok(service) => service,
      Err(err) => panic!(
        "Failed to resolve required service '{}' as {}: {}",
        $token,
        std::any::type_name::<$type>(),
        err
      ),
    }
  };
}

/// Resolves a typed service from a container, returning `None` on failure.
///
/// ```
/// use fibre_inject::{maybe_resolve_from, Container};
///
/// let container = Container::new();
/// assert!(maybe_resolve_from!(container, String, "missing").is_none());
/// ```
#[macro_export]
macro_rules! maybe_resolve_from {
  ($container:expr, $type:ty, $token:expr) => {
    $container.get_as::<$type>($token).ok()
  };
}

/// Builds the inline `[token.., factory]` form of a registration value.
///
/// The tokens are resolved in order and passed to the factory positionally.
///
/// ```
/// use fibre_inject::{inject, Container, Factory, Registration};
///
/// let container = Container::new();
/// container
///   .register(vec![
///     Registration::new("name", Factory::new(|_| Ok("fibre"))),
///     Registration::new(
///       "greeting",
///       inject!["name" => Factory::new(|args| {
///         Ok(format!("hello {}", args.get::<&'static str>(0)?))
///       })],
///     ),
///   ])
///   .unwrap();
///
/// assert_eq!(*container.get_as::<String>("greeting").unwrap(), "hello fibre");
/// ```
#[macro_export]
macro_rules! inject {
  ($($dep:expr),* => $factory:expr $(,)?) => {
    $crate::Item::List(vec![$($crate::Item::from($dep),)* $crate::Item::from($factory)])
  };
}
