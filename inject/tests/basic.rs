use fibre_inject::{Container, Factory, InjectError, Item, Registration, SELF_TOKEN};
use pretty_assertions::assert_eq;
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};

// --- Test Fixtures ---

struct Logging;

impl Logging {
  fn log(&self, message: &str) -> String {
    message.to_owned()
  }
}

fn container_with_logging() -> Container {
  let container = Container::new();
  container
    .register(Registration::new("logging", Factory::new(|_| Ok(Logging))))
    .unwrap();
  container
}

fn empty() -> Factory {
  Factory::new(|_| Ok(()))
}

// --- Self Resolution ---

#[test]
fn test_self_token_resolves_to_container() {
  let container = container_with_logging();

  let resolved = container.get_as::<Container>(SELF_TOKEN).unwrap();
  assert!(resolved.ptr_eq(&container));

  // The answer does not depend on what has been registered or resolved.
  container.get("logging").unwrap();
  let resolved = container.get_as::<Container>("$Inject").unwrap();
  assert!(resolved.ptr_eq(&container));

  // Each call hands out a fresh handle; identity is the container's, not the Arc's.
  let first = container.get(SELF_TOKEN).unwrap();
  let second = container.get(SELF_TOKEN).unwrap();
  assert!(!Arc::ptr_eq(&first, &second));
}

#[test]
fn test_self_token_cannot_be_registered() {
  let container = Container::new();
  let result = container.register(Registration::new(SELF_TOKEN, empty()));

  assert!(matches!(
    result,
    Err(InjectError::DuplicateRegistration { ref token }) if token == SELF_TOKEN
  ));
}

// --- First-time Registration ---

#[test]
fn test_factory_with_explicit_deps() {
  struct Service {
    test: String,
  }

  let container = container_with_logging();
  container
    .register(
      Registration::new(
        "2",
        Factory::new(|args| {
          let logging = args.get::<Logging>(0)?;
          Ok(Service {
            test: logging.log("2"),
          })
        }),
      )
      .deps(["logging"]),
    )
    .unwrap();

  assert_eq!(container.get_as::<Service>("2").unwrap().test, "2");
}

#[test]
fn test_factory_with_attached_deps() {
  struct Service {
    test: String,
  }

  let factory = Factory::new(|args| {
    Ok(Service {
      test: args.get::<Logging>(0)?.log("3"),
    })
  })
  .with_deps(["logging"]);

  let container = container_with_logging();
  container.register(Registration::new("3", factory)).unwrap();

  assert_eq!(container.get_as::<Service>("3").unwrap().test, "3");
}

#[test]
fn test_factory_with_inline_deps() {
  struct Service {
    test: String,
  }

  let container = container_with_logging();
  container
    .register(Registration::new(
      "4",
      fibre_inject::inject!["logging" => Factory::new(|args| {
        Ok(Service {
          test: args.get::<Logging>(0)?.log("4"),
        })
      })],
    ))
    .unwrap();

  assert_eq!(container.get_as::<Service>("4").unwrap().test, "4");
}

// --- Singletons ---

#[test]
fn test_get_twice_returns_same_instance() {
  static CALLS: AtomicUsize = AtomicUsize::new(0);

  struct Counted;

  let container = Container::new();
  container
    .register(Registration::new(
      "counted",
      Factory::new(|_| {
        CALLS.fetch_add(1, Ordering::SeqCst);
        Ok(Counted)
      }),
    ))
    .unwrap();

  assert!(!container.is_resolved("counted"));
  let first = container.get("counted").unwrap();
  let second = container.get("counted").unwrap();

  assert!(Arc::ptr_eq(&first, &second));
  assert_eq!(CALLS.load(Ordering::SeqCst), 1);
  assert!(container.is_resolved("counted"));
}

#[test]
fn test_dependency_resolved_once_for_many_dependents() {
  static CALLS: AtomicUsize = AtomicUsize::new(0);

  struct Shared;
  struct Holder {
    shared: Arc<Shared>,
  }

  let holder = || Factory::new(|args| Ok(Holder { shared: args.get(0)? }));

  let container = Container::new();
  container
    .register(vec![
      Registration::new(
        "shared",
        Factory::new(|_| {
          CALLS.fetch_add(1, Ordering::SeqCst);
          Ok(Shared)
        }),
      ),
      Registration::new("left", holder()).deps(["shared"]),
      Registration::new("right", holder()).deps(["shared"]),
    ])
    .unwrap();

  let left = container.get_as::<Holder>("left").unwrap();
  let right = container.get_as::<Holder>("right").unwrap();

  assert!(Arc::ptr_eq(&left.shared, &right.shared));
  assert_eq!(CALLS.load(Ordering::SeqCst), 1);
}

// --- Validity Checks and Contracts ---

#[test]
fn test_deps_that_are_not_a_list_are_rejected() {
  let container = Container::new();
  let result = container.register(Registration::new("4", empty()).deps("4"));

  assert!(matches!(
    result,
    Err(InjectError::InvalidDependencyList { ref token }) if token == "4"
  ));
  assert!(!container.contains("4"));
}

#[test]
fn test_inline_list_without_factory_is_rejected() {
  let container = Container::new();
  let result = container.register(Registration::new("4", ["4"]));

  assert!(matches!(
    result,
    Err(InjectError::InvalidDependencyEntry { ref token, .. }) if token == "4"
  ));
}

#[test]
fn test_inline_list_with_factory_in_the_middle_is_rejected() {
  let container = Container::new();
  let value = Item::List(vec!["a".into(), empty().into(), "b".into()]);
  let result = container.register(Registration::new("svc", value));

  assert!(matches!(
    result,
    Err(InjectError::InvalidDependencyEntry { index: 2, .. })
  ));
}

#[test]
fn test_duplicate_registration_is_rejected() {
  let container = Container::new();
  container.register(Registration::new("3", empty())).unwrap();

  // The payload of the second request does not matter.
  let result = container.register(Registration::new("3", Factory::new(|_| Ok(7_u32))).deps(["x"]));
  assert!(matches!(
    result,
    Err(InjectError::DuplicateRegistration { ref token }) if token == "3"
  ));

  // The first registration is untouched.
  container.get_as::<()>("3").unwrap();
}

#[test]
fn test_validation_runs_before_duplicate_check() {
  let container = Container::new();
  container.register(Registration::new("dup", empty())).unwrap();

  let result = container.register(Registration::new("dup", empty()).deps("not-a-list"));
  assert!(matches!(result, Err(InjectError::InvalidDependencyList { .. })));
}

#[test]
fn test_circular_dependencies_are_detected_at_resolution() {
  let container = Container::new();

  // Registration alone never fails for a cycle.
  container
    .register(vec![
      Registration::new("depA", empty()).deps(["depB"]),
      Registration::new("depB", empty()).deps(["depA"]),
    ])
    .unwrap();

  match container.get("depA") {
    Err(InjectError::CircularDependency { token, path }) => {
      assert_eq!(token, "depA");
      assert_eq!(path, vec!["depA", "depB", "depA"]);
    }
    other => panic!("expected a circular dependency, got {:?}", other.err()),
  }

  assert!(matches!(
    container.get("depB"),
    Err(InjectError::CircularDependency { ref token, .. }) if token == "depB"
  ));
}

#[test]
fn test_self_dependency_is_circular() {
  let container = Container::new();
  container
    .register(Registration::new("loop", empty()).deps(["loop"]))
    .unwrap();

  assert!(matches!(
    container.get("loop"),
    Err(InjectError::CircularDependency { .. })
  ));
}

#[test]
fn test_unknown_service() {
  let container = Container::new();

  assert!(matches!(
    container.get("nothing"),
    Err(InjectError::UnknownService { ref token }) if token == "nothing"
  ));
  assert!(!container.contains("nothing"));
}

#[test]
fn test_unknown_transitive_dependency() {
  let container = Container::new();
  container
    .register(Registration::new("svc", empty()).deps(["missing"]))
    .unwrap();

  assert!(matches!(
    container.get("svc"),
    Err(InjectError::UnknownService { ref token }) if token == "missing"
  ));
  assert!(!container.is_resolved("svc"));
}

#[test]
fn test_get_as_wrong_type_is_a_mismatch() {
  let container = container_with_logging();

  assert!(matches!(
    container.get_as::<String>("logging"),
    Err(InjectError::TypeMismatch { ref token, .. }) if token == "logging"
  ));
}
