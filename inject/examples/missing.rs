use fibre_inject::{resolve_from, Container, Factory, InjectError, Registration};
use std::panic;

struct UnregisteredService;

fn main() {
  let container = Container::new();
  container
    .register(vec![
      Registration::new("a", Factory::new(|_| Ok(()))).deps(["b"]),
      Registration::new("b", Factory::new(|_| Ok(()))).deps(["a"]),
    ])
    .expect("registration of a cycle succeeds");

  // --- Using the fallible `get()` method ---
  match container.get("unregistered") {
    Err(InjectError::UnknownService { token }) => println!("No service named '{}'.", token),
    other => panic!("Should not have found the service! {:?}", other.map(|_| ())),
  }

  match container.get("a") {
    Err(err @ InjectError::CircularDependency { .. }) => println!("{}", err),
    other => panic!("Expected a cycle! {:?}", other.map(|_| ())),
  }

  // --- Using the panicking `resolve_from!` macro ---
  println!("\nAttempting to resolve a service that was never registered...");
  let result = panic::catch_unwind(panic::AssertUnwindSafe(|| {
    let _service = resolve_from!(container, UnregisteredService, "unregistered");
  }));

  assert!(result.is_err(), "resolve_from! should have panicked.");
  println!("Successfully caught the expected panic from resolve_from!.");
}
