use fibre_inject::{resolve_from, Container, Factory, Registration};
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};

// A simple service that gets a unique ID upon creation.
struct RequestTracker {
  id: usize,
}

// A service built from the tracker.
struct Handler {
  tracker: Arc<RequestTracker>,
}

static ID_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn main() -> fibre_inject::Result<()> {
  // `RUST_LOG=fibre_inject=trace` shows registration and resolution events.
  tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .init();

  let container = Container::new();

  // This factory will only be called ONCE, however many services need it.
  container.register(vec![
    Registration::new(
      "tracker",
      Factory::new(|_| {
        println!("Creating RequestTracker...");
        Ok(RequestTracker {
          id: ID_COUNTER.fetch_add(1, Ordering::SeqCst),
        })
      }),
    ),
    Registration::new(
      "handler",
      Factory::new(|args| Ok(Handler { tracker: args.get(0)? })),
    )
    .deps(["tracker"]),
  ])?;

  println!("--- Resolving Singletons ---");
  let t1 = resolve_from!(container, RequestTracker, "tracker");
  let t2 = resolve_from!(container, RequestTracker, "tracker");
  let handler = resolve_from!(container, Handler, "handler");

  println!("Tracker 1 ID: {}, Tracker 2 ID: {}", t1.id, t2.id);
  assert_eq!(t1.id, 0);
  assert!(Arc::ptr_eq(&t1, &t2), "Singleton instances should be identical");
  assert!(
    Arc::ptr_eq(&t1, &handler.tracker),
    "The handler should hold the same tracker"
  );
  println!("Singleton instances are the same pointer, as expected.");
  Ok(())
}
