use fibre_inject::{resolve_from, Container, Factory, Registration};
use std::sync::Arc;

// 1. Define the abstraction (the trait)
trait Logger: Send + Sync {
  fn log(&self, message: &str);
}

// 2. Define a concrete implementation
struct ConsoleLogger;
impl Logger for ConsoleLogger {
  fn log(&self, message: &str) {
    println!("[CONSOLE LOG]: {}", message);
  }
}

// 3. Define a service that depends on the abstraction
struct ReportService {
  logger: Arc<dyn Logger>,
}

impl ReportService {
  fn generate_report(&self) {
    self.logger.log("Starting report generation.");
    self.logger.log("Finished report generation.");
  }
}

fn main() -> fibre_inject::Result<()> {
  let container = Container::new();

  // --- Registration ---

  // The service is stored as `Arc<dyn Logger>`, so it resolves as that type.
  container.register(Registration::new(
    "logger",
    Factory::new(|_| Ok(Arc::new(ConsoleLogger) as Arc<dyn Logger>)),
  ))?;

  // ReportService names the token it needs; the container hands it over.
  container.register(
    Registration::new(
      "reports",
      Factory::new(|args| {
        Ok(ReportService {
          logger: (*args.get::<Arc<dyn Logger>>(0)?).clone(),
        })
      }),
    )
    .deps(["logger"]),
  )?;

  // --- Resolution and Usage ---
  println!("Resolving the high-level service...");
  let report_service = resolve_from!(container, ReportService, "reports");

  println!("Using the service...");
  report_service.generate_report();
  Ok(())
}
