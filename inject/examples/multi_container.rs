use fibre_inject::{Container, Factory, Registration};

// A function that configures dependencies and runs some logic.
// By accepting a `&Container`, it can be tested with a controlled environment.
fn process_data(container: &Container) -> fibre_inject::Result<String> {
  container.register(Registration::new(
    "data",
    Factory::new(|_| Ok("test data".to_string())),
  ))?;

  let data = container.get_as::<String>("data")?;
  Ok(format!("Processed: {}", data.to_uppercase()))
}

fn main() -> fibre_inject::Result<()> {
  println!("--- Running with a test container ---");
  let test_container = Container::new();
  let result = process_data(&test_container)?;

  println!("Result: {}", result);
  assert_eq!(result, "Processed: TEST DATA");

  // --- Verify Isolation ---
  let other = Container::new();
  assert!(
    !other.contains("data"),
    "Dependency should not have leaked into another container!"
  );

  println!("\nVerified that containers are isolated from each other.");
  Ok(())
}
