//! # Fibre Inject
//!
//! A small, thread-safe Inversion of Control (IoC) container keyed by string tokens.
//!
//! Services are registered as factories together with the tokens they depend on.
//! Nothing is built at registration time: the first `get` of a token resolves its
//! dependencies left to right, calls the factory with them and caches the result,
//! so every service is a singleton for the lifetime of its container.
//!
//! ## Core Concepts
//!
//! - **Container**: The registry of services. It is an ordinary value, so several
//!   containers can live side by side without interfering.
//! - **Token**: The string a service is registered and resolved under. The reserved
//!   token [`SELF_TOKEN`] (`"$Inject"`) resolves to the container itself.
//! - **Dependencies**: Declared in one of three ways, in priority order: an explicit
//!   `deps` list on the [`Registration`], an annotation attached to the [`Factory`]
//!   (or [`Injectable::DEPS`]), or the inline `[token.., factory]` form built with
//!   [`inject!`].
//! - **Cycles**: Re-entering a token that is still being resolved fails with
//!   [`InjectError::CircularDependency`] instead of overflowing the stack.
//!
//! ## Quick Start
//!
//! ```
//! use fibre_inject::{Container, Factory, Registration};
//!
//! struct Logging;
//! impl Logging {
//!   fn log(&self, message: &str) -> String {
//!     message.to_owned()
//!   }
//! }
//!
//! struct Service {
//!   out: String,
//! }
//!
//! fn main() -> fibre_inject::Result<()> {
//!   let container = Container::new();
//!
//!   container.register(vec![
//!     Registration::new("logging", Factory::new(|_| Ok(Logging))),
//!     Registration::new(
//!       "svc",
//!       Factory::new(|args| {
//!         let logging = args.get::<Logging>(0)?;
//!         Ok(Service { out: logging.log("x") })
//!       }),
//!     )
//!     .deps(["logging"]),
//!   ])?;
//!
//!   let service = container.get_as::<Service>("svc")?;
//!   assert_eq!(service.out, "x");
//!   Ok(())
//! }
//! ```

mod args;
mod container;
mod core;
mod error;
mod macros;
mod registration;

pub use crate::args::Args;
pub use crate::container::{Container, ContainerBuilder, SELF_TOKEN};
pub use crate::core::Instance;
pub use crate::error::{BoxError, InjectError, Result};
pub use crate::registration::{Batch, Factory, Injectable, Item, Registration};
