//! Front-end driver.
//!
//! A [`Session`] owns the diagnostics of one compilation and runs the
//! front-end passes in pipeline order: dependency resolution, then side-effect
//! promotion. Promotion only runs on programs that resolved cleanly.
//!
//! ```text
//! shadec::init_tracing();
//! let mut session = Session::new(CompilerOptions::from_env());
//! let Some(output) = session.run(program, &semantic_info) else {
//!     eprintln!("{}", session.diagnostics().render("shader.wgsl", source));
//!     return;
//! };
//! ```

mod options;
mod session;
mod tracing_setup;

pub use options::CompilerOptions;
pub use session::{Compiled, Session};
pub use tracing_setup::{init_tracing, LOG_ENV, LOG_TREE_ENV};
