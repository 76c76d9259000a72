//! Diagnostic system for shade passes.
//!
//! Every user-facing problem found by a pass becomes a [`Diagnostic`]:
//! - Error code for searchability
//! - Message (what went wrong)
//! - Primary label (where it went wrong)
//! - Secondary labels (related locations, such as the edges of a cycle)
//!
//! Passes append to a [`DiagnosticList`], which preserves emission order and
//! enforces the configured error limit.

mod diagnostic;
mod error_code;
mod list;
pub mod span_utils;

pub use diagnostic::{internal_error, Diagnostic, Label, Severity};
pub use error_code::ErrorCode;
pub use list::{DiagnosticConfig, DiagnosticList};
