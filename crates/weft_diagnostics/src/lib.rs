//! Diagnostic creation, severity management, and rendering.
//!
//! Generation problems are reported as structured [`Diagnostic`] messages with
//! a severity, a stable code and the name of the circuit model or module they
//! concern. The [`DiagnosticSink`] accumulates them during a run and
//! [`TerminalRenderer`] formats them for humans.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use renderer::{DiagnosticRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
