//! The inline tag language of False Prophet.
//!
//! Authored text carries directives of the form `$cmd[/thing[/key[/arg]]]$`.
//! A reply is evaluated in two passes: the guard pass picks one candidate of
//! a conditional reply ([`resolve_conditional`]), then the mutation pass
//! applies its `set` tags to the session context ([`apply_mutations`]).

/// Static checks over a loaded scenario.
pub mod check;
/// Diagnostics with ariadne rendering.
pub mod diagnostics;
/// Error types for tag evaluation.
pub mod error;
/// The tag scanner.
pub mod lexer;
/// The mutation pass.
pub mod mutation;
/// The guard pass.
pub mod resolver;
/// Tag, command and target types.
pub mod tag;

pub use check::check_scenario;
pub use diagnostics::{Diagnostic, Severity, render_diagnostics};
pub use error::{TagError, TagResult};
pub use lexer::{Pass, Scanner, TagMatch, scan, strip};
pub use mutation::{Mutated, Mutation, apply_mutations, normalize_whitespace};
pub use resolver::{guard_holds, resolve_conditional};
pub use tag::{Command, Span, Tag, TagPath, Target};
