//! Command layer of the CI server: capability-gated dispatch over the
//! job registry and view store in `buildlib`.
//!
//! Every invocation flows through one shell: capability gate, argument
//! parsing, command body, and a single error-to-outcome translation
//! point. See `invoker::Invoker` for the invocation contract.

pub mod capabilities;
pub mod command;
pub mod commands;
pub mod context;
pub mod invoker;
pub mod range;

pub use capabilities::{authorize, AccessDenied, Caller, Capability};
pub use command::{invoke, CliCommand, CommandError, Outcome};
pub use context::Context;
pub use invoker::Invoker;
