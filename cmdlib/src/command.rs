use crate::capabilities::{authorize, AccessDenied, Caller, Capability};
use crate::context::Context;
use async_trait::async_trait;
use buildlib::errors::LookupError;
use clap::Parser;
use thiserror::Error;

#[cfg(windows)]
pub const LINE_SEP: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_SEP: &str = "\n";

/// What one command invocation produced. Exit codes are stable:
/// 0 success, 2 bad arguments, 3 entity not found, 6 access denied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl Outcome {
    fn success(stdout: String) -> Self {
        Self {
            exit_code: 0,
            stdout,
            stderr: String::new(),
        }
    }

    fn failure(exit_code: i32, stderr: String) -> Self {
        Self {
            exit_code,
            stdout: String::new(),
            stderr,
        }
    }

    pub fn succeeded(&self) -> bool {
        self.exit_code == 0
    }

    /// Exit code 0 with nothing written to stdout.
    pub fn succeeded_silently(&self) -> bool {
        self.exit_code == 0 && self.stdout.is_empty()
    }

    pub fn failed_with(&self, exit_code: i32) -> bool {
        self.exit_code == exit_code
    }

    pub fn has_no_stdout(&self) -> bool {
        self.stdout.is_empty()
    }
}

/// Failures a command body can produce. The dispatch shell is the single
/// point where these become an `Outcome`; nothing escapes to the invoker
/// as a fault.
#[derive(Error, Debug)]
pub enum CommandError {
    /// Malformed or missing arguments; the payload is the rendered usage
    /// text. Detected before any entity lookup.
    #[error("{0}")]
    BadArgs(String),
    #[error("{0}")]
    Lookup(#[from] LookupError),
}

/// A named unit of work with a static required-capability set and a
/// clap argument schema.
#[async_trait]
pub trait CliCommand: Send + Sync {
    fn name(&self) -> &'static str;

    fn required_capabilities(&self) -> &'static [Capability];

    async fn run(&self, ctx: &Context, args: &[String]) -> Result<String, CommandError>;
}

/// Parse raw arguments against a command's clap schema. The rendered
/// clap error doubles as the usage message.
pub(crate) fn parse_args<T: Parser>(name: &str, args: &[String]) -> Result<T, CommandError> {
    T::try_parse_from(std::iter::once(name.to_string()).chain(args.iter().cloned()))
        .map_err(|err| CommandError::BadArgs(err.to_string()))
}

/// Run one command to completion: capability gate first, then the body.
///
/// The gate runs strictly before argument parsing, so a caller without
/// the required capabilities sees an access-denied outcome even when the
/// arguments would not have parsed or the entity does not exist.
pub async fn invoke(
    command: &dyn CliCommand,
    ctx: &Context,
    caller: &Caller,
    args: &[String],
) -> Outcome {
    tracing::debug!(command = command.name(), caller = caller.name(), "dispatch");
    if let Err(denied) = authorize(caller, command.required_capabilities()) {
        tracing::warn!(command = command.name(), %denied, "access denied");
        return denied_outcome(&denied);
    }
    match command.run(ctx, args).await {
        Ok(stdout) => Outcome::success(stdout),
        Err(CommandError::BadArgs(usage)) => Outcome::failure(2, usage),
        Err(CommandError::Lookup(err)) => {
            Outcome::failure(3, format!("ERROR: {}{}", err, LINE_SEP))
        }
    }
}

fn denied_outcome(denied: &AccessDenied) -> Outcome {
    Outcome::failure(6, format!("ERROR: {}{}", denied, LINE_SEP))
}
