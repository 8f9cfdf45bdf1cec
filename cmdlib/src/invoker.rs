use crate::capabilities::{Caller, Capability};
use crate::command::{invoke, CliCommand, Outcome};
use crate::context::Context;

/// Drives one command the way a CLI front end would: build a caller,
/// attach its grants, pass raw arguments, capture the outcome. Tests
/// use it as the invocation contract; embedders can too.
///
/// The caller is always named `user`; `authorized_to` replaces the
/// grant set, so one invoker can issue several invocations.
pub struct Invoker<'a> {
    ctx: &'a Context,
    command: Box<dyn CliCommand>,
    granted: Vec<Capability>,
}

impl<'a> Invoker<'a> {
    pub fn new(ctx: &'a Context, command: Box<dyn CliCommand>) -> Self {
        Self {
            ctx,
            command,
            granted: Vec::new(),
        }
    }

    pub fn authorized_to(&mut self, capabilities: impl IntoIterator<Item = Capability>) -> &mut Self {
        self.granted = capabilities.into_iter().collect();
        self
    }

    pub async fn invoke_with_args<S: AsRef<str>>(&self, args: &[S]) -> Outcome {
        let caller = Caller::new("user").grant_all(self.granted.iter().copied());
        let args: Vec<String> = args.iter().map(|arg| arg.as_ref().to_string()).collect();
        invoke(self.command.as_ref(), self.ctx, &caller, &args).await
    }
}
