use crate::capabilities::Capability;
use crate::command::{parse_args, CliCommand, CommandError};
use crate::context::Context;
use async_trait::async_trait;
use buildlib::errors::LookupError;
use clap::Parser;

/// Adds jobs to a view. Succeeds silently; adding a job already in the
/// view is a no-op.
pub struct AddJobToView;

#[derive(Debug, Parser)]
#[clap(name = "add-job-to-view")]
struct Args {
    /// Name of the view
    view: String,
    /// Names of the jobs to add
    #[clap(required = true)]
    jobs: Vec<String>,
}

const REQUIRED: &[Capability] = &[
    Capability::OverallRead,
    Capability::ViewRead,
    Capability::JobRead,
    Capability::ViewConfigure,
];

#[async_trait]
impl CliCommand for AddJobToView {
    fn name(&self) -> &'static str {
        "add-job-to-view"
    }

    fn required_capabilities(&self) -> &'static [Capability] {
        REQUIRED
    }

    async fn run(&self, ctx: &Context, args: &[String]) -> Result<String, CommandError> {
        let args: Args = parse_args(self.name(), args)?;

        if !ctx.views().view_exists(&args.view) {
            return Err(LookupError::NoSuchView(args.view).into());
        }
        // validate the whole batch left to right before touching the
        // view, so one bad name leaves the membership untouched
        for job in &args.jobs {
            if !ctx.registry().job_exists(job).await {
                return Err(LookupError::NoSuchJob(job.clone()).into());
            }
        }
        ctx.views().add_jobs(&args.view, &args.jobs)?;
        Ok(String::new())
    }
}
