use crate::capabilities::Capability;
use crate::command::{parse_args, CliCommand, CommandError};
use crate::context::Context;
use async_trait::async_trait;
use buildlib::errors::LookupError;
use clap::Parser;

/// Removes jobs from a view. Succeeds silently; removing a job that is
/// not a member is a no-op.
pub struct RemoveJobsFromView;

#[derive(Debug, Parser)]
#[clap(name = "remove-jobs-from-view")]
struct Args {
    /// Name of the view
    view: String,
    /// Names of the jobs to remove
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
impl CliCommand for RemoveJobsFromView {
    fn name(&self) -> &'static str {
        "remove-jobs-from-view"
    }

    fn required_capabilities(&self) -> &'static [Capability] {
        REQUIRED
    }

    async fn run(&self, ctx: &Context, args: &[String]) -> Result<String, CommandError> {
        let args: Args = parse_args(self.name(), args)?;

        if !ctx.views().view_exists(&args.view) {
            return Err(LookupError::NoSuchView(args.view).into());
        }
        for job in &args.jobs {
            if !ctx.registry().job_exists(job).await {
                return Err(LookupError::NoSuchJob(job.clone()).into());
            }
        }
        ctx.views().remove_jobs(&args.view, &args.jobs)?;
        Ok(String::new())
    }
}
