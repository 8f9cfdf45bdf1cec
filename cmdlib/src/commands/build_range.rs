use crate::capabilities::Capability;
use crate::command::{parse_args, CliCommand, CommandError, LINE_SEP};
use crate::context::Context;
use crate::range::{self, RangeSpec};
use async_trait::async_trait;
use buildlib::errors::LookupError;
use clap::Parser;

/// Reports one line per requested build index, drawn from completed
/// history, the in-flight execution or the pending queue. The `Builds: `
/// header is printed even when nothing resolved; a job with no builds
/// is a success, not an error.
pub struct BuildRange;

#[derive(Debug, Parser)]
#[clap(name = "build-range")]
struct Args {
    /// Name of the job
    job: String,
    /// Build range, e.g. `1`, `1,4` or `2-5`
    range: String,
}

const REQUIRED: &[Capability] = &[Capability::OverallRead, Capability::JobRead];

#[async_trait]
impl CliCommand for BuildRange {
    fn name(&self) -> &'static str {
        "build-range"
    }

    fn required_capabilities(&self) -> &'static [Capability] {
        REQUIRED
    }

    async fn run(&self, ctx: &Context, args: &[String]) -> Result<String, CommandError> {
        let args: Args = parse_args(self.name(), args)?;
        // range shape is checked before the job lookup
        let spec = RangeSpec::parse(&args.range)
            .map_err(|err| CommandError::BadArgs(format!("{}{}", err, LINE_SEP)))?;
        tracing::debug!(job = %args.job, range = %spec, "resolving build range");

        let snapshot = ctx
            .registry()
            .snapshot(&args.job)
            .await
            .ok_or(LookupError::NoSuchJob(args.job))?;

        let lines = range::resolve(&snapshot, &spec);
        Ok(range::render_report(&lines))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoker::Invoker;
    use buildlib::BuildResult;
    use bytes::Bytes;
    use Capability::*;

    async fn context_with_job() -> Context {
        let ctx = Context::new(32);
        ctx.registry().create_job("aProject").await.unwrap();
        ctx
    }

    async fn invoke(ctx: &Context, args: &[&str]) -> crate::command::Outcome {
        let mut invoker = Invoker::new(ctx, Box::new(BuildRange));
        invoker
            .authorized_to([OverallRead, JobRead])
            .invoke_with_args(args)
            .await
    }

    #[tokio::test]
    async fn fails_if_job_name_is_empty() {
        let ctx = context_with_job().await;

        let result = invoke(&ctx, &["", "1"]).await;

        assert!(result.failed_with(3));
        assert!(result.has_no_stdout());
        assert!(result.stderr.contains("ERROR: No such job ''"));
    }

    #[tokio::test]
    async fn fails_if_job_name_is_a_single_space() {
        let ctx = context_with_job().await;

        let result = invoke(&ctx, &[" ", "1"]).await;

        assert!(result.failed_with(3));
        assert!(result.has_no_stdout());
        assert!(result.stderr.contains("ERROR: No such job ' '"));
    }

    #[tokio::test]
    async fn succeeds_while_the_build_is_running() {
        let ctx = context_with_job().await;
        ctx.registry().enqueue("aProject").await.unwrap();
        let handle = ctx.registry().begin_build("aProject").await.unwrap();
        assert_eq!(handle.number, 1);

        let result = invoke(&ctx, &["aProject", "1"]).await;

        assert!(result.succeeded());
        assert!(result.stdout.contains(&format!("Builds: 1{}", LINE_SEP)));
    }

    #[tokio::test]
    async fn succeeds_while_the_build_is_stuck_in_the_queue() {
        let ctx = context_with_job().await;
        ctx.registry().enqueue("aProject").await.unwrap();

        let result = invoke(&ctx, &["aProject", "1"]).await;

        assert!(result.succeeded());
        assert_eq!(result.stdout, format!("Builds: {}", LINE_SEP));
    }

    #[tokio::test]
    async fn completed_build_is_summarized() {
        let ctx = context_with_job().await;
        ctx.registry().begin_build("aProject").await.unwrap();
        ctx.registry()
            .finish_build("aProject", BuildResult::Success, Bytes::from_static(b"echo 1"))
            .await
            .unwrap();

        let result = invoke(&ctx, &["aProject", "1"]).await;

        assert!(result.succeeded());
        assert_eq!(result.stdout, format!("Builds: 1(SUCCESS){}", LINE_SEP));
    }

    #[tokio::test]
    async fn job_with_no_builds_resolves_any_range_to_an_empty_report() {
        let ctx = context_with_job().await;

        let result = invoke(&ctx, &["aProject", "1-5,7"]).await;

        assert!(result.succeeded());
        assert_eq!(result.stdout, format!("Builds: {}", LINE_SEP));
        assert!(result.stderr.is_empty());
    }

    #[tokio::test]
    async fn history_execution_and_queue_merge_into_one_report() {
        let ctx = context_with_job().await;
        for _ in 0..2 {
            ctx.registry().begin_build("aProject").await.unwrap();
            ctx.registry()
                .finish_build("aProject", BuildResult::Success, Bytes::new())
                .await
                .unwrap();
        }
        ctx.registry().begin_build("aProject").await.unwrap(); // build 3 in flight
        ctx.registry().enqueue("aProject").await.unwrap(); // build 4 still queued

        let result = invoke(&ctx, &["aProject", "1-4"]).await;

        assert!(result.succeeded());
        assert_eq!(
            result.stdout,
            format!("Builds: 1(SUCCESS) 2(SUCCESS) 3{}", LINE_SEP)
        );
    }

    #[tokio::test]
    async fn malformed_range_fails_before_the_job_lookup() {
        let ctx = Context::new(32);
        // the job does not exist either; the range error must win
        let result = invoke(&ctx, &["ghost", "5-3"]).await;

        assert!(result.failed_with(2));
        assert!(result.has_no_stdout());
        assert!(result
            .stderr
            .contains("Unable to parse the range '5-3'"));
    }

    #[tokio::test]
    async fn a_snapshot_never_mixes_states() {
        let ctx = context_with_job().await;
        ctx.registry().begin_build("aProject").await.unwrap();

        // resolve against the running state, then complete the build
        let running = invoke(&ctx, &["aProject", "1"]).await;
        ctx.registry()
            .finish_build("aProject", BuildResult::Success, Bytes::new())
            .await
            .unwrap();
        let completed = invoke(&ctx, &["aProject", "1"]).await;

        // each report reflects exactly one state of the build
        assert_eq!(running.stdout, format!("Builds: 1{}", LINE_SEP));
        assert_eq!(
            completed.stdout,
            format!("Builds: 1(SUCCESS){}", LINE_SEP)
        );
    }
}
