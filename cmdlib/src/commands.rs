pub mod add_job_to_view;
pub mod build_range;
pub mod remove_jobs_from_view;

use crate::command::CliCommand;

pub use add_job_to_view::AddJobToView;
pub use build_range::BuildRange;
pub use remove_jobs_from_view::RemoveJobsFromView;

/// Look a command up by its CLI name.
pub fn by_name(name: &str) -> Option<Box<dyn CliCommand>> {
    match name {
        "add-job-to-view" => Some(Box::new(AddJobToView)),
        "remove-jobs-from-view" => Some(Box::new(RemoveJobsFromView)),
        "build-range" => Some(Box::new(BuildRange)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_commands_by_cli_name() {
        for name in ["add-job-to-view", "remove-jobs-from-view", "build-range"] {
            assert_eq!(by_name(name).unwrap().name(), name);
        }
        assert!(by_name("no-such-command").is_none());
    }
}
