//! Build-range resolution.
//!
//! A range expression names one or more build indices. Each requested
//! index is resolved independently against a single job snapshot, in
//! source priority order: completed history, then the in-flight
//! execution, then the pending queue. Because every index resolves to
//! one closed variant, a report line can never mix the states (a
//! completed-style line with no summary data cannot be constructed).

use buildlib::model::{BuildResult, JobSnapshot};
use buildlib::types::BuildNumber;
use std::fmt;
use thiserror::Error;

/// The build indices a range expression denotes, in the order they were
/// requested. Grammar: comma-separated tokens, each either `N` or
/// `A-B` with `1 <= A <= B`. Indices are not deduplicated or sorted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RangeSpec {
    indices: Vec<BuildNumber>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unable to parse the range '{0}'")]
pub struct RangeParseError(pub String);

impl RangeSpec {
    pub fn parse(text: &str) -> Result<Self, RangeParseError> {
        let err = || RangeParseError(text.to_string());
        let mut indices = Vec::new();
        for token in text.split(',') {
            let token = token.trim();
            match token.split_once('-') {
                Some((lo, hi)) => {
                    let lo: BuildNumber = lo.trim().parse().map_err(|_| err())?;
                    let hi: BuildNumber = hi.trim().parse().map_err(|_| err())?;
                    if lo == 0 || lo > hi {
                        return Err(err());
                    }
                    indices.extend(lo..=hi);
                }
                None => {
                    let number: BuildNumber = token.parse().map_err(|_| err())?;
                    if number == 0 {
                        return Err(err());
                    }
                    indices.push(number);
                }
            }
        }
        Ok(Self { indices })
    }

    pub fn indices(&self) -> &[BuildNumber] {
        &self.indices
    }
}

/// One resolved index, tagged by the state that accounted for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RangeLine {
    /// A durable completed build; renders with its summary.
    Completed {
        number: BuildNumber,
        result: BuildResult,
    },
    /// Bound to an execution that has not completed yet; renders the
    /// bare number, no summary fields.
    Running { number: BuildNumber },
    /// The job is waiting in the queue and nothing claims the index
    /// yet; the report carries no line body for it.
    Pending,
}

impl RangeLine {
    /// The line body, or `None` when the state contributes none.
    pub fn render(&self) -> Option<String> {
        match self {
            RangeLine::Completed { number, result } => Some(format!("{}({})", number, result)),
            RangeLine::Running { number } => Some(number.to_string()),
            RangeLine::Pending => None,
        }
    }
}

/// Resolve every requested index against one snapshot. Indices no
/// source accounts for produce no line at all; a job with no builds
/// resolves every range to an empty report, never a failure.
pub fn resolve(snapshot: &JobSnapshot, spec: &RangeSpec) -> Vec<RangeLine> {
    spec.indices()
        .iter()
        .filter_map(|&number| classify(snapshot, number))
        .collect()
}

fn classify(snapshot: &JobSnapshot, number: BuildNumber) -> Option<RangeLine> {
    if let Some(build) = snapshot.builds.get(&number) {
        return Some(RangeLine::Completed {
            number: build.number,
            result: build.result,
        });
    }
    if let Some(execution) = snapshot.execution {
        if execution.number == number {
            return Some(RangeLine::Running { number });
        }
    }
    if snapshot.queue.is_some() {
        return Some(RangeLine::Pending);
    }
    None
}

/// The report the range command prints: the header, the space-joined
/// line bodies, and the platform line separator. Emitted even when no
/// line resolved.
pub fn render_report(lines: &[RangeLine]) -> String {
    let bodies: Vec<String> = lines.iter().filter_map(RangeLine::render).collect();
    format!("Builds: {}{}", bodies.join(" "), crate::command::LINE_SEP)
}

impl fmt::Display for RangeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.indices.iter().map(ToString::to_string).collect();
        f.write_str(&rendered.join(","))
    }
}
