//! Assignment of capacity-constrained projects to students.
//!
//! Students rank projects; projects accept students by decreasing GPA, the
//! student identifier breaking ties. The matching is computed with
//! student-proposing deferred acceptance and is therefore stable and
//! student-optimal.
//!
//! ```
//! use rmatch::{ProjectEntry, StudentEntry, run_matching};
//!
//! let students = vec![
//!     StudentEntry::new("A", 3.9, ["X", "Y"]),
//!     StudentEntry::new("B", 3.5, ["X", "Y"]),
//!     StudentEntry::new("C", 3.2, ["Y", "X"]),
//! ];
//! let projects = vec![ProjectEntry::new("X", 1), ProjectEntry::new("Y", 1)];
//! let records = run_matching(&students, &projects).unwrap();
//! let pairs: Vec<_> = records
//!     .iter()
//!     .map(|r| (r.student.as_str(), r.project.as_str()))
//!     .collect();
//! assert_eq!(pairs, vec![("A", "X"), ("B", "Y")]);
//! ```

use chrono::{DateTime, Utc};

pub mod algo;
pub mod checks;
pub mod config;
pub mod display;
pub mod error;
pub mod loaders;
pub mod materialize;
pub mod model;
pub mod remap;
pub mod stats;

pub use algo::{DeferredAcceptance, RunStats};
pub use error::MatchingError;
pub use materialize::AssignmentRecord;
pub use model::{ProjectEntry, StudentEntry};

/// Match `students` to `projects` and return one record per matched student,
/// stamped with the completion time of the run.
pub fn run_matching(
    students: &[StudentEntry],
    projects: &[ProjectEntry],
) -> Result<Vec<AssignmentRecord>, MatchingError> {
    let assignments = solve(students, projects)?;
    Ok(materialize::materialize(&assignments, Utc::now()))
}

/// Same as `run_matching`, with an explicit timestamp.
pub fn run_matching_at(
    students: &[StudentEntry],
    projects: &[ProjectEntry],
    assigned_at: DateTime<Utc>,
) -> Result<Vec<AssignmentRecord>, MatchingError> {
    let assignments = solve(students, projects)?;
    Ok(materialize::materialize(&assignments, assigned_at))
}

fn solve(
    students: &[StudentEntry],
    projects: &[ProjectEntry],
) -> Result<model::Assignments, MatchingError> {
    let mut assignments = remap::remap(students, projects)?;
    DeferredAcceptance::new(&mut assignments).assign();
    Ok(assignments)
}
