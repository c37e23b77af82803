use crate::model::Assignments;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AssignmentRecord {
    pub student: String,
    pub project: String,
    pub assigned_at: DateTime<Utc>,
}

/// Flatten the held sets into assignment records, project by project, each
/// held set in priority order.
pub fn materialize(a: &Assignments, assigned_at: DateTime<Utc>) -> Vec<AssignmentRecord> {
    a.all_projects()
        .into_iter()
        .flat_map(|p| {
            a.students_for(p).iter().map(move |&s| AssignmentRecord {
                student: a.student(s).identifier.clone(),
                project: a.project(p).key.clone(),
                assigned_at,
            })
        })
        .collect()
}
