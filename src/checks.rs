use crate::error::{MatchingError, Result};
use crate::model::{Assignments, ProjectEntry, StudentEntry};
use eyre::{bail, ensure};
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::warn;

/// Reject snapshots the engine must not start on.
pub fn check_snapshot(students: &[StudentEntry], projects: &[ProjectEntry]) -> Result<()> {
    let mut keys = HashSet::new();
    for p in projects {
        if p.capacity <= 0 || u32::try_from(p.capacity).is_err() {
            return Err(MatchingError::InvalidCapacity {
                key: p.key.clone(),
                capacity: p.capacity,
            });
        }
        if !keys.insert(p.key.trim()) {
            return Err(MatchingError::DuplicateProject(p.key.clone()));
        }
    }
    let mut identifiers = HashSet::new();
    for s in students {
        if !s.gpa.is_finite() {
            return Err(MatchingError::InvalidGpa {
                identifier: s.identifier.clone(),
            });
        }
        if !identifiers.insert(s.identifier.as_str()) {
            return Err(MatchingError::DuplicateStudent(s.identifier.clone()));
        }
    }
    Ok(())
}

pub fn ensure_within_capacity(a: &Assignments) -> eyre::Result<()> {
    let mut seen = HashSet::new();
    for p in a.all_projects() {
        ensure!(
            a.size(p) <= a.capacity(p),
            "project {} holds {} students for a capacity of {}",
            a.project(p),
            a.size(p),
            a.capacity(p)
        );
        for &s in a.students_for(p) {
            ensure!(
                seen.insert(s),
                "student {} is assigned to more than one project",
                a.student(s)
            );
        }
    }
    Ok(())
}

/// Check that no student would be accepted by a project they prefer to the
/// one they got.
pub fn ensure_stable(a: &Assignments) -> eyre::Result<()> {
    for s in a.all_students() {
        let student = a.student(s);
        let better = match a.project_for(s) {
            Some(p) => match student.rank_of(p) {
                Some(rank) => &student.rankings[..rank],
                None => bail!("student {student} holds unranked project {}", a.project(p)),
            },
            None => &student.rankings[..],
        };
        for &p in better.iter().filter(|&&p| a.is_known(p)) {
            if !a.is_at_capacity(p) {
                bail!(
                    "student {student} would be accepted by project {} which has spare seats",
                    a.project(p)
                );
            }
            if let Some(lowest) = a.lowest_priority_for(p) {
                if student.cmp_priority(a.student(lowest)) != Ordering::Greater {
                    bail!(
                        "student {student} would displace {} from project {}",
                        a.student(lowest),
                        a.project(p)
                    );
                }
            }
        }
    }
    Ok(())
}

pub fn warn_unmatched(a: &Assignments) {
    for s in a.unmatched_students() {
        warn!(
            student = %a.student(s),
            choices = a.rankings(s).len(),
            "student did not get any of their choices"
        );
    }
}
