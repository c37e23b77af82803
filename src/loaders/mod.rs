//! Snapshot sources. Both loaders accept a project's name as an alias of
//! its key.

use crate::model::{ProjectEntry, StudentEntry};
use std::collections::HashMap;
use tracing::{trace, warn};

pub use self::csv_loader::CsvLoader;
pub use self::db_loader::DbLoader;

mod csv_loader;
mod db_loader;

fn project_entry<I>(key: String, name: String, capacity: i64, aliases: I) -> ProjectEntry
where
    I: IntoIterator<Item = String>,
{
    let aliases = std::iter::once(name.clone())
        .chain(aliases)
        .filter(|a| !a.trim().is_empty())
        .collect();
    ProjectEntry {
        key,
        name,
        capacity,
        aliases,
    }
}

/// Fill each student's preference list from `(student, project, rank)` rows,
/// ordered by increasing rank. Rows of unknown students are ignored.
fn attach_preferences<I>(mut students: Vec<StudentEntry>, rows: I) -> Vec<StudentEntry>
where
    I: IntoIterator<Item = (String, String, i64)>,
{
    let positions = students
        .iter()
        .enumerate()
        .map(|(n, s)| (s.identifier.clone(), n))
        .collect::<HashMap<_, _>>();
    let mut ranked = vec![Vec::new(); students.len()];
    for (student, project, rank) in rows {
        match positions.get(&student) {
            Some(&n) => ranked[n].push((rank, project)),
            None => warn!(%student, %project, "ignoring preference of unknown student"),
        }
    }
    for (student, mut choices) in students.iter_mut().zip(ranked) {
        choices.sort_by_key(|&(rank, _)| rank);
        student.preferences = choices.into_iter().map(|(_, p)| p).collect();
        trace!(
            student = %student.identifier,
            preferences = ?student.preferences,
            "student preferences loaded",
        );
    }
    students
}
