//! Resolution of raw project references into dense project ids.
//!
//! Students may designate a project by its canonical key or by any of its
//! aliases. Every form is mapped to the same `ProjectId`, unknown references
//! are dropped, and so are repeated ones.

use crate::checks;
use crate::error::Result;
use crate::model::{Assignments, Project, ProjectEntry, ProjectId, Student, StudentEntry};
use std::collections::hash_map::{Entry, HashMap};
use std::collections::HashSet;
use tracing::{trace, warn};

#[derive(Debug, Default)]
pub struct ProjectIndex {
    by_reference: HashMap<String, ProjectId>,
    keys: Vec<String>,
}

impl ProjectIndex {
    pub fn new(projects: &[Project]) -> ProjectIndex {
        ProjectIndex {
            by_reference: projects
                .iter()
                .map(|p| (p.key.trim().to_owned(), p.id))
                .collect(),
            keys: projects.iter().map(|p| p.key.clone()).collect(),
        }
    }

    /// Index the canonical keys, then the aliases of the matching entries.
    ///
    /// Keys win over aliases. An alias shared by several projects resolves
    /// to none of them.
    fn with_aliases(projects: &[Project], entries: &[ProjectEntry]) -> ProjectIndex {
        let mut index = ProjectIndex::new(projects);
        let mut aliases: HashMap<&str, Option<ProjectId>> = HashMap::new();
        for (p, entry) in projects.iter().zip(entries) {
            for alias in entry.aliases.iter().map(|a| a.trim()) {
                if alias.is_empty() {
                    continue;
                }
                if let Some(&owner) = index.by_reference.get(alias) {
                    if owner != p.id {
                        warn!(
                            alias,
                            project = index.key(p.id),
                            key_of = index.key(owner),
                            "alias is another project's key, ignoring it"
                        );
                    }
                    continue;
                }
                match aliases.entry(alias) {
                    Entry::Vacant(e) => {
                        e.insert(Some(p.id));
                    }
                    Entry::Occupied(mut e) => {
                        if let Some(first) = *e.get() {
                            if first != p.id {
                                warn!(
                                    alias,
                                    first = index.key(first),
                                    second = index.key(p.id),
                                    "ambiguous alias, references to it will be dropped"
                                );
                                e.insert(None);
                            }
                        }
                    }
                }
            }
        }
        index.by_reference.extend(
            aliases
                .into_iter()
                .filter_map(|(alias, p)| p.map(|p| (alias.to_owned(), p))),
        );
        index
    }

    pub fn resolve(&self, reference: &str) -> Option<ProjectId> {
        self.by_reference.get(reference.trim()).copied()
    }

    pub fn key(&self, ProjectId(project): ProjectId) -> &str {
        &self.keys[project]
    }
}

/// Turn raw references into canonical project ids, keeping the input
/// order and the first occurrence of every project.
pub fn normalize_preferences<S: AsRef<str>>(raw: &[S], index: &ProjectIndex) -> Vec<ProjectId> {
    let mut seen = HashSet::new();
    raw.iter()
        .filter_map(|reference| {
            let reference = reference.as_ref();
            let project = index.resolve(reference);
            if project.is_none() {
                trace!(reference, "dropping unknown project reference");
            }
            project
        })
        .filter(|&p| seen.insert(p))
        .collect()
}

/// Build a blank `Assignments` from a snapshot: validate it, number students
/// and projects in input order, and normalize every preference list.
pub fn remap(students: &[StudentEntry], projects: &[ProjectEntry]) -> Result<Assignments> {
    checks::check_snapshot(students, projects)?;
    let projects_model = projects
        .iter()
        .enumerate()
        .map(|(n, p)| Project {
            id: ProjectId(n),
            key: p.key.trim().to_owned(),
            name: p.name.clone(),
            capacity: p.capacity as u32,
        })
        .collect::<Vec<_>>();
    let index = ProjectIndex::with_aliases(&projects_model, projects);
    let students = students
        .iter()
        .map(|s| {
            Student::new(
                s.identifier.clone(),
                s.gpa,
                normalize_preferences(&s.preferences, &index),
            )
        })
        .collect();
    Ok(Assignments::new(students, projects_model))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MatchingError;
    use crate::model::StudentId;

    fn entries() -> Vec<ProjectEntry> {
        vec![
            ProjectEntry::new("P-1", 1).with_alias("17").with_alias("Compilers"),
            ProjectEntry::new("P-2", 2).with_alias("18"),
            ProjectEntry::new("P-3", 1),
        ]
    }

    fn index() -> ProjectIndex {
        let a = remap(&[], &entries()).unwrap();
        ProjectIndex::with_aliases(&a.projects, &entries())
    }

    #[test]
    fn resolves_every_identifier_form() {
        let index = index();
        assert_eq!(index.resolve("P-1"), Some(ProjectId(0)));
        assert_eq!(index.resolve("17"), Some(ProjectId(0)));
        assert_eq!(index.resolve(" Compilers "), Some(ProjectId(0)));
        assert_eq!(index.resolve("18"), Some(ProjectId(1)));
        assert_eq!(index.resolve("19"), None);
        assert_eq!(index.key(ProjectId(1)), "P-2");
    }

    #[test]
    fn drops_unknown_and_repeated_references() {
        let raw = ["18", "nope", "P-1", "P-2", "Compilers", "P-3", "17"];
        assert_eq!(
            normalize_preferences(&raw, &index()),
            vec![ProjectId(1), ProjectId(0), ProjectId(2)]
        );
    }

    #[test]
    fn normalization_is_idempotent() {
        let index = index();
        let once = normalize_preferences(&["Compilers", "P-3", "junk", "18", "P-3"], &index);
        let keys = once.iter().map(|&p| index.key(p)).collect::<Vec<_>>();
        assert_eq!(normalize_preferences(&keys, &index), once);
    }

    #[test]
    fn empty_list_stays_empty() {
        assert!(normalize_preferences::<&str>(&[], &index()).is_empty());
    }

    #[test]
    fn shared_alias_resolves_to_nothing() {
        let projects = vec![
            ProjectEntry::new("1", 1).with_alias("Compilers"),
            ProjectEntry::new("2", 1).with_alias("Compilers"),
            ProjectEntry::new("3", 1).with_alias("Compilers").with_alias("Networks"),
        ];
        let a = remap(&[], &projects).unwrap();
        let index = ProjectIndex::with_aliases(&a.projects, &projects);
        assert_eq!(index.resolve("Compilers"), None);
        assert_eq!(index.resolve("Networks"), Some(ProjectId(2)));
        assert_eq!(index.resolve("2"), Some(ProjectId(1)));
    }

    #[test]
    fn key_wins_over_alias_of_another_project() {
        let projects = vec![
            ProjectEntry::new("A", 1).with_alias("B"),
            ProjectEntry::new("B", 1),
        ];
        let a = remap(&[], &projects).unwrap();
        let index = ProjectIndex::with_aliases(&a.projects, &projects);
        assert_eq!(index.resolve("B"), Some(ProjectId(1)));
    }

    #[test]
    fn alias_repeating_own_key_is_fine() {
        let projects = vec![ProjectEntry::new("x", 1).with_alias("x").with_alias(" x ")];
        let a = remap(&[], &projects).unwrap();
        let index = ProjectIndex::with_aliases(&a.projects, &projects);
        assert_eq!(index.resolve("x"), Some(ProjectId(0)));
    }

    #[test]
    fn remap_numbers_in_input_order() {
        let students = vec![
            StudentEntry::new("zed", 2.5, ["P-3", "17"]),
            StudentEntry::new("amy", 3.5, Vec::<String>::new()),
        ];
        let a = remap(&students, &entries()).unwrap();
        assert_eq!(a.student(StudentId(0)).identifier, "zed");
        assert_eq!(a.rankings(StudentId(0)), &[ProjectId(2), ProjectId(0)]);
        assert!(a.is_lazy(StudentId(1)));
        assert_eq!(a.capacity(ProjectId(1)), 2);
        assert!(a.unassigned_students().len() == 2);
    }

    #[test]
    fn remap_rejects_invalid_snapshot() {
        let mut projects = entries();
        projects[0].capacity = 0;
        assert!(matches!(
            remap(&[], &projects),
            Err(MatchingError::InvalidCapacity { .. })
        ));
    }
}
