use super::ProjectId;
use std::cmp::Ordering;
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct StudentId(pub usize);

#[derive(Clone, Debug)]
pub struct StudentEntry {
    pub identifier: String,
    pub gpa: f64,
    /// Raw project references, most preferred first.
    pub preferences: Vec<String>,
}

impl StudentEntry {
    pub fn new<S, P>(identifier: S, gpa: f64, preferences: P) -> StudentEntry
    where
        S: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        StudentEntry {
            identifier: identifier.into(),
            gpa,
            preferences: preferences.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Student {
    pub identifier: String,
    pub gpa: f64,
    pub rankings: Vec<ProjectId>,
}

impl Student {
    pub fn new(identifier: String, gpa: f64, rankings: Vec<ProjectId>) -> Student {
        Student {
            identifier,
            // -0.0 and 0.0 must not be told apart by the tie-break.
            gpa: gpa + 0.0,
            rankings,
        }
    }

    pub fn rank_of(&self, project: ProjectId) -> Option<usize> {
        self.rankings.iter().position(|&p| p == project)
    }

    pub fn is_lazy(&self) -> bool {
        self.rankings.is_empty()
    }

    /// Compare acceptance priorities. `Ordering::Less` means that `self`
    /// is accepted before `other`: higher GPA first, then smaller identifier.
    pub fn cmp_priority(&self, other: &Student) -> Ordering {
        other
            .gpa
            .total_cmp(&self.gpa)
            .then_with(|| self.identifier.cmp(&other.identifier))
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identifier)
    }
}
