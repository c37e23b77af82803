//! Student-proposing deferred acceptance with capacitated projects.
//!
//! Free students propose to their next choice in FIFO order. A project
//! provisionally holds its best applicants (higher GPA first, identifier as
//! a tie-break) and rejects whoever falls beyond its capacity. Each proposal
//! consumes one entry of a finite preference list, so the number of
//! proposals never exceeds the total length of all lists.

use crate::model::{Assignments, ProjectId, StudentId};
use std::collections::VecDeque;
use tracing::{debug, info, instrument, trace, warn};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RunStats {
    pub proposals: usize,
    pub rejections: usize,
}

pub struct DeferredAcceptance<'a> {
    assignments: &'a mut Assignments,
    cursors: Vec<usize>,
    free: VecDeque<StudentId>,
    stats: RunStats,
}

impl<'a> DeferredAcceptance<'a> {
    pub fn new(assignments: &'a mut Assignments) -> DeferredAcceptance<'a> {
        DeferredAcceptance {
            assignments,
            cursors: Vec::new(),
            free: VecDeque::new(),
            stats: RunStats::default(),
        }
    }

    /// Run the matching to completion, starting from a blank slate. Results
    /// are left in the held sets of the underlying `Assignments`.
    #[instrument(skip_all)]
    pub fn assign(&mut self) -> RunStats {
        self.reset();
        while let Some(student) = self.free.pop_front() {
            match self.next_choice(student) {
                Some(project) => self.propose(student, project),
                None => debug!(
                    student = %self.assignments.student(student),
                    "student has no valid choice left"
                ),
            }
        }
        info!(
            proposals = self.stats.proposals,
            rejections = self.stats.rejections,
            unmatched = self.assignments.unmatched_students().len(),
            "matching complete"
        );
        self.stats
    }

    pub fn get_assignments(&self) -> &Assignments {
        self.assignments
    }

    fn reset(&mut self) {
        self.assignments.clear_all_assignments();
        self.cursors = vec![0; self.assignments.students.len()];
        self.free = self
            .assignments
            .all_students()
            .into_iter()
            .filter(|&s| !self.assignments.is_lazy(s))
            .collect();
        self.stats = RunStats::default();
    }

    fn is_exhausted(&self, student: StudentId) -> bool {
        self.cursors[student.0] >= self.assignments.rankings(student).len()
    }

    fn next_choice(&mut self, student: StudentId) -> Option<ProjectId> {
        while !self.is_exhausted(student) {
            let project = self.assignments.rankings(student)[self.cursors[student.0]];
            self.cursors[student.0] += 1;
            if self.assignments.is_known(project) {
                return Some(project);
            }
            warn!(
                student = %self.assignments.student(student),
                project = project.0,
                "skipping proposal to unknown project"
            );
        }
        None
    }

    fn propose(&mut self, student: StudentId, project: ProjectId) {
        self.stats.proposals += 1;
        trace!(
            student = %self.assignments.student(student),
            project = %self.assignments.project(project),
            "proposal"
        );
        self.assignments.assign_to(student, project);
        self.assignments.sort_students_for(project);
        if !self.assignments.is_over_capacity(project) {
            return;
        }
        let Some(rejected) = self.assignments.lowest_priority_for(project) else {
            return;
        };
        self.assignments.unassign_from(rejected, project);
        self.stats.rejections += 1;
        trace!(
            student = %self.assignments.student(rejected),
            project = %self.assignments.project(project),
            bumped = rejected != student,
            "rejection"
        );
        if self.is_exhausted(rejected) {
            debug!(
                student = %self.assignments.student(rejected),
                "student exhausted their choices"
            );
        } else {
            self.free.push_back(rejected);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Project, ProjectEntry, Student, StudentEntry};
    use crate::remap::remap;

    fn held(a: &Assignments) -> Vec<(String, String)> {
        let mut result = a
            .all_students()
            .into_iter()
            .filter_map(|s| {
                a.project_for(s)
                    .map(|p| (a.student(s).identifier.clone(), a.project(p).key.clone()))
            })
            .collect::<Vec<_>>();
        result.sort();
        result
    }

    fn pairs(expected: &[(&str, &str)]) -> Vec<(String, String)> {
        expected
            .iter()
            .map(|&(s, p)| (s.to_owned(), p.to_owned()))
            .collect()
    }

    #[test]
    fn highest_gpa_wins_and_bumped_student_moves_on() {
        let students = vec![
            StudentEntry::new("A", 3.9, ["X", "Y"]),
            StudentEntry::new("B", 3.5, ["X", "Y"]),
            StudentEntry::new("C", 3.2, ["Y", "X"]),
        ];
        let projects = vec![ProjectEntry::new("X", 1), ProjectEntry::new("Y", 1)];
        let mut a = remap(&students, &projects).unwrap();
        let stats = DeferredAcceptance::new(&mut a).assign();
        assert_eq!(held(&a), pairs(&[("A", "X"), ("B", "Y")]));
        assert_eq!(a.unmatched_students(), vec![StudentId(2)]);
        // A:X, B:X, C:Y, B:Y (bumps C), C:X (rejected)
        assert_eq!(stats.proposals, 5);
        assert_eq!(stats.rejections, 3);
    }

    #[test]
    fn capacity_two_keeps_the_two_best() {
        let students = vec![
            StudentEntry::new("low", 2.0, ["X", "Y"]),
            StudentEntry::new("high", 4.0, ["X"]),
            StudentEntry::new("mid", 3.0, ["X"]),
        ];
        let projects = vec![ProjectEntry::new("X", 2), ProjectEntry::new("Y", 1)];
        let mut a = remap(&students, &projects).unwrap();
        DeferredAcceptance::new(&mut a).assign();
        assert_eq!(
            held(&a),
            pairs(&[("high", "X"), ("low", "Y"), ("mid", "X")])
        );
        assert_eq!(a.students_for(ProjectId(0)), &[StudentId(1), StudentId(2)]);
    }

    #[test]
    fn rejected_student_without_other_choice_stays_unmatched() {
        let students = vec![
            StudentEntry::new("a", 3.0, ["X"]),
            StudentEntry::new("b", 3.1, ["X"]),
        ];
        let mut a = remap(&students, &[ProjectEntry::new("X", 1)]).unwrap();
        DeferredAcceptance::new(&mut a).assign();
        assert_eq!(held(&a), pairs(&[("b", "X")]));
        assert_eq!(a.unmatched_students(), vec![StudentId(0)]);
    }

    #[test]
    fn equal_gpa_is_broken_by_identifier() {
        let students = vec![
            StudentEntry::new("bob", 3.0, ["X"]),
            StudentEntry::new("alice", 3.0, ["X"]),
        ];
        let mut a = remap(&students, &[ProjectEntry::new("X", 1)]).unwrap();
        DeferredAcceptance::new(&mut a).assign();
        assert_eq!(held(&a), pairs(&[("alice", "X")]));
    }

    #[test]
    fn lazy_students_are_never_matched() {
        let students = vec![
            StudentEntry::new("lazy", 4.0, Vec::<String>::new()),
            StudentEntry::new("typo", 4.0, ["nowhere"]),
            StudentEntry::new("eager", 1.0, ["X"]),
        ];
        let mut a = remap(&students, &[ProjectEntry::new("X", 3)]).unwrap();
        let stats = DeferredAcceptance::new(&mut a).assign();
        assert_eq!(held(&a), pairs(&[("eager", "X")]));
        assert_eq!(stats.proposals, 1);
        assert!(a.unmatched_students().is_empty());
    }

    #[test]
    fn unknown_projects_are_skipped() {
        let students = vec![Student::new("s".into(), 3.0, vec![ProjectId(7), ProjectId(0)])];
        let projects = vec![Project {
            id: ProjectId(0),
            key: "X".into(),
            name: "X".into(),
            capacity: 1,
        }];
        let mut a = Assignments::new(students, projects);
        let stats = DeferredAcceptance::new(&mut a).assign();
        assert_eq!(a.project_for(StudentId(0)), Some(ProjectId(0)));
        assert_eq!(stats.proposals, 1);
    }

    #[test]
    fn rerun_starts_from_a_blank_slate() {
        let students = vec![
            StudentEntry::new("A", 3.9, ["X", "Y"]),
            StudentEntry::new("B", 3.5, ["X", "Y"]),
            StudentEntry::new("C", 3.2, ["Y", "X"]),
        ];
        let projects = vec![ProjectEntry::new("X", 1), ProjectEntry::new("Y", 1)];
        let mut a = remap(&students, &projects).unwrap();
        a.assign_to(StudentId(2), ProjectId(0));
        let mut algo = DeferredAcceptance::new(&mut a);
        let first = algo.assign();
        let second = algo.assign();
        assert_eq!(first, second);
        assert_eq!(held(algo.get_assignments()), pairs(&[("A", "X"), ("B", "Y")]));
    }

    #[test]
    fn fifo_order_does_not_change_the_outcome() {
        let projects = vec![
            ProjectEntry::new("X", 1),
            ProjectEntry::new("Y", 2),
            ProjectEntry::new("Z", 1),
        ];
        let mut students = vec![
            StudentEntry::new("s1", 3.1, ["X", "Y", "Z"]),
            StudentEntry::new("s2", 3.7, ["Y", "X"]),
            StudentEntry::new("s3", 2.4, ["X", "Z"]),
            StudentEntry::new("s4", 3.3, ["Z", "X", "Y"]),
            StudentEntry::new("s5", 3.8, ["X", "Z", "Y"]),
        ];
        let mut a = remap(&students, &projects).unwrap();
        DeferredAcceptance::new(&mut a).assign();
        let forward = held(&a);
        students.reverse();
        let mut b = remap(&students, &projects).unwrap();
        DeferredAcceptance::new(&mut b).assign();
        assert_eq!(forward, held(&b));
    }
}
