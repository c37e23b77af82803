use super::*;

/// Students, projects, and the held set of every project.
///
/// The held sets are scratch state: they are owned by whoever runs the
/// matching and are cleared at the start of every run.
#[derive(Clone, Debug)]
pub struct Assignments {
    pub students: Vec<Student>,
    pub projects: Vec<Project>,
    assigned_to: Vec<Option<ProjectId>>,
    assigned: Vec<Vec<StudentId>>,
}

impl Assignments {
    pub fn new(students: Vec<Student>, projects: Vec<Project>) -> Assignments {
        let slen = students.len();
        let plen = projects.len();
        Assignments {
            students,
            projects,
            assigned_to: vec![None; slen],
            assigned: vec![Vec::new(); plen],
        }
    }

    pub fn student(&self, StudentId(student): StudentId) -> &Student {
        &self.students[student]
    }

    pub fn project(&self, ProjectId(project): ProjectId) -> &Project {
        &self.projects[project]
    }

    pub fn is_known(&self, ProjectId(project): ProjectId) -> bool {
        project < self.projects.len()
    }

    pub fn all_projects(&self) -> Vec<ProjectId> {
        self.filter_projects(|_| true)
    }

    pub fn filter_projects<F>(&self, condition: F) -> Vec<ProjectId>
    where
        F: Fn(ProjectId) -> bool,
    {
        (0..self.projects.len())
            .map(ProjectId)
            .filter(|&p| condition(p))
            .collect()
    }

    pub fn all_students(&self) -> Vec<StudentId> {
        (0..self.students.len()).map(StudentId).collect()
    }

    pub fn rankings(&self, student: StudentId) -> &[ProjectId] {
        &self.student(student).rankings
    }

    pub fn rank_of(&self, student: StudentId, project: ProjectId) -> Option<usize> {
        self.student(student).rank_of(project)
    }

    pub fn is_lazy(&self, student: StudentId) -> bool {
        self.student(student).is_lazy()
    }

    pub fn project_for(&self, StudentId(student): StudentId) -> Option<ProjectId> {
        self.assigned_to[student]
    }

    /// Held students, in priority order once `sort_students_for` has run.
    pub fn students_for(&self, ProjectId(project): ProjectId) -> &[StudentId] {
        &self.assigned[project]
    }

    pub fn assign_to(&mut self, student: StudentId, project: ProjectId) {
        assert!(
            self.project_for(student).is_none(),
            "a project is already assigned to this student"
        );
        self.assigned_to[student.0] = Some(project);
        self.assigned[project.0].push(student);
    }

    pub fn unassign_from(&mut self, student: StudentId, project: ProjectId) {
        assert_eq!(
            self.project_for(student),
            Some(project),
            "project not assigned to this student"
        );
        self.assigned_to[student.0] = None;
        let pos = self.assigned[project.0]
            .iter()
            .position(|&s| s == student)
            .expect("student not found in project");
        self.assigned[project.0].remove(pos);
    }

    pub fn clear_all_assignments(&mut self) {
        self.assigned_to.iter_mut().for_each(|a| *a = None);
        self.assigned.iter_mut().for_each(Vec::clear);
    }

    pub fn sort_students_for(&mut self, project: ProjectId) {
        let students = &self.students;
        self.assigned[project.0].sort_by(|&a, &b| students[a.0].cmp_priority(&students[b.0]));
    }

    pub fn lowest_priority_for(&self, project: ProjectId) -> Option<StudentId> {
        self.students_for(project).last().copied()
    }

    pub fn unassigned_students(&self) -> Vec<StudentId> {
        self.assigned_to
            .iter()
            .enumerate()
            .filter_map(|(id, assignment)| {
                if assignment.is_none() {
                    Some(StudentId(id))
                } else {
                    None
                }
            })
            .collect()
    }

    /// Registered students (non-empty rankings) who did not get a project.
    pub fn unmatched_students(&self) -> Vec<StudentId> {
        self.unassigned_students()
            .into_iter()
            .filter(|&s| !self.is_lazy(s))
            .collect()
    }

    pub fn size(&self, project: ProjectId) -> usize {
        self.students_for(project).len()
    }

    pub fn capacity(&self, project: ProjectId) -> usize {
        self.project(project).capacity as usize
    }

    pub fn is_at_capacity(&self, project: ProjectId) -> bool {
        self.size(project) >= self.capacity(project)
    }

    pub fn is_over_capacity(&self, project: ProjectId) -> bool {
        self.size(project) > self.capacity(project)
    }

    pub fn spare_seats(&self, project: ProjectId) -> usize {
        self.capacity(project).saturating_sub(self.size(project))
    }
}
