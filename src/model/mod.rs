pub use self::assignments::Assignments;
pub use self::project::{Project, ProjectEntry, ProjectId};
pub use self::student::{Student, StudentEntry, StudentId};

mod assignments;
mod project;
mod student;
