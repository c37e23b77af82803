use super::{attach_preferences, project_entry};
use crate::config::CsvConfig;
use crate::materialize::AssignmentRecord;
use crate::model::{ProjectEntry, StudentEntry};
use eyre::WrapErr;
use serde::Deserialize;
use std::fs::File;
use std::io::{Read, Write};
use tracing::debug;

#[derive(Debug, Deserialize)]
struct ProjectRow {
    key: String,
    #[serde(default)]
    name: String,
    capacity: i64,
    /// `|`-separated alternative identifiers.
    #[serde(default)]
    aliases: String,
}

#[derive(Debug, Deserialize)]
struct StudentRow {
    id: String,
    gpa: f64,
}

#[derive(Debug, Deserialize)]
struct PreferenceRow {
    student: String,
    project: String,
    rank: i64,
}

pub struct CsvLoader {
    config: CsvConfig,
}

impl CsvLoader {
    pub fn new(config: CsvConfig) -> Self {
        Self { config }
    }

    pub fn load(&self) -> eyre::Result<(Vec<StudentEntry>, Vec<ProjectEntry>)> {
        let projects =
            read_projects(open(&self.config.projects)?).wrap_err("cannot load projects")?;
        let students =
            read_students(open(&self.config.students)?).wrap_err("cannot load students")?;
        let preferences = read_preferences(open(&self.config.preferences)?)
            .wrap_err("cannot load preferences")?;
        let students = attach_preferences(students, preferences);
        debug!(
            students = students.len(),
            projects = projects.len(),
            "snapshot loaded from CSV files"
        );
        Ok((students, projects))
    }

    pub fn save_assignments(&self, assignments: &[AssignmentRecord]) -> eyre::Result<()> {
        let file = File::create(&self.config.output).wrap_err_with(|| {
            format!("cannot create {}", self.config.output.display())
        })?;
        write_assignments(file, assignments).wrap_err("cannot save assignments")
    }
}

fn open(path: &std::path::Path) -> eyre::Result<File> {
    File::open(path).wrap_err_with(|| format!("cannot open {}", path.display()))
}

fn read_projects<R: Read>(reader: R) -> eyre::Result<Vec<ProjectEntry>> {
    csv::Reader::from_reader(reader)
        .deserialize::<ProjectRow>()
        .map(|row| -> eyre::Result<ProjectEntry> {
            let row = row?;
            let aliases = row.aliases.split('|').map(|a| a.trim().to_owned());
            Ok(project_entry(row.key, row.name, row.capacity, aliases))
        })
        .collect()
}

fn read_students<R: Read>(reader: R) -> eyre::Result<Vec<StudentEntry>> {
    csv::Reader::from_reader(reader)
        .deserialize::<StudentRow>()
        .map(|row| -> eyre::Result<StudentEntry> {
            let row = row?;
            Ok(StudentEntry::new(row.id, row.gpa, Vec::<String>::new()))
        })
        .collect()
}

fn read_preferences<R: Read>(reader: R) -> eyre::Result<Vec<(String, String, i64)>> {
    csv::Reader::from_reader(reader)
        .deserialize::<PreferenceRow>()
        .map(|row| -> eyre::Result<_> {
            let row = row?;
            Ok((row.student, row.project, row.rank))
        })
        .collect()
}

fn write_assignments<W: Write>(writer: W, assignments: &[AssignmentRecord]) -> eyre::Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for record in assignments {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}
