use super::{attach_preferences, project_entry};
use crate::materialize::AssignmentRecord;
use crate::model::{ProjectEntry, StudentEntry};
use eyre::WrapErr;
use sqlx::any::{AnyConnectOptions, AnyRow};
use sqlx::{AnyConnection, Connection, Row};
use std::str::FromStr;
use tracing::debug;

/// Snapshot loader backed by an SQL database. The project key is its
/// numeric id.
pub struct DbLoader {
    conn: AnyConnection,
}

impl DbLoader {
    pub async fn new(url: &str) -> eyre::Result<Self> {
        sqlx::any::install_default_drivers();
        Ok(Self {
            conn: AnyConnection::connect_with(&AnyConnectOptions::from_str(url)?)
                .await
                .wrap_err("cannot connect to database")?,
        })
    }

    pub async fn load(&mut self) -> eyre::Result<(Vec<StudentEntry>, Vec<ProjectEntry>)> {
        let projects = self.load_projects().await.wrap_err("cannot load projects")?;
        let students = self.load_students().await.wrap_err("cannot load students")?;
        let preferences = self
            .load_preferences()
            .await
            .wrap_err("cannot load preferences")?;
        let students = attach_preferences(students, preferences);
        debug!(
            students = students.len(),
            projects = projects.len(),
            "snapshot loaded from database"
        );
        Ok((students, projects))
    }

    async fn load_projects(&mut self) -> eyre::Result<Vec<ProjectEntry>> {
        Ok(sqlx::query("SELECT id, name, capacity FROM projects")
            .map(|row: AnyRow| {
                project_entry(
                    row.get::<i32, _>("id").to_string(),
                    row.get("name"),
                    row.get::<i32, _>("capacity").into(),
                    None::<String>,
                )
            })
            .fetch_all(&mut self.conn)
            .await?)
    }

    async fn load_students(&mut self) -> eyre::Result<Vec<StudentEntry>> {
        Ok(sqlx::query("SELECT id, gpa FROM students")
            .map(|row: AnyRow| {
                StudentEntry::new(
                    row.get::<i32, _>("id").to_string(),
                    row.get::<f64, _>("gpa"),
                    Vec::<String>::new(),
                )
            })
            .fetch_all(&mut self.conn)
            .await?)
    }

    async fn load_preferences(&mut self) -> eyre::Result<Vec<(String, String, i64)>> {
        Ok(
            sqlx::query("SELECT student_id, project_ref, `rank` FROM preferences")
                .map(|row: AnyRow| {
                    (
                        row.get::<i32, _>("student_id").to_string(),
                        row.get::<String, _>("project_ref"),
                        row.get::<i64, _>("rank"),
                    )
                })
                .fetch_all(&mut self.conn)
                .await?,
        )
    }

    /// Replace every previously saved assignment by `assignments`, atomically.
    pub async fn save_assignments(&mut self, assignments: &[AssignmentRecord]) -> eyre::Result<()> {
        let mut trans = self.conn.begin().await?;
        sqlx::query("DELETE FROM assignments")
            .execute(&mut *trans)
            .await
            .wrap_err("cannot clear previous assignments")?;
        for record in assignments {
            let student = record
                .student
                .parse::<i32>()
                .wrap_err_with(|| format!("invalid student id {}", record.student))?;
            let project = record
                .project
                .parse::<i32>()
                .wrap_err_with(|| format!("invalid project id {}", record.project))?;
            sqlx::query(
                "INSERT INTO assignments (student_id, project_id, assigned_at) VALUES (?, ?, ?)",
            )
            .bind(student)
            .bind(project)
            .bind(record.assigned_at.to_rfc3339())
            .execute(&mut *trans)
            .await
            .wrap_err("cannot save assignment")?;
        }
        trans
            .commit()
            .await
            .wrap_err("error when committing transaction")?;
        Ok(())
    }
}
