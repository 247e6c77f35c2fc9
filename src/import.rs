// 📥 CSV Import - seed the teachers table from a file
//
// Expected header: first_name,last_name,age,salary
// The whole file is parsed before anything is written, so a bad row leaves
// the database untouched.

use crate::db::insert_teacher;
use crate::entities::NewTeacher;
use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::Path;

pub fn load_csv(csv_path: &Path) -> Result<Vec<NewTeacher>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(csv_path)
        .with_context(|| format!("Failed to open CSV file {}", csv_path.display()))?;

    let mut teachers = Vec::new();

    for (idx, result) in rdr.deserialize::<NewTeacher>().enumerate() {
        // +2: one for the header, one for 1-based line numbers
        let teacher =
            result.with_context(|| format!("Failed to parse teacher on line {}", idx + 2))?;
        teachers.push(teacher);
    }

    Ok(teachers)
}

pub fn import_teachers(conn: &Connection, teachers: &[NewTeacher]) -> Result<usize> {
    let mut inserted = 0;

    for teacher in teachers {
        insert_teacher(conn, teacher)
            .with_context(|| format!("Failed to insert {} {}", teacher.first_name, teacher.last_name))?;
        inserted += 1;
    }

    tracing::info!(inserted, "import finished");
    Ok(inserted)
}
