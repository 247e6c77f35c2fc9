use crate::entities::{NewTeacher, Teacher, TeacherUpdate};
use crate::error::{Result, TeacherError};
use crate::filter::TeacherFilter;
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::path::Path;

const SELECT_TEACHER: &str =
    "SELECT id, created_at, updated_at, first_name, last_name, age, salary FROM teachers";

/// Open (or create) a database file and make sure the schema exists
pub fn open_database(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)?;
    setup_database(&conn)?;
    tracing::debug!(path = %path.display(), "database opened");
    Ok(conn)
}

pub fn setup_database(conn: &Connection) -> Result<()> {
    // WAL for file databases; in-memory databases report "memory"
    let mode: String =
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
    tracing::debug!(journal_mode = %mode, "journal mode set");

    // AUTOINCREMENT so a deleted ID is never handed out again
    conn.execute(
        "CREATE TABLE IF NOT EXISTS teachers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            age INTEGER NOT NULL,
            salary REAL NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_teachers_age ON teachers(age)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_teachers_salary ON teachers(salary)",
        [],
    )?;

    Ok(())
}

fn parse_timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn teacher_from_row(row: &Row<'_>) -> rusqlite::Result<Teacher> {
    Ok(Teacher {
        id: row.get(0)?,
        created_at: parse_timestamp(row, 1)?,
        updated_at: parse_timestamp(row, 2)?,
        first_name: row.get(3)?,
        last_name: row.get(4)?,
        age: row.get(5)?,
        salary: row.get(6)?,
    })
}

pub fn get_all_teachers(conn: &Connection) -> Result<Vec<Teacher>> {
    let mut stmt = conn.prepare(&format!("{} ORDER BY id", SELECT_TEACHER))?;

    let teachers = stmt
        .query_map([], teacher_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(teachers)
}

pub fn get_teacher(conn: &Connection, id: i64) -> Result<Teacher> {
    let mut stmt = conn.prepare(&format!("{} WHERE id = ?1", SELECT_TEACHER))?;

    match stmt.query_row([id], teacher_from_row) {
        Ok(teacher) => Ok(teacher),
        Err(rusqlite::Error::QueryReturnedNoRows) => Err(TeacherError::not_found(id)),
        Err(e) => Err(e.into()),
    }
}

/// Insert a new teacher; the store assigns ID and timestamps
pub fn insert_teacher(conn: &Connection, new: &NewTeacher) -> Result<Teacher> {
    let now = Utc::now();
    let now_str = now.to_rfc3339();

    conn.execute(
        "INSERT INTO teachers (created_at, updated_at, first_name, last_name, age, salary)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            now_str,
            now_str,
            new.first_name,
            new.last_name,
            new.age,
            new.salary,
        ],
    )?;

    let teacher = Teacher {
        id: conn.last_insert_rowid(),
        created_at: now,
        updated_at: now,
        first_name: new.first_name.clone(),
        last_name: new.last_name.clone(),
        age: new.age,
        salary: new.salary,
    };

    tracing::info!(id = teacher.id, name = %teacher.full_name(), "teacher created");
    Ok(teacher)
}

/// Write every value field of `teacher` back to its row and bump `updated_at`
pub fn save_teacher(conn: &Connection, teacher: &mut Teacher) -> Result<()> {
    let now = Utc::now();

    let changed = conn.execute(
        "UPDATE teachers
         SET updated_at = ?1, first_name = ?2, last_name = ?3, age = ?4, salary = ?5
         WHERE id = ?6",
        params![
            now.to_rfc3339(),
            teacher.first_name,
            teacher.last_name,
            teacher.age,
            teacher.salary,
            teacher.id,
        ],
    )?;

    if changed == 0 {
        return Err(TeacherError::not_found(teacher.id));
    }

    teacher.updated_at = now;
    Ok(())
}

/// Load, merge, save. A missing ID is NotFound; nothing is created.
pub fn update_teacher(conn: &Connection, id: i64, update: TeacherUpdate) -> Result<Teacher> {
    let mut teacher = get_teacher(conn, id)?;
    update.apply_to(&mut teacher);
    save_teacher(conn, &mut teacher)?;

    tracing::info!(id, "teacher updated");
    Ok(teacher)
}

pub fn delete_teacher(conn: &Connection, id: i64) -> Result<()> {
    let deleted = conn.execute("DELETE FROM teachers WHERE id = ?1", [id])?;

    if deleted == 0 {
        return Err(TeacherError::not_found(id));
    }

    tracing::info!(id, "teacher deleted");
    Ok(())
}

/// Run the filter's WHERE clause; an empty filter returns every teacher
pub fn search_teachers(conn: &Connection, filter: &TeacherFilter) -> Result<Vec<Teacher>> {
    let clause = filter.where_clause();

    let sql = if clause.sql.is_empty() {
        format!("{} ORDER BY id", SELECT_TEACHER)
    } else {
        format!("{} WHERE {} ORDER BY id", SELECT_TEACHER, clause.sql)
    };
    tracing::debug!(%sql, params = clause.params.len(), "searching teachers");

    let mut stmt = conn.prepare(&sql)?;
    let teachers = stmt
        .query_map(params_from_iter(clause.params.iter()), teacher_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(teachers)
}

pub fn count_teachers(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM teachers", [], |row| row.get(0))?;

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::SearchParams;

    fn test_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        setup_database(&conn).unwrap();
        conn
    }

    /// Ann Lee (id 1) and Amy Wu (id 2)
    fn seeded_db() -> Connection {
        let conn = test_db();
        insert_teacher(&conn, &NewTeacher::new("Ann", "Lee", 30, 50000.0)).unwrap();
        insert_teacher(&conn, &NewTeacher::new("Amy", "Wu", 25, 40000.0)).unwrap();
        conn
    }

    fn search(conn: &Connection, first: Option<&str>, age: Option<&str>) -> Vec<String> {
        let raw = SearchParams {
            first_name: first.map(str::to_string),
            age: age.map(str::to_string),
            ..SearchParams::default()
        };
        let filter = TeacherFilter::from_params(&raw).unwrap();
        search_teachers(conn, &filter)
            .unwrap()
            .into_iter()
            .map(|t| t.first_name)
            .collect()
    }

    #[test]
    fn test_setup_is_idempotent() {
        let conn = test_db();
        setup_database(&conn).unwrap();
        assert_eq!(count_teachers(&conn).unwrap(), 0);
    }

    #[test]
    fn test_insert_assigns_id_and_timestamps() {
        let conn = test_db();

        let ann = insert_teacher(&conn, &NewTeacher::new("Ann", "Lee", 30, 50000.0)).unwrap();
        let amy = insert_teacher(&conn, &NewTeacher::new("Amy", "Wu", 25, 40000.0)).unwrap();

        assert_eq!(ann.id, 1);
        assert_eq!(amy.id, 2);
        assert_eq!(ann.created_at, ann.updated_at);
        assert_eq!(count_teachers(&conn).unwrap(), 2);
    }

    #[test]
    fn test_get_roundtrips_stored_values() {
        let conn = test_db();
        let created = insert_teacher(&conn, &NewTeacher::new("Ann", "Lee", 30, 50000.5)).unwrap();

        let loaded = get_teacher(&conn, created.id).unwrap();
        assert_eq!(loaded, created);
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let conn = test_db();

        match get_teacher(&conn, 99) {
            Err(TeacherError::NotFound { id }) => assert_eq!(id, 99),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_update_merges_and_bumps_updated_at() {
        let conn = seeded_db();
        let before = get_teacher(&conn, 1).unwrap();

        let update = TeacherUpdate {
            salary: Some(55000.0),
            ..TeacherUpdate::default()
        };
        let updated = update_teacher(&conn, 1, update).unwrap();

        assert_eq!(updated.id, 1);
        assert_eq!(updated.first_name, "Ann");
        assert_eq!(updated.salary, 55000.0);
        assert_eq!(updated.created_at, before.created_at);
        assert!(updated.updated_at >= before.updated_at);
        assert_eq!(get_teacher(&conn, 1).unwrap(), updated);
    }

    #[test]
    fn test_update_missing_does_not_create() {
        let conn = seeded_db();

        let update = TeacherUpdate {
            first_name: Some("Ghost".to_string()),
            ..TeacherUpdate::default()
        };
        assert!(matches!(
            update_teacher(&conn, 42, update),
            Err(TeacherError::NotFound { id: 42 })
        ));
        assert_eq!(count_teachers(&conn).unwrap(), 2);
    }

    #[test]
    fn test_delete_then_get_is_not_found() {
        let conn = seeded_db();

        delete_teacher(&conn, 1).unwrap();

        assert!(matches!(get_teacher(&conn, 1), Err(TeacherError::NotFound { id: 1 })));
        assert!(matches!(delete_teacher(&conn, 1), Err(TeacherError::NotFound { id: 1 })));
        assert_eq!(count_teachers(&conn).unwrap(), 1);
    }

    #[test]
    fn test_deleted_id_not_reused() {
        let conn = seeded_db();
        delete_teacher(&conn, 2).unwrap();

        let next = insert_teacher(&conn, &NewTeacher::new("Bo", "Kim", 40, 60000.0)).unwrap();
        assert_eq!(next.id, 3);
    }

    #[test]
    fn test_search_scenarios() {
        let conn = seeded_db();

        assert_eq!(search(&conn, Some("A"), None), vec!["Ann", "Amy"]);
        assert_eq!(search(&conn, None, Some("30")), vec!["Ann"]);
        assert_eq!(search(&conn, Some("A"), Some("25")), vec!["Amy"]);
        assert_eq!(search(&conn, None, None), vec!["Ann", "Amy"]);
        assert!(search(&conn, Some("Zed"), None).is_empty());
    }

    #[test]
    fn test_empty_search_equals_list_all() {
        let conn = seeded_db();

        let all = get_all_teachers(&conn).unwrap();
        let found = search_teachers(&conn, &TeacherFilter::default()).unwrap();
        assert_eq!(found, all);
    }

    #[test]
    fn test_search_is_idempotent() {
        let conn = seeded_db();
        let filter = TeacherFilter {
            last_name: Some("e".to_string()),
            ..TeacherFilter::default()
        };

        let first = search_teachers(&conn, &filter).unwrap();
        let second = search_teachers(&conn, &filter).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 1);
    }

    #[test]
    fn test_search_matches_in_memory_predicate() {
        let conn = test_db();
        let rows = [
            ("Ann", "Lee", 30, 50000.0),
            ("Amy", "Wu", 25, 40000.0),
            ("Bob", "Lee", 30, 40000.0),
            ("Anna", "Banner", 41, 50000.0),
            ("Carl", "Ng", 25, 50000.0),
        ];
        for (first, last, age, salary) in rows {
            insert_teacher(&conn, &NewTeacher::new(first, last, age, salary)).unwrap();
        }
        let all = get_all_teachers(&conn).unwrap();

        let filters = [
            TeacherFilter::default(),
            TeacherFilter { first_name: Some("an".into()), ..Default::default() },
            TeacherFilter { last_name: Some("Lee".into()), age: Some(30), ..Default::default() },
            TeacherFilter { salary: Some(50000.0), ..Default::default() },
            TeacherFilter { first_name: Some("A".into()), salary: Some(50000.0), ..Default::default() },
            TeacherFilter { age: Some(25), salary: Some(40000.0), ..Default::default() },
            TeacherFilter { age: Some(99), ..Default::default() },
        ];

        for filter in &filters {
            let expected: Vec<Teacher> = all.iter().filter(|t| filter.matches(t)).cloned().collect();
            let found = search_teachers(&conn, filter).unwrap();
            assert_eq!(found, expected, "filter {:?}", filter);
        }
    }

    #[test]
    fn test_search_wildcards_match_literally() {
        let conn = test_db();
        insert_teacher(&conn, &NewTeacher::new("Ann", "Lee", 30, 50000.0)).unwrap();
        insert_teacher(&conn, &NewTeacher::new("A_nn", "Lee", 30, 50000.0)).unwrap();

        let underscore = TeacherFilter {
            first_name: Some("_".into()),
            ..Default::default()
        };
        let found = search_teachers(&conn, &underscore).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].first_name, "A_nn");

        let percent = TeacherFilter {
            first_name: Some("%".into()),
            ..Default::default()
        };
        assert!(search_teachers(&conn, &percent).unwrap().is_empty());
    }
}
