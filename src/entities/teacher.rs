// 🧑‍🏫 Teacher Entity
//
// Identity: integer ID assigned by SQLite on insert (never changes)
// Values: name, age, salary (replaced in place on update)
//
// JSON uses the field names the web client reads (ID, FirstName, ...).
// Request bodies also accept camelCase and snake_case spellings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// TEACHER ENTITY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Teacher {
    /// Stable identity, assigned by the store
    #[serde(rename = "ID")]
    pub id: i64,

    #[serde(rename = "CreatedAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "UpdatedAt")]
    pub updated_at: DateTime<Utc>,

    #[serde(rename = "FirstName")]
    pub first_name: String,

    #[serde(rename = "LastName")]
    pub last_name: String,

    #[serde(rename = "Age")]
    pub age: i64,

    #[serde(rename = "Salary")]
    pub salary: f64,
}

impl Teacher {
    /// Full display name ("Ann Lee")
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

// ============================================================================
// CREATE PAYLOAD
// ============================================================================

/// Body of `POST /teachers`, also one CSV row on import.
///
/// Missing fields take their zero value. Any client-sent ID is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewTeacher {
    #[serde(rename = "FirstName", alias = "firstName", alias = "first_name")]
    pub first_name: String,

    #[serde(rename = "LastName", alias = "lastName", alias = "last_name")]
    pub last_name: String,

    #[serde(rename = "Age", alias = "age")]
    pub age: i64,

    #[serde(rename = "Salary", alias = "salary")]
    pub salary: f64,
}

impl NewTeacher {
    pub fn new(first_name: &str, last_name: &str, age: i64, salary: f64) -> Self {
        NewTeacher {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            age,
            salary,
        }
    }
}

// ============================================================================
// UPDATE PAYLOAD
// ============================================================================

/// Body of `PUT /teachers/:id`. Only the fields present are merged onto
/// the stored record; identity and timestamps in the body are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TeacherUpdate {
    #[serde(rename = "FirstName", alias = "firstName", alias = "first_name")]
    pub first_name: Option<String>,

    #[serde(rename = "LastName", alias = "lastName", alias = "last_name")]
    pub last_name: Option<String>,

    #[serde(rename = "Age", alias = "age")]
    pub age: Option<i64>,

    #[serde(rename = "Salary", alias = "salary")]
    pub salary: Option<f64>,
}

impl TeacherUpdate {
    /// Merge present fields onto `teacher`
    pub fn apply_to(self, teacher: &mut Teacher) {
        if let Some(first_name) = self.first_name {
            teacher.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            teacher.last_name = last_name;
        }
        if let Some(age) = self.age {
            teacher.age = age;
        }
        if let Some(salary) = self.salary {
            teacher.salary = salary;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.age.is_none()
            && self.salary.is_none()
    }
}

// ============================================================================
// TESTS
// ============================================================================
