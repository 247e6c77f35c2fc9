// 🔎 Filter Query Builder - search criteria -> SQL WHERE clause
//
// Raw query-string values are parsed into a typed TeacherFilter first, so a
// bad number is rejected before any SQL is built. Predicates are appended in
// a fixed order (firstName, lastName, age, salary) and joined with AND.

use crate::entities::Teacher;
use crate::error::{Result, TeacherError};
use rusqlite::types::Value;
use serde::Deserialize;

// ============================================================================
// RAW CRITERIA (as received on the query string)
// ============================================================================

/// Query parameters of `GET /teachers/search`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    #[serde(rename = "firstName")]
    pub first_name: Option<String>,

    #[serde(rename = "lastName")]
    pub last_name: Option<String>,

    pub age: Option<String>,

    pub salary: Option<String>,
}

// ============================================================================
// TYPED FILTER
// ============================================================================

/// Validated search criteria. `None` means the criterion is inactive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeacherFilter {
    /// Substring of first name
    pub first_name: Option<String>,
    /// Substring of last name
    pub last_name: Option<String>,
    /// Exact age
    pub age: Option<i64>,
    /// Exact salary
    pub salary: Option<f64>,
}

/// A WHERE fragment (without the keyword) plus its bound parameters.
/// `sql` is empty when no criterion is active.
#[derive(Debug, Clone, PartialEq)]
pub struct WhereClause {
    pub sql: String,
    pub params: Vec<Value>,
}

impl TeacherFilter {
    /// Parse-and-validate step. Empty values are inactive; numeric values
    /// that do not parse fail with a validation error naming the field.
    pub fn from_params(params: &SearchParams) -> Result<Self> {
        Ok(TeacherFilter {
            first_name: active_text(&params.first_name),
            last_name: active_text(&params.last_name),
            age: parse_age(params.age.as_deref())?,
            salary: parse_salary(params.salary.as_deref())?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.age.is_none()
            && self.salary.is_none()
    }

    /// Build the conjunction of all active predicates
    pub fn where_clause(&self) -> WhereClause {
        let mut clauses: Vec<String> = Vec::new();
        let mut params: Vec<Value> = Vec::new();

        if let Some(first_name) = &self.first_name {
            params.push(Value::Text(like_pattern(first_name)));
            clauses.push(format!("first_name LIKE ?{} ESCAPE '\\'", params.len()));
        }

        if let Some(last_name) = &self.last_name {
            params.push(Value::Text(like_pattern(last_name)));
            clauses.push(format!("last_name LIKE ?{} ESCAPE '\\'", params.len()));
        }

        if let Some(age) = self.age {
            params.push(Value::Integer(age));
            clauses.push(format!("age = ?{}", params.len()));
        }

        if let Some(salary) = self.salary {
            params.push(Value::Real(salary));
            clauses.push(format!("salary = ?{}", params.len()));
        }

        WhereClause {
            sql: clauses.join(" AND "),
            params,
        }
    }

    /// In-memory evaluation of the same predicates.
    ///
    /// Name matching is ASCII case-insensitive, like SQLite's LIKE.
    pub fn matches(&self, teacher: &Teacher) -> bool {
        if let Some(first_name) = &self.first_name {
            if !contains_ignore_ascii_case(&teacher.first_name, first_name) {
                return false;
            }
        }

        if let Some(last_name) = &self.last_name {
            if !contains_ignore_ascii_case(&teacher.last_name, last_name) {
                return false;
            }
        }

        if let Some(age) = self.age {
            if teacher.age != age {
                return false;
            }
        }

        if let Some(salary) = self.salary {
            if teacher.salary != salary {
                return false;
            }
        }

        true
    }
}

// ============================================================================
// HELPERS
// ============================================================================

fn active_text(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|s| !s.is_empty()).cloned()
}

fn active_number(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

fn parse_age(value: Option<&str>) -> Result<Option<i64>> {
    match active_number(value) {
        None => Ok(None),
        Some(raw) => raw.parse::<i64>().map(Some).map_err(|_| {
            TeacherError::validation("age", format!("expected an integer, got {:?}", raw))
        }),
    }
}

fn parse_salary(value: Option<&str>) -> Result<Option<f64>> {
    match active_number(value) {
        None => Ok(None),
        Some(raw) => match raw.parse::<f64>() {
            Ok(salary) if salary.is_finite() => Ok(Some(salary)),
            _ => Err(TeacherError::validation(
                "salary",
                format!("expected a number, got {:?}", raw),
            )),
        },
    }
}

/// `%value%` with LIKE metacharacters escaped, so input matches literally
fn like_pattern(value: &str) -> String {
    let mut pattern = String::with_capacity(value.len() + 2);
    pattern.push('%');
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn contains_ignore_ascii_case(haystack: &str, needle: &str) -> bool {
    haystack
        .to_ascii_lowercase()
        .contains(&needle.to_ascii_lowercase())
}

// ============================================================================
// TESTS
// ============================================================================
