// Teacher Directory - Core Library
// Exposes all modules for use in the admin CLI, API server, and tests

pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod filter;
pub mod import;
pub mod logging;

#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use db::{
    count_teachers, delete_teacher, get_all_teachers, get_teacher, insert_teacher,
    open_database, save_teacher, search_teachers, setup_database, update_teacher,
};
pub use entities::{NewTeacher, Teacher, TeacherUpdate};
pub use error::{Result, TeacherError};
pub use filter::{SearchParams, TeacherFilter, WhereClause};
pub use import::{import_teachers, load_csv};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
