// Command-line configuration for both binaries
//
// Every flag falls back to an environment variable, then to a default.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub const ENV_DB: &str = "TEACHERS_DB";
pub const ENV_HOST: &str = "TEACHERS_HOST";
pub const ENV_PORT: &str = "TEACHERS_PORT";
pub const ENV_LOG: &str = "TEACHERS_LOG";

pub const DEFAULT_DB_PATH: &str = "teachers.db";
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Port the web client talks to
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// teacher-server: REST API over the teachers table
#[derive(Parser, Debug, Clone)]
#[command(name = "teacher-server")]
#[command(version, about = "Teacher directory REST API", long_about = None)]
pub struct ServerConfig {
    /// SQLite database file (created if missing)
    #[arg(long, env = ENV_DB, default_value = DEFAULT_DB_PATH)]
    pub db: PathBuf,

    /// Address to bind
    #[arg(long, short = 'H', env = ENV_HOST, default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to listen on
    #[arg(long, short = 'p', env = ENV_PORT, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Log level (error, warn, info, debug, trace); RUST_LOG overrides
    #[arg(long, env = ENV_LOG, default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// teacher-directory: database administration
#[derive(Parser, Debug)]
#[command(name = "teacher-directory")]
#[command(version, about = "Manage the teacher directory database", long_about = None)]
pub struct AdminCli {
    /// SQLite database file (created if missing)
    #[arg(long, global = true, env = ENV_DB, default_value = DEFAULT_DB_PATH)]
    pub db: PathBuf,

    /// Log level (error, warn, info, debug, trace); RUST_LOG overrides
    #[arg(long, global = true, env = ENV_LOG, default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Create the schema
    Init,
    /// Load teachers from a CSV file (first_name,last_name,age,salary)
    Import { csv: PathBuf },
    /// Print the number of stored teachers
    Count,
}
