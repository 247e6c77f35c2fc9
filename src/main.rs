use anyhow::{Context, Result};
use clap::Parser;

use teacher_directory::config::{AdminCli, Commands};
use teacher_directory::logging::init_logging;
use teacher_directory::{count_teachers, import_teachers, load_csv, open_database};

fn main() -> Result<()> {
    let cli = AdminCli::parse();
    init_logging(&cli.log_level);

    let conn = open_database(&cli.db)
        .with_context(|| format!("Failed to open database {}", cli.db.display()))?;

    match cli.command {
        Commands::Init => {
            tracing::info!(db = %cli.db.display(), "schema ready");
        }
        Commands::Import { csv } => {
            let teachers = load_csv(&csv)?;
            tracing::info!(rows = teachers.len(), csv = %csv.display(), "loaded CSV");

            let inserted = import_teachers(&conn, &teachers)?;
            let total = count_teachers(&conn)?;
            println!("Imported {} teachers ({} total)", inserted, total);
        }
        Commands::Count => {
            println!("{}", count_teachers(&conn)?);
        }
    }

    Ok(())
}
