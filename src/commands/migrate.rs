//! Migrate command - Database migration management.

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;

/// Execute the migrate command
pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    // Connect without auto-running migrations for manual control
    let db = Database::connect_without_migrations(&config)
        .await
        .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;

    match args.action {
        MigrateAction::Up => {
            tracing::info!("Applying pending migrations...");
            db.run_migrations().await?;
            tracing::info!("Users schema is up to date");
        }
        MigrateAction::Down => {
            tracing::info!("Rolling back last migration...");
            db.rollback_migration().await?;
            tracing::info!("Rollback completed");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            print!("{}", format_status(&status));
        }
        MigrateAction::Fresh => {
            tracing::warn!("Dropping all tables, every stored user will be lost");
            db.fresh_migrations().await?;
            tracing::info!("Fresh migrations completed");
        }
    }

    Ok(())
}

/// One `name: applied|pending` line per migration, then a pending count.
fn format_status(status: &[(String, bool)]) -> String {
    let mut out = String::new();
    for (name, applied) in status {
        let label = if *applied { "applied" } else { "pending" };
        out.push_str(&format!("{}: {}\n", name, label));
    }

    let pending = status.iter().filter(|(_, applied)| !applied).count();
    out.push_str(&format!("{} pending\n", pending));
    out
}
