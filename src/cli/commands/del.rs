use crate::cli::commands::ask_confirmation;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::event::EventLogic;
use crate::db::pool::DbPool;
use crate::db::queries::get_event_by_id;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { id, force } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;

        let ev = get_event_by_id(&pool.conn, *id)?.ok_or(AppError::EventNotFound(*id))?;

        if !*force {
            let prompt = format!(
                "Delete event #{} '{}' on {} {}? This action is irreversible.",
                id,
                ev.name,
                ev.date_str(),
                ev.time_str()
            );
            if !ask_confirmation(&prompt) {
                info("Operation cancelled.");
                return Ok(());
            }
        }

        EventLogic::delete(&mut pool, *id)?;
        success(format!("Event #{} has been deleted.", id));
    }

    Ok(())
}
