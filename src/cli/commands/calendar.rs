use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calendar::CalendarLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::date::{current_month, parse_month};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Calendar { month } = cmd {
        let (year, m) = match month {
            Some(s) => parse_month(s)?,
            None => current_month(),
        };

        let pool = DbPool::new(&cfg.database)?;
        CalendarLogic::print(&pool, year, m)?;
    }

    Ok(())
}
