use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::backup::BackupLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::path::normalize;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Backup { file, compress } = cmd {
        let pool = DbPool::new(&cfg.database)?;
        BackupLogic::backup(&pool, &cfg.database, &normalize(file), *compress)?;
    }

    Ok(())
}
