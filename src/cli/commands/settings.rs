use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::settings::{SettingsInput, SettingsLogic, SettingsOutcome};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{error, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Settings {
        print,
        lead,
        stop,
        stop_enabled,
        sound,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;

        let input = SettingsInput {
            lead: lead.clone(),
            stop: stop.clone(),
            stop_enabled: *stop_enabled,
            sound: sound.clone(),
        };

        if !input.is_empty() {
            match SettingsLogic::apply(&mut pool, input)? {
                SettingsOutcome::Saved(_) => success("Settings saved."),
                // shown to the user, not propagated: nothing was written
                SettingsOutcome::Rejected(msg) => error(msg),
            }
        }

        if *print || (lead.is_none() && stop.is_none() && stop_enabled.is_none() && sound.is_none()) {
            SettingsLogic::print(&pool)?;
        }
    }

    Ok(())
}
