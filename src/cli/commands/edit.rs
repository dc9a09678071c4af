use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::event::{EventChanges, EventLogic};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::date::parse_date_strict;
use crate::utils::time::parse_optional_time;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Edit {
        id,
        name,
        description,
        date,
        time,
        remind,
        no_remind,
    } = cmd
    {
        let remind_me = match (*remind, *no_remind) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };

        let changes = EventChanges {
            name: name.clone(),
            description: description.clone(),
            day: date.as_deref().map(parse_date_strict).transpose()?,
            time: parse_optional_time(time.as_ref())?,
            remind_me,
        };

        let mut pool = DbPool::new(&cfg.database)?;
        let ev = EventLogic::edit(&mut pool, *id, changes)?;

        success(format!(
            "Event #{id} updated: '{}' on {} {}",
            ev.name,
            ev.date_str(),
            ev.time_str()
        ));
    }

    Ok(())
}
