use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::event::EventLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::event::Event;
use crate::ui::messages::success;
use crate::utils::date::parse_date_strict;
use crate::utils::time::parse_time_strict;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        date,
        time,
        name,
        description,
        remind,
    } = cmd
    {
        let day = parse_date_strict(date)?;
        let at = parse_time_strict(time)?;

        let event = Event::new(
            name,
            description.as_deref().unwrap_or_default(),
            day.and_time(at),
            *remind,
        );

        let mut pool = DbPool::new(&cfg.database)?;
        let id = EventLogic::add(&mut pool, event)?;

        success(format!(
            "Event #{id} '{}' added for {} {}{}",
            name,
            day,
            at.format("%H:%M"),
            if *remind { " (reminder on)" } else { "" }
        ));
    }

    Ok(())
}
