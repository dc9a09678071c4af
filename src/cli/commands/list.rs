use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::queries::{events_by_day, get_event_by_id};
use crate::errors::{AppError, AppResult};
use crate::models::event::Event;
use crate::ui::messages::info;
use crate::utils::colors::RESET;
use crate::utils::date::{parse_date_strict, today};
use crate::utils::describe_remind;
use crate::utils::formatting::{bold, truncate};
use crate::utils::table::{Column, Table};

fn events_table(events: &[Event]) -> Table {
    let mut table = Table::new(vec![
        Column::new("ID", 3),
        Column::new("Time", 5),
        Column::new("Remind", 6),
        Column::new("Name", 10),
        Column::new("Description", 12),
    ]);

    for ev in events {
        let (label, color) = describe_remind(ev.remind_me);
        table.add_row(vec![
            ev.id.map(|id| id.to_string()).unwrap_or_default(),
            ev.time_str(),
            format!("{color}{label}{RESET}"),
            ev.name.clone(),
            truncate(&ev.description, 48),
        ]);
    }
    table
}

fn print_event(ev: &Event) {
    let (label, color) = describe_remind(ev.remind_me);
    println!("{}", bold(&format!("#{} {}", ev.id.unwrap_or_default(), ev.name)));
    println!("  Date:        {} {}", ev.date_str(), ev.time_str());
    println!("  Reminder:    {color}{label}{RESET}");
    println!("  Description: {}", ev.description);
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { day, id } = cmd {
        let pool = DbPool::new(&cfg.database)?;

        if let Some(id) = id {
            let ev = get_event_by_id(&pool.conn, *id)?.ok_or(AppError::EventNotFound(*id))?;
            print_event(&ev);
            return Ok(());
        }

        let d = match day {
            Some(s) => parse_date_strict(s)?,
            None => today(),
        };

        let events = events_by_day(&pool.conn, d)?;
        if events.is_empty() {
            info(format!("No events on {}", d));
            return Ok(());
        }

        println!("📅 Events on {} ({}):\n", d, d.format("%A"));
        print!("{}", events_table(&events).render());
    }

    Ok(())
}
