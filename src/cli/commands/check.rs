use crate::cli::commands::ring::{present, shutdown_signal, stdin_lines};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::reminder::AlarmLauncher;
use crate::core::trigger::ReminderTrigger;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::ui::notification::ConsoleNotifier;
use crate::utils::date::{now, parse_datetime};
use std::sync::Arc;
use tokio::sync::mpsc;

/// One trigger invocation, as the background task would run it.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Check { at, no_alarm } = cmd {
        let now = match at {
            Some(s) => parse_datetime(s, &cfg.date_format)?,
            None => now(),
        };

        let notifier = Arc::new(ConsoleNotifier::new());
        let (tx, mut alarms) = mpsc::channel(1);
        let launcher = AlarmLauncher::new(notifier.clone(), tx);

        let pool = DbPool::new(&cfg.database)?;
        let mut trigger = ReminderTrigger::new(cfg.tolerance());
        let fired = trigger.invoke(&pool.conn, now, &launcher)?;
        drop(pool);

        if fired.is_none() {
            info(format!("No reminder due (checked at {})", now.format("%Y-%m-%d %H:%M")));
            return Ok(());
        }

        if *no_alarm {
            return Ok(());
        }

        if let Ok(alarm) = alarms.try_recv() {
            let rt = super::runtime()?;
            rt.block_on(async {
                let mut lines = stdin_lines();
                present(
                    alarm,
                    notifier.as_ref(),
                    &cfg.database,
                    async move {
                        lines.recv().await;
                    },
                    shutdown_signal(),
                )
                .await
            });
            rt.shutdown_background();
        }
    }

    Ok(())
}
