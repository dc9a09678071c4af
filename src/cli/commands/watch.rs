use crate::cli::commands::ring::{present, shutdown_signal, stdin_lines};
use crate::config::Config;
use crate::core::alarm::DismissReason;
use crate::core::reminder::AlarmLauncher;
use crate::core::trigger::ReminderTrigger;
use crate::db::pool::DbPool;
use crate::db::settings::load_settings;
use crate::errors::{AppError, AppResult};
use crate::scheduler::{
    ExistingTaskPolicy, Job, PeriodicRequest, REMINDER_TASK, SchedulerPort, TokioScheduler,
    reminder_period,
};
use crate::ui::messages::{info, success};
use crate::ui::notification::ConsoleNotifier;
use crate::utils::date::now;
use crate::utils::time::format_duration;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

pub fn handle(cfg: &Config) -> AppResult<()> {
    let rt = super::runtime()?;
    let outcome = rt.block_on(watch(cfg));
    rt.shutdown_background();
    outcome
}

async fn watch(cfg: &Config) -> AppResult<()> {
    let db_path = cfg.database.clone();
    let settings = load_settings(&DbPool::new(&db_path)?.conn)?;
    let period = reminder_period(&settings, cfg.min_period());

    let notifier = Arc::new(ConsoleNotifier::new());
    let (tx, mut alarms) = mpsc::channel(8);
    let launcher = AlarmLauncher::new(notifier.clone(), tx);
    let trigger = Mutex::new(ReminderTrigger::new(cfg.tolerance()));

    let job: Job = {
        let db_path = db_path.clone();
        Arc::new(move || {
            // fresh connection per invocation
            let pool = DbPool::new(&db_path)?;
            let mut trigger = trigger
                .lock()
                .map_err(|_| AppError::Scheduler("trigger state poisoned".into()))?;
            trigger.invoke(&pool.conn, now(), &launcher).map(|_| ())
        })
    };

    let mut scheduler = TokioScheduler::current()?;
    scheduler.register(
        PeriodicRequest::new(REMINDER_TASK, period, ExistingTaskPolicy::Update),
        job,
    )?;

    success(format!(
        "Watching for events every {} (lead time {}). Press Ctrl+C to stop.",
        format_duration(chrono::Duration::from_std(period).unwrap_or(chrono::Duration::zero())),
        settings.first_time_to_start.format("%H:%M")
    ));

    let mut lines = stdin_lines();
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            Some(alarm) = alarms.recv() => {
                // Enter presses typed while idle must not dismiss the next alarm
                while lines.try_recv().is_ok() {}

                let reason = present(
                    alarm,
                    notifier.as_ref(),
                    &db_path,
                    line_typed(&mut lines),
                    &mut shutdown,
                )
                .await;

                if reason == DismissReason::Teardown {
                    break;
                }
            }
        }
    }

    scheduler.cancel(REMINDER_TASK);
    info("Stopped watching.");
    Ok(())
}

/// Resolves on a typed line. Closed stdin never resolves, so an unattended
/// watcher keeps ringing until the stop time or Ctrl+C.
async fn line_typed(lines: &mut mpsc::Receiver<()>) {
    if lines.recv().await.is_none() {
        std::future::pending::<()>().await;
    }
}
