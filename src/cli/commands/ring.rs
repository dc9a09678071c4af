use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::alarm::{AlarmSession, DismissReason};
use crate::core::reminder::PendingAlarm;
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::db::queries::get_event_by_id;
use crate::db::settings::load_settings;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{header, info};
use crate::ui::notification::{ConsoleNotifier, Notifier};
use crate::ui::sound::TerminalBell;
use crate::utils::date;
use crate::utils::time::format_duration;
use std::future::Future;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

/// One message per line typed on stdin. The channel closes at end of input.
pub(crate) fn stdin_lines() -> mpsc::Receiver<()> {
    let (tx, rx) = mpsc::channel(4);
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(_)) = lines.next_line().await {
            if tx.send(()).await.is_err() {
                break;
            }
        }
    });
    rx
}

/// Resolves on Ctrl+C. Never resolves when the handler cannot be installed.
pub(crate) async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

/// Ring for `alarm` until dismissed, then clear the notification.
pub(crate) async fn present<U, T>(
    alarm: PendingAlarm,
    notifier: &dyn Notifier,
    db_path: &str,
    user_dismiss: U,
    teardown: T,
) -> DismissReason
where
    U: Future<Output = ()>,
    T: Future<Output = ()>,
{
    let session = AlarmSession::new(alarm.event, &alarm.settings, date::now().time());
    let ev = &session.event;

    header(format!("⏰ {} at {} {}", ev.name, ev.date_str(), ev.time_str()));
    if !ev.description.is_empty() {
        println!("{}", ev.description);
    }
    info(format!("Sound: {}", session.sound));
    match session.auto_dismiss {
        Some(d) => info(format!(
            "Press Enter to dismiss (stops by itself in {})",
            format_duration(chrono::Duration::from_std(d).unwrap_or(chrono::Duration::zero()))
        )),
        None => info("Press Enter to dismiss"),
    }

    let mut player = TerminalBell::new();
    let reason = session.run(&mut player, user_dismiss, teardown).await;
    notifier.clear();
    info(format!("Alarm dismissed ({})", reason.as_str()));

    if let Ok(pool) = DbPool::new(db_path) {
        ttlog_quiet(
            &pool.conn,
            "dismiss",
            &session.event.id.map(|id| id.to_string()).unwrap_or_default(),
            &format!("'{}' dismissed by {}", session.event.name, reason.as_str()),
        );
    }
    reason
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Ring { id } = cmd {
        let pool = DbPool::new(&cfg.database)?;
        let event = get_event_by_id(&pool.conn, *id)?.ok_or(AppError::EventNotFound(*id))?;
        let settings = load_settings(&pool.conn)?;
        drop(pool);

        let notifier = ConsoleNotifier::new();
        notifier.show(&event);

        let rt = super::runtime()?;
        rt.block_on(async {
            let mut lines = stdin_lines();
            present(
                PendingAlarm { event, settings },
                &notifier,
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

    Ok(())
}
