pub mod add;
pub mod backup;
pub mod calendar;
pub mod check;
pub mod config;
pub mod db;
pub mod del;
pub mod edit;
pub mod export;
pub mod init;
pub mod list;
pub mod log;
pub mod ring;
pub mod settings;
pub mod watch;

use crate::errors::AppResult;
use std::io::{self, Write};

/// Runtime for the commands that wait on timers or signals.
pub(crate) fn runtime() -> AppResult<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?)
}

/// Yes/no question on stdin; anything but y/yes is a no.
pub(crate) fn ask_confirmation(prompt: &str) -> bool {
    crate::ui::messages::warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}
