use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;

/// Create the config directory and file (unless in test mode), the database
/// file, and apply every pending migration.
pub fn handle(cli: &Cli) -> AppResult<()> {
    let db_path = Config::init_all(cli.db.clone(), cli.test)?;
    let db_path = db_path.to_string_lossy().to_string();

    println!("⚙️  Initializing eventalert…");
    if !cli.test {
        println!("📄 Config file : {}", Config::config_file().display());
    }
    println!("🗄️  Database   : {}", db_path);

    let pool = DbPool::new(&db_path)?;
    init_db(&pool.conn)?;

    ttlog_quiet(
        &pool.conn,
        "init",
        "database",
        &format!("Database initialized at {db_path}"),
    );

    success("eventalert initialization completed!");
    Ok(())
}
