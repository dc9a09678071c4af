//! eventalert main entrypoint.

use eventalert::run;

fn main() {
    println!();
    if let Err(e) = run() {
        eventalert::ui::messages::error(format!("Error: {e}"));
        if e.is_user_error() {
            eprintln!("Run `eventalert --help` for the expected formats.");
        }
        std::process::exit(1);
    }
}
