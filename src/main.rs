use crossterm::tty::IsTty;
use quizdrill::command::{Flow, dispatch};
use quizdrill::present::{ConsolePresenter, Presenter};
use quizdrill::prompt::{DialoguerPrompter, Prompter};
use quizdrill::{db, logger};
use std::io;

fn main() -> anyhow::Result<()> {
    logger::init(&db::get_db_path().with_file_name("quizdrill.log"));

    let conn = db::init_db()?;
    logger::log(&format!("database at {}", db::get_db_path().display()));

    let mut presenter = ConsolePresenter::new(io::stdout().is_tty());
    let mut prompter = DialoguerPrompter;
    let mut rng = rand::thread_rng();

    presenter.line("Welcome to quizdrill. Type 'help' to list the available commands.");

    loop {
        // EOF or a closed terminal ends the session like an explicit quit.
        let line = match prompter.ask("quiz") {
            Ok(line) => line,
            Err(_) => break,
        };

        match dispatch(&conn, &mut presenter, &mut prompter, &mut rng, &line) {
            Flow::Continue => {}
            Flow::Quit => break,
        }
    }

    presenter.line("Goodbye.");
    logger::log("session ended");
    Ok(())
}
