use crate::csv;
use crate::db::{exam, quiz};
use crate::error::CommandError;
use crate::exam::{ExamSession, answers_match};
use crate::logger;
use crate::models::EndReason;
use crate::present::Presenter;
use crate::prompt::Prompter;
use rand::Rng;
use rusqlite::Connection;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// One parsed input line: a command word plus at most one argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Empty,
    Help,
    List,
    Show(Option<String>),
    Add,
    Delete(Option<String>),
    Edit(Option<String>),
    Test(Option<String>),
    Play,
    History,
    Import(Option<String>),
    Export(Option<String>),
    Credits,
    Quit,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Command {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Command::Empty;
        }

        let (word, arg) = match trimmed.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, Some(rest.trim().to_string())),
            None => (trimmed, None),
        };

        match word.to_lowercase().as_str() {
            "help" | "h" => Command::Help,
            "list" => Command::List,
            "show" => Command::Show(arg),
            "add" => Command::Add,
            "delete" => Command::Delete(arg),
            "edit" => Command::Edit(arg),
            "test" => Command::Test(arg),
            "play" | "p" => Command::Play,
            "history" => Command::History,
            "import" => Command::Import(arg),
            "export" => Command::Export(arg),
            "credits" => Command::Credits,
            "quit" | "q" => Command::Quit,
            _ => Command::Unknown(word.to_string()),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Command::Empty => "empty",
            Command::Help => "help",
            Command::List => "list",
            Command::Show(_) => "show",
            Command::Add => "add",
            Command::Delete(_) => "delete",
            Command::Edit(_) => "edit",
            Command::Test(_) => "test",
            Command::Play => "play",
            Command::History => "history",
            Command::Import(_) => "import",
            Command::Export(_) => "export",
            Command::Credits => "credits",
            Command::Quit => "quit",
            Command::Unknown(_) => "unknown",
        }
    }
}

pub fn validate_id(arg: Option<&str>) -> Result<u64, CommandError> {
    match arg {
        None => Err(CommandError::MissingArgument("id")),
        Some(raw) => raw.trim().parse().map_err(|_| CommandError::NotANumber),
    }
}

/// Whether the REPL keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Runs one command to completion, nested prompts included. Every error is
/// reported through the presenter and control always returns to the caller
/// so the REPL can offer the next prompt.
pub fn dispatch<R: Rng>(
    conn: &Connection,
    presenter: &mut dyn Presenter,
    prompter: &mut dyn Prompter,
    rng: &mut R,
    line: &str,
) -> Flow {
    let command = Command::parse(line);
    if command != Command::Empty {
        logger::log(&format!("dispatch: {}", command.name()));
    }

    let result = match &command {
        Command::Empty => Ok(Flow::Continue),
        Command::Quit => Ok(Flow::Quit),
        Command::Help => {
            print_help(presenter);
            Ok(Flow::Continue)
        }
        Command::Credits => {
            presenter.line("quizdrill, an interactive quiz trainer for the terminal.");
            Ok(Flow::Continue)
        }
        Command::Unknown(word) => {
            presenter.error(&format!(
                "Unknown command: '{word}'. Type 'help' to see the available commands."
            ));
            Ok(Flow::Continue)
        }
        Command::List => cmd_list(conn, presenter).map(|_| Flow::Continue),
        Command::Show(arg) => cmd_show(conn, presenter, arg.as_deref()).map(|_| Flow::Continue),
        Command::Add => cmd_add(conn, presenter, prompter).map(|_| Flow::Continue),
        Command::Delete(arg) => cmd_delete(conn, arg.as_deref()).map(|_| Flow::Continue),
        Command::Edit(arg) => {
            cmd_edit(conn, presenter, prompter, arg.as_deref()).map(|_| Flow::Continue)
        }
        Command::Test(arg) => {
            cmd_test(conn, presenter, prompter, arg.as_deref()).map(|_| Flow::Continue)
        }
        Command::Play => cmd_play(conn, presenter, prompter, rng).map(|_| Flow::Continue),
        Command::History => cmd_history(conn, presenter).map(|_| Flow::Continue),
        Command::Import(arg) => {
            cmd_import(conn, presenter, arg.as_deref()).map(|_| Flow::Continue)
        }
        Command::Export(arg) => {
            cmd_export(conn, presenter, arg.as_deref()).map(|_| Flow::Continue)
        }
    };

    match result {
        Ok(flow) => flow,
        Err(error) => {
            report_error(presenter, &error);
            Flow::Continue
        }
    }
}

fn report_error(presenter: &mut dyn Presenter, error: &CommandError) {
    match error {
        CommandError::Validation(problems) => {
            presenter.error("The quiz is invalid:");
            for problem in problems {
                presenter.error(problem);
            }
        }
        other => presenter.error(&other.to_string()),
    }
}

fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

fn print_help(presenter: &mut dyn Presenter) {
    presenter.line("Commands:");
    presenter.line("  h|help - Show this help.");
    presenter.line("  list - List the existing quizzes.");
    presenter.line("  show <id> - Show the question and the answer of the given quiz.");
    presenter.line("  add - Add a new quiz interactively.");
    presenter.line("  delete <id> - Delete the given quiz.");
    presenter.line("  edit <id> - Edit the given quiz.");
    presenter.line("  test <id> - Try out the given quiz.");
    presenter.line("  p|play - Answer every quiz in random order until the first miss.");
    presenter.line("  history - Show the results of past exams.");
    presenter.line("  import <path> - Load quizzes from a CSV file.");
    presenter.line("  export <path> - Write every quiz to a CSV file.");
    presenter.line("  credits - Show credits.");
    presenter.line("  q|quit - Leave the program.");
}

fn cmd_list(conn: &Connection, presenter: &mut dyn Presenter) -> Result<(), CommandError> {
    for quiz in quiz::list_quizzes(conn)? {
        let id = presenter.highlight(&quiz.id.to_string());
        presenter.line(&format!("  [{id}]: {}", quiz.question));
    }
    Ok(())
}

fn cmd_show(
    conn: &Connection,
    presenter: &mut dyn Presenter,
    arg: Option<&str>,
) -> Result<(), CommandError> {
    let id = validate_id(arg)?;
    let quiz = quiz::get_quiz(conn, id)?.ok_or(CommandError::NotFound(id))?;

    let id = presenter.highlight(&quiz.id.to_string());
    let arrow = presenter.highlight("=>");
    presenter.line(&format!("  [{id}]: {} {arrow} {}", quiz.question, quiz.answer));
    Ok(())
}

fn cmd_add(
    conn: &Connection,
    presenter: &mut dyn Presenter,
    prompter: &mut dyn Prompter,
) -> Result<(), CommandError> {
    let question = prompter.ask("Enter a question")?;
    let answer = prompter.ask("Enter an answer")?;

    let quiz = quiz::create_quiz(conn, &question, &answer)?;

    let tag = presenter.highlight("Added");
    let arrow = presenter.highlight("=>");
    presenter.line(&format!("  [{tag}]: {} {arrow} {}", quiz.question, quiz.answer));
    Ok(())
}

fn cmd_delete(conn: &Connection, arg: Option<&str>) -> Result<(), CommandError> {
    let id = validate_id(arg)?;
    quiz::delete_quiz(conn, id)
}

fn cmd_edit(
    conn: &Connection,
    presenter: &mut dyn Presenter,
    prompter: &mut dyn Prompter,
    arg: Option<&str>,
) -> Result<(), CommandError> {
    let id = validate_id(arg)?;
    let quiz = quiz::get_quiz(conn, id)?.ok_or(CommandError::NotFound(id))?;

    let question = prompter.ask_with_default("Enter a question", &quiz.question)?;
    let answer = prompter.ask_with_default("Enter an answer", &quiz.answer)?;

    let updated = quiz::update_quiz(conn, id, &question, &answer)?;

    let id = presenter.highlight(&updated.id.to_string());
    let arrow = presenter.highlight("=>");
    presenter.line(&format!(
        "  Quiz [{id}] changed to: {} {arrow} {}",
        updated.question, updated.answer
    ));
    Ok(())
}

fn cmd_test(
    conn: &Connection,
    presenter: &mut dyn Presenter,
    prompter: &mut dyn Prompter,
    arg: Option<&str>,
) -> Result<(), CommandError> {
    let id = validate_id(arg)?;
    let quiz = quiz::get_quiz(conn, id)?.ok_or(CommandError::NotFound(id))?;

    let answer = prompter.ask(&quiz.question)?;

    if answers_match(&answer, &quiz.answer) {
        presenter.ok("Correct");
    } else {
        presenter.line("Incorrect");
    }
    Ok(())
}

fn cmd_play<R: Rng>(
    conn: &Connection,
    presenter: &mut dyn Presenter,
    prompter: &mut dyn Prompter,
    rng: &mut R,
) -> Result<(), CommandError> {
    let quizzes = quiz::list_quizzes(conn)?;
    let questions_total = quizzes.len();
    let started_at = now();

    logger::log(&format!("exam started with {questions_total} questions"));
    let outcome = ExamSession::new(quizzes).run(rng, prompter, presenter)?;
    logger::log(&format!(
        "exam finished: score {} ({})",
        outcome.score,
        outcome.reason.as_str()
    ));

    if outcome.reason == EndReason::NoQuestions {
        presenter.line("There are no questions to play.");
        return Ok(());
    }

    let score = presenter.highlight(&outcome.score.to_string());
    presenter.line(&format!("End of exam. Correct answers: {score}"));
    exam::record_exam(conn, started_at, questions_total, &outcome)?;
    Ok(())
}

fn cmd_history(conn: &Connection, presenter: &mut dyn Presenter) -> Result<(), CommandError> {
    let exams = exam::list_exams(conn)?;
    if exams.is_empty() {
        presenter.line("No exams have been played yet.");
        return Ok(());
    }

    for record in exams {
        let score = presenter.highlight(&format!("{}/{}", record.score, record.questions_total));
        presenter.line(&format!(
            "  {}  {score}  ({})",
            format_timestamp(record.finished_at),
            record.outcome
        ));
    }
    Ok(())
}

fn cmd_import(
    conn: &Connection,
    presenter: &mut dyn Presenter,
    arg: Option<&str>,
) -> Result<(), CommandError> {
    let path = arg.ok_or(CommandError::MissingArgument("path"))?;

    let mut imported = 0;
    for (question, answer) in csv::load_csv(Path::new(path))? {
        quiz::create_quiz(conn, &question, &answer)?;
        imported += 1;
    }

    presenter.line(&format!("Imported {imported} quizzes from {path}"));
    Ok(())
}

fn cmd_export(
    conn: &Connection,
    presenter: &mut dyn Presenter,
    arg: Option<&str>,
) -> Result<(), CommandError> {
    let path = arg.ok_or(CommandError::MissingArgument("path"))?;

    let quizzes = quiz::list_quizzes(conn)?;
    let exported = csv::export_csv(Path::new(path), &quizzes)?;

    presenter.line(&format!("Exported {exported} quizzes to {path}"));
    Ok(())
}

fn format_timestamp(secs: u64) -> String {
    chrono::DateTime::from_timestamp(secs as i64, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| secs.to_string())
}
