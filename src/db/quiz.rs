use crate::error::CommandError;
use crate::models::Quiz;
use rusqlite::{Connection, OptionalExtension, Result};
use std::time::{SystemTime, UNIX_EPOCH};

fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

fn validate_fields(question: &str, answer: &str) -> Result<(), CommandError> {
    let mut problems = Vec::new();
    if question.trim().is_empty() {
        problems.push("The question must not be empty.".to_string());
    }
    if answer.trim().is_empty() {
        problems.push("The answer must not be empty.".to_string());
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(CommandError::Validation(problems))
    }
}

fn map_quiz_row(row: &rusqlite::Row) -> Result<Quiz> {
    Ok(Quiz {
        id: row.get(0)?,
        question: row.get(1)?,
        answer: row.get(2)?,
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
    })
}

pub fn list_quizzes(conn: &Connection) -> Result<Vec<Quiz>> {
    let mut stmt = conn.prepare(
        "SELECT id, question, answer, created_at, updated_at FROM quizzes ORDER BY id",
    )?;

    let quizzes = stmt
        .query_map([], |row| map_quiz_row(row))?
        .filter_map(|r| r.ok())
        .collect();

    Ok(quizzes)
}

pub fn get_quiz(conn: &Connection, id: u64) -> Result<Option<Quiz>> {
    conn.query_row(
        "SELECT id, question, answer, created_at, updated_at FROM quizzes WHERE id = ?",
        [id],
        |row| map_quiz_row(row),
    )
    .optional()
}

pub fn create_quiz(
    conn: &Connection,
    question: &str,
    answer: &str,
) -> Result<Quiz, CommandError> {
    validate_fields(question, answer)?;

    let created_at = now();
    conn.execute(
        "INSERT INTO quizzes (question, answer, created_at, updated_at) VALUES (?, ?, ?, ?)",
        rusqlite::params![question.trim(), answer.trim(), created_at, created_at],
    )?;

    Ok(Quiz {
        id: conn.last_insert_rowid() as u64,
        question: question.trim().to_string(),
        answer: answer.trim().to_string(),
        created_at,
        updated_at: created_at,
    })
}

pub fn update_quiz(
    conn: &Connection,
    id: u64,
    question: &str,
    answer: &str,
) -> Result<Quiz, CommandError> {
    validate_fields(question, answer)?;

    let updated_at = now();
    let affected = conn.execute(
        "UPDATE quizzes SET question = ?, answer = ?, updated_at = ? WHERE id = ?",
        rusqlite::params![question.trim(), answer.trim(), updated_at, id],
    )?;

    if affected == 0 {
        return Err(CommandError::NotFound(id));
    }

    match get_quiz(conn, id)? {
        Some(quiz) => Ok(quiz),
        None => Err(CommandError::NotFound(id)),
    }
}

pub fn delete_quiz(conn: &Connection, id: u64) -> Result<(), CommandError> {
    conn.execute("DELETE FROM quizzes WHERE id = ?", [id])?;
    Ok(())
}
