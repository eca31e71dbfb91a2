use crate::models::{ExamOutcome, ExamRecord};
use rusqlite::{Connection, Result};
use std::time::{SystemTime, UNIX_EPOCH};

fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

pub fn record_exam(
    conn: &Connection,
    started_at: u64,
    questions_total: usize,
    outcome: &ExamOutcome,
) -> Result<u64> {
    let finished_at = now();

    conn.execute(
        "INSERT INTO exams (started_at, finished_at, questions_total, score, outcome, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
        rusqlite::params![
            started_at,
            finished_at,
            questions_total,
            outcome.score,
            outcome.reason.as_str(),
            finished_at,
            finished_at
        ],
    )?;

    Ok(conn.last_insert_rowid() as u64)
}

/// Past exams, newest first.
pub fn list_exams(conn: &Connection) -> Result<Vec<ExamRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, created_at, updated_at, started_at, finished_at, questions_total, score, outcome
         FROM exams ORDER BY id DESC",
    )?;

    let exams = stmt
        .query_map([], |row| {
            Ok(ExamRecord {
                id: row.get(0)?,
                created_at: row.get(1)?,
                updated_at: row.get(2)?,
                started_at: row.get(3)?,
                finished_at: row.get(4)?,
                questions_total: row.get(5)?,
                score: row.get(6)?,
                outcome: row.get(7)?,
            })
        })?
        .filter_map(|r| r.ok())
        .collect();

    Ok(exams)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::run_migrations;
    use crate::models::EndReason;

    #[test]
    fn test_record_and_list_exam() {
        let temp_dir = tempfile::tempdir().unwrap();
        let conn = Connection::open(temp_dir.path().join("test.db")).unwrap();
        run_migrations(&conn).unwrap();

        let outcome = ExamOutcome {
            score: 3,
            reason: EndReason::Exhausted,
        };
        let id = record_exam(&conn, now() - 60, 3, &outcome).unwrap();
        assert_eq!(id, 1);

        let exams = list_exams(&conn).unwrap();
        assert_eq!(exams.len(), 1);
        assert_eq!(exams[0].score, 3);
        assert_eq!(exams[0].questions_total, 3);
        assert_eq!(exams[0].outcome, "exhausted");
        assert!(exams[0].started_at <= exams[0].finished_at);
    }

    #[test]
    fn test_list_exams_newest_first() {
        let temp_dir = tempfile::tempdir().unwrap();
        let conn = Connection::open(temp_dir.path().join("test.db")).unwrap();
        run_migrations(&conn).unwrap();

        let first = ExamOutcome {
            score: 0,
            reason: EndReason::WrongAnswer,
        };
        let second = ExamOutcome {
            score: 2,
            reason: EndReason::Exhausted,
        };
        record_exam(&conn, now(), 2, &first).unwrap();
        record_exam(&conn, now(), 2, &second).unwrap();

        let exams = list_exams(&conn).unwrap();
        assert_eq!(exams.len(), 2);
        assert_eq!(exams[0].outcome, "exhausted");
        assert_eq!(exams[1].outcome, "wrong answer");
    }

    #[test]
    fn test_list_exams_empty() {
        let temp_dir = tempfile::tempdir().unwrap();
        let conn = Connection::open(temp_dir.path().join("test.db")).unwrap();
        run_migrations(&conn).unwrap();

        assert!(list_exams(&conn).unwrap().is_empty());
    }
}
