use crate::models::{EndReason, ExamOutcome, Quiz};
use crate::present::Presenter;
use crate::prompt::Prompter;
use rand::Rng;
use std::io;

/// Grading rule shared by `play` and `test`: surrounding whitespace is
/// ignored and the comparison is case-insensitive.
pub fn answers_match(given: &str, expected: &str) -> bool {
    given.trim().to_lowercase() == expected.trim().to_lowercase()
}

/// One run of the `play` command. Owns the pool of not-yet-asked quizzes and
/// drives randomized question/answer rounds until the pool runs out or the
/// first wrong answer.
pub struct ExamSession {
    pending: Vec<Quiz>,
    score: usize,
}

impl ExamSession {
    /// Takes a snapshot of the quizzes at session start; repository changes
    /// made while the exam is running do not affect it.
    pub fn new(quizzes: Vec<Quiz>) -> Self {
        Self {
            pending: quizzes,
            score: 0,
        }
    }

    /// Asks every pending quiz at most once, in uniformly random order, and
    /// returns the final score. Ends immediately on the first wrong answer;
    /// the remaining pool is not asked. The prompter call is the only
    /// suspension point and the only error path out of here; exam outcomes
    /// themselves are never errors.
    pub fn run<R: Rng>(
        mut self,
        rng: &mut R,
        prompter: &mut dyn Prompter,
        presenter: &mut dyn Presenter,
    ) -> io::Result<ExamOutcome> {
        if self.pending.is_empty() {
            return Ok(ExamOutcome {
                score: 0,
                reason: EndReason::NoQuestions,
            });
        }

        while !self.pending.is_empty() {
            let index = rng.gen_range(0..self.pending.len());
            let quiz = self.pending.swap_remove(index);

            let answer = prompter.ask(&quiz.question)?;

            if answers_match(&answer, &quiz.answer) {
                self.score += 1;
                presenter.ok(&format!("Correct ({} so far)", self.score));
            } else {
                presenter.line("Incorrect");
                return Ok(ExamOutcome {
                    score: self.score,
                    reason: EndReason::WrongAnswer,
                });
            }
        }

        Ok(ExamOutcome {
            score: self.score,
            reason: EndReason::Exhausted,
        })
    }
}
