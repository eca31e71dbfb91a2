/// A stored question/answer pair. `id` is assigned by the database on
/// insert and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quiz {
    pub id: u64,
    pub question: String,
    pub answer: String,
    pub created_at: u64,
    pub updated_at: u64,
}

/// Why an exam ended. All three are ordinary terminal states, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// There were no quizzes to ask when the exam started.
    NoQuestions,
    /// Every quiz was asked and answered correctly.
    Exhausted,
    /// The first wrong answer ended the exam early.
    WrongAnswer,
}

impl EndReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndReason::NoQuestions => "no questions",
            EndReason::Exhausted => "exhausted",
            EndReason::WrongAnswer => "wrong answer",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExamOutcome {
    pub score: usize,
    pub reason: EndReason,
}

/// One finished `play` run, as persisted in the exams table.
#[derive(Debug, Clone)]
pub struct ExamRecord {
    pub id: u64,
    pub created_at: u64,
    pub updated_at: u64,
    pub started_at: u64,
    pub finished_at: u64,
    pub questions_total: usize,
    pub score: usize,
    pub outcome: String,
}
