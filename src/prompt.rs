use dialoguer::Input;
use std::io;

/// Capability for requesting one line of text from the user. Each call is a
/// suspension point: it blocks until the user submits an answer.
pub trait Prompter {
    fn ask(&mut self, prompt: &str) -> io::Result<String>;

    /// Like `ask`, but the user starts from an editable default value.
    fn ask_with_default(&mut self, prompt: &str, initial: &str) -> io::Result<String>;
}

/// Terminal prompter backed by `dialoguer`.
pub struct DialoguerPrompter;

impl Prompter for DialoguerPrompter {
    fn ask(&mut self, prompt: &str) -> io::Result<String> {
        Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
    }

    fn ask_with_default(&mut self, prompt: &str, initial: &str) -> io::Result<String> {
        Input::<String>::new()
            .with_prompt(prompt)
            .with_initial_text(initial)
            .allow_empty(true)
            .interact_text()
    }
}

/// Replays a fixed sequence of answers, recording every prompt it was shown.
#[cfg(test)]
pub struct ScriptedPrompter {
    answers: std::collections::VecDeque<String>,
    pub prompts: Vec<String>,
    pub defaults: Vec<String>,
}

#[cfg(test)]
impl ScriptedPrompter {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.to_string()).collect(),
            prompts: Vec::new(),
            defaults: Vec::new(),
        }
    }
}

#[cfg(test)]
impl Prompter for ScriptedPrompter {
    fn ask(&mut self, prompt: &str) -> io::Result<String> {
        self.prompts.push(prompt.to_string());
        self.answers.pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "no scripted answer left")
        })
    }

    fn ask_with_default(&mut self, prompt: &str, initial: &str) -> io::Result<String> {
        self.defaults.push(initial.to_string());
        self.ask(prompt)
    }
}

/// Answers by looking the question up in an answer key, so tests stay
/// independent of the order questions are drawn in.
#[cfg(test)]
pub struct AnswerKeyPrompter {
    key: Vec<(String, String)>,
    pub prompts: Vec<String>,
}

#[cfg(test)]
impl AnswerKeyPrompter {
    pub fn new(key: &[(&str, &str)]) -> Self {
        Self {
            key: key
                .iter()
                .map(|(q, a)| (q.to_string(), a.to_string()))
                .collect(),
            prompts: Vec::new(),
        }
    }
}

#[cfg(test)]
impl Prompter for AnswerKeyPrompter {
    fn ask(&mut self, prompt: &str) -> io::Result<String> {
        self.prompts.push(prompt.to_string());
        let answer = self
            .key
            .iter()
            .find(|(question, _)| prompt.contains(question.as_str()))
            .map(|(_, answer)| answer.clone())
            .unwrap_or_default();
        Ok(answer)
    }

    fn ask_with_default(&mut self, prompt: &str, _initial: &str) -> io::Result<String> {
        self.ask(prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_prompter_replays_in_order() {
        let mut prompter = ScriptedPrompter::new(&["first", "second"]);
        assert_eq!(prompter.ask("a").unwrap(), "first");
        assert_eq!(prompter.ask("b").unwrap(), "second");
        assert_eq!(prompter.prompts, vec!["a", "b"]);
    }

    #[test]
    fn test_scripted_prompter_errors_when_exhausted() {
        let mut prompter = ScriptedPrompter::new(&[]);
        assert!(prompter.ask("a").is_err());
    }

    #[test]
    fn test_scripted_prompter_records_defaults() {
        let mut prompter = ScriptedPrompter::new(&["edited"]);
        let answer = prompter.ask_with_default("question", "original").unwrap();
        assert_eq!(answer, "edited");
        assert_eq!(prompter.defaults, vec!["original"]);
    }

    #[test]
    fn test_answer_key_prompter_matches_question() {
        let mut prompter = AnswerKeyPrompter::new(&[("2+2?", "4"), ("3+3?", "6")]);
        assert_eq!(prompter.ask("3+3?").unwrap(), "6");
        assert_eq!(prompter.ask("2+2?").unwrap(), "4");
        assert_eq!(prompter.ask("5+5?").unwrap(), "");
    }
}
