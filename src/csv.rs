use crate::models::Quiz;
use std::fs;
use std::io;
use std::path::Path;

/// Reads question/answer pairs from a CSV file, skipping lines where either
/// field is blank.
pub fn load_csv(path: &Path) -> io::Result<Vec<(String, String)>> {
    let content = fs::read_to_string(path)?;
    let mut pairs = Vec::new();

    for line in content.lines() {
        if let Some((question, answer)) = parse_csv_line(line)
            && !question.trim().is_empty()
            && !answer.trim().is_empty()
        {
            pairs.push((question, answer));
        }
    }

    Ok(pairs)
}

pub fn parse_csv_line(line: &str) -> Option<(String, String)> {
    let mut chars = line.chars().peekable();
    let mut question = String::new();
    let mut answer = String::new();
    let mut current_field = &mut question;
    let mut in_quotes = false;
    let mut field_index = 0;

    while let Some(c) = chars.next() {
        match c {
            '"' if !in_quotes => {
                in_quotes = true;
            }
            '"' if in_quotes => {
                if chars.peek() == Some(&',') {
                    chars.next();
                    in_quotes = false;
                    if field_index == 0 {
                        current_field = &mut answer;
                        field_index = 1;
                    }
                } else if chars.peek() == Some(&'"') {
                    chars.next();
                    current_field.push('"');
                } else {
                    in_quotes = false;
                    if field_index == 0 {
                        current_field = &mut answer;
                        field_index = 1;
                    }
                }
            }
            ',' if !in_quotes && field_index == 0 => {
                field_index = 1;
                current_field = &mut answer;
            }
            _ => {
                current_field.push(c);
            }
        }
    }

    Some((question, answer))
}

/// Writes every quiz as one `question,answer` line and returns how many
/// were written.
pub fn export_csv(path: &Path, quizzes: &[Quiz]) -> io::Result<usize> {
    let mut content = String::new();
    for quiz in quizzes {
        content.push_str(&format_csv_field(&quiz.question));
        content.push(',');
        content.push_str(&format_csv_field(&quiz.answer));
        content.push('\n');
    }

    fs::write(path, content)?;
    Ok(quizzes.len())
}

fn format_csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiz(question: &str, answer: &str) -> Quiz {
        Quiz {
            id: 1,
            question: question.to_string(),
            answer: answer.to_string(),
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_parse_csv_simple() {
        let result = parse_csv_line("What is 2+2?,Four");
        assert!(result.is_some());
        let (question, answer) = result.unwrap();
        assert_eq!(question, "What is 2+2?");
        assert_eq!(answer, "Four");
    }

    #[test]
    fn test_parse_csv_quoted_fields() {
        let result = parse_csv_line("\"Name the three primary colors, in any order\",\"red, green, blue\"");
        let (question, answer) = result.unwrap();
        assert_eq!(question, "Name the three primary colors, in any order");
        assert_eq!(answer, "red, green, blue");
    }

    #[test]
    fn test_parse_csv_embedded_quotes() {
        let result = parse_csv_line("\"Who wrote \"\"Hamlet\"\"?\",Shakespeare");
        let (question, answer) = result.unwrap();
        assert_eq!(question, "Who wrote \"Hamlet\"?");
        assert_eq!(answer, "Shakespeare");
    }

    #[test]
    fn test_load_csv_skips_blank_fields() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("deck.csv");
        fs::write(&path, "2+2?,4\n,missing question\nno answer,\n\n3+3?,6\n").unwrap();

        let pairs = load_csv(&path).unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0], ("2+2?".to_string(), "4".to_string()));
        assert_eq!(pairs[1], ("3+3?".to_string(), "6".to_string()));
    }

    #[test]
    fn test_load_csv_missing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(load_csv(&temp_dir.path().join("nope.csv")).is_err());
    }

    #[test]
    fn test_export_quotes_only_when_needed() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("out.csv");

        let quizzes = vec![
            quiz("2+2?", "4"),
            quiz("Primary colors, in order?", "red, green, blue"),
            quiz("Who wrote \"Hamlet\"?", "Shakespeare"),
        ];
        let written = export_csv(&path, &quizzes).unwrap();
        assert_eq!(written, 3);

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "2+2?,4");
        assert_eq!(lines[1], "\"Primary colors, in order?\",\"red, green, blue\"");
        assert_eq!(lines[2], "\"Who wrote \"\"Hamlet\"\"?\",Shakespeare");
    }

    #[test]
    fn test_exported_file_loads_back() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("out.csv");

        let quizzes = vec![quiz("Primary colors, in order?", "red, green, blue")];
        export_csv(&path, &quizzes).unwrap();

        let pairs = load_csv(&path).unwrap();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].0, "Primary colors, in order?");
        assert_eq!(pairs[0].1, "red, green, blue");
    }
}
