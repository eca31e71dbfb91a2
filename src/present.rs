use crossterm::style::Stylize;

/// Output capability handed to the dispatcher and the exam session.
/// Implementations decide where lines go and whether they are colorized;
/// callers never reach for stdout directly.
pub trait Presenter {
    fn line(&mut self, text: &str);

    /// A line marking something that went well (a correct answer).
    fn ok(&mut self, text: &str);

    /// A single human-readable error line.
    fn error(&mut self, text: &str);

    /// Decorate a fragment (an id, a score) before it is embedded in a line.
    fn highlight(&self, text: &str) -> String;
}

pub struct ConsolePresenter {
    color: bool,
}

impl ConsolePresenter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }
}

impl Presenter for ConsolePresenter {
    fn line(&mut self, text: &str) {
        println!("{text}");
    }

    fn ok(&mut self, text: &str) {
        if self.color {
            println!("{}", text.green());
        } else {
            println!("{text}");
        }
    }

    fn error(&mut self, text: &str) {
        if self.color {
            eprintln!("{}", text.red());
        } else {
            eprintln!("{text}");
        }
    }

    fn highlight(&self, text: &str) -> String {
        if self.color {
            text.magenta().to_string()
        } else {
            text.to_string()
        }
    }
}

/// Collects lines instead of printing them. Used by tests, and usable as a
/// sink when output has to be shipped somewhere other than a terminal.
#[derive(Debug, Default)]
pub struct BufferPresenter {
    pub lines: Vec<String>,
}

impl BufferPresenter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Presenter for BufferPresenter {
    fn line(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }

    fn ok(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }

    fn error(&mut self, text: &str) {
        self.lines.push(format!("error: {text}"));
    }

    fn highlight(&self, text: &str) -> String {
        text.to_string()
    }
}
