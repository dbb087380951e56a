use crate::error::Result;

/// How a message should be presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Warning,
    Error,
}

/// The interactive boundary of the workflow: questions in, answers and
/// notifications out. Styling is entirely up to the implementation.
pub trait Terminal {
    /// Ask a question and return the raw answer line. End of input is
    /// `PronitError::Aborted`.
    fn ask(&mut self, question: &str) -> Result<String>;

    fn notify(&mut self, tone: Tone, message: &str);

    /// Ask a yes/no question. Only `y` or `yes` (any case) count as yes.
    fn confirm(&mut self, question: &str) -> Result<bool> {
        let answer = self.ask(&format!("{question} (y/n)"))?;
        Ok(is_yes(&answer))
    }
}

pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
