use colored::{Color, Colorize};
use pronit_core::terminal::{Terminal, Tone};
use pronit_core::{PronitError, Result};
use std::io::{BufRead, IsTerminal, Write};

/// Presentation settings for everything printed to the user.
#[derive(Debug, Clone)]
pub struct Theme {
    pub enabled: bool,
    pub marker: &'static str,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

impl Theme {
    pub fn plain() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Colors only when stdout is a terminal, `--no-color` wasn't given and
    /// `NO_COLOR` isn't set.
    pub fn detect(no_color: bool) -> Self {
        if no_color {
            return Self::plain();
        }
        let enabled = std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal();
        Self {
            enabled,
            ..Self::default()
        }
    }

    pub fn paint(&self, tone: Tone, text: &str) -> String {
        if !self.enabled {
            return text.to_string();
        }
        match tone {
            Tone::Info => text.to_string(),
            Tone::Success => text.color(self.success).bold().to_string(),
            Tone::Warning => text.color(self.warning).to_string(),
            Tone::Error => text.color(self.error).bold().to_string(),
        }
    }

    fn prompt_marker(&self) -> String {
        if self.enabled {
            self.marker.bold().to_string()
        } else {
            self.marker.to_string()
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            enabled: true,
            marker: ">",
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
        }
    }
}

/// Line-based terminal: the question on one line, the answer typed after a
/// `>` marker on the next.
pub struct LineTerminal<R, W> {
    input: R,
    output: W,
    theme: Theme,
}

impl LineTerminal<std::io::StdinLock<'static>, std::io::Stdout> {
    pub fn stdio(theme: Theme) -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout(), theme)
    }
}

impl<R: BufRead, W: Write> LineTerminal<R, W> {
    pub fn new(input: R, output: W, theme: Theme) -> Self {
        Self {
            input,
            output,
            theme,
        }
    }

    #[cfg(test)]
    fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Terminal for LineTerminal<R, W> {
    fn ask(&mut self, question: &str) -> Result<String> {
        write!(
            self.output,
            "{question}\n{} ",
            self.theme.prompt_marker()
        )?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Err(PronitError::Aborted);
        }
        Ok(line.trim_end_matches(&['\n', '\r'][..]).to_string())
    }

    fn notify(&mut self, tone: Tone, message: &str) {
        let _ = writeln!(self.output, "{}", self.theme.paint(tone, message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn terminal(input: &str) -> LineTerminal<Cursor<Vec<u8>>, Vec<u8>> {
        LineTerminal::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), Theme::plain())
    }

    #[test]
    fn ask_prints_question_and_returns_line() {
        let mut term = terminal("demo\r\n");
        assert_eq!(term.ask("Please enter the project name").unwrap(), "demo");
        let out = String::from_utf8(term.into_output()).unwrap();
        assert_eq!(out, "Please enter the project name\n> ");
    }

    #[test]
    fn end_of_input_aborts() {
        let mut term = terminal("");
        assert!(matches!(term.ask("anything").unwrap_err(), PronitError::Aborted));
    }

    #[test]
    fn confirm_accepts_yes() {
        let mut term = terminal("Yes\nn\n");
        assert!(term.confirm("Private?").unwrap());
        assert!(!term.confirm("Private?").unwrap());
        let out = String::from_utf8(term.into_output()).unwrap();
        assert!(out.contains("Private? (y/n)"));
    }

    #[test]
    fn no_color_flag_disables_styling() {
        let theme = Theme::detect(true);
        assert!(!theme.enabled);
        assert_eq!(theme.paint(Tone::Success, "done"), "done");
    }

    #[test]
    fn plain_theme_leaves_text_alone() {
        let theme = Theme::plain();
        assert_eq!(theme.paint(Tone::Error, "boom"), "boom");
    }

    #[test]
    fn notify_writes_one_line() {
        let mut term = terminal("");
        term.notify(Tone::Success, "Remote repository has been created");
        let out = String::from_utf8(term.into_output()).unwrap();
        assert_eq!(out, "Remote repository has been created\n");
    }
}
