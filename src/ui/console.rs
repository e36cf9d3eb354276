//! The operator console: everything the wizard reads or says during a
//! goals conversation goes through [`Console`].

use anyhow::Result;
use console::style;

use super::status::{self, Status};
use super::{Spinner, StatusLine, prompt};

pub trait Console {
    /// Read one line of input. Empty input is allowed.
    fn read_line(&mut self, prompt: &str) -> Result<String>;

    /// Print a numbered section banner.
    fn section(&mut self, title: &str);

    /// Print a plain informational line.
    fn note(&mut self, text: &str);

    /// Print a line with a status badge.
    fn status(&mut self, status: Status, text: &str);

    /// Print a question with an optional example hint.
    fn question(&mut self, text: &str, hint: Option<&str>);

    /// Show a reply from Claude.
    fn assistant(&mut self, text: &str);

    /// Called before and after waiting on Claude.
    fn waiting(&mut self, _waiting: bool) {}
}

/// Interactive terminal console backed by `dialoguer`.
#[derive(Default)]
pub struct TerminalConsole {
    spinner: Option<Spinner>,
}

impl TerminalConsole {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Console for TerminalConsole {
    fn read_line(&mut self, label: &str) -> Result<String> {
        prompt::read_line(label)
    }

    fn section(&mut self, title: &str) {
        status::section(title);
    }

    fn note(&mut self, text: &str) {
        println!("  {text}");
    }

    fn status(&mut self, status: Status, text: &str) {
        StatusLine::new(status, text).print();
    }

    fn question(&mut self, text: &str, hint: Option<&str>) {
        println!();
        println!("{} {}", style("?").bold().cyan(), text);
        if let Some(hint) = hint {
            println!("  {}", style(format!("Examples: {hint}")).dim());
        }
    }

    fn assistant(&mut self, text: &str) {
        println!();
        println!("{}", style("Claude").bold().magenta());
        for line in text.lines() {
            println!("  {line}");
        }
        println!();
    }

    fn waiting(&mut self, waiting: bool) {
        if waiting {
            self.spinner = Some(Spinner::new("Claude is thinking"));
        } else if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

#[cfg(test)]
pub mod scripted {
    //! A console that replays canned input and records what was shown.

    use std::collections::VecDeque;

    use anyhow::{Result, bail};

    use super::Console;
    use crate::ui::status::Status;

    #[derive(Default)]
    pub struct ScriptedConsole {
        inputs: VecDeque<String>,
        pub prompts: Vec<String>,
        pub statuses: Vec<(Status, String)>,
        pub questions: Vec<String>,
        pub sections: Vec<String>,
        pub notes: Vec<String>,
        pub replies: Vec<String>,
    }

    impl ScriptedConsole {
        pub fn new<I, S>(inputs: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            Self {
                inputs: inputs.into_iter().map(Into::into).collect(),
                ..Self::default()
            }
        }

        /// Number of scripted lines not yet consumed.
        pub fn remaining(&self) -> usize {
            self.inputs.len()
        }
    }

    impl Console for ScriptedConsole {
        fn read_line(&mut self, prompt: &str) -> Result<String> {
            self.prompts.push(prompt.to_string());
            match self.inputs.pop_front() {
                Some(line) => Ok(line),
                None => bail!("script exhausted at prompt {prompt:?}"),
            }
        }

        fn section(&mut self, title: &str) {
            self.sections.push(title.to_string());
        }

        fn note(&mut self, text: &str) {
            self.notes.push(text.to_string());
        }

        fn status(&mut self, status: Status, text: &str) {
            self.statuses.push((status, text.to_string()));
        }

        fn question(&mut self, text: &str, _hint: Option<&str>) {
            self.questions.push(text.to_string());
        }

        fn assistant(&mut self, text: &str) {
            self.replies.push(text.to_string());
        }
    }
}
