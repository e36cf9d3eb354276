//! Spinner shown while waiting on Claude.

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Checkbox frames, filling in and clearing again.
const TICKS: [&str; 6] = ["[   ]", "[.  ]", "[.. ]", "[...]", "[ ..]", "[  .]"];

pub struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    /// Create a new spinner with the given message.
    #[must_use]
    pub fn new(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();

        if let Ok(spinner_style) = ProgressStyle::default_spinner()
            .tick_strings(&TICKS)
            .template("  {msg} {spinner}")
        {
            bar.set_style(spinner_style);
        }

        bar.enable_steady_tick(Duration::from_millis(150));
        bar.set_message(format!("{}", style(message).dim()));

        Self { bar }
    }

    /// Remove the spinner without printing anything.
    pub fn finish_and_clear(&self) {
        self.bar.finish_and_clear();
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}
