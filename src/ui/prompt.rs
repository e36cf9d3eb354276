//! Line input prompts.

use anyhow::Result;
use console::style;
use dialoguer::Input;

/// Read a single line, allowing empty input.
pub fn read_line(label: &str) -> Result<String> {
    let value: String = Input::<String>::new()
        .with_prompt(format!("  {}", style(label).bold()))
        .allow_empty(true)
        .interact_text()?;
    Ok(value)
}

/// Label shown before a questionnaire answer.
#[must_use]
pub fn answer_label(optional: bool) -> String {
    if optional {
        "→ (press Enter to skip)".to_string()
    } else {
        "→".to_string()
    }
}

/// Only a lone `y` (any case) counts as yes. Anything else, typos
/// included, keeps the existing file.
#[must_use]
pub fn is_affirmative(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case("y")
}

/// Sentinel inputs that end a Claude conversation.
#[must_use]
pub fn is_quit(input: &str) -> bool {
    let input = input.trim();
    ["quit", "exit", "done"]
        .iter()
        .any(|word| input.eq_ignore_ascii_case(word))
}
