//! CLI commands.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use console::style;

use crate::config::{self, Config};
use crate::ui::{self, StatusLine, Table};
use crate::workspace::{GOALS_FILE, Workspace};

/// Report which workspace artifacts exist.
///
/// Fails when GOALS.md is missing, since nothing else works without it.
pub fn check(root: &Path) -> ExitCode {
    let workspace = Workspace::new(root);
    let inventory = workspace.inventory();

    println!();
    println!("pos {}", env!("CARGO_PKG_VERSION"));
    println!("{}", style(workspace.root().display()).dim());
    println!();

    let mut table = Table::new(&["Item", "Status"]);
    for (name, present) in &inventory {
        table.add_row(&[name.as_str(), if *present { "ok" } else { "missing" }]);
    }
    table.print();
    println!();

    if goals_present(&inventory) {
        StatusLine::ok("Workspace ready").print();
        println!();
        ExitCode::SUCCESS
    } else {
        StatusLine::error("GOALS.md not found").print();
        ui::status::hint("Run `pos setup` to create it.");
        println!();
        ExitCode::FAILURE
    }
}

fn goals_present(inventory: &[(String, bool)]) -> bool {
    inventory
        .iter()
        .any(|(name, present)| name == GOALS_FILE && *present)
}

/// Write the default config to `path` unless a file is already there.
/// Returns whether a file was created.
fn ensure_config_file(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    Config::default().save_to(path)?;
    Ok(true)
}

pub fn config_cmd() -> Result<()> {
    let config_path = config::config_path();

    if ensure_config_file(&config_path)? {
        StatusLine::ok(format!("Created {} with default settings", config_path.display())).print();
    }

    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "nano".to_string());

    std::process::Command::new(editor)
        .arg(&config_path)
        .status()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn code(exit: ExitCode) -> String {
        format!("{exit:?}")
    }

    #[test]
    fn check_fails_until_goals_exist() {
        let dir = TempDir::new().unwrap();
        assert_eq!(code(check(dir.path())), code(ExitCode::FAILURE));

        Workspace::new(dir.path()).write_goals("# Goals").unwrap();
        assert_eq!(code(check(dir.path())), code(ExitCode::SUCCESS));
    }

    #[test]
    fn goals_presence_comes_from_inventory() {
        let missing = vec![("Tasks/".to_string(), true), ("GOALS.md".to_string(), false)];
        assert!(!goals_present(&missing));

        let present = vec![("GOALS.md".to_string(), true)];
        assert!(goals_present(&present));
        assert!(!goals_present(&[]));
    }

    #[test]
    fn config_file_is_created_once() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".personal-os/config.toml");

        assert!(ensure_config_file(&path).unwrap());
        let created = Config::parse(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(created.dialogue.max_turns, 20);

        std::fs::write(&path, "[dialogue]\nmax_turns = 3\n").unwrap();
        assert!(!ensure_config_file(&path).unwrap());
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "[dialogue]\nmax_turns = 3\n"
        );
    }
}
