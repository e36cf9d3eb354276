//! On-disk layout of a Personal OS workspace.
//!
//! Everything here is created at most once. Files that already exist are
//! left alone so operator edits survive re-running setup; only GOALS.md
//! is ever rewritten, and only through [`Workspace::write_goals`].

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub const TASKS_DIR: &str = "Tasks";
pub const CATEGORY_DIRS: [&str; 3] = [TASKS_DIR, "Knowledge", "Resources"];

/// Template source (relative to the workspace root) and its destination.
pub const TEMPLATES: [(&str, &str); 2] = [
    ("core/templates/CLAUDE.md", "CLAUDE.md"),
    ("core/templates/gitignore", ".gitignore"),
];

pub const GOALS_FILE: &str = "GOALS.md";
pub const BACKLOG_FILE: &str = "BACKLOG.md";

pub const BACKLOG_SEED: &str = "# Backlog\n\nDrop raw notes or todos here. Say `process my backlog` when you're ready for triage.\n";

/// What happened to one scaffolding artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScaffoldOutcome {
    Created(String),
    /// Already present; left untouched.
    Exists(String),
    /// The template to copy from is missing, so the destination was skipped.
    TemplateSourceMissing(String),
}

pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn goals_path(&self) -> PathBuf {
        self.root.join(GOALS_FILE)
    }

    #[must_use]
    pub fn tasks_dir(&self) -> PathBuf {
        self.root.join(TASKS_DIR)
    }

    #[must_use]
    pub fn has_goals(&self) -> bool {
        self.goals_path().exists()
    }

    /// Create the category folders.
    pub fn ensure_dirs(&self) -> Result<Vec<ScaffoldOutcome>> {
        CATEGORY_DIRS
            .iter()
            .map(|name| -> Result<ScaffoldOutcome> {
                let path = self.root.join(name);
                let label = format!("{name}/");
                if path.is_dir() {
                    return Ok(ScaffoldOutcome::Exists(label));
                }
                std::fs::create_dir_all(&path)
                    .with_context(|| format!("Failed to create directory {}", path.display()))?;
                tracing::info!("Created {}", path.display());
                Ok(ScaffoldOutcome::Created(label))
            })
            .collect()
    }

    /// Copy template files into the workspace root.
    pub fn copy_templates(&self) -> Result<Vec<ScaffoldOutcome>> {
        TEMPLATES
            .iter()
            .map(|(source, dest)| -> Result<ScaffoldOutcome> {
                let source_path = self.root.join(source);
                let dest_path = self.root.join(dest);

                if !source_path.is_file() {
                    tracing::warn!("Template not found: {}", source_path.display());
                    return Ok(ScaffoldOutcome::TemplateSourceMissing((*source).to_string()));
                }
                if dest_path.exists() {
                    return Ok(ScaffoldOutcome::Exists((*dest).to_string()));
                }

                std::fs::copy(&source_path, &dest_path).with_context(|| {
                    format!(
                        "Failed to copy {} to {}",
                        source_path.display(),
                        dest_path.display()
                    )
                })?;
                Ok(ScaffoldOutcome::Created(format!("{source} → {dest}")))
            })
            .collect()
    }

    /// Seed BACKLOG.md.
    pub fn ensure_backlog(&self) -> Result<ScaffoldOutcome> {
        let path = self.root.join(BACKLOG_FILE);
        if path.exists() {
            return Ok(ScaffoldOutcome::Exists(BACKLOG_FILE.to_string()));
        }
        std::fs::write(&path, BACKLOG_SEED)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(ScaffoldOutcome::Created(BACKLOG_FILE.to_string()))
    }

    /// Write GOALS.md, replacing whatever is there.
    pub fn write_goals(&self, content: &str) -> Result<()> {
        let path = self.goals_path();
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Wrote {} ({} bytes)", path.display(), content.len());
        Ok(())
    }

    /// Every artifact the workspace should contain, with whether it exists.
    #[must_use]
    pub fn inventory(&self) -> Vec<(String, bool)> {
        let dirs = CATEGORY_DIRS
            .iter()
            .map(|name| (format!("{name}/"), self.root.join(name).is_dir()));
        let files = TEMPLATES
            .iter()
            .map(|(_, dest)| *dest)
            .chain([GOALS_FILE, BACKLOG_FILE])
            .map(|name| (name.to_string(), self.root.join(name).is_file()));
        dirs.chain(files).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn with_templates() -> TempDir {
        let dir = TempDir::new().unwrap();
        let templates = dir.path().join("core/templates");
        std::fs::create_dir_all(&templates).unwrap();
        std::fs::write(templates.join("CLAUDE.md"), "# Agent instructions\n").unwrap();
        std::fs::write(templates.join("gitignore"), ".DS_Store\n").unwrap();
        dir
    }

    #[test]
    fn creates_dirs_once() {
        let dir = TempDir::new().unwrap();
        let ws = Workspace::new(dir.path());

        let first = ws.ensure_dirs().unwrap();
        assert!(first.iter().all(|o| matches!(o, ScaffoldOutcome::Created(_))));
        for name in CATEGORY_DIRS {
            assert!(dir.path().join(name).is_dir());
        }

        let second = ws.ensure_dirs().unwrap();
        assert!(second.iter().all(|o| matches!(o, ScaffoldOutcome::Exists(_))));
    }

    #[test]
    fn copies_templates_without_overwriting() {
        let dir = with_templates();
        let ws = Workspace::new(dir.path());

        let first = ws.copy_templates().unwrap();
        assert!(first.iter().all(|o| matches!(o, ScaffoldOutcome::Created(_))));
        assert_eq!(
            std::fs::read_to_string(dir.path().join("CLAUDE.md")).unwrap(),
            "# Agent instructions\n"
        );

        std::fs::write(dir.path().join(".gitignore"), "my edits\n").unwrap();
        let second = ws.copy_templates().unwrap();
        assert!(second.iter().all(|o| matches!(o, ScaffoldOutcome::Exists(_))));
        assert_eq!(
            std::fs::read_to_string(dir.path().join(".gitignore")).unwrap(),
            "my edits\n"
        );
    }

    #[test]
    fn missing_template_is_reported_and_skipped() {
        let dir = TempDir::new().unwrap();
        let ws = Workspace::new(dir.path());

        let outcomes = ws.copy_templates().unwrap();

        assert_eq!(
            outcomes,
            vec![
                ScaffoldOutcome::TemplateSourceMissing("core/templates/CLAUDE.md".to_string()),
                ScaffoldOutcome::TemplateSourceMissing("core/templates/gitignore".to_string()),
            ]
        );
        assert!(!dir.path().join("CLAUDE.md").exists());
    }

    #[test]
    fn backlog_is_seeded_once() {
        let dir = TempDir::new().unwrap();
        let ws = Workspace::new(dir.path());

        assert_eq!(
            ws.ensure_backlog().unwrap(),
            ScaffoldOutcome::Created(BACKLOG_FILE.to_string())
        );
        assert_eq!(
            std::fs::read_to_string(dir.path().join(BACKLOG_FILE)).unwrap(),
            BACKLOG_SEED
        );

        std::fs::write(dir.path().join(BACKLOG_FILE), "- call Sam\n").unwrap();
        assert_eq!(
            ws.ensure_backlog().unwrap(),
            ScaffoldOutcome::Exists(BACKLOG_FILE.to_string())
        );
        assert_eq!(
            std::fs::read_to_string(dir.path().join(BACKLOG_FILE)).unwrap(),
            "- call Sam\n"
        );
    }

    #[test]
    fn write_goals_replaces_content() {
        let dir = TempDir::new().unwrap();
        let ws = Workspace::new(dir.path());
        assert!(!ws.has_goals());

        ws.write_goals("old").unwrap();
        ws.write_goals("new").unwrap();

        assert!(ws.has_goals());
        assert_eq!(std::fs::read_to_string(ws.goals_path()).unwrap(), "new");
    }

    #[test]
    fn inventory_lists_every_artifact() {
        let dir = TempDir::new().unwrap();
        let ws = Workspace::new(dir.path());
        ws.ensure_backlog().unwrap();

        let inventory = ws.inventory();
        let names: Vec<&str> = inventory.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(
            names,
            [
                "Tasks/",
                "Knowledge/",
                "Resources/",
                "CLAUDE.md",
                ".gitignore",
                "GOALS.md",
                "BACKLOG.md"
            ]
        );
        assert!(inventory.iter().any(|(n, ok)| n == "BACKLOG.md" && *ok));
        assert!(inventory.iter().any(|(n, ok)| n == "GOALS.md" && !*ok));
    }
}
