//! Task files under `Tasks/`.
//!
//! Each task is a markdown file whose YAML frontmatter carries `title`,
//! `category`, `priority` (`P0`..`P3`) and `status` (`n`, `s`, `b`, `d`).
//! Other frontmatter keys are preserved untouched when a status changes.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::SystemTime;

use anyhow::{Context, Result, bail};
use serde_yaml::{Mapping, Value};

pub const PRIORITIES: [&str; 4] = ["P0", "P1", "P2", "P3"];

/// Priority assumed when a task does not declare one.
pub const DEFAULT_PRIORITY: &str = "P2";

/// Active-task counts above which a priority is considered overloaded.
const THRESHOLDS: [(&str, usize); 3] = [("P0", 3), ("P1", 5), ("P2", 10)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    NotStarted,
    Started,
    Blocked,
    Done,
}

impl TaskStatus {
    pub const ALL: [Self; 4] = [Self::NotStarted, Self::Started, Self::Blocked, Self::Done];

    /// Single-letter code stored in frontmatter.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::NotStarted => "n",
            Self::Started => "s",
            Self::Blocked => "b",
            Self::Done => "d",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NotStarted => "Not Started",
            Self::Started => "Started",
            Self::Blocked => "Blocked",
            Self::Done => "Done",
        }
    }

    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::NotStarted => "○",
            Self::Started => "◐",
            Self::Blocked => "◑",
            Self::Done => "●",
        }
    }

    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.code() == code)
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    /// Accepts the stored code (`n`) or a spelled-out name (`not-started`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        let status = match s.as_str() {
            "n" | "not-started" | "todo" => Self::NotStarted,
            "s" | "started" => Self::Started,
            "b" | "blocked" => Self::Blocked,
            "d" | "done" => Self::Done,
            _ => return Err(format!("unknown status `{s}` (expected n, s, b or d)")),
        };
        Ok(status)
    }
}

/// The frontmatter fields of one task file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub file_name: String,
    pub title: Option<String>,
    pub category: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
}

impl Task {
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("Untitled")
    }

    #[must_use]
    pub fn category(&self) -> &str {
        self.category.as_deref().unwrap_or("other")
    }

    #[must_use]
    pub fn priority(&self) -> &str {
        self.priority.as_deref().unwrap_or(DEFAULT_PRIORITY)
    }

    /// Parsed status; a task with no status has not been started.
    #[must_use]
    pub fn status(&self) -> Option<TaskStatus> {
        TaskStatus::from_code(self.status.as_deref().unwrap_or("n"))
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.status() == Some(TaskStatus::Done)
    }

    fn priority_rank(&self) -> usize {
        PRIORITIES
            .iter()
            .position(|p| *p == self.priority())
            .unwrap_or(PRIORITIES.len())
    }
}

/// Split `---\n<yaml>---<body>` into its yaml and body.
fn split_frontmatter(content: &str) -> Option<(&str, &str)> {
    content.strip_prefix("---")?.split_once("---")
}

fn parse_mapping(yaml: &str) -> Result<Mapping> {
    match serde_yaml::from_str::<Value>(yaml).context("Invalid YAML frontmatter")? {
        Value::Mapping(map) => Ok(map),
        Value::Null => Ok(Mapping::new()),
        _ => bail!("Frontmatter is not a mapping"),
    }
}

fn scalar(map: &Mapping, key: &str) -> Option<String> {
    match map.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Parse a task file. Files without frontmatter are not tasks.
pub fn parse_task(file_name: &str, content: &str) -> Result<Option<Task>> {
    let Some((yaml, _body)) = split_frontmatter(content) else {
        return Ok(None);
    };
    let map = parse_mapping(yaml)?;

    Ok(Some(Task {
        file_name: file_name.to_string(),
        title: scalar(&map, "title"),
        category: scalar(&map, "category"),
        priority: scalar(&map, "priority"),
        status: scalar(&map, "status"),
    }))
}

/// Tasks found in a directory, plus the files that could not be read.
#[derive(Debug, Default)]
pub struct TaskScan {
    pub tasks: Vec<Task>,
    pub skipped: Vec<String>,
}

/// Read every `*.md` task in `dir`, sorted by file name.
///
/// A missing directory holds no tasks. Unreadable or malformed files are
/// reported in [`TaskScan::skipped`] rather than failing the scan.
pub fn load_tasks(dir: &Path) -> Result<TaskScan> {
    let mut scan = TaskScan::default();
    if !dir.is_dir() {
        return Ok(scan);
    }

    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "md"))
        .collect();
    paths.sort();

    for path in paths {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let parsed = std::fs::read_to_string(&path)
            .context("Failed to read file")
            .and_then(|content| parse_task(&file_name, &content));

        match parsed {
            Ok(Some(task)) => scan.tasks.push(task),
            Ok(None) => tracing::debug!("No frontmatter in {file_name}"),
            Err(e) => {
                tracing::warn!("Skipping {file_name}: {e:#}");
                scan.skipped.push(format!("{file_name}: {e:#}"));
            }
        }
    }

    Ok(scan)
}

/// Filters for `pos tasks list`. Each list is comma-separated on the
/// command line and matches any of its values.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub categories: Vec<String>,
    pub priorities: Vec<String>,
    pub statuses: Vec<String>,
    pub include_done: bool,
}

fn split_list(value: Option<&str>) -> Vec<String> {
    value
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn allows(values: &[String], field: Option<&str>) -> bool {
    values.is_empty() || field.is_some_and(|f| values.iter().any(|v| v == f))
}

impl TaskFilter {
    #[must_use]
    pub fn new(
        category: Option<&str>,
        priority: Option<&str>,
        status: Option<&str>,
        include_done: bool,
    ) -> Self {
        Self {
            categories: split_list(category),
            priorities: split_list(priority),
            statuses: split_list(status),
            include_done,
        }
    }

    /// Done tasks are hidden unless asked for, either with `include_done`
    /// or through an explicit status filter.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        if task.is_done() && !self.include_done && self.statuses.is_empty() {
            return false;
        }
        allows(&self.categories, task.category.as_deref())
            && allows(&self.priorities, task.priority.as_deref())
            && allows(&self.statuses, task.status.as_deref())
    }

    /// Matching tasks ordered by priority, then file name.
    #[must_use]
    pub fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        let mut matched: Vec<&Task> = tasks.iter().filter(|t| self.matches(t)).collect();
        matched.sort_by(|a, b| {
            a.priority_rank()
                .cmp(&b.priority_rank())
                .then_with(|| a.file_name.cmp(&b.file_name))
        });
        matched
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub by_priority: Vec<(&'static str, usize)>,
    /// Most common first.
    pub by_category: Vec<(String, usize)>,
    pub by_status: Vec<(TaskStatus, usize)>,
}

#[must_use]
pub fn summarize(tasks: &[Task]) -> Summary {
    let by_priority = PRIORITIES
        .iter()
        .map(|p| (*p, tasks.iter().filter(|t| t.priority() == *p).count()))
        .collect();

    let mut categories: BTreeMap<&str, usize> = BTreeMap::new();
    for task in tasks {
        *categories.entry(task.category()).or_default() += 1;
    }
    let mut by_category: Vec<(String, usize)> = categories
        .into_iter()
        .map(|(c, n)| (c.to_string(), n))
        .collect();
    by_category.sort_by(|a, b| b.1.cmp(&a.1));

    let by_status = TaskStatus::ALL
        .iter()
        .map(|s| (*s, tasks.iter().filter(|t| t.status() == Some(*s)).count()))
        .collect();

    Summary {
        total: tasks.len(),
        by_priority,
        by_category,
        by_status,
    }
}

/// Active task count for one priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityLoad {
    pub priority: &'static str,
    pub count: usize,
    pub threshold: Option<usize>,
}

impl PriorityLoad {
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.threshold.is_some_and(|t| self.count > t)
    }
}

/// Count tasks that are not done, per priority, against their thresholds.
#[must_use]
pub fn priority_load(tasks: &[Task]) -> Vec<PriorityLoad> {
    PRIORITIES
        .iter()
        .map(|p| PriorityLoad {
            priority: *p,
            count: tasks
                .iter()
                .filter(|t| !t.is_done() && t.priority() == *p)
                .count(),
            threshold: THRESHOLDS.iter().find(|(tp, _)| tp == p).map(|(_, n)| *n),
        })
        .collect()
}

/// Rewrite a task file's frontmatter with a new status.
pub fn set_status(dir: &Path, file_name: &str, status: TaskStatus) -> Result<()> {
    if Path::new(file_name).file_name().and_then(|n| n.to_str()) != Some(file_name) {
        bail!("Not a task file name: {file_name}");
    }

    let path = dir.join(file_name);
    if !path.is_file() {
        bail!("Task file not found: {file_name}");
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let updated = with_status(&content, status)?;
    std::fs::write(&path, updated)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::info!("Set {file_name} status to {}", status.code());
    Ok(())
}

fn with_status(content: &str, status: TaskStatus) -> Result<String> {
    let (yaml, body) =
        split_frontmatter(content).context("Invalid task file format (no YAML frontmatter)")?;
    let mut map = parse_mapping(yaml)?;
    map.insert(Value::from("status"), Value::from(status.code()));
    let yaml = serde_yaml::to_string(&map).context("Failed to serialize frontmatter")?;
    Ok(format!("---\n{yaml}---{body}"))
}

/// Delete done tasks whose file was last modified before `cutoff`.
/// Returns the titles of the deleted tasks.
pub fn prune_done(dir: &Path, tasks: &[Task], cutoff: SystemTime) -> Result<Vec<String>> {
    let mut pruned = Vec::new();

    for task in tasks.iter().filter(|t| t.is_done()) {
        let path = dir.join(&task.file_name);
        let modified = std::fs::metadata(&path)
            .and_then(|meta| meta.modified())
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if modified >= cutoff {
            continue;
        }

        std::fs::remove_file(&path)
            .with_context(|| format!("Failed to delete {}", path.display()))?;
        tracing::info!("Pruned {}", task.file_name);
        pruned.push(task.title().to_string());
    }

    Ok(pruned)
}
