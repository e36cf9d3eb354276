//! `pos tasks`: read and update the task files under `Tasks/`.

use std::path::Path;
use std::time::{Duration, SystemTime};

use anyhow::Result;
use console::style;

use super::TasksCommand;
use crate::tasks::{self, Task, TaskFilter, TaskStatus};
use crate::ui::status::Status;
use crate::ui::{self, StatusLine, Table};
use crate::workspace::Workspace;

pub fn tasks(root: &Path, command: &TasksCommand) -> Result<()> {
    let workspace = Workspace::new(root);

    match command {
        TasksCommand::List(args) => list(&workspace, &TaskFilter::from(args)),
        TasksCommand::Summary => summary(&workspace),
        TasksCommand::CheckLimits => check_limits(&workspace),
        TasksCommand::UpdateStatus { file, status } => update(&workspace, file, *status),
        TasksCommand::Start { file } => update(&workspace, file, TaskStatus::Started),
        TasksCommand::Complete { file } => update(&workspace, file, TaskStatus::Done),
        TasksCommand::Prune { days_old } => prune(&workspace, *days_old),
    }
}

/// Load tasks, warning about files that could not be parsed.
fn scan(workspace: &Workspace) -> Result<Vec<Task>> {
    let scan = tasks::load_tasks(&workspace.tasks_dir())?;
    for skipped in &scan.skipped {
        StatusLine::new(Status::Warn, format!("Skipped {skipped}")).print();
    }
    Ok(scan.tasks)
}

fn list(workspace: &Workspace, filter: &TaskFilter) -> Result<()> {
    let all = scan(workspace)?;
    let matched = filter.apply(&all);

    println!();
    if matched.is_empty() {
        ui::status::hint("No tasks found matching criteria.");
        println!();
        return Ok(());
    }

    let mut table = Table::new(&["", "Priority", "Category", "Title", "File"]);
    for task in matched {
        let icon = task.status().map_or("?", TaskStatus::icon);
        table.add_row(&[icon, task.priority(), task.category(), task.title(), task.file_name.as_str()]);
    }
    table.print();
    println!();
    Ok(())
}

fn summary(workspace: &Workspace) -> Result<()> {
    let all = scan(workspace)?;

    println!();
    if all.is_empty() {
        ui::status::hint("No tasks found.");
        println!();
        return Ok(());
    }

    let summary = tasks::summarize(&all);
    println!("{} {}", style("Total tasks:").bold(), summary.total);

    let mut by_priority = Table::new(&["Priority", "Tasks"]);
    for (priority, count) in &summary.by_priority {
        by_priority.add_row(&[*priority, count.to_string().as_str()]);
    }

    let mut by_category = Table::new(&["Category", "Tasks"]);
    for (category, count) in &summary.by_category {
        by_category.add_row(&[category.as_str(), count.to_string().as_str()]);
    }

    let mut by_status = Table::new(&["Status", "Tasks"]);
    for (status, count) in &summary.by_status {
        by_status.add_row(&[status.label(), count.to_string().as_str()]);
    }

    for table in [by_priority, by_category, by_status] {
        println!();
        table.print();
    }
    println!();
    Ok(())
}

fn check_limits(workspace: &Workspace) -> Result<()> {
    let all = scan(workspace)?;
    let load = tasks::priority_load(&all);

    ui::status::section("Priority Distribution (active tasks only)");
    for entry in &load {
        let line = match entry.threshold {
            Some(threshold) if entry.is_over() => StatusLine::new(
                Status::Warn,
                format!(
                    "{}: {} (above typical threshold of {threshold})",
                    entry.priority, entry.count
                ),
            ),
            Some(threshold) => {
                StatusLine::ok(format!("{}: {}/{threshold}", entry.priority, entry.count))
            }
            None => StatusLine::new(Status::Skip, format!("{}: {}", entry.priority, entry.count)),
        };
        line.print();
    }
    println!();

    if load.iter().any(tasks::PriorityLoad::is_over) {
        ui::status::hint("You have a high concentration of priority tasks.");
        ui::status::hint("Consider if all these are truly high priority.");
    } else {
        StatusLine::ok("Priority distribution looks balanced").print();
    }
    println!();
    Ok(())
}

fn update(workspace: &Workspace, file: &str, status: TaskStatus) -> Result<()> {
    tasks::set_status(&workspace.tasks_dir(), file, status)?;
    StatusLine::ok(format!("Updated {file} status to '{}'", status.code())).print();
    Ok(())
}

fn prune(workspace: &Workspace, days_old: u64) -> Result<()> {
    let all = scan(workspace)?;
    if !all.iter().any(Task::is_done) {
        ui::status::hint("No completed tasks to prune.");
        return Ok(());
    }

    let age = Duration::from_secs(days_old.saturating_mul(24 * 60 * 60));
    let cutoff = SystemTime::now().checked_sub(age).unwrap_or(SystemTime::UNIX_EPOCH);
    let pruned = tasks::prune_done(&workspace.tasks_dir(), &all, cutoff)?;

    for title in &pruned {
        StatusLine::ok(format!("Pruned {title}")).print();
    }
    println!();
    println!(
        "Pruned {} completed tasks older than {days_old} days.",
        pruned.len()
    );
    Ok(())
}
