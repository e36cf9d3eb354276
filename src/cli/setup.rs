//! Setup wizard: scaffold the workspace and write GOALS.md.

use std::path::Path;

use anyhow::Result;
use chrono::NaiveDate;

use crate::claude::Claude;
use crate::config::{API_KEY_ENV, Config};
use crate::dialogue::{ChatService, DialogueLimits, run_dialogue};
use crate::error::GenerationError;
use crate::goals;
use crate::questionnaire::collect_answers;
use crate::ui::prompt::is_affirmative;
use crate::ui::status::Status;
use crate::ui::{self, Console, StatusLine, TerminalConsole};
use crate::workspace::{ScaffoldOutcome, Workspace};

/// Flags shared by `pos setup` and `pos goals`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoalsOptions {
    /// Skip the Claude interview and go straight to the questionnaire.
    pub offline: bool,
    /// Regenerate an existing GOALS.md without asking.
    pub force: bool,
}

/// Which path produced the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalsSource {
    Claude,
    Questionnaire,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalsOutcome {
    Created(GoalsSource),
    Recreated(GoalsSource),
    /// GOALS.md existed and the operator declined to replace it.
    Kept,
}

/// Produce the goals document: Claude first when available, the
/// questionnaire otherwise or when the conversation yields nothing.
pub async fn obtain_goals<S, C>(
    chat: Option<&S>,
    console: &mut C,
    limits: DialogueLimits,
    date: NaiveDate,
) -> Result<(String, GoalsSource)>
where
    S: ChatService + Sync,
    C: Console + Send,
{
    if let Some(chat) = chat {
        console.section("Claude Goals Interview");
        console.note("Claude will ask thoughtful questions and write a GOALS.md for you.");
        console.note("Respond naturally. Type `quit` at any time to switch to the questionnaire.");

        match run_dialogue(chat, console, limits, date).await {
            Ok(document) => {
                console.status(Status::Ok, "GOALS.md generated by Claude");
                return Ok((document, GoalsSource::Claude));
            }
            Err(e) => report_fallback(console, &e),
        }
    }

    let answers = collect_answers(console)?;
    console.section("Processing Your Responses");
    console.note("Generating your personalized GOALS.md...");
    Ok((goals::render(&answers, date), GoalsSource::Questionnaire))
}

fn report_fallback<C: Console>(console: &mut C, error: &GenerationError) {
    let status = if error.is_intentional() {
        Status::Skip
    } else {
        Status::Error
    };
    console.status(status, &error.to_string());
    console.note("Falling back to the questionnaire...");
}

/// Create or regenerate GOALS.md.
///
/// An existing document is only replaced after the operator answers `y`
/// (or with `force`). `connect` is called only once regeneration is
/// decided and not offline. The document is built in memory and written
/// once.
pub async fn generate_goals<S, C, F>(
    workspace: &Workspace,
    connect: F,
    console: &mut C,
    options: GoalsOptions,
    limits: DialogueLimits,
    date: NaiveDate,
) -> Result<GoalsOutcome>
where
    S: ChatService + Send + Sync,
    C: Console + Send,
    F: FnOnce() -> Option<S> + Send,
{
    let first_time = !workspace.has_goals();

    if first_time {
        console.section("Time to Build Your Personalized Goals");
        console.note("This is the heart of your Personal OS.");
        console.note("Your AI agent will use this to understand what matters to you");
        console.note("and help prioritize your work accordingly.");
        console.read_line("Press Enter to start")?;
    } else if !options.force {
        console.status(Status::Skip, "GOALS.md already exists");
        let answer = console.read_line("Would you like to recreate it? (y/n)")?;
        if !is_affirmative(&answer) {
            tracing::debug!("Keeping existing GOALS.md");
            return Ok(GoalsOutcome::Kept);
        }
    }

    let chat = if options.offline {
        console.note("Offline mode: using the questionnaire.");
        None
    } else {
        connect()
    };
    let (document, source) = obtain_goals(chat.as_ref(), console, limits, date).await?;
    workspace.write_goals(&document)?;

    if first_time {
        console.status(Status::Ok, "Created personalized GOALS.md");
        Ok(GoalsOutcome::Created(source))
    } else {
        console.status(Status::Ok, "Recreated GOALS.md");
        Ok(GoalsOutcome::Recreated(source))
    }
}

/// Full setup: folders, templates, GOALS.md, backlog.
pub async fn run_setup<S, C, F>(
    workspace: &Workspace,
    connect: F,
    console: &mut C,
    options: GoalsOptions,
    limits: DialogueLimits,
    date: NaiveDate,
) -> Result<GoalsOutcome>
where
    S: ChatService + Send + Sync,
    C: Console + Send,
    F: FnOnce() -> Option<S> + Send,
{
    for outcome in workspace.ensure_dirs()? {
        report_scaffold(console, &outcome);
    }
    for outcome in workspace.copy_templates()? {
        report_scaffold(console, &outcome);
    }

    let goals = generate_goals(workspace, connect, console, options, limits, date).await?;

    report_scaffold(console, &workspace.ensure_backlog()?);
    Ok(goals)
}

fn report_scaffold<C: Console>(console: &mut C, outcome: &ScaffoldOutcome) {
    match outcome {
        ScaffoldOutcome::Created(name) => console.status(Status::Ok, &format!("Created {name}")),
        ScaffoldOutcome::Exists(name) => {
            console.status(Status::Skip, &format!("{name} exists (preserving your version)"));
        }
        ScaffoldOutcome::TemplateSourceMissing(source) => {
            console.status(Status::Warn, &format!("Template not found: {source}"));
        }
    }
}

/// Build the Claude client, explaining how to get one when there is no key.
fn connect(config: &Config) -> Option<Claude> {
    match Claude::from_config(&config.claude) {
        Ok(claude) => Some(claude),
        Err(e) => {
            println!();
            StatusLine::new(Status::Skip, e.to_string()).print();
            ui::status::hint("To have Claude interview you for GOALS.md:");
            ui::status::hint("1. Get an API key from https://console.anthropic.com/");
            ui::status::hint(&format!("2. Set it: export {API_KEY_ENV}='your-key-here'"));
            ui::status::hint("3. Run `pos goals` again");
            ui::status::hint("Using the questionnaire for now.");
            None
        }
    }
}

fn load_config() -> Config {
    Config::load().unwrap_or_else(|e| {
        ui::status::print_error(&format!("{e:#}"), Some("Continuing with default settings."));
        let mut config = Config::default();
        config.apply_api_key(std::env::var(API_KEY_ENV).ok());
        config
    })
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// `pos setup`: the interactive wizard.
pub async fn setup(root: &Path, options: GoalsOptions) -> Result<()> {
    println!();
    println!("{}", console::style("Setting up your Personal OS").bold());
    println!();

    let config = load_config();
    let workspace = Workspace::new(root);
    let mut console = TerminalConsole::new();

    run_setup(
        &workspace,
        || connect(&config),
        &mut console,
        options,
        DialogueLimits::from(&config.dialogue),
        today(),
    )
    .await?;

    ui::status::print_success(
        "Setup Complete",
        Some(
            "Your Personal OS is ready to use.\n\n\
             Next steps:\n\
             1. Review GOALS.md and refine as needed\n\
             2. Read CLAUDE.md to understand how your AI agent works\n\
             3. Start adding tasks or notes to BACKLOG.md\n\
             4. Tell your AI: 'Read CLAUDE.md and help me process my backlog'\n\n\
             Tips:\n\
             - Update GOALS.md monthly as your situation evolves\n\
             - Use BACKLOG.md as a brain dump - clear it weekly\n\
             - Review your Tasks/ folder daily to stay on track",
        ),
    );

    Ok(())
}

/// `pos goals`: regenerate GOALS.md only.
pub async fn goals(root: &Path, options: GoalsOptions) -> Result<()> {
    let config = load_config();
    let workspace = Workspace::new(root);
    let mut console = TerminalConsole::new();

    let outcome = generate_goals(
        &workspace,
        || connect(&config),
        &mut console,
        options,
        DialogueLimits::from(&config.dialogue),
        today(),
    )
    .await?;

    if outcome == GoalsOutcome::Kept {
        println!();
        ui::status::hint("GOALS.md left unchanged.");
    }
    println!();
    Ok(())
}
