//! The Claude-led goals interview.
//!
//! A conversation is a small state machine: it stays in
//! [`DialogueState::Collecting`] while Claude asks questions and the operator
//! answers, moves to [`DialogueState::ReadyToExtract`] once a reply carries
//! the document marker, and otherwise ends `Aborted` (the operator quit) or
//! `Failed` (service error, timeout, turn limit, malformed document).

use std::future::Future;
use std::sync::LazyLock;
use std::time::Duration;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::DialogueConfig;
use crate::error::GenerationError;
use crate::goals::DOCUMENT_MARKER;
use crate::setup::{OPENING_MESSAGE, system_prompt};
use crate::ui::Console;
use crate::ui::prompt::is_quit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

/// Conversation history for one generation attempt.
///
/// Turns alternate strictly, starting with the user.
#[derive(Debug, Clone)]
pub struct Session {
    turns: Vec<Turn>,
}

impl Session {
    #[must_use]
    pub fn new(opening: impl Into<String>) -> Self {
        Self {
            turns: vec![Turn {
                role: Role::User,
                content: opening.into(),
            }],
        }
    }

    #[must_use]
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// The role expected for the next turn.
    #[must_use]
    pub fn next_role(&self) -> Role {
        match self.turns.last().map(|t| t.role) {
            Some(Role::User) => Role::Assistant,
            _ => Role::User,
        }
    }

    fn push(&mut self, role: Role, content: String) {
        debug_assert_eq!(role, self.next_role(), "turns must alternate");
        self.turns.push(Turn { role, content });
    }

    /// Number of assistant replies so far.
    #[must_use]
    pub fn replies(&self) -> usize {
        self.turns
            .iter()
            .filter(|t| t.role == Role::Assistant)
            .count()
    }
}

/// A chat backend that answers a session with one assistant reply.
pub trait ChatService {
    fn reply(
        &self,
        system: &str,
        session: &Session,
    ) -> impl Future<Output = Result<String, GenerationError>> + Send;
}

impl<T: ChatService + Sync> ChatService for &T {
    fn reply(
        &self,
        system: &str,
        session: &Session,
    ) -> impl Future<Output = Result<String, GenerationError>> + Send {
        (**self).reply(system, session)
    }
}

/// Bounds on a single conversation.
#[derive(Debug, Clone, Copy)]
pub struct DialogueLimits {
    pub max_turns: usize,
    pub request_timeout: Duration,
}

impl From<&DialogueConfig> for DialogueLimits {
    fn from(config: &DialogueConfig) -> Self {
        Self {
            max_turns: config.max_turns,
            request_timeout: config.request_timeout(),
        }
    }
}

#[derive(Debug)]
pub enum DialogueState {
    Collecting,
    /// The latest reply contains the document marker.
    ReadyToExtract(String),
    Aborted,
    Failed(GenerationError),
}

/// Opening line of the document block.
static MARKDOWN_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```markdown[^\n]*\n").expect("valid fence regex"));

/// Pull the document out of a reply that contains the marker.
///
/// The fenced markdown block is the only accepted form. Fences opened
/// inside the document (```` ```bash ````) must be closed before a bare
/// ```` ``` ```` line ends the block; a reply without a complete block is
/// malformed.
pub fn extract_document(reply: &str) -> Result<String, GenerationError> {
    let open = MARKDOWN_FENCE
        .find(reply)
        .ok_or(GenerationError::MalformedDocument)?;
    let body = &reply[open.end()..];

    let mut depth = 0usize;
    let mut offset = 0;
    for line in body.split_inclusive('\n') {
        let fence = line.trim();
        if fence == "```" {
            if depth == 0 {
                let document = body[..offset].trim();
                if document.is_empty() {
                    return Err(GenerationError::MalformedDocument);
                }
                return Ok(document.to_string());
            }
            depth -= 1;
        } else if fence
            .strip_prefix("```")
            .is_some_and(|info| !info.contains("```"))
        {
            depth += 1;
        }
        offset += line.len();
    }

    Err(GenerationError::MalformedDocument)
}

/// Conduct the goals interview and return the finished document.
pub async fn run_dialogue<S, C>(
    service: &S,
    console: &mut C,
    limits: DialogueLimits,
    date: NaiveDate,
) -> Result<String, GenerationError>
where
    S: ChatService + Sync,
    C: Console + Send,
{
    let system = system_prompt(date);
    let mut session = Session::new(OPENING_MESSAGE);
    let mut state = DialogueState::Collecting;

    loop {
        state = match state {
            DialogueState::Collecting => {
                collect(service, console, &system, &mut session, limits).await
            }
            DialogueState::ReadyToExtract(reply) => {
                return extract_document(&reply).inspect(|doc| {
                    tracing::info!(
                        "Extracted GOALS.md ({} bytes) after {} replies",
                        doc.len(),
                        session.replies()
                    );
                });
            }
            DialogueState::Aborted => return Err(GenerationError::OperatorAbort),
            DialogueState::Failed(e) => {
                tracing::warn!("Conversation failed: {e}");
                return Err(e);
            }
        };
    }
}

/// One round: ask Claude, show the reply, then either hand off for
/// extraction or take the operator's next answer.
async fn collect<S, C>(
    service: &S,
    console: &mut C,
    system: &str,
    session: &mut Session,
    limits: DialogueLimits,
) -> DialogueState
where
    S: ChatService + Sync,
    C: Console + Send,
{
    if session.replies() >= limits.max_turns {
        return DialogueState::Failed(GenerationError::TurnLimit(limits.max_turns));
    }

    tracing::debug!("Sending session with {} turns", session.turns().len());
    console.waiting(true);
    let outcome = tokio::time::timeout(limits.request_timeout, service.reply(system, session)).await;
    console.waiting(false);

    let reply = match outcome {
        Ok(Ok(reply)) => reply,
        Ok(Err(e)) => return DialogueState::Failed(e),
        Err(_) => return DialogueState::Failed(GenerationError::Timeout(limits.request_timeout)),
    };

    session.push(Role::Assistant, reply.clone());
    console.assistant(&reply);

    if reply.contains(DOCUMENT_MARKER) {
        return DialogueState::ReadyToExtract(reply);
    }

    loop {
        let input = match console.read_line("You") {
            Ok(input) => input,
            Err(e) => return DialogueState::Failed(GenerationError::Console(e.to_string())),
        };

        if is_quit(&input) {
            tracing::debug!("Operator ended the conversation");
            return DialogueState::Aborted;
        }

        let input = input.trim();
        if !input.is_empty() {
            session.push(Role::User, input.to_string());
            return DialogueState::Collecting;
        }
    }
}

#[cfg(test)]
pub mod testing {
    //! A chat service that replays canned replies.

    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::{ChatService, Role, Session};
    use crate::error::GenerationError;

    pub struct ScriptedChat {
        replies: Mutex<VecDeque<Result<String, GenerationError>>>,
        calls: AtomicUsize,
        last_session_len: AtomicUsize,
    }

    impl ScriptedChat {
        pub fn new<I, S>(replies: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            Self::with_results(replies.into_iter().map(|r| Ok(r.into())))
        }

        pub fn with_results<I>(replies: I) -> Self
        where
            I: IntoIterator<Item = Result<String, GenerationError>>,
        {
            Self {
                replies: Mutex::new(replies.into_iter().collect()),
                calls: AtomicUsize::new(0),
                last_session_len: AtomicUsize::new(0),
            }
        }

        /// Number of replies requested so far.
        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        /// Turns in the session passed to the latest call.
        pub fn last_session_len(&self) -> usize {
            self.last_session_len.load(Ordering::SeqCst)
        }
    }

    impl ChatService for ScriptedChat {
        async fn reply(&self, _system: &str, session: &Session) -> Result<String, GenerationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.last_session_len
                .store(session.turns().len(), Ordering::SeqCst);
            assert_eq!(session.next_role(), Role::Assistant, "session must end on a user turn");
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(GenerationError::Service("no scripted reply".to_string())))
        }
    }

    /// A chat service that never answers.
    pub struct HangingChat;

    impl ChatService for HangingChat {
        async fn reply(&self, _system: &str, _session: &Session) -> Result<String, GenerationError> {
            std::future::pending().await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{HangingChat, ScriptedChat};
    use super::*;
    use crate::ui::console::scripted::ScriptedConsole;

    const DOCUMENT: &str = "# Goals & Strategic Direction\n\n*Last updated: October 16, 2026*\n\n## Current Context";

    fn limits() -> DialogueLimits {
        DialogueLimits {
            max_turns: 10,
            request_timeout: Duration::from_secs(5),
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn final_reply() -> String {
        format!("Based on our conversation, here's your personalized GOALS.md:\n\n```markdown\n{DOCUMENT}\n```\n\nGood luck!")
    }

    #[test]
    fn session_starts_with_user_and_alternates() {
        let mut session = Session::new("hello");
        assert_eq!(session.next_role(), Role::Assistant);
        session.push(Role::Assistant, "hi".to_string());
        assert_eq!(session.next_role(), Role::User);
        assert_eq!(session.replies(), 1);
        assert_eq!(session.turns()[0].role, Role::User);
    }

    #[test]
    fn roles_serialize_lowercase() {
        let json = serde_json::to_string(&Turn {
            role: Role::Assistant,
            content: "x".to_string(),
        })
        .unwrap();
        assert_eq!(json, r#"{"role":"assistant","content":"x"}"#);
    }

    #[test]
    fn extracts_trimmed_fenced_interior() {
        assert_eq!(extract_document(&final_reply()).unwrap(), DOCUMENT);
    }

    #[test]
    fn inline_backticks_do_not_close_the_block() {
        let reply = "```markdown\n# Goals & Strategic Direction\nSay `process my backlog` or ```x``` inline\n```";
        let doc = extract_document(reply).unwrap();
        assert!(doc.ends_with("inline"), "got: {doc}");
    }

    #[test]
    fn nested_code_block_survives() {
        let reply = "Here you go:\n```markdown\n# Goals & Strategic Direction\n\nRun this daily:\n```bash\npos tasks list\n```\n\n## Notes\nKeep going.\n```\nDone!";
        let doc = extract_document(reply).unwrap();
        assert!(doc.contains("```bash\npos tasks list\n```"), "got: {doc}");
        assert!(doc.ends_with("Keep going."), "got: {doc}");
    }

    #[test]
    fn unclosed_nested_block_is_malformed() {
        let reply = "```markdown\n# Goals & Strategic Direction\n```bash\nls\n```\n";
        assert!(matches!(
            extract_document(reply),
            Err(GenerationError::MalformedDocument)
        ));
    }

    #[test]
    fn marker_without_fence_is_malformed() {
        let reply = "# Goals & Strategic Direction\n\n## Current Context\n...";
        assert!(matches!(
            extract_document(reply),
            Err(GenerationError::MalformedDocument)
        ));
    }

    #[test]
    fn unclosed_fence_is_malformed() {
        let reply = "```markdown\n# Goals & Strategic Direction\n## Current Context";
        assert!(matches!(
            extract_document(reply),
            Err(GenerationError::MalformedDocument)
        ));
    }

    #[tokio::test]
    async fn extracts_document_on_third_reply() {
        let chat = ScriptedChat::new([
            "What's your current role?".to_string(),
            "And what are you building toward?".to_string(),
            final_reply(),
        ]);
        let mut console = ScriptedConsole::new(["I'm a PM at Acme", "Becoming VP Product"]);

        let doc = run_dialogue(&chat, &mut console, limits(), date())
            .await
            .unwrap();

        assert_eq!(doc.lines().next(), Some("# Goals & Strategic Direction"));
        assert_eq!(doc, DOCUMENT);
        assert_eq!(chat.calls(), 3);
        assert_eq!(chat.last_session_len(), 5);
        assert_eq!(console.prompts.len(), 2, "no input requested after the document");
        assert_eq!(console.replies.len(), 3);
    }

    #[tokio::test]
    async fn document_on_first_reply_needs_no_input() {
        let chat = ScriptedChat::new([final_reply()]);
        let mut console = ScriptedConsole::new(Vec::<String>::new());

        let doc = run_dialogue(&chat, &mut console, limits(), date())
            .await
            .unwrap();

        assert_eq!(doc, DOCUMENT);
        assert!(console.prompts.is_empty());
    }

    #[tokio::test]
    async fn quit_words_abort_without_another_call() {
        for word in ["quit", "Exit", "DONE"] {
            let chat = ScriptedChat::new(["Tell me about your role.", "unused"]);
            let mut console = ScriptedConsole::new([word]);

            let result = run_dialogue(&chat, &mut console, limits(), date()).await;

            assert!(matches!(result, Err(GenerationError::OperatorAbort)));
            assert_eq!(chat.calls(), 1, "no network call after {word}");
        }
    }

    #[tokio::test]
    async fn empty_input_reprompts_without_network_call() {
        let chat = ScriptedChat::new(["Tell me about your role.".to_string(), final_reply()]);
        let mut console = ScriptedConsole::new(["", "   ", "Engineer"]);

        let doc = run_dialogue(&chat, &mut console, limits(), date())
            .await
            .unwrap();

        assert_eq!(doc, DOCUMENT);
        assert_eq!(chat.calls(), 2);
        assert_eq!(chat.last_session_len(), 3);
        assert_eq!(console.prompts.len(), 3);
    }

    #[tokio::test]
    async fn marker_without_fence_fails() {
        let chat = ScriptedChat::new(["# Goals & Strategic Direction\n\nno fence here"]);
        let mut console = ScriptedConsole::new(Vec::<String>::new());

        let result = run_dialogue(&chat, &mut console, limits(), date()).await;

        assert!(matches!(result, Err(GenerationError::MalformedDocument)));
    }

    #[tokio::test]
    async fn service_error_ends_dialogue() {
        let chat = ScriptedChat::with_results([
            Ok("What's your role?".to_string()),
            Err(GenerationError::Service("overloaded".to_string())),
        ]);
        let mut console = ScriptedConsole::new(["Founder"]);

        let result = run_dialogue(&chat, &mut console, limits(), date()).await;

        assert!(matches!(result, Err(GenerationError::Service(msg)) if msg == "overloaded"));
        assert_eq!(chat.calls(), 2);
    }

    #[tokio::test]
    async fn turn_limit_stops_endless_conversation() {
        let chat = ScriptedChat::new(["Question one?", "Question two?", "Question three?"]);
        let mut console = ScriptedConsole::new(["a", "b", "c"]);
        let limits = DialogueLimits {
            max_turns: 2,
            ..limits()
        };

        let result = run_dialogue(&chat, &mut console, limits, date()).await;

        assert!(matches!(result, Err(GenerationError::TurnLimit(2))));
        assert_eq!(chat.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn hung_service_times_out() {
        let mut console = ScriptedConsole::new(Vec::<String>::new());

        let result = run_dialogue(&HangingChat, &mut console, limits(), date()).await;

        assert!(matches!(result, Err(GenerationError::Timeout(d)) if d == Duration::from_secs(5)));
    }

    #[tokio::test]
    async fn console_failure_ends_dialogue() {
        let chat = ScriptedChat::new(["What's your role?"]);
        let mut console = ScriptedConsole::new(Vec::<String>::new());

        let result = run_dialogue(&chat, &mut console, limits(), date()).await;

        assert!(matches!(result, Err(GenerationError::Console(_))));
    }
}
