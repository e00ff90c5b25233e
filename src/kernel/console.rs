//! Command console: transcript, prompt and the single-consumer command queue.
//!
//! The state here is mutated only by the store on the presentation thread.
//! Background tasks report back through `Action::ConsoleOutput` and
//! `Action::ConsoleFinished`, which carry the `CommandId` they were started with.

use std::collections::VecDeque;

pub type CommandId = u64;

pub const DEFAULT_PROMPT: &str = ">>> ";
pub const ECHO_MARKER: &str = "» ";
pub const DEFAULT_MAX_TRANSCRIPT_LINES: usize = 10_000;
pub const FAILURE_PREFIX: &str = "Command execution failed: ";

/// A whitespace-tokenized command line. Quoting and escaping are not
/// interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    pub fn parse(line: &str) -> Option<Self> {
        let mut tokens = line.split_whitespace();
        let program = tokens.next()?.to_string();
        Some(Self {
            program,
            args: tokens.map(str::to_string).collect(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRequest {
    pub id: CommandId,
    pub line: String,
    pub command: CommandLine,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Ignored,
    Cleared,
    Queued { id: CommandId, position: usize },
    Started(CommandRequest),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// `code` is `None` when the process was terminated by a signal.
    Exited { code: Option<i32> },
    Failed { error: String },
    Cancelled,
}

impl CommandOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CommandOutcome::Exited { code: Some(0) })
    }

    fn summary_line(&self) -> Option<String> {
        match self {
            CommandOutcome::Exited { code: Some(0) } => None,
            CommandOutcome::Exited { code: Some(code) } => {
                Some(format!("Process exited with code {code}"))
            }
            CommandOutcome::Exited { code: None } => Some("Process terminated by signal".to_string()),
            CommandOutcome::Failed { error } => Some(format!("{FAILURE_PREFIX}{error}")),
            CommandOutcome::Cancelled => Some("Command cancelled".to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Transcript {
    lines: VecDeque<String>,
    max_lines: usize,
}

impl Transcript {
    pub fn new(max_lines: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            max_lines,
        }
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push_back(line.into());
        if self.max_lines > 0 {
            while self.lines.len() > self.max_lines {
                self.lines.pop_front();
            }
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &str> + ExactSizeIterator {
        self.lines.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.lines.iter().cloned().collect()
    }
}

/// Prompt marker followed by the text the user is typing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    prefix: String,
    text: String,
}

impl Prompt {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            text: String::new(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn display(&self) -> String {
        format!("{}{}", self.prefix, self.text)
    }

    pub fn is_reset(&self) -> bool {
        self.text.is_empty()
    }

    pub fn insert(&mut self, ch: char) {
        self.text.push(ch);
    }

    pub fn backspace(&mut self) -> bool {
        self.text.pop().is_some()
    }

    pub fn reset(&mut self) {
        self.text.clear();
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Takes the full prompt line (prefix included) and resets the prompt.
    pub fn take_line(&mut self) -> String {
        let line = self.display();
        self.text.clear();
        line
    }

    /// Removes one leading prompt marker. A marker without its trailing
    /// whitespace is stripped as well, so a bare `>>>` counts as blank.
    pub fn strip<'a>(&self, line: &'a str) -> &'a str {
        if self.prefix.is_empty() {
            return line;
        }
        if let Some(rest) = line.strip_prefix(self.prefix.as_str()) {
            return rest;
        }
        let marker = self.prefix.trim_end();
        if !marker.is_empty() {
            if let Some(rest) = line.strip_prefix(marker) {
                if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                    return rest;
                }
            }
        }
        line
    }
}

fn is_clear_command(line: &str) -> bool {
    line.eq_ignore_ascii_case("cls") || line.eq_ignore_ascii_case("clear")
}

#[derive(Debug, Clone)]
pub struct ConsoleState {
    transcript: Transcript,
    prompt: Prompt,
    running: Option<CommandRequest>,
    cancel_requested: bool,
    queue: VecDeque<CommandRequest>,
    next_id: CommandId,
    last_outcome: Option<(CommandId, CommandOutcome)>,
}

impl Default for ConsoleState {
    fn default() -> Self {
        Self::new(DEFAULT_PROMPT, DEFAULT_MAX_TRANSCRIPT_LINES)
    }
}

impl ConsoleState {
    pub fn new(prompt: impl Into<String>, max_transcript_lines: usize) -> Self {
        Self {
            transcript: Transcript::new(max_transcript_lines),
            prompt: Prompt::new(prompt),
            running: None,
            cancel_requested: false,
            queue: VecDeque::new(),
            next_id: 1,
            last_outcome: None,
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn prompt(&self) -> &Prompt {
        &self.prompt
    }

    pub fn prompt_mut(&mut self) -> &mut Prompt {
        &mut self.prompt
    }

    pub fn running(&self) -> Option<&CommandRequest> {
        self.running.as_ref()
    }

    pub fn is_idle(&self) -> bool {
        self.running.is_none()
    }

    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    pub fn last_outcome(&self) -> Option<&(CommandId, CommandOutcome)> {
        self.last_outcome.as_ref()
    }

    /// Submits whatever is currently typed at the prompt.
    pub fn submit_prompt(&mut self) -> Submission {
        let line = self.prompt.take_line();
        self.submit(&line)
    }

    pub fn submit(&mut self, line: &str) -> Submission {
        let text = self.prompt.strip(line).trim();
        if text.is_empty() {
            return Submission::Ignored;
        }

        if is_clear_command(text) {
            self.clear();
            return Submission::Cleared;
        }

        let Some(command) = CommandLine::parse(text) else {
            return Submission::Ignored;
        };

        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        let request = CommandRequest {
            id,
            line: text.to_string(),
            command,
        };

        if self.running.is_some() {
            self.queue.push_back(request);
            return Submission::Queued {
                id,
                position: self.queue.len(),
            };
        }

        self.start(request.clone());
        Submission::Started(request)
    }

    pub fn clear(&mut self) {
        self.transcript.clear();
        self.prompt.reset();
    }

    fn start(&mut self, request: CommandRequest) {
        self.transcript.push(format!("{ECHO_MARKER}{}", request.line));
        self.cancel_requested = false;
        self.running = Some(request);
    }

    /// Appends one decoded output line. Lines from a command that is no longer
    /// running are dropped.
    pub fn append_output(&mut self, id: CommandId, line: String) -> bool {
        if self.running.as_ref().map(|r| r.id) != Some(id) {
            tracing::debug!(command_id = id, "dropping output of inactive command");
            return false;
        }
        self.transcript.push(line);
        true
    }

    /// Completes the running command, resets the prompt and returns the next
    /// queued request, which has already been marked as running.
    pub fn finish(&mut self, id: CommandId, outcome: CommandOutcome) -> Option<CommandRequest> {
        if self.running.as_ref().map(|r| r.id) != Some(id) {
            return None;
        }

        if let Some(line) = outcome.summary_line() {
            self.transcript.push(line);
        }
        self.prompt.reset();
        self.running = None;
        self.cancel_requested = false;
        self.last_outcome = Some((id, outcome));

        let next = self.queue.pop_front()?;
        self.start(next.clone());
        Some(next)
    }

    /// Returns the id to cancel, once per running command.
    pub fn request_cancel(&mut self) -> Option<CommandId> {
        if self.cancel_requested {
            return None;
        }
        let id = self.running.as_ref()?.id;
        self.cancel_requested = true;
        Some(id)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/console.rs"]
mod tests;
