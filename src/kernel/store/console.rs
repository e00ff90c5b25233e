use crate::kernel::console::{CommandRequest, Submission};
use crate::kernel::{Action, Effect};

use super::DispatchResult;

impl super::Store {
    fn spawn_effect(&self, request: CommandRequest) -> Effect {
        tracing::info!(
            command_id = request.id,
            program = %request.command.program,
            args = request.command.args.len(),
            "starting command"
        );
        Effect::SpawnCommand {
            request,
            cwd: self.state.workspace_root.clone(),
        }
    }

    fn reduce_submission(&mut self, submission: Submission, prompt_changed: bool) -> DispatchResult {
        match submission {
            Submission::Ignored => DispatchResult::changed(prompt_changed),
            Submission::Cleared => DispatchResult::changed(true),
            Submission::Queued { id, position } => {
                tracing::debug!(command_id = id, position, "command queued");
                self.state.ui.notice = Some(format!("Command queued ({position} pending)"));
                DispatchResult::changed(true)
            }
            Submission::Started(request) => DispatchResult {
                effects: vec![self.spawn_effect(request)],
                state_changed: true,
            },
        }
    }

    pub(super) fn reduce_console_action(&mut self, action: Action) -> DispatchResult {
        match action {
            Action::ConsoleInsert(ch) => {
                self.state.console.prompt_mut().insert(ch);
                DispatchResult::changed(true)
            }
            Action::ConsoleBackspace => {
                DispatchResult::changed(self.state.console.prompt_mut().backspace())
            }
            Action::ConsoleSubmit => {
                let prompt_changed = !self.state.console.prompt().is_reset();
                let submission = self.state.console.submit_prompt();
                self.reduce_submission(submission, prompt_changed)
            }
            Action::ConsoleSubmitLine(line) => {
                let submission = self.state.console.submit(&line);
                self.reduce_submission(submission, false)
            }
            Action::ConsoleOutput { id, line } => {
                DispatchResult::changed(self.state.console.append_output(id, line))
            }
            Action::ConsoleFinished { id, outcome } => {
                if !outcome.is_success() {
                    tracing::info!(command_id = id, outcome = ?outcome, "command finished");
                }
                let was_running = self.state.console.running().map(|r| r.id) == Some(id);
                match self.state.console.finish(id, outcome) {
                    Some(next) => DispatchResult {
                        effects: vec![self.spawn_effect(next)],
                        state_changed: true,
                    },
                    None => DispatchResult::changed(was_running),
                }
            }
            _ => DispatchResult::unchanged(),
        }
    }
}
