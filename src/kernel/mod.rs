//! Headless application core (state/action/effect).

pub mod action;
pub mod console;
pub mod effect;
pub mod language;
pub mod services;
pub mod session;
pub mod state;
pub mod store;

pub use action::Action;
pub use console::{
    CommandId, CommandLine, CommandOutcome, CommandRequest, ConsoleState, Prompt, Submission,
    Transcript,
};
pub use effect::Effect;
pub use language::SyntaxStyle;
pub use session::EditorSession;
pub use state::{AppState, ExplorerState, FocusTarget, PathPrompt, PathPromptKind, UiState};
pub use store::{DispatchResult, Store};
