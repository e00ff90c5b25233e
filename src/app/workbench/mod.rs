//! Workbench: owns the store, the async runtime and the keymap, and routes
//! input, background messages and rendering.

use crate::core::event::InputEvent;
use crate::kernel::services::adapters::{AppMessage, AsyncRuntime, KeybindingService};
use crate::kernel::{Action as KernelAction, AppState, FocusTarget, Store};
use ratatui::layout::Rect;
use ratatui::Frame;
use std::sync::mpsc::Receiver;

mod bridge;
mod input;
mod render;
mod tick;

const STATUS_HEIGHT: u16 = 1;
const FILE_INFO_HEIGHT: u16 = 1;
const CONSOLE_MIN_HEIGHT: u16 = 6;
const SIDEBAR_WIDTH_PERCENT: u16 = 25;
const SIDEBAR_MIN_WIDTH: u16 = 18;
const MAX_MESSAGE_DRAIN_PER_TICK: usize = 4096;

#[derive(Debug, Default, Clone, Copy)]
struct EditorViewport {
    row: usize,
    col: usize,
}

pub struct Workbench {
    store: Store,
    runtime: AsyncRuntime,
    rx: Receiver<AppMessage>,
    keybindings: KeybindingService,
    editor_viewport: EditorViewport,
    last_explorer_view_height: Option<u16>,
}

impl Workbench {
    pub fn new(
        state: AppState,
        runtime: AsyncRuntime,
        rx: Receiver<AppMessage>,
        keybindings: KeybindingService,
    ) -> Self {
        Self {
            store: Store::new(state),
            runtime,
            rx,
            keybindings,
            editor_viewport: EditorViewport::default(),
            last_explorer_view_height: None,
        }
    }

    pub fn state(&self) -> &AppState {
        self.store.state()
    }

    pub fn focus(&self) -> FocusTarget {
        self.store.state().ui.focus
    }

    pub fn should_quit(&self) -> bool {
        self.store.state().ui.should_quit
    }

    pub fn runtime(&self) -> &AsyncRuntime {
        &self.runtime
    }

    pub fn shutdown(self) {
        let Self {
            store, runtime, rx, ..
        } = self;
        if let Some(running) = store.state().console.running() {
            tracing::info!(command_id = running.id, "stopping running command on exit");
        }
        // Tasks blocked on a full channel fail their send and exit.
        drop(rx);
        runtime.shutdown();
    }

    /// Returns whether anything visible changed.
    pub fn dispatch(&mut self, action: KernelAction) -> bool {
        self.dispatch_kernel(action)
    }

    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        input::handle_input(self, event)
    }

    pub fn handle_message(&mut self, msg: AppMessage) -> bool {
        let opened_file = matches!(msg, AppMessage::FileLoaded { .. });
        let mut changed = self.dispatch_kernel(msg.into());
        if opened_file {
            self.editor_viewport = EditorViewport::default();
            changed |= self.dispatch_kernel(KernelAction::RunCommand(
                crate::core::Command::FocusEditor,
            ));
        }
        changed
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        render::render(self, frame, area);
    }
}
