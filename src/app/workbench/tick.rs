use super::{Workbench, MAX_MESSAGE_DRAIN_PER_TICK};
use std::sync::mpsc::TryRecvError;

impl Workbench {
    /// Drains background messages; called by the main loop between frames.
    /// The cap keeps a chatty command from starving input handling.
    pub fn tick(&mut self) -> bool {
        let mut changed = false;
        for _ in 0..MAX_MESSAGE_DRAIN_PER_TICK {
            match self.rx.try_recv() {
                Ok(msg) => changed |= self.handle_message(msg),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    tracing::warn!("runtime message channel closed");
                    break;
                }
            }
        }
        changed
    }
}
