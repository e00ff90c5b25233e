//! Async runtime adapter: executes IO effects and sends messages back to the UI layer.

mod message;
mod runtime;

use std::sync::mpsc::{self, Receiver, SyncSender};

pub use message::AppMessage;
pub use runtime::AsyncRuntime;

/// Messages in flight between background tasks and the UI. Senders block when
/// the UI falls behind, which stalls a chatty child on its output pipe.
pub const MESSAGE_CHANNEL_CAPACITY: usize = 1024;

pub fn message_channel() -> (SyncSender<AppMessage>, Receiver<AppMessage>) {
    mpsc::sync_channel(MESSAGE_CHANNEL_CAPACITY)
}
