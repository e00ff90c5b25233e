use super::message::AppMessage;
use crate::kernel::console::{CommandId, CommandRequest};
use crate::kernel::services::adapters::process::{run_command, OutputDecoder};
use crate::kernel::services::ports::FileProvider;
use crate::kernel::Effect;
use crate::models::build_file_tree;
use rustc_hash::FxHashMap;
use std::io;
use std::path::PathBuf;
use std::sync::mpsc::SyncSender;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::oneshot;

const SHUTDOWN_TIMEOUT: Duration = Duration::from_millis(500);

type CancelMap = Arc<Mutex<FxHashMap<CommandId, oneshot::Sender<()>>>>;

pub struct AsyncRuntime {
    runtime: tokio::runtime::Runtime,
    tx: SyncSender<AppMessage>,
    files: Arc<dyn FileProvider>,
    decoder: OutputDecoder,
    cancels: CancelMap,
}

impl AsyncRuntime {
    pub fn new(
        tx: SyncSender<AppMessage>,
        files: Arc<dyn FileProvider>,
        decoder: OutputDecoder,
    ) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .or_else(|e| {
                tracing::error!(
                    error = %e,
                    "Failed to create multi-thread tokio runtime, falling back to current-thread"
                );
                tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
            })?;
        Ok(Self {
            runtime,
            tx,
            files,
            decoder,
            cancels: Arc::new(Mutex::new(FxHashMap::default())),
        })
    }

    /// Drops in-flight tasks, which kills any running child process.
    pub fn shutdown(self) {
        self.runtime.shutdown_timeout(SHUTDOWN_TIMEOUT);
    }

    pub fn tokio_handle(&self) -> tokio::runtime::Handle {
        self.runtime.handle().clone()
    }

    pub fn decoder(&self) -> OutputDecoder {
        self.decoder
    }

    pub fn run_effect(&self, effect: Effect) {
        match effect {
            Effect::LoadFile(path) => self.load_file(path),
            Effect::WriteFile {
                path,
                content,
                version,
            } => self.write_file(path, content, version),
            Effect::LoadWorkspace(root) => self.load_workspace(root),
            Effect::SpawnCommand { request, cwd } => self.spawn_command(request, cwd),
            Effect::CancelCommand(id) => self.cancel_command(id),
        }
    }

    pub fn load_file(&self, path: PathBuf) {
        let tx = self.tx.clone();
        let files = Arc::clone(&self.files);
        self.runtime.spawn_blocking(move || {
            let msg = match files.read_file(&path) {
                Ok(content) => AppMessage::FileLoaded { path, content },
                Err(e) => AppMessage::FileError {
                    path,
                    error: e.to_string(),
                },
            };
            let _ = tx.send(msg);
        });
    }

    pub fn write_file(&self, path: PathBuf, content: String, version: u64) {
        let tx = self.tx.clone();
        let files = Arc::clone(&self.files);
        self.runtime.spawn_blocking(move || {
            let error = files.write_file(&path, &content).err().map(|e| e.to_string());
            let _ = tx.send(AppMessage::FileSaved {
                path,
                success: error.is_none(),
                error,
                version,
            });
        });
    }

    pub fn load_workspace(&self, root: PathBuf) {
        let tx = self.tx.clone();
        let files = Arc::clone(&self.files);
        self.runtime.spawn_blocking(move || {
            let msg = match build_file_tree(files.as_ref(), &root) {
                Ok(tree) => AppMessage::WorkspaceLoaded { tree },
                Err(e) => AppMessage::WorkspaceLoadError {
                    root,
                    error: e.to_string(),
                },
            };
            let _ = tx.send(msg);
        });
    }

    /// Output lines and the final outcome for `request` arrive on the message
    /// channel in that order.
    pub fn spawn_command(&self, request: CommandRequest, cwd: PathBuf) {
        let id = request.id;
        let (cancel_tx, cancel_rx) = oneshot::channel();
        if let Ok(mut cancels) = self.cancels.lock() {
            cancels.insert(id, cancel_tx);
        }

        let tx = self.tx.clone();
        let cancels = Arc::clone(&self.cancels);
        let decoder = self.decoder;
        self.runtime.spawn(async move {
            tracing::info!(command_id = id, line = %request.line, cwd = %cwd.display(), "running command");
            let line_tx = tx.clone();
            let outcome = run_command(
                request.command,
                &cwd,
                decoder,
                move |line| {
                    let _ = line_tx.send(AppMessage::CommandOutput { id, line });
                },
                cancel_rx,
            )
            .await;

            if let Ok(mut cancels) = cancels.lock() {
                cancels.remove(&id);
            }
            tracing::info!(command_id = id, outcome = ?outcome, "command finished");
            // `send` may block on a full channel; keep it off the async workers.
            let _ = tokio::task::spawn_blocking(move || {
                tx.send(AppMessage::CommandFinished { id, outcome })
            })
            .await;
        });
    }

    /// No-op once the command has already finished.
    pub fn cancel_command(&self, id: CommandId) {
        let sender = self
            .cancels
            .lock()
            .ok()
            .and_then(|mut cancels| cancels.remove(&id));
        match sender {
            Some(sender) => {
                let _ = sender.send(());
            }
            None => tracing::debug!(command_id = id, "cancel for finished command ignored"),
        }
    }
}
