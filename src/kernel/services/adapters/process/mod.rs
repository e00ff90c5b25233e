//! Child process execution for the command console.
//!
//! stdout and stderr share one OS pipe, so the console sees lines in the
//! order the child wrote them. Reading happens on a blocking thread; each
//! complete line is decoded and handed to a callback before the next read.

mod decoder;

pub use decoder::{EncodingError, OutputDecoder};

use crate::kernel::console::{CommandLine, CommandOutcome};
use std::io::{self, BufRead, BufReader, PipeReader, Read};
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use tokio::process::Child;
use tokio::sync::oneshot;

#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("cannot run program \"{program}\": {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("reading output failed: {0}")]
    Read(#[source] io::Error),
    #[error("waiting for process failed: {0}")]
    Wait(#[source] io::Error),
    #[error("output reader stopped unexpectedly: {0}")]
    Reader(String),
}

/// Starts `command` in `cwd` with stdin closed and both output streams
/// attached to the returned reader.
pub fn spawn_merged(command: &CommandLine, cwd: &Path) -> Result<(Child, PipeReader), ProcessError> {
    let launch = |source| ProcessError::Launch {
        program: command.program.clone(),
        source,
    };

    let (reader, writer) = io::pipe().map_err(launch)?;
    let stderr = writer.try_clone().map_err(launch)?;

    // The parent's write ends go away with `cmd`, so the reader sees EOF once
    // the child (and anything it spawned) closes its copies.
    let child = {
        let mut cmd = tokio::process::Command::new(&command.program);
        cmd.args(&command.args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(writer)
            .stderr(stderr)
            .kill_on_drop(true);
        cmd.spawn().map_err(launch)?
    };

    Ok((child, reader))
}

/// Reads `reader` to EOF, calling `on_line` for every line. A final line
/// without a terminator is still delivered. Returns the number of lines.
pub fn pump_lines<R: Read>(
    reader: R,
    decoder: OutputDecoder,
    mut on_line: impl FnMut(String),
) -> io::Result<usize> {
    let mut reader = BufReader::new(reader);
    let mut raw = Vec::with_capacity(256);
    let mut count = 0;
    loop {
        raw.clear();
        match reader.read_until(b'\n', &mut raw) {
            Ok(0) => return Ok(count),
            Ok(_) => {
                on_line(decoder.decode_line(&raw));
                count += 1;
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}

enum Exit {
    Status(io::Result<ExitStatus>),
    Cancelled,
}

/// Runs one command to completion.
///
/// Every output line reaches `on_line` before this returns, so the caller can
/// publish the outcome knowing nothing is still in flight. A message on
/// `cancel` kills the child; dropping the sender without sending is ignored.
pub async fn run_command(
    command: CommandLine,
    cwd: &Path,
    decoder: OutputDecoder,
    on_line: impl FnMut(String) + Send + 'static,
    mut cancel: oneshot::Receiver<()>,
) -> CommandOutcome {
    let (mut child, output) = match spawn_merged(&command, cwd) {
        Ok(spawned) => spawned,
        Err(e) => {
            tracing::warn!(program = %command.program, error = %e, "command failed to start");
            return CommandOutcome::Failed {
                error: e.to_string(),
            };
        }
    };
    tracing::debug!(program = %command.program, pid = ?child.id(), "command started");

    let pump = tokio::task::spawn_blocking(move || pump_lines(output, decoder, on_line));

    let exit = tokio::select! {
        status = child.wait() => Exit::Status(status),
        Ok(()) = &mut cancel => Exit::Cancelled,
    };

    let status = match exit {
        Exit::Status(status) => Some(status),
        Exit::Cancelled => {
            if let Err(e) = child.start_kill() {
                tracing::warn!(program = %command.program, error = %e, "kill failed");
            }
            if let Err(e) = child.wait().await {
                tracing::warn!(program = %command.program, error = %e, "wait after kill failed");
            }
            None
        }
    };

    let read = match pump.await {
        Ok(Ok(_)) => Ok(()),
        Ok(Err(e)) => Err(ProcessError::Read(e)),
        Err(e) => Err(ProcessError::Reader(e.to_string())),
    };

    let Some(status) = status else {
        return CommandOutcome::Cancelled;
    };
    if let Err(e) = read {
        return CommandOutcome::Failed {
            error: e.to_string(),
        };
    }
    match status {
        Ok(status) => CommandOutcome::Exited {
            code: status.code(),
        },
        Err(e) => CommandOutcome::Failed {
            error: ProcessError::Wait(e).to_string(),
        },
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/process/mod.rs"]
mod tests;
