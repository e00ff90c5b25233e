use blackparticle::app::Workbench;
use blackparticle::kernel::services::adapters::{
    ensure_settings_file, load_settings, message_channel, AsyncRuntime, KeybindingService,
    LocalFileProvider, OutputDecoder,
};
use blackparticle::kernel::services::ports::{FileProvider, Settings};
use blackparticle::kernel::{Action, AppState};
use blackparticle::models::build_file_tree;
use blackparticle::tui::crossterm::into_input_event;
use blackparticle::tui::{TerminalGuard, TerminalRestorer, TerminationSignal};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::{mpsc, Arc};
use std::time::Duration;

mod logging;

const POLL_INTERVAL: Duration = Duration::from_millis(16);
const USAGE: &str = "usage: blackparticle [PATH] [--encoding LABEL]";

#[derive(Debug, Default, PartialEq, Eq)]
struct CliArgs {
    path: Option<PathBuf>,
    encoding: Option<String>,
}

enum Cli {
    Run(CliArgs),
    Help,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Cli, String> {
    let mut parsed = CliArgs::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Cli::Help),
            "--encoding" => {
                let label = args
                    .next()
                    .ok_or_else(|| "--encoding needs a value".to_string())?;
                parsed.encoding = Some(label);
            }
            _ if arg.starts_with("--encoding=") => {
                parsed.encoding = arg.strip_prefix("--encoding=").map(str::to_string);
            }
            _ if arg.starts_with('-') => return Err(format!("unknown option: {arg}")),
            _ if parsed.path.is_some() => return Err(format!("unexpected argument: {arg}")),
            _ => parsed.path = Some(PathBuf::from(arg)),
        }
    }
    Ok(Cli::Run(parsed))
}

/// A file argument opens that file with its directory as the workspace.
fn resolve_target(path: Option<PathBuf>) -> io::Result<(PathBuf, Option<PathBuf>)> {
    let path = match path {
        Some(path) => path,
        None => return Ok((std::env::current_dir()?, None)),
    };
    if path.is_dir() {
        return Ok((path, None));
    }
    let root = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((root, Some(path)))
}

fn main() -> ExitCode {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(Cli::Run(args)) => args,
        Ok(Cli::Help) => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("{e}\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    let terminal = TerminalRestorer::new();
    let _logging = logging::init(terminal.clone());

    match run(args, &terminal) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "fatal error");
            eprintln!("blackparticle: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: CliArgs, terminal: &TerminalRestorer) -> io::Result<()> {
    if let Err(e) = ensure_settings_file() {
        tracing::warn!(error = %e, "cannot create settings file");
    }
    let settings = load_settings().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "using default settings");
        Settings::default()
    });

    let label = args.encoding.as_deref().or(settings.console.encoding.as_deref());
    let decoder = OutputDecoder::from_setting(label).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "falling back to native console encoding");
        OutputDecoder::native()
    });
    tracing::info!(encoding = decoder.name(), "console encoding");

    let (root, file) = resolve_target(args.path)?;
    let files: Arc<dyn FileProvider> = Arc::new(LocalFileProvider::new());
    let tree = build_file_tree(files.as_ref(), &root)
        .map_err(|e| io::Error::other(format!("cannot open {}: {e}", root.display())))?;
    tracing::info!(root = %tree.absolute_root().display(), "workspace opened");

    let (tx, rx) = message_channel();
    let runtime = AsyncRuntime::new(tx, Arc::clone(&files), decoder)?;
    let mut keybindings = KeybindingService::new();
    keybindings.apply_rules(&settings.keybindings);

    let mut workbench = Workbench::new(AppState::new(tree, &settings), runtime, rx, keybindings);
    if let Some(file) = file {
        let action = if file.exists() {
            Action::OpenPath(file)
        } else {
            Action::OpenNewPath(absolute(&file))
        };
        workbench.dispatch(action);
    }

    let result = event_loop(&mut workbench, terminal);
    workbench.shutdown();
    result
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

fn event_loop(workbench: &mut Workbench, terminal: &TerminalRestorer) -> io::Result<()> {
    let guard = TerminalGuard::enter(terminal)?;

    let (signal_tx, signal_rx) = mpsc::channel::<TerminationSignal>();
    #[cfg(unix)]
    blackparticle::tui::install_termination_signals(terminal.clone(), signal_tx)?;
    #[cfg(not(unix))]
    drop(signal_tx);

    let mut screen = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    screen.clear()?;

    let mut dirty = true;
    loop {
        if dirty {
            screen.draw(|frame| {
                let area = frame.area();
                workbench.render(frame, area);
            })?;
            dirty = false;
        }

        if let Ok(signal) = signal_rx.try_recv() {
            tracing::info!(?signal, "shutting down");
            break;
        }

        if crossterm::event::poll(POLL_INTERVAL)? {
            loop {
                if let Some(event) = into_input_event(crossterm::event::read()?) {
                    dirty |= workbench.handle_input(&event);
                }
                if !crossterm::event::poll(Duration::ZERO)? {
                    break;
                }
            }
        }

        dirty |= workbench.tick();
        if workbench.should_quit() {
            break;
        }
    }

    drop(screen);
    drop(guard);
    Ok(())
}
