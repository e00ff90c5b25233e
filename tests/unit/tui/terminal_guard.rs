use super::*;
use std::sync::Mutex;

#[derive(Clone, Default)]
struct RecordingScreen {
    calls: Arc<Mutex<Vec<&'static str>>>,
    fail_enter: bool,
}

impl RecordingScreen {
    fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }
}

impl ScreenMode for RecordingScreen {
    fn enter(&self) -> io::Result<()> {
        self.calls.lock().unwrap().push("enter");
        if self.fail_enter {
            return Err(io::Error::other("no tty"));
        }
        Ok(())
    }

    fn leave(&self) -> io::Result<()> {
        self.calls.lock().unwrap().push("leave");
        Ok(())
    }
}

#[test]
fn guard_leaves_ui_mode_on_drop() {
    let screen = RecordingScreen::default();
    let restorer = TerminalRestorer::with_mode(screen.clone());
    {
        let _guard = TerminalGuard::enter(&restorer).unwrap();
        assert!(restorer.is_active());
    }

    assert!(!restorer.is_active());
    assert_eq!(screen.calls(), ["enter", "leave"]);
}

#[test]
fn restore_runs_once_across_clones() {
    let screen = RecordingScreen::default();
    let restorer = TerminalRestorer::with_mode(screen.clone());
    let guard = TerminalGuard::enter(&restorer).unwrap();

    let from_panic_hook = restorer.clone();
    from_panic_hook.restore().unwrap();
    restorer.restore().unwrap();
    drop(guard);

    assert_eq!(screen.calls(), ["enter", "leave"]);
}

#[test]
fn restore_before_enter_does_nothing() {
    let screen = RecordingScreen::default();
    let restorer = TerminalRestorer::with_mode(screen.clone());

    restorer.restore().unwrap();
    assert!(screen.calls().is_empty());
}

#[test]
fn failed_enter_rolls_back_and_stays_inactive() {
    let screen = RecordingScreen {
        fail_enter: true,
        ..RecordingScreen::default()
    };
    let restorer = TerminalRestorer::with_mode(screen.clone());

    assert!(TerminalGuard::enter(&restorer).is_err());
    assert!(!restorer.is_active());
    restorer.restore().unwrap();
    assert_eq!(screen.calls(), ["enter", "leave"]);
}

#[test]
fn terminal_can_be_entered_again_after_restore() {
    let screen = RecordingScreen::default();
    let restorer = TerminalRestorer::with_mode(screen.clone());

    drop(TerminalGuard::enter(&restorer).unwrap());
    drop(TerminalGuard::enter(&restorer).unwrap());

    assert_eq!(screen.calls(), ["enter", "leave", "enter", "leave"]);
}

#[cfg(unix)]
#[test]
fn raw_signals_map_to_shell_exit_codes() {
    use signal_hook::consts::signal::{SIGHUP, SIGINT, SIGTERM};

    assert_eq!(
        TerminationSignal::from_raw(SIGINT).map(TerminationSignal::exit_code),
        Some(130)
    );
    assert_eq!(
        TerminationSignal::from_raw(SIGTERM).map(TerminationSignal::exit_code),
        Some(143)
    );
    assert_eq!(TerminationSignal::from_raw(SIGHUP), None);
}
