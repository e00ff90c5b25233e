use super::*;

#[cfg(any(target_os = "macos", target_os = "linux", target_os = "windows"))]
#[test]
fn test_get_log_dir() {
    let Some(dir) = get_log_dir() else {
        return;
    };
    let text = dir.to_string_lossy();
    assert!(text.contains(APP_NAME));
    assert!(text.ends_with(LOG_DIR));
}

#[test]
fn test_ensure_dir_creates_nested() {
    let tmp = tempfile::tempdir().unwrap();
    let nested = tmp.path().join("x").join("y");

    ensure_dir(&nested).unwrap();
    assert!(nested.is_dir());

    ensure_dir(&nested).unwrap();
}
