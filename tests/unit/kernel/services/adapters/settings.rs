use super::*;
use tempfile::tempdir;

#[test]
fn test_missing_file_yields_defaults() {
    let dir = tempdir().unwrap();
    let settings = load_settings_from(&dir.path().join("nope.json")).unwrap();
    assert_eq!(settings, Settings::default());
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(
        &path,
        r#"{ "console": { "encoding": "windows-1252" }, "editor": { "tab_size": 2 } }"#,
    )
    .unwrap();

    let settings = load_settings_from(&path).unwrap();
    assert_eq!(settings.console.encoding.as_deref(), Some("windows-1252"));
    assert_eq!(settings.console.prompt, ">>> ");
    assert_eq!(settings.editor.tab_size, 2);
    assert!(settings.editor.show_line_numbers);
    assert!(settings.keybindings.is_empty());
}

#[test]
fn test_keybinding_rules_parse() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(
        &path,
        r#"{ "keybindings": [ { "key": "ctrl+k", "command": "clearConsole", "context": "console" } ] }"#,
    )
    .unwrap();

    let settings = load_settings_from(&path).unwrap();
    assert_eq!(settings.keybindings.len(), 1);
    assert_eq!(settings.keybindings[0].command, "clearConsole");
    assert_eq!(settings.keybindings[0].context.as_deref(), Some("console"));
}

#[test]
fn test_malformed_json_is_reported() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = load_settings_from(&path).unwrap_err();
    assert!(matches!(err, SettingsError::Json { .. }));
}

#[test]
fn test_write_default_creates_file_once() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(".blackparticle").join("settings.json");

    write_default_if_missing(&path).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    let parsed: Settings = serde_json::from_str(&written).unwrap();
    assert_eq!(parsed, Settings::default());

    std::fs::write(&path, "{}").unwrap();
    write_default_if_missing(&path).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
}
