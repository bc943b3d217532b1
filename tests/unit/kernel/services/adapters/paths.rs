use super::*;

#[test]
fn get_log_dir() {
    let dir = super::get_log_dir();
    // 在测试环境中应该能获取到目录
    assert!(dir.is_some());
    let dir = dir.unwrap();
    assert!(dir.to_string_lossy().contains(APP_NAME));
    assert!(dir.to_string_lossy().contains(LOG_DIR));
}

#[test]
fn get_settings_path() {
    let path = super::get_settings_path().unwrap();
    assert!(path.ends_with(format!("{SETTINGS_DIR}/{SETTINGS_FILE}")));
}
