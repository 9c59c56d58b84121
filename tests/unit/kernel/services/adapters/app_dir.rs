use super::*;

#[test]
fn test_get_log_dir() {
    let Some(dir) = get_log_dir() else {
        return;
    };
    assert!(dir.to_string_lossy().contains(APP_NAME));
    assert!(dir.ends_with(LOG_DIR));
}
