//! 日志配置功能测试

use signaid::infrastructure::config::Logging;
use signaid::infrastructure::logging::parse_log_level;

#[test]
fn test_log_level_parsing() {
    assert_eq!(parse_log_level("TRACE"), "trace");
    assert_eq!(parse_log_level("DEBUG"), "debug");
    assert_eq!(parse_log_level("INFO"), "info");
    assert_eq!(parse_log_level("WARN"), "warn");
    assert_eq!(parse_log_level("ERROR"), "error");
}

#[test]
fn test_log_level_case_insensitive() {
    assert_eq!(parse_log_level("debug"), "debug");
    assert_eq!(parse_log_level("Info"), "info");
}

#[test]
fn test_unknown_log_level_falls_back_to_warn() {
    assert_eq!(parse_log_level("VERBOSE"), "warn");
    assert_eq!(parse_log_level(""), "warn");
}

#[test]
fn test_log_level_default() {
    let logging = Logging::default();

    assert!(logging.enable);
    assert_eq!(parse_log_level(&logging.level), "warn");
}
