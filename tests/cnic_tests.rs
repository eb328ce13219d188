//! CNIC 格式化与校验测试

use signaid::application::cnic::{
    format_cnic, is_valid_cnic, raw_digits, validate_cnic, CNIC_ERROR,
};
use signaid::domain::error::SignAidError;

#[test]
fn test_format_full_cnic() {
    assert_eq!(format_cnic("3520212345671"), "35202-1234567-1");
    assert_eq!(format_cnic("35202-1234567-1"), "35202-1234567-1");
}

#[test]
fn test_format_is_progressive() {
    assert_eq!(format_cnic(""), "");
    assert_eq!(format_cnic("352"), "352");
    assert_eq!(format_cnic("35202"), "35202");
    assert_eq!(format_cnic("352021"), "35202-1");
    assert_eq!(format_cnic("352021234567"), "35202-1234567");
    assert_eq!(format_cnic("3520212345671"), "35202-1234567-1");
}

#[test]
fn test_format_drops_noise_and_extra_digits() {
    assert_eq!(format_cnic("35 202/12a34567 1"), "35202-1234567-1");
    assert_eq!(format_cnic("352021234567199"), "35202-1234567-1");
    assert_eq!(raw_digits("35202-1234567-1"), "3520212345671");
}

#[test]
fn test_validity() {
    assert!(is_valid_cnic("35202-1234567-1"));
    assert!(is_valid_cnic("3520212345671"));
    assert!(!is_valid_cnic("35202-1234567"));
    assert!(!is_valid_cnic("35202123456712"));
}

#[test]
fn test_validate_returns_formatted_or_error() {
    assert_eq!(
        validate_cnic("3520212345671").expect("valid"),
        "35202-1234567-1"
    );

    match validate_cnic("12-34") {
        Err(SignAidError::Validation(msg)) => assert_eq!(msg, CNIC_ERROR),
        other => panic!("unexpected: {:?}", other),
    }
}
