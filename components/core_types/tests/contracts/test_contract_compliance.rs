//! Contract compliance tests for core_types
//!
//! These tests pin the public constants and messages other components
//! and embedders rely on.

use core_types::{limits, BridgeError, BridgeResult, ErrorKind, ThreadMode};

#[test]
fn test_default_limits() {
    assert_eq!(limits::ERROR_MAXLEN, 255);
    assert_eq!(limits::PAIRS_MAXNUM, 254);
    assert_eq!(limits::KEYS_BUFSIZE, 4096);
    assert_eq!(limits::VALUES_BUFSIZE, 16384);
}

#[test]
fn test_trampoline_name() {
    assert_eq!(limits::TRAMPOLINE_NAME, "__trycall");
}

#[test]
fn test_bridge_result_alias() {
    fn fails() -> BridgeResult<()> {
        Err(BridgeError::Unavailable)
    }
    assert_eq!(fails().unwrap_err().kind(), ErrorKind::Unavailable);
}

#[test]
fn test_bridge_error_is_std_error() {
    fn assert_error<E: std::error::Error + Send + Sync + 'static>() {}
    assert_error::<BridgeError>();
}

#[test]
fn test_thread_mode_variants() {
    let _ = ThreadMode::Single;
    let _ = ThreadMode::Multi;
}
