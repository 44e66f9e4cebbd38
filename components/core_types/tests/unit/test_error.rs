//! Unit tests for BridgeError and ErrorKind

use core_types::{limits, BridgeError, ErrorKind};

#[test]
fn test_every_variant_maps_to_its_kind() {
    let cases = vec![
        (BridgeError::OutOfMemory("heap".into()), ErrorKind::OutOfMemory),
        (BridgeError::Lock("busy".into()), ErrorKind::Lock),
        (BridgeError::Unavailable, ErrorKind::Unavailable),
        (BridgeError::NewState("no state".into()), ErrorKind::NewState),
        (
            BridgeError::Library {
                name: "json".into(),
                message: "boom".into(),
            },
            ErrorKind::Library,
        ),
        (
            BridgeError::Load {
                chunk: "@main.lua".into(),
                message: "unexpected symbol".into(),
            },
            ErrorKind::Load,
        ),
        (BridgeError::Prime("boom".into()), ErrorKind::Prime),
        (
            BridgeError::Call {
                function: "f".into(),
                message: "boom".into(),
            },
            ErrorKind::Call,
        ),
        (
            BridgeError::KeysOverflow {
                capacity: limits::KEYS_BUFSIZE,
            },
            ErrorKind::KeysOverflow,
        ),
        (
            BridgeError::ValuesOverflow {
                capacity: limits::VALUES_BUFSIZE,
            },
            ErrorKind::ValuesOverflow,
        ),
        (
            BridgeError::TooManyPairs {
                max: limits::PAIRS_MAXNUM,
            },
            ErrorKind::TooManyPairs,
        ),
        (
            BridgeError::InvalidArguments("len".into()),
            ErrorKind::InvalidArguments,
        ),
    ];

    for (error, kind) in cases {
        assert_eq!(error.kind(), kind, "{error}");
    }
}

#[test]
fn test_historical_codes() {
    assert_eq!(ErrorKind::OutOfMemory.code(), -4);
    assert_eq!(ErrorKind::Lock.code(), -5);
    assert_eq!(ErrorKind::NewState.code(), -11);
    assert_eq!(ErrorKind::Load.code(), -12);
    assert_eq!(ErrorKind::Prime.code(), -13);
    assert_eq!(ErrorKind::Call.code(), -1);
}

#[test]
fn test_load_error_names_chunk() {
    let error = BridgeError::Load {
        chunk: "@scripts/main.lua".into(),
        message: "No such file or directory".into(),
    };
    let text = error.to_string();
    assert!(text.contains("@scripts/main.lua"));
    assert!(text.contains("No such file"));
}

#[test]
fn test_pair_limit_message() {
    let error = BridgeError::TooManyPairs {
        max: limits::PAIRS_MAXNUM,
    };
    assert_eq!(error.to_string(), "too many out pairs: more than 254.");
}
