//! Unit tests for script context components

use script_context::{
    limits, BridgeError, ContextConfig, ErrorKind, LibraryRegistration, ScriptSource,
    SingleContext, ThreadMode,
};

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/bridge.lua");

fn context() -> SingleContext {
    SingleContext::new(ScriptSource::file(FIXTURE)).unwrap()
}

// ============================================================================
// Lifecycle Tests
// ============================================================================

#[test]
fn test_create_from_file() {
    let ctx = context();
    assert_eq!(ctx.thread_mode(), ThreadMode::Single);

    let bridge = ctx.acquire().unwrap();
    assert!(bridge.chunk_name().starts_with('@'));
    assert!(bridge.chunk_name().ends_with("bridge.lua"));
    assert_eq!(bridge.pair_count(), 0);
    assert_eq!(bridge.last_error(), "");
}

#[test]
fn test_priming_run_defines_globals() {
    let ctx = context();
    let bridge = ctx.acquire().unwrap();

    let calls: i64 = bridge.lua().globals().get("calls").unwrap();
    assert_eq!(calls, 0);
}

#[test]
fn test_create_missing_file() {
    let error = SingleContext::new(ScriptSource::file("/no/such/script.lua")).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Load);
}

#[test]
fn test_create_syntax_error() {
    let error = SingleContext::new(ScriptSource::chunk("bad", "function end")).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Load);
    assert_eq!(error.code(), -12);
}

#[test]
fn test_create_priming_failure() {
    let error =
        SingleContext::new(ScriptSource::chunk("boom", "error('priming exploded')")).unwrap_err();
    match error {
        BridgeError::Prime(message) => assert!(message.contains("priming exploded")),
        other => panic!("expected priming error, got {other:?}"),
    }
}

#[test]
fn test_library_registration_order() {
    fn open_first(lua: &mlua::Lua) -> mlua::Result<mlua::Value> {
        lua.globals().set("order", "first")?;
        Ok(mlua::Value::Nil)
    }
    fn open_second(lua: &mlua::Lua) -> mlua::Result<mlua::Value> {
        let order: String = lua.globals().get("order")?;
        lua.globals().set("order", format!("{order},second"))?;
        Ok(mlua::Value::Nil)
    }

    let config = ContextConfig::default()
        .with_library(LibraryRegistration::new("first", open_first))
        .with_library(LibraryRegistration::new("second", open_second));
    let script = "function __trycall(name, args) return { order = order } end";
    let ctx = SingleContext::with_config(ScriptSource::chunk("libs", script), config).unwrap();

    let mut bridge = ctx.acquire().unwrap();
    bridge.call("any", None).unwrap();
    assert_eq!(bridge.value_by_key("order").unwrap(), "first,second");
}

#[test]
fn test_restricted_std_libs() {
    let config = ContextConfig::default().with_std_libs(mlua::StdLib::NONE);
    let script = "function __trycall(name, args) return { has_string = tostring(string ~= nil) } end";
    let ctx = SingleContext::with_config(ScriptSource::chunk("bare", script), config).unwrap();

    let mut bridge = ctx.acquire().unwrap();
    bridge.call("probe", None).unwrap();
    assert_eq!(bridge.value_by_key("has_string").unwrap(), "false");
}

// ============================================================================
// Invocation Tests
// ============================================================================

#[test]
fn test_call_single_pair() {
    let ctx = context();
    let mut bridge = ctx.acquire().unwrap();

    assert_eq!(bridge.call("echo", Some(("name", "value"))).unwrap(), 1);
    assert_eq!(bridge.key(0).unwrap(), "name");
    assert_eq!(bridge.value(0).unwrap(), "value");
}

#[test]
fn test_call_without_pairs() {
    let ctx = context();
    let mut bridge = ctx.acquire().unwrap();

    assert_eq!(bridge.call("echo", None).unwrap(), 0);
    assert!(bridge.key(0).is_none());
}

#[test]
fn test_call_many() {
    let ctx = context();
    let mut bridge = ctx.acquire().unwrap();

    let count = bridge.call_many("add", &["a", "b"], &["40", "2"]).unwrap();
    assert_eq!(count, 1);
    assert_eq!(bridge.value_by_key("result").unwrap(), "42");
}

#[test]
fn test_nil_result_has_no_pairs() {
    let ctx = context();
    let mut bridge = ctx.acquire().unwrap();

    assert_eq!(bridge.call("nothing", None).unwrap(), 0);
}

#[test]
fn test_non_string_keys_and_values() {
    let ctx = context();
    let mut bridge = ctx.acquire().unwrap();

    assert_eq!(bridge.call("mixed", None).unwrap(), 4);
    assert_eq!(bridge.value_by_key("1").unwrap(), "one");
    assert_eq!(bridge.value_by_key("n").unwrap(), "2.5");

    let flag = bridge.value_by_key("flag").unwrap();
    assert!(flag.is_absent());
    assert_eq!(flag.encoded_len(), 0);

    let absent_keys = bridge
        .results()
        .iter()
        .filter(|(key, _)| key.is_absent())
        .count();
    assert_eq!(absent_keys, 1);
}

#[test]
fn test_script_error_is_captured() {
    let ctx = context();
    let mut bridge = ctx.acquire().unwrap();

    let error = bridge.call("fail", Some(("reason", "testing"))).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Call);
    assert!(error.to_string().starts_with("lua_pcall fail: "));
    assert!(bridge.last_error().contains("handler failed: testing"));
    assert_eq!(bridge.pair_count(), 0);
}

#[test]
fn test_context_usable_after_error() {
    let ctx = context();
    let mut bridge = ctx.acquire().unwrap();

    assert!(bridge.call("fail", None).is_err());
    assert_eq!(bridge.call("echo", Some(("ok", "yes"))).unwrap(), 1);
    assert_eq!(bridge.value_by_key("ok").unwrap(), "yes");
}

#[test]
fn test_last_error_overwritten() {
    let ctx = context();
    let mut bridge = ctx.acquire().unwrap();

    let _ = bridge.call("fail", Some(("reason", "first")));
    let _ = bridge.call("fail", Some(("reason", "second")));
    assert!(bridge.last_error().contains("second"));
    assert!(!bridge.last_error().contains("first"));
}

#[test]
fn test_memory_limit() {
    let config = ContextConfig::default().with_memory_limit(4 * 1024 * 1024);
    let ctx = SingleContext::with_config(ScriptSource::file(FIXTURE), config).unwrap();
    let mut bridge = ctx.acquire().unwrap();

    assert_eq!(bridge.call("hog", Some(("bytes", "1024"))).unwrap(), 1);

    let error = bridge.call("hog", Some(("bytes", "67108864"))).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::OutOfMemory);
}

// ============================================================================
// Bounds Tests
// ============================================================================

#[test]
fn test_keys_overflow() {
    let ctx = context();
    let mut bridge = ctx.acquire().unwrap();

    // 9 keys of 501 encoded bytes; only 8 fit in 4096
    let error = bridge
        .invoke("wide_keys", [("n", "9"), ("width", "500")])
        .unwrap_err();
    assert_eq!(
        error,
        BridgeError::KeysOverflow {
            capacity: limits::KEYS_BUFSIZE
        }
    );
    assert_eq!(bridge.pair_count(), 8);
    assert_eq!(
        bridge.last_error(),
        "too large out keys: more than 4096 bytes."
    );
    for i in 0..8 {
        assert_eq!(bridge.key(i).unwrap().as_bytes().len(), 500);
        assert_eq!(bridge.value(i).unwrap(), "x");
    }
}

#[test]
fn test_values_overflow() {
    let ctx = context();
    let mut bridge = ctx.acquire().unwrap();

    // 5 values of 4001 encoded bytes; only 4 fit in 16384
    let error = bridge
        .invoke("wide_values", [("n", "5"), ("width", "4000")])
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::ValuesOverflow);
    assert_eq!(bridge.pair_count(), 4);
    assert_eq!(
        bridge.last_error(),
        "too large out values: more than 16384 bytes."
    );
}

#[test]
fn test_pair_ceiling() {
    let ctx = context();
    let mut bridge = ctx.acquire().unwrap();

    let max = limits::PAIRS_MAXNUM.to_string();
    assert_eq!(
        bridge.call("count", Some(("n", max.as_str()))).unwrap(),
        limits::PAIRS_MAXNUM
    );

    let over = (limits::PAIRS_MAXNUM + 1).to_string();
    let error = bridge.call("count", Some(("n", over.as_str()))).unwrap_err();
    assert_eq!(
        error,
        BridgeError::TooManyPairs {
            max: limits::PAIRS_MAXNUM
        }
    );
    assert_eq!(bridge.pair_count(), limits::PAIRS_MAXNUM);
    assert_eq!(bridge.last_error(), "too many out pairs: more than 254.");
}
