//! The call bridge: one primed interpreter plus its result buffers.
//!
//! A [`CallBridge`] is what a context guard hands out. Invoking a function
//! resets the previous results, dispatches through the script's trampoline,
//! and drains the returned table into the fixed-capacity [`ResultSet`].

use arrayvec::ArrayString;
use core_types::limits::{ERROR_MAXLEN, TRAMPOLINE_NAME};
use core_types::{BridgeError, BridgeResult};
use mlua::{Lua, LuaOptions, Value};
use result_arena::{Entry, ResultSet};
use tracing::{debug, warn};

use crate::config::{ContextConfig, ScriptSource};
use crate::{library, trampoline};

/// A primed interpreter and the output of its most recent invocation.
pub struct CallBridge {
    lua: Lua,
    results: Box<ResultSet>,
    last_error: ArrayString<ERROR_MAXLEN>,
    chunk_name: String,
}

/// Message of an engine error without mlua's category prefix or the
/// traceback its message handler appends.
fn engine_message(error: &mlua::Error) -> String {
    let message = match error {
        mlua::Error::RuntimeError(message) | mlua::Error::MemoryError(message) => message.clone(),
        mlua::Error::CallbackError { cause, .. } => return engine_message(cause),
        other => other.to_string(),
    };
    if let Some((head, _)) = message.split_once("\nstack traceback:") {
        return head.to_string();
    }
    message
}

/// Maps an engine error, keeping allocation failures distinct.
fn engine_error(error: mlua::Error, wrap: impl FnOnce(String) -> BridgeError) -> BridgeError {
    match &error {
        mlua::Error::MemoryError(_) => BridgeError::OutOfMemory(engine_message(&error)),
        mlua::Error::CallbackError { cause, .. } => engine_error(cause.as_ref().clone(), wrap),
        _ => wrap(engine_message(&error)),
    }
}

impl CallBridge {
    /// Creates an interpreter, registers libraries, loads the script and
    /// runs its top level once.
    ///
    /// The priming run is what defines the trampoline and the functions it
    /// dispatches to; a context is never returned without it.
    pub fn create(source: &ScriptSource, config: ContextConfig) -> BridgeResult<Self> {
        let lua = Lua::new_with(config.std_libs, LuaOptions::default())
            .map_err(|e| BridgeError::NewState(e.to_string()))?;

        if let Some(limit) = config.memory_limit {
            lua.set_memory_limit(limit)
                .map_err(|e| BridgeError::NewState(e.to_string()))?;
        }

        if config.default_trampoline {
            trampoline::install(&lua)?;
        }
        library::register_all(&lua, &config.libraries)?;

        let chunk = source.compile(&lua)?;
        chunk
            .call::<()>(())
            .map_err(|e| engine_error(e, BridgeError::Prime))?;

        let chunk_name = source.chunk_name();
        debug!(
            chunk = %chunk_name,
            libraries = config.libraries.len(),
            memory_limit = ?config.memory_limit,
            "script context primed"
        );

        Ok(Self {
            lua,
            results: Box::new(ResultSet::new()),
            last_error: ArrayString::new(),
            chunk_name,
        })
    }

    /// Calls `function` through the trampoline with `args` as its argument
    /// table, and stores the returned pairs.
    ///
    /// Previous results are discarded first, even if this call fails. Pairs
    /// with an empty key are not passed to the script. Returns the number
    /// of pairs stored.
    pub fn invoke<I, K, V>(&mut self, function: &str, args: I) -> BridgeResult<usize>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<[u8]>,
        V: AsRef<[u8]>,
    {
        self.results.reset();

        let outcome = self
            .dispatch(function, args)
            .and_then(|returned| self.flatten(function, returned));

        match &outcome {
            Ok(pairs) => debug!(function, pairs, "invocation complete"),
            Err(error) => {
                if error.kind().is_capacity() {
                    warn!(
                        function,
                        pairs = self.results.len(),
                        %error,
                        "result exceeds capacity"
                    );
                } else {
                    debug!(function, %error, "invocation failed");
                }
                self.record_error(error);
            }
        }
        outcome
    }

    /// Calls `function` with at most one key/value argument.
    pub fn call(&mut self, function: &str, pair: Option<(&str, &str)>) -> BridgeResult<usize> {
        self.invoke(function, pair)
    }

    /// Calls `function` with parallel key and value sequences.
    ///
    /// Sequences of different lengths are rejected before the previous
    /// results are touched: the failure is recorded in
    /// [`last_error`](Self::last_error) while the earlier pairs stay
    /// readable.
    pub fn call_many<K, V>(&mut self, function: &str, keys: &[K], values: &[V]) -> BridgeResult<usize>
    where
        K: AsRef<[u8]>,
        V: AsRef<[u8]>,
    {
        if keys.len() != values.len() {
            let error = BridgeError::InvalidArguments(format!(
                "{} keys but {} values",
                keys.len(),
                values.len()
            ));
            self.record_error(&error);
            return Err(error);
        }
        self.invoke(function, keys.iter().zip(values))
    }

    fn dispatch<I, K, V>(&self, function: &str, args: I) -> BridgeResult<Value>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<[u8]>,
        V: AsRef<[u8]>,
    {
        let call_error = |message: String| BridgeError::Call {
            function: function.to_string(),
            message,
        };

        let trampoline = match self.lua.globals().get::<Value>(TRAMPOLINE_NAME) {
            Ok(Value::Function(trampoline)) => trampoline,
            Ok(other) => {
                return Err(call_error(format!(
                    "attempt to call a {} value (global '{TRAMPOLINE_NAME}')",
                    other.type_name()
                )))
            }
            Err(e) => return Err(engine_error(e, call_error)),
        };

        let build_args = || -> mlua::Result<mlua::Table> {
            let table = self.lua.create_table()?;
            for (key, value) in args {
                let key = key.as_ref();
                if key.is_empty() {
                    continue;
                }
                table.raw_set(
                    self.lua.create_string(key)?,
                    self.lua.create_string(value.as_ref())?,
                )?;
            }
            Ok(table)
        };
        let args = build_args().map_err(|e| engine_error(e, call_error))?;

        trampoline
            .call::<Value>((function, args))
            .map_err(|e| engine_error(e, call_error))
    }

    fn flatten(&mut self, function: &str, returned: Value) -> BridgeResult<usize> {
        let call_error = |message: String| BridgeError::Call {
            function: function.to_string(),
            message,
        };

        let table = match returned {
            Value::Nil => return Ok(0),
            Value::Table(table) => table,
            other => {
                return Err(call_error(format!(
                    "expected table result, got {}",
                    other.type_name()
                )))
            }
        };

        for entry in table.pairs::<Value, Value>() {
            let (key, value) = entry.map_err(|e| engine_error(e, call_error))?;
            let key = self
                .lua
                .coerce_string(key)
                .map_err(|e| engine_error(e, call_error))?;
            let value = self
                .lua
                .coerce_string(value)
                .map_err(|e| engine_error(e, call_error))?;

            let key = key.as_ref().map(|s| s.as_bytes());
            let value = value.as_ref().map(|s| s.as_bytes());
            self.results.push(key.as_deref(), value.as_deref())?;
        }

        Ok(self.results.len())
    }

    fn record_error(&mut self, error: &BridgeError) {
        let message = error.to_string();
        let mut end = message.len().min(ERROR_MAXLEN);
        while !message.is_char_boundary(end) {
            end -= 1;
        }
        self.last_error.clear();
        self.last_error.push_str(&message[..end]);
    }

    /// Number of pairs from the last invocation.
    pub fn pair_count(&self) -> usize {
        self.results.len()
    }

    /// Key of pair `index`.
    pub fn key(&self, index: usize) -> Option<Entry<'_>> {
        self.results.key(index)
    }

    /// Value of pair `index`.
    pub fn value(&self, index: usize) -> Option<Entry<'_>> {
        self.results.value(index)
    }

    /// Index of the first pair whose key equals `key`.
    pub fn find_key(&self, key: impl AsRef<[u8]>) -> Option<usize> {
        self.results.find_key(key.as_ref())
    }

    /// Value paired with `key`.
    pub fn value_by_key(&self, key: impl AsRef<[u8]>) -> Option<Entry<'_>> {
        self.results.value_by_key(key.as_ref())
    }

    /// All pairs from the last invocation.
    pub fn results(&self) -> &ResultSet {
        &self.results
    }

    /// Message of the most recent failure, truncated to
    /// [`ERROR_MAXLEN`] bytes. Empty until something fails.
    pub fn last_error(&self) -> &str {
        &self.last_error
    }

    /// Chunk name of the primed script.
    pub fn chunk_name(&self) -> &str {
        &self.chunk_name
    }

    /// The underlying interpreter.
    pub fn lua(&self) -> &Lua {
        &self.lua
    }
}

impl Drop for CallBridge {
    fn drop(&mut self) {
        debug!(chunk = %self.chunk_name, "interpreter closed");
    }
}
