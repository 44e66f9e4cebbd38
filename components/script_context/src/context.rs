//! Script contexts: lifecycle and exclusive access.

use std::fmt;
use std::ops::{Deref, DerefMut};

use core_types::{BridgeResult, ThreadMode};
use tracing::debug;

use crate::bridge::CallBridge;
use crate::config::{ContextConfig, ScriptSource};
use crate::model::{Multi, Single, ThreadModel};

/// Owns one primed interpreter for its whole lifetime.
///
/// The thread model `M` decides how [`acquire`](Self::acquire) excludes
/// other users. Results read through the returned guard stay valid until
/// the next invocation on the same guard.
pub struct ScriptContext<M: ThreadModel> {
    model: M,
}

/// Context for a single thread; no lock is taken.
pub type SingleContext = ScriptContext<Single>;

/// Context that may be shared between threads.
pub type SharedContext = ScriptContext<Multi>;

impl<M: ThreadModel> ScriptContext<M> {
    /// Creates a context with the default configuration.
    pub fn new(source: impl Into<ScriptSource>) -> BridgeResult<Self> {
        Self::with_config(source, ContextConfig::default())
    }

    /// Creates a context, priming the script before returning.
    pub fn with_config(source: impl Into<ScriptSource>, config: ContextConfig) -> BridgeResult<Self> {
        let source = source.into();
        let bridge = CallBridge::create(&source, config)?;
        debug!(chunk = %bridge.chunk_name(), mode = %M::MODE, "script context created");
        Ok(Self {
            model: M::new(bridge),
        })
    }

    /// Thread mode selected by `M`.
    pub fn thread_mode(&self) -> ThreadMode {
        M::MODE
    }

    /// Gains exclusive use of the interpreter.
    ///
    /// In [`Multi`] mode this blocks until no other guard is alive. Returns
    /// [`BridgeError::Unavailable`](core_types::BridgeError::Unavailable)
    /// once the context has been destroyed.
    pub fn acquire(&self) -> BridgeResult<ContextGuard<'_, M>> {
        Ok(ContextGuard {
            inner: self.model.lock()?,
        })
    }

    /// Tears down the interpreter.
    ///
    /// Waits for any live guard in [`Multi`] mode, then empties the slot so
    /// later acquires see an unavailable context. Destroying twice is a
    /// no-op.
    pub fn destroy(&self) -> BridgeResult<()> {
        if let Some(bridge) = self.model.take()? {
            debug!(chunk = %bridge.chunk_name(), mode = %M::MODE, "script context destroyed");
        }
        Ok(())
    }

    /// Destroys the context and consumes it.
    pub fn close(self) {}
}

impl<M: ThreadModel> fmt::Debug for ScriptContext<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptContext")
            .field("mode", &M::MODE)
            .finish_non_exhaustive()
    }
}

/// Exclusive access to a context's bridge.
///
/// Dropping the guard releases the context.
pub struct ContextGuard<'a, M: ThreadModel + 'a> {
    inner: M::Guard<'a>,
}

impl<M: ThreadModel> ContextGuard<'_, M> {
    /// Releases the context explicitly.
    pub fn release(self) {}
}

impl<M: ThreadModel> Deref for ContextGuard<'_, M> {
    type Target = CallBridge;

    fn deref(&self) -> &CallBridge {
        &self.inner
    }
}

impl<M: ThreadModel> DerefMut for ContextGuard<'_, M> {
    fn deref_mut(&mut self) -> &mut CallBridge {
        &mut self.inner
    }
}
